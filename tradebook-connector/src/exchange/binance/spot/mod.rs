use std::borrow::Cow;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;
use tradebook_model::{
    error::SocketError,
    instruments::Instrument,
    record::RawFill,
    source::{QuoteSource, RecordSource},
};

use self::{ticker::TickerPriceRequest, trade::AccountTradesRequest};

use super::{public_client, signed_client, BinancePublicClient, BinanceSignedClient, Credentials};

pub mod ticker;
pub mod trade;

pub const HTTP_BASE_URL_BINANCE_SPOT: &str = "https://api.binance.com";

/// Binance spot account: trade fills (signed) and live ticker quotes (public).
pub struct BinanceSpot {
    signed: BinanceSignedClient,
    public: BinancePublicClient,
}

impl BinanceSpot {
    pub fn new<Url>(base_url: Url, credentials: &Credentials) -> Result<Self, SocketError>
    where
        Url: Into<Cow<'static, str>>,
    {
        let base_url = base_url.into();
        Ok(Self {
            signed: signed_client(base_url.clone(), credentials)?,
            public: public_client(base_url),
        })
    }
}

#[async_trait]
impl RecordSource for BinanceSpot {
    type Record = RawFill;

    async fn fetch(&self, instrument: &Instrument) -> Result<Vec<RawFill>, SocketError> {
        let (_, fills) = self.signed.execute(AccountTradesRequest::new(instrument)).await?;
        info!(%instrument, fills = fills.len(), "fetched account trades");
        Ok(fills)
    }
}

#[async_trait]
impl QuoteSource for BinanceSpot {
    async fn fetch_price(&self, instrument: &Instrument) -> Result<Decimal, SocketError> {
        let (_, ticker) = self.public.execute(TickerPriceRequest::new(instrument)).await?;
        info!(%instrument, price = %ticker.price, "fetched live quote");
        Ok(ticker.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn credentials() -> Credentials {
        Credentials::new("spot-key", "spot-secret")
    }

    #[tokio::test]
    async fn test_fetch_fills() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/myTrades"))
            .and(query_param("symbol", "BTCUSDT"))
            .and(header("X-MBX-APIKEY", "spot-key"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{
                    "symbol": "BTCUSDT", "id": 1, "orderId": 7, "orderListId": -1,
                    "price": "42000.00", "qty": "0.001", "quoteQty": "42.00",
                    "commission": "0.00000100", "commissionAsset": "BTC",
                    "time": 1704141000000, "isBuyer": true, "isMaker": false, "isBestMatch": true
                }]"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let spot = BinanceSpot::new(server.uri(), &credentials()).unwrap();
        let fills = spot.fetch(&Instrument::new("btc", "usdt")).await.unwrap();

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].order_id, 7);
        assert_eq!(fills[0].commission_asset, "BTC");
    }

    #[tokio::test]
    async fn test_fetch_price_is_unsigned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .and(query_param("symbol", "BTCUSDT"))
            .and(|request: &wiremock::Request| {
                !request.headers.contains_key("X-MBX-APIKEY")
                    && request.url.query_pairs().all(|(key, _)| key != "signature")
            })
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"symbol": "BTCUSDT", "price": "64012.34000000"}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let spot = BinanceSpot::new(server.uri(), &credentials()).unwrap();
        let price = spot.fetch_price(&Instrument::new("btc", "usdt")).await.unwrap();

        assert_eq!(price, dec!(64012.34));
    }

    #[tokio::test]
    async fn test_fetch_price_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .respond_with(ResponseTemplate::new(400).set_body_raw(
                r#"{"code":-1121,"msg":"Invalid symbol."}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let spot = BinanceSpot::new(server.uri(), &credentials()).unwrap();
        let actual = spot.fetch_price(&Instrument::new("btc", "usdt")).await;

        match actual {
            Err(SocketError::HttpResponse(status, body)) => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(body, "code -1121: Invalid symbol.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
