use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradebook_macro::AsUrlParams;
use tradebook_model::{deserialization, instruments::Instrument};

use crate::protocol::http::rest::request::{AsUrlParams, RestRequest};

/// `GET /api/v3/ticker/price`: latest price of one symbol.
///
/// See docs: <https://binance-docs.github.io/apidocs/spot/en/#symbol-price-ticker>
#[derive(Debug, Clone)]
pub struct TickerPriceRequest {
    query: TickerQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, AsUrlParams)]
pub struct TickerQuery {
    pub symbol: String,
}

impl TickerPriceRequest {
    pub fn new(instrument: &Instrument) -> Self {
        Self {
            query: TickerQuery {
                symbol: instrument.exchange_symbol(),
            },
        }
    }
}

impl RestRequest for TickerPriceRequest {
    type Response = BinanceTickerPrice;
    type QueryParams = TickerQuery;
    type Body = ();

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/v3/ticker/price")
    }

    fn method() -> reqwest::Method {
        reqwest::Method::GET
    }

    fn query_params(&self) -> Option<&Self::QueryParams> {
        Some(&self.query)
    }
}

/// ### Raw Payload Examples
/// ```json
/// {"symbol": "BTCUSDT", "price": "64012.34000000"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinanceTickerPrice {
    pub symbol: String,
    #[serde(deserialize_with = "deserialization::de_str")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_de_ticker_price() {
        struct TestCase {
            input: &'static str,
            expected: Option<BinanceTickerPrice>,
        }

        let cases = vec![
            TestCase {
                // TC0: valid ticker
                input: r#"{"symbol": "BTCUSDT", "price": "64012.34000000"}"#,
                expected: Some(BinanceTickerPrice {
                    symbol: "BTCUSDT".to_string(),
                    price: dec!(64012.34),
                }),
            },
            TestCase {
                // TC1: price is not a number
                input: r#"{"symbol": "BTCUSDT", "price": "n/a"}"#,
                expected: None,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = serde_json::from_str::<BinanceTickerPrice>(test.input).ok();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_ticker_query_params() {
        let request = TickerPriceRequest::new(&Instrument::new("btc", "usdt"));
        assert_eq!(request.query_params().map(|query| query.to_url_params()).as_deref(), Some("symbol=BTCUSDT"));
    }
}
