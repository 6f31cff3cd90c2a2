use std::borrow::Cow;

use async_trait::async_trait;
use tracing::info;
use tradebook_model::{error::SocketError, instruments::Instrument, record::RawOrder, source::RecordSource};

use self::order::AllOrdersRequest;

use super::{signed_client, BinanceSignedClient, Credentials};

pub mod order;

pub const HTTP_BASE_URL_BINANCE_TH: &str = "https://api.binance.th";

/// Binance TH account order history. Every request is signed.
pub struct BinanceThailand {
    signed: BinanceSignedClient,
}

impl BinanceThailand {
    pub fn new<Url>(base_url: Url, credentials: &Credentials) -> Result<Self, SocketError>
    where
        Url: Into<Cow<'static, str>>,
    {
        Ok(Self {
            signed: signed_client(base_url, credentials)?,
        })
    }
}

#[async_trait]
impl RecordSource for BinanceThailand {
    type Record = RawOrder;

    async fn fetch(&self, instrument: &Instrument) -> Result<Vec<RawOrder>, SocketError> {
        let (_, orders) = self.signed.execute(AllOrdersRequest::new(instrument)).await?;
        info!(%instrument, orders = orders.len(), "fetched order history");
        Ok(orders)
    }
}
