use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{error::SocketError, instruments::Instrument};

/// Fetches the full raw history of one record shape for an [`Instrument`].
///
/// Implementations hold their own credentials and transport; callers only ever see the
/// decoded records or a [`SocketError`].
#[async_trait]
pub trait RecordSource: Send + Sync {
    type Record: Send;

    async fn fetch(&self, instrument: &Instrument) -> Result<Vec<Self::Record>, SocketError>;
}

/// Fetches the current market price of an [`Instrument`].
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_price(&self, instrument: &Instrument) -> Result<Decimal, SocketError>;
}

// Lets one client serve as both the history and the quote source of a pipeline
#[async_trait]
impl<T> RecordSource for Arc<T>
where
    T: RecordSource + ?Sized,
{
    type Record = T::Record;

    async fn fetch(&self, instrument: &Instrument) -> Result<Vec<Self::Record>, SocketError> {
        (**self).fetch(instrument).await
    }
}

#[async_trait]
impl<T> QuoteSource for Arc<T>
where
    T: QuoteSource + ?Sized,
{
    async fn fetch_price(&self, instrument: &Instrument) -> Result<Decimal, SocketError> {
        (**self).fetch_price(instrument).await
    }
}
