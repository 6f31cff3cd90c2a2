use tracing::{error, info, warn};
use tradebook_model::{
    error::ReportError,
    instruments::Instrument,
    source::{QuoteSource, RecordSource},
    summary::QuoteStatus,
};

use crate::{
    aggregator::Aggregator,
    normalizer::{Normalized, RecordAdapter},
    report::Report,
    series::daily_series,
};

use self::builder::PipelineBuilder;

pub mod builder;

/// Fetch -> Normalize -> Aggregate for one record shape.
///
/// A run performs exactly one fetch and never retries. Any error is terminal for that
/// run only, so separate pipelines are independent fault domains.
pub struct Pipeline<Source, Adapter>
where
    Source: RecordSource,
    Adapter: RecordAdapter<Record = Source::Record>,
{
    pub(crate) instrument: Instrument,
    pub(crate) source: Source,
    pub(crate) adapter: Adapter,
    pub(crate) quote_source: Option<Box<dyn QuoteSource>>,
}

impl<Source, Adapter> Pipeline<Source, Adapter>
where
    Source: RecordSource,
    Adapter: RecordAdapter<Record = Source::Record>,
{
    pub fn builder() -> PipelineBuilder<Source, Adapter> {
        PipelineBuilder::new()
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub async fn run(&self) -> Result<Report, ReportError> {
        let records = self.source.fetch(&self.instrument).await.map_err(|error| {
            error!(
                kind = %Adapter::KIND,
                instrument = %self.instrument,
                %error,
                "failed to fetch history"
            );
            ReportError::from(error)
        })?;

        let Normalized { ledger, window, span } = match self.adapter.normalize(records) {
            Ok(normalized) => normalized,
            Err(error) if error.is_informational() => {
                info!(kind = %Adapter::KIND, instrument = %self.instrument, "no history to report");
                return Err(error);
            }
            Err(error) => {
                error!(kind = %Adapter::KIND, instrument = %self.instrument, %error, "failed to normalize history");
                return Err(error);
            }
        };

        let quote = self.fetch_quote().await;
        let (summary, daily) = Aggregator::summarise(&ledger, quote.price())
            .and_then(|summary| Ok((summary, daily_series(&ledger)?)))
            .map_err(|error| {
                error!(kind = %Adapter::KIND, instrument = %self.instrument, %error, "failed to aggregate history");
                error
            })?;

        Ok(Report {
            instrument: self.instrument.clone(),
            ledger,
            window,
            span,
            summary,
            quote,
            daily,
        })
    }

    /// Quote failures degrade the report instead of failing the run.
    async fn fetch_quote(&self) -> QuoteStatus {
        let Some(quote_source) = &self.quote_source else {
            return QuoteStatus::NotRequested;
        };

        match quote_source.fetch_price(&self.instrument).await {
            Ok(price) => QuoteStatus::Live(price),
            Err(error) => {
                let error = ReportError::MissingQuote(error.to_string());
                warn!(instrument = %self.instrument, %error, "continuing without unrealized P/L");
                QuoteStatus::Missing(error.to_string())
            }
        }
    }
}
