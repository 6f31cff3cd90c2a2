use tradebook_model::{
    error::ReportError,
    instruments::Instrument,
    source::{QuoteSource, RecordSource},
};

use crate::normalizer::RecordAdapter;

use super::Pipeline;

/// Builder to construct [`Pipeline`] instances.
pub struct PipelineBuilder<Source, Adapter>
where
    Source: RecordSource,
    Adapter: RecordAdapter<Record = Source::Record>,
{
    instrument: Option<Instrument>,
    source: Option<Source>,
    adapter: Option<Adapter>,
    quote_source: Option<Box<dyn QuoteSource>>,
}

impl<Source, Adapter> PipelineBuilder<Source, Adapter>
where
    Source: RecordSource,
    Adapter: RecordAdapter<Record = Source::Record>,
{
    pub fn new() -> Self {
        Self {
            instrument: None,
            source: None,
            adapter: None,
            quote_source: None,
        }
    }

    pub fn instrument(self, value: Instrument) -> Self {
        Self {
            instrument: Some(value),
            ..self
        }
    }

    pub fn source(self, value: Source) -> Self {
        Self {
            source: Some(value),
            ..self
        }
    }

    pub fn adapter(self, value: Adapter) -> Self {
        Self {
            adapter: Some(value),
            ..self
        }
    }

    /// Optional. Without a quote source the report carries no unrealized P/L.
    pub fn quote_source(self, value: Box<dyn QuoteSource>) -> Self {
        Self {
            quote_source: Some(value),
            ..self
        }
    }

    pub fn build(self) -> Result<Pipeline<Source, Adapter>, ReportError> {
        Ok(Pipeline {
            instrument: self.instrument.ok_or(ReportError::BuilderIncomplete("instrument"))?,
            source: self.source.ok_or(ReportError::BuilderIncomplete("source"))?,
            adapter: self.adapter.ok_or(ReportError::BuilderIncomplete("adapter"))?,
            quote_source: self.quote_source,
        })
    }
}

impl<Source, Adapter> Default for PipelineBuilder<Source, Adapter>
where
    Source: RecordSource,
    Adapter: RecordAdapter<Record = Source::Record>,
{
    fn default() -> Self {
        Self::new()
    }
}
