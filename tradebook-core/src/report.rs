use tradebook_model::{
    enums::PipelineKind,
    instruments::Instrument,
    ledger::{DateSpan, Ledger, LedgerRow},
    summary::{DailyPoint, QuoteStatus, SummaryStats},
};

use crate::{
    filter::{filter_range, newest_first},
    normalizer::EpochWindow,
    series::{average_cost_line, CostLine},
};

/// Everything one pipeline run produced, ready for presentation.
#[derive(Clone, PartialEq, Debug)]
pub struct Report {
    pub instrument: Instrument,
    pub ledger: Ledger,
    pub window: EpochWindow,
    /// Full calendar range of the data, the default display range.
    pub span: DateSpan,
    pub summary: SummaryStats,
    pub quote: QuoteStatus,
    pub daily: Vec<DailyPoint>,
}

impl Report {
    pub fn kind(&self) -> PipelineKind {
        self.ledger.kind
    }

    /// Ledger rows within `range` (default: the full span), newest first.
    pub fn view(&self, range: Option<DateSpan>) -> Vec<&LedgerRow> {
        newest_first(filter_range(&self.ledger, range.unwrap_or(self.span)))
    }

    pub fn cost_line(&self) -> Option<CostLine> {
        average_cost_line(&self.daily, self.summary.average_cost)
    }
}
