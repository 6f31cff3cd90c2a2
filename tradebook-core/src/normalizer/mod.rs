use chrono::FixedOffset;
use rust_decimal::Decimal;
use tradebook_model::{
    deserialization::{self, naive_local_from_epoch_ms},
    enums::PipelineKind,
    error::ReportError,
    ledger::{DateSpan, Ledger},
};

pub use self::{fill::FillAdapter, order::OrderAdapter};

pub mod fill;
pub mod order;

/// Converts one raw record shape into the unified [`Ledger`].
pub trait RecordAdapter {
    type Record;

    const KIND: PipelineKind;

    /// Normalize a complete fetch. An input without usable records is
    /// [`ReportError::NoData`].
    fn normalize(&self, records: Vec<Self::Record>) -> Result<Normalized, ReportError>;
}

/// Output of a [`RecordAdapter`]: the ledger plus the time range it covers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Normalized {
    pub ledger: Ledger,
    /// Earliest and latest raw record timestamp that contributed to the ledger.
    pub window: EpochWindow,
    /// Calendar dates of `window` in the reporting timezone, the default display range.
    pub span: DateSpan,
}

/// Min/max raw epoch millisecond timestamps seen while normalizing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EpochWindow {
    pub first_ms: u64,
    pub last_ms: u64,
}

impl EpochWindow {
    pub fn new(epoch_ms: u64) -> Self {
        Self {
            first_ms: epoch_ms,
            last_ms: epoch_ms,
        }
    }

    /// Widen an optional window to include `epoch_ms`.
    pub fn observe(window: Option<Self>, epoch_ms: u64) -> Self {
        match window {
            None => Self::new(epoch_ms),
            Some(window) => Self {
                first_ms: window.first_ms.min(epoch_ms),
                last_ms: window.last_ms.max(epoch_ms),
            },
        }
    }

    pub fn to_span(&self, offset: &FixedOffset) -> Result<DateSpan, ReportError> {
        Ok(DateSpan::new(
            naive_local_from_epoch_ms(self.first_ms, offset)?.date(),
            naive_local_from_epoch_ms(self.last_ms, offset)?.date(),
        ))
    }
}

/// Parse a string encoded amount that must not be negative.
pub(crate) fn parse_amount(field: &'static str, value: &str) -> Result<Decimal, ReportError> {
    let amount = deserialization::parse_decimal(field, value)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ReportError::malformed(field, value));
    }
    Ok(amount)
}
