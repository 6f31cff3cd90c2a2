use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    enums::{PipelineKind, Resolution, Side},
    instruments::Symbol,
};

/// Unified ledger row both pipelines normalize into.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct LedgerRow {
    /// Wall clock time in the reporting timezone.
    pub timestamp: NaiveDateTime,
    pub side: Side,
    /// Price per base unit in quote currency.
    pub unit_price: Decimal,
    /// Base asset amount.
    pub quantity: Decimal,
    /// Quote currency value of the row.
    pub total: Decimal,
    pub fee: Decimal,
    pub fee_asset: Symbol,
}

impl LedgerRow {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Check `total ≈ quantity × unit_price` within an absolute tolerance. A product that
    /// does not fit a decimal is never consistent.
    pub fn total_is_consistent(&self, tolerance: Decimal) -> bool {
        self.quantity
            .checked_mul(self.unit_price)
            .and_then(|expected| self.total.checked_sub(expected))
            .is_some_and(|gap| gap.abs() <= tolerance)
    }
}

/// Inclusive calendar date window.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Smallest span covering every provided date, `None` if there are none.
    pub fn covering<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |span, date| match span {
            None => Some(DateSpan::new(date, date)),
            Some(span) => Some(DateSpan::new(span.start.min(date), span.end.max(date))),
        })
    }
}

/// Normalized rows of one pipeline, in source order.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct Ledger {
    pub kind: PipelineKind,
    pub resolution: Resolution,
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    pub fn new(kind: PipelineKind, resolution: Resolution, rows: Vec<LedgerRow>) -> Self {
        Self {
            kind,
            resolution,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn buys(&self) -> impl Iterator<Item = &LedgerRow> {
        self.rows.iter().filter(|row| row.side == Side::Buy)
    }

    pub fn span(&self) -> Option<DateSpan> {
        DateSpan::covering(self.rows.iter().map(LedgerRow::date))
    }
}
