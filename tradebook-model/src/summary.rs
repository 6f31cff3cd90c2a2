use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{enums::Side, instruments::Symbol};

/// Cost basis metrics derived from a ledger. Recomputed on every fetch.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct SummaryStats {
    pub total_buy_quantity: Decimal,
    pub total_buy_cost: Decimal,
    /// Weighted average buy price, zero when nothing was bought.
    pub average_cost: Decimal,
    /// Sum of fees over both sides.
    pub total_fees: Decimal,
    /// Fee asset of the first ledger row. Datasets with mixed fee assets are summed as-is.
    pub fee_asset: Option<Symbol>,
    /// Set when fees are synthesized from an assumed rate rather than reported.
    pub fees_estimated: bool,
    /// `(current_price - average_cost) * total_buy_quantity`, only with a live quote.
    pub unrealized_pnl: Option<Decimal>,
}

/// Outcome of the live quote lookup attached to a report.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub enum QuoteStatus {
    Live(Decimal),
    Missing(String),
    NotRequested,
}

impl QuoteStatus {
    pub fn price(&self) -> Option<Decimal> {
        match self {
            QuoteStatus::Live(price) => Some(*price),
            QuoteStatus::Missing(_) | QuoteStatus::NotRequested => None,
        }
    }
}

/// One chart point: trades of one side on one calendar day.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub side: Side,
    pub mean_price: Decimal,
    pub quantity: Decimal,
}
