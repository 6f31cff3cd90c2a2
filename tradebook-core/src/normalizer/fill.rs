use std::collections::HashSet;

use chrono::FixedOffset;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use tradebook_model::{
    deserialization::naive_local_from_epoch_ms,
    enums::{PipelineKind, Resolution, Side},
    error::ReportError,
    instruments::Symbol,
    ledger::{Ledger, LedgerRow},
    record::RawFill,
};

use super::{parse_amount, EpochWindow, Normalized, RecordAdapter};

/// Largest accepted gap between a fill's reported quote quantity and `qty * price`.
pub const TOTAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Natural key of a fill. Overlapping fetches repeat fills, these must count once.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct FillKey {
    order_id: u64,
    time: u64,
    quantity: Decimal,
    price: Decimal,
}

/// Normalizes account trade fills. Keeps full time of day.
#[derive(Copy, Clone, Debug)]
pub struct FillAdapter {
    offset: FixedOffset,
}

impl FillAdapter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn normalize_fill(&self, fill: &RawFill) -> Result<LedgerRow, ReportError> {
        Ok(LedgerRow {
            timestamp: naive_local_from_epoch_ms(fill.time, &self.offset)?,
            side: Side::from_is_buyer(fill.is_buyer),
            unit_price: parse_amount("price", &fill.price)?,
            quantity: parse_amount("qty", &fill.qty)?,
            total: parse_amount("quoteQty", &fill.quote_qty)?,
            fee: parse_amount("commission", &fill.commission)?,
            fee_asset: Symbol::new(fill.commission_asset.as_str()),
        })
    }
}

impl RecordAdapter for FillAdapter {
    type Record = RawFill;

    const KIND: PipelineKind = PipelineKind::Fills;

    fn normalize(&self, fills: Vec<RawFill>) -> Result<Normalized, ReportError> {
        let mut seen = HashSet::with_capacity(fills.len());
        let mut rows = Vec::with_capacity(fills.len());
        let mut window = None;

        for fill in &fills {
            let row = self.normalize_fill(fill)?;

            let key = FillKey {
                order_id: fill.order_id,
                time: fill.time,
                quantity: row.quantity,
                price: row.unit_price,
            };
            if !seen.insert(key) {
                debug!(order_id = fill.order_id, time = fill.time, "dropping duplicate fill");
                continue;
            }

            if !row.total_is_consistent(TOTAL_TOLERANCE) {
                warn!(
                    order_id = fill.order_id,
                    total = %row.total,
                    quantity = %row.quantity,
                    unit_price = %row.unit_price,
                    "fill quote quantity differs from quantity x price"
                );
            }

            window = Some(EpochWindow::observe(window, fill.time));
            rows.push(row);
        }

        let window = window.ok_or(ReportError::NoData(Self::KIND))?;

        info!(
            kind = %Self::KIND,
            fetched = fills.len(),
            rows = rows.len(),
            "normalized ledger"
        );

        Ok(Normalized {
            ledger: Ledger::new(Self::KIND, Resolution::Time, rows),
            span: window.to_span(&self.offset)?,
            window,
        })
    }
}
