use chrono::{FixedOffset, NaiveTime};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tradebook_model::{
    deserialization::{naive_local_from_epoch_ms, parse_decimal},
    enums::{PipelineKind, Resolution, Side},
    error::ReportError,
    instruments::Symbol,
    ledger::{Ledger, LedgerRow},
    record::RawOrder,
};

use super::{parse_amount, EpochWindow, Normalized, RecordAdapter};

/// Assumed 0.25% fee rate. The order history carries no fee field, so fees of this
/// pipeline are an estimate and never the amount actually charged.
pub const ESTIMATED_FEE_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 4);

/// Normalizes order history into day resolution rows. Only `FILLED` orders contribute.
#[derive(Clone, Debug)]
pub struct OrderAdapter {
    offset: FixedOffset,
    fee_rate: Decimal,
    fee_asset: Symbol,
}

impl OrderAdapter {
    /// Estimated fees are denominated in `fee_asset`, the base asset of the pair.
    pub fn new<S>(offset: FixedOffset, fee_asset: S) -> Self
    where
        S: Into<Symbol>,
    {
        Self {
            offset,
            fee_rate: ESTIMATED_FEE_RATE,
            fee_asset: fee_asset.into(),
        }
    }

    /// Unit price of an order.
    ///
    /// A positive stated price is used as-is. Otherwise the price is derived as
    /// cumulative quote quantity / quantity, and degrades to zero when that is not
    /// possible. The row is kept either way.
    pub fn unit_price(order: &RawOrder, quantity: Decimal) -> Result<Decimal, ReportError> {
        let stated = match order.price.as_deref().map(str::trim) {
            Some(price) if !price.is_empty() => parse_decimal("price", price)?,
            _ => Decimal::ZERO,
        };
        if stated > Decimal::ZERO {
            return Ok(stated);
        }

        match order.quote_qty() {
            Some(quote_qty) if quantity > Decimal::ZERO => parse_amount("cumulativeQuoteQty", quote_qty)?
                .checked_div(quantity)
                .ok_or_else(|| ReportError::malformed("cumulativeQuoteQty", quote_qty)),
            _ => {
                debug!(time = order.time, "order has no usable price, reporting zero");
                Ok(Decimal::ZERO)
            }
        }
    }

    fn normalize_order(&self, order: &RawOrder) -> Result<LedgerRow, ReportError> {
        let side = order
            .side
            .parse::<Side>()
            .map_err(|_| ReportError::malformed("side", order.side.as_str()))?;
        let quantity = parse_amount("origQty", &order.orig_qty)?;
        let unit_price = Self::unit_price(order, quantity)?;
        let day = naive_local_from_epoch_ms(order.time, &self.offset)?.date();

        let total = quantity
            .checked_mul(unit_price)
            .ok_or_else(|| ReportError::malformed("origQty", order.orig_qty.as_str()))?;
        let fee = quantity
            .checked_mul(self.fee_rate)
            .ok_or_else(|| ReportError::malformed("origQty", order.orig_qty.as_str()))?;

        Ok(LedgerRow {
            timestamp: day.and_time(NaiveTime::MIN),
            side,
            unit_price,
            quantity,
            total,
            fee,
            fee_asset: self.fee_asset.clone(),
        })
    }
}

impl RecordAdapter for OrderAdapter {
    type Record = RawOrder;

    const KIND: PipelineKind = PipelineKind::Orders;

    fn normalize(&self, orders: Vec<RawOrder>) -> Result<Normalized, ReportError> {
        let mut rows = Vec::new();
        let mut window = None;

        for order in &orders {
            if !order.is_filled() {
                debug!(status = %order.status, time = order.time, "skipping order that is not filled");
                continue;
            }

            rows.push(self.normalize_order(order)?);
            window = Some(EpochWindow::observe(window, order.time));
        }

        let window = window.ok_or(ReportError::NoData(Self::KIND))?;

        info!(
            kind = %Self::KIND,
            fetched = orders.len(),
            rows = rows.len(),
            "normalized ledger"
        );

        Ok(Normalized {
            ledger: Ledger::new(Self::KIND, Resolution::Day, rows),
            span: window.to_span(&self.offset)?,
            window,
        })
    }
}
