use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tradebook_model::{
    enums::Side,
    error::ReportError,
    ledger::{DateSpan, Ledger},
    summary::DailyPoint,
};

use crate::aggregator::checked_sum;

/// Horizontal reference line drawn at the average cost across the whole series.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CostLine {
    pub span: DateSpan,
    pub price: Decimal,
}

#[derive(Default)]
struct Bucket {
    price_sum: Decimal,
    count: u32,
    quantity: Decimal,
}

/// Groups rows by (calendar date, side): mean unit price and summed quantity per group,
/// ordered by date then side.
pub fn daily_series(ledger: &Ledger) -> Result<Vec<DailyPoint>, ReportError> {
    let mut buckets = BTreeMap::<(NaiveDate, Side), Bucket>::new();

    for row in &ledger.rows {
        let bucket = buckets.entry((row.date(), row.side)).or_default();
        bucket.price_sum = checked_sum(bucket.price_sum, row.unit_price, "daily price sum")?;
        bucket.count += 1;
        bucket.quantity = checked_sum(bucket.quantity, row.quantity, "daily quantity")?;
    }

    // Dividing by a count of at least one cannot overflow
    Ok(buckets
        .into_iter()
        .map(|((date, side), bucket)| DailyPoint {
            date,
            side,
            mean_price: bucket.price_sum / Decimal::from(bucket.count),
            quantity: bucket.quantity,
        })
        .collect())
}

/// `None` for an empty series.
pub fn average_cost_line(series: &[DailyPoint], average_cost: Decimal) -> Option<CostLine> {
    DateSpan::covering(series.iter().map(|point| point.date)).map(|span| CostLine {
        span,
        price: average_cost,
    })
}
