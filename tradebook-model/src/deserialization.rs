use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::error::ReportError;

/// Determine the `DateTime<Utc>` from epoch milliseconds, `None` if outside the
/// representable range.
pub fn datetime_utc_from_epoch_ms(epoch_ms: u64) -> Option<DateTime<Utc>> {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Convert epoch milliseconds to the wall clock time of the reporting timezone, with the
/// timezone annotation dropped.
pub fn naive_local_from_epoch_ms(epoch_ms: u64, offset: &FixedOffset) -> Result<NaiveDateTime, ReportError> {
    datetime_utc_from_epoch_ms(epoch_ms)
        .and_then(|datetime| {
            datetime
                .naive_utc()
                .checked_add_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        })
        .ok_or_else(|| ReportError::malformed("time", epoch_ms.to_string()))
}

/// Deserialize a `String` as the desired type.
pub fn de_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::de::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let data: &str = serde::de::Deserialize::deserialize(deserializer)?;
    data.parse::<T>().map_err(serde::de::Error::custom)
}

/// Parse a string encoded exchange number, naming the offending field on failure.
pub fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ReportError> {
    Decimal::from_str(value.trim()).map_err(|_| ReportError::malformed(field, value))
}
