use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts a calendar business day to the unix timestamp of its UTC midnight.
pub fn business_day_to_unix_seconds(year: i32, month: u32, day: u32) -> ChartResult<f64> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "business day {year:04}-{month:02}-{day:02} is not a valid calendar date"
        ))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ChartError::InvalidData("business day midnight is invalid".to_owned()))?;
    Ok(datetime_to_unix_seconds(midnight.and_utc()))
}
