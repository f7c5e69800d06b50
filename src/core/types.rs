use std::fmt;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    business_day_to_unix_seconds, datetime_to_unix_seconds, decimal_to_f64,
};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns `true` when the media-space point lies inside the plot area.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x.is_finite()
            && y.is_finite()
            && (0.0..=f64::from(self.width)).contains(&x)
            && (0.0..=f64::from(self.height)).contains(&y)
    }
}

/// Horizontal time coordinate expressed as unix seconds.
///
/// Backed by `OrderedFloat` so values can be compared, hashed and used as
/// map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct TimeValue(OrderedFloat<f64>);

impl TimeValue {
    #[must_use]
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self(OrderedFloat(seconds))
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self::from_unix_seconds(datetime_to_unix_seconds(time))
    }

    pub fn from_business_day(year: i32, month: u32, day: u32) -> ChartResult<Self> {
        business_day_to_unix_seconds(year, month, day).map(Self::from_unix_seconds)
    }

    #[must_use]
    pub fn unix_seconds(self) -> f64 {
        self.0.into_inner()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.unix_seconds().is_finite()
    }
}

impl From<f64> for TimeValue {
    fn from(seconds: f64) -> Self {
        Self::from_unix_seconds(seconds)
    }
}

impl From<TimeValue> for f64 {
    fn from(time: TimeValue) -> Self {
        time.unix_seconds()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unix_seconds())
    }
}

/// Domain-space polyline vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub time: TimeValue,
    pub price: f64,
}

impl LogicalPoint {
    #[must_use]
    pub fn new(time: impl Into<TimeValue>, price: f64) -> Self {
        Self {
            time: time.into(),
            price,
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time: TimeValue::from_datetime(time),
            price: decimal_to_f64(price, "price")?,
        })
    }
}

/// Media-space pointer position inside a pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel projection of a `LogicalPoint`.
///
/// Either coordinate is `None` when the host cannot currently represent the
/// point (time outside the loaded range, price axis not ready).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ViewPoint {
    pub const UNRESOLVED: Self = Self { x: None, y: None };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Returns both coordinates when the projection fully resolved.
    #[must_use]
    pub fn resolved(self) -> Option<PixelPoint> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(PixelPoint { x, y }),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        self.resolved().is_some()
    }
}
