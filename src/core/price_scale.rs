use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Price axis model mapped to a Y pixel axis that grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    domain_min: f64,
    domain_max: f64,
    #[serde(default)]
    inverted: bool,
}

impl PriceScale {
    pub fn new(price_min: f64, price_max: f64) -> ChartResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() {
            return Err(ChartError::InvalidData(
                "price domain must be finite".to_owned(),
            ));
        }
        if price_min == price_max {
            return Err(ChartError::InvalidData(
                "price domain must have non-zero span".to_owned(),
            ));
        }

        Ok(Self {
            domain_min: price_min.min(price_max),
            domain_max: price_min.max(price_max),
            inverted: false,
        })
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.inverted
    }

    /// Maps price to pane y; `None` when the pane height cannot hold a mapping.
    #[must_use]
    pub fn price_to_pixel(self, price: f64, height_px: f64) -> Option<f64> {
        self.linear()
            .and_then(|scale| scale.domain_to_pixel(price, height_px))
            .ok()
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64, height_px: f64) -> Option<f64> {
        self.linear()
            .and_then(|scale| scale.pixel_to_domain(pixel, height_px))
            .ok()
    }

    fn linear(self) -> ChartResult<LinearScale> {
        if self.inverted {
            LinearScale::new(self.domain_min, self.domain_max)
        } else {
            LinearScale::new(self.domain_max, self.domain_min)
        }
    }
}
