use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::PixelRatio;

/// Bootstrap configuration of the reference `ChartHost`.
///
/// Serializable so scenarios and demos can describe a chart setup in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartHostConfig {
    pub viewport: Viewport,
    pub time_start: f64,
    pub time_end: f64,
    #[serde(default = "default_price_min")]
    pub price_min: f64,
    #[serde(default = "default_price_max")]
    pub price_max: f64,
    #[serde(default)]
    pub price_scale_inverted: bool,
    #[serde(default)]
    pub pixel_ratio: PixelRatio,
}

impl ChartHostConfig {
    /// Creates a minimal config with default price range.
    #[must_use]
    pub fn new(viewport: Viewport, time_start: f64, time_end: f64) -> Self {
        Self {
            viewport,
            time_start,
            time_end,
            price_min: default_price_min(),
            price_max: default_price_max(),
            price_scale_inverted: false,
            pixel_ratio: PixelRatio::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_price_domain(mut self, price_min: f64, price_max: f64) -> Self {
        self.price_min = price_min;
        self.price_max = price_max;
        self
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: PixelRatio) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_price_scale_inverted(mut self, inverted: bool) -> Self {
        self.price_scale_inverted = inverted;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart host config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart host config: {e}"))
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.pixel_ratio.validate()?;
        Ok(())
    }
}

fn default_price_min() -> f64 {
    0.0
}

fn default_price_max() -> f64 {
    1.0
}
