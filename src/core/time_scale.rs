use crate::core::{LinearScale, TimeValue};
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Smallest visible span accepted by zoom operations, in seconds.
const MIN_VISIBLE_SPAN: f64 = 1e-6;

/// Time axis model with separate loaded and visible ranges.
///
/// `loaded_*` is the time interval the host has data for; times outside it
/// are not representable and project to `None`.
/// `visible_*` is the window currently mapped onto the pane width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    loaded_start: f64,
    loaded_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl TimeScale {
    /// Creates a scale whose visible range matches the loaded range.
    pub fn new(time_start: f64, time_end: f64) -> ChartResult<Self> {
        let (start, end) = normalize_range(time_start, time_end, 1.0)?;
        Ok(Self {
            loaded_start: start,
            loaded_end: end,
            visible_start: start,
            visible_end: end,
        })
    }

    #[must_use]
    pub fn loaded_range(self) -> (f64, f64) {
        (self.loaded_start, self.loaded_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    /// Replaces the loaded range without touching the visible window.
    pub fn set_loaded_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let normalized = normalize_range(start, end, 1.0)?;
        self.loaded_start = normalized.0;
        self.loaded_end = normalized.1;
        Ok(())
    }

    /// Overrides the visible range without modifying the loaded range.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let normalized = normalize_range(start, end, MIN_VISIBLE_SPAN)?;
        self.visible_start = normalized.0;
        self.visible_end = normalized.1;
        Ok(())
    }

    /// Pans the visible range by a pixel delta; positive moves content right.
    pub fn pan_by_pixels(&mut self, delta_px: f64, width_px: f64) -> ChartResult<()> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if !width_px.is_finite() || width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "pan width must be finite and > 0".to_owned(),
            ));
        }

        let span = self.visible_end - self.visible_start;
        let delta_time = -delta_px / width_px * span;
        self.visible_start += delta_time;
        self.visible_end += delta_time;
        Ok(())
    }

    /// Zooms visible range around an anchor pixel.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out.
    pub fn zoom_by_factor(&mut self, factor: f64, anchor_px: f64, width_px: f64) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        let anchor_time = self.visible_linear()?.pixel_to_domain(anchor_px, width_px)?;

        let current_span = self.visible_end - self.visible_start;
        let target_span = (current_span / factor).max(MIN_VISIBLE_SPAN);
        let left_ratio = (anchor_time - self.visible_start) / current_span;

        let new_start = anchor_time - left_ratio * target_span;
        self.set_visible_range(new_start, new_start + target_span)
    }

    #[must_use]
    pub fn is_loaded(self, time: TimeValue) -> bool {
        let seconds = time.unix_seconds();
        seconds.is_finite() && (self.loaded_start..=self.loaded_end).contains(&seconds)
    }

    /// Maps a time to pane x; `None` when the time is outside the loaded range.
    #[must_use]
    pub fn time_to_pixel(self, time: TimeValue, width_px: f64) -> Option<f64> {
        if !self.is_loaded(time) {
            return None;
        }
        self.visible_linear()
            .and_then(|scale| scale.domain_to_pixel(time.unix_seconds(), width_px))
            .ok()
    }

    /// Maps pane x to a time; `None` when the result is outside the loaded range.
    #[must_use]
    pub fn pixel_to_time(self, pixel: f64, width_px: f64) -> Option<TimeValue> {
        let seconds = self
            .visible_linear()
            .and_then(|scale| scale.pixel_to_domain(pixel, width_px))
            .ok()?;
        let time = TimeValue::from_unix_seconds(seconds);
        self.is_loaded(time).then_some(time)
    }

    fn visible_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.visible_start, self.visible_end)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
