use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle, PixelRatio, StrokeStyle};

pub type DashPattern = SmallVec<[f64; 4]>;

/// Dash pattern used when the style is dashed and no pattern is configured.
pub const DEFAULT_DASH_PATTERN: [f64; 2] = [5.0, 5.0];

const DEFAULT_COLOR: Color = Color::rgb(41.0 / 255.0, 98.0 / 255.0, 1.0);

/// Visual style of the polyline, in media pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineOptions {
    pub line_color: Color,
    pub line_width: f64,
    pub line_style: LineStrokeStyle,
    pub dash_pattern: Option<DashPattern>,
    pub point_radius: f64,
    pub point_color: Color,
}

impl Default for PolylineOptions {
    fn default() -> Self {
        Self {
            line_color: DEFAULT_COLOR,
            line_width: 2.0,
            line_style: LineStrokeStyle::Solid,
            dash_pattern: None,
            point_radius: 4.0,
            point_color: DEFAULT_COLOR,
        }
    }
}

impl PolylineOptions {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidOptions(format!("failed to parse polyline options json: {e}"))
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidOptions(format!("failed to serialize polyline options: {e}"))
        })
    }

    /// Checks numeric ranges; `apply_options` itself trusts its caller.
    pub fn validate(&self) -> ChartResult<()> {
        self.line_color.validate()?;
        self.point_color.validate()?;
        for (name, value) in [
            ("line_width", self.line_width),
            ("point_radius", self.point_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidOptions(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if let Some(pattern) = &self.dash_pattern {
            if pattern.iter().any(|dash| !dash.is_finite() || *dash < 0.0) {
                return Err(ChartError::InvalidOptions(
                    "dash pattern entries must be finite and >= 0".to_owned(),
                ));
            }
            if !pattern.is_empty() && !has_visible_dash(pattern) {
                return Err(ChartError::InvalidOptions(
                    "dash pattern must contain a non-zero entry".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Overrides every field the patch specifies and keeps the rest.
    pub fn merge(&mut self, patch: PolylineOptionsPatch) {
        let PolylineOptionsPatch {
            line_color,
            line_width,
            line_style,
            dash_pattern,
            point_radius,
            point_color,
        } = patch;

        if let Some(value) = line_color {
            self.line_color = value;
        }
        if let Some(value) = line_width {
            self.line_width = value;
        }
        if let Some(value) = line_style {
            self.line_style = value;
        }
        if let Some(value) = dash_pattern {
            self.dash_pattern = Some(value);
        }
        if let Some(value) = point_radius {
            self.point_radius = value;
        }
        if let Some(value) = point_color {
            self.point_color = value;
        }
    }

    /// Dash pattern in media pixels; empty for solid lines.
    #[must_use]
    pub fn effective_dash_pattern(&self) -> DashPattern {
        match self.line_style {
            LineStrokeStyle::Solid => SmallVec::new(),
            LineStrokeStyle::Dashed => self
                .dash_pattern
                .clone()
                .filter(|pattern| has_visible_dash(pattern))
                .unwrap_or_else(|| SmallVec::from_slice(&DEFAULT_DASH_PATTERN)),
        }
    }

    /// Stroke state scaled into bitmap units.
    #[must_use]
    pub fn stroke_style(&self, ratio: PixelRatio) -> StrokeStyle {
        StrokeStyle {
            color: self.line_color,
            width: self.line_width * ratio.horizontal,
            dash: self
                .effective_dash_pattern()
                .iter()
                .map(|dash| dash * ratio.horizontal)
                .collect(),
        }
    }

    #[must_use]
    pub fn marker_radius(&self, ratio: PixelRatio) -> f64 {
        self.point_radius * ratio.horizontal
    }
}

/// Cairo rejects patterns whose entries are all zero.
fn has_visible_dash(pattern: &[f64]) -> bool {
    pattern.iter().any(|dash| *dash > 0.0)
}

/// Partial style record accepted by `PolylineTool::apply_options`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineOptionsPatch {
    pub line_color: Option<Color>,
    pub line_width: Option<f64>,
    pub line_style: Option<LineStrokeStyle>,
    pub dash_pattern: Option<DashPattern>,
    pub point_radius: Option<f64>,
    pub point_color: Option<Color>,
}

impl PolylineOptionsPatch {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidOptions(format!("failed to parse polyline options patch: {e}"))
        })
    }

    #[must_use]
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, style: LineStrokeStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    #[must_use]
    pub fn with_dash_pattern(mut self, pattern: &[f64]) -> Self {
        self.dash_pattern = Some(SmallVec::from_slice(pattern));
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_point_color(mut self, color: Color) -> Self {
        self.point_color = Some(color);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
