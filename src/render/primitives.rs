use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string so option payloads read the way host
/// applications write them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)`.
    pub fn from_css(input: &str) -> ChartResult<Self> {
        let value = input.trim();
        let color = if let Some(hex) = value.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(body) = function_body(value, "rgba") {
            parse_rgb_function(body, true)
        } else if let Some(body) = function_body(value, "rgb") {
            parse_rgb_function(body, false)
        } else {
            None
        };

        let color = color
            .ok_or_else(|| ChartError::InvalidData(format!("unsupported color string `{input}`")))?;
        color.validate()?;
        Ok(color)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn channel_u8(value: f64) -> u8 {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (
            Self::channel_u8(self.red),
            Self::channel_u8(self.green),
            Self::channel_u8(self.blue),
        );
        if self.alpha >= 1.0 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r}, {g}, {b}, {})", self.alpha)
        }
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_css(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

fn function_body<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    let rest = value.strip_prefix(name)?.trim_start();
    rest.strip_prefix('(')?.strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |index: usize| u8::from_str_radix(&hex[index..=index], 16).ok();
    let pair = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();

    match hex.len() {
        3 | 4 => {
            let expand = |value: u8| value * 17;
            let alpha = if hex.len() == 4 {
                f64::from(expand(digit(3)?)) / 255.0
            } else {
                1.0
            };
            Some(Color::from_rgba8(
                expand(digit(0)?),
                expand(digit(1)?),
                expand(digit(2)?),
                alpha,
            ))
        }
        6 | 8 => {
            let alpha = if hex.len() == 8 {
                f64::from(pair(6)?) / 255.0
            } else {
                1.0
            };
            Some(Color::from_rgba8(pair(0)?, pair(2)?, pair(4)?, alpha))
        }
        _ => None,
    }
}

fn parse_rgb_function(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: SmallVec<[&str; 4]> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |raw: &str| -> Option<f64> {
        let value = raw.parse::<f64>().ok()?;
        (value.is_finite() && (0.0..=255.0).contains(&value)).then_some(value / 255.0)
    };
    let alpha = if with_alpha {
        parts[3].parse::<f64>().ok()?
    } else {
        1.0
    };

    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

/// Dash mode applied to stroked paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
}

/// Device-pixel to media-pixel scale factors of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRatio {
    pub horizontal: f64,
    pub vertical: f64,
}

impl PixelRatio {
    pub const IDENTITY: Self = Self {
        horizontal: 1.0,
        vertical: 1.0,
    };

    #[must_use]
    pub fn uniform(ratio: f64) -> Self {
        Self {
            horizontal: ratio,
            vertical: ratio,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.horizontal.is_finite()
            || !self.vertical.is_finite()
            || self.horizontal <= 0.0
            || self.vertical <= 0.0
        {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Resolved stroke state in bitmap units.
///
/// An empty `dash` means a solid line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}
