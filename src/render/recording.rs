use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, PixelRatio, StrokeStyle};

/// One drawing call captured by `RecordingSurface`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetStroke {
        stroke: StrokeStyle,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Stroke,
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
}

/// Headless surface used by tests, benches and the trace tool.
///
/// It still validates geometry so tests catch non-finite coordinates before a
/// real backend is involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingSurface {
    pixel_ratio: PixelRatio,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(pixel_ratio: PixelRatio) -> Self {
        Self {
            pixel_ratio,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns every stroked sub-path as its ordered vertex list.
    #[must_use]
    pub fn stroked_paths(&self) -> Vec<Vec<PixelPoint>> {
        let mut stroked = Vec::new();
        let mut current: Vec<Vec<PixelPoint>> = Vec::new();

        for command in &self.commands {
            match *command {
                DrawCommand::BeginPath => current.clear(),
                DrawCommand::MoveTo { x, y } => current.push(vec![PixelPoint::new(x, y)]),
                DrawCommand::LineTo { x, y } => match current.last_mut() {
                    Some(subpath) => subpath.push(PixelPoint::new(x, y)),
                    None => current.push(vec![PixelPoint::new(x, y)]),
                },
                DrawCommand::Stroke => stroked.extend(current.iter().cloned()),
                DrawCommand::SetStroke { .. } | DrawCommand::FillCircle { .. } => {}
            }
        }

        stroked
    }

    /// Number of straight segments across all stroked paths.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.stroked_paths()
            .iter()
            .map(|path| path.len().saturating_sub(1))
            .sum()
    }

    #[must_use]
    pub fn marker_centers(&self) -> Vec<PixelPoint> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::FillCircle { x, y, .. } => Some(PixelPoint::new(x, y)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_stroke(&self) -> Option<&StrokeStyle> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::SetStroke { stroke } => Some(stroke),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn pixel_ratio(&self) -> PixelRatio {
        self.pixel_ratio
    }

    fn set_stroke(&mut self, stroke: &StrokeStyle) -> ChartResult<()> {
        stroke.color.validate()?;
        if !stroke.width.is_finite() || stroke.width < 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if stroke.dash.iter().any(|dash| !dash.is_finite() || *dash < 0.0) {
            return Err(ChartError::InvalidData(
                "dash pattern entries must be finite and >= 0".to_owned(),
            ));
        }
        self.commands.push(DrawCommand::SetStroke {
            stroke: stroke.clone(),
        });
        Ok(())
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn stroke(&mut self) -> ChartResult<()> {
        let finite = self.commands.iter().all(|command| match *command {
            DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            _ => true,
        });
        if !finite {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.commands.push(DrawCommand::Stroke);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        color: Color,
    ) -> ChartResult<()> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(ChartError::InvalidData(
                "marker center must be finite".to_owned(),
            ));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and >= 0".to_owned(),
            ));
        }
        color.validate()?;
        self.commands.push(DrawCommand::FillCircle {
            x: center_x,
            y: center_y,
            radius,
            color,
        });
        Ok(())
    }
}
