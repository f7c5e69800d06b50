use cairo::{Context, Format, ImageSurface};
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, PixelRatio, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoSurfaceStats {
    pub paths_stroked: usize,
    pub circles_filled: usize,
}

/// `DrawingSurface` over an external Cairo context (for example a GTK
/// `DrawingArea` callback) or an offscreen image surface.
///
/// The stroke style is applied lazily on `stroke` because filling markers
/// replaces the Cairo source color.
pub struct CairoSurface<'a> {
    context: &'a Context,
    pixel_ratio: PixelRatio,
    stroke_style: Option<StrokeStyle>,
    stats: CairoSurfaceStats,
}

impl<'a> CairoSurface<'a> {
    pub fn new(context: &'a Context, pixel_ratio: PixelRatio) -> ChartResult<Self> {
        Ok(Self {
            context,
            pixel_ratio: pixel_ratio.validate()?,
            stroke_style: None,
            stats: CairoSurfaceStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn stats(&self) -> CairoSurfaceStats {
        self.stats
    }
}

/// Creates an ARGB32 image surface together with a context drawing into it.
pub fn create_image_target(width: i32, height: i32) -> ChartResult<(ImageSurface, Context)> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidData(
            "cairo surface size must be > 0".to_owned(),
        ));
    }

    let surface = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    let context = Context::new(&surface)
        .map_err(|err| map_backend_error("failed to create cairo context", err))?;
    Ok((surface, context))
}

impl DrawingSurface for CairoSurface<'_> {
    fn pixel_ratio(&self) -> PixelRatio {
        self.pixel_ratio
    }

    fn set_stroke(&mut self, stroke: &StrokeStyle) -> ChartResult<()> {
        stroke.color.validate()?;
        self.stroke_style = Some(stroke.clone());
        Ok(())
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        if let Some(style) = &self.stroke_style {
            apply_color(self.context, style.color);
            self.context.set_line_width(style.width);
            self.context.set_dash(&style.dash, 0.0);
        }
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        self.stats.paths_stroked += 1;
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        color: Color,
    ) -> ChartResult<()> {
        color.validate()?;
        self.context.new_path();
        self.context.arc(center_x, center_y, radius, 0.0, TAU);
        apply_color(self.context, color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill marker", err))?;
        self.stats.circles_filled += 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
