mod primitives;
mod recording;

pub use primitives::{Color, LineStrokeStyle, PixelRatio, StrokeStyle};
pub use recording::{DrawCommand, RecordingSurface};

use crate::error::ChartResult;

/// Pixel-addressable target that overlay renderers paint onto.
///
/// Coordinates are in bitmap space: callers have already scaled media
/// coordinates by `pixel_ratio()`. Backends only translate these calls to
/// their native API so drawing code stays isolated from chart domain and
/// interaction logic.
pub trait DrawingSurface {
    fn pixel_ratio(&self) -> PixelRatio;

    fn set_stroke(&mut self, stroke: &StrokeStyle) -> ChartResult<()>;

    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Strokes the current path with the last applied stroke style.
    fn stroke(&mut self) -> ChartResult<()>;

    fn fill_circle(
        &mut self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        color: Color,
    ) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, CairoSurfaceStats, create_image_target};
