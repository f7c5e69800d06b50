use smallvec::SmallVec;

use crate::core::{PixelPoint, ViewPoint};
use crate::error::ChartResult;
use crate::extensions::PaneRenderer;
use crate::extensions::polyline::PolylineOptions;
use crate::render::{DrawingSurface, PixelRatio};

/// Immutable per-frame payload: projected vertices, projected preview point
/// and style.
///
/// Built by `PolylinePaneView::renderer` as a copy so the next frame's
/// mutations cannot reach a paint that is still in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineRenderer {
    points: Vec<ViewPoint>,
    temp_point: Option<ViewPoint>,
    options: PolylineOptions,
}

impl PolylineRenderer {
    #[must_use]
    pub fn new(
        points: Vec<ViewPoint>,
        temp_point: Option<ViewPoint>,
        options: PolylineOptions,
    ) -> Self {
        Self {
            points,
            temp_point,
            options,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[ViewPoint] {
        &self.points
    }

    #[must_use]
    pub fn temp_point(&self) -> Option<ViewPoint> {
        self.temp_point
    }

    #[must_use]
    pub fn options(&self) -> &PolylineOptions {
        &self.options
    }
}

impl PaneRenderer for PolylineRenderer {
    fn draw(&self, surface: &mut dyn DrawingSurface) -> ChartResult<()> {
        let ratio = surface.pixel_ratio();
        let marker_radius = self.options.marker_radius(ratio);
        let temp = self
            .temp_point
            .and_then(ViewPoint::resolved)
            .map(|point| to_bitmap(point, ratio));

        if self.points.is_empty() {
            if let Some(temp) = temp {
                surface.fill_circle(temp.x, temp.y, marker_radius, self.options.point_color)?;
            }
            return Ok(());
        }

        let committed: SmallVec<[PixelPoint; 16]> = self
            .points
            .iter()
            .filter_map(|point| point.resolved())
            .map(|point| to_bitmap(point, ratio))
            .collect();

        let mut path = committed.iter().copied().chain(temp);
        if let Some(first) = path.next() {
            let rest: SmallVec<[PixelPoint; 16]> = path.collect();
            if !rest.is_empty() {
                surface.set_stroke(&self.options.stroke_style(ratio))?;
                surface.begin_path();
                surface.move_to(first.x, first.y);
                for point in &rest {
                    surface.line_to(point.x, point.y);
                }
                surface.stroke()?;
            }
        }

        for point in &committed {
            surface.fill_circle(point.x, point.y, marker_radius, self.options.point_color)?;
        }

        Ok(())
    }
}

/// Media to bitmap coordinates, snapped to whole device pixels.
fn to_bitmap(point: PixelPoint, ratio: PixelRatio) -> PixelPoint {
    PixelPoint::new(
        (point.x * ratio.horizontal).round(),
        (point.y * ratio.vertical).round(),
    )
}
