use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::core::{TimeValue, ViewPoint, project_point, project_points};
use crate::extensions::polyline::tool::PolylineCore;
use crate::extensions::polyline::{PolylineOptions, PolylineRenderer, PolylineState};
use crate::extensions::{ChartApi, PaneView, SeriesApi};

/// Projected view of the logical state, rebuilt from scratch on every pass.
///
/// `points` always has the same length as the logical point list; entries the
/// host cannot represent are `ViewPoint::UNRESOLVED`.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ProjectionCache {
    points: Vec<ViewPoint>,
    temp_point: Option<ViewPoint>,
}

impl ProjectionCache {
    pub(crate) fn rebuild(
        &mut self,
        state: &PolylineState,
        handles: Option<(&dyn ChartApi, &dyn SeriesApi)>,
    ) {
        match handles {
            Some((chart, series)) => {
                let time_to_x = |time: TimeValue| chart.time_to_coordinate(time);
                let price_to_y = |price: f64| series.price_to_coordinate(price);
                self.points = project_points(state.points(), time_to_x, price_to_y);
                self.temp_point = state
                    .temp_point()
                    .map(|point| project_point(point, time_to_x, price_to_y));
            }
            None => {
                self.points = vec![ViewPoint::UNRESOLVED; state.points().len()];
                self.temp_point = state.temp_point().map(|_| ViewPoint::UNRESOLVED);
            }
        }
    }

    pub(crate) fn points(&self) -> &[ViewPoint] {
        &self.points
    }

    pub(crate) fn temp_point(&self) -> Option<ViewPoint> {
        self.temp_point
    }
}

/// Pane view of a `PolylineTool`, polled by the host once per frame.
pub struct PolylinePaneView {
    core: Rc<RefCell<PolylineCore>>,
}

impl PolylinePaneView {
    pub(crate) fn new(core: Rc<RefCell<PolylineCore>>) -> Self {
        Self { core }
    }

    /// Currently cached projection, mainly for diagnostics.
    #[must_use]
    pub fn view_points(&self) -> Vec<ViewPoint> {
        match self.core.try_borrow() {
            Ok(core) => core.cache().points().to_vec(),
            Err(_) => Vec::new(),
        }
    }
}

impl PaneView for PolylinePaneView {
    type Renderer = PolylineRenderer;

    fn update(&self) {
        match self.core.try_borrow_mut() {
            Ok(mut core) => core.refresh_projection(),
            Err(_) => debug!("projection refresh skipped: polyline state is busy"),
        }
    }

    fn renderer(&self) -> PolylineRenderer {
        match self.core.try_borrow() {
            Ok(core) => core.renderer_snapshot(),
            Err(_) => {
                debug!("renderer snapshot unavailable: polyline state is busy");
                PolylineRenderer::new(Vec::new(), None, PolylineOptions::default())
            }
        }
    }
}

impl fmt::Debug for PolylinePaneView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolylinePaneView").finish_non_exhaustive()
    }
}
