use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::core::LogicalPoint;
use crate::extensions::polyline::pane_view::ProjectionCache;
use crate::extensions::polyline::{
    PolylineOptions, PolylineOptionsPatch, PolylinePaneView, PolylineRenderer, PolylineState,
};
use crate::extensions::{AttachedParams, ChartApi, RequestUpdate, SeriesApi, SeriesPrimitive};
use crate::interaction::{
    DrawingState, MouseEventHandler, MouseEventParams, PointerEventKind, SubscriptionGuard,
};

/// Handles and subscriptions held while the tool is in drawing mode.
///
/// Dropping the session releases both subscriptions.
struct ActiveSession {
    chart: Rc<dyn ChartApi>,
    series: Rc<dyn SeriesApi>,
    _click: SubscriptionGuard,
    _crosshair_move: SubscriptionGuard,
}

/// Shared state behind `PolylineTool` and its pane view.
pub(crate) struct PolylineCore {
    state: PolylineState,
    cache: ProjectionCache,
    session: Option<ActiveSession>,
    attachment: Option<AttachedParams>,
}

impl PolylineCore {
    fn new(options: PolylineOptions) -> Self {
        Self {
            state: PolylineState::new(options),
            cache: ProjectionCache::default(),
            session: None,
            attachment: None,
        }
    }

    pub(crate) fn cache(&self) -> &ProjectionCache {
        &self.cache
    }

    /// Rebuilds every projected point from the logical state.
    ///
    /// Drawing-mode handles take precedence over the attachment handles; with
    /// neither, every entry stays unresolved.
    pub(crate) fn refresh_projection(&mut self) {
        let handles = match (&self.session, &self.attachment) {
            (Some(session), _) => Some((session.chart.as_ref(), session.series.as_ref())),
            (None, Some(attachment)) => {
                Some((attachment.chart.as_ref(), attachment.series.as_ref()))
            }
            (None, None) => None,
        };
        self.cache.rebuild(&self.state, handles);
    }

    pub(crate) fn renderer_snapshot(&self) -> PolylineRenderer {
        PolylineRenderer::new(
            self.cache.points().to_vec(),
            self.cache.temp_point(),
            self.state.options().clone(),
        )
    }

    fn request_update_callback(&self) -> Option<RequestUpdate> {
        self.attachment
            .as_ref()
            .map(|attachment| Rc::clone(&attachment.request_update))
    }

    /// Appends the clicked point; returns `false` when the click is ignored.
    fn commit_click(&mut self, params: &MouseEventParams) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let (Some(point), Some(time)) = (params.point, params.time) else {
            trace!("click ignored: no plot point or time");
            return false;
        };
        let Some(price) = session
            .series
            .coordinate_to_price(point.y)
            .filter(|price| price.is_finite())
        else {
            trace!(y = point.y, "click ignored: price conversion failed");
            return false;
        };

        self.state.push_point(LogicalPoint { time, price });
        self.refresh_projection();
        trace!(
            %time,
            price,
            points = self.state.points().len(),
            "polyline point committed"
        );
        true
    }

    /// Moves the preview point; returns `false` when the tool is inactive.
    fn track_pointer(&mut self, params: &MouseEventParams) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let temp_point = match (params.point, params.time) {
            (Some(point), Some(time)) => session
                .series
                .coordinate_to_price(point.y)
                .filter(|price| price.is_finite())
                .map(|price| LogicalPoint { time, price }),
            _ => None,
        };
        self.state.set_temp_point(temp_point);
        true
    }
}

/// Interactive polyline drawing tool installed on a chart series.
///
/// Inactive on construction. While active, each click commits a vertex and
/// pointer moves drive a preview segment from the last vertex to the pointer.
pub struct PolylineTool {
    core: Rc<RefCell<PolylineCore>>,
}

impl PolylineTool {
    #[must_use]
    pub fn new(options: PolylineOptions) -> Self {
        Self {
            core: Rc::new(RefCell::new(PolylineCore::new(options))),
        }
    }

    /// Enters drawing mode and subscribes to click and crosshair-move
    /// notifications. No-op when already active.
    pub fn activate(&mut self, chart: Rc<dyn ChartApi>, series: Rc<dyn SeriesApi>) {
        if self.is_active() {
            debug!("polyline tool already active");
            return;
        }

        let click_target = Rc::downgrade(&self.core);
        let click_handler: MouseEventHandler =
            Rc::new(move |params: &MouseEventParams| on_click(&click_target, params));
        let move_target = Rc::downgrade(&self.core);
        let move_handler: MouseEventHandler =
            Rc::new(move |params: &MouseEventParams| on_crosshair_move(&move_target, params));

        let click = SubscriptionGuard::subscribe(
            Rc::clone(&chart),
            PointerEventKind::Click,
            click_handler,
        );
        let crosshair_move = SubscriptionGuard::subscribe(
            Rc::clone(&chart),
            PointerEventKind::CrosshairMove,
            move_handler,
        );

        self.core.borrow_mut().session = Some(ActiveSession {
            chart,
            series,
            _click: click,
            _crosshair_move: crosshair_move,
        });
        debug!("polyline tool activated");
    }

    /// Leaves drawing mode: releases subscriptions and handles, clears the
    /// preview point and requests a repaint. No-op when inactive.
    pub fn deactivate(&mut self) {
        let session = {
            let mut core = self.core.borrow_mut();
            let Some(session) = core.session.take() else {
                trace!("polyline tool already inactive");
                return;
            };
            core.state.set_temp_point(None);
            core.refresh_projection();
            session
        };
        // Unsubscribe outside the borrow so the host may re-enter the tool.
        drop(session);
        debug!("polyline tool deactivated");
        self.request_update();
    }

    #[must_use]
    pub fn state(&self) -> DrawingState {
        if self.core.borrow().session.is_some() {
            DrawingState::Active
        } else {
            DrawingState::Inactive
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.core.borrow().attachment.is_some()
    }

    /// Removes every committed point and the preview point, regardless of
    /// activation state.
    pub fn clear_points(&mut self) {
        {
            let mut core = self.core.borrow_mut();
            core.state.clear();
            core.refresh_projection();
        }
        debug!("polyline points cleared");
        self.request_update();
    }

    /// Committed points in click order.
    #[must_use]
    pub fn points(&self) -> Vec<LogicalPoint> {
        self.core.borrow().state.points().to_vec()
    }

    #[must_use]
    pub fn points_len(&self) -> usize {
        self.core.borrow().state.points().len()
    }

    #[must_use]
    pub fn temp_point(&self) -> Option<LogicalPoint> {
        self.core.borrow().state.temp_point()
    }

    #[must_use]
    pub fn options(&self) -> PolylineOptions {
        self.core.borrow().state.options().clone()
    }

    /// Copy of the full logical state.
    #[must_use]
    pub fn snapshot(&self) -> PolylineState {
        self.core.borrow().state.clone()
    }

    /// Merges `patch` over the current style and requests a repaint.
    pub fn apply_options(&mut self, patch: PolylineOptionsPatch) {
        self.core.borrow_mut().state.apply_options(patch);
        self.request_update();
    }

    fn request_update(&self) {
        let callback = self.core.borrow().request_update_callback();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl Default for PolylineTool {
    fn default() -> Self {
        Self::new(PolylineOptions::default())
    }
}

impl SeriesPrimitive for PolylineTool {
    type PaneView = PolylinePaneView;

    fn attached(&mut self, params: AttachedParams) {
        self.core.borrow_mut().attachment = Some(params);
        debug!("polyline tool attached");
    }

    fn detached(&mut self) {
        self.deactivate();
        let mut core = self.core.borrow_mut();
        core.state.set_temp_point(None);
        core.attachment = None;
        core.refresh_projection();
        debug!("polyline tool detached");
    }

    fn update_all_views(&mut self) {
        self.core.borrow_mut().refresh_projection();
    }

    fn pane_views(&self) -> SmallVec<[PolylinePaneView; 1]> {
        smallvec![PolylinePaneView::new(Rc::clone(&self.core))]
    }
}

impl fmt::Debug for PolylineTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PolylineTool");
        match self.core.try_borrow() {
            Ok(core) => debug
                .field("active", &core.session.is_some())
                .field("attached", &core.attachment.is_some())
                .field("state", &core.state)
                .finish(),
            Err(_) => debug.finish_non_exhaustive(),
        }
    }
}

fn on_click(target: &Weak<RefCell<PolylineCore>>, params: &MouseEventParams) {
    let Some(core) = target.upgrade() else {
        return;
    };
    let callback = {
        let Ok(mut core) = core.try_borrow_mut() else {
            debug!("click ignored: polyline state is busy");
            return;
        };
        if !core.commit_click(params) {
            return;
        }
        core.request_update_callback()
    };
    if let Some(callback) = callback {
        callback();
    }
}

fn on_crosshair_move(target: &Weak<RefCell<PolylineCore>>, params: &MouseEventParams) {
    let Some(core) = target.upgrade() else {
        return;
    };
    let callback = {
        let Ok(mut core) = core.try_borrow_mut() else {
            debug!("pointer move ignored: polyline state is busy");
            return;
        };
        if !core.track_pointer(params) {
            return;
        }
        core.request_update_callback()
    };
    if let Some(callback) = callback {
        callback();
    }
}
