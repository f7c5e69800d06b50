use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::core::TimeValue;
use crate::error::ChartResult;
use crate::interaction::{MouseEventHandler, SubscriptionId};
use crate::render::DrawingSurface;

/// Chart-level capabilities an overlay borrows from its host.
///
/// Every mapping may report a value as not representable at any time, for
/// example while the viewport is empty.
pub trait ChartApi {
    fn time_to_coordinate(&self, time: TimeValue) -> Option<f64>;

    fn coordinate_to_time(&self, x: f64) -> Option<TimeValue>;

    fn subscribe_click(&self, handler: MouseEventHandler) -> SubscriptionId;

    fn unsubscribe_click(&self, id: SubscriptionId);

    fn subscribe_crosshair_move(&self, handler: MouseEventHandler) -> SubscriptionId;

    fn unsubscribe_crosshair_move(&self, id: SubscriptionId);
}

/// Series-level price axis mapping.
pub trait SeriesApi {
    fn price_to_coordinate(&self, price: f64) -> Option<f64>;

    fn coordinate_to_price(&self, y: f64) -> Option<f64>;
}

/// Idempotent "please repaint soon" signal supplied by the host.
pub type RequestUpdate = Rc<dyn Fn()>;

/// Context handed to a primitive when the host installs it on a series.
#[derive(Clone)]
pub struct AttachedParams {
    pub chart: Rc<dyn ChartApi>,
    pub series: Rc<dyn SeriesApi>,
    pub request_update: RequestUpdate,
}

impl fmt::Debug for AttachedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedParams").finish_non_exhaustive()
    }
}

/// Paints one frame of an overlay from an immutable snapshot.
pub trait PaneRenderer {
    fn draw(&self, surface: &mut dyn DrawingSurface) -> ChartResult<()>;
}

/// Per-pane view polled by the host on each paint cycle.
///
/// The host calls `update` before asking for a `renderer`.
pub trait PaneView {
    type Renderer: PaneRenderer;

    fn update(&self);

    fn renderer(&self) -> Self::Renderer;
}

/// Overlay installed on a series, modeled on Lightweight Charts series
/// primitives.
pub trait SeriesPrimitive {
    type PaneView: PaneView;

    fn attached(&mut self, params: AttachedParams);

    fn detached(&mut self);

    /// Invoked by the host whenever the viewport changed.
    fn update_all_views(&mut self) {}

    fn pane_views(&self) -> SmallVec<[Self::PaneView; 1]>;
}
