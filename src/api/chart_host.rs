use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{PixelPoint, PriceScale, TimeScale, TimeValue, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    AttachedParams, ChartApi, PaneRenderer, PaneView, RequestUpdate, SeriesApi, SeriesPrimitive,
};
use crate::interaction::{MouseEventHandler, MouseEventParams, PointerEventKind, SubscriptionId};
use crate::render::{DrawingSurface, PixelRatio, RecordingSurface};

use super::ChartHostConfig;

#[derive(Debug, Clone, Copy)]
struct HostModel {
    viewport: Viewport,
    time_scale: TimeScale,
    price_scale: Option<PriceScale>,
    pixel_ratio: PixelRatio,
}

#[derive(Default)]
struct SubscriptionRegistry {
    next_id: u64,
    click: IndexMap<SubscriptionId, MouseEventHandler>,
    crosshair_move: IndexMap<SubscriptionId, MouseEventHandler>,
}

impl SubscriptionRegistry {
    fn handlers_mut(
        &mut self,
        kind: PointerEventKind,
    ) -> &mut IndexMap<SubscriptionId, MouseEventHandler> {
        match kind {
            PointerEventKind::Click => &mut self.click,
            PointerEventKind::CrosshairMove => &mut self.crosshair_move,
        }
    }

    fn handlers(&self, kind: PointerEventKind) -> &IndexMap<SubscriptionId, MouseEventHandler> {
        match kind {
            PointerEventKind::Click => &self.click,
            PointerEventKind::CrosshairMove => &self.crosshair_move,
        }
    }

    fn insert(&mut self, kind: PointerEventKind, handler: MouseEventHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.handlers_mut(kind).insert(id, handler);
        id
    }

    fn remove(&mut self, kind: PointerEventKind, id: SubscriptionId) -> bool {
        self.handlers_mut(kind).shift_remove(&id).is_some()
    }
}

/// In-memory single-series chart that hosts overlays without a GUI toolkit.
///
/// It owns the time/price mappings, dispatches pointer notifications to
/// subscribers in registration order and counts repaint requests. Desktop
/// adapters drive it from real input events; tests drive it directly.
pub struct ChartHost {
    model: RefCell<HostModel>,
    subscriptions: RefCell<SubscriptionRegistry>,
    repaint_requests: Cell<usize>,
    repaint_listener: RefCell<Option<RequestUpdate>>,
}

impl ChartHost {
    pub fn new(config: ChartHostConfig) -> ChartResult<Rc<Self>> {
        config.validate()?;
        let time_scale = TimeScale::new(config.time_start, config.time_end)?;
        let price_scale = PriceScale::new(config.price_min, config.price_max)?
            .with_inverted(config.price_scale_inverted);

        Ok(Rc::new(Self {
            model: RefCell::new(HostModel {
                viewport: config.viewport,
                time_scale,
                price_scale: Some(price_scale),
                pixel_ratio: config.pixel_ratio,
            }),
            subscriptions: RefCell::new(SubscriptionRegistry::default()),
            repaint_requests: Cell::new(0),
            repaint_listener: RefCell::new(None),
        }))
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.model.borrow().viewport
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> PixelRatio {
        self.model.borrow().pixel_ratio
    }

    #[must_use]
    pub fn time_visible_range(&self) -> (f64, f64) {
        self.model.borrow().time_scale.visible_range()
    }

    #[must_use]
    pub fn time_loaded_range(&self) -> (f64, f64) {
        self.model.borrow().time_scale.loaded_range()
    }

    /// Price domain, or `None` while the price axis is not ready.
    #[must_use]
    pub fn price_domain(&self) -> Option<(f64, f64)> {
        self.model.borrow().price_scale.map(PriceScale::domain)
    }

    pub fn resize(&self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.model.borrow_mut().viewport = viewport;
        debug!(width = viewport.width, height = viewport.height, "chart resized");
        self.request_repaint();
        Ok(())
    }

    pub fn set_pixel_ratio(&self, pixel_ratio: PixelRatio) -> ChartResult<()> {
        self.model.borrow_mut().pixel_ratio = pixel_ratio.validate()?;
        self.request_repaint();
        Ok(())
    }

    pub fn set_loaded_time_range(&self, start: f64, end: f64) -> ChartResult<()> {
        self.model.borrow_mut().time_scale.set_loaded_range(start, end)?;
        self.request_repaint();
        Ok(())
    }

    pub fn set_visible_time_range(&self, start: f64, end: f64) -> ChartResult<()> {
        self.model
            .borrow_mut()
            .time_scale
            .set_visible_range(start, end)?;
        self.request_repaint();
        Ok(())
    }

    /// Pans the time axis; positive `delta_px` drags content to the right.
    pub fn pan_by_pixels(&self, delta_px: f64) -> ChartResult<()> {
        {
            let mut model = self.model.borrow_mut();
            let width = f64::from(model.viewport.width);
            model.time_scale.pan_by_pixels(delta_px, width)?;
        }
        self.request_repaint();
        Ok(())
    }

    pub fn zoom_by_factor(&self, factor: f64, anchor_x: f64) -> ChartResult<()> {
        {
            let mut model = self.model.borrow_mut();
            let width = f64::from(model.viewport.width);
            model.time_scale.zoom_by_factor(factor, anchor_x, width)?;
        }
        self.request_repaint();
        Ok(())
    }

    pub fn set_price_domain(&self, price_min: f64, price_max: f64) -> ChartResult<()> {
        {
            let mut model = self.model.borrow_mut();
            let inverted = model.price_scale.is_some_and(PriceScale::is_inverted);
            model.price_scale = Some(PriceScale::new(price_min, price_max)?.with_inverted(inverted));
        }
        self.request_repaint();
        Ok(())
    }

    /// Puts the price axis into its "not ready" state.
    pub fn clear_price_domain(&self) {
        self.model.borrow_mut().price_scale = None;
        self.request_repaint();
    }

    #[must_use]
    pub fn click_subscriber_count(&self) -> usize {
        self.subscriptions.borrow().click.len()
    }

    #[must_use]
    pub fn crosshair_move_subscriber_count(&self) -> usize {
        self.subscriptions.borrow().crosshair_move.len()
    }

    /// Builds the notification payload for a pointer at media `(x, y)`.
    #[must_use]
    pub fn mouse_event_params(&self, x: f64, y: f64) -> MouseEventParams {
        let model = self.model.borrow();
        if !model.viewport.is_valid() || !model.viewport.contains(x, y) {
            return MouseEventParams::outside();
        }
        let time = model
            .time_scale
            .pixel_to_time(x, f64::from(model.viewport.width));
        MouseEventParams::new(Some(PixelPoint::new(x, y)), time)
    }

    pub fn pointer_click(&self, x: f64, y: f64) -> MouseEventParams {
        let params = self.mouse_event_params(x, y);
        self.dispatch(PointerEventKind::Click, &params);
        params
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> MouseEventParams {
        let params = self.mouse_event_params(x, y);
        self.dispatch(PointerEventKind::CrosshairMove, &params);
        params
    }

    pub fn pointer_leave(&self) {
        self.dispatch(PointerEventKind::CrosshairMove, &MouseEventParams::outside());
    }

    /// Context for installing a primitive on this host's only series.
    pub fn attached_params(self: &Rc<Self>) -> AttachedParams {
        let host = Rc::downgrade(self);
        AttachedParams {
            chart: Rc::clone(self) as Rc<dyn ChartApi>,
            series: Rc::clone(self) as Rc<dyn SeriesApi>,
            request_update: Rc::new(move || {
                if let Some(host) = host.upgrade() {
                    host.request_repaint();
                }
            }),
        }
    }

    /// Installs a listener invoked on every repaint request.
    pub fn set_repaint_listener(&self, listener: Option<RequestUpdate>) {
        *self.repaint_listener.borrow_mut() = listener;
    }

    #[must_use]
    pub fn repaint_requests(&self) -> usize {
        self.repaint_requests.get()
    }

    /// Returns the pending repaint request count and resets it.
    pub fn take_repaint_requests(&self) -> usize {
        self.repaint_requests.replace(0)
    }

    pub fn request_repaint(&self) {
        self.repaint_requests.set(self.repaint_requests.get() + 1);
        let listener = self.repaint_listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// Runs one paint cycle of `primitive`: every pane view is updated and
    /// its renderer drawn onto `surface`.
    pub fn paint<P: SeriesPrimitive>(
        &self,
        primitive: &P,
        surface: &mut dyn DrawingSurface,
    ) -> ChartResult<()> {
        for view in primitive.pane_views() {
            view.update();
            view.renderer().draw(surface)?;
        }
        Ok(())
    }

    /// Paints `primitive` onto a fresh `RecordingSurface` at the host's
    /// pixel ratio.
    pub fn paint_recording<P: SeriesPrimitive>(
        &self,
        primitive: &P,
    ) -> ChartResult<RecordingSurface> {
        let mut surface = RecordingSurface::new(self.pixel_ratio());
        self.paint(primitive, &mut surface)?;
        Ok(surface)
    }

    fn dispatch(&self, kind: PointerEventKind, params: &MouseEventParams) {
        // Handlers run on a copy so they may unsubscribe while dispatching.
        let handlers: SmallVec<[MouseEventHandler; 4]> = self
            .subscriptions
            .borrow()
            .handlers(kind)
            .values()
            .cloned()
            .collect();
        trace!(?kind, subscribers = handlers.len(), "dispatching pointer event");
        for handler in handlers {
            handler(params);
        }
    }
}

impl ChartApi for ChartHost {
    fn time_to_coordinate(&self, time: TimeValue) -> Option<f64> {
        let model = self.model.borrow();
        if !model.viewport.is_valid() {
            return None;
        }
        model
            .time_scale
            .time_to_pixel(time, f64::from(model.viewport.width))
    }

    fn coordinate_to_time(&self, x: f64) -> Option<TimeValue> {
        let model = self.model.borrow();
        if !model.viewport.is_valid() {
            return None;
        }
        model
            .time_scale
            .pixel_to_time(x, f64::from(model.viewport.width))
    }

    fn subscribe_click(&self, handler: MouseEventHandler) -> SubscriptionId {
        self.subscriptions
            .borrow_mut()
            .insert(PointerEventKind::Click, handler)
    }

    fn unsubscribe_click(&self, id: SubscriptionId) {
        if !self
            .subscriptions
            .borrow_mut()
            .remove(PointerEventKind::Click, id)
        {
            debug!(%id, "unknown click subscription");
        }
    }

    fn subscribe_crosshair_move(&self, handler: MouseEventHandler) -> SubscriptionId {
        self.subscriptions
            .borrow_mut()
            .insert(PointerEventKind::CrosshairMove, handler)
    }

    fn unsubscribe_crosshair_move(&self, id: SubscriptionId) {
        if !self
            .subscriptions
            .borrow_mut()
            .remove(PointerEventKind::CrosshairMove, id)
        {
            debug!(%id, "unknown crosshair-move subscription");
        }
    }
}

impl SeriesApi for ChartHost {
    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        let model = self.model.borrow();
        let height = f64::from(model.viewport.height);
        model.price_scale?.price_to_pixel(price, height)
    }

    fn coordinate_to_price(&self, y: f64) -> Option<f64> {
        let model = self.model.borrow();
        let height = f64::from(model.viewport.height);
        model.price_scale?.pixel_to_price(y, height)
    }
}

impl fmt::Debug for ChartHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHost")
            .field("model", &self.model)
            .field("click_subscribers", &self.click_subscriber_count())
            .field(
                "crosshair_move_subscribers",
                &self.crosshair_move_subscriber_count(),
            )
            .field("repaint_requests", &self.repaint_requests.get())
            .finish_non_exhaustive()
    }
}
