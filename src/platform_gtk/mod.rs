//! GTK4 embedding for the polyline overlay.
//!
//! A `DrawingArea` forwards clicks and pointer motion to a `ChartHost` and
//! paints the attached `PolylineTool` through `CairoSurface` in device pixels.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk::prelude::*;
use gtk::{DrawingArea, EventControllerMotion, GestureClick};
use tracing::warn;

use crate::api::ChartHost;
use crate::core::Viewport;
use crate::extensions::{ChartApi, PolylineTool, SeriesApi, SeriesPrimitive};
use crate::render::{CairoSurface, PixelRatio};

pub struct PolylineDrawingArea {
    area: DrawingArea,
    host: Rc<ChartHost>,
    tool: Rc<RefCell<PolylineTool>>,
}

impl PolylineDrawingArea {
    /// Builds the widget and attaches `tool` to `host` if it is not attached yet.
    #[must_use]
    pub fn new(host: Rc<ChartHost>, tool: Rc<RefCell<PolylineTool>>) -> Self {
        let viewport = host.viewport();
        let area = DrawingArea::new();
        area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        if !tool.borrow().is_attached() {
            tool.borrow_mut().attached(host.attached_params());
        }

        let weak_area = area.downgrade();
        host.set_repaint_listener(Some(Rc::new(move || {
            if let Some(area) = weak_area.upgrade() {
                area.queue_draw();
            }
        })));

        {
            let host = Rc::clone(&host);
            let tool = Rc::clone(&tool);
            area.set_draw_func(move |area, context, _width, _height| {
                let scale = f64::from(area.scale_factor().max(1));
                if let Err(err) = context.save() {
                    warn!(error = %err, "failed to save cairo state");
                    return;
                }
                context.scale(1.0 / scale, 1.0 / scale);
                let painted = CairoSurface::new(context, PixelRatio::uniform(scale))
                    .and_then(|mut surface| host.paint(&*tool.borrow(), &mut surface));
                if let Err(err) = painted {
                    warn!(error = %err, "polyline paint failed");
                }
                if let Err(err) = context.restore() {
                    warn!(error = %err, "failed to restore cairo state");
                }
            });
        }

        {
            let host = Rc::clone(&host);
            let tool = Rc::clone(&tool);
            area.connect_resize(move |_, width, height| {
                let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                    return;
                };
                if let Err(err) = host.resize(Viewport::new(width, height)) {
                    warn!(error = %err, "ignoring drawing area resize");
                    return;
                }
                tool.borrow_mut().update_all_views();
            });
        }

        let click = GestureClick::new();
        {
            let host = Rc::clone(&host);
            click.connect_pressed(move |_, _n_press, x, y| {
                host.pointer_click(x, y);
            });
        }
        area.add_controller(click);

        let motion = EventControllerMotion::new();
        {
            let host = Rc::clone(&host);
            motion.connect_motion(move |_, x, y| {
                host.pointer_move(x, y);
            });
        }
        {
            let host = Rc::clone(&host);
            motion.connect_leave(move |_| host.pointer_leave());
        }
        area.add_controller(motion);

        Self { area, host, tool }
    }

    #[must_use]
    pub fn widget(&self) -> &DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn host(&self) -> &Rc<ChartHost> {
        &self.host
    }

    #[must_use]
    pub fn tool(&self) -> &Rc<RefCell<PolylineTool>> {
        &self.tool
    }

    pub fn start_drawing(&self) {
        let chart: Rc<dyn ChartApi> = Rc::clone(&self.host) as Rc<dyn ChartApi>;
        let series: Rc<dyn SeriesApi> = Rc::clone(&self.host) as Rc<dyn SeriesApi>;
        self.tool.borrow_mut().activate(chart, series);
    }

    pub fn stop_drawing(&self) {
        self.tool.borrow_mut().deactivate();
    }

    pub fn clear(&self) {
        self.tool.borrow_mut().clear_points();
    }
}
