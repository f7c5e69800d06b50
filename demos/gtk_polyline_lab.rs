use std::cell::RefCell;
use std::rc::Rc;

use chart_polyline::api::{ChartHost, ChartHostConfig};
use chart_polyline::core::Viewport;
use chart_polyline::platform_gtk::PolylineDrawingArea;
use chart_polyline::{PolylineTool, telemetry};
use gtk4 as gtk;
use gtk::prelude::*;
use gtk::{Application, ApplicationWindow, Box as GtkBox, Button, Orientation, ToggleButton};

fn main() -> gtk::glib::ExitCode {
    let _ = telemetry::init_default_tracing();

    let app = Application::builder()
        .application_id("rs.chart.polyline.lab")
        .build();
    app.connect_activate(build_ui);
    app.run()
}

fn build_ui(app: &Application) {
    let config =
        ChartHostConfig::new(Viewport::new(960, 540), 0.0, 1_000.0).with_price_domain(0.0, 100.0);
    let host = match ChartHost::new(config) {
        Ok(host) => host,
        Err(err) => {
            eprintln!("failed to create chart host: {err}");
            return;
        }
    };
    let overlay = Rc::new(PolylineDrawingArea::new(
        host,
        Rc::new(RefCell::new(PolylineTool::default())),
    ));

    let draw_toggle = ToggleButton::with_label("Draw");
    {
        let overlay = Rc::clone(&overlay);
        draw_toggle.connect_toggled(move |button| {
            if button.is_active() {
                overlay.start_drawing();
            } else {
                overlay.stop_drawing();
            }
        });
    }

    let clear_button = Button::with_label("Clear");
    {
        let overlay = Rc::clone(&overlay);
        clear_button.connect_clicked(move |_| overlay.clear());
    }

    let toolbar = GtkBox::new(Orientation::Horizontal, 6);
    toolbar.append(&draw_toggle);
    toolbar.append(&clear_button);

    let layout = GtkBox::new(Orientation::Vertical, 6);
    layout.append(&toolbar);
    overlay.widget().set_vexpand(true);
    overlay.widget().set_hexpand(true);
    layout.append(overlay.widget());

    let window = ApplicationWindow::builder()
        .application(app)
        .title("chart-polyline lab")
        .default_width(960)
        .default_height(600)
        .child(&layout)
        .build();
    window.present();
}
