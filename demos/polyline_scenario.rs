use std::rc::Rc;

use chart_polyline::api::{ChartHost, ChartHostConfig};
use chart_polyline::core::Viewport;
use chart_polyline::extensions::{ChartApi, PolylineOptionsPatch, SeriesApi, SeriesPrimitive};
use chart_polyline::render::{Color, LineStrokeStyle, PixelRatio};
use chart_polyline::{PolylineTool, telemetry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = telemetry::init_default_tracing();

    let config = ChartHostConfig::new(Viewport::new(1000, 600), 0.0, 500.0)
        .with_price_domain(0.0, 60.0)
        .with_pixel_ratio(PixelRatio::uniform(2.0));
    let host = ChartHost::new(config)?;

    let mut tool = PolylineTool::default();
    tool.attached(host.attached_params());
    let chart: Rc<dyn ChartApi> = host.clone();
    let series: Rc<dyn SeriesApi> = host.clone();
    tool.activate(chart, series);

    host.pointer_click(200.0, 500.0);
    host.pointer_click(400.0, 400.0);
    host.pointer_click(600.0, 450.0);
    host.pointer_move(800.0, 150.0);

    let frame = host.paint_recording(&tool)?;
    println!("committed points: {:?}", tool.points());
    println!(
        "frame: segments={} markers={}",
        frame.segment_count(),
        frame.marker_centers().len()
    );

    tool.apply_options(
        PolylineOptionsPatch::default()
            .with_line_color(Color::from_css("#ef5350")?)
            .with_line_style(LineStrokeStyle::Dashed),
    );
    host.pan_by_pixels(-250.0)?;
    tool.update_all_views();

    let panned = host.paint_recording(&tool)?;
    println!(
        "after pan: segments={} markers={} stroke={:?}",
        panned.segment_count(),
        panned.marker_centers().len(),
        panned.last_stroke()
    );

    tool.deactivate();
    println!("repaint requests: {}", host.repaint_requests());
    Ok(())
}
