use std::rc::Rc;

use chart_polyline::api::{ChartHost, ChartHostConfig};
use chart_polyline::core::{PixelPoint, ViewPoint, Viewport};
use chart_polyline::extensions::{PaneView, PolylineTool, SeriesPrimitive};
use chart_polyline::render::PixelRatio;

fn build_host() -> Rc<ChartHost> {
    let config =
        ChartHostConfig::new(Viewport::new(1000, 500), 0.0, 1000.0).with_price_domain(0.0, 50.0);
    ChartHost::new(config).expect("host init")
}

/// Tool attached and active with vertices at t = 100/200/300, price = 10/20/30.
fn drawn_tool(host: &Rc<ChartHost>) -> PolylineTool {
    let mut tool = PolylineTool::default();
    tool.attached(host.attached_params());
    tool.activate(host.clone(), host.clone());
    host.pointer_click(100.0, 400.0);
    host.pointer_click(200.0, 300.0);
    host.pointer_click(300.0, 200.0);
    tool
}

fn markers(host: &ChartHost, tool: &PolylineTool) -> Vec<PixelPoint> {
    host.paint_recording(tool)
        .expect("paint")
        .marker_centers()
}

fn rounded(points: &[ViewPoint]) -> Vec<Option<(f64, f64)>> {
    points
        .iter()
        .map(|point| point.resolved().map(|p| (p.x.round(), p.y.round())))
        .collect()
}

#[test]
fn update_is_idempotent_without_viewport_changes() {
    let host = build_host();
    let tool = drawn_tool(&host);
    let view = tool.pane_views().into_iter().next().expect("pane view");

    view.update();
    let first = view.view_points();
    view.update();
    let second = view.view_points();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(view.renderer(), view.renderer());
}

#[test]
fn pan_moves_projection_with_the_time_axis() {
    let host = build_host();
    let mut tool = drawn_tool(&host);

    host.pan_by_pixels(-100.0).expect("pan");
    tool.update_all_views();

    assert_eq!(
        markers(&host, &tool),
        vec![
            PixelPoint::new(0.0, 400.0),
            PixelPoint::new(100.0, 300.0),
            PixelPoint::new(200.0, 200.0),
        ]
    );
}

#[test]
fn zoom_rescales_projection_around_anchor() {
    let host = build_host();
    let tool = drawn_tool(&host);

    host.zoom_by_factor(2.0, 0.0).expect("zoom");

    assert_eq!(
        markers(&host, &tool),
        vec![
            PixelPoint::new(200.0, 400.0),
            PixelPoint::new(400.0, 300.0),
            PixelPoint::new(600.0, 200.0),
        ]
    );
}

#[test]
fn resize_rescales_both_axes() {
    let host = build_host();
    let tool = drawn_tool(&host);

    host.resize(Viewport::new(500, 250)).expect("resize");

    assert_eq!(
        markers(&host, &tool),
        vec![
            PixelPoint::new(50.0, 200.0),
            PixelPoint::new(100.0, 150.0),
            PixelPoint::new(150.0, 100.0),
        ]
    );
}

#[test]
fn points_outside_loaded_range_become_unresolved_and_are_skipped() {
    let host = build_host();
    let tool = drawn_tool(&host);
    host.set_loaded_time_range(150.0, 1000.0)
        .expect("loaded range");

    let view = tool.pane_views().into_iter().next().expect("pane view");
    view.update();
    assert_eq!(
        rounded(&view.view_points()),
        vec![None, Some((200.0, 300.0)), Some((300.0, 200.0))]
    );

    let frame = host.paint_recording(&tool).expect("paint");
    assert_eq!(
        frame.stroked_paths(),
        vec![vec![PixelPoint::new(200.0, 300.0), PixelPoint::new(300.0, 200.0)]]
    );
    assert_eq!(frame.marker_centers().len(), 2);
}

#[test]
fn price_axis_not_ready_hides_everything_but_keeps_points() {
    let host = build_host();
    let tool = drawn_tool(&host);
    host.clear_price_domain();

    let frame = host.paint_recording(&tool).expect("paint");
    assert!(frame.is_empty());
    assert_eq!(tool.points_len(), 3);

    host.set_price_domain(0.0, 50.0).expect("price domain");
    assert_eq!(markers(&host, &tool).len(), 3);
}

#[test]
fn projection_without_any_handles_is_all_unresolved() {
    let host = build_host();
    let mut tool = PolylineTool::default();
    tool.activate(host.clone(), host.clone());
    host.pointer_click(100.0, 400.0);
    host.pointer_click(200.0, 300.0);
    tool.deactivate();

    let view = tool.pane_views().into_iter().next().expect("pane view");
    view.update();
    assert_eq!(view.view_points(), vec![ViewPoint::UNRESOLVED; 2]);
    assert!(host.paint_recording(&tool).expect("paint").is_empty());
}

#[test]
fn attached_polyline_stays_visible_after_deactivate() {
    let host = build_host();
    let mut tool = drawn_tool(&host);
    tool.deactivate();

    host.pan_by_pixels(-100.0).expect("pan");
    assert_eq!(
        markers(&host, &tool),
        vec![
            PixelPoint::new(0.0, 400.0),
            PixelPoint::new(100.0, 300.0),
            PixelPoint::new(200.0, 200.0),
        ]
    );
}

#[test]
fn host_pixel_ratio_reaches_the_renderer() {
    let host = build_host();
    let tool = drawn_tool(&host);
    host.set_pixel_ratio(PixelRatio::uniform(2.0))
        .expect("pixel ratio");

    let frame = host.paint_recording(&tool).expect("paint");
    assert_eq!(frame.marker_centers()[0], PixelPoint::new(200.0, 800.0));
    let stroke = frame.last_stroke().expect("stroke state");
    assert_eq!(stroke.width, 4.0);
}

#[test]
fn renderer_snapshot_is_isolated_from_later_clicks() {
    let host = build_host();
    let tool = drawn_tool(&host);
    let view = tool.pane_views().into_iter().next().expect("pane view");
    view.update();
    let snapshot = view.renderer();

    host.pointer_click(400.0, 100.0);

    assert_eq!(snapshot.points().len(), 3);
    assert_eq!(tool.points_len(), 4);
}

#[test]
fn deactivate_and_detach_drop_preview_from_next_renderer() {
    let host = build_host();
    let mut tool = PolylineTool::default();
    tool.attached(host.attached_params());
    tool.activate(host.clone(), host.clone());
    host.pointer_click(100.0, 400.0);
    host.pointer_move(200.0, 300.0);
    host.paint_recording(&tool).expect("paint");

    tool.deactivate();
    let view = tool.pane_views().into_iter().next().expect("pane view");
    let renderer = view.renderer();
    assert!(renderer.temp_point().is_none());
    assert_eq!(rounded(renderer.points()), vec![Some((100.0, 400.0))]);

    tool.detached();
    let renderer = view.renderer();
    assert_eq!(renderer.points(), &[ViewPoint::UNRESOLVED]);
}

#[test]
fn visible_time_range_controls_projection_independently_of_loaded_range() {
    let host = build_host();
    let tool = drawn_tool(&host);

    host.set_visible_time_range(0.0, 2000.0)
        .expect("visible range");
    assert_eq!(host.time_visible_range(), (0.0, 2000.0));
    assert_eq!(host.time_loaded_range(), (0.0, 1000.0));

    assert_eq!(
        markers(&host, &tool),
        vec![
            PixelPoint::new(50.0, 400.0),
            PixelPoint::new(100.0, 300.0),
            PixelPoint::new(150.0, 200.0),
        ]
    );
}

#[test]
fn inverted_price_scale_flips_vertical_projection() {
    let config = ChartHostConfig::new(Viewport::new(1000, 500), 0.0, 1000.0)
        .with_price_domain(0.0, 50.0)
        .with_price_scale_inverted(true);
    let host = ChartHost::new(config).expect("host init");
    let mut tool = PolylineTool::default();
    tool.attached(host.attached_params());
    tool.activate(host.clone(), host.clone());

    host.pointer_click(100.0, 100.0);
    let points = tool.points();
    assert!((points[0].price - 10.0).abs() <= 1e-9);
    assert_eq!(markers(&host, &tool), vec![PixelPoint::new(100.0, 100.0)]);
}
