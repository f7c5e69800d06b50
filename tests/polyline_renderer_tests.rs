use approx::assert_relative_eq;
use chart_polyline::core::{PixelPoint, ViewPoint};
use chart_polyline::extensions::{PaneRenderer, PolylineOptions, PolylineRenderer};
use chart_polyline::render::{
    Color, DrawCommand, DrawingSurface, LineStrokeStyle, PixelRatio, RecordingSurface,
    StrokeStyle,
};
use chart_polyline::ChartError;

fn draw(renderer: &PolylineRenderer, ratio: PixelRatio) -> RecordingSurface {
    let mut surface = RecordingSurface::new(ratio);
    renderer.draw(&mut surface).expect("draw polyline");
    surface
}

#[test]
fn empty_state_draws_nothing() {
    let renderer = PolylineRenderer::new(Vec::new(), None, PolylineOptions::default());
    assert!(draw(&renderer, PixelRatio::IDENTITY).is_empty());
}

#[test]
fn preview_only_draws_single_marker_and_no_segments() {
    let renderer = PolylineRenderer::new(
        Vec::new(),
        Some(ViewPoint::new(40.0, 60.0)),
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    assert_eq!(surface.segment_count(), 0);
    assert_eq!(surface.marker_centers(), vec![PixelPoint::new(40.0, 60.0)]);
    assert!(
        !surface
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Stroke))
    );
}

#[test]
fn unresolved_preview_without_points_draws_nothing() {
    let renderer = PolylineRenderer::new(
        Vec::new(),
        Some(ViewPoint::UNRESOLVED),
        PolylineOptions::default(),
    );
    assert!(draw(&renderer, PixelRatio::IDENTITY).is_empty());
}

#[test]
fn single_committed_point_draws_marker_without_stroke() {
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(10.0, 20.0)],
        None,
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    assert!(surface.stroked_paths().is_empty());
    assert_eq!(surface.marker_centers(), vec![PixelPoint::new(10.0, 20.0)]);
}

#[test]
fn preview_point_extends_path_but_gets_no_marker() {
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(10.0, 20.0), ViewPoint::new(30.0, 40.0)],
        Some(ViewPoint::new(50.0, 10.0)),
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    assert_eq!(
        surface.stroked_paths(),
        vec![vec![
            PixelPoint::new(10.0, 20.0),
            PixelPoint::new(30.0, 40.0),
            PixelPoint::new(50.0, 10.0),
        ]]
    );
    assert_eq!(surface.marker_centers().len(), 2);
}

#[test]
fn unresolved_vertices_are_skipped_and_neighbours_connected() {
    let renderer = PolylineRenderer::new(
        vec![
            ViewPoint::new(10.0, 10.0),
            ViewPoint::UNRESOLVED,
            ViewPoint {
                x: Some(20.0),
                y: None,
            },
            ViewPoint::new(30.0, 30.0),
        ],
        None,
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    assert_eq!(
        surface.stroked_paths(),
        vec![vec![PixelPoint::new(10.0, 10.0), PixelPoint::new(30.0, 30.0)]]
    );
    assert_eq!(
        surface.marker_centers(),
        vec![PixelPoint::new(10.0, 10.0), PixelPoint::new(30.0, 30.0)]
    );
}

#[test]
fn non_finite_projection_counts_as_unresolved() {
    let renderer = PolylineRenderer::new(
        vec![
            ViewPoint::new(f64::NAN, 10.0),
            ViewPoint::new(5.0, 5.0),
            ViewPoint::new(15.0, f64::INFINITY),
        ],
        None,
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    assert!(surface.stroked_paths().is_empty());
    assert_eq!(surface.marker_centers(), vec![PixelPoint::new(5.0, 5.0)]);
}

#[test]
fn pixel_ratio_scales_rounds_and_widens() {
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(10.4, 20.2), ViewPoint::new(30.0, 40.0)],
        None,
        PolylineOptions::default(),
    );
    let surface = draw(&renderer, PixelRatio::uniform(2.0));

    assert_eq!(
        surface.stroked_paths(),
        vec![vec![PixelPoint::new(21.0, 40.0), PixelPoint::new(60.0, 80.0)]]
    );
    let stroke = surface.last_stroke().expect("stroke state");
    assert_relative_eq!(stroke.width, 4.0);
    assert!(!stroke.is_dashed());

    let radii: Vec<f64> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillCircle { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii, vec![8.0, 8.0]);
}

#[test]
fn dashed_style_emits_scaled_dash_pattern() {
    let options = PolylineOptions {
        line_style: LineStrokeStyle::Dashed,
        ..PolylineOptions::default()
    };
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(0.0, 0.0), ViewPoint::new(10.0, 0.0)],
        None,
        options,
    );
    let surface = draw(&renderer, PixelRatio::uniform(1.5));

    let stroke = surface.last_stroke().expect("stroke state");
    assert_eq!(stroke.dash.as_slice(), &[7.5, 7.5]);
}

#[test]
fn custom_dash_pattern_is_used_when_dashed() {
    let options = PolylineOptions {
        line_style: LineStrokeStyle::Dashed,
        dash_pattern: Some([2.0, 1.0, 4.0].into_iter().collect()),
        ..PolylineOptions::default()
    };
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(0.0, 0.0), ViewPoint::new(10.0, 0.0)],
        None,
        options,
    );
    let surface = draw(&renderer, PixelRatio::IDENTITY);

    let stroke = surface.last_stroke().expect("stroke state");
    assert_eq!(stroke.dash.as_slice(), &[2.0, 1.0, 4.0]);
}

#[test]
fn stroke_is_configured_before_path_and_markers_follow() {
    let options = PolylineOptions {
        line_color: Color::from_css("#ff0000").expect("line color"),
        point_color: Color::from_css("#00ff00").expect("point color"),
        ..PolylineOptions::default()
    };
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(1.0, 2.0), ViewPoint::new(3.0, 4.0)],
        None,
        options.clone(),
    );
    let commands = draw(&renderer, PixelRatio::IDENTITY).into_commands();

    assert_eq!(
        commands,
        vec![
            DrawCommand::SetStroke {
                stroke: StrokeStyle::solid(options.line_color, 2.0),
            },
            DrawCommand::BeginPath,
            DrawCommand::MoveTo { x: 1.0, y: 2.0 },
            DrawCommand::LineTo { x: 3.0, y: 4.0 },
            DrawCommand::Stroke,
            DrawCommand::FillCircle {
                x: 1.0,
                y: 2.0,
                radius: 4.0,
                color: options.point_color,
            },
            DrawCommand::FillCircle {
                x: 3.0,
                y: 4.0,
                radius: 4.0,
                color: options.point_color,
            },
        ]
    );
}

struct FailingSurface;

impl DrawingSurface for FailingSurface {
    fn pixel_ratio(&self) -> PixelRatio {
        PixelRatio::IDENTITY
    }

    fn set_stroke(&mut self, _stroke: &StrokeStyle) -> chart_polyline::ChartResult<()> {
        Err(ChartError::Backend("surface lost".to_owned()))
    }

    fn begin_path(&mut self) {}

    fn move_to(&mut self, _x: f64, _y: f64) {}

    fn line_to(&mut self, _x: f64, _y: f64) {}

    fn stroke(&mut self) -> chart_polyline::ChartResult<()> {
        Ok(())
    }

    fn fill_circle(
        &mut self,
        _center_x: f64,
        _center_y: f64,
        _radius: f64,
        _color: Color,
    ) -> chart_polyline::ChartResult<()> {
        Ok(())
    }
}

#[test]
fn surface_errors_are_forwarded() {
    let renderer = PolylineRenderer::new(
        vec![ViewPoint::new(0.0, 0.0), ViewPoint::new(10.0, 0.0)],
        None,
        PolylineOptions::default(),
    );
    let err = renderer
        .draw(&mut FailingSurface)
        .expect_err("backend failure must surface");
    assert!(matches!(err, ChartError::Backend(_)));
}
