use std::rc::Rc;

use chart_polyline::api::{ChartHost, ChartHostConfig};
use chart_polyline::core::{
    LogicalPoint, PriceScale, TimeScale, ViewPoint, Viewport, project_points,
};
use chart_polyline::extensions::{
    ChartApi, PaneRenderer, PolylineOptions, PolylineRenderer, SeriesApi,
};
use chart_polyline::render::{PixelRatio, RecordingSurface};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_points(count: usize) -> Vec<LogicalPoint> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            LogicalPoint::new(t, 100.0 + (t / 25.0).sin() * 40.0)
        })
        .collect()
}

fn bench_projection_10k(c: &mut Criterion) {
    let time_scale = TimeScale::new(0.0, 10_000.0).expect("valid time scale");
    let price_scale = PriceScale::new(0.0, 200.0).expect("valid price scale");
    let points = generated_points(10_000);

    c.bench_function("polyline_projection_10k", |b| {
        b.iter(|| {
            let projected = project_points(
                black_box(&points),
                |time| time_scale.time_to_pixel(time, 1920.0),
                |price| price_scale.price_to_pixel(price, 1080.0),
            );
            black_box(projected);
        })
    });
}

fn bench_host_projection_10k(c: &mut Criterion) {
    let config = ChartHostConfig::new(Viewport::new(1920, 1080), 0.0, 10_000.0)
        .with_price_domain(0.0, 200.0);
    let host = ChartHost::new(config).expect("host init");
    let chart: Rc<dyn ChartApi> = host.clone();
    let series: Rc<dyn SeriesApi> = host;
    let points = generated_points(10_000);

    c.bench_function("polyline_host_projection_10k", |b| {
        b.iter(|| {
            let projected = project_points(
                black_box(&points),
                |time| chart.time_to_coordinate(time),
                |price| series.price_to_coordinate(price),
            );
            black_box(projected);
        })
    });
}

fn bench_draw_10k(c: &mut Criterion) {
    let points: Vec<ViewPoint> = (0..10_000)
        .map(|i| ViewPoint::new(f64::from(i) * 0.19, 540.0 + (f64::from(i) / 30.0).cos() * 200.0))
        .collect();
    let renderer = PolylineRenderer::new(
        points,
        Some(ViewPoint::new(1900.0, 100.0)),
        PolylineOptions::default(),
    );

    c.bench_function("polyline_draw_10k", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new(PixelRatio::uniform(2.0));
            renderer.draw(&mut surface).expect("draw");
            black_box(surface);
        })
    });
}

criterion_group!(
    benches,
    bench_projection_10k,
    bench_host_projection_10k,
    bench_draw_10k
);
criterion_main!(benches);
