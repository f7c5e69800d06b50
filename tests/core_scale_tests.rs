use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use chart_polyline::core::{
    LinearScale, LogicalPoint, PriceScale, TimeScale, TimeValue, ViewPoint, project_point,
};

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let original = 42.5;
    let px = scale.domain_to_pixel(original, 1000.0).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, 1000.0).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn linear_scale_rejects_degenerate_domain_and_extent() {
    assert!(LinearScale::new(5.0, 5.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());

    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(0.5, 0.0).is_err());
}

#[test]
fn time_scale_maps_only_loaded_times() {
    let mut scale = TimeScale::new(1_700_000_000.0, 1_700_000_600.0).expect("valid scale");

    let inside = TimeValue::from_unix_seconds(1_700_000_300.0);
    let px = scale.time_to_pixel(inside, 1200.0).expect("to pixel");
    assert_relative_eq!(px, 600.0, epsilon = 1e-6);

    let outside = TimeValue::from_unix_seconds(1_700_000_900.0);
    assert!(scale.time_to_pixel(outside, 1200.0).is_none());

    scale
        .set_visible_range(1_700_000_000.0, 1_700_001_200.0)
        .expect("visible range");
    assert!(scale.pixel_to_time(1100.0, 1200.0).is_none());
    assert!(scale.pixel_to_time(100.0, 1200.0).is_some());
}

#[test]
fn time_scale_pan_and_zoom_move_visible_window() {
    let mut scale = TimeScale::new(0.0, 100.0).expect("valid scale");

    scale.pan_by_pixels(100.0, 1000.0).expect("pan");
    let (start, end) = scale.visible_range();
    assert_relative_eq!(start, -10.0, epsilon = 1e-9);
    assert_relative_eq!(end, 90.0, epsilon = 1e-9);

    scale.zoom_by_factor(2.0, 500.0, 1000.0).expect("zoom");
    let (start, end) = scale.visible_range();
    assert_relative_eq!(start, 15.0, epsilon = 1e-9);
    assert_relative_eq!(end, 65.0, epsilon = 1e-9);
    assert_eq!(scale.loaded_range(), (0.0, 100.0));

    assert!(scale.zoom_by_factor(0.0, 500.0, 1000.0).is_err());
}

#[test]
fn price_scale_puts_higher_prices_on_top_unless_inverted() {
    let scale = PriceScale::new(0.0, 50.0).expect("valid scale");
    assert_relative_eq!(scale.price_to_pixel(50.0, 500.0).expect("top"), 0.0);
    assert_relative_eq!(scale.price_to_pixel(0.0, 500.0).expect("bottom"), 500.0);

    let inverted = scale.with_inverted(true);
    assert!(inverted.is_inverted());
    assert_relative_eq!(inverted.price_to_pixel(50.0, 500.0).expect("bottom"), 500.0);

    let recovered = scale.pixel_to_price(125.0, 500.0).expect("from pixel");
    assert_relative_eq!(recovered, 37.5, epsilon = 1e-9);

    assert!(scale.price_to_pixel(10.0, 0.0).is_none());
    assert!(PriceScale::new(1.0, 1.0).is_err());
}

#[test]
fn project_point_requires_both_coordinates() {
    let point = LogicalPoint::new(10.0, 5.0);

    let resolved = project_point(point, |time| Some(time.unix_seconds() * 2.0), |price| {
        Some(price + 1.0)
    });
    assert_eq!(resolved, ViewPoint::new(20.0, 6.0));

    let no_time = project_point(point, |_| None, Some);
    assert_eq!(no_time, ViewPoint::UNRESOLVED);

    let nan_price = project_point(point, |_| Some(1.0), |_| Some(f64::NAN));
    assert_eq!(nan_price, ViewPoint::UNRESOLVED);
}

#[test]
fn logical_point_from_decimal_time_is_supported() {
    let time = Utc
        .timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid ts");
    let point = LogicalPoint::from_decimal_time(time, Decimal::new(12345, 2)).expect("point");

    assert!((point.time.unix_seconds() - 1_700_000_000.0).abs() <= 1e-6);
    assert!((point.price - 123.45).abs() <= 1e-9);
}

#[test]
fn business_day_maps_to_utc_midnight() {
    let time = TimeValue::from_business_day(2024, 1, 2).expect("business day");
    assert_relative_eq!(time.unix_seconds(), 1_704_153_600.0);

    assert!(TimeValue::from_business_day(2023, 2, 29).is_err());
}

#[test]
fn time_values_order_and_serialize_as_plain_numbers() {
    let earlier = TimeValue::from(10.0);
    let later = TimeValue::from(20.5);
    assert!(earlier < later);

    let json = serde_json::to_string(&LogicalPoint::new(later, 3.0)).expect("serialize");
    assert_eq!(json, r#"{"time":20.5,"price":3.0}"#);
}

#[test]
fn linear_scale_reports_its_domain() {
    let scale = LinearScale::new(110.0, 10.0).expect("valid scale");
    assert_eq!(scale.domain(), (110.0, 10.0));
}
