use crate::core::{LogicalPoint, TimeValue, ViewPoint};

/// Projects one logical point through host-supplied axis mappings.
///
/// If either mapping reports the value as not representable the result is
/// `ViewPoint::UNRESOLVED`; both coordinates are dropped together so a
/// half-resolved point can never reach a renderer.
#[must_use]
pub fn project_point<T, P>(point: LogicalPoint, time_to_x: T, price_to_y: P) -> ViewPoint
where
    T: Fn(TimeValue) -> Option<f64>,
    P: Fn(f64) -> Option<f64>,
{
    match (time_to_x(point.time), price_to_y(point.price)) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => ViewPoint::new(x, y),
        _ => ViewPoint::UNRESOLVED,
    }
}

/// Projects a full point sequence, preserving length and order.
#[must_use]
pub fn project_points<T, P>(points: &[LogicalPoint], time_to_x: T, price_to_y: P) -> Vec<ViewPoint>
where
    T: Fn(TimeValue) -> Option<f64>,
    P: Fn(f64) -> Option<f64>,
{
    points
        .iter()
        .map(|point| project_point(*point, &time_to_x, &price_to_y))
        .collect()
}
