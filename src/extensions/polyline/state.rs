use serde::{Deserialize, Serialize};

use crate::core::LogicalPoint;
use crate::extensions::polyline::{PolylineOptions, PolylineOptionsPatch};

/// Logical content of one polyline: committed vertices in click order, the
/// optional preview vertex and the style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylineState {
    points: Vec<LogicalPoint>,
    temp_point: Option<LogicalPoint>,
    options: PolylineOptions,
}

impl PolylineState {
    #[must_use]
    pub fn new(options: PolylineOptions) -> Self {
        Self {
            points: Vec::new(),
            temp_point: None,
            options,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[LogicalPoint] {
        &self.points
    }

    #[must_use]
    pub fn temp_point(&self) -> Option<LogicalPoint> {
        self.temp_point
    }

    #[must_use]
    pub fn options(&self) -> &PolylineOptions {
        &self.options
    }

    pub fn push_point(&mut self, point: LogicalPoint) {
        self.points.push(point);
    }

    pub fn set_temp_point(&mut self, point: Option<LogicalPoint>) {
        self.temp_point = point;
    }

    /// Drops every committed point and the preview point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.temp_point = None;
    }

    pub fn apply_options(&mut self, patch: PolylineOptionsPatch) {
        self.options.merge(patch);
    }
}
