//! chart-polyline: interactive polyline drawing overlay for time/price charts.
//!
//! The crate keeps a polyline's logical vertices (time, price) in sync with
//! their pixel projection while the host chart pans, zooms or resizes, and
//! turns host pointer notifications into committed vertices and a live
//! preview segment.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartHost, ChartHostConfig};
pub use error::{ChartError, ChartResult};
pub use extensions::{PolylineOptions, PolylineOptionsPatch, PolylineTool};
