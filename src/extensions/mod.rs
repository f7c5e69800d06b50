//! Host contracts and the overlays built on them.
//!
//! Overlays only talk to the chart through the traits in `plugins`, so any
//! host that implements them can carry a drawing tool.

pub mod plugins;
pub mod polyline;

pub use plugins::{
    AttachedParams, ChartApi, PaneRenderer, PaneView, RequestUpdate, SeriesApi, SeriesPrimitive,
};
pub use polyline::{
    PolylineOptions, PolylineOptionsPatch, PolylinePaneView, PolylineRenderer, PolylineState,
    PolylineTool,
};
