//! Click-to-place polyline overlay.
//!
//! Pointer event → `PolylineTool` (pixel → logical through the host's inverse
//! mappings) → `PolylineState` mutated → repaint request → `PolylinePaneView`
//! re-projects (logical → pixel) → `PolylineRenderer` paints.

mod options;
mod pane_view;
mod renderer;
mod state;
mod tool;

pub use options::{DEFAULT_DASH_PATTERN, DashPattern, PolylineOptions, PolylineOptionsPatch};
pub use pane_view::PolylinePaneView;
pub use renderer::PolylineRenderer;
pub use state::PolylineState;
pub use tool::PolylineTool;
