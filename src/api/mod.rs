//! Reference host for overlays.
//!
//! `ChartHost` implements the host contracts from `extensions::plugins` on
//! top of the `core` scales so tools can be driven headless or from a
//! desktop adapter.

mod chart_host;
mod host_config;

pub use chart_host::ChartHost;
pub use host_config::ChartHostConfig;
