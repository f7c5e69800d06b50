//! Telemetry helpers for applications embedding `chart-polyline`.
//!
//! Every diagnostic in this crate is a `tracing` event, so the host chooses
//! the sink: install a subscriber to collect them, or install none and they
//! are dropped. Tool behavior never depends on whether tracing is enabled.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Filter that surfaces every ignored click and pointer transition.
pub const INTERACTION_TRACE_FILTER: &str = "info,chart_polyline=trace";

/// Initializes a compact `tracing` subscriber with `DEFAULT_FILTER`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is
/// enabled. `RUST_LOG` takes precedence over `fallback_filter`.
///
/// Returns `false` when no initialization is performed (feature disabled) or
/// if a global subscriber was already set by the host application.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter)),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
