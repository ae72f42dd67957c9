//! Tracing setup for applications embedding `feedchart`.
//!
//! The crate only emits `tracing` events. Hosts either install their own
//! subscriber or, with the `telemetry` feature, call one of the helpers below.

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_directive("info")
}

/// Same as [`init_default_tracing`] with an explicit fallback directive such
/// as `"feedchart=debug"`, used when `RUST_LOG` is unset or invalid.
#[must_use]
pub fn init_tracing_with_default_directive(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
