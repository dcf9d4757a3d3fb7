//! Tracing setup for hosts embedding `chart-scale`.
//!
//! Engines emit `trace!` events per division, `debug!` events under the
//! `chart_scale::log` target when logarithmic bounds get clamped, and
//! `warn!` events when a scale width overflows. Hosts either call
//! `init_default_tracing` or install their own subscriber.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling
/// back to `warn`.
///
/// Needs the `telemetry` feature. Returns `false` when the feature is off or
/// the host already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
