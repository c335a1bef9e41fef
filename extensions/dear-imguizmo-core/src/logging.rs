//! Logging setup for hosts embedding the gizmo engine
//!
//! The engine itself only emits events through the `guizmo_*` macros. These
//! helpers install a `tracing-subscriber` formatter for applications and tests
//! that do not bring their own.

#[cfg(feature = "tracing")]
const DEFAULT_FILTER: &str = "dear_imguizmo_core=info,warn";

#[cfg(feature = "tracing")]
const DEV_FILTER: &str = "dear_imguizmo_core=trace,info";

/// Initialize a tracing subscriber with sensible defaults.
///
/// `RUST_LOG` wins over the built-in filter when set. Calling this twice is
/// harmless: the second installation attempt is ignored.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Initialize a tracing subscriber with a custom filter
#[cfg(feature = "tracing")]
pub fn init_tracing_with_filter(filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::new(filter);

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Verbose subscriber that also shows per-frame drag traces
#[cfg(feature = "tracing")]
pub fn init_tracing_dev() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEV_FILTER.into());

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

// Fallback implementations when tracing is not available
#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing_with_filter(_filter: &str) {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing_dev() {
    eprintln!("Warning: tracing feature not enabled, logging disabled");
}
