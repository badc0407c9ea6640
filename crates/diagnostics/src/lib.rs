//! Simple diagnostics library for the seeder workspace
//!
//! Provides lightweight, configurable logging across all crates in the project.
//!
//! Usage:
//! - Set SEEDER_LOG=off - no logs (the library default; binaries may
//!   pick another default with `init_with_default`)
//! - Set SEEDER_LOG=info - one line per uploaded object
//! - Set SEEDER_LOG=debug - bucket checks, planning and worker details

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable that selects the minimum log level.
pub const LOG_ENV: &str = "SEEDER_LOG";

static INIT: Once = Once::new();

/// Map a `SEEDER_LOG` value to a minimum level; `None` disables logging.
///
/// Unknown values fall back to `Info`.
#[must_use]
pub fn parse_level(value: &str) -> Option<emit::Level> {
    match value.to_ascii_lowercase().as_str() {
        "off" | "" => None,
        "debug" => Some(emit::Level::Debug),
        "info" => Some(emit::Level::Info),
        "warn" => Some(emit::Level::Warn),
        "error" => Some(emit::Level::Error),
        _ => Some(emit::Level::Info),
    }
}

/// Level from an optional `SEEDER_LOG` value, using `default` when unset.
#[must_use]
pub fn resolve_level(configured: Option<&str>, default: &str) -> Option<emit::Level> {
    parse_level(configured.unwrap_or(default))
}

/// Initialize diagnostics based on the SEEDER_LOG environment variable
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    init_with_default("off");
}

/// Like [`init_diagnostics`], with `default` used when SEEDER_LOG is unset.
pub fn init_with_default(default: &str) {
    INIT.call_once(|| {
        let configured = std::env::var(LOG_ENV).ok();

        let Some(level) = resolve_level(configured.as_deref(), default) else {
            return;
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime must outlive every emitting thread, including upload workers.
        std::mem::forget(rt);
    });
}

/// Log basic operations (bucket created, object uploaded, run skipped)
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (task counts, worker permits, listing results)
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log warning conditions (skipped sensor records, fallbacks)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures. Per-object upload failures are logged here and counted,
/// they never abort the run.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;
