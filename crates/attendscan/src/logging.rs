//! Logging configuration for attendscan.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! rendered display so it can be piped.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output the CLI asked for (`-q`, default, `-v`, `-vv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Lookups started, their outcomes, and clears.
    #[default]
    Normal,
    /// Adds cancelled scans and discarded stale completions.
    Verbose,
    /// Everything down to trace events.
    Trace,
}

impl Verbosity {
    /// The `tracing` level this verbosity maps to.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level())
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG`, when set and parseable, replaces the verbosity directive.
///
/// # Examples
///
/// ```no_run
/// use attendscan::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    // Already set when called twice (tests); keep the first subscriber.
    let _ = subscriber.try_init();
}
