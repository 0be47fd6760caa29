//! Diagnostic logging for the command-line tools.
//!
//! Console reports are written directly to stdout/stderr; `tracing` events carry the
//! structured detail (request timing, skipped values, downgraded failures) and always go to
//! stderr so they never mix with a captured token.

// crates.io
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";
/// Filter used when `RUST_LOG` is unset and verbose output was requested.
pub const VERBOSE_FILTER: &str = "warn,radosgw_oidc=debug";

/// Filter directives for the given verbosity, honouring `RUST_LOG` first.
pub fn env_filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
}

/// Install the global subscriber; a second call is a no-op.
pub fn init_tracing(verbose: bool) {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter(verbose))
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.try_init();
}
