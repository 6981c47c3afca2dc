use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Initialize structured logging to stderr.
///
/// stdout is reserved for `--dry-run` and `--validate` output. `RUST_LOG`
/// overrides the default filter, e.g. `RUST_LOG=browser_intercept=debug`.
pub fn init_logging() {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.with_target(false)
		.init();
}
