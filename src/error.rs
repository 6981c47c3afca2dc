use std::path::PathBuf;

/// Library-level structured errors for browser-intercept.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid URL: {url}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("Failed to launch browser: {browser}")]
	LaunchFailed {
		browser: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve application data directory")]
	ConfigDirectoryNotFound,
}

/// Result type alias using InterceptError.
pub type Result<T> = std::result::Result<T, InterceptError>;
