//! Browser launching for browser-intercept.
//!
//! The launch is fire-and-forget: the child inherits stdio and is never
//! waited on, so its exit status is not part of our own.

use crate::error::{InterceptError, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Spawn `browser` with `url` as its only argument.
pub fn launch_browser(browser: &Path, url: &str) -> Result<Child> {
	tracing::info!(browser = %browser.display(), url, "launching browser");

	Command::new(browser)
		.arg(url)
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit())
		.spawn()
		.map_err(|source| InterceptError::LaunchFailed {
			browser: browser.to_path_buf(),
			source,
		})
}
