use crate::error::{InterceptError, Result};
use std::path::PathBuf;

/// File name of the rule file inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "browser-intercept.config";

/// Get the path to the user's rule file.
///
/// This lives in the application data directory: `%APPDATA%` on Windows,
/// `$XDG_CONFIG_HOME` (falling back to `~/.config`) everywhere else,
/// including macOS.
pub fn default_config_path() -> Result<PathBuf> {
	let config_dir = app_data_dir().ok_or(InterceptError::ConfigDirectoryNotFound)?;
	Ok(config_dir.join(CONFIG_FILE_NAME))
}

#[cfg(not(target_os = "macos"))]
fn app_data_dir() -> Option<PathBuf> {
	dirs::config_dir()
}

// `dirs` maps macOS to `~/Library/Application Support`; the rule file lives
// in the XDG location there too.
#[cfg(target_os = "macos")]
fn app_data_dir() -> Option<PathBuf> {
	std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.filter(|dir| dir.is_absolute())
		.or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}
