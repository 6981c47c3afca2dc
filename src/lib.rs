//! Browser-intercept - a default-browser shim driven by per-host rules.
//!
//! This library provides the core functionality for browser-intercept, including:
//! - Parsing the line-oriented rule file
//! - Folding matching rules into a browser selection and query filters
//! - Filtering query parameters and rebuilding the URL
//! - Launching the selected browser
//!
//! # Example
//!
//! ```no_run
//! use browser_intercept::config::default_config_path;
//! use browser_intercept::exec::launch_browser;
//! use browser_intercept::selection::find_browser_selection;
//!
//! let config_path = default_config_path().unwrap();
//! let selection = find_browser_selection(&config_path, "https://example.com/?utm_source=x").unwrap();
//!
//! if let Some(browser) = &selection.browser {
//!     launch_browser(browser, &selection.url).unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod rules;
pub mod selection;

pub use error::{InterceptError, Result};
