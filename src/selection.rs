use crate::config::parser::parse_config_file;
use crate::error::{InterceptError, Result};
use crate::rules::{evaluate, filter_query, query_pairs, rebuild_url};
use std::path::{Path, PathBuf};
use url::Url;

/// The browser to launch and the URL to hand it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
	/// Executable chosen by the rules; `None` means nothing is launched.
	pub browser: Option<PathBuf>,

	/// The URL after query filtering.
	pub url: String,
}

/// Resolve which browser should open `url_arg` and how the URL is rewritten.
///
/// Without a config file the URL is passed through verbatim, unparsed, with
/// no browser selected. Everything that can fail (URL parsing, regex
/// compilation, reading the file) happens here, before any launch.
pub fn find_browser_selection(config_path: &Path, url_arg: &str) -> Result<Selection> {
	let Some(rules) = parse_config_file(config_path)? else {
		return Ok(Selection {
			browser: None,
			url: url_arg.to_string(),
		});
	};
	tracing::debug!("loaded {} rules from {}", rules.len(), config_path.display());

	let url = Url::parse(url_arg).map_err(|source| InterceptError::InvalidUrl {
		url: url_arg.to_string(),
		source,
	})?;
	let host = url.host_str().unwrap_or_default();

	let state = evaluate(&rules, host)?;

	let pairs = query_pairs(&url);
	let kept = filter_query(&pairs, &state.query_filters);
	if kept.len() != pairs.len() {
		tracing::debug!("dropped {} query parameters", pairs.len() - kept.len());
	}

	Ok(Selection {
		browser: state.selected_browser,
		url: rebuild_url(&url, &kept),
	})
}
