use crate::config::parser::compile_regex;
use crate::config::types::{Rule, RuleAction};
use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// One include/exclude decision for query keys matching `pattern`.
#[derive(Debug, Clone)]
pub struct QueryFilter {
	/// Whether matching keys are kept (`true`) or dropped (`false`).
	pub include: bool,

	/// Compiled key pattern.
	pub pattern: Regex,
}

/// Browser selection and query filters accumulated for one target host.
#[derive(Debug, Clone, Default)]
pub struct ResolvedState {
	/// Executable to launch, if any `map` rule resolved to an existing file.
	pub selected_browser: Option<PathBuf>,

	/// Filters in rule order; later entries take precedence per key.
	pub query_filters: Vec<QueryFilter>,
}

impl Rule {
	/// Fold this rule into `state` for the given target host.
	///
	/// Rules whose domain does not match the host return the state untouched.
	/// Query patterns are compiled here, so a malformed one is only an error
	/// for rules that apply.
	pub fn apply(&self, mut state: ResolvedState, host: &str) -> Result<ResolvedState> {
		if !self.matches_host(host) {
			return Ok(state);
		}
		tracing::debug!(rule = %self, host, "rule matched");

		match &self.action {
			RuleAction::Map { browsers } => {
				if let Some(browser) = browsers.iter().find(|b| Path::new(b).is_file()) {
					state.selected_browser = Some(PathBuf::from(browser));
				}
			}
			RuleAction::ExcludeQuery { patterns } => {
				push_filters(&mut state, patterns, false)?;
			}
			RuleAction::IncludeQuery { patterns } => {
				push_filters(&mut state, patterns, true)?;
			}
		}

		Ok(state)
	}
}

fn push_filters(state: &mut ResolvedState, patterns: &[String], include: bool) -> Result<()> {
	for pattern in patterns {
		state.query_filters.push(QueryFilter {
			include,
			pattern: compile_regex(pattern)?,
		});
	}
	Ok(())
}

/// Fold all rules, in file order, into the resolved state for `host`.
pub fn evaluate(rules: &[Rule], host: &str) -> Result<ResolvedState> {
	rules
		.iter()
		.try_fold(ResolvedState::default(), |state, rule| rule.apply(state, host))
}
