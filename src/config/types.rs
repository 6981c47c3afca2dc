use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// The action named by the first field of a rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	/// Select the first existing executable among the parameters.
	Map,
	/// Drop query parameters whose keys match any of the parameters.
	ExcludeQuery,
	/// Keep query parameters whose keys match, even if excluded earlier.
	IncludeQuery,
}

impl Action {
	/// Get the name used for this action in the rule file.
	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Map => "map",
			Action::ExcludeQuery => "exclude_query",
			Action::IncludeQuery => "include_query",
		}
	}
}

impl FromStr for Action {
	type Err = String;

	/// Exact, case-sensitive match on the action name.
	fn from_str(name: &str) -> Result<Self, Self::Err> {
		match name {
			"map" => Ok(Action::Map),
			"exclude_query" => Ok(Action::ExcludeQuery),
			"include_query" => Ok(Action::IncludeQuery),
			other => Err(format!("unknown action: {other}")),
		}
	}
}

/// What a rule does once its domain pattern matches the target host.
///
/// Every variant keeps its parameters verbatim as they appeared in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
	/// Candidate browser executables, first existing file wins.
	Map { browsers: Vec<String> },

	/// Query key patterns to exclude.
	ExcludeQuery { patterns: Vec<String> },

	/// Query key patterns to re-include.
	IncludeQuery { patterns: Vec<String> },
}

impl RuleAction {
	/// Build the variant for `action` from its parameter tokens.
	pub fn new(action: Action, parameters: Vec<String>) -> Self {
		match action {
			Action::Map => RuleAction::Map {
				browsers: parameters,
			},
			Action::ExcludeQuery => RuleAction::ExcludeQuery {
				patterns: parameters,
			},
			Action::IncludeQuery => RuleAction::IncludeQuery {
				patterns: parameters,
			},
		}
	}

	pub fn action(&self) -> Action {
		match self {
			RuleAction::Map { .. } => Action::Map,
			RuleAction::ExcludeQuery { .. } => Action::ExcludeQuery,
			RuleAction::IncludeQuery { .. } => Action::IncludeQuery,
		}
	}

	pub fn parameters(&self) -> &[String] {
		match self {
			RuleAction::Map { browsers } => browsers,
			RuleAction::ExcludeQuery { patterns } | RuleAction::IncludeQuery { patterns } => {
				patterns
			}
		}
	}
}

/// One parsed line of the rule file.
#[derive(Debug, Clone)]
pub struct Rule {
	/// The field delimiter this line was written with.
	pub delimiter: char,

	/// Regex searched for in the target URL's host.
	pub domain: Regex,

	/// The action and its parameters.
	pub action: RuleAction,
}

impl Rule {
	pub fn parameters(&self) -> &[String] {
		self.action.parameters()
	}

	/// Check whether this rule applies to `host` (search, not full match).
	pub fn matches_host(&self, host: &str) -> bool {
		self.domain.is_match(host)
	}
}

/// Rules compare by content; the delimiter a line happened to use is ignored.
impl PartialEq for Rule {
	fn eq(&self, other: &Self) -> bool {
		self.domain.as_str() == other.domain.as_str() && self.action == other.action
	}
}

impl Eq for Rule {}

/// Re-serialize the rule as a config line using its own delimiter.
impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let d = self.delimiter;
		write!(f, "{d}{}{d}{}", self.action.action().as_str(), self.domain)?;
		for parameter in self.parameters() {
			write!(f, "{d}{parameter}")?;
		}
		Ok(())
	}
}
