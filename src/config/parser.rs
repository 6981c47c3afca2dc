use crate::config::types::{Action, Rule, RuleAction};
use crate::error::{InterceptError, Result};
use regex::Regex;
use std::path::Path;

/// Minimum number of fields on a rule line: action, domain, one parameter.
const MIN_FIELDS: usize = 3;

/// Load all rules from the config file at `path`.
///
/// Returns `Ok(None)` when there is no config file, which callers treat as
/// "no rules, pass the URL through".
pub fn parse_config_file(path: &Path) -> Result<Option<Vec<Rule>>> {
	match read_config_text(path)? {
		Some(content) => parse_config_str(&content).map(Some),
		None => Ok(None),
	}
}

/// Read the config file as text, or `Ok(None)` if there is no file.
///
/// Invalid UTF-8 is replaced rather than rejected; the affected lines are
/// then skipped like any other malformed line.
pub fn read_config_text(path: &Path) -> Result<Option<String>> {
	if !path.is_file() {
		tracing::debug!("no config file at {}", path.display());
		return Ok(None);
	}

	let bytes = std::fs::read(path).map_err(|source| InterceptError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// The rule lines of a config text: everything before the first empty line.
pub fn rule_lines(content: &str) -> impl Iterator<Item = &str> {
	content.lines().take_while(|line| !line.is_empty())
}

/// Parse rules from config text (useful for testing).
///
/// Lines that do not form a rule are skipped; a malformed domain regex is
/// an error. Reading stops at the first empty line.
pub fn parse_config_str(content: &str) -> Result<Vec<Rule>> {
	let mut rules = Vec::new();
	for line in rule_lines(content) {
		if let Some(rule) = parse_rule(line)? {
			rules.push(rule);
		}
	}
	Ok(rules)
}

/// Split a line into its delimiter and fields.
///
/// The first character is the delimiter for this line only. Runs of
/// consecutive delimiters never produce empty fields.
pub fn tokenize(line: &str) -> Option<(char, Vec<&str>)> {
	let delimiter = line.chars().next()?;
	let remainder = &line[delimiter.len_utf8()..];
	let fields = remainder
		.split(delimiter)
		.filter(|field| !field.is_empty())
		.collect();
	Some((delimiter, fields))
}

/// Parse one config line into a rule.
///
/// Structural problems (empty line, too few fields, unknown action) yield
/// `Ok(None)`. Only an invalid domain regex is an error.
pub fn parse_rule(line: &str) -> Result<Option<Rule>> {
	let Some((delimiter, fields)) = tokenize(line) else {
		return Ok(None);
	};

	if fields.len() < MIN_FIELDS {
		tracing::debug!(line, "skipping rule with {} fields", fields.len());
		return Ok(None);
	}

	let action: Action = match fields[0].parse() {
		Ok(action) => action,
		Err(reason) => {
			tracing::debug!(line, "skipping rule: {reason}");
			return Ok(None);
		}
	};

	let domain = compile_regex(fields[1])?;
	let parameters = fields[2..].iter().map(|field| field.to_string()).collect();

	Ok(Some(Rule {
		delimiter,
		domain,
		action: RuleAction::new(action, parameters),
	}))
}

/// Compile a regex pattern string.
pub fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| InterceptError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_empty_line() {
		assert!(parse_rule("").unwrap().is_none());
	}

	#[test]
	fn test_parse_delimiter_only() {
		assert!(parse_rule("|").unwrap().is_none());
	}

	#[test]
	fn test_tokenize_without_repeated_delimiter() {
		let (delimiter, fields) = tokenize("|map example.com firefox").unwrap();
		assert_eq!(delimiter, '|');
		assert_eq!(fields, ["map example.com firefox"]);
		assert!(parse_rule("|map example.com firefox").unwrap().is_none());
	}

	#[test]
	fn test_tokenize_collapses_consecutive_delimiters() {
		let (_, fields) = tokenize("||map|||example|a||b|").unwrap();
		assert_eq!(fields, ["map", "example", "a", "b"]);
	}

	#[test]
	fn test_parse_too_few_fields() {
		assert!(parse_rule("|map|example.com").unwrap().is_none());
	}

	#[test]
	fn test_parse_unknown_action() {
		assert!(parse_rule("|open|example.com|/bin/sh").unwrap().is_none());
		assert!(parse_rule("|MAP|example.com|/bin/sh").unwrap().is_none());
	}

	#[test]
	fn test_parse_map_rule() {
		let rule = parse_rule(r"|map|.*example\.com|/usr/bin/firefox|/usr/bin/chromium")
			.unwrap()
			.unwrap();
		assert_eq!(rule.delimiter, '|');
		assert_eq!(rule.domain.as_str(), r".*example\.com");
		assert_eq!(
			rule.action,
			RuleAction::Map {
				browsers: vec!["/usr/bin/firefox".to_string(), "/usr/bin/chromium".to_string()],
			}
		);
	}

	#[test]
	fn test_parse_query_rules() {
		let exclude = parse_rule("|exclude_query|twitter.com|^s$|^t$")
			.unwrap()
			.unwrap();
		assert_eq!(exclude.action.action(), Action::ExcludeQuery);
		assert_eq!(exclude.parameters(), ["^s$", "^t$"]);

		let include = parse_rule("|include_query|twitter.com|^s$")
			.unwrap()
			.unwrap();
		assert_eq!(include.action.action(), Action::IncludeQuery);
	}

	#[test]
	fn test_parse_invalid_domain_regex() {
		let result = parse_rule("|map|[invalid|/bin/sh");
		match result.unwrap_err() {
			InterceptError::InvalidRegex { pattern, .. } => {
				assert_eq!(pattern, "[invalid");
			}
			_ => panic!("Expected InvalidRegex error"),
		}
	}

	#[test]
	fn test_parse_query_patterns_are_not_compiled() {
		// Parameter patterns are compiled when the rule is applied.
		let rule = parse_rule("|exclude_query|example.com|[invalid").unwrap();
		assert!(rule.is_some());
	}

	#[test]
	fn test_delimiter_independence() {
		let pipe = parse_rule(r"|exclude_query|.*example\.com|^utm_.*|^ref$")
			.unwrap()
			.unwrap();
		let comma = parse_rule(r",exclude_query,.*example\.com,^utm_.*,^ref$")
			.unwrap()
			.unwrap();
		assert_eq!(pipe, comma);
		assert_ne!(pipe.delimiter, comma.delimiter);
	}

	#[test]
	fn test_multibyte_delimiter() {
		let rule = parse_rule("§map§example.com§/bin/sh").unwrap().unwrap();
		assert_eq!(rule.delimiter, '§');
		assert_eq!(rule.parameters(), ["/bin/sh"]);
	}

	#[test]
	fn test_tokenization_round_trip() {
		let lines = [
			r"|map|.*example\.com|/usr/bin/firefox",
			",exclude_query,twitter.com,^s$,^t$",
			";include_query;.*;^id$",
		];
		for line in lines {
			let rule = parse_rule(line).unwrap().unwrap();
			assert_eq!(rule.to_string(), line);

			let (delimiter, fields) = tokenize(line).unwrap();
			let joined = rule.parameters().join(&delimiter.to_string());
			assert_eq!(joined, fields[2..].join(&delimiter.to_string()));
		}
	}

	#[test]
	fn test_parse_config_str_skips_invalid_lines() {
		let content = "\
|map|example.com|/usr/bin/firefox
garbage
|unknown|example.com|x
,exclude_query,example.com,^utm_.*\r
";
		let rules = parse_config_str(content).unwrap();
		assert_eq!(rules.len(), 2);
		assert_eq!(rules[0].action.action(), Action::Map);
		assert_eq!(rules[1].parameters(), ["^utm_.*"]);
	}

	#[test]
	fn test_parse_config_str_stops_at_empty_line() {
		let content = "\
|map|example.com|/usr/bin/firefox
,exclude_query,example.com,^utm_.*

|include_query|example.com|^utm_source$
";
		let rules = parse_config_str(content).unwrap();
		assert_eq!(rules.len(), 2);
		assert_eq!(rules[1].action.action(), Action::ExcludeQuery);

		// Not even compiled once reading has stopped.
		assert!(parse_config_str("\n|map|[invalid|/bin/sh").unwrap().is_empty());
	}

	#[test]
	fn test_rule_lines_handles_crlf_blank_line() {
		let lines: Vec<_> = rule_lines("|a|b|c\r\n\r\n|d|e|f\r\n").collect();
		assert_eq!(lines, ["|a|b|c"]);
	}

	#[test]
	fn test_parse_config_file_missing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("browser-intercept.config");
		assert!(parse_config_file(&path).unwrap().is_none());
	}

	#[test]
	fn test_parse_config_file_directory_is_not_a_config() {
		let temp_dir = tempfile::tempdir().unwrap();
		assert!(parse_config_file(temp_dir.path()).unwrap().is_none());
	}

	#[test]
	fn test_parse_config_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("browser-intercept.config");
		std::fs::write(&path, "|map|example.com|/usr/bin/firefox\n").unwrap();

		let rules = parse_config_file(&path).unwrap().unwrap();
		assert_eq!(rules.len(), 1);
	}

	#[test]
	fn test_parse_config_file_with_invalid_utf8() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("browser-intercept.config");
		std::fs::write(&path, b"caf\xe9 note\n|map|example.com|/usr/bin/firefox\n").unwrap();

		let rules = parse_config_file(&path).unwrap().unwrap();
		assert_eq!(rules.len(), 1);
		assert_eq!(rules[0].parameters(), ["/usr/bin/firefox"]);
	}
}
