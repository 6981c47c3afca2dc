//! Rule file loading and parsing for browser-intercept.
//!
//! This module handles:
//! - Locating the rule file in the application data directory
//! - Tokenizing delimiter-separated rule lines
//! - The rule data model

pub mod location;
pub mod parser;
pub mod types;

pub use location::{CONFIG_FILE_NAME, default_config_path};
pub use parser::{
	compile_regex, parse_config_file, parse_config_str, parse_rule, read_config_text, rule_lines,
	tokenize,
};
pub use types::{Action, Rule, RuleAction};
