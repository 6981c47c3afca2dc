use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use browser_intercept::config::{
	RuleAction, compile_regex, default_config_path, parse_rule, read_config_text, rule_lines,
};
use browser_intercept::exec::launch_browser;
use browser_intercept::logging::init_logging;
use browser_intercept::selection::find_browser_selection;

#[derive(Parser)]
#[command(name = "browser-intercept")]
#[command(
	author,
	version,
	about = "Opens URLs in a browser chosen by per-host rules, dropping unwanted query parameters"
)]
struct Cli {
	/// Rule file to use instead of the one in the application data directory
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Print the selected browser and rewritten URL instead of launching
	#[arg(long)]
	dry_run: bool,

	/// Check the rule file for errors without opening anything
	#[arg(long, conflicts_with_all = ["url", "dry_run"])]
	validate: bool,

	/// URL to open
	url: Option<String>,
}

fn main() -> ExitCode {
	init_logging();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if cli.validate {
		let config_path = resolve_config_path(cli.config)?;
		return handle_validate(&config_path);
	}

	// Nothing to open.
	let Some(url) = cli.url else {
		return Ok(ExitCode::SUCCESS);
	};

	let config_path = resolve_config_path(cli.config)?;
	handle_url(&config_path, &url, cli.dry_run)
}

fn resolve_config_path(config: Option<PathBuf>) -> Result<PathBuf> {
	match config {
		Some(path) => Ok(path),
		None => default_config_path().context("Failed to locate rule file"),
	}
}

fn handle_url(config_path: &Path, url: &str, dry_run: bool) -> Result<ExitCode> {
	let selection = find_browser_selection(config_path, url)
		.with_context(|| format!("Failed to resolve browser for {url}"))?;

	if dry_run {
		match &selection.browser {
			Some(browser) => println!("browser: {}", browser.display()),
			None => println!("browser: (none)"),
		}
		println!("url: {}", selection.url);
		return Ok(ExitCode::SUCCESS);
	}

	match &selection.browser {
		Some(browser) => {
			launch_browser(browser, &selection.url)
				.with_context(|| format!("Failed to open {}", selection.url))?;
		}
		None => tracing::info!(url = %selection.url, "no browser selected, nothing to launch"),
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_validate(config_path: &Path) -> Result<ExitCode> {
	let Some(content) = read_config_text(config_path)
		.with_context(|| format!("Failed to read {}", config_path.display()))?
	else {
		println!("No configuration file found at {}", config_path.display());
		return Ok(ExitCode::SUCCESS);
	};

	let mut rules = Vec::new();
	let mut skipped = Vec::new();

	for (index, line) in rule_lines(&content).enumerate() {
		let line_number = index + 1;
		let rule = parse_rule(line)
			.with_context(|| format!("{}:{line_number}", config_path.display()))?;

		match rule {
			Some(rule) => {
				// Query patterns are normally compiled lazily; check them all here.
				if let RuleAction::ExcludeQuery { patterns } | RuleAction::IncludeQuery { patterns } =
					&rule.action
				{
					for pattern in patterns {
						compile_regex(pattern)
							.with_context(|| format!("{}:{line_number}", config_path.display()))?;
					}
				}
				rules.push((line_number, rule));
			}
			None => skipped.push(line_number),
		}
	}

	println!("{} ({} rules)", config_path.display(), rules.len());
	for (line_number, rule) in &rules {
		println!("  {line_number}: {rule}");
	}

	if !skipped.is_empty() {
		let lines: Vec<String> = skipped.iter().map(|n| n.to_string()).collect();
		println!("Skipped lines: {}", lines.join(", "));
	}

	let read = rules.len() + skipped.len();
	if content.lines().skip(read).any(|line| !line.is_empty()) {
		println!("Lines after empty line {} are ignored", read + 1);
	}

	Ok(ExitCode::SUCCESS)
}
