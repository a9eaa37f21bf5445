use clap::{CommandFactory, FromArgMatches, Parser};

use super::{CliArgs, OutputFormat};

#[test]
fn command_is_well_formed() {
	let command = CliArgs::command();
	assert!(command.get_about().is_some());
	command.debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["histmerge"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert!(parsed.queries.is_empty());
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn queries_and_flags_are_collected() {
	let parsed = CliArgs::try_parse_from([
		"histmerge", "-vv", "--limit", "3", "--host", "https://example.com", "--editable",
		"false", "-o", "json", "m", "mo", "moz",
	])
	.expect("parses");

	assert_eq!(parsed.queries, vec!["m", "mo", "moz"]);
	assert_eq!(parsed.limit, Some(3));
	assert_eq!(parsed.host_filter.as_deref(), Some("https://example.com"));
	assert_eq!(parsed.editable, Some(false));
	assert_eq!(parsed.output, OutputFormat::Json);
	assert_eq!(parsed.verbose, 2);
}

#[test]
fn negative_limit_is_rejected() {
	assert!(CliArgs::try_parse_from(["histmerge", "--limit", "-5"]).is_err());
}
