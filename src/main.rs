mod cli;
mod settings;
mod snapshot;
mod workflow;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use histmerge::logging;
use settings::ResolvedConfig;
use workflow::SuggestWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(logging::directive_for_verbosity(cli.verbose));

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_queries(&cli, resolved)
}

/// Feed the queries through the provider and print output in the chosen format.
fn run_queries(cli: &CliArgs, settings: ResolvedConfig) -> Result<()> {
	let workflow = SuggestWorkflow::from_config(settings)?;
	let queries: Vec<&str> = if cli.queries.is_empty() {
		vec![""]
	} else {
		cli.queries.iter().map(String::as_str).collect()
	};

	let mut reports = workflow.run(queries)?;
	if !cli.all {
		reports = reports.split_off(reports.len().saturating_sub(1));
	}

	match cli.output {
		OutputFormat::Plain => print_plain(&reports),
		OutputFormat::Json => print_json(&reports)?,
	}

	Ok(())
}
