use anyhow::Result;
use serde_json::json;

use crate::workflow::QueryReport;

/// Print a plain-text listing of the suggestions for each report.
pub(crate) fn print_plain(reports: &[QueryReport]) {
	print!("{}", format_plain(reports));
}

pub(crate) fn format_plain(reports: &[QueryReport]) -> String {
	let mut out = String::new();
	for report in reports {
		if reports.len() > 1 {
			out.push_str(&format!("> {}\n", report.query));
		}
		if report.suggestions.is_empty() {
			out.push_str("No suggestions\n");
			continue;
		}
		if let Some(label) = report.suggestions[0].group_label() {
			out.push_str(&format!("{label}\n"));
		}
		for suggestion in &report.suggestions {
			out.push_str(&format!(
				"{:>8.2}  {:<8}  {}",
				suggestion.score(),
				suggestion.source().to_string(),
				suggestion.destination_url()
			));
			if let Some(title) = suggestion.title() {
				out.push_str(&format!("  ({title})"));
			}
			out.push('\n');
		}
	}
	out
}

/// Format the reports as a JSON string.
pub(crate) fn format_reports_json(reports: &[QueryReport]) -> Result<String> {
	let payload: Vec<serde_json::Value> = reports
		.iter()
		.map(|report| {
			json!({
				"query": report.query,
				"generation": report.generation,
				"suggestions": report.suggestions,
			})
		})
		.collect();

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the reports.
pub(crate) fn print_json(reports: &[QueryReport]) -> Result<()> {
	println!("{}", format_reports_json(reports)?);
	Ok(())
}
