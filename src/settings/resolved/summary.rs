use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	print!("{}", format_summary(config));
}

fn format_summary(config: &ResolvedConfig) -> String {
	let mut out = String::from("Effective configuration:\n");
	out.push_str(&format!("  Snapshot: {}\n", config.snapshot.display()));
	out.push_str(&format!("  Suggestion limit: {}\n", config.limit));
	out.push_str(&format!(
		"  Host filter: {}\n",
		config.host_filter.as_deref().unwrap_or("(any site)")
	));
	out.push_str(&format!(
		"  Header: {}\n",
		config.header.as_deref().unwrap_or("(none)")
	));
	out.push_str(&format!("  Editable: {}\n", bool_to_word(config.editable)));
	out
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
