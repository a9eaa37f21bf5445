use anyhow::{Context, Result};
use tracing::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Layer config files and `HISTMERGE__*` variables, apply CLI flags on top,
/// then resolve and validate the provider settings.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw: RawConfig = build_config(cli)?
		.try_deserialize()
		.context("failed to deserialize histmerge configuration")?;
	raw.apply_cli_overrides(cli);
	let config = raw.resolve(cli)?;
	debug!(
		snapshot = %config.snapshot.display(),
		limit = config.limit,
		host_filter = config.host_filter.as_deref(),
		"resolved configuration"
	);
	Ok(config)
}
