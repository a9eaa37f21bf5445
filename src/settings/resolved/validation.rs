use histmerge::api::HostFilter;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.limit == 0 {
		return Err(ConfigError::zero_limit(sources.source_for_limit()));
	}

	if let Some(filter) = &config.host_filter
		&& let Err(err) = HostFilter::parse(filter)
	{
		return Err(ConfigError::host_filter(
			filter,
			sources.source_for_host_filter(),
			&err,
		));
	}

	Ok(())
}
