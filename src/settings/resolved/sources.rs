use std::fmt;

use super::errors::{HOST_FILTER_KEY, LIMIT_KEY};

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) limit: Option<SettingSource>,
	pub(crate) host_filter: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_limit(&self) -> SettingSource {
		self.limit
			.clone()
			.unwrap_or(SettingSource::ConfigKey(LIMIT_KEY))
	}

	pub(crate) fn source_for_host_filter(&self) -> SettingSource {
		self.host_filter
			.clone()
			.unwrap_or(SettingSource::ConfigKey(HOST_FILTER_KEY))
	}
}
