use anyhow::{Error, Result};
use serde::Deserialize;
use std::env;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod data;
mod suggestions;

use data::DataSection;
use suggestions::SuggestionsSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    suggestions: SuggestionsSection,
    data: DataSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.suggestions.apply_cli_overrides(cli);
        self.data.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            limit: detect_source(
                cli.limit.is_some(),
                self.suggestions.limit.is_some(),
                "HISTMERGE__SUGGESTIONS__LIMIT",
                "--limit",
                "suggestions.limit",
            ),
            host_filter: detect_source(
                cli.host_filter.is_some(),
                self.suggestions.host_filter.is_some(),
                "HISTMERGE__SUGGESTIONS__HOST_FILTER",
                "--host",
                "suggestions.host_filter",
            ),
        };

        let snapshot = self.data.resolve()?;
        let suggestions = self.suggestions.finalize();

        let config = ResolvedConfig {
            snapshot,
            limit: suggestions.limit,
            host_filter: suggestions.host_filter,
            header: suggestions.header,
            editable: suggestions.editable,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
