use histmerge::api::HostFilterError;
use thiserror::Error;

use super::SettingSource;

pub(crate) const LIMIT_KEY: &str = "suggestions.limit";
pub(crate) const HOST_FILTER_KEY: &str = "suggestions.host_filter";

/// A resolved setting the provider cannot run with, plus where it came from.
#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
    pub(crate) key: &'static str,
    pub(crate) value: String,
    pub(crate) origin: SettingSource,
    pub(crate) reason: String,
}

impl ConfigError {
    pub(crate) fn zero_limit(origin: SettingSource) -> Self {
        Self {
            key: LIMIT_KEY,
            value: "0".into(),
            origin,
            reason: "must be greater than zero".into(),
        }
    }

    pub(crate) fn host_filter(value: &str, origin: SettingSource, err: &HostFilterError) -> Self {
        Self {
            key: HOST_FILTER_KEY,
            value: value.to_string(),
            origin,
            reason: err.to_string(),
        }
    }
}
