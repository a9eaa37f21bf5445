use serde::Deserialize;

use histmerge::DEFAULT_COMBINED_SUGGESTION_LIMIT;

use crate::cli::CliArgs;

use super::super::util::sanitize_label;

/// `[suggestions]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SuggestionsSection {
    pub(super) limit: Option<usize>,
    pub(super) host_filter: Option<String>,
    pub(super) header: Option<String>,
    pub(super) editable: Option<bool>,
}

/// Suggestion settings with defaults filled in.
pub(super) struct SuggestionSettings {
    pub(super) limit: usize,
    pub(super) host_filter: Option<String>,
    pub(super) header: Option<String>,
    pub(super) editable: bool,
}

impl SuggestionsSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.limit {
            self.limit = Some(value);
        }
        if let Some(value) = cli.host_filter.clone() {
            self.host_filter = Some(value);
        }
        if let Some(value) = cli.header.clone() {
            self.header = Some(value);
        }
        if let Some(value) = cli.editable {
            self.editable = Some(value);
        }
    }

    pub(super) fn finalize(self) -> SuggestionSettings {
        SuggestionSettings {
            limit: self.limit.unwrap_or(DEFAULT_COMBINED_SUGGESTION_LIMIT),
            host_filter: self
                .host_filter
                .map(|filter| filter.trim().to_string())
                .filter(|filter| !filter.is_empty()),
            header: sanitize_label(self.header),
            editable: self.editable.unwrap_or(true),
        }
    }
}
