use serde::{Deserialize, Serialize};

/// A page visit as ranked by the full-text history index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Backend-assigned record identifier.
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Relevance assigned by the backend. Higher is better.
    pub score: f64,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
            score,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Identifies the destination a metadata observation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryMetadataKey {
    pub url: String,
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub referrer_url: Option<String>,
}

/// Kind of document a metadata observation was recorded for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Regular,
    Media,
}

/// Recency and frequency weighted observation from the visit metadata index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMetadataRecord {
    pub key: HistoryMetadataKey,
    #[serde(default)]
    pub title: Option<String>,
    /// Accumulated time the page was in view, in milliseconds.
    #[serde(default)]
    pub total_view_time: u64,
    #[serde(default)]
    pub document_type: DocumentType,
}

impl HistoryMetadataRecord {
    #[must_use]
    pub fn new(url: impl Into<String>, total_view_time: u64) -> Self {
        Self {
            key: HistoryMetadataKey {
                url: url.into(),
                search_term: None,
                referrer_url: None,
            },
            title: None,
            total_view_time,
            document_type: DocumentType::Regular,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Destination of the observation.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.key.url
    }

    /// Records that were never actually viewed carry no relevance signal.
    #[must_use]
    pub fn was_viewed(&self) -> bool {
        self.total_view_time > 0
    }
}
