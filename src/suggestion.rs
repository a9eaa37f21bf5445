use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Which backend produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
	Metadata,
	History,
}

impl fmt::Display for SuggestionSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Metadata => f.write_str("metadata"),
			Self::History => f.write_str("history"),
		}
	}
}

/// Deduplication key of a suggestion.
///
/// The two backends identify results differently. Keeping the kind in the key
/// means a record id can never collide with a URL that happens to spell the
/// same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SuggestionIdentity {
	/// Destination URL of a visit metadata observation.
	Url(String),
	/// Identifier of a full-text history record.
	Record(String),
}

impl fmt::Display for SuggestionIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Url(url) => write!(f, "url:{url}"),
			Self::Record(id) => write!(f, "record:{id}"),
		}
	}
}

/// A single ranked destination handed to the address bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
	provider_id: Uuid,
	identity: SuggestionIdentity,
	destination_url: String,
	title: Option<String>,
	score: f64,
	editable: bool,
	group_label: Option<String>,
	source: SuggestionSource,
}

impl Suggestion {
	#[must_use]
	pub fn provider_id(&self) -> Uuid {
		self.provider_id
	}

	#[must_use]
	pub fn identity(&self) -> &SuggestionIdentity {
		&self.identity
	}

	#[must_use]
	pub fn destination_url(&self) -> &str {
		&self.destination_url
	}

	#[must_use]
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	#[must_use]
	pub fn score(&self) -> f64 {
		self.score
	}

	/// Whether the UI may let the user edit the URL before navigating.
	#[must_use]
	pub fn editable(&self) -> bool {
		self.editable
	}

	#[must_use]
	pub fn group_label(&self) -> Option<&str> {
		self.group_label.as_deref()
	}

	#[must_use]
	pub fn source(&self) -> SuggestionSource {
		self.source
	}

	/// A copy of this suggestion ranked at `score`.
	#[must_use]
	pub fn with_score(self, score: f64) -> Self {
		Self { score, ..self }
	}
}

/// Per-provider fields stamped onto every suggestion it builds.
///
/// Both backends go through [`SuggestionTemplate::build`] so the two result
/// sets share one shape before they are merged.
#[derive(Debug, Clone)]
pub(crate) struct SuggestionTemplate {
	pub(crate) provider_id: Uuid,
	pub(crate) editable: bool,
	pub(crate) group_label: Option<String>,
}

impl SuggestionTemplate {
	pub(crate) fn build(
		&self,
		source: SuggestionSource,
		identity: SuggestionIdentity,
		destination_url: String,
		title: Option<String>,
		score: f64,
	) -> Suggestion {
		Suggestion {
			provider_id: self.provider_id,
			identity,
			destination_url,
			title,
			score,
			editable: self.editable,
			group_label: self.group_label.clone(),
			source,
		}
	}
}
