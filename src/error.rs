use histmerge_provider_api::BackendError;
use thiserror::Error;

use crate::suggestion::SuggestionSource;

/// Reasons a suggestion request can fail.
///
/// Both fetches must succeed for a merge to happen, so a single failing
/// backend fails the whole request.
#[derive(Debug, Error)]
pub enum SuggestionError {
	/// A backend returned an error for its ranked read.
	#[error("{backend} backend failed")]
	Backend {
		backend: SuggestionSource,
		#[source]
		source: BackendError,
	},

	/// A fetch worker panicked before producing results.
	#[error("{backend} fetch panicked")]
	FetchPanicked { backend: SuggestionSource },
}

impl SuggestionError {
	/// Backend branch that produced the failure.
	#[must_use]
	pub fn backend(&self) -> SuggestionSource {
		match self {
			Self::Backend { backend, .. } | Self::FetchPanicked { backend } => *backend,
		}
	}

	/// Whether the failure only means a newer query superseded this one.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Backend { source, .. } if source.is_cancelled())
	}
}
