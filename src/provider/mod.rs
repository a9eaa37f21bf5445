//! The combined history suggestion provider.
//!
//! Every keystroke fans out to the visit metadata index and the full-text
//! history index on two scoped threads. Once both reads are back the metadata
//! results are re-scored above the best history result, the two lists are
//! concatenated and deduplicated, and the top destination gets a speculative
//! connection.

mod fetch;
mod merge;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, ScopedJoinHandle};

use histmerge_provider_api::{
	BackendError, ConnectionWarmer, HistoryBackend, HostFilter, MetadataBackend, ReadContext,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::SuggestionError;
use crate::suggestion::{Suggestion, SuggestionSource, SuggestionTemplate};

/// Number of suggestions returned when no cap was configured.
pub const DEFAULT_COMBINED_SUGGESTION_LIMIT: usize = 5;

/// Over-fetch factor applied to the cap while a host filter discards results.
pub const RESULTS_TO_FILTER_SCALE_FACTOR: usize = 10;

/// Suggestions produced for one query, tagged with the query's generation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
	generation: u64,
	suggestions: Vec<Suggestion>,
}

impl QueryResult {
	/// Generation of the query that produced these suggestions.
	///
	/// Compare against [`CombinedHistoryProvider::is_latest`] to drop results
	/// of queries that were superseded while they ran.
	#[must_use]
	pub fn generation(&self) -> u64 {
		self.generation
	}

	#[must_use]
	pub fn suggestions(&self) -> &[Suggestion] {
		&self.suggestions
	}

	#[must_use]
	pub fn into_suggestions(self) -> Vec<Suggestion> {
		self.suggestions
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.suggestions.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.suggestions.len()
	}
}

/// Merges visit metadata and full-text history into one ranked list.
///
/// Metadata suggestions come first, followed by history suggestions, up to
/// [`max_suggestions`](Self::max_suggestions) entries without duplicates.
/// The provider may be shared across threads: a new query can start while an
/// older one is still waiting on its backends.
pub struct CombinedHistoryProvider {
	history: Arc<HistoryBackend>,
	metadata: Arc<MetadataBackend>,
	warmer: Option<Arc<dyn ConnectionWarmer>>,
	max_suggestions: AtomicUsize,
	host_filter: Option<HostFilter>,
	template: SuggestionTemplate,
	latest_generation: AtomicU64,
}

impl CombinedHistoryProvider {
	/// Start configuring a provider over the two backends.
	#[must_use]
	pub fn builder(
		history: Arc<HistoryBackend>,
		metadata: Arc<MetadataBackend>,
	) -> CombinedHistoryProviderBuilder {
		CombinedHistoryProviderBuilder::new(history, metadata)
	}

	/// Identifier stamped onto every suggestion from this provider.
	#[must_use]
	pub fn id(&self) -> Uuid {
		self.template.provider_id
	}

	/// Header shown above this provider's suggestions, if any.
	#[must_use]
	pub fn group_title(&self) -> Option<&str> {
		self.template.group_label.as_deref()
	}

	/// Whether the UI may edit suggestions before navigating.
	#[must_use]
	pub fn editable(&self) -> bool {
		self.template.editable
	}

	#[must_use]
	pub fn host_filter(&self) -> Option<&HostFilter> {
		self.host_filter.as_ref()
	}

	/// Get the maximum number of suggestions that will be provided.
	#[must_use]
	pub fn max_suggestions(&self) -> usize {
		self.max_suggestions.load(Ordering::Relaxed)
	}

	/// Set the maximum number of suggestions. Zero is ignored.
	///
	/// Queries already running keep the cap they started with.
	pub fn set_max_suggestions(&self, max: usize) {
		if max == 0 {
			debug!("ignoring a suggestion cap of zero");
			return;
		}

		self.max_suggestions.store(max, Ordering::Relaxed);
	}

	/// Reset the maximum number of suggestions to
	/// [`DEFAULT_COMBINED_SUGGESTION_LIMIT`].
	pub fn reset_max_suggestions(&self) {
		self.max_suggestions
			.store(DEFAULT_COMBINED_SUGGESTION_LIMIT, Ordering::Relaxed);
	}

	/// Whether `generation` belongs to the most recently started query.
	#[must_use]
	pub fn is_latest(&self, generation: u64) -> bool {
		self.latest_generation.load(Ordering::Acquire) == generation
	}

	/// Produce suggestions for the text currently in the address bar.
	///
	/// Outstanding reads of earlier queries are asked to cancel first. Blank
	/// input yields no suggestions without touching either backend. A failure
	/// of either backend fails the whole request; no partial list is returned.
	pub fn on_query_changed(&self, text: &str) -> Result<QueryResult, SuggestionError> {
		let generation = self.latest_generation.fetch_add(1, Ordering::AcqRel) + 1;
		self.history.cancel_reads(text);
		self.metadata.cancel_reads(text);

		if text.trim().is_empty() {
			return Ok(QueryResult {
				generation,
				suggestions: Vec::new(),
			});
		}

		let limit = self.max_suggestions();
		let context = ReadContext::new(text, generation, &self.latest_generation);
		let filter = self.host_filter.as_ref();
		let template = &self.template;
		let history_backend = self.history.as_ref();
		let metadata_backend = self.metadata.as_ref();

		let (metadata, history) = thread::scope(|scope| {
			let metadata = scope.spawn(|| {
				fetch::metadata_suggestions(metadata_backend, &context, limit, filter, template)
			});
			let history = scope.spawn(|| {
				fetch::history_suggestions(history_backend, &context, limit, filter, template)
			});
			(
				joined(metadata, SuggestionSource::Metadata),
				joined(history, SuggestionSource::History),
			)
		});
		let metadata = metadata?;
		let history = history?;

		let metadata_count = metadata.len();
		let history_count = history.len();
		let suggestions = merge::combine(metadata, history, limit);

		if let Some(top) = suggestions.first() {
			self.prewarm(top.destination_url());
		}

		debug!(
			generation,
			limit,
			metadata = metadata_count,
			history = history_count,
			returned = suggestions.len(),
			"combined history suggestions"
		);

		Ok(QueryResult {
			generation,
			suggestions,
		})
	}

	fn prewarm(&self, url: &str) {
		let Some(warmer) = &self.warmer else {
			return;
		};
		match panic::catch_unwind(AssertUnwindSafe(|| warmer.prewarm_connection(url))) {
			Ok(Ok(())) => {}
			Ok(Err(err)) => debug!(url, error = %err, "connection pre-warm failed"),
			Err(_) => warn!(url, "connection pre-warm panicked"),
		}
	}
}

impl std::fmt::Debug for CombinedHistoryProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CombinedHistoryProvider")
			.field("id", &self.id())
			.field("max_suggestions", &self.max_suggestions())
			.field("host_filter", &self.host_filter)
			.field("group_title", &self.group_title())
			.field("editable", &self.editable())
			.finish_non_exhaustive()
	}
}

fn joined(
	handle: ScopedJoinHandle<'_, Result<Vec<Suggestion>, BackendError>>,
	backend: SuggestionSource,
) -> Result<Vec<Suggestion>, SuggestionError> {
	match handle.join() {
		Ok(result) => result.map_err(|source| SuggestionError::Backend { backend, source }),
		Err(_) => Err(SuggestionError::FetchPanicked { backend }),
	}
}

/// Builder for [`CombinedHistoryProvider`].
pub struct CombinedHistoryProviderBuilder {
	history: Arc<HistoryBackend>,
	metadata: Arc<MetadataBackend>,
	warmer: Option<Arc<dyn ConnectionWarmer>>,
	max_suggestions: usize,
	editable: bool,
	group_label: Option<String>,
	host_filter: Option<HostFilter>,
}

impl CombinedHistoryProviderBuilder {
	fn new(history: Arc<HistoryBackend>, metadata: Arc<MetadataBackend>) -> Self {
		Self {
			history,
			metadata,
			warmer: None,
			max_suggestions: DEFAULT_COMBINED_SUGGESTION_LIMIT,
			editable: true,
			group_label: None,
			host_filter: None,
		}
	}

	/// Pre-warm a connection to the top suggestion of every query.
	#[must_use]
	pub fn with_warmer(mut self, warmer: Arc<dyn ConnectionWarmer>) -> Self {
		self.warmer = Some(warmer);
		self
	}

	/// Cap the number of returned suggestions. Zero keeps the current cap.
	#[must_use]
	pub fn with_max_suggestions(mut self, max: usize) -> Self {
		if max > 0 {
			self.max_suggestions = max;
		}
		self
	}

	#[must_use]
	pub fn with_editable(mut self, editable: bool) -> Self {
		self.editable = editable;
		self
	}

	#[must_use]
	pub fn with_group_label(mut self, label: Option<String>) -> Self {
		self.group_label = label;
		self
	}

	/// Only suggest destinations on the filter's site.
	#[must_use]
	pub fn with_host_filter(mut self, filter: Option<HostFilter>) -> Self {
		self.host_filter = filter;
		self
	}

	#[must_use]
	pub fn build(self) -> CombinedHistoryProvider {
		CombinedHistoryProvider {
			history: self.history,
			metadata: self.metadata,
			warmer: self.warmer,
			max_suggestions: AtomicUsize::new(self.max_suggestions),
			host_filter: self.host_filter,
			template: SuggestionTemplate {
				provider_id: Uuid::new_v4(),
				editable: self.editable,
				group_label: self.group_label,
			},
			latest_generation: AtomicU64::new(0),
		}
	}
}

#[cfg(test)]
mod tests;
