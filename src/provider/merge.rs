use std::hash::Hash;

use indexmap::IndexMap;
use tracing::trace;

use crate::suggestion::Suggestion;

/// Keep the first item for every key, preserving order.
pub(super) fn distinct_by<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
	K: Hash + Eq,
	F: Fn(&T) -> K,
{
	let mut seen: IndexMap<K, T> = IndexMap::with_capacity(items.len());
	for item in items {
		seen.entry(key(&item)).or_insert(item);
	}
	seen.into_values().collect()
}

/// Rank every metadata suggestion above `history_top` while keeping their
/// relative order. Without a history result the scores are left alone.
pub(super) fn harmonize(metadata: Vec<Suggestion>, history_top: Option<f64>) -> Vec<Suggestion> {
	let Some(top) = history_top else {
		return metadata;
	};

	let size = metadata.len();
	trace!(size, top, "lifting metadata scores above history");
	metadata
		.into_iter()
		.enumerate()
		.map(|(index, suggestion)| suggestion.with_score((size - index) as f64 + top))
		.collect()
}

/// Metadata first, then history, without duplicate identities, capped at `limit`.
pub(super) fn combine(
	metadata: Vec<Suggestion>,
	history: Vec<Suggestion>,
	limit: usize,
) -> Vec<Suggestion> {
	let history_top = history.first().map(Suggestion::score);
	let mut combined: Vec<Suggestion> = harmonize(metadata, history_top);
	combined.extend(history);

	let mut combined = distinct_by(combined, |suggestion| suggestion.identity().clone());
	combined.truncate(limit);
	combined
}
