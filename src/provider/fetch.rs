use histmerge_provider_api::{
	BackendError, HistoryBackend, HistoryMetadataRecord, HistoryRecord, HostFilter,
	MetadataBackend, ReadContext,
};

use super::RESULTS_TO_FILTER_SCALE_FACTOR;
use super::merge::distinct_by;
use crate::suggestion::{Suggestion, SuggestionIdentity, SuggestionSource, SuggestionTemplate};

/// Read limit used while a host filter will discard part of the results.
fn over_fetch_limit(limit: usize) -> usize {
	limit.saturating_mul(RESULTS_TO_FILTER_SCALE_FACTOR)
}

/// Up to `limit` viewed metadata records matching the query, optionally
/// restricted to the filter's site.
pub(super) fn metadata_suggestions(
	backend: &MetadataBackend,
	context: &ReadContext<'_>,
	limit: usize,
	filter: Option<&HostFilter>,
	template: &SuggestionTemplate,
) -> Result<Vec<Suggestion>, BackendError> {
	let records: Vec<HistoryMetadataRecord> = match filter {
		None => backend
			.query_ranked(context, limit)?
			.into_iter()
			.filter(HistoryMetadataRecord::was_viewed)
			.collect(),
		Some(filter) => backend
			.query_ranked(context, over_fetch_limit(limit))?
			.into_iter()
			.filter(|record| record.was_viewed() && filter.matches(record.url()))
			.take(limit)
			.collect(),
	};

	Ok(metadata_into(records, template))
}

/// Up to `limit` history records matching the query, best score first and
/// one per record id, optionally restricted to the filter's site.
pub(super) fn history_suggestions(
	backend: &HistoryBackend,
	context: &ReadContext<'_>,
	limit: usize,
	filter: Option<&HostFilter>,
	template: &SuggestionTemplate,
) -> Result<Vec<Suggestion>, BackendError> {
	let records = match filter {
		None => {
			let mut records = backend.query_ranked(context, limit)?;
			sort_by_score_descending(&mut records);
			distinct_by(records, |record| record.id.clone())
		}
		Some(filter) => {
			let records = backend.query_ranked(context, over_fetch_limit(limit))?;
			let mut records = distinct_by(records, |record| record.id.clone());
			sort_by_score_descending(&mut records);
			records
				.into_iter()
				.filter(|record| filter.matches(&record.url))
				.take(limit)
				.collect()
		}
	};

	Ok(history_into(records, template))
}

/// Stable, so equal scores keep the backend's order.
fn sort_by_score_descending(records: &mut [HistoryRecord]) {
	records.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// The metadata index returns records best first; position becomes the score.
fn metadata_into(records: Vec<HistoryMetadataRecord>, template: &SuggestionTemplate) -> Vec<Suggestion> {
	let size = records.len();
	records
		.into_iter()
		.enumerate()
		.map(|(index, record)| {
			let url = record.key.url;
			template.build(
				SuggestionSource::Metadata,
				SuggestionIdentity::Url(url.clone()),
				url,
				record.title,
				(size - index) as f64,
			)
		})
		.collect()
}

fn history_into(records: Vec<HistoryRecord>, template: &SuggestionTemplate) -> Vec<Suggestion> {
	records
		.into_iter()
		.map(|record| {
			template.build(
				SuggestionSource::History,
				SuggestionIdentity::Record(record.id),
				record.url,
				record.title,
				record.score,
			)
		})
		.collect()
}
