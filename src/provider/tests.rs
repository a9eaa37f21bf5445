use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock, Weak};
use std::time::{Duration, Instant};

use histmerge_provider_api::{
	HistoryMetadataRecord, HistoryRecord, InMemoryHistoryStorage, InMemoryMetadataStorage,
	RankedBackend,
};

use super::*;

struct Fixture {
	provider: CombinedHistoryProvider,
	history: Arc<InMemoryHistoryStorage>,
	metadata: Arc<InMemoryMetadataStorage>,
}

fn fixture(history: Vec<HistoryRecord>, metadata: Vec<HistoryMetadataRecord>) -> Fixture {
	fixture_with(history, metadata, |builder| builder)
}

fn fixture_with<F>(
	history: Vec<HistoryRecord>,
	metadata: Vec<HistoryMetadataRecord>,
	configure: F,
) -> Fixture
where
	F: FnOnce(CombinedHistoryProviderBuilder) -> CombinedHistoryProviderBuilder,
{
	let history = Arc::new(InMemoryHistoryStorage::new(history));
	let metadata = Arc::new(InMemoryMetadataStorage::new(metadata));
	let provider = configure(CombinedHistoryProvider::builder(
		history.clone(),
		metadata.clone(),
	))
	.build();
	Fixture {
		provider,
		history,
		metadata,
	}
}

fn scenario_metadata() -> Vec<HistoryMetadataRecord> {
	vec![
		HistoryMetadataRecord::new("https://mozilla.org/meta-1", 1_000),
		HistoryMetadataRecord::new("https://mozilla.org/meta-2", 500),
	]
}

fn scenario_history() -> Vec<HistoryRecord> {
	vec![
		HistoryRecord::new("h3", "https://mozilla.org/h3", 5.0),
		HistoryRecord::new("h1", "https://mozilla.org/h1", 10.0),
		HistoryRecord::new("h2", "https://mozilla.org/h2", 8.0),
	]
}

fn identities(result: &QueryResult) -> Vec<String> {
	result
		.suggestions()
		.iter()
		.map(|suggestion| suggestion.identity().to_string())
		.collect()
}

fn scores(result: &QueryResult) -> Vec<f64> {
	result.suggestions().iter().map(Suggestion::score).collect()
}

/// Delegates to another backend while remembering the last requested limit.
struct LimitProbe<B> {
	inner: B,
	last_limit: AtomicUsize,
}

impl<B> LimitProbe<B> {
	fn new(inner: B) -> Self {
		Self {
			inner,
			last_limit: AtomicUsize::new(0),
		}
	}

	fn last_limit(&self) -> usize {
		self.last_limit.load(Ordering::Relaxed)
	}
}

impl<B: RankedBackend> RankedBackend for LimitProbe<B> {
	type Record = B::Record;

	fn query_ranked(
		&self,
		context: &ReadContext<'_>,
		limit: usize,
	) -> Result<Vec<B::Record>, BackendError> {
		self.last_limit.store(limit, Ordering::Relaxed);
		self.inner.query_ranked(context, limit)
	}

	fn cancel_reads(&self, text: &str) {
		self.inner.cancel_reads(text);
	}
}

struct FailingHistory;

impl RankedBackend for FailingHistory {
	type Record = HistoryRecord;

	fn query_ranked(
		&self,
		_context: &ReadContext<'_>,
		_limit: usize,
	) -> Result<Vec<HistoryRecord>, BackendError> {
		Err(BackendError::unavailable("database is locked"))
	}

	fn cancel_reads(&self, _text: &str) {}
}

struct PanickingMetadata;

impl RankedBackend for PanickingMetadata {
	type Record = HistoryMetadataRecord;

	fn query_ranked(
		&self,
		_context: &ReadContext<'_>,
		_limit: usize,
	) -> Result<Vec<HistoryMetadataRecord>, BackendError> {
		panic!("metadata index corrupted");
	}

	fn cancel_reads(&self, _text: &str) {}
}

/// Blocks reads for `slow_query` until they are superseded.
struct StallingMetadata {
	slow_query: &'static str,
	started: Mutex<mpsc::Sender<()>>,
}

impl RankedBackend for StallingMetadata {
	type Record = HistoryMetadataRecord;

	fn query_ranked(
		&self,
		context: &ReadContext<'_>,
		_limit: usize,
	) -> Result<Vec<HistoryMetadataRecord>, BackendError> {
		if context.text() != self.slow_query {
			return Ok(Vec::new());
		}

		if let Ok(started) = self.started.lock() {
			let _ = started.send(());
		}
		let deadline = Instant::now() + Duration::from_secs(5);
		while Instant::now() < deadline {
			if context.is_superseded() {
				return Err(BackendError::Cancelled {
					query: context.text().to_string(),
				});
			}
			thread::sleep(Duration::from_millis(5));
		}
		Ok(Vec::new())
	}

	fn cancel_reads(&self, _text: &str) {}
}

/// Shrinks the owning provider's cap to one from inside every read.
struct CapShrinkingMetadata {
	inner: InMemoryMetadataStorage,
	provider: OnceLock<Weak<CombinedHistoryProvider>>,
}

impl RankedBackend for CapShrinkingMetadata {
	type Record = HistoryMetadataRecord;

	fn query_ranked(
		&self,
		context: &ReadContext<'_>,
		limit: usize,
	) -> Result<Vec<HistoryMetadataRecord>, BackendError> {
		if let Some(provider) = self.provider.get().and_then(Weak::upgrade) {
			provider.set_max_suggestions(1);
		}
		self.inner.query_ranked(context, limit)
	}

	fn cancel_reads(&self, text: &str) {
		self.inner.cancel_reads(text);
	}
}

struct PanickingWarmer;

impl ConnectionWarmer for PanickingWarmer {
	fn prewarm_connection(&self, _url: &str) -> Result<(), BackendError> {
		panic!("socket pool exhausted");
	}
}

#[derive(Default)]
struct RecordingWarmer {
	urls: Mutex<Vec<String>>,
	fail: bool,
}

impl RecordingWarmer {
	fn urls(&self) -> Vec<String> {
		self.urls.lock().unwrap().clone()
	}
}

impl ConnectionWarmer for RecordingWarmer {
	fn prewarm_connection(&self, url: &str) -> Result<(), BackendError> {
		self.urls.lock().unwrap().push(url.to_string());
		if self.fail {
			return Err(BackendError::Connection {
				url: url.to_string(),
				reason: "offline".into(),
			});
		}
		Ok(())
	}
}

#[test]
fn metadata_is_ranked_above_history() {
	let fixture = fixture(scenario_history(), scenario_metadata());

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(
		identities(&result),
		vec![
			"url:https://mozilla.org/meta-1",
			"url:https://mozilla.org/meta-2",
			"record:h1",
			"record:h2",
			"record:h3",
		]
	);
	assert_eq!(scores(&result), vec![12.0, 11.0, 10.0, 8.0, 5.0]);
	assert_eq!(result.suggestions()[0].source(), SuggestionSource::Metadata);
}

#[test]
fn merged_list_is_truncated_to_cap() {
	let fixture = fixture_with(scenario_history(), scenario_metadata(), |builder| {
		builder.with_max_suggestions(3)
	});

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(
		identities(&result),
		vec![
			"url:https://mozilla.org/meta-1",
			"url:https://mozilla.org/meta-2",
			"record:h1",
		]
	);
}

#[test]
fn blank_query_skips_backends() {
	let fixture = fixture(scenario_history(), scenario_metadata());

	let result = fixture.provider.on_query_changed(" \t ").unwrap();

	assert!(result.is_empty());
	assert_eq!(fixture.history.query_count(), 0);
	assert_eq!(fixture.metadata.query_count(), 0);
	assert_eq!(fixture.history.cancelled_reads(), vec![" \t "]);
	assert_eq!(fixture.metadata.cancelled_reads(), vec![" \t "]);
}

#[test]
fn every_query_cancels_previous_reads_with_new_text() {
	let fixture = fixture(scenario_history(), scenario_metadata());

	fixture.provider.on_query_changed("m").unwrap();
	fixture.provider.on_query_changed("mo").unwrap();

	assert_eq!(fixture.history.cancelled_reads(), vec!["m", "mo"]);
	assert_eq!(fixture.metadata.cancelled_reads(), vec!["m", "mo"]);
}

#[test]
fn metadata_scores_kept_without_history_results() {
	let fixture = fixture(Vec::new(), scenario_metadata());

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(scores(&result), vec![2.0, 1.0]);
}

#[test]
fn unviewed_metadata_is_excluded() {
	let fixture = fixture(
		Vec::new(),
		vec![
			HistoryMetadataRecord::new("https://mozilla.org/never", 0),
			HistoryMetadataRecord::new("https://mozilla.org/seen", 20),
		],
	);

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(identities(&result), vec!["url:https://mozilla.org/seen"]);
}

#[test]
fn duplicate_history_ids_collapse_to_best_score() {
	let fixture = fixture(
		vec![
			HistoryRecord::new("same", "https://mozilla.org/old", 2.0),
			HistoryRecord::new("same", "https://mozilla.org/new", 7.0),
		],
		Vec::new(),
	);

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(result.len(), 1);
	assert_eq!(result.suggestions()[0].destination_url(), "https://mozilla.org/new");
}

#[test]
fn results_never_exceed_cap_or_repeat_identities() {
	let mut history = scenario_history();
	history.push(HistoryRecord::new("h1", "https://mozilla.org/h1", 10.0));
	history.push(HistoryRecord::new("h4", "https://mozilla.org/h4", 1.0));
	let mut metadata = scenario_metadata();
	metadata.push(HistoryMetadataRecord::new("https://mozilla.org/meta-1", 50));
	let fixture = fixture(history, metadata);

	for cap in 1..=8 {
		fixture.provider.set_max_suggestions(cap);
		let result = fixture.provider.on_query_changed("mozilla").unwrap();

		assert!(result.len() <= cap);
		let unique: HashSet<_> = result
			.suggestions()
			.iter()
			.map(|suggestion| suggestion.identity().clone())
			.collect();
		assert_eq!(unique.len(), result.len());
	}
}

#[test]
fn repeated_queries_are_idempotent() {
	let fixture = fixture(scenario_history(), scenario_metadata());

	let first = fixture.provider.on_query_changed("mozilla").unwrap();
	let second = fixture.provider.on_query_changed("mozilla").unwrap();

	assert_eq!(first.suggestions(), second.suggestions());
	assert!(second.generation() > first.generation());
}

#[test]
fn host_filter_keeps_mobile_subdomains_and_over_fetches() {
	let history = Arc::new(LimitProbe::new(InMemoryHistoryStorage::new(vec![
		HistoryRecord::new("other", "https://other.com/page", 50.0),
		HistoryRecord::new("www", "https://www.example.com/page", 3.0),
	])));
	let metadata = Arc::new(LimitProbe::new(InMemoryMetadataStorage::new(vec![
		HistoryMetadataRecord::new("https://m.example.com/page", 10),
		HistoryMetadataRecord::new("https://other.com/page", 10),
		HistoryMetadataRecord::new("https://example.com/unseen", 0),
	])));
	let provider = CombinedHistoryProvider::builder(history.clone(), metadata.clone())
		.with_host_filter(Some(HostFilter::parse("https://example.com").unwrap()))
		.build();

	let result = provider.on_query_changed("page").unwrap();

	assert_eq!(
		identities(&result),
		vec!["url:https://m.example.com/page", "record:www"]
	);
	assert_eq!(history.last_limit(), 50);
	assert_eq!(metadata.last_limit(), 50);
}

#[test]
fn filtered_metadata_is_scored_after_truncation_to_cap() {
	let mut metadata = vec![HistoryMetadataRecord::new("https://other.com/example", 10)];
	metadata.extend(
		(1..=4).map(|index| HistoryMetadataRecord::new(format!("https://example.com/meta-{index}"), 10)),
	);
	let fixture = fixture_with(
		vec![HistoryRecord::new("h", "https://example.com/history", 3.0)],
		metadata,
		|builder| {
			builder
				.with_max_suggestions(3)
				.with_host_filter(Some(HostFilter::parse("https://example.com").unwrap()))
		},
	);

	let result = fixture.provider.on_query_changed("example").unwrap();

	assert_eq!(
		identities(&result),
		vec![
			"url:https://example.com/meta-1",
			"url:https://example.com/meta-2",
			"url:https://example.com/meta-3",
		]
	);
	assert_eq!(scores(&result), vec![6.0, 5.0, 4.0]);
}

#[test]
fn filtered_history_keeps_first_duplicate_before_sorting() {
	let fixture = fixture_with(
		vec![
			HistoryRecord::new("dup", "https://example.com/low", 1.0),
			HistoryRecord::new("dup", "https://example.com/high", 9.0),
			HistoryRecord::new("elsewhere", "https://example.org/page", 20.0),
		],
		Vec::new(),
		|builder| builder.with_host_filter(Some(HostFilter::parse("https://example.com").unwrap())),
	);

	let result = fixture.provider.on_query_changed("example").unwrap();

	assert_eq!(identities(&result), vec!["record:dup"]);
	assert_eq!(result.suggestions()[0].destination_url(), "https://example.com/low");
	assert_eq!(scores(&result), vec![1.0]);
}

#[test]
fn unfiltered_reads_request_exactly_the_cap() {
	let history = Arc::new(LimitProbe::new(InMemoryHistoryStorage::default()));
	let metadata = Arc::new(LimitProbe::new(InMemoryMetadataStorage::default()));
	let provider = CombinedHistoryProvider::builder(history.clone(), metadata.clone())
		.with_max_suggestions(7)
		.build();

	provider.on_query_changed("anything").unwrap();

	assert_eq!(history.last_limit(), 7);
	assert_eq!(metadata.last_limit(), 7);
}

#[test]
fn backend_failure_fails_the_request() {
	let metadata = Arc::new(InMemoryMetadataStorage::new(scenario_metadata()));
	let provider = CombinedHistoryProvider::builder(Arc::new(FailingHistory), metadata).build();

	let err = provider.on_query_changed("moz").unwrap_err();

	assert_eq!(err.backend(), SuggestionSource::History);
	assert!(!err.is_cancelled());
	assert!(matches!(
		err,
		SuggestionError::Backend {
			source: BackendError::Unavailable { .. },
			..
		}
	));
}

#[test]
fn panicking_fetch_is_reported() {
	let history = Arc::new(InMemoryHistoryStorage::new(scenario_history()));
	let provider = CombinedHistoryProvider::builder(history, Arc::new(PanickingMetadata)).build();

	let err = provider.on_query_changed("moz").unwrap_err();

	assert!(matches!(
		err,
		SuggestionError::FetchPanicked {
			backend: SuggestionSource::Metadata
		}
	));
}

#[test]
fn newer_query_cancels_stalled_read() {
	let (started_tx, started_rx) = mpsc::channel();
	let metadata = Arc::new(StallingMetadata {
		slow_query: "slow",
		started: Mutex::new(started_tx),
	});
	let history = Arc::new(InMemoryHistoryStorage::new(scenario_history()));
	let provider = Arc::new(CombinedHistoryProvider::builder(history, metadata).build());

	let background = {
		let provider = Arc::clone(&provider);
		thread::spawn(move || provider.on_query_changed("slow"))
	};
	started_rx
		.recv_timeout(Duration::from_secs(5))
		.expect("slow read started");

	let fresh = provider.on_query_changed("mozilla").unwrap();
	let stale = background.join().expect("background query finished");

	assert!(stale.unwrap_err().is_cancelled());
	assert!(provider.is_latest(fresh.generation()));
	assert_eq!(fresh.len(), 3);
}

#[test]
fn top_result_is_prewarmed() {
	let warmer = Arc::new(RecordingWarmer::default());
	let fixture = fixture_with(scenario_history(), scenario_metadata(), |builder| {
		builder.with_warmer(warmer.clone())
	});

	fixture.provider.on_query_changed("moz").unwrap();
	fixture.provider.on_query_changed("   ").unwrap();

	assert_eq!(warmer.urls(), vec!["https://mozilla.org/meta-1"]);
}

#[test]
fn prewarm_failure_is_ignored() {
	let warmer = Arc::new(RecordingWarmer {
		fail: true,
		..RecordingWarmer::default()
	});
	let fixture = fixture_with(scenario_history(), Vec::new(), |builder| {
		builder.with_warmer(warmer.clone())
	});

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(result.len(), 3);
	assert_eq!(warmer.urls(), vec!["https://mozilla.org/h1"]);
}

#[test]
fn panicking_warmer_does_not_fail_the_query() {
	let fixture = fixture_with(scenario_history(), scenario_metadata(), |builder| {
		builder.with_warmer(Arc::new(PanickingWarmer))
	});

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(result.len(), 5);
	assert!(fixture.provider.on_query_changed("mozilla").is_ok());
}

#[test]
fn nothing_is_prewarmed_without_results() {
	let warmer = Arc::new(RecordingWarmer::default());
	let fixture = fixture_with(Vec::new(), Vec::new(), |builder| {
		builder.with_warmer(warmer.clone())
	});

	assert!(fixture.provider.on_query_changed("moz").unwrap().is_empty());
	assert!(warmer.urls().is_empty());
}

#[test]
fn configuration_is_stamped_on_every_suggestion() {
	let fixture = fixture_with(scenario_history(), scenario_metadata(), |builder| {
		builder
			.with_editable(false)
			.with_group_label(Some("Recent history".into()))
	});

	let result = fixture.provider.on_query_changed("moz").unwrap();

	assert_eq!(fixture.provider.group_title(), Some("Recent history"));
	for suggestion in result.suggestions() {
		assert!(!suggestion.editable());
		assert_eq!(suggestion.group_label(), Some("Recent history"));
		assert_eq!(suggestion.provider_id(), fixture.provider.id());
	}
}

#[test]
fn invalid_caps_are_ignored() {
	let fixture = fixture(Vec::new(), Vec::new());
	assert_eq!(fixture.provider.max_suggestions(), DEFAULT_COMBINED_SUGGESTION_LIMIT);

	fixture.provider.set_max_suggestions(0);
	assert_eq!(fixture.provider.max_suggestions(), 5);

	fixture.provider.set_max_suggestions(3);
	assert_eq!(fixture.provider.max_suggestions(), 3);

	fixture.provider.reset_max_suggestions();
	assert_eq!(fixture.provider.max_suggestions(), 5);
}

#[test]
fn cap_is_read_once_per_query() {
	let metadata = Arc::new(CapShrinkingMetadata {
		inner: InMemoryMetadataStorage::new(
			(1..=6)
				.map(|index| HistoryMetadataRecord::new(format!("https://mozilla.org/meta-{index}"), 10))
				.collect(),
		),
		provider: OnceLock::new(),
	});
	let history = Arc::new(InMemoryHistoryStorage::default());
	let provider = Arc::new(CombinedHistoryProvider::builder(history, metadata.clone()).build());
	assert!(metadata.provider.set(Arc::downgrade(&provider)).is_ok());

	let first = provider.on_query_changed("mozilla").unwrap();
	assert_eq!(first.len(), DEFAULT_COMBINED_SUGGESTION_LIMIT);
	assert_eq!(provider.max_suggestions(), 1);

	let second = provider.on_query_changed("mozilla").unwrap();
	assert_eq!(second.len(), 1);
}

#[test]
fn replaced_backend_data_shows_up_on_next_query() {
	let fixture = fixture(scenario_history(), Vec::new());
	let before = fixture.provider.on_query_changed("mozilla").unwrap();
	assert_eq!(identities(&before), vec!["record:h1", "record:h2", "record:h3"]);

	fixture
		.metadata
		.replace(vec![HistoryMetadataRecord::new("https://mozilla.org/fresh", 30)])
		.unwrap();
	fixture
		.history
		.replace(vec![HistoryRecord::new("h9", "https://mozilla.org/h9", 4.0)])
		.unwrap();

	let after = fixture.provider.on_query_changed("mozilla").unwrap();
	let again = fixture.provider.on_query_changed("mozilla").unwrap();
	assert_eq!(identities(&after), vec!["url:https://mozilla.org/fresh", "record:h9"]);
	assert_eq!(scores(&after), vec![5.0, 4.0]);
	assert_eq!(after.suggestions(), again.suggestions());
}

#[test]
fn builder_ignores_zero_cap() {
	let fixture = fixture_with(Vec::new(), Vec::new(), |builder| {
		builder.with_max_suggestions(0)
	});
	assert_eq!(fixture.provider.max_suggestions(), DEFAULT_COMBINED_SUGGESTION_LIMIT);
}

#[test]
fn providers_get_distinct_ids() {
	let first = fixture(Vec::new(), Vec::new());
	let second = fixture(Vec::new(), Vec::new());
	assert_ne!(first.provider.id(), second.provider.id());
}
