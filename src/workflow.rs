use std::sync::Arc;

use anyhow::{Context, Result};
use histmerge::api::{
	BackendError, ConnectionWarmer, HostFilter, InMemoryHistoryStorage, InMemoryMetadataStorage,
};
use histmerge::{CombinedHistoryProvider, Suggestion};
use tracing::info;

use crate::settings::ResolvedConfig;
use crate::snapshot;

/// Suggestions produced for one query typed into the CLI.
#[derive(Debug)]
pub(crate) struct QueryReport {
	pub(crate) query: String,
	pub(crate) generation: u64,
	pub(crate) suggestions: Vec<Suggestion>,
}

/// Logs the connection a browser engine would open for the top suggestion.
struct LoggingWarmer;

impl ConnectionWarmer for LoggingWarmer {
	fn prewarm_connection(&self, url: &str) -> Result<(), BackendError> {
		info!(url, "pre-warming connection");
		Ok(())
	}
}

/// Feeds queries through a provider backed by a history snapshot.
pub(crate) struct SuggestWorkflow {
	provider: CombinedHistoryProvider,
}

impl SuggestWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let provider = ProviderFactory::build(config)?;
		Ok(Self { provider })
	}

	/// Run every query in order and return one report per query.
	pub(crate) fn run<I, S>(&self, queries: I) -> Result<Vec<QueryReport>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut reports = Vec::new();
		for query in queries {
			let query = query.as_ref();
			let result = self
				.provider
				.on_query_changed(query)
				.with_context(|| format!("suggestion request for '{query}' failed"))?;
			reports.push(QueryReport {
				query: query.to_string(),
				generation: result.generation(),
				suggestions: result.into_suggestions(),
			});
		}
		Ok(reports)
	}
}

/// Helper for translating resolved configuration into a configured provider.
struct ProviderFactory;

impl ProviderFactory {
	fn build(config: ResolvedConfig) -> Result<CombinedHistoryProvider> {
		let ResolvedConfig {
			snapshot,
			limit,
			host_filter,
			header,
			editable,
		} = config;

		let snapshot = snapshot::load(&snapshot)?;
		let host_filter = host_filter
			.as_deref()
			.map(HostFilter::parse)
			.transpose()
			.context("invalid host filter")?;

		let history = Arc::new(InMemoryHistoryStorage::new(snapshot.history));
		let metadata = Arc::new(InMemoryMetadataStorage::new(snapshot.metadata));

		Ok(CombinedHistoryProvider::builder(history, metadata)
			.with_warmer(Arc::new(LoggingWarmer))
			.with_max_suggestions(limit)
			.with_host_filter(host_filter)
			.with_group_label(header)
			.with_editable(editable)
			.build())
	}
}
