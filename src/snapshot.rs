use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use histmerge::api::{HistoryMetadataRecord, HistoryRecord};
use serde::Deserialize;

/// On-disk export of both history indexes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HistorySnapshot {
	pub(crate) history: Vec<HistoryRecord>,
	pub(crate) metadata: Vec<HistoryMetadataRecord>,
}

/// Read a JSON history snapshot from `path`.
pub(crate) fn load(path: &Path) -> Result<HistorySnapshot> {
	let file = File::open(path)
		.with_context(|| format!("failed to open history snapshot {}", path.display()))?;
	serde_json::from_reader(BufReader::new(file))
		.with_context(|| format!("failed to parse history snapshot {}", path.display()))
}
