use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use histmerge::app_dirs;

use crate::cli::CliArgs;

/// `[data]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct DataSection {
    pub(super) snapshot: Option<PathBuf>,
}

impl DataSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.snapshot.clone() {
            self.snapshot = Some(path);
        }
    }

    /// Absolute path of the snapshot to load.
    pub(super) fn resolve(self) -> Result<PathBuf> {
        let snapshot = match self.snapshot {
            Some(path) => path,
            None => app_dirs::default_snapshot_path()?,
        };
        if snapshot.is_relative() {
            return Ok(env::current_dir()
                .context("failed to resolve current directory for snapshot")?
                .join(snapshot));
        }
        Ok(snapshot)
    }
}
