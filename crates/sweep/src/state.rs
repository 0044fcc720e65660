//! Durable best-fare state.
//!
//! One small JSON file holding the cheapest fare ever recorded. A missing
//! or corrupt file reads as "no prior best" — startup must survive it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use common::types::Candidate;
use common::Result;

/// The persisted historical best.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestState {
    /// Null until a qualifying candidate has ever been recorded.
    pub best_total: Option<f64>,
    pub best_offer: Option<Candidate>,
    /// ISO-8601 timestamp of the last write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Load/save slot for [`BestState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted best, falling back to an empty state on any error.
    pub fn load(&self) -> BestState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BestState::default(),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return BestState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "Corrupt state file {} ({}), starting fresh",
                    self.path.display(),
                    e
                );
                BestState::default()
            }
        }
    }

    /// Persist the given state, pretty-printed. serde_json leaves non-ASCII
    /// characters unescaped, which keeps airline names readable in the file.
    pub fn save(&self, state: &BestState) -> Result<()> {
        let body = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}
