use std::sync::Arc;

use quiz_core::model::{SessionState, Snapshot, SnapshotError};
use storage::repository::KeyValueStore;
use tracing::{debug, warn};

use crate::error::ProgressError;

/// What the store currently holds under the progress key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredProgress {
    Missing,
    Valid(SessionState),
    Corrupted(SnapshotError),
}

/// Saves, restores and clears the in-progress attempt.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored snapshot with `state`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if encoding or the store write fails.
    pub async fn save_progress(&self, state: &SessionState) -> Result<(), ProgressError> {
        let encoded = serde_json::to_string(&state.snapshot())?;
        self.store.set(&self.key, &encoded).await?;
        debug!(
            key = %self.key,
            index = state.current_index(),
            answered = state.answered_count(),
            "progress saved"
        );
        Ok(())
    }

    /// Read the stored snapshot without acting on it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read.
    pub async fn inspect(&self, question_count: usize) -> Result<StoredProgress, ProgressError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(StoredProgress::Missing);
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                return Ok(StoredProgress::Corrupted(SnapshotError::Malformed(
                    err.to_string(),
                )));
            }
        };

        Ok(match SessionState::from_snapshot(snapshot, question_count) {
            Ok(state) => StoredProgress::Valid(state),
            Err(err) => StoredProgress::Corrupted(err),
        })
    }

    /// Restore a saved attempt, if there is a usable one.
    ///
    /// A corrupted snapshot is logged, removed and reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store cannot be read or the
    /// corrupted entry cannot be removed.
    pub async fn load_progress(
        &self,
        question_count: usize,
    ) -> Result<Option<SessionState>, ProgressError> {
        match self.inspect(question_count).await? {
            StoredProgress::Missing => Ok(None),
            StoredProgress::Valid(state) => Ok(Some(state)),
            StoredProgress::Corrupted(err) => {
                warn!(key = %self.key, error = %err, "discarding unreadable progress");
                self.clear_progress().await?;
                Ok(None)
            }
        }
    }

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the store write fails.
    pub async fn clear_progress(&self) -> Result<(), ProgressError> {
        self.store.remove(&self.key).await?;
        debug!(key = %self.key, "progress cleared");
        Ok(())
    }
}
