use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use guide_core::Clock;
use guide_core::model::{ProgressError, ProgressState, StepCatalog, StepId};
use storage::repository::{ProgressRecord, ProgressRepository, StorageError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Whether progress changes are still being written to storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    Durable,
    /// Storage failed earlier in this session; changes stay in memory.
    MemoryOnly,
}

/// Full completed set to write, tagged with the mutation that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSnapshot {
    revision: u64,
    completed: Vec<StepId>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn completed(&self) -> &[StepId] {
        &self.completed
    }
}

/// Result of a single toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressChange {
    pub completed: bool,
    pub pending_write: Option<ProgressSnapshot>,
}

/// In-memory progress plus the bookkeeping needed to persist it.
///
/// Clones share one revision counter with each other and with the
/// `ProgressStore` that loaded them, so every snapshot outranks the ones
/// issued before it.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    state: ProgressState,
    revisions: Arc<AtomicU64>,
    persistence: Persistence,
}

impl ProgressTracker {
    /// Tracker with its own revision counter, for use without a `ProgressStore`.
    #[must_use]
    pub fn new(state: ProgressState, persistence: Persistence) -> Self {
        Self::with_revisions(state, persistence, Arc::new(AtomicU64::new(0)))
    }

    fn with_revisions(
        state: ProgressState,
        persistence: Persistence,
        revisions: Arc<AtomicU64>,
    ) -> Self {
        Self {
            state,
            revisions,
            persistence,
        }
    }

    #[must_use]
    pub fn memory_only(catalog: &StepCatalog) -> Self {
        Self::new(ProgressState::empty(catalog), Persistence::MemoryOnly)
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.persistence == Persistence::MemoryOnly
    }

    #[must_use]
    pub fn is_completed(&self, id: StepId) -> bool {
        self.state.is_completed(id)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.state.percent()
    }

    /// Flip completion of `id` and return the write to issue, if persistence is on.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStep` for ids outside the catalog.
    pub fn toggle_completion(&mut self, id: StepId) -> Result<ProgressChange, ProgressError> {
        let completed = self.state.toggle(id)?;
        Ok(ProgressChange {
            completed,
            pending_write: self.snapshot(),
        })
    }

    /// Mark `id` completed; returns a write only when the set changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStep` for ids outside the catalog.
    pub fn mark_completed(
        &mut self,
        id: StepId,
    ) -> Result<Option<ProgressSnapshot>, ProgressError> {
        if self.state.mark_completed(id)? {
            Ok(self.snapshot())
        } else {
            Ok(None)
        }
    }

    /// Clear every completion.
    pub fn reset(&mut self) -> Option<ProgressSnapshot> {
        if self.state.clear() {
            self.snapshot()
        } else {
            None
        }
    }

    /// Stop persisting for the rest of the session.
    pub fn degrade(&mut self) {
        if self.persistence == Persistence::Durable {
            warn!("progress storage unavailable; keeping progress in memory only");
        }
        self.persistence = Persistence::MemoryOnly;
    }

    fn snapshot(&mut self) -> Option<ProgressSnapshot> {
        let revision = self.revisions.fetch_add(1, Ordering::Relaxed) + 1;
        match self.persistence {
            Persistence::Durable => Some(ProgressSnapshot {
                revision,
                completed: self.state.completed_ids(),
            }),
            Persistence::MemoryOnly => None,
        }
    }
}

/// Outcome of writing a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// A newer snapshot was already written; this one was dropped.
    Stale,
}

/// Loads and saves the completed set through a `ProgressRepository`.
#[derive(Clone)]
pub struct ProgressStore {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
    revisions: Arc<AtomicU64>,
    last_written: Arc<Mutex<u64>>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self {
            clock,
            repo,
            revisions: Arc::new(AtomicU64::new(0)),
            last_written: Arc::new(Mutex::new(0)),
        }
    }

    /// Restore progress for `catalog`. Never fails.
    ///
    /// A missing value yields empty durable progress. A malformed value or an
    /// unreachable backend yields empty progress in memory-only mode.
    pub async fn load(&self, catalog: &StepCatalog) -> ProgressTracker {
        let (state, persistence) = match self.repo.load_progress().await {
            Ok(Some(record)) => {
                let state = ProgressState::restore(catalog, record.completed);
                debug!(completed = state.completed_count(), "restored progress");
                (state, Persistence::Durable)
            }
            Ok(None) => (ProgressState::empty(catalog), Persistence::Durable),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "stored progress is unreadable; keeping progress in memory only");
                (ProgressState::empty(catalog), Persistence::MemoryOnly)
            }
            Err(err) => {
                warn!(error = %err, "progress storage unavailable; starting in memory only");
                (ProgressState::empty(catalog), Persistence::MemoryOnly)
            }
        };
        ProgressTracker::with_revisions(state, persistence, Arc::clone(&self.revisions))
    }

    /// Overwrite the stored set with `snapshot` unless a newer one is already stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn save(&self, snapshot: &ProgressSnapshot) -> Result<SaveOutcome, StorageError> {
        let mut last = self.last_written.lock().await;
        if snapshot.revision <= *last {
            debug!(revision = snapshot.revision, last = *last, "dropping stale progress write");
            return Ok(SaveOutcome::Stale);
        }

        let record = ProgressRecord::new(snapshot.completed.clone(), self.clock.now());
        self.repo.save_progress(&record).await?;
        *last = snapshot.revision;
        debug!(revision = snapshot.revision, "progress saved");
        Ok(SaveOutcome::Written)
    }
}
