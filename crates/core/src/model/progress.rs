use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::ids::StepId;
use crate::model::step::StepCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("step {0} is not part of the catalog")]
    UnknownStep(StepId),
}

/// The set of steps the user has marked as done.
///
/// Always a subset of the catalog it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    known: BTreeSet<StepId>,
    completed: BTreeSet<StepId>,
}

impl ProgressState {
    #[must_use]
    pub fn empty(catalog: &StepCatalog) -> Self {
        Self {
            known: catalog.ids().collect(),
            completed: BTreeSet::new(),
        }
    }

    /// Rebuild progress from previously saved ids.
    ///
    /// Ids that are no longer in the catalog are dropped.
    #[must_use]
    pub fn restore(catalog: &StepCatalog, ids: impl IntoIterator<Item = StepId>) -> Self {
        let mut state = Self::empty(catalog);
        state.completed = ids
            .into_iter()
            .filter(|id| state.known.contains(id))
            .collect();
        state
    }

    /// Flip the completion of `id`. Returns whether the step is now completed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStep` if `id` is not in the catalog.
    pub fn toggle(&mut self, id: StepId) -> Result<bool, ProgressError> {
        self.ensure_known(id)?;
        if self.completed.remove(&id) {
            Ok(false)
        } else {
            self.completed.insert(id);
            Ok(true)
        }
    }

    /// Mark `id` completed. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStep` if `id` is not in the catalog.
    pub fn mark_completed(&mut self, id: StepId) -> Result<bool, ProgressError> {
        self.ensure_known(id)?;
        Ok(self.completed.insert(id))
    }

    /// Remove every completion. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.completed.is_empty();
        self.completed.clear();
        changed
    }

    #[must_use]
    pub fn is_completed(&self, id: StepId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<StepId> {
        &self.completed
    }

    #[must_use]
    pub fn completed_ids(&self) -> Vec<StepId> {
        self.completed.iter().copied().collect()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.known.len()
    }

    #[must_use]
    pub fn is_all_completed(&self) -> bool {
        self.completed.len() == self.known.len()
    }

    /// `round(100 * completed / total)`, halves rounded up.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let total = self.known.len();
        if total == 0 {
            return 0;
        }
        let done = self.completed.len();
        let rounded = (200 * done + total) / (2 * total);
        u8::try_from(rounded.min(100)).unwrap_or(100)
    }

    fn ensure_known(&self, id: StepId) -> Result<(), ProgressError> {
        if self.known.contains(&id) {
            Ok(())
        } else {
            Err(ProgressError::UnknownStep(id))
        }
    }
}
