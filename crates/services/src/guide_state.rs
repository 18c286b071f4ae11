use std::sync::Arc;

use guide_core::model::{
    Advance, NavigationPolicy, Retreat, Step, StepCatalog, StepId, StepNavigator,
};
use tracing::debug;

use crate::chat_session::ChatSession;
use crate::error::GuideError;
use crate::progress_service::{ProgressChange, ProgressSnapshot, ProgressTracker};

/// Outcome of `GuideState::next`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepAdvance {
    pub advance: Advance,
    /// Set when `complete_on_advance` marked the left step and storage is durable.
    pub pending_write: Option<ProgressSnapshot>,
}

/// Root application state: active step, completed set and chat transcript.
#[derive(Clone, Debug)]
pub struct GuideState {
    navigator: StepNavigator,
    progress: ProgressTracker,
    chat: ChatSession,
}

impl GuideState {
    #[must_use]
    pub fn new(navigator: StepNavigator, progress: ProgressTracker) -> Self {
        Self {
            navigator,
            progress,
            chat: ChatSession::new(),
        }
    }

    /// Fresh state over `catalog` with memory-only progress.
    #[must_use]
    pub fn in_memory(catalog: Arc<StepCatalog>, policy: NavigationPolicy) -> Self {
        let progress = ProgressTracker::memory_only(&catalog);
        Self::new(StepNavigator::new(catalog, policy), progress)
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<StepCatalog> {
        self.navigator.catalog()
    }

    #[must_use]
    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    #[must_use]
    pub fn active_step(&self) -> &Step {
        self.navigator.active_step()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.progress.progress_percent()
    }

    /// # Errors
    ///
    /// Returns `GuideError::Navigation` for ids outside the catalog.
    pub fn select_step(&mut self, id: StepId) -> Result<(), GuideError> {
        self.navigator.select_step(id)?;
        debug!(step = %id, "step selected");
        Ok(())
    }

    pub fn next(&mut self) -> StepAdvance {
        let advance = self.navigator.next();
        let left = match advance {
            Advance::Moved { from, .. } => Some(from),
            Advance::Finished { last } => Some(last),
            Advance::AtEnd => None,
        };

        let pending_write = match left {
            Some(id) if self.navigator.policy().complete_on_advance => {
                // ids reported by the navigator are always catalog members
                self.progress.mark_completed(id).ok().flatten()
            }
            _ => None,
        };

        debug!(?advance, "advance");
        StepAdvance {
            advance,
            pending_write,
        }
    }

    pub fn previous(&mut self) -> Retreat {
        let retreat = self.navigator.previous();
        debug!(?retreat, "retreat");
        retreat
    }

    /// # Errors
    ///
    /// Returns `GuideError::Progress` for ids outside the catalog.
    pub fn toggle_completion(&mut self, id: StepId) -> Result<ProgressChange, GuideError> {
        let change = self.progress.toggle_completion(id)?;
        debug!(step = %id, completed = change.completed, "completion toggled");
        Ok(change)
    }

    pub fn reset_progress(&mut self) -> Option<ProgressSnapshot> {
        self.progress.reset()
    }

    /// Record that a progress write failed; later mutations stay in memory.
    pub fn storage_failed(&mut self) {
        self.progress.degrade();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_core::catalog::registration_catalog;
    use guide_core::model::{EndOfCatalog, ProgressState};

    use crate::progress_service::Persistence;

    fn durable(policy: NavigationPolicy) -> GuideState {
        let catalog = Arc::new(registration_catalog().unwrap());
        let progress = ProgressTracker::new(ProgressState::empty(&catalog), Persistence::Durable);
        GuideState::new(StepNavigator::new(catalog, policy), progress)
    }

    #[test]
    fn advance_does_not_complete_by_default() {
        let mut state = durable(NavigationPolicy::default());
        let step = state.next();
        assert!(matches!(step.advance, Advance::Moved { .. }));
        assert_eq!(step.pending_write, None);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn complete_on_advance_marks_left_step() {
        let mut state = durable(NavigationPolicy {
            complete_on_advance: true,
            ..NavigationPolicy::default()
        });
        let step = state.next();
        let write = step.pending_write.unwrap();
        assert_eq!(write.completed(), [StepId::new(1)]);
        assert_eq!(state.active_step().id(), StepId::new(2));

        // going back and forward again writes nothing new
        state.previous();
        assert_eq!(state.next().pending_write, None);
    }

    #[test]
    fn finishing_marks_last_step_when_completing_on_advance() {
        let mut state = durable(NavigationPolicy {
            end_of_catalog: EndOfCatalog::Finish,
            complete_on_advance: true,
        });
        state.select_step(StepId::new(4)).unwrap();
        let step = state.next();
        assert_eq!(step.advance, Advance::Finished { last: StepId::new(4) });
        assert!(state.progress().is_completed(StepId::new(4)));
        assert!(state.navigator().is_finished());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut state = durable(NavigationPolicy::default());
        assert!(matches!(
            state.select_step(StepId::new(9)),
            Err(GuideError::Navigation(_))
        ));
        assert!(matches!(
            state.toggle_completion(StepId::new(9)),
            Err(GuideError::Progress(_))
        ));
        assert_eq!(state.active_step().id(), StepId::new(1));
    }

    #[test]
    fn storage_failure_keeps_in_memory_toggle() {
        let mut state = durable(NavigationPolicy::default());
        assert!(state.toggle_completion(StepId::new(2)).unwrap().pending_write.is_some());
        state.storage_failed();
        let change = state.toggle_completion(StepId::new(3)).unwrap();
        assert!(change.completed);
        assert_eq!(change.pending_write, None);
        assert!(state.progress().is_degraded());
        assert_eq!(state.progress_percent(), 50);
    }
}
