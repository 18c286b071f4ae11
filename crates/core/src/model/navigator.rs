use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::StepId;
use crate::model::step::{Step, StepCatalog};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationError {
    #[error("step {0} is not part of the catalog")]
    UnknownStep(StepId),
}

/// What `next()` does on the last step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndOfCatalog {
    /// Stay on the last step.
    #[default]
    Clamp,
    /// Stay on the last step and raise the `finished` flag.
    Finish,
}

/// Navigation behaviour knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationPolicy {
    pub end_of_catalog: EndOfCatalog,
    /// Mark the step being left as completed when advancing with `next()`.
    pub complete_on_advance: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved { from: StepId, to: StepId },
    AtEnd,
    Finished { last: StepId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retreat {
    Moved { from: StepId, to: StepId },
    AtStart,
}

/// Linear state machine over the catalog. The active step is always a catalog entry.
#[derive(Debug, Clone)]
pub struct StepNavigator {
    catalog: Arc<StepCatalog>,
    position: usize,
    finished: bool,
    policy: NavigationPolicy,
}

impl StepNavigator {
    #[must_use]
    pub fn new(catalog: Arc<StepCatalog>, policy: NavigationPolicy) -> Self {
        Self {
            catalog,
            position: 0,
            finished: false,
            policy,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<StepCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    #[must_use]
    pub fn active_step(&self) -> &Step {
        // position is only ever set from catalog indices
        &self.catalog.steps()[self.position]
    }

    #[must_use]
    pub fn active_id(&self) -> StepId {
        self.active_step().id()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.catalog.len()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Make `id` the active step.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::UnknownStep` if `id` is not in the catalog;
    /// the active step is left unchanged.
    pub fn select_step(&mut self, id: StepId) -> Result<(), NavigationError> {
        let position = self
            .catalog
            .position(id)
            .ok_or(NavigationError::UnknownStep(id))?;
        self.position = position;
        self.finished = false;
        Ok(())
    }

    pub fn next(&mut self) -> Advance {
        if self.is_last() {
            return match self.policy.end_of_catalog {
                EndOfCatalog::Clamp => Advance::AtEnd,
                EndOfCatalog::Finish => {
                    self.finished = true;
                    Advance::Finished {
                        last: self.active_id(),
                    }
                }
            };
        }

        let from = self.active_id();
        self.position += 1;
        Advance::Moved {
            from,
            to: self.active_id(),
        }
    }

    pub fn previous(&mut self) -> Retreat {
        self.finished = false;
        if self.is_first() {
            return Retreat::AtStart;
        }

        let from = self.active_id();
        self.position -= 1;
        Retreat::Moved {
            from,
            to: self.active_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::step::StepDraft;

    fn catalog(ids: &[u32]) -> Arc<StepCatalog> {
        Arc::new(
            StepCatalog::from_drafts(
                ids.iter()
                    .map(|id| StepDraft {
                        id: *id,
                        title: format!("Step {id}"),
                        ..StepDraft::default()
                    })
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn starts_on_first_step() {
        let nav = StepNavigator::new(catalog(&[1, 2, 3]), NavigationPolicy::default());
        assert_eq!(nav.active_id(), StepId::new(1));
        assert!(nav.is_first());
        assert!(!nav.is_finished());
    }

    #[test]
    fn select_every_valid_step() {
        let catalog = catalog(&[1, 2, 5, 9]);
        let mut nav = StepNavigator::new(Arc::clone(&catalog), NavigationPolicy::default());
        for id in catalog.ids() {
            nav.select_step(id).unwrap();
            assert_eq!(nav.active_id(), id);
        }
    }

    #[test]
    fn select_unknown_step_is_reported_and_keeps_state() {
        let mut nav = StepNavigator::new(catalog(&[1, 2]), NavigationPolicy::default());
        nav.select_step(StepId::new(2)).unwrap();
        let err = nav.select_step(StepId::new(4)).unwrap_err();
        assert_eq!(err, NavigationError::UnknownStep(StepId::new(4)));
        assert_eq!(nav.active_id(), StepId::new(2));
    }

    #[test]
    fn next_walks_in_catalog_order_then_clamps() {
        let mut nav = StepNavigator::new(catalog(&[1, 2, 4]), NavigationPolicy::default());
        assert_eq!(
            nav.next(),
            Advance::Moved {
                from: StepId::new(1),
                to: StepId::new(2)
            }
        );
        assert_eq!(
            nav.next(),
            Advance::Moved {
                from: StepId::new(2),
                to: StepId::new(4)
            }
        );
        assert_eq!(nav.next(), Advance::AtEnd);
        assert_eq!(nav.next(), Advance::AtEnd);
        assert_eq!(nav.active_id(), StepId::new(4));
        assert!(!nav.is_finished());
    }

    #[test]
    fn next_on_last_step_signals_finish_when_configured() {
        let policy = NavigationPolicy {
            end_of_catalog: EndOfCatalog::Finish,
            ..NavigationPolicy::default()
        };
        let mut nav = StepNavigator::new(catalog(&[1, 2]), policy);
        nav.select_step(StepId::new(2)).unwrap();

        assert_eq!(
            nav.next(),
            Advance::Finished {
                last: StepId::new(2)
            }
        );
        assert!(nav.is_finished());
        assert_eq!(nav.active_id(), StepId::new(2));

        assert_eq!(
            nav.previous(),
            Retreat::Moved {
                from: StepId::new(2),
                to: StepId::new(1)
            }
        );
        assert!(!nav.is_finished());
    }

    #[test]
    fn previous_is_noop_on_first_step() {
        let mut nav = StepNavigator::new(catalog(&[1, 2]), NavigationPolicy::default());
        assert_eq!(nav.previous(), Retreat::AtStart);
        assert_eq!(nav.active_id(), StepId::new(1));
    }

    #[test]
    fn single_step_catalog_is_first_and_last() {
        let mut nav = StepNavigator::new(catalog(&[1]), NavigationPolicy::default());
        assert!(nav.is_first() && nav.is_last());
        assert_eq!(nav.next(), Advance::AtEnd);
        assert_eq!(nav.previous(), Retreat::AtStart);
    }
}
