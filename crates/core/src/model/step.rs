use std::collections::HashMap;

use thiserror::Error;

use crate::model::ids::StepId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepError {
    #[error("step id must be >= 1")]
    ZeroId,

    #[error("step title cannot be empty")]
    EmptyTitle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one step")]
    Empty,

    #[error("duplicate step id {0}")]
    DuplicateId(StepId),

    #[error("step ids must be strictly increasing ({prev} then {next})")]
    OutOfOrder { prev: StepId, next: StepId },

    #[error(transparent)]
    Step(#[from] StepError),
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// Unvalidated step content, usually written out as a literal in the catalog.
#[derive(Clone, Debug, Default)]
pub struct StepDraft {
    pub id: u32,
    pub title: String,
    pub short_label: String,
    pub description: String,
    pub detailed_content: Vec<String>,
    pub checklist: Vec<String>,
    pub tips: Vec<String>,
    pub icon: String,
    pub color: String,
    pub video_url: Option<String>,
    pub video_prompt: Option<String>,
}

impl StepDraft {
    /// Validate the draft into an immutable `Step`.
    ///
    /// A blank short label falls back to the step number.
    ///
    /// # Errors
    ///
    /// Returns `StepError` if the id is zero or the title is blank.
    pub fn validate(self) -> Result<Step, StepError> {
        if self.id == 0 {
            return Err(StepError::ZeroId);
        }
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(StepError::EmptyTitle);
        }
        let short_label = match self.short_label.trim() {
            "" => format!("Step {}", self.id),
            label => label.to_owned(),
        };

        Ok(Step {
            id: StepId::new(self.id),
            title,
            short_label,
            description: self.description.trim().to_owned(),
            detailed_content: non_blank(self.detailed_content),
            checklist: non_blank(self.checklist),
            tips: non_blank(self.tips),
            icon: self.icon,
            color: self.color,
            video_url: self.video_url.filter(|url| !url.trim().is_empty()),
            video_prompt: self.video_prompt.filter(|p| !p.trim().is_empty()),
        })
    }
}

fn non_blank(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

/// One fixed stage of the registration procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    id: StepId,
    title: String,
    short_label: String,
    description: String,
    detailed_content: Vec<String>,
    checklist: Vec<String>,
    tips: Vec<String>,
    icon: String,
    color: String,
    video_url: Option<String>,
    video_prompt: Option<String>,
}

impl Step {
    #[must_use]
    pub fn id(&self) -> StepId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn short_label(&self) -> &str {
        &self.short_label
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn detailed_content(&self) -> &[String] {
        &self.detailed_content
    }

    #[must_use]
    pub fn checklist(&self) -> &[String] {
        &self.checklist
    }

    #[must_use]
    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    #[must_use]
    pub fn video_prompt(&self) -> Option<&str> {
        self.video_prompt.as_deref()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Closed, ordered set of steps. Lookups go through an id → position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Vec<Step>,
    index: HashMap<StepId, usize>,
}

impl StepCatalog {
    /// Build a catalog from validated steps.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, an id repeats, or ids are
    /// not in strictly increasing order.
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(steps.len());
        for (pos, step) in steps.iter().enumerate() {
            if index.insert(step.id(), pos).is_some() {
                return Err(CatalogError::DuplicateId(step.id()));
            }
            if pos > 0 {
                let prev = steps[pos - 1].id();
                if prev >= step.id() {
                    return Err(CatalogError::OutOfOrder {
                        prev,
                        next: step.id(),
                    });
                }
            }
        }

        Ok(Self { steps, index })
    }

    /// Validate drafts and build a catalog in one go.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for invalid steps or ordering.
    pub fn from_drafts(drafts: Vec<StepDraft>) -> Result<Self, CatalogError> {
        let steps = drafts
            .into_iter()
            .map(StepDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn contains(&self, id: StepId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.index.get(&id).map(|pos| &self.steps[*pos])
    }

    #[must_use]
    pub fn position(&self, id: StepId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Step> {
        self.steps.get(position)
    }

    #[must_use]
    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    #[must_use]
    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    pub fn ids(&self) -> impl Iterator<Item = StepId> + '_ {
        self.steps.iter().map(Step::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: u32, title: &str) -> StepDraft {
        StepDraft {
            id,
            title: title.into(),
            ..StepDraft::default()
        }
    }

    #[test]
    fn draft_rejects_zero_id_and_blank_title() {
        assert_eq!(draft(0, "NIN").validate().unwrap_err(), StepError::ZeroId);
        assert_eq!(draft(1, "  ").validate().unwrap_err(), StepError::EmptyTitle);
    }

    #[test]
    fn draft_defaults_short_label_and_drops_blank_lines() {
        let step = StepDraft {
            checklist: vec!["Confirm NIN".into(), "   ".into()],
            video_url: Some(" ".into()),
            ..draft(2, " Profile ")
        }
        .validate()
        .unwrap();

        assert_eq!(step.title(), "Profile");
        assert_eq!(step.short_label(), "Step 2");
        assert_eq!(step.checklist(), ["Confirm NIN".to_string()]);
        assert_eq!(step.video_url(), None);
    }

    #[test]
    fn catalog_rejects_empty_duplicate_and_unordered() {
        assert_eq!(StepCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);

        let err = StepCatalog::from_drafts(vec![draft(1, "a"), draft(1, "b")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(StepId::new(1)));

        let err = StepCatalog::from_drafts(vec![draft(2, "a"), draft(1, "b")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::OutOfOrder {
                prev: StepId::new(2),
                next: StepId::new(1)
            }
        );
    }

    #[test]
    fn catalog_lookup_by_id_and_position() {
        let catalog =
            StepCatalog::from_drafts(vec![draft(1, "a"), draft(3, "b"), draft(7, "c")]).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position(StepId::new(7)), Some(2));
        assert_eq!(catalog.get(StepId::new(3)).map(Step::title), Some("b"));
        assert!(catalog.get(StepId::new(2)).is_none());
        assert_eq!(catalog.first().id(), StepId::new(1));
        assert_eq!(catalog.last().id(), StepId::new(7));
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            vec![StepId::new(1), StepId::new(3), StepId::new(7)]
        );
    }
}
