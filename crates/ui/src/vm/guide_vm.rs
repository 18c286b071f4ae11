use guide_core::model::{EndOfCatalog, Step};
use services::GuideState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepTabVm {
    pub id: u32,
    pub number: usize,
    pub label: String,
    pub active: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepDetailVm {
    pub id: u32,
    pub position_label: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub detailed_content: Vec<String>,
    pub checklist: Vec<String>,
    pub tips: Vec<String>,
    pub video_url: Option<String>,
    pub video_prompt: Option<String>,
    pub completed: bool,
    pub is_first: bool,
    pub is_last: bool,
    /// False when `next()` would be a no-op.
    pub can_advance: bool,
    pub finished: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub percent: u8,
    pub completed: usize,
    pub total: usize,
    pub degraded: bool,
}

impl ProgressVm {
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} of {} steps done", self.completed, self.total)
    }
}

#[must_use]
pub fn map_step_tabs(state: &GuideState) -> Vec<StepTabVm> {
    let active = state.navigator().active_id();
    state
        .catalog()
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| StepTabVm {
            id: step.id().value(),
            number: index + 1,
            label: step.short_label().to_string(),
            active: step.id() == active,
            completed: state.progress().is_completed(step.id()),
        })
        .collect()
}

#[must_use]
pub fn map_step_detail(state: &GuideState) -> StepDetailVm {
    let navigator = state.navigator();
    let step: &Step = navigator.active_step();
    StepDetailVm {
        id: step.id().value(),
        position_label: format!(
            "Step {} of {}",
            navigator.position() + 1,
            state.catalog().len()
        ),
        title: step.title().to_string(),
        description: step.description().to_string(),
        icon: step.icon().to_string(),
        color: step.color().to_string(),
        detailed_content: step.detailed_content().to_vec(),
        checklist: step.checklist().to_vec(),
        tips: step.tips().to_vec(),
        video_url: step.video_url().map(str::to_string),
        video_prompt: step.video_prompt().map(str::to_string),
        completed: state.progress().is_completed(step.id()),
        is_first: navigator.is_first(),
        is_last: navigator.is_last(),
        can_advance: !navigator.is_last()
            || (navigator.policy().end_of_catalog == EndOfCatalog::Finish
                && !navigator.is_finished()),
        finished: navigator.is_finished(),
    }
}

#[must_use]
pub fn map_progress(state: &GuideState) -> ProgressVm {
    let progress = state.progress();
    ProgressVm {
        percent: progress.progress_percent(),
        completed: progress.state().completed_count(),
        total: progress.state().total(),
        degraded: progress.is_degraded(),
    }
}
