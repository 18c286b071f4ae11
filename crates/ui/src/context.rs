use std::sync::Arc;

use guide_core::catalog::{GUIDE_CONTENT, GuideContent};
use guide_core::model::StepCatalog;
use services::{AdviceRelay, GuideState, ProgressStore};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<StepCatalog>;
    /// State restored before launch; the root component takes ownership of it.
    fn initial_state(&self) -> GuideState;

    fn progress_store(&self) -> Arc<ProgressStore>;
    fn advice(&self) -> Arc<AdviceRelay>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<StepCatalog>,
    initial_state: GuideState,
    content: GuideContent,

    progress_store: Arc<ProgressStore>,
    advice: Arc<AdviceRelay>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            initial_state: app.initial_state(),
            content: GUIDE_CONTENT,
            progress_store: app.progress_store(),
            advice: app.advice(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<StepCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn initial_state(&self) -> GuideState {
        self.initial_state.clone()
    }

    #[must_use]
    pub fn content(&self) -> GuideContent {
        self.content
    }

    #[must_use]
    pub fn progress_store(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress_store)
    }

    #[must_use]
    pub fn advice(&self) -> Arc<AdviceRelay> {
        Arc::clone(&self.advice)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
