mod app_settings;
mod chat;
mod ids;
mod navigator;
mod progress;
mod step;

pub use app_settings::{
    AdviceSettings, AdviceSettingsDraft, AdviceSettingsError, DEFAULT_ADVICE_BASE_URL,
    DEFAULT_ADVICE_MODEL, DEFAULT_SYSTEM_INSTRUCTION,
};
pub use chat::{ChatHistory, ChatMessage, ChatRole};
pub use ids::{ParseStepIdError, StepId};
pub use navigator::{
    Advance, EndOfCatalog, NavigationError, NavigationPolicy, Retreat, StepNavigator,
};
pub use progress::{ProgressError, ProgressState};
pub use step::{CatalogError, Step, StepCatalog, StepDraft, StepError};
