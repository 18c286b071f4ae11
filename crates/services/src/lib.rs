#![forbid(unsafe_code)]

pub mod advice;
pub mod app_services;
pub mod chat_session;
pub mod error;
pub mod guide_state;
pub mod progress_service;

pub use guide_core::Clock;

pub use advice::{
    AdviceClient, AdviceRelay, AdviceRequest, CONNECTION_FALLBACK, EMPTY_REPLY_FALLBACK,
    GeminiClient,
};
pub use app_services::AppServices;
pub use chat_session::{AdviceTicket, ChatSession, Settled};
pub use error::{AdviceError, AppServicesError, GuideError};
pub use guide_state::{GuideState, StepAdvance};
pub use progress_service::{
    Persistence, ProgressChange, ProgressSnapshot, ProgressStore, ProgressTracker, SaveOutcome,
};
