//! Shared error types for the services crate.

use thiserror::Error;

use guide_core::model::{AdviceSettingsError, CatalogError, NavigationError, ProgressError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by advice clients. The relay never lets these reach the UI.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdviceError {
    #[error("advice service is not configured")]
    Disabled,
    #[error("advice service returned an empty response")]
    EmptyResponse,
    #[error("advice request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `GuideState` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuideError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    AdviceSettings(#[from] AdviceSettingsError),
}
