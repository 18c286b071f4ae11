use std::sync::Arc;

use async_trait::async_trait;
use guide_core::catalog::registration_catalog;
use guide_core::model::{AdviceSettings, NavigationPolicy, StepCatalog, StepNavigator};
use storage::repository::{ProgressRecord, ProgressRepository, Storage, StorageError};
use tracing::info;

use crate::advice::AdviceRelay;
use crate::error::AppServicesError;
use crate::guide_state::GuideState;
use crate::progress_service::ProgressStore;
use crate::Clock;

/// Assembles app-facing services around the built-in step catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<StepCatalog>,
    policy: NavigationPolicy,
    progress_store: Arc<ProgressStore>,
    advice: Arc<AdviceRelay>,
}

impl AppServices {
    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in catalog is invalid.
    pub fn new(
        storage: &Storage,
        clock: Clock,
        settings: AdviceSettings,
        policy: NavigationPolicy,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(registration_catalog()?);
        let progress_store = Arc::new(ProgressStore::new(clock, Arc::clone(&storage.progress)));
        let advice = Arc::new(AdviceRelay::from_settings(settings));
        info!(
            steps = catalog.len(),
            advice_enabled = advice.enabled(),
            "guide services ready"
        );

        Ok(Self {
            catalog,
            policy,
            progress_store,
            advice,
        })
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: AdviceSettings,
        policy: NavigationPolicy,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(&storage, clock, settings, policy)
    }

    /// Build services whose progress store cannot be reached; progress loads
    /// in memory-only mode.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in catalog is invalid.
    pub fn without_storage(
        reason: impl Into<String>,
        clock: Clock,
        settings: AdviceSettings,
        policy: NavigationPolicy,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage {
            progress: Arc::new(UnavailableRepository {
                reason: reason.into(),
            }),
        };
        Self::new(&storage, clock, settings, policy)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<StepCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    #[must_use]
    pub fn progress_store(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress_store)
    }

    #[must_use]
    pub fn advice(&self) -> Arc<AdviceRelay> {
        Arc::clone(&self.advice)
    }

    /// Restore persisted progress and position the navigator on the first step.
    pub async fn initial_state(&self) -> GuideState {
        let progress = self.progress_store.load(&self.catalog).await;
        let navigator = StepNavigator::new(Arc::clone(&self.catalog), self.policy);
        GuideState::new(navigator, progress)
    }
}

struct UnavailableRepository {
    reason: String,
}

#[async_trait]
impl ProgressRepository for UnavailableRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        Err(StorageError::Connection(self.reason.clone()))
    }

    async fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection(self.reason.clone()))
    }
}
