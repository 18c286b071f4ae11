use async_trait::async_trait;
use chrono::{DateTime, Utc};
use guide_core::model::StepId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the completed-step set is stored.
pub const PROGRESS_KEY: &str = "jamb-guide.completed-steps";

/// Current version of the persisted progress value.
pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the completed-step set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub completed: Vec<StepId>,
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize)]
struct VersionedProgress {
    version: u32,
    completed: Vec<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

// Older builds stored a bare JSON array of ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProgress {
    Versioned(VersionedProgress),
    Legacy(Vec<StepId>),
}

impl ProgressRecord {
    #[must_use]
    pub fn new(completed: Vec<StepId>, saved_at: DateTime<Utc>) -> Self {
        Self {
            completed,
            saved_at: Some(saved_at),
        }
    }

    /// Encode as the stored JSON value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(&VersionedProgress {
            version: PROGRESS_SCHEMA_VERSION,
            completed: self.completed.clone(),
            saved_at: self.saved_at,
        })
        .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Decode a stored JSON value, accepting the versioned object or a bare id array.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON or an unknown version.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let stored: StoredProgress = serde_json::from_str(raw)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        match stored {
            StoredProgress::Versioned(value) if value.version == PROGRESS_SCHEMA_VERSION => {
                Ok(Self {
                    completed: value.completed,
                    saved_at: value.saved_at,
                })
            }
            StoredProgress::Versioned(value) => Err(StorageError::Serialization(format!(
                "unsupported progress schema version {}",
                value.version
            ))),
            StoredProgress::Legacy(completed) => Ok(Self {
                completed,
                saved_at: None,
            }),
        }
    }
}

/// Repository contract for the completed-step set.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the stored progress, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the value cannot be decoded.
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Overwrite the stored progress with `record`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory key-value repository for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value under `key`, bypassing the progress codec.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        self.get_raw(PROGRESS_KEY)?
            .as_deref()
            .map(ProgressRecord::from_json)
            .transpose()
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let value = record.to_json()?;
        self.put_raw(PROGRESS_KEY, &value)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_core::time::fixed_now;

    fn ids(raw: &[u32]) -> Vec<StepId> {
        raw.iter().copied().map(StepId::new).collect()
    }

    #[test]
    fn encodes_versioned_object() {
        let record = ProgressRecord::new(ids(&[1, 3]), fixed_now());
        let json = record.to_json().unwrap();
        assert!(json.starts_with(r#"{"version":1,"completed":[1,3]"#), "{json}");
        assert_eq!(ProgressRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn decodes_legacy_bare_array() {
        let record = ProgressRecord::from_json("[2, 4]").unwrap();
        assert_eq!(record.completed, ids(&[2, 4]));
        assert_eq!(record.saved_at, None);
    }

    #[test]
    fn rejects_malformed_and_future_versions() {
        for raw in ["", "{", r#"{"completed":"x"}"#, "[\"a\"]", "[-1]"] {
            assert!(
                matches!(
                    ProgressRecord::from_json(raw),
                    Err(StorageError::Serialization(_))
                ),
                "accepted {raw}"
            );
        }

        let err = ProgressRecord::from_json(r#"{"version":2,"completed":[1]}"#).unwrap_err();
        assert!(err.to_string().contains("version 2"), "{err}");
    }

    #[tokio::test]
    async fn in_memory_round_trip_and_overwrite() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.load_progress().await.unwrap(), None);

        repo.save_progress(&ProgressRecord::new(ids(&[1]), fixed_now()))
            .await
            .unwrap();
        repo.save_progress(&ProgressRecord::new(ids(&[1, 2]), fixed_now()))
            .await
            .unwrap();

        let loaded = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(loaded.completed, ids(&[1, 2]));
    }

    #[tokio::test]
    async fn in_memory_surfaces_malformed_value() {
        let repo = InMemoryRepository::new();
        repo.put_raw(PROGRESS_KEY, "not json").unwrap();
        assert!(matches!(
            repo.load_progress().await,
            Err(StorageError::Serialization(_))
        ));
    }
}
