//! Persistence of the core's memory as a JSON array under one fixed key.

use shared::MemorySnapshot;
use thiserror::Error;

use crate::KeyValueStore;

pub const MEMORY_KEY: &str = "memory";

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("no memory mirror stored under '{0}'")]
    Missing(String),
    #[error("memory mirror is not a valid word array: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },
    #[error("memory mirror could not be serialized: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("memory mirror store failed: {0:#}")]
    Store(#[source] anyhow::Error),
}

/// Mirrors a [`MemorySnapshot`] into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct MemoryMirror {
    key: String,
}

impl Default for MemoryMirror {
    fn default() -> Self {
        Self::new(MEMORY_KEY)
    }
}

impl MemoryMirror {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrites the mirror with `snapshot`. Store failures are logged and absorbed.
    pub fn save(&self, snapshot: &MemorySnapshot, store: &mut dyn KeyValueStore) {
        match self.try_save(snapshot, store) {
            Ok(()) => tracing::debug!(key = %self.key, "memory mirror saved"),
            Err(err) => tracing::error!(key = %self.key, "memory mirror save failed: {err}"),
        }
    }

    pub fn try_save(
        &self,
        snapshot: &MemorySnapshot,
        store: &mut dyn KeyValueStore,
    ) -> Result<(), MirrorError> {
        let encoded = serde_json::to_string(snapshot).map_err(MirrorError::Encode)?;
        store.set(&self.key, &encoded).map_err(MirrorError::Store)
    }

    /// Reads the mirror, substituting zeroed memory when it is absent or malformed.
    pub fn load(&self, store: &dyn KeyValueStore) -> MemorySnapshot {
        match self.try_load(store) {
            Ok(snapshot) => snapshot,
            Err(MirrorError::Missing(_)) => {
                tracing::info!(key = %self.key, "no memory mirror found, starting with fresh memory");
                MemorySnapshot::zeroed()
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "{err}; starting with fresh memory");
                MemorySnapshot::zeroed()
            }
        }
    }

    pub fn try_load(&self, store: &dyn KeyValueStore) -> Result<MemorySnapshot, MirrorError> {
        let raw = store
            .get(&self.key)
            .map_err(MirrorError::Store)?
            .ok_or_else(|| MirrorError::Missing(self.key.clone()))?;
        serde_json::from_str(&raw).map_err(|source| MirrorError::Malformed { source })
    }
}
