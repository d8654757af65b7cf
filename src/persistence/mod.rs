//! Key/value persistence
//!
//! Features:
//! - One small string value per key (high score, settings JSON)
//! - LocalStorage on web, one file per key on native
//! - Every failure is typed; callers fall back to defaults and keep going

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("value under {key:?} is not a valid score: {source}")]
    Parse {
        key: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-process store (tests, and the fallback when nothing else works)
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with [`PersistenceError::Unavailable`]
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            available: false,
        }
    }

    /// Pre-populated store
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if !self.available {
            return Err(PersistenceError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if !self.available {
            return Err(PersistenceError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The platform's durable store, or memory if it cannot be opened
pub fn default_storage() -> Box<dyn Storage> {
    #[cfg(target_arch = "wasm32")]
    let opened = LocalStorage::open();
    #[cfg(not(target_arch = "wasm32"))]
    let opened = FileStorage::open(std::env::temp_dir().join("dino-runner"));

    match opened {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Persistent storage unavailable ({}), scores will not be kept", e);
            Box::new(MemoryStorage::new())
        }
    }
}
