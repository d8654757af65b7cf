//! Persisted best score
//!
//! A single decimal integer under one storage key. Read once at startup,
//! written whenever a run beats it.

use crate::persistence::{PersistenceError, Storage};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "dino_runner_high_score";

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Only a strictly greater score replaces the best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it became the new best.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Parse the stored text form
    pub fn parse(text: &str) -> Result<Self, PersistenceError> {
        text.trim()
            .parse::<u64>()
            .map(Self::new)
            .map_err(|source| PersistenceError::Parse {
                key: STORAGE_KEY.to_string(),
                source,
            })
    }

    /// Read the stored best; a missing key is a best of zero
    pub fn try_load(storage: &dyn Storage) -> Result<Self, PersistenceError> {
        match storage.get(STORAGE_KEY)? {
            Some(text) => Self::parse(&text),
            None => Ok(Self::default()),
        }
    }

    /// Read the stored best, falling back to zero on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match Self::try_load(storage) {
            Ok(high_score) => {
                log::info!("Loaded high score {}", high_score.best);
                high_score
            }
            Err(e) => {
                log::warn!("Could not load high score ({}), starting from 0", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        storage.set(STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
