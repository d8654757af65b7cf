//! One file per key under a data directory (native only)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistenceError, Storage};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temp file, then rename over the old value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dino-runner-test-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = scratch_dir("missing");
        let storage = FileStorage::open(&dir).unwrap();
        assert_eq!(storage.get("nothing_here").unwrap(), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_overwrite() {
        let dir = scratch_dir("overwrite");
        let mut storage = FileStorage::open(&dir).unwrap();
        storage.set("score", "12").unwrap();
        storage.set("score", "345").unwrap();
        assert_eq!(storage.get("score").unwrap().as_deref(), Some("345"));
        assert!(!storage.dir().join("score.tmp").exists());
        let _ = fs::remove_dir_all(dir);
    }
}
