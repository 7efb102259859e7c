//! Filesystem implementations of the engine's host capabilities.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use memedle_game::{Clock, StateStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("storage io: {0}")]
    Io(#[from] io::Error),
}

/// Blob persistence as one JSON file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    type Error = FileStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write-then-rename keeps the old blob intact if the write dies.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Wall-clock date in the local time zone; puzzles roll at local midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memedle_game::STATE_KEY;

    fn scratch_store(tag: &str) -> (FileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("memedle-store-{tag}-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        (FileStore::new(dir.clone()), dir)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, dir) = scratch_store("missing");
        assert!(store.get(STATE_KEY).unwrap().is_none());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, dir) = scratch_store("roundtrip");
        store.set(STATE_KEY, r#"{"guesses":[]}"#).unwrap();
        assert_eq!(
            store.get(STATE_KEY).unwrap().as_deref(),
            Some(r#"{"guesses":[]}"#)
        );

        // Overwrites replace the blob, and no temp file lingers.
        store.set(STATE_KEY, "{}").unwrap();
        assert_eq!(store.get(STATE_KEY).unwrap().as_deref(), Some("{}"));
        assert!(!dir.join("memedle.state.json.tmp").exists());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn local_clock_yields_a_plain_date() {
        let before = Local::now().date_naive();
        let today = LocalClock.today();
        let after = Local::now().date_naive();
        assert!(today == before || today == after);
    }
}
