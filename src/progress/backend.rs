//! Persistence backends for the progress document
//!
//! A backend is one storage slot holding one document. The store reads it once
//! when it opens and overwrites it after every change.

use std::path::{Path, PathBuf};

use super::document::ProgressDocument;
use crate::error::Result;

/// File name of the storage slot. The version suffix changes only when the
/// document shape changes incompatibly.
pub const PROGRESS_FILE: &str = "progress.v2.json";

/// A single-slot store for the progress document
pub trait ProgressBackend {
    /// Read the stored document. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<ProgressDocument>>;

    /// Overwrite the stored document
    fn save(&mut self, document: &ProgressDocument) -> Result<()>;
}

/// Stores the document as pretty-printed JSON in a file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Use the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the standard slot file inside a data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PROGRESS_FILE))
    }

    /// Path of the storage slot
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<ProgressDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path)?;
        ProgressDocument::from_slice(&bytes).map(Some)
    }

    fn save(&mut self, document: &ProgressDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = document.to_json_pretty()?;
        std::fs::write(&self.path, contents)?;

        Ok(())
    }
}

/// Keeps the serialized document in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Option<String>,
    saves: usize,
}

impl MemoryBackend {
    /// Start with raw slot contents, valid or not
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { slot: Some(contents.into()), saves: 0 }
    }

    /// Raw slot contents
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ProgressBackend for MemoryBackend {
    fn load(&self) -> Result<Option<ProgressDocument>> {
        self.slot.as_deref().map(ProgressDocument::from_json).transpose()
    }

    fn save(&mut self, document: &ProgressDocument) -> Result<()> {
        self.slot = Some(serde_json::to_string(document)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::Roadmap;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::in_dir(temp_dir.path());
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn file_backend_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = JsonFileBackend::in_dir(&temp_dir.path().join("nested"));
        let document = ProgressDocument::seed(Roadmap::embedded(), Utc::now());

        backend.save(&document).unwrap();
        assert!(backend.path().ends_with(PROGRESS_FILE));
        assert_eq!(backend.load().unwrap(), Some(document));
    }

    #[test]
    fn file_backend_writes_camel_case() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = JsonFileBackend::in_dir(temp_dir.path());
        backend.save(&ProgressDocument::seed(Roadmap::embedded(), Utc::now())).unwrap();

        let raw = std::fs::read_to_string(backend.path()).unwrap();
        assert!(raw.contains("\"lastUpdated\""));
        assert!(raw.contains("\"dsaProblems\""));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::in_dir(temp_dir.path());
        std::fs::write(backend.path(), "{ not json").unwrap();

        let err = backend.load().unwrap_err();
        assert!(err.is_data_error());
    }

    #[test]
    fn non_utf8_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::in_dir(temp_dir.path());
        std::fs::write(backend.path(), [0x7b, 0xff, 0xfe, 0x7d]).unwrap();

        let err = backend.load().unwrap_err();
        assert!(err.is_data_error());
    }

    #[test]
    fn memory_backend_counts_saves() {
        let mut backend = MemoryBackend::default();
        assert!(backend.load().unwrap().is_none());

        let document = ProgressDocument::seed(Roadmap::embedded(), Utc::now());
        backend.save(&document).unwrap();
        backend.save(&document).unwrap();

        assert_eq!(backend.save_count(), 2);
        assert_eq!(backend.load().unwrap(), Some(document));
    }
}
