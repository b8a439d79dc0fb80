use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::Result;

/// Where the serialized collection lives between runs.
///
/// Implementations hold one payload; every write replaces it whole.
pub trait Storage {
    /// Returns `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    fn write(&mut self, payload: &str) -> Result<()>;
}

/// A JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a sibling temporary file and renames it over the target, so
    /// an interrupted write leaves the previous payload intact.
    fn write(&mut self, payload: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(payload.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Keeps the payload in memory. Used where no real backend is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            writes: 0,
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Number of writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_owned());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));

        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn file_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested/deeper/data.json"));

        storage.write("[]").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_write_replaces_payload_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let mut storage = FileStorage::new(&path);

        storage.write("[]").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, ["data.json"]);
    }

    #[test]
    fn memory_write_replaces_payload() {
        let mut storage = MemoryStorage::with_payload("old");

        storage.write("new").unwrap();

        assert_eq!(storage.payload(), Some("new"));
        assert_eq!(storage.writes(), 1);
    }
}
