// ABOUTME: Concrete snapshot stores - JSON file on disk and in-memory

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{SnapshotStore, StorageError};

/// Stores the blob at `<dir>/<storage_key>.json`
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl AsRef<Path>, storage_key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{storage_key}.json")),
        }
    }

    /// Default snapshot directory (`~/.stepwise/snapshots`)
    pub fn default_dir() -> Result<PathBuf, StorageError> {
        dirs::home_dir()
            .map(|home| home.join(".stepwise").join("snapshots"))
            .ok_or_else(|| StorageError::Unavailable("could not determine home directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Snapshot file permissions (Unix only): owner read/write
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

impl SnapshotStore for FileSnapshotStore {
    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies on creation; tighten files written by older versions
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(FILE_MODE))?;
        }

        file.write_all(blob.as_bytes())?;
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the blob in memory; useful for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    blob: Option<String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&mut self, blob: &str) -> Result<(), StorageError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.blob.clone())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.blob = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileSnapshotStore::new(temp_dir.path().join("nested"), "wizard-data");

        assert_eq!(store.load().unwrap(), None);

        store.save("{\"a\":1}").unwrap();
        assert!(store.path().ends_with("nested/wizard-data.json"));
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"a\":1}"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_overwrites_shorter_blob() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileSnapshotStore::new(temp_dir.path(), "wizard-data");

        store.save("{\"long\":\"value\"}").unwrap();
        store.save("{}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let mut store = FileSnapshotStore::new(temp_dir.path(), "wizard-data");

        // Pre-existing world-readable file gets tightened too
        std::fs::write(store.path(), "{}").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save("{\"password\":\"hunter22\"}").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Snapshot should have mode 0600");
    }

    #[test]
    fn test_file_store_reports_io_errors() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes reads fail
        std::fs::create_dir(temp_dir.path().join("blocked.json")).unwrap();
        let store = FileSnapshotStore::new(temp_dir.path(), "blocked");

        assert!(matches!(store.load(), Err(StorageError::Io(_))));
    }
}
