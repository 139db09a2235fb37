//! FileStore - persistent on-disk blob store.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{ImageStore, StoreError};

/// File extension for stored buffers.
const EXTENSION: &str = "art";

/// Stores each buffer as `<id>.art` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a FileStore over the given directory.
    /// Does not create the directory - call `ensure_dir_exists()` to create it.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create a FileStore with a custom directory and ensure it exists.
    pub fn new_initialized(dir: PathBuf) -> Result<Self, io::Error> {
        let store = Self::new(dir);
        store.ensure_dir_exists()?;
        Ok(store)
    }

    /// Default: `<data_dir>/ascii-store/images/`
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("ascii-store")
            .join("images")
    }

    /// Ensure the store directory exists, creating it if necessary.
    pub fn ensure_dir_exists(&self) -> Result<(), io::Error> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.{}", id, EXTENSION))
    }

    /// All stored ids in ascending order.
    pub fn ids(&self) -> Result<Vec<u64>, io::Error> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Delete the buffer stored under `id`. Returns whether it existed.
    pub fn remove(&self, id: u64) -> Result<bool, io::Error> {
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl ImageStore for FileStore {
    fn store(&self, buffer: &[u8]) -> Result<u64, StoreError> {
        self.ensure_dir_exists()?;

        // Claim the next free id; create_new makes concurrent writers
        // skip ids already taken.
        let mut id = self.ids()?.last().copied().unwrap_or(0) + 1;
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.path_for(id))
            {
                Ok(mut file) => {
                    file.write_all(buffer)?;
                    file.flush()?;
                    return Ok(id);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => id += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.path_for(id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
