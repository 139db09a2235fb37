//! Staging area for uploaded bitmaps awaiting conversion.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Saves uploads under unique `<unix_seconds>.<n>` names.
///
/// `n` counts saves within the same second and resets when the second
/// changes. Names are claimed with create-new semantics, so managers
/// sharing a directory skip names another one already took.
#[derive(Debug)]
pub struct UploadManager {
    dir: PathBuf,
    last_second: u64,
    same_second_count: u32,
}

impl UploadManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            last_second: 0,
            same_second_count: 0,
        }
    }

    /// Default: `<cache_dir>/ascii-store/uploads/`
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("ascii-store")
            .join("uploads")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to a fresh file and return its path.
    pub fn save(&mut self, data: &[u8]) -> Result<PathBuf, io::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        std::fs::create_dir_all(&self.dir)?;

        loop {
            let name = self.next_name(now);
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(data)?;
                    file.flush()?;
                    log::debug!("saved upload to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} already taken", path.display());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Delete a previously saved upload.
    pub fn remove(&self, path: &Path) -> Result<(), io::Error> {
        std::fs::remove_file(path)
    }

    fn next_name(&mut self, second: u64) -> String {
        if second == self.last_second {
            self.same_second_count += 1;
        } else {
            self.last_second = second;
            self.same_second_count = 0;
        }
        format!("{}.{}", second, self.same_second_count)
    }
}
