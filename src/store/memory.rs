//! MemoryStore - process-local blob store.

use std::sync::Mutex;

use super::{ImageStore, StoreError};

/// Keeps buffers in memory; ids are positions plus one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<Vec<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored buffers.
    pub fn len(&self) -> Result<usize, StoreError> {
        let blobs = self.blobs.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(blobs.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ImageStore for MemoryStore {
    fn store(&self, buffer: &[u8]) -> Result<u64, StoreError> {
        let mut blobs = self.blobs.lock().map_err(|_| StoreError::Poisoned)?;
        blobs.push(buffer.to_vec());
        Ok(blobs.len() as u64)
    }

    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        let blobs = self.blobs.lock().map_err(|_| StoreError::Poisoned)?;
        let Some(index) = id.checked_sub(1) else {
            return Ok(None);
        };
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| blobs.get(i))
            .cloned())
    }
}
