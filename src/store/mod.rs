//! Persistence for compressed ASCII art.
//!
//! Stores hand out increasing integer ids starting at 1 and treat the
//! payload as an opaque blob. The store is an explicit value handed to
//! whoever needs it; nothing here holds a global connection.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::art::AsciiImage;
use crate::codec::{Codec, CodecError};

/// Blob storage keyed by an auto-incrementing id.
pub trait ImageStore {
    /// Persist `buffer`, returning its new id.
    fn store(&self, buffer: &[u8]) -> Result<u64, StoreError>;

    /// Fetch the buffer stored under `id`, or `None` if there is none.
    fn fetch(&self, id: u64) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Errors that can occur while storing or loading art.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] CodecError),

    #[error("stored image {id} is corrupt: {source}")]
    Corrupt { id: u64, source: CodecError },

    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Encode `art` with `codec` and persist it.
pub fn save_art<S>(store: &S, codec: &dyn Codec, art: &AsciiImage) -> Result<u64, StoreError>
where
    S: ImageStore + ?Sized,
{
    let buffer = codec.encode(art)?;
    let id = store.store(&buffer)?;
    log::info!(
        "stored {}x{} image as #{} ({} bytes)",
        art.width(),
        art.height(),
        id,
        buffer.len()
    );
    Ok(id)
}

/// Fetch and decode the art stored under `id`.
///
/// An unknown id is `Ok(None)`; a payload that fails to decode is
/// [`StoreError::Corrupt`].
pub fn load_art<S>(store: &S, codec: &dyn Codec, id: u64) -> Result<Option<AsciiImage>, StoreError>
where
    S: ImageStore + ?Sized,
{
    let Some(buffer) = store.fetch(id)? else {
        log::debug!("image #{} not found", id);
        return Ok(None);
    };

    codec
        .decode(&buffer)
        .map(Some)
        .map_err(|source| StoreError::Corrupt { id, source })
}
