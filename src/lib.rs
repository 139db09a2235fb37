//! ascii-store library crate.
//!
//! Converts raster images to ASCII art, compresses the result with a
//! run-length codec and keeps it under a numeric id.
//!
//! ```text
//! bitmap -> ascii::convert -> AsciiImage -> codec::encode -> store
//! store -> codec::decode -> AsciiImage -> render
//! ```

pub mod art;
pub mod ascii;
pub mod cli;
pub mod codec;
pub mod config;
pub mod render;
pub mod retry;
pub mod store;
pub mod upload;

pub use art::{AsciiImage, StyleCode};
pub use codec::{decode, encode, Codec, CodecError};
