//! # binlist storage
//!
//! Byte-store backends for binlist.
//!
//! This crate provides the lowest-level storage abstraction for binlist.
//! Storage backends are **opaque byte stores** addressed by offset - they
//! do not interpret the data they store. The list engine in `binlist_core`
//! treats a backend as an arena where every record is identified by the
//! byte offset it was appended at.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, overwrite, append, flush)
//! - No knowledge of list headers, records or payload codecs
//! - Must be `Send + Sync`
//! - `binlist_core` owns all file format interpretation
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral lists
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use binlist_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"hello world").unwrap();
//! backend.write_at(offset, b"jello").unwrap();
//! let data = backend.read_at(offset, 11).unwrap();
//! assert_eq!(&data, b"jello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
