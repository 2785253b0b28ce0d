//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for binlist.
///
/// Storage backends are **opaque byte stores**. They provide simple operations
/// for reading, overwriting, appending, and flushing data. The list engine owns
/// all file format interpretation - backends do not understand headers,
/// records, or links.
///
/// # Invariants
///
/// - `append` returns the offset where data was written, which is the
///   size of the store before the call
/// - `read_at` returns exactly the bytes most recently written at that offset
/// - `write_at` never changes the size of the store
/// - `reset` leaves an empty store behind
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The offset is beyond the current size
    /// - The read would extend beyond the current size
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Overwrites bytes in place starting at `offset`.
    ///
    /// The whole range `offset..offset + data.len()` must already exist;
    /// growing the store goes through [`StorageBackend::append`].
    ///
    /// # Errors
    ///
    /// Returns an error if the range extends beyond the current size or
    /// an I/O error occurs.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Appends data to the end of the storage.
    ///
    /// Returns the offset where the data was written.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn append(&mut self, data: &[u8]) -> StorageResult<u64>;

    /// Flushes all pending writes to the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// This is the offset where the next `append` will write.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// This is a stronger guarantee than `flush` - it ensures that
    /// file metadata (size, timestamps) is also durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;

    /// Truncates the storage to the given size.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The truncation fails
    /// - `new_size` is greater than current size
    fn truncate(&mut self, new_size: u64) -> StorageResult<()>;

    /// Destroys the underlying store and recreates it empty.
    ///
    /// Any handle held by the backend is released before the store is
    /// removed, and a fresh one is acquired afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be removed or recreated.
    fn reset(&mut self) -> StorageResult<()>;
}
