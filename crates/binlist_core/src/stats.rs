//! Space accounting for a list file.

use crate::error::CoreResult;
use crate::header::HEADER_SIZE;
use crate::list::BinaryList;
use crate::record;
use binlist_codec::RecordCodec;
use binlist_storage::StorageBackend;

/// Snapshot of how the bytes of a list file are used.
///
/// Erased records leave their bytes behind as dead space. Clearing the
/// list drops it, and so does a variable-width update or sort, since
/// both rebuild the file from the live values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListStats {
    /// Number of live records.
    pub count: usize,
    /// Total file size in bytes.
    pub file_size: u64,
    /// Bytes occupied by live records, links included.
    pub live_bytes: u64,
    /// Bytes belonging to unlinked records.
    pub dead_bytes: u64,
}

impl<C: RecordCodec, B: StorageBackend> BinaryList<C, B> {
    /// Walks the list and measures live and dead space.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails.
    pub fn stats(&self) -> CoreResult<ListStats> {
        let Some(backend) = self.backend() else {
            return Ok(ListStats::default());
        };

        let count = self.size();
        let file_size = backend.size()?;
        let mut live_bytes = 0u64;
        let mut position = self.header().head;

        for _ in 0..count {
            let Some(at) = position else {
                break;
            };
            live_bytes += record::record_len(backend, self.codec(), at)?;
            position = record::read_next(backend, at)?;
        }

        let used = HEADER_SIZE as u64 + live_bytes;
        Ok(ListStats {
            count,
            file_size,
            live_bytes,
            dead_bytes: file_size.saturating_sub(used),
        })
    }
}
