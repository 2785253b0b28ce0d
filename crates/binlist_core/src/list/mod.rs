//! The file-backed doubly-linked list.
//!
//! [`BinaryList`] owns a storage backend and exposes only list operations.
//! Every operation works on 0-based logical indices and locates records
//! by walking `next` links from the head.
//!
//! Payload width decides how values change:
//!
//! - fixed-width codecs overwrite payload bytes in place (`update`, `sort`)
//! - variable-width codecs materialize the whole list, change it in
//!   memory, then rebuild the file by replaying `push_back`
//!
//! Deleted records are unlinked, never reclaimed.

mod in_place;
mod rewrite;

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::header::Header;
use crate::iter::Iter;
use crate::record::{self, Links};
use binlist_codec::{encode_payload, RecordCodec};
use binlist_storage::{FileBackend, StorageBackend};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// A doubly-linked list persisted in a flat binary file.
///
/// `C` converts values to payload bytes and `B` stores those bytes. The
/// list holds the backend privately; nothing outside the list touches it.
///
/// # Detached lists
///
/// [`BinaryList::open_or_detached`] returns a list without a backend when
/// the file cannot be opened. Such a list is permanently empty and every
/// operation on it is a silent no-op.
///
/// # Example
///
/// ```rust
/// use binlist_codec::I32Codec;
/// use binlist_core::{BinaryList, Config};
/// use binlist_storage::InMemoryBackend;
///
/// let mut list = BinaryList::with_backend(InMemoryBackend::new(), I32Codec, Config::default()).unwrap();
/// list.push_back(5).unwrap();
/// list.push_back(3).unwrap();
/// list.push_back(8).unwrap();
/// list.sort().unwrap();
/// assert_eq!(list.to_vec().unwrap(), vec![3, 5, 8]);
/// ```
pub struct BinaryList<C: RecordCodec, B: StorageBackend = FileBackend> {
    backend: Option<B>,
    codec: C,
    config: Config,
    header: Header,
    cursor: Option<u32>,
}

impl<C: RecordCodec, B: StorageBackend> fmt::Debug for BinaryList<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryList")
            .field("header", &self.header)
            .field("detached", &self.backend.is_none())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<C: RecordCodec> BinaryList<C, FileBackend> {
    /// Opens the list stored at `path`, creating an empty one if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, or its
    /// header does not decode.
    pub fn open(path: impl AsRef<Path>, codec: C) -> CoreResult<Self> {
        Self::open_with_config(path, codec, Config::default())
    }

    /// Opens the list stored at `path` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created, or its
    /// header does not decode.
    pub fn open_with_config(path: impl AsRef<Path>, codec: C, config: Config) -> CoreResult<Self> {
        let path = path.as_ref();
        let backend = if config.create_dirs {
            FileBackend::open_with_create_dirs(path)?
        } else {
            FileBackend::open(path)?
        };
        debug!(path = %path.display(), "opened list file");
        Self::with_backend(backend, codec, config)
    }

    /// Opens the list at `path`, falling back to a detached list.
    ///
    /// Use this when an unavailable file should degrade to an empty,
    /// inert list instead of failing.
    pub fn open_or_detached(path: impl AsRef<Path>, codec: C, config: Config) -> Self
    where
        C: Clone,
    {
        let path = path.as_ref();
        match Self::open_with_config(path, codec.clone(), config.clone()) {
            Ok(list) => list,
            Err(error) => {
                warn!(path = %path.display(), %error, "list file unavailable, continuing detached");
                Self::detached(codec, config)
            }
        }
    }
}

impl<C: RecordCodec, B: StorageBackend> BinaryList<C, B> {
    /// Builds a list over an existing backend.
    ///
    /// A backend shorter than a header is initialized as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or an undecodable header.
    pub fn with_backend(mut backend: B, codec: C, config: Config) -> CoreResult<Self> {
        let header = Header::load_or_init(&mut backend)?;
        debug!(?header, "loaded list header");
        Ok(Self {
            backend: Some(backend),
            codec,
            config,
            header,
            cursor: None,
        })
    }

    /// Builds a list with no backend. Every operation is a no-op.
    #[must_use]
    pub fn detached(codec: C, config: Config) -> Self {
        Self {
            backend: None,
            codec,
            config,
            header: Header::EMPTY,
            cursor: None,
        }
    }

    /// Returns `true` if the list has no backend.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.backend.is_none()
    }

    /// Number of live records.
    #[must_use]
    pub fn size(&self) -> usize {
        self.header.count as usize
    }

    /// Returns `true` if the list holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    /// Copy of the in-memory header.
    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// The codec used for payloads.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The configuration the list was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends `value` after the current tail.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or a write fails.
    pub fn push_back(&mut self, value: C::Value) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        let payload = encode_payload(&self.codec, &value)?;
        self.push_payload(&payload)
    }

    /// Appends an already-encoded payload after the current tail.
    fn push_payload(&mut self, payload: &[u8]) -> CoreResult<()> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let links = Links {
            prev: self.header.tail,
            next: None,
        };
        let at = record::append(backend, links, payload)?;

        match self.header.tail {
            Some(tail) => record::write_next(backend, tail, Some(at))?,
            None => self.header.head = Some(at),
        }
        self.header.tail = Some(at);
        self.header.count += 1;

        debug!(offset = at, count = self.header.count, "pushed record");
        self.commit_header()
    }

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// `index` may equal the current size, which appends. Larger indices
    /// are rejected without touching the file.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails, or for a rejected index when
    /// [`Config::strict_indices`] is set.
    pub fn insert(&mut self, index: usize, value: C::Value) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        let len = self.size();
        if index > len {
            return self.reject_index("insert", index);
        }
        if index == len {
            return self.push_back(value);
        }

        let payload = encode_payload(&self.codec, &value)?;
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let at = if index == 0 {
            let old_head = self.header.head;
            let at = record::append(
                backend,
                Links {
                    prev: None,
                    next: old_head,
                },
                &payload,
            )?;
            if let Some(head) = old_head {
                record::write_prev(backend, head, Some(at))?;
            }
            self.header.head = Some(at);
            if self.header.tail.is_none() {
                self.header.tail = Some(at);
            }
            at
        } else {
            let current = record::walk(&*backend, self.header.head, index, len)?;
            let old_prev = record::read_links(&*backend, current)?.prev;
            let at = record::append(
                backend,
                Links {
                    prev: old_prev,
                    next: Some(current),
                },
                &payload,
            )?;
            record::write_prev(backend, current, Some(at))?;
            if let Some(prev) = old_prev {
                record::write_next(backend, prev, Some(at))?;
            }
            at
        };
        self.header.count += 1;

        debug!(index, offset = at, count = self.header.count, "inserted record");
        self.commit_header()
    }

    /// Unlinks the record at `index`.
    ///
    /// The record's bytes stay in the file as dead space.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails, or for a rejected index when
    /// [`Config::strict_indices`] is set.
    pub fn erase(&mut self, index: usize) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        let len = self.size();
        if index >= len {
            return self.reject_index("erase", index);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let at = record::walk(&*backend, self.header.head, index, len)?;
        let links = record::read_links(&*backend, at)?;

        if self.header.head == Some(at) {
            self.header.head = links.next;
        }
        if self.header.tail == Some(at) {
            self.header.tail = links.prev;
        }
        if let Some(prev) = links.prev {
            record::write_next(backend, prev, links.next)?;
        }
        if let Some(next) = links.next {
            record::write_prev(backend, next, links.prev)?;
        }
        self.header.count -= 1;

        debug!(index, offset = at, count = self.header.count, "erased record");
        self.commit_header()
    }

    /// Returns the value at `index`.
    ///
    /// An out-of-range index yields `C::Value::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails or the payload does not decode,
    /// or for a rejected index when [`Config::strict_indices`] is set.
    pub fn get(&self, index: usize) -> CoreResult<C::Value> {
        let Some(backend) = self.backend.as_ref() else {
            return Ok(C::Value::default());
        };
        let len = self.size();
        if index >= len {
            self.reject_index("get", index)?;
            return Ok(C::Value::default());
        }

        let at = record::walk(backend, self.header.head, index, len)?;
        record::read_value(backend, &self.codec, at, self.config.max_payload_len)
    }

    /// Replaces the value at `index`.
    ///
    /// Fixed-width payloads are overwritten in place. Variable-width lists
    /// are rebuilt from scratch, which moves every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or I/O fails, or
    /// for a rejected index when [`Config::strict_indices`] is set.
    pub fn update(&mut self, index: usize, value: C::Value) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        if index >= self.size() {
            return self.reject_index("update", index);
        }

        if self.codec.width().is_fixed() {
            self.update_in_place(index, &value)
        } else {
            self.update_by_rewrite(index, value)
        }
    }

    /// Removes the last record.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails, or for an empty list when
    /// [`Config::strict_indices`] is set.
    pub fn pop_back(&mut self) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        if self.is_empty() {
            return self.reject_empty("pop_back");
        }
        self.erase(self.size() - 1)
    }

    /// Removes the first record.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails, or for an empty list when
    /// [`Config::strict_indices`] is set.
    pub fn pop_front(&mut self) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        if self.is_empty() {
            return self.reject_empty("pop_front");
        }
        self.erase(0)
    }

    /// Destroys the file and starts over with an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be recreated. The list is left
    /// without a usable backend in that case.
    pub fn clear(&mut self) -> CoreResult<()> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        self.header = Header::EMPTY;
        self.cursor = None;
        backend.reset()?;
        Header::init(backend)?;
        if self.config.sync_on_write {
            backend.sync()?;
        }

        debug!("cleared list");
        Ok(())
    }

    /// Sorts the list in ascending order of `C::Value`.
    ///
    /// Fixed-width lists are bubble-sorted by swapping payload bytes in
    /// place; links never change. Variable-width lists are sorted in
    /// memory and rebuilt. Lists with fewer than two records are left as
    /// they are.
    ///
    /// # Errors
    ///
    /// Returns an error if I/O fails or a payload does not decode.
    pub fn sort(&mut self) -> CoreResult<()> {
        if self.backend.is_none() {
            return Ok(());
        }
        if self.size() <= 1 {
            warn!(len = self.size(), "nothing to sort");
            return Ok(());
        }

        if self.codec.width().is_fixed() {
            self.sort_in_place()
        } else {
            self.sort_by_rewrite()
        }
    }

    /// Decodes every record in list order.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails or a payload does not decode.
    pub fn to_vec(&self) -> CoreResult<Vec<C::Value>> {
        self.iter().collect()
    }

    /// Returns a borrowing iterator over the values in list order.
    ///
    /// The list cannot be mutated while the iterator is alive.
    pub fn iter(&self) -> Iter<'_, C, B> {
        Iter::new(self)
    }

    /// Positions the built-in cursor at the head.
    pub fn init_iterator(&mut self) {
        self.cursor = self.header.head;
    }

    /// Returns `true` while the built-in cursor points at a record.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor.is_some()
    }

    /// Decodes the record under the cursor and advances to its successor.
    ///
    /// Returns `C::Value::default()` once the cursor is exhausted. The
    /// cursor is not a snapshot: mutating the list between
    /// [`Self::init_iterator`] and exhaustion gives unspecified results.
    ///
    /// # Errors
    ///
    /// Returns an error if a read fails or the payload does not decode.
    pub fn next_value(&mut self) -> CoreResult<C::Value> {
        let (Some(at), Some(backend)) = (self.cursor, self.backend.as_ref()) else {
            return Ok(C::Value::default());
        };

        let links = record::read_links(backend, at)?;
        let value = record::read_value(backend, &self.codec, at, self.config.max_payload_len)?;
        self.cursor = links.next;
        Ok(value)
    }

    /// Writes a numbered listing of every value to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if a read, decode or write fails.
    pub fn print_to<W: io::Write>(&self, out: &mut W) -> CoreResult<()>
    where
        C::Value: fmt::Display,
    {
        if self.is_empty() {
            writeln!(out, "list is empty")?;
            return Ok(());
        }

        writeln!(out, "list contents (size={}):", self.size())?;
        for (index, value) in self.iter().enumerate() {
            writeln!(out, "  [{index}]: {}", value?)?;
        }
        Ok(())
    }

    /// Flushes pending writes to the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&mut self) -> CoreResult<()> {
        if let Some(backend) = self.backend.as_mut() {
            backend.flush()?;
        }
        Ok(())
    }

    /// Syncs the file to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    pub fn sync(&mut self) -> CoreResult<()> {
        if let Some(backend) = self.backend.as_mut() {
            backend.sync()?;
        }
        Ok(())
    }

    pub(crate) fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Persists the in-memory header.
    ///
    /// Not atomic with the record writes that preceded it.
    fn commit_header(&mut self) -> CoreResult<()> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };
        self.header.write(backend)?;
        if self.config.sync_on_write {
            backend.sync()?;
        }
        Ok(())
    }

    fn reject_index(&self, op: &'static str, index: usize) -> CoreResult<()> {
        let len = self.size();
        warn!(op, index, len, "index out of range");
        if self.config.strict_indices {
            return Err(CoreError::IndexOutOfRange { op, index, len });
        }
        Ok(())
    }

    fn reject_empty(&self, op: &'static str) -> CoreResult<()> {
        warn!(op, "list is empty");
        if self.config.strict_indices {
            return Err(CoreError::EmptyList { op });
        }
        Ok(())
    }
}
