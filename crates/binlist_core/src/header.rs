//! List header stored at offset 0.
//!
//! ```text
//! offset 0: head  i32 LE   offset of first record, -1 if none
//! offset 4: tail  i32 LE   offset of last record, -1 if none
//! offset 8: count i32 LE   number of live records
//! ```
//!
//! There is no magic number, version or checksum.

use crate::error::{CoreError, CoreResult};
use crate::link::{link_from_raw, link_to_raw};
use binlist_storage::StorageBackend;
use bytes::{Buf, BufMut};

/// Encoded size of the header.
pub const HEADER_SIZE: usize = 12;

/// In-memory copy of the list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Offset of the first record.
    pub head: Option<u32>,
    /// Offset of the last record.
    pub tail: Option<u32>,
    /// Number of live records.
    pub count: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Header {
    /// Header of an empty list.
    pub const EMPTY: Self = Self {
        head: None,
        tail: None,
        count: 0,
    };

    /// Returns `true` if the header describes an empty list.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Encodes the header.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut buf = &mut out[..];
        buf.put_i32_le(link_to_raw(self.head));
        buf.put_i32_le(link_to_raw(self.tail));
        // count never exceeds the number of 8-byte records below i32::MAX
        buf.put_i32_le(i32::try_from(self.count).unwrap_or(i32::MAX));
        out
    }

    /// Decodes a header.
    ///
    /// Only the sentinel ranges are checked; a header whose count disagrees
    /// with its links is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than [`HEADER_SIZE`] bytes are given, a
    /// link is below -1, or the count is negative.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(CoreError::invalid_format(format!(
                "header needs {HEADER_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let mut buf = bytes;
        let head = link_from_raw(buf.get_i32_le(), "header head")?;
        let tail = link_from_raw(buf.get_i32_le(), "header tail")?;
        let raw_count = buf.get_i32_le();
        let count = u32::try_from(raw_count)
            .map_err(|_| CoreError::invalid_format(format!("negative count {raw_count}")))?;

        Ok(Self { head, tail, count })
    }

    /// Reads the header at offset 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is shorter than a header or the bytes
    /// do not decode.
    pub fn read<B: StorageBackend + ?Sized>(backend: &B) -> CoreResult<Self> {
        let bytes = backend.read_at(0, HEADER_SIZE)?;
        Self::from_bytes(&bytes)
    }

    /// Overwrites the header at offset 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the store holds no header yet or the write fails.
    pub fn write<B: StorageBackend + ?Sized>(&self, backend: &mut B) -> CoreResult<()> {
        backend.write_at(0, &self.to_bytes())?;
        Ok(())
    }

    /// Loads the header, or lays down a fresh empty one.
    ///
    /// A store shorter than [`HEADER_SIZE`] cannot contain any record, so
    /// it is cut back to zero and an empty header is written. This is the
    /// first-open path, not corruption repair.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or an undecodable header.
    pub fn load_or_init<B: StorageBackend + ?Sized>(backend: &mut B) -> CoreResult<Self> {
        if backend.size()? >= HEADER_SIZE as u64 {
            return Self::read(backend);
        }
        Self::init(backend)?;
        Ok(Self::EMPTY)
    }

    /// Writes an empty header into a store that has no complete header.
    pub(crate) fn init<B: StorageBackend + ?Sized>(backend: &mut B) -> CoreResult<()> {
        backend.truncate(0)?;
        backend.append(&Self::EMPTY.to_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binlist_storage::InMemoryBackend;

    #[test]
    fn empty_header_bytes() {
        assert_eq!(
            Header::EMPTY.to_bytes(),
            [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]
        );
    }

    #[test]
    fn populated_header_bytes() {
        let header = Header {
            head: Some(12),
            tail: Some(300),
            count: 2,
        };
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &12i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &300i32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2i32.to_le_bytes());
        assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn rejects_impossible_values() {
        let mut bytes = Header::EMPTY.to_bytes();
        bytes[0..4].copy_from_slice(&(-2i32).to_le_bytes());
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(CoreError::InvalidFormat { .. })
        ));

        let mut bytes = Header::EMPTY.to_bytes();
        bytes[8..12].copy_from_slice(&(-5i32).to_le_bytes());
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(CoreError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn short_input_is_rejected() {
        assert!(Header::from_bytes(&[0; 11]).is_err());
    }

    #[test]
    fn load_or_init_bootstraps_empty_store() {
        let mut backend = InMemoryBackend::new();
        let header = Header::load_or_init(&mut backend).unwrap();

        assert_eq!(header, Header::EMPTY);
        assert_eq!(backend.data(), Header::EMPTY.to_bytes());
    }

    #[test]
    fn load_or_init_discards_partial_header() {
        let mut backend = InMemoryBackend::with_data(vec![1, 2, 3, 4, 5]);
        let header = Header::load_or_init(&mut backend).unwrap();

        assert_eq!(header, Header::EMPTY);
        assert_eq!(backend.data().len(), HEADER_SIZE);
    }

    #[test]
    fn load_or_init_reads_existing_header() {
        let stored = Header {
            head: Some(12),
            tail: Some(12),
            count: 1,
        };
        let mut data = stored.to_bytes().to_vec();
        data.extend_from_slice(&[0xff; 12]);
        let mut backend = InMemoryBackend::with_data(data);

        assert_eq!(Header::load_or_init(&mut backend).unwrap(), stored);
    }

    #[test]
    fn write_overwrites_in_place() {
        let mut backend = InMemoryBackend::new();
        Header::load_or_init(&mut backend).unwrap();

        let header = Header {
            head: Some(12),
            tail: Some(24),
            count: 2,
        };
        header.write(&mut backend).unwrap();

        assert_eq!(backend.data().len(), HEADER_SIZE);
        assert_eq!(Header::read(&backend).unwrap(), header);
    }
}
