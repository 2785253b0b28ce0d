//! Structural check of the on-disk chain.

use crate::error::{CoreError, CoreResult};
use crate::list::BinaryList;
use crate::record;
use binlist_codec::RecordCodec;
use binlist_storage::StorageBackend;
use tracing::debug;

impl<C: RecordCodec, B: StorageBackend> BinaryList<C, B> {
    /// Walks the chain and checks it against the header.
    ///
    /// Verifies that `count` records are reachable from `head`, that every
    /// `prev` link names the record before it, and that the walk ends at
    /// `tail`. Returns the number of records checked.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BrokenChain`] if the chain is shorter than the
    /// header claims, [`CoreError::InvalidFormat`] for any other mismatch,
    /// or a storage error if a link points outside the file.
    pub fn verify(&self) -> CoreResult<usize> {
        let Some(backend) = self.backend() else {
            return Ok(0);
        };
        let header = self.header();
        let count = self.size();

        let mut prev = None;
        let mut position = header.head;
        for visited in 0..count {
            let at = position.ok_or(CoreError::BrokenChain { visited, count })?;
            let links = record::read_links(backend, at)?;
            if links.prev != prev {
                return Err(CoreError::invalid_format(format!(
                    "record at {at} links back to {:?}, expected {prev:?}",
                    links.prev
                )));
            }
            prev = Some(at);
            position = links.next;
        }

        if let Some(extra) = position {
            return Err(CoreError::invalid_format(format!(
                "chain continues to {extra} past count {count}"
            )));
        }
        if prev != header.tail {
            return Err(CoreError::invalid_format(format!(
                "chain ends at {prev:?}, header tail is {:?}",
                header.tail
            )));
        }

        debug!(count, "verified list chain");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BinaryList, Config, CoreError, Header, NEXT_FIELD, PREV_FIELD};
    use binlist_codec::I32Codec;
    use binlist_storage::{InMemoryBackend, StorageBackend};

    fn three_record_image() -> Vec<u8> {
        let mut list =
            BinaryList::with_backend(InMemoryBackend::new(), I32Codec, Config::default()).unwrap();
        for value in [1, 2, 3] {
            list.push_back(value).unwrap();
        }
        list.backend().unwrap().data()
    }

    fn reopen(image: Vec<u8>) -> BinaryList<I32Codec, InMemoryBackend> {
        BinaryList::with_backend(InMemoryBackend::with_data(image), I32Codec, Config::default())
            .unwrap()
    }

    #[test]
    fn consistent_chain_passes() {
        assert_eq!(reopen(three_record_image()).verify().unwrap(), 3);
    }

    #[test]
    fn empty_list_passes() {
        let list =
            BinaryList::with_backend(InMemoryBackend::new(), I32Codec, Config::default()).unwrap();
        assert_eq!(list.verify().unwrap(), 0);
    }

    #[test]
    fn inflated_count_is_broken_chain() {
        let mut image = three_record_image();
        image[8..12].copy_from_slice(&4i32.to_le_bytes());

        assert!(matches!(
            reopen(image).verify(),
            Err(CoreError::BrokenChain {
                visited: 3,
                count: 4
            })
        ));
    }

    #[test]
    fn asymmetric_prev_is_rejected() {
        let mut backend = InMemoryBackend::with_data(three_record_image());
        // Second record sits at 24; point its prev at itself.
        backend
            .write_at(24 + PREV_FIELD, &24i32.to_le_bytes())
            .unwrap();

        let list = BinaryList::with_backend(backend, I32Codec, Config::default()).unwrap();
        assert!(matches!(list.verify(), Err(CoreError::InvalidFormat { .. })));
    }

    #[test]
    fn short_count_is_rejected() {
        let mut backend = InMemoryBackend::with_data(three_record_image());
        let header = Header {
            head: Some(12),
            tail: Some(36),
            count: 2,
        };
        header.write(&mut backend).unwrap();

        let list = BinaryList::with_backend(backend, I32Codec, Config::default()).unwrap();
        assert!(matches!(list.verify(), Err(CoreError::InvalidFormat { .. })));
    }

    #[test]
    fn wrong_tail_is_rejected() {
        let mut backend = InMemoryBackend::with_data(three_record_image());
        backend
            .write_at(24 + NEXT_FIELD, &(-1i32).to_le_bytes())
            .unwrap();
        let header = Header {
            head: Some(12),
            tail: Some(36),
            count: 2,
        };
        header.write(&mut backend).unwrap();

        let list = BinaryList::with_backend(backend, I32Codec, Config::default()).unwrap();
        assert!(matches!(list.verify(), Err(CoreError::InvalidFormat { .. })));
    }
}
