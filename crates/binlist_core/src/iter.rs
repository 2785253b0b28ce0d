//! Borrowing traversal in list order.

use crate::error::{CoreError, CoreResult};
use crate::list::BinaryList;
use crate::record;
use binlist_codec::RecordCodec;
use binlist_storage::StorageBackend;

/// Iterator over the values of a [`BinaryList`], head to tail.
///
/// Yields exactly `size()` values by following `next` links. After the
/// first error the iterator is exhausted.
pub struct Iter<'a, C: RecordCodec, B: StorageBackend> {
    list: &'a BinaryList<C, B>,
    position: Option<u32>,
    remaining: usize,
}

impl<'a, C: RecordCodec, B: StorageBackend> Iter<'a, C, B> {
    pub(crate) fn new(list: &'a BinaryList<C, B>) -> Self {
        let remaining = if list.is_detached() { 0 } else { list.size() };
        Self {
            list,
            position: list.header().head,
            remaining,
        }
    }

    fn step(&self, at: u32) -> CoreResult<(Option<u32>, C::Value)> {
        let Some(backend) = self.list.backend() else {
            return Ok((None, C::Value::default()));
        };
        let links = record::read_links(backend, at)?;
        let value = record::read_value(
            backend,
            self.list.codec(),
            at,
            self.list.config().max_payload_len,
        )?;
        Ok((links.next, value))
    }
}

impl<C: RecordCodec, B: StorageBackend> Iterator for Iter<'_, C, B> {
    type Item = CoreResult<C::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let count = self.list.size();
        let Some(at) = self.position else {
            self.remaining = 0;
            return Some(Err(CoreError::BrokenChain {
                visited: count - self.remaining,
                count,
            }));
        };

        match self.step(at) {
            Ok((next, value)) => {
                self.position = next;
                self.remaining -= 1;
                Some(Ok(value))
            }
            Err(error) => {
                self.remaining = 0;
                Some(Err(error))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a, C: RecordCodec, B: StorageBackend> IntoIterator for &'a BinaryList<C, B> {
    type Item = CoreResult<C::Value>;
    type IntoIter = Iter<'a, C, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
