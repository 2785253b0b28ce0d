//! In-place mutation for fixed-width payloads.

use super::BinaryList;
use crate::error::{CoreError, CoreResult};
use crate::record;
use binlist_codec::{encode_payload, RecordCodec, Width};
use binlist_storage::StorageBackend;
use tracing::debug;

impl<C: RecordCodec, B: StorageBackend> BinaryList<C, B> {
    /// Overwrites the payload at `index`. Links are left alone.
    pub(super) fn update_in_place(&mut self, index: usize, value: &C::Value) -> CoreResult<()> {
        let payload = encode_payload(&self.codec, value)?;
        let len = self.size();
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let at = record::walk(&*backend, self.header.head, index, len)?;
        record::write_fixed_payload(backend, at, &payload)?;

        debug!(index, offset = at, "updated record in place");
        Ok(())
    }

    /// Bubble sort over the chain, swapping payload bytes between
    /// neighbouring records until a full pass makes no swap.
    pub(super) fn sort_in_place(&mut self) -> CoreResult<()> {
        let Width::Fixed(width) = self.codec.width() else {
            return Ok(());
        };
        let len = self.size();
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut swapped = false;
            let mut current = self
                .header
                .head
                .ok_or(CoreError::BrokenChain { visited: 0, count: len })?;

            for visited in 1..len {
                let next = record::read_next(&*backend, current)?
                    .ok_or(CoreError::BrokenChain { visited, count: len })?;

                let left = record::read_fixed_payload(&*backend, current, width)?;
                let right = record::read_fixed_payload(&*backend, next, width)?;
                if self.codec.decode_body(&left)? > self.codec.decode_body(&right)? {
                    record::write_fixed_payload(backend, current, &right)?;
                    record::write_fixed_payload(backend, next, &left)?;
                    swapped = true;
                }

                current = next;
            }

            if !swapped {
                break;
            }
        }

        debug!(len, passes, "sorted list in place");
        Ok(())
    }
}
