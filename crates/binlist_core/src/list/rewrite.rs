//! Materialize-and-rebuild path for variable-width payloads.
//!
//! Growing a variable-width payload in place would overwrite the record
//! after it, so any width-changing operation decodes the whole list,
//! applies the change in memory, destroys the file and replays
//! `push_back` for every value. Every record gets a new offset.

use super::BinaryList;
use crate::error::CoreResult;
use crate::header::Header;
use binlist_codec::{encode_payload, RecordCodec};
use binlist_storage::StorageBackend;
use bytes::Bytes;
use tracing::debug;

impl<C: RecordCodec, B: StorageBackend> BinaryList<C, B> {
    pub(super) fn update_by_rewrite(&mut self, index: usize, value: C::Value) -> CoreResult<()> {
        let mut values = self.to_vec()?;
        values[index] = value;
        self.rewrite(&values)?;

        debug!(index, "updated record by rewrite");
        Ok(())
    }

    pub(super) fn sort_by_rewrite(&mut self) -> CoreResult<()> {
        let mut values = self.to_vec()?;
        values.sort();
        self.rewrite(&values)?;

        debug!(len = values.len(), "sorted list by rewrite");
        Ok(())
    }

    /// Replaces the file with a fresh list holding `values` in order.
    ///
    /// All payloads are encoded before the old file is destroyed, so an
    /// unencodable value leaves the list untouched.
    fn rewrite(&mut self, values: &[C::Value]) -> CoreResult<()> {
        let payloads = values
            .iter()
            .map(|value| encode_payload(&self.codec, value))
            .collect::<Result<Vec<Bytes>, _>>()?;

        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };
        self.header = Header::EMPTY;
        self.cursor = None;
        backend.reset()?;
        Header::init(backend)?;

        for payload in &payloads {
            self.push_payload(payload)?;
        }

        debug!(len = payloads.len(), "rebuilt list file");
        Ok(())
    }
}
