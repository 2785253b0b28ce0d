//! Variable-width string codec.

use crate::error::CodecResult;
use crate::text::ByteString;
use crate::{RecordCodec, Width};
use bytes::BytesMut;

/// Codec for string records.
///
/// The body is the raw text bytes with no terminator and no encoding
/// check, so bodies written in any code page decode unchanged. The
/// length prefix is added by [`crate::encode_payload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringCodec;

impl RecordCodec for StringCodec {
    type Value = ByteString;

    fn width(&self) -> Width {
        Width::Variable
    }

    fn encode_body(&self, value: &ByteString, buf: &mut BytesMut) -> CodecResult<()> {
        buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn decode_body(&self, body: &[u8]) -> CodecResult<ByteString> {
        Ok(ByteString::from(body))
    }
}
