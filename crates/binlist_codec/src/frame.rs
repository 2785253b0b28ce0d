//! Payload framing shared by all codecs.

use crate::error::{CodecError, CodecResult};
use crate::{RecordCodec, Width};
use bytes::{BufMut, Bytes, BytesMut};

/// Size of the `length:i32` prefix in front of a variable-width body.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Largest variable-width body accepted when encoding, and the default
/// ceiling of the decode guard.
pub const MAX_VARIABLE_LEN: usize = 1_000_000;

/// Encodes `value` into the exact payload bytes stored in a record.
///
/// Fixed-width codecs must produce exactly their declared width.
/// Variable-width bodies are prefixed with their length.
///
/// # Errors
///
/// Returns [`CodecError::WidthMismatch`] for a misbehaving fixed-width
/// codec, [`CodecError::PayloadTooLarge`] for a body above
/// [`MAX_VARIABLE_LEN`], or any error raised by the codec itself.
pub fn encode_payload<C: RecordCodec + ?Sized>(codec: &C, value: &C::Value) -> CodecResult<Bytes> {
    let mut body = BytesMut::new();
    codec.encode_body(value, &mut body)?;

    match codec.width() {
        Width::Fixed(expected) => {
            if body.len() != expected {
                return Err(CodecError::WidthMismatch {
                    expected,
                    actual: body.len(),
                });
            }
            Ok(body.freeze())
        }
        Width::Variable => {
            let len = body.len();
            if len > MAX_VARIABLE_LEN {
                return Err(CodecError::PayloadTooLarge {
                    len,
                    max: MAX_VARIABLE_LEN,
                });
            }
            let prefix = i32::try_from(len).map_err(|_| CodecError::PayloadTooLarge {
                len,
                max: MAX_VARIABLE_LEN,
            })?;
            let mut framed = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + len);
            framed.put_i32_le(prefix);
            framed.extend_from_slice(&body);
            Ok(framed.freeze())
        }
    }
}

/// Interprets a variable-width length prefix.
///
/// Returns `None` when the declared length is negative or above `max`;
/// callers substitute an empty value instead of reading the body.
#[must_use]
pub fn decode_length_prefix(prefix: [u8; LENGTH_PREFIX_SIZE], max: usize) -> Option<usize> {
    let len = i32::from_le_bytes(prefix);
    usize::try_from(len).ok().filter(|&len| len <= max)
}
