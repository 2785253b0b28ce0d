//! Fixed-width integer codec.

use crate::error::{CodecError, CodecResult};
use crate::{RecordCodec, Width};
use bytes::{Buf, BufMut, BytesMut};

/// Codec for `i32` records: 4 bytes, little-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct I32Codec;

impl I32Codec {
    const WIDTH: usize = 4;
}

impl RecordCodec for I32Codec {
    type Value = i32;

    fn width(&self) -> Width {
        Width::Fixed(Self::WIDTH)
    }

    fn encode_body(&self, value: &i32, buf: &mut BytesMut) -> CodecResult<()> {
        buf.put_i32_le(*value);
        Ok(())
    }

    fn decode_body(&self, mut body: &[u8]) -> CodecResult<i32> {
        if body.remaining() < Self::WIDTH {
            return Err(CodecError::UnexpectedEof {
                expected: Self::WIDTH,
                actual: body.remaining(),
            });
        }
        Ok(body.get_i32_le())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_payload;
    use proptest::prelude::*;

    #[test]
    fn encodes_little_endian() {
        let mut buf = BytesMut::new();
        I32Codec.encode_body(&0x0102_0304, &mut buf).unwrap();
        assert_eq!(&buf[..], &[4, 3, 2, 1]);
    }

    #[test]
    fn decodes_negative_values() {
        assert_eq!(I32Codec.decode_body(&[0xfe, 0xff, 0xff, 0xff]).unwrap(), -2);
    }

    #[test]
    fn short_body_is_an_error() {
        let err = I32Codec.decode_body(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnexpectedEof {
                expected: 4,
                actual: 2
            }
        );
    }

    proptest! {
        #[test]
        fn every_value_survives_encoding(value in any::<i32>()) {
            let payload = encode_payload(&I32Codec, &value).unwrap();
            prop_assert_eq!(&payload[..], &value.to_le_bytes()[..]);
            prop_assert_eq!(I32Codec.decode_body(&payload).unwrap(), value);
        }
    }
}
