//! # binlist codec
//!
//! Record codecs for binlist.
//!
//! A codec converts a value of the record type to and from the payload
//! bytes stored after a record's `prev`/`next` links. Codecs come in two
//! strategies, reported by [`RecordCodec::width`]:
//!
//! - [`Width::Fixed`] - every value encodes to the same number of bytes, so
//!   the list engine may overwrite a payload in place
//! - [`Width::Variable`] - the body is framed with a 4-byte length prefix;
//!   overwriting in place could spill into the next record, so the engine
//!   rebuilds the file instead
//!
//! ## Wire formats
//!
//! - [`I32Codec`]: 4 bytes, little-endian
//! - [`PersonCodec`]: 44 bytes, 40-byte zero-padded name then `age:i32`
//! - [`StringCodec`]: `length:i32` then `length` raw bytes, kept as a
//!   [`ByteString`] whatever their encoding
//!
//! ## Usage
//!
//! ```
//! use binlist_codec::{encode_payload, I32Codec, RecordCodec, Width};
//!
//! let payload = encode_payload(&I32Codec, &-1).unwrap();
//! assert_eq!(&payload[..], &[0xff, 0xff, 0xff, 0xff]);
//! assert_eq!(I32Codec.width(), Width::Fixed(4));
//! assert_eq!(I32Codec.decode_body(&payload).unwrap(), -1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod frame;
mod int;
mod person;
mod string;
mod text;

pub use error::{CodecError, CodecResult};
pub use frame::{
    decode_length_prefix, encode_payload, LENGTH_PREFIX_SIZE, MAX_VARIABLE_LEN,
};
pub use int::I32Codec;
pub use person::{Person, PersonCodec, PERSON_AGE_SIZE, PERSON_NAME_SIZE, PERSON_SIZE};
pub use string::StringCodec;
pub use text::ByteString;

use bytes::BytesMut;
use std::fmt;

/// Encoded width of a codec's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Every value encodes to exactly this many bytes.
    Fixed(usize),
    /// Values encode to a length-prefixed body of varying size.
    Variable,
}

impl Width {
    /// Returns `true` if payloads of this width can be overwritten in place.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

/// Converts record values to and from their payload bytes.
///
/// Implementations only deal with the *body*. Length framing for
/// variable-width codecs is applied by [`encode_payload`] and read back
/// by the list engine, so a codec never sees the prefix.
pub trait RecordCodec {
    /// The record type. `Default` is the placeholder returned for
    /// rejected reads; `Ord` drives sorting.
    type Value: Clone + Default + Ord + fmt::Debug;

    /// Reports whether payloads have a fixed width.
    fn width(&self) -> Width;

    /// Appends the body encoding of `value` to `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn encode_body(&self, value: &Self::Value, buf: &mut BytesMut) -> CodecResult<()>;

    /// Decodes a value from exactly one body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is truncated or malformed.
    fn decode_body(&self, body: &[u8]) -> CodecResult<Self::Value>;
}
