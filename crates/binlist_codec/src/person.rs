//! Fixed-width `Person` record and its codec.

use crate::error::{CodecError, CodecResult};
use crate::text::ByteString;
use crate::{RecordCodec, Width};
use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the zero-padded name buffer.
pub const PERSON_NAME_SIZE: usize = 40;

/// Size of the trailing age field.
pub const PERSON_AGE_SIZE: usize = 4;

/// Total encoded width of a `Person`: the two fields packed back to back.
pub const PERSON_SIZE: usize = PERSON_NAME_SIZE + PERSON_AGE_SIZE;

/// A named person with an age.
///
/// Ordered by name (bytewise) and then by age.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Person {
    /// Display name as stored. At most `PERSON_NAME_SIZE - 1` bytes
    /// survive encoding.
    pub name: ByteString,
    /// Age in years.
    pub age: i32,
}

impl Person {
    /// Creates a person, clipping the name to what the record can hold.
    ///
    /// The name is cut at the first NUL and then shortened to at most
    /// 39 bytes, without splitting a character when it is UTF-8, so the
    /// value compares equal to what a round trip through [`PersonCodec`]
    /// returns.
    #[must_use]
    pub fn new(name: impl AsRef<[u8]>, age: i32) -> Self {
        Self {
            name: ByteString::from(clip_name(name.as_ref())),
            age,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (age={})", self.name, self.age)
    }
}

fn clip_name(name: &[u8]) -> &[u8] {
    let name = name.split(|&b| b == 0).next().unwrap_or_default();
    let limit = PERSON_NAME_SIZE - 1;
    if name.len() <= limit {
        return name;
    }
    let mut end = limit;
    if let Ok(text) = std::str::from_utf8(name) {
        while !text.is_char_boundary(end) {
            end -= 1;
        }
    }
    &name[..end]
}

/// Codec for [`Person`] records.
///
/// Layout (44 bytes, no padding):
///
/// | bytes  | field                                       |
/// |--------|---------------------------------------------|
/// | 0..40  | name, raw bytes, zero padded, NUL-terminated |
/// | 40..44 | age, `i32` little-endian                     |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonCodec;

impl RecordCodec for PersonCodec {
    type Value = Person;

    fn width(&self) -> Width {
        Width::Fixed(PERSON_SIZE)
    }

    fn encode_body(&self, value: &Person, buf: &mut BytesMut) -> CodecResult<()> {
        let name = clip_name(value.name.as_bytes());
        buf.reserve(PERSON_SIZE);
        buf.extend_from_slice(name);
        buf.put_bytes(0, PERSON_NAME_SIZE - name.len());
        buf.put_i32_le(value.age);
        Ok(())
    }

    fn decode_body(&self, mut body: &[u8]) -> CodecResult<Person> {
        if body.remaining() < PERSON_SIZE {
            return Err(CodecError::UnexpectedEof {
                expected: PERSON_SIZE,
                actual: body.remaining(),
            });
        }

        let raw = &body[..PERSON_NAME_SIZE];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(PERSON_NAME_SIZE);
        let name = ByteString::from(&raw[..end]);

        body.advance(PERSON_NAME_SIZE);
        let age = body.get_i32_le();

        Ok(Person { name, age })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_payload;
    use proptest::prelude::*;

    #[test]
    fn layout_is_packed() {
        let payload = encode_payload(&PersonCodec, &Person::new("Ann", 30)).unwrap();
        assert_eq!(payload.len(), 44);
        assert_eq!(&payload[..3], b"Ann");
        assert!(payload[3..40].iter().all(|&b| b == 0));
        assert_eq!(&payload[40..], &30i32.to_le_bytes());
    }

    #[test]
    fn roundtrip() {
        let person = Person::new("Zoë", -4);
        let payload = encode_payload(&PersonCodec, &person).unwrap();
        assert_eq!(PersonCodec.decode_body(&payload).unwrap(), person);
    }

    #[test]
    fn long_names_keep_a_terminator() {
        let person = Person::new("x".repeat(60), 1);
        assert_eq!(person.name.len(), 39);

        let payload = encode_payload(&PersonCodec, &person).unwrap();
        assert_eq!(payload[39], 0);
    }

    #[test]
    fn clipping_respects_char_boundaries() {
        // 19 two-byte chars = 38 bytes, the 20th would end at byte 40.
        let person = Person::new("é".repeat(25), 1);
        assert_eq!(person.name.len(), 38);
        assert_eq!(person.name.as_str().unwrap().chars().count(), 19);
    }

    #[test]
    fn unclipped_field_values_are_clipped_on_encode() {
        let person = Person {
            name: "y".repeat(50).into(),
            age: 2,
        };
        let payload = encode_payload(&PersonCodec, &person).unwrap();
        let decoded = PersonCodec.decode_body(&payload).unwrap();
        assert_eq!(decoded, Person::new("y".repeat(50), 2));
    }

    #[test]
    fn decode_reads_until_first_nul() {
        let mut raw = [0u8; PERSON_SIZE];
        raw[..3].copy_from_slice(b"Bob");
        raw[4..9].copy_from_slice(b"stale");
        raw[40..].copy_from_slice(&7i32.to_le_bytes());

        let person = PersonCodec.decode_body(&raw).unwrap();
        assert_eq!(person, Person::new("Bob", 7));
    }

    #[test]
    fn legacy_names_decode_unchanged() {
        // "Иван" in Windows-1251.
        let cp1251 = [0xc8, 0xe2, 0xe0, 0xed];
        let mut raw = [0u8; PERSON_SIZE];
        raw[..4].copy_from_slice(&cp1251);
        raw[40..].copy_from_slice(&25i32.to_le_bytes());

        let person = PersonCodec.decode_body(&raw).unwrap();
        assert_eq!(person.name.as_bytes(), &cp1251);
        assert_eq!(person.age, 25);

        let payload = encode_payload(&PersonCodec, &person).unwrap();
        assert_eq!(&payload[..], &raw[..]);
    }

    #[test]
    fn non_utf8_names_clip_at_byte_limit() {
        let person = Person::new([0xe0u8; 50], 1);
        assert_eq!(person.name.len(), 39);
    }

    #[test]
    fn ordering_is_name_then_age() {
        let mut people = vec![
            Person::new("bob", 20),
            Person::new("al", 50),
            Person::new("bob", 10),
        ];
        people.sort();
        assert_eq!(
            people,
            vec![
                Person::new("al", 50),
                Person::new("bob", 10),
                Person::new("bob", 20),
            ]
        );
    }

    #[test]
    fn display() {
        assert_eq!(Person::new("Ann", 30).to_string(), "Ann (age=30)");
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&Person::new("Ann", 30)).unwrap();
        assert_eq!(json, r#"{"name":"Ann","age":30}"#);
    }

    proptest! {
        #[test]
        fn records_survive_encoding(
            name in prop::collection::vec(1u8..=255, 0..=39),
            age in any::<i32>(),
        ) {
            let person = Person::new(&name, age);
            prop_assert_eq!(person.name.as_bytes(), &name[..]);

            let payload = encode_payload(&PersonCodec, &person).unwrap();
            prop_assert_eq!(payload.len(), PERSON_SIZE);
            prop_assert_eq!(PersonCodec.decode_body(&payload).unwrap(), person);
        }
    }
}
