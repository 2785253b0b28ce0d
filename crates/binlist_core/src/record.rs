//! Record layout and the pointer-chasing primitives built on it.
//!
//! ```text
//! +0  prev    i32 LE
//! +4  next    i32 LE
//! +8  payload fixed width, or length:i32 LE + body
//! ```
//!
//! A record's identity is the offset it was appended at. Only the link
//! fields and (for fixed-width codecs) the payload are ever rewritten.

use crate::error::{CoreError, CoreResult};
use crate::link::{link_from_raw, link_to_raw, to_offset};
use binlist_codec::{decode_length_prefix, RecordCodec, Width, LENGTH_PREFIX_SIZE};
use binlist_storage::StorageBackend;
use bytes::{Buf, BufMut, BytesMut};
use tracing::warn;

/// Offset of the `prev` field within a record.
pub const PREV_FIELD: u64 = 0;

/// Offset of the `next` field within a record.
pub const NEXT_FIELD: u64 = 4;

/// Offset of the payload within a record.
pub const PAYLOAD_FIELD: u64 = 8;

/// Size of the two link fields.
pub const LINKS_SIZE: usize = 8;

/// The two link fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Links {
    /// Predecessor offset.
    pub prev: Option<u32>,
    /// Successor offset.
    pub next: Option<u32>,
}

impl Links {
    fn to_bytes(self) -> [u8; LINKS_SIZE] {
        let mut out = [0u8; LINKS_SIZE];
        let mut buf = &mut out[..];
        buf.put_i32_le(link_to_raw(self.prev));
        buf.put_i32_le(link_to_raw(self.next));
        out
    }
}

fn read_link<B: StorageBackend + ?Sized>(
    backend: &B,
    at: u32,
    field: u64,
    name: &str,
) -> CoreResult<Option<u32>> {
    let bytes = backend.read_at(u64::from(at) + field, 4)?;
    let mut buf = &bytes[..];
    link_from_raw(buf.get_i32_le(), name)
}

fn write_link<B: StorageBackend + ?Sized>(
    backend: &mut B,
    at: u32,
    field: u64,
    link: Option<u32>,
) -> CoreResult<()> {
    backend.write_at(u64::from(at) + field, &link_to_raw(link).to_le_bytes())?;
    Ok(())
}

/// Reads both links of the record at `at`.
pub(crate) fn read_links<B: StorageBackend + ?Sized>(backend: &B, at: u32) -> CoreResult<Links> {
    let bytes = backend.read_at(u64::from(at) + PREV_FIELD, LINKS_SIZE)?;
    let mut buf = &bytes[..];
    Ok(Links {
        prev: link_from_raw(buf.get_i32_le(), "prev")?,
        next: link_from_raw(buf.get_i32_le(), "next")?,
    })
}

/// Reads only the `next` link of the record at `at`.
pub(crate) fn read_next<B: StorageBackend + ?Sized>(backend: &B, at: u32) -> CoreResult<Option<u32>> {
    read_link(backend, at, NEXT_FIELD, "next")
}

/// Patches the `prev` link of the record at `at`.
pub(crate) fn write_prev<B: StorageBackend + ?Sized>(
    backend: &mut B,
    at: u32,
    prev: Option<u32>,
) -> CoreResult<()> {
    write_link(backend, at, PREV_FIELD, prev)
}

/// Patches the `next` link of the record at `at`.
pub(crate) fn write_next<B: StorageBackend + ?Sized>(
    backend: &mut B,
    at: u32,
    next: Option<u32>,
) -> CoreResult<()> {
    write_link(backend, at, NEXT_FIELD, next)
}

/// Appends a complete record at end of file and returns its offset.
pub(crate) fn append<B: StorageBackend + ?Sized>(
    backend: &mut B,
    links: Links,
    payload: &[u8],
) -> CoreResult<u32> {
    let at = to_offset(backend.size()?)?;

    let mut record = BytesMut::with_capacity(LINKS_SIZE + payload.len());
    record.extend_from_slice(&links.to_bytes());
    record.extend_from_slice(payload);

    let written = backend.append(&record)?;
    debug_assert_eq!(written, u64::from(at));
    Ok(at)
}

/// Follows `next` links `steps` times starting at `head`.
pub(crate) fn walk<B: StorageBackend + ?Sized>(
    backend: &B,
    head: Option<u32>,
    steps: usize,
    count: usize,
) -> CoreResult<u32> {
    let mut current = head.ok_or(CoreError::BrokenChain { visited: 0, count })?;
    for visited in 1..=steps {
        current = read_next(backend, current)?
            .ok_or(CoreError::BrokenChain { visited, count })?;
    }
    Ok(current)
}

/// Reads the raw payload bytes of a fixed-width record.
pub(crate) fn read_fixed_payload<B: StorageBackend + ?Sized>(
    backend: &B,
    at: u32,
    width: usize,
) -> CoreResult<Vec<u8>> {
    Ok(backend.read_at(u64::from(at) + PAYLOAD_FIELD, width)?)
}

/// Overwrites the payload of a fixed-width record in place.
pub(crate) fn write_fixed_payload<B: StorageBackend + ?Sized>(
    backend: &mut B,
    at: u32,
    payload: &[u8],
) -> CoreResult<()> {
    backend.write_at(u64::from(at) + PAYLOAD_FIELD, payload)?;
    Ok(())
}

/// Reads the declared body length of a variable-width record.
///
/// `None` means the length fails the decode guard.
fn read_body_len<B: StorageBackend + ?Sized>(
    backend: &B,
    at: u32,
    max_len: usize,
) -> CoreResult<Option<usize>> {
    let bytes = backend.read_at(u64::from(at) + PAYLOAD_FIELD, LENGTH_PREFIX_SIZE)?;
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    prefix.copy_from_slice(&bytes);
    Ok(decode_length_prefix(prefix, max_len))
}

/// Decodes the payload of the record at `at`.
///
/// A variable-width length outside `0..=max_len` yields the codec's
/// default (empty) value rather than reading the body.
pub(crate) fn read_value<C, B>(backend: &B, codec: &C, at: u32, max_len: usize) -> CoreResult<C::Value>
where
    C: RecordCodec,
    B: StorageBackend + ?Sized,
{
    match codec.width() {
        Width::Fixed(width) => {
            let payload = read_fixed_payload(backend, at, width)?;
            Ok(codec.decode_body(&payload)?)
        }
        Width::Variable => {
            let Some(len) = read_body_len(backend, at, max_len)? else {
                warn!(offset = at, max_len, "payload length fails guard, using empty value");
                return Ok(C::Value::default());
            };
            let body_at = u64::from(at) + PAYLOAD_FIELD + LENGTH_PREFIX_SIZE as u64;
            let body = backend.read_at(body_at, len)?;
            Ok(codec.decode_body(&body)?)
        }
    }
}

/// Total on-disk size of the record at `at`, links included.
///
/// Variable-width bodies count their declared length even when it fails
/// the decode guard, clamped to the end of the file. A negative length
/// counts only the prefix.
pub(crate) fn record_len<C, B>(backend: &B, codec: &C, at: u32) -> CoreResult<u64>
where
    C: RecordCodec,
    B: StorageBackend + ?Sized,
{
    let payload = match codec.width() {
        Width::Fixed(width) => width as u64,
        Width::Variable => {
            let prefix_at = u64::from(at) + PAYLOAD_FIELD;
            let bytes = backend.read_at(prefix_at, LENGTH_PREFIX_SIZE)?;
            let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
            prefix.copy_from_slice(&bytes);
            let declared = u64::try_from(i32::from_le_bytes(prefix)).unwrap_or_default();
            let body_at = prefix_at + LENGTH_PREFIX_SIZE as u64;
            let available = backend.size()?.saturating_sub(body_at);
            LENGTH_PREFIX_SIZE as u64 + declared.min(available)
        }
    };
    Ok(LINKS_SIZE as u64 + payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use binlist_codec::{encode_payload, I32Codec, StringCodec, MAX_VARIABLE_LEN};
    use binlist_storage::InMemoryBackend;

    fn arena() -> InMemoryBackend {
        // Stand-in for a header so the first record lands at 12.
        InMemoryBackend::with_data(vec![0; 12])
    }

    #[test]
    fn append_lays_out_links_then_payload() {
        let mut backend = arena();
        let payload = encode_payload(&I32Codec, &9).unwrap();
        let at = append(
            &mut backend,
            Links {
                prev: None,
                next: Some(40),
            },
            &payload,
        )
        .unwrap();

        assert_eq!(at, 12);
        let data = backend.data();
        assert_eq!(&data[12..16], &(-1i32).to_le_bytes());
        assert_eq!(&data[16..20], &40i32.to_le_bytes());
        assert_eq!(&data[20..24], &9i32.to_le_bytes());
    }

    #[test]
    fn links_are_patched_in_place() {
        let mut backend = arena();
        let at = append(&mut backend, Links::default(), &[0; 4]).unwrap();

        write_prev(&mut backend, at, Some(100)).unwrap();
        write_next(&mut backend, at, Some(200)).unwrap();

        assert_eq!(
            read_links(&backend, at).unwrap(),
            Links {
                prev: Some(100),
                next: Some(200)
            }
        );
        assert_eq!(read_next(&backend, at).unwrap(), Some(200));
        assert_eq!(backend.data().len(), 24);
    }

    #[test]
    fn walk_follows_next_links() {
        let mut backend = arena();
        let a = append(&mut backend, Links::default(), &[0; 4]).unwrap();
        let b = append(&mut backend, Links::default(), &[0; 4]).unwrap();
        let c = append(&mut backend, Links::default(), &[0; 4]).unwrap();
        write_next(&mut backend, a, Some(b)).unwrap();
        write_next(&mut backend, b, Some(c)).unwrap();

        assert_eq!(walk(&backend, Some(a), 0, 3).unwrap(), a);
        assert_eq!(walk(&backend, Some(a), 2, 3).unwrap(), c);
        assert!(matches!(
            walk(&backend, Some(a), 3, 3),
            Err(CoreError::BrokenChain {
                visited: 3,
                count: 3
            })
        ));
    }

    #[test]
    fn variable_payload_reads_back() {
        let mut backend = arena();
        let payload = encode_payload(&StringCodec, &"hello".into()).unwrap();
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        let value = read_value(&backend, &StringCodec, at, MAX_VARIABLE_LEN).unwrap();
        assert_eq!(value, "hello");
        assert_eq!(
            record_len(&backend, &StringCodec, at).unwrap(),
            8 + 4 + 5
        );
    }

    #[test]
    fn guarded_record_still_counts_its_body() {
        let mut backend = arena();
        let payload = encode_payload(&StringCodec, &"hello".into()).unwrap();
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        assert_eq!(read_value(&backend, &StringCodec, at, 4).unwrap(), "");
        assert_eq!(record_len(&backend, &StringCodec, at).unwrap(), 8 + 4 + 5);
    }

    #[test]
    fn overlong_length_is_clamped_to_the_file() {
        let mut backend = arena();
        let mut payload = 100i32.to_le_bytes().to_vec();
        payload.extend_from_slice(b"abc");
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        assert_eq!(record_len(&backend, &StringCodec, at).unwrap(), 8 + 4 + 3);
    }

    #[test]
    fn negative_length_counts_only_the_prefix() {
        let mut backend = arena();
        let mut payload = (-3i32).to_le_bytes().to_vec();
        payload.extend_from_slice(b"abc");
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        assert_eq!(record_len(&backend, &StringCodec, at).unwrap(), 8 + 4);
    }

    #[test]
    fn guarded_length_yields_empty_value() {
        let mut backend = arena();
        let mut payload = (-3i32).to_le_bytes().to_vec();
        payload.extend_from_slice(b"junk");
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        let value = read_value(&backend, &StringCodec, at, MAX_VARIABLE_LEN).unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn configured_ceiling_applies() {
        let mut backend = arena();
        let payload = encode_payload(&StringCodec, &"hello".into()).unwrap();
        let at = append(&mut backend, Links::default(), &payload).unwrap();

        assert_eq!(read_value(&backend, &StringCodec, at, 4).unwrap(), "");
    }
}
