//! Offset links and the `-1` sentinel.
//!
//! On disk every link is an `i32` byte offset with `-1` meaning "no record".
//! In memory a link is an `Option<u32>`. Offsets handed out by the engine
//! never exceed `i32::MAX`, so the conversion back is lossless.

use crate::error::{CoreError, CoreResult};

/// On-disk sentinel for an absent link.
pub const NIL: i32 = -1;

/// Encodes a link for storage.
#[must_use]
pub fn link_to_raw(link: Option<u32>) -> i32 {
    link.and_then(|offset| i32::try_from(offset).ok()).unwrap_or(NIL)
}

/// Decodes a stored link.
///
/// # Errors
///
/// Returns [`CoreError::InvalidFormat`] for any negative value other than
/// the sentinel.
pub fn link_from_raw(raw: i32, field: &str) -> CoreResult<Option<u32>> {
    if raw == NIL {
        return Ok(None);
    }
    u32::try_from(raw)
        .map(Some)
        .map_err(|_| CoreError::invalid_format(format!("{field} holds {raw}")))
}

/// Converts an end-of-file position into a linkable offset.
///
/// # Errors
///
/// Returns [`CoreError::OffsetOverflow`] once the file has grown beyond
/// what an `i32` link can address.
pub fn to_offset(position: u64) -> CoreResult<u32> {
    i32::try_from(position)
        .ok()
        .and_then(|offset| u32::try_from(offset).ok())
        .ok_or(CoreError::OffsetOverflow { offset: position })
}
