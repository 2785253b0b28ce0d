//! # binlist core
//!
//! A doubly-linked list that lives inside a flat binary file.
//!
//! Records point at each other by byte offset instead of by address, so
//! the list survives process restarts without a serialization step.
//!
//! This crate provides:
//! - The 12-byte list header at offset 0 ([`Header`])
//! - The record layout and pointer-chasing primitives
//! - [`BinaryList`], generic over a payload codec and a storage backend
//! - Forward traversal, both as a built-in cursor and as [`Iter`]
//!
//! ## File format
//!
//! ```text
//! 0..12   header   head:i32 tail:i32 count:i32      (-1 = none)
//! 12..    records  prev:i32 next:i32 payload        (appended, never moved)
//! ```
//!
//! All integers are little-endian. There is no magic number, version or
//! checksum, and no protection against concurrent writers or crashes
//! between a record write and the header write that publishes it.
//!
//! ## Example
//!
//! ```no_run
//! use binlist_codec::StringCodec;
//! use binlist_core::BinaryList;
//!
//! let mut list = BinaryList::open("strings.bin", StringCodec)?;
//! list.push_back("a".into())?;
//! list.push_back("bb".into())?;
//! list.update(0, "a much longer value".into())?;
//! assert_eq!(list.get(1)?, "bb");
//! # Ok::<(), binlist_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod header;
mod iter;
mod link;
mod list;
mod record;
mod stats;
mod verify;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use header::{Header, HEADER_SIZE};
pub use iter::Iter;
pub use link::NIL;
pub use list::BinaryList;
pub use record::{Links, LINKS_SIZE, NEXT_FIELD, PAYLOAD_FIELD, PREV_FIELD};
pub use stats::ListStats;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
