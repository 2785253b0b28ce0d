//! CLI command implementations.

pub mod inspect;
pub mod ops;
pub mod verify;

use crate::Commands;
use binlist_codec::{ByteString, I32Codec, Person, PersonCodec, StringCodec};
use binlist_core::{BinaryList, Config};
use clap::ValueEnum;
use serde::Serialize;
use std::io;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

/// Record kind stored in a list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// 32-bit signed integers.
    Int,
    /// Length-prefixed strings, kept as raw bytes.
    String,
    /// Fixed 44-byte name/age records.
    Person,
}

impl Kind {
    /// File used when `--path` is not given.
    pub fn default_file(self) -> &'static str {
        match self {
            Kind::Int => "intList.bin",
            Kind::String => "strList.bin",
            Kind::Person => "personList.bin",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::String => "string",
            Kind::Person => "person",
        }
    }
}

/// Output format for reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Errors raised while turning arguments into values.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument is not a valid `i32`.
    #[error("invalid integer {raw:?}: {source}")]
    InvalidInt {
        /// Argument as given.
        raw: String,
        /// Parse failure.
        source: ParseIntError,
    },

    /// Person values need `--age`.
    #[error("person values need --age")]
    MissingAge,

    /// `--age` was given for a kind that has no age.
    #[error("--age is only valid for person lists, not {kind}")]
    UnexpectedAge {
        /// Kind of the list.
        kind: &'static str,
    },
}

/// Values that can be built from a positional argument plus `--age`.
pub trait ValueArg: Sized {
    /// Parses a value from its command-line form.
    fn from_arg(raw: &str, age: Option<i32>) -> Result<Self, CliError>;
}

impl ValueArg for i32 {
    fn from_arg(raw: &str, age: Option<i32>) -> Result<Self, CliError> {
        if age.is_some() {
            return Err(CliError::UnexpectedAge {
                kind: Kind::Int.name(),
            });
        }
        raw.trim().parse().map_err(|source| CliError::InvalidInt {
            raw: raw.to_string(),
            source,
        })
    }
}

impl ValueArg for ByteString {
    fn from_arg(raw: &str, age: Option<i32>) -> Result<Self, CliError> {
        if age.is_some() {
            return Err(CliError::UnexpectedAge {
                kind: Kind::String.name(),
            });
        }
        Ok(ByteString::from(raw))
    }
}

impl ValueArg for Person {
    fn from_arg(raw: &str, age: Option<i32>) -> Result<Self, CliError> {
        let age = age.ok_or(CliError::MissingAge)?;
        Ok(Person::new(raw, age))
    }
}

/// Opens the list at `path` with the codec for `kind` and runs `command`.
pub fn run(
    path: &Path,
    kind: Kind,
    strict: bool,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new().strict_indices(strict);
    let mut out = io::stdout().lock();

    match kind {
        Kind::Int => {
            let mut list = BinaryList::open_with_config(path, I32Codec, config)?;
            dispatch(&mut list, path, kind, command, &mut out)
        }
        Kind::String => {
            let mut list = BinaryList::open_with_config(path, StringCodec, config)?;
            dispatch(&mut list, path, kind, command, &mut out)
        }
        Kind::Person => {
            let mut list = BinaryList::open_with_config(path, PersonCodec, config)?;
            dispatch(&mut list, path, kind, command, &mut out)
        }
    }
}

fn dispatch<C, W>(
    list: &mut BinaryList<C>,
    path: &Path,
    kind: Kind,
    command: Commands,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: binlist_codec::RecordCodec,
    C::Value: ValueArg + std::fmt::Display,
    W: io::Write,
{
    match command {
        Commands::Inspect { format } => inspect::run(list, path, kind, format, out),
        Commands::Verify => verify::run(list, path, out),
        other => ops::run(list, other, out),
    }
}
