//! Verify command implementation.

use binlist_codec::RecordCodec;
use binlist_core::BinaryList;
use binlist_storage::StorageBackend;
use std::io::Write;
use std::path::Path;

/// Runs the verify command.
pub fn run<C, B, W>(
    list: &BinaryList<C, B>,
    path: &Path,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: RecordCodec,
    B: StorageBackend,
    W: Write,
{
    writeln!(out, "Verifying list at {}", path.display())?;

    match list.verify() {
        Ok(count) => {
            writeln!(out, "✓ {count} records linked consistently")?;
            Ok(())
        }
        Err(error) => {
            writeln!(out, "✗ {error}")?;
            Err("Verification failed".into())
        }
    }
}
