//! Inspect command implementation.

use super::{Kind, OutputFormat};
use binlist_codec::RecordCodec;
use binlist_core::{BinaryList, HEADER_SIZE};
use binlist_storage::StorageBackend;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// List inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// List file path.
    pub path: String,
    /// Record kind the file was opened as.
    pub kind: Kind,
    /// Offset of the first record.
    pub head: Option<u32>,
    /// Offset of the last record.
    pub tail: Option<u32>,
    /// Number of live records.
    pub count: usize,
    /// File size in bytes.
    pub file_size: u64,
    /// Header size in bytes.
    pub header_size: usize,
    /// Bytes held by live records.
    pub live_bytes: u64,
    /// Bytes held by unlinked records.
    pub dead_bytes: u64,
}

/// Runs the inspect command.
pub fn run<C, B, W>(
    list: &BinaryList<C, B>,
    path: &Path,
    kind: Kind,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: RecordCodec,
    B: StorageBackend,
    W: Write,
{
    let header = list.header();
    let stats = list.stats()?;

    let result = InspectResult {
        path: path.display().to_string(),
        kind,
        head: header.head,
        tail: header.tail,
        count: stats.count,
        file_size: stats.file_size,
        header_size: HEADER_SIZE,
        live_bytes: stats.live_bytes,
        dead_bytes: stats.dead_bytes,
    };

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        OutputFormat::Text => print_text_output(&result, out)?,
    }

    Ok(())
}

fn print_text_output<W: Write>(result: &InspectResult, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "binlist List Inspection")?;
    writeln!(out, "=======================")?;
    writeln!(out)?;
    writeln!(out, "Path: {}", result.path)?;
    writeln!(out, "Kind: {}", result.kind.name())?;
    writeln!(out)?;
    writeln!(out, "Header:")?;
    writeln!(out, "  Head:    {}", format_link(result.head))?;
    writeln!(out, "  Tail:    {}", format_link(result.tail))?;
    writeln!(out, "  Records: {}", result.count)?;
    writeln!(out)?;
    writeln!(out, "Storage:")?;
    writeln!(out, "  File size:   {}", format_size(result.file_size))?;
    writeln!(out, "  Header:      {}", format_size(result.header_size as u64))?;
    writeln!(out, "  Live bytes:  {}", format_size(result.live_bytes))?;
    writeln!(out, "  Dead bytes:  {}", format_size(result.dead_bytes))?;
    Ok(())
}

fn format_link(link: Option<u32>) -> String {
    link.map_or_else(|| "none".to_string(), |offset| offset.to_string())
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binlist_codec::StringCodec;
    use tempfile::tempdir;

    fn sample_list(path: &Path) -> BinaryList<StringCodec> {
        let mut list = BinaryList::open(path, StringCodec).unwrap();
        for value in ["a", "b", "c"] {
            list.push_back(value.into()).unwrap();
        }
        list.erase(0).unwrap();
        list
    }

    #[test]
    fn json_output_reports_dead_space() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strList.bin");
        let list = sample_list(&path);

        let mut out = Vec::new();
        run(&list, &path, Kind::String, OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["kind"], "string");
        assert_eq!(json["head"], 25);
        assert_eq!(json["tail"], 38);
        assert_eq!(json["count"], 2);
        assert_eq!(json["file_size"], 51);
        assert_eq!(json["live_bytes"], 26);
        assert_eq!(json["dead_bytes"], 13);
    }

    #[test]
    fn text_output_for_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intList.bin");
        let list = BinaryList::open(&path, binlist_codec::I32Codec).unwrap();

        let mut out = Vec::new();
        run(&list, &path, Kind::Int, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Kind: int"));
        assert!(text.contains("Head:    none"));
        assert!(text.contains("Records: 0"));
        assert!(text.contains("File size:   12 bytes"));
    }

    #[test]
    fn sizes_scale_units() {
        assert_eq!(format_size(12), "12 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
