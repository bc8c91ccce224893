//! Input format detection.
//!
//! Documents reach the pipeline either as PDF files or as JSON span dumps
//! (the page/block/line/span tree a layout parser emits). Detection looks at
//! the leading bytes, never at the extension alone.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A PDF file with its header version (e.g. "1.7").
    Pdf { version: String },
    /// A JSON span dump.
    SpanDump,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Pdf { version } => write!(f, "PDF {}", version),
            SourceKind::SpanDump => write!(f, "span dump"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"
const SNIFF_LEN: usize = 64;

/// Extensions picked up by directory discovery.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "json"];

/// Detect the source kind of a file.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<SourceKind> {
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    detect_kind_from_bytes(&header)
}

/// Detect the source kind from the leading bytes of a file.
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<SourceKind> {
    if let Some(rest) = data.strip_prefix(PDF_MAGIC) {
        if rest.len() < VERSION_LEN {
            return Err(Error::UnknownFormat);
        }
        let version = String::from_utf8_lossy(&rest[..VERSION_LEN]).to_string();
        if !is_valid_version(&version) {
            return Err(Error::UnsupportedVersion(version));
        }
        return Ok(SourceKind::Pdf { version });
    }

    // UTF-8 BOM is tolerated in front of a dump.
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(SourceKind::SpanDump),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a version string looks like "1.7" or "2.0".
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Whether directory discovery should consider this path.
pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}
