//! Source unit loading and byte offset to line/column conversion.
//!
//! Tree-sitter reports byte offsets, while humans read line numbers and
//! character columns. A [`SourceUnit`] keeps the decoded text and hands out
//! the very same content as bytes, so both views always agree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// A loaded source file.
#[derive(Clone, Debug)]
pub struct SourceUnit {
    path: PathBuf,
    text: String,
}

impl SourceUnit {
    /// Read a file from disk.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read(path).map_err(|e| ExtractError::io(path, e))?;
        Ok(Self::from_bytes(path, &raw))
    }

    /// Build a unit from raw bytes already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, raw: &[u8]) -> Self {
        Self {
            path: path.into(),
            text: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Build a unit from decoded text.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decoded text of the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The decoded text as bytes. Tree offsets index into this buffer.
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, byte_offset: usize) -> u32 {
        byte_to_line_col(self.bytes(), byte_offset).0
    }
}

/// Convert a byte offset to a 1-based line and 0-based character column.
///
/// Offsets past the end of the buffer clamp to its length. A multi-byte
/// character cut by the offset does not count towards the column.
pub fn byte_to_line_col(source: &[u8], byte_offset: usize) -> (u32, u32) {
    let offset = byte_offset.min(source.len());
    let prefix = &source[..offset];

    let line = bytecount::count(prefix, b'\n') as u32 + 1;
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);

    (line, char_count(&prefix[line_start..]) as u32)
}

/// Count the characters of a UTF-8 byte slice, ignoring a truncated tail.
fn char_count(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.chars().count(),
        Err(e) => String::from_utf8_lossy(&bytes[..e.valid_up_to()])
            .chars()
            .count(),
    }
}

/// Decode a byte range of a buffer as text, substituting invalid sequences.
pub fn slice_text(source: &[u8], start: usize, end: usize) -> String {
    let end = end.min(source.len());
    let start = start.min(end);
    String::from_utf8_lossy(&source[start..end]).into_owned()
}
