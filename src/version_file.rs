//! Reading version-declaration files.
//!
//! A declaration file is plain text whose first non-blank line holds a
//! semantic version. Everything after that line is ignored. UTF-8 (with or
//! without a byte-order mark) and BOM-marked UTF-16 files are accepted.

use crate::domain::SemanticVersion;
use crate::error::{AverError, Result};
use std::fs;
use std::path::Path;

/// Read and parse the version declared in `path`.
///
/// # Returns
/// * `Ok(SemanticVersion)` - The first non-blank line parsed as a version
/// * `Err(AverError::InvalidFormat)` - Blank file, undecodable text or malformed version
/// * `Err(AverError::NotAccessible)` - The file could not be read
pub fn read_version(path: &Path) -> Result<SemanticVersion> {
    let bytes = fs::read(path).map_err(|e| AverError::not_accessible(path, e))?;
    decode_text(&bytes)
        .and_then(|content| parse_declaration(&content))
        .map_err(|e| match e {
            AverError::InvalidFormat(msg) => {
                AverError::invalid_format(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
}

/// Decode file bytes, honouring UTF-8 and UTF-16 byte-order marks
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    let utf16 = |body: &[u8], from_bytes: fn([u8; 2]) -> u16| -> Result<String> {
        if body.len() % 2 != 0 {
            return Err(AverError::invalid_format("truncated UTF-16 text"));
        }
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| from_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| AverError::invalid_format("invalid UTF-16 text"))
    };

    match bytes {
        [0xFF, 0xFE, body @ ..] => utf16(body, u16::from_le_bytes),
        [0xFE, 0xFF, body @ ..] => utf16(body, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec())
            .map_err(|_| AverError::invalid_format("text is not valid UTF-8")),
    }
}

/// Parse the contents of a declaration file
pub fn parse_declaration(content: &str) -> Result<SemanticVersion> {
    let line = content
        .trim_start_matches('\u{FEFF}')
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| AverError::invalid_format("version file declares no version"))?;

    SemanticVersion::parse(line)
}
