use crate::binary::{BinaryVersionInfo, BinaryVersionReader};
use crate::error::{AverError, Result};
use std::fs;
use std::path::Path;

const DOS_MAGIC: &[u8] = b"MZ";
const PE_SIGNATURE: &[u8] = b"PE\0\0";
const PE_OFFSET_FIELD: usize = 0x3C;

/// Reads the version-info resource of Portable Executable files.
///
/// Values are located by their UTF-16LE keys inside `StringFileInfo`
/// string tables, so no full resource-directory walk is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PeVersionReader;

impl PeVersionReader {
    pub fn new() -> Self {
        PeVersionReader
    }

    /// Parse version information out of an in-memory image
    pub fn parse(&self, bytes: &[u8]) -> Option<BinaryVersionInfo> {
        if !is_portable_executable(bytes) {
            return None;
        }

        Some(BinaryVersionInfo {
            assembly_version: find_string_value(bytes, "Assembly Version").unwrap_or_default(),
            file_version: find_string_value(bytes, "FileVersion").unwrap_or_default(),
            product_version: find_string_value(bytes, "ProductVersion").unwrap_or_default(),
        })
    }
}

impl BinaryVersionReader for PeVersionReader {
    fn read_versions(&self, path: &Path) -> Result<BinaryVersionInfo> {
        let bytes = fs::read(path).map_err(|e| AverError::not_accessible(path, e))?;
        self.parse(&bytes)
            .ok_or_else(|| AverError::NotABinary(path.to_path_buf()))
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let slice = bytes.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([slice[0], slice[1]]))
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let slice = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

fn is_portable_executable(bytes: &[u8]) -> bool {
    if !bytes.starts_with(DOS_MAGIC) {
        return false;
    }
    let Some(pe_offset) = read_u32(bytes, PE_OFFSET_FIELD) else {
        return false;
    };
    let pe_offset = pe_offset as usize;
    bytes.get(pe_offset..pe_offset + PE_SIGNATURE.len()) == Some(PE_SIGNATURE)
}

fn utf16_key(key: &str) -> Vec<u8> {
    key.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Find a `String` structure keyed `key` and decode its value.
///
/// Layout: `wLength`, `wValueLength` (in words), `wType`, NUL-terminated
/// UTF-16 key, padding to a 32-bit boundary, then the value.
fn find_string_value(bytes: &[u8], key: &str) -> Option<String> {
    let needle = utf16_key(key);
    let mut search_from = 0;

    while let Some(found) = bytes
        .get(search_from..)?
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
    {
        let key_offset = search_from + found;
        search_from = key_offset + 1;

        // Header is three u16 fields right before the key.
        if key_offset < 6 {
            continue;
        }
        let header = key_offset - 6;
        let Some(value_words) = read_u16(bytes, header + 2) else {
            continue;
        };
        let Some(kind) = read_u16(bytes, header + 4) else {
            continue;
        };
        if kind > 1 {
            continue;
        }
        if value_words == 0 {
            return Some(String::new());
        }

        let value_offset = (key_offset + needle.len() + 3) & !3;
        let units: Vec<u16> = (0..value_words as usize)
            .map_while(|i| read_u16(bytes, value_offset + i * 2))
            .take_while(|unit| *unit != 0)
            .collect();
        return Some(String::from_utf16_lossy(&units));
    }

    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn push_string_entry(image: &mut Vec<u8>, key: &str, value: &str) {
        while image.len() % 4 != 0 {
            image.push(0);
        }
        let value_units: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        image.extend_from_slice(&0u16.to_le_bytes()); // wLength, unused by the reader
        image.extend_from_slice(&(value_units.len() as u16).to_le_bytes());
        image.extend_from_slice(&1u16.to_le_bytes());
        image.extend_from_slice(&utf16_key(key));
        while image.len() % 4 != 0 {
            image.push(0);
        }
        for unit in value_units {
            image.extend_from_slice(&unit.to_le_bytes());
        }
    }

    /// Minimal image: DOS header, PE signature and a string table
    pub(crate) fn fake_image(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut image = vec![0u8; 0x80];
        image[0..2].copy_from_slice(DOS_MAGIC);
        image[PE_OFFSET_FIELD..PE_OFFSET_FIELD + 4].copy_from_slice(&0x40u32.to_le_bytes());
        image[0x40..0x44].copy_from_slice(PE_SIGNATURE);
        for (key, value) in entries {
            push_string_entry(&mut image, key, value);
        }
        image
    }

    #[test]
    fn test_reads_version_strings() {
        let image = fake_image(&[
            ("FileVersion", "1.2.3.0"),
            ("ProductVersion", "1.2.3-beta+sha"),
            ("Assembly Version", "1.2.0.0"),
        ]);

        let info = PeVersionReader::new().parse(&image).unwrap();

        assert_eq!(info.file_version, "1.2.3.0");
        assert_eq!(info.product_version, "1.2.3-beta+sha");
        assert_eq!(info.assembly_version, "1.2.0.0");
    }

    #[test]
    fn test_missing_values_are_empty() {
        let image = fake_image(&[("FileVersion", "4.0.0.0")]);
        let info = PeVersionReader::new().parse(&image).unwrap();
        assert_eq!(info.file_version, "4.0.0.0");
        assert_eq!(info.product_version, "");
        assert_eq!(info.assembly_version, "");
    }

    #[test]
    fn test_rejects_non_pe_data() {
        let reader = PeVersionReader::new();
        assert!(reader.parse(b"plain text, not a binary").is_none());
        assert!(reader.parse(b"MZ").is_none());

        let mut wrong_signature = fake_image(&[]);
        wrong_signature[0x40] = b'X';
        assert!(reader.parse(&wrong_signature).is_none());
    }

    #[test]
    fn test_read_versions_reports_not_a_binary() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"hello").unwrap();

        let err = PeVersionReader::new().read_versions(file.path()).unwrap_err();
        assert!(matches!(err, AverError::NotABinary(_)));
    }
}
