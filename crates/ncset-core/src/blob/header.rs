use serde::Serialize;

use super::ByteBlob;
use super::layout::header;
use crate::checksum;

/// Identification strings from the start of a dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileHeader {
    /// Camera model (e.g., "Z 5"), hex encoded when not ASCII
    pub camera_model: Option<String>,
    /// Firmware version (e.g., "1.41"), hex encoded when not ASCII
    pub firmware: Option<String>,
    /// CRC stored in the footer (big-endian)
    pub stored_crc: Option<u16>,
}

impl FileHeader {
    pub fn parse(blob: &ByteBlob) -> Self {
        Self {
            camera_model: read_text(blob, header::MODEL, header::MODEL_LEN),
            firmware: read_text(blob, header::FIRMWARE, header::FIRMWARE_LEN),
            stored_crc: checksum::stored(blob.as_bytes()),
        }
    }
}

/// Read a NUL terminated ASCII field. Returns `None` when the blob is too
/// short to hold the field.
pub(crate) fn read_text(blob: &ByteBlob, offset: usize, max_len: usize) -> Option<String> {
    let field = blob.read_bytes(offset, max_len).ok()?;
    Some(decode_ascii_field(field))
}

pub(crate) fn decode_ascii_field(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let text = &field[..len];
    if text.is_ascii() {
        String::from_utf8_lossy(text).into_owned()
    } else {
        text.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let mut bytes = vec![0u8; 64];
        bytes[..3].copy_from_slice(b"Z 5");
        bytes[24..28].copy_from_slice(b"1.41");
        bytes[62] = 0xAB;
        bytes[63] = 0xCD;

        let header = FileHeader::parse(&ByteBlob::new(bytes));
        assert_eq!(header.camera_model.as_deref(), Some("Z 5"));
        assert_eq!(header.firmware.as_deref(), Some("1.41"));
        assert_eq!(header.stored_crc, Some(0xABCD));
    }

    #[test]
    fn test_parse_short_blob() {
        let header = FileHeader::parse(&ByteBlob::new(vec![b'Z', 0, 0, 0]));
        assert_eq!(header.camera_model, None);
        assert_eq!(header.firmware, None);
        assert_eq!(header.stored_crc, Some(0));
    }

    #[test]
    fn test_decode_non_ascii_as_hex() {
        assert_eq!(decode_ascii_field(&[0xFF, 0x01, 0x00, 0x41]), "ff01");
        assert_eq!(decode_ascii_field(b"DSC\0\0"), "DSC");
        assert_eq!(decode_ascii_field(&[]), "");
    }
}
