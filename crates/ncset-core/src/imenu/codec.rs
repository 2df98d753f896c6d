//! i-menu slot table codec.
//!
//! Memory layout, relative to the section start:
//! - 924 + 4*i: item ID of slot i (1 byte, 3 padding bytes), i in 0..12
//! - 1240: mode-identifier byte
//! - 1540: file-name prefix (10 bytes ASCII, NUL padded)
//!
//! Encoding writes only the first byte of each slot entry and the mode byte.
//! Padding bytes and everything else in the section are left as they were.

use crate::blob::ByteBlob;
use crate::blob::header::decode_ascii_field;
use crate::blob::layout::section;
use crate::error::{Error, Result};

pub type Slots = [u32; section::SLOT_COUNT];

pub fn decode_slots(blob: &ByteBlob, offset: usize) -> Result<Slots> {
    blob.check_range(offset, section::IMENU_END)?;
    let mut slots = [0u32; section::SLOT_COUNT];
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = blob.read_u8(offset + section::slot(index))? as u32;
    }
    Ok(slots)
}

pub fn decode_mode_id(blob: &ByteBlob, offset: usize) -> Result<u8> {
    blob.read_u8(offset + section::MODE_ID)
}

/// Reject values that cannot be stored in a slot byte.
pub fn validate_slot_value(slot: usize, value: u32) -> Result<u8> {
    if slot >= section::SLOT_COUNT {
        return Err(Error::InvalidSlotIndex(slot));
    }
    u8::try_from(value).map_err(|_| Error::InvalidSlotValue { slot, value })
}

/// Write the 12 slot bytes. Every value is validated before the first byte
/// is written, so a rejected table leaves the blob untouched.
pub fn encode_slots(blob: &mut ByteBlob, offset: usize, slots: &Slots) -> Result<()> {
    blob.check_range(offset, section::IMENU_END)?;
    let mut bytes = [0u8; section::SLOT_COUNT];
    for (index, value) in slots.iter().enumerate() {
        bytes[index] = validate_slot_value(index, *value)?;
    }
    for (index, byte) in bytes.iter().enumerate() {
        blob.write_u8(offset + section::slot(index), *byte)?;
    }
    Ok(())
}

pub fn encode_mode_id(blob: &mut ByteBlob, offset: usize, mode_id: u8) -> Result<()> {
    blob.write_u8(offset + section::MODE_ID, mode_id)
}

pub fn read_file_prefix(blob: &ByteBlob, offset: usize) -> Result<String> {
    let field = blob.read_bytes(offset + section::FILE_PREFIX, section::FILE_PREFIX_LEN)?;
    Ok(decode_ascii_field(field))
}

/// Replace the file-name prefix, NUL padding the rest of the field.
pub fn write_file_prefix(blob: &mut ByteBlob, offset: usize, prefix: &str) -> Result<()> {
    if !prefix.is_ascii() || prefix.len() > section::FILE_PREFIX_LEN || prefix.contains('\0') {
        return Err(Error::InvalidPrefix(prefix.to_string()));
    }
    let mut field = [0u8; section::FILE_PREFIX_LEN];
    field[..prefix.len()].copy_from_slice(prefix.as_bytes());
    blob.write_bytes(offset + section::FILE_PREFIX, &field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_with_table(offset: usize, ids: &[u8]) -> ByteBlob {
        let mut bytes = vec![0u8; offset + section::SIZE];
        for (i, id) in ids.iter().enumerate() {
            bytes[offset + section::slot(i)] = *id;
        }
        bytes[offset + section::MODE_ID] = 32;
        ByteBlob::new(bytes)
    }

    #[test]
    fn test_decode() {
        let blob = blob_with_table(100, &[21, 22, 0, 69, 1, 2, 3, 4, 5, 6, 7, 8]);
        let slots = decode_slots(&blob, 100).unwrap();
        assert_eq!(slots, [21, 22, 0, 69, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(decode_mode_id(&blob, 100).unwrap(), 32);
    }

    #[test]
    fn test_decode_out_of_range() {
        let blob = ByteBlob::new(vec![0; 950]);
        assert!(matches!(
            decode_slots(&blob, 0),
            Err(Error::OffsetOutOfRange { .. })
        ));
        assert!(decode_mode_id(&blob, 0).is_err());
    }

    #[test]
    fn test_encode_roundtrip_keeps_unknown_ids() {
        let mut blob = blob_with_table(0, &[0; 12]);
        let slots: Slots = [69, 255, 0, 1, 2, 3, 4, 5, 6, 7, 8, 200];
        encode_slots(&mut blob, 0, &slots).unwrap();
        assert_eq!(decode_slots(&blob, 0).unwrap(), slots);
    }

    #[test]
    fn test_encode_touches_only_slot_bytes() {
        let mut bytes: Vec<u8> = (0..section::SIZE).map(|i| (i % 97) as u8 + 1).collect();
        bytes.extend_from_slice(&[0xEE; 16]);
        let mut blob = ByteBlob::new(bytes);
        let before = blob.clone();

        encode_slots(&mut blob, 0, &[9; 12]).unwrap();
        encode_mode_id(&mut blob, 0, 35).unwrap();

        let allowed: Vec<usize> = (0..12)
            .map(section::slot)
            .chain(std::iter::once(section::MODE_ID))
            .collect();
        for (i, (a, b)) in before.as_bytes().iter().zip(blob.as_bytes()).enumerate() {
            if !allowed.contains(&i) {
                assert_eq!(a, b, "byte {} changed", i);
            }
        }
    }

    #[test]
    fn test_encode_rejects_wide_values_without_writing() {
        let mut blob = blob_with_table(0, &[7; 12]);
        let before = blob.clone();
        let mut slots: Slots = [1; 12];
        slots[5] = 256;

        let err = encode_slots(&mut blob, 0, &slots).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSlotValue { slot: 5, value: 256 }
        ));
        assert_eq!(blob, before);
    }

    #[test]
    fn test_validate_slot_value() {
        assert_eq!(validate_slot_value(0, 255).unwrap(), 255);
        assert!(matches!(
            validate_slot_value(12, 1),
            Err(Error::InvalidSlotIndex(12))
        ));
        assert!(validate_slot_value(3, 1000).is_err());
    }

    #[test]
    fn test_file_prefix() {
        let mut blob = blob_with_table(0, &[0; 12]);
        write_file_prefix(&mut blob, 0, "DSC").unwrap();
        assert_eq!(read_file_prefix(&blob, 0).unwrap(), "DSC");

        write_file_prefix(&mut blob, 0, "Z").unwrap();
        assert_eq!(read_file_prefix(&blob, 0).unwrap(), "Z");
        assert_eq!(blob.read_u8(section::FILE_PREFIX + 1).unwrap(), 0);
    }

    #[test]
    fn test_file_prefix_rejects_bad_input() {
        let mut blob = blob_with_table(0, &[0; 12]);
        assert!(matches!(
            write_file_prefix(&mut blob, 0, "ELEVENCHARS"),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(write_file_prefix(&mut blob, 0, "ÄBC").is_err());
    }
}
