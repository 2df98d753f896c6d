//! CRC-16/XMODEM footer handling
//!
//! The camera validates a dump by running CRC-16/XMODEM (polynomial 0x1021,
//! zero initial remainder, no reflection, no final xor) over every byte except
//! the last two, and comparing the result with those two bytes read
//! big-endian. A file whose footer does not match is rejected by the camera.

use crate::blob::layout::footer;
use crate::error::{Error, Result};

const POLYNOMIAL: u16 = 0x1021;

const fn build_lut() -> [u16; 256] {
    let mut lut = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut state = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            state = if state & 0x8000 != 0 {
                (state << 1) ^ POLYNOMIAL
            } else {
                state << 1
            };
            bit += 1;
        }
        lut[i] = state;
        i += 1;
    }
    lut
}

static CRC16_LUT: [u16; 256] = build_lut();

/// CRC-16/XMODEM of `data`.
pub fn crc16(data: &[u8]) -> u16 {
    let mut state: u16 = 0;
    for byte in data {
        let upper = (state >> 8) as u8 ^ byte;
        state = (state << 8) ^ CRC16_LUT[upper as usize];
    }
    state
}

fn covered(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len().saturating_sub(footer::LEN)]
}

/// Checksum over everything but the footer.
pub fn compute(bytes: &[u8]) -> u16 {
    crc16(covered(bytes))
}

/// Footer value currently stored in the blob.
pub fn stored(bytes: &[u8]) -> Option<u16> {
    if bytes.len() < footer::LEN {
        return None;
    }
    let tail = &bytes[bytes.len() - footer::LEN..];
    Some(u16::from_be_bytes([tail[0], tail[1]]))
}

/// Whether the footer matches the contents. Never fails; a blob too short to
/// carry a footer simply does not verify.
pub fn verify(bytes: &[u8]) -> bool {
    stored(bytes) == Some(compute(bytes))
}

/// Like [`verify`], but reports the mismatching values.
pub fn check(bytes: &[u8]) -> Result<()> {
    let stored = stored(bytes).ok_or(Error::OffsetOutOfRange {
        offset: 0,
        len: footer::LEN,
        blob_len: bytes.len(),
    })?;
    let computed = compute(bytes);
    if stored != computed {
        return Err(Error::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

/// Overwrite the footer with the computed checksum and return it.
pub fn repair_in_place(bytes: &mut [u8]) -> Result<u16> {
    if bytes.len() < footer::LEN {
        return Err(Error::OffsetOutOfRange {
            offset: 0,
            len: footer::LEN,
            blob_len: bytes.len(),
        });
    }
    let crc = compute(bytes);
    let len = bytes.len();
    bytes[len - footer::LEN..].copy_from_slice(&crc.to_be_bytes());
    Ok(crc)
}

/// Copying variant of [`repair_in_place`].
pub fn repair(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut patched = bytes.to_vec();
    repair_in_place(&mut patched)?;
    Ok(patched)
}
