//! Raw dump contents and fixed layout offsets.

pub(crate) mod header;
pub mod layout;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::checksum;
use crate::error::{Error, Result};

pub use header::FileHeader;

/// Owned bytes of one menu-settings dump.
///
/// Reads are bounds checked and report [`Error::OffsetOutOfRange`] instead of
/// panicking, since every offset the detector derives is a guess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBlob {
    bytes: Vec<u8>,
}

impl ByteBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Load a dump from disk. The file handle is released before returning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(&path)?;
        debug!(
            "Loaded {} bytes from {}",
            bytes.len(),
            path.as_ref().display()
        );
        Ok(Self { bytes })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(&path, &self.bytes)?;
        debug!(
            "Wrote {} bytes to {}",
            self.bytes.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Check that `len` bytes starting at `offset` lie inside the blob.
    pub fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        match offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(()),
            _ => Err(Error::OffsetOutOfRange {
                offset,
                len,
                blob_len: self.bytes.len(),
            }),
        }
    }

    pub fn contains_range(&self, offset: usize, len: usize) -> bool {
        self.check_range(offset, len).is_ok()
    }

    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.check_range(offset, len)?;
        Ok(&self.bytes[offset..offset + len])
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.read_bytes(offset, 1)?[0])
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.check_range(offset, 1)?;
        self.bytes[offset] = value;
        Ok(())
    }

    pub fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.check_range(offset, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Copy `len` bytes from `src` to `dst` within the blob (ranges may overlap).
    pub fn copy_within(&mut self, src: usize, dst: usize, len: usize) -> Result<()> {
        self.check_range(src, len)?;
        self.check_range(dst, len)?;
        self.bytes.copy_within(src..src + len, dst);
        Ok(())
    }

    pub fn fill(&mut self, offset: usize, len: usize, value: u8) -> Result<()> {
        self.check_range(offset, len)?;
        self.bytes[offset..offset + len].fill(value);
        Ok(())
    }

    /// Fraction of non-zero bytes in a range (0.0 for an empty range).
    pub fn density(&self, offset: usize, len: usize) -> Result<f64> {
        let window = self.read_bytes(offset, len)?;
        if window.is_empty() {
            return Ok(0.0);
        }
        let non_zero = window.iter().filter(|&&b| b != 0).count();
        Ok(non_zero as f64 / window.len() as f64)
    }

    pub fn header(&self) -> FileHeader {
        FileHeader::parse(self)
    }

    pub fn verify_checksum(&self) -> bool {
        checksum::verify(&self.bytes)
    }

    /// Overwrite the footer with a freshly computed CRC.
    pub fn repair_checksum(&mut self) -> Result<u16> {
        checksum::repair_in_place(&mut self.bytes)
    }
}

impl From<Vec<u8>> for ByteBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteBlob {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_within_bounds() {
        let blob = ByteBlob::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(blob.read_u8(4).unwrap(), 5);
        assert_eq!(blob.read_bytes(1, 3).unwrap(), &[2, 3, 4]);
    }

    #[test]
    fn test_read_out_of_range() {
        let blob = ByteBlob::new(vec![0; 8]);
        let err = blob.read_bytes(6, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::OffsetOutOfRange {
                offset: 6,
                len: 4,
                blob_len: 8
            }
        ));
        assert!(blob.read_u8(8).is_err());
        assert!(blob.read_bytes(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_write_and_fill() {
        let mut blob = ByteBlob::new(vec![0; 8]);
        blob.write_u8(2, 0xAA).unwrap();
        blob.write_bytes(4, &[1, 2]).unwrap();
        assert_eq!(blob.as_bytes(), &[0, 0, 0xAA, 0, 1, 2, 0, 0]);

        blob.fill(0, 3, 0xFF).unwrap();
        assert_eq!(&blob.as_bytes()[..4], &[0xFF, 0xFF, 0xFF, 0]);
        assert!(blob.write_bytes(7, &[1, 2]).is_err());
        // a failed write leaves the blob untouched
        assert_eq!(blob.as_bytes()[7], 0);
    }

    #[test]
    fn test_copy_within() {
        let mut blob = ByteBlob::new(vec![1, 2, 3, 0, 0, 0]);
        blob.copy_within(0, 3, 3).unwrap();
        assert_eq!(blob.as_bytes(), &[1, 2, 3, 1, 2, 3]);
        assert!(blob.copy_within(0, 4, 3).is_err());
    }

    #[test]
    fn test_density() {
        let blob = ByteBlob::new(vec![0, 1, 0, 2]);
        assert!((blob.density(0, 4).unwrap() - 0.5).abs() < f64::EPSILON);
        assert_eq!(blob.density(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_checksum_repair_through_blob() {
        let mut blob = ByteBlob::new(vec![0x31, 0x32, 0x33, 0, 0]);
        assert!(!blob.verify_checksum());
        blob.repair_checksum().unwrap();
        assert!(blob.verify_checksum());
    }

    #[test]
    fn test_load_and_save() {
        let temp_file = NamedTempFile::new().unwrap();
        let blob = ByteBlob::new(vec![9, 8, 7]);
        blob.save(temp_file.path()).unwrap();

        let loaded = ByteBlob::load(temp_file.path()).unwrap();
        assert_eq!(loaded, blob);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ByteBlob::load("/definitely/not/here.bin").unwrap_err();
        assert!(err.is_not_found());
    }
}
