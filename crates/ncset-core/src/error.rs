use thiserror::Error;

use crate::section::Mode;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Offset {offset:#x} (+{len} bytes) is outside the blob ({blob_len} bytes)")]
    OffsetOutOfRange {
        offset: usize,
        len: usize,
        blob_len: usize,
    },

    #[error("Ambiguous sections: {first} at {first_offset:#x} overlaps {second} at {second_offset:#x}")]
    AmbiguousSection {
        first: Mode,
        first_offset: usize,
        second: Mode,
        second_offset: usize,
    },

    #[error("No candidate section found for {0}")]
    NoCandidateFound(Mode),

    #[error("Invalid slot value {value} for slot {slot}: item IDs must fit in one byte")]
    InvalidSlotValue { slot: usize, value: u32 },

    #[error("Invalid slot index {0}: the i-menu has 12 slots (0-11)")]
    InvalidSlotIndex(usize),

    #[error("Invalid file prefix {0:?}: expected at most 10 ASCII characters")]
    InvalidPrefix(String),

    #[error("Checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { stored: u16, computed: u16 },

    #[error("Blob length mismatch: {left} vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid generation profile: {0}")]
    InvalidGeneration(String),

    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.is_not_found());

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::Io(other_io_err);
        assert!(!err2.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::OffsetOutOfRange {
            offset: 0x10,
            len: 4,
            blob_len: 8,
        };
        assert_eq!(
            err.to_string(),
            "Offset 0x10 (+4 bytes) is outside the blob (8 bytes)"
        );
        assert_eq!(
            Error::NoCandidateFound(Mode::Manual).to_string(),
            "No candidate section found for Manual"
        );
    }
}
