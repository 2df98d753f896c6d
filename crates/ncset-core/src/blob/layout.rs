//! Binary layout constants for NCSET menu-settings dumps
//!
//! This module centralizes the byte offsets used to read and patch a dump.
//! Constants are organized by structure type.

/// Layout of one configuration section, relative to the section start
pub mod section {
    /// Entry stride in the i-menu slot table (one 32-bit word per slot)
    pub const WORD: usize = 4;

    /// Number of user-visible i-menu slots
    pub const SLOT_COUNT: usize = 12;

    /// Start of the i-menu slot table
    pub const IMENU: usize = 924;

    /// Byte past the last slot entry
    pub const IMENU_END: usize = IMENU + SLOT_COUNT * WORD;

    /// Mode-identifier byte
    pub const MODE_ID: usize = 1240;

    /// File-name prefix (ASCII, NUL padded)
    pub const FILE_PREFIX: usize = 1540;
    pub const FILE_PREFIX_LEN: usize = 10;

    /// Bytes that must exist past a section start for it to be scored:
    /// the slot table and the mode-identifier byte.
    pub const STRUCTURAL_WINDOW: usize = MODE_ID + 1;

    /// Full size of a section image (one bank)
    pub const SIZE: usize = 6628;

    /// Offset of slot `index` relative to the section start
    pub const fn slot(index: usize) -> usize {
        IMENU + index * WORD
    }
}

/// Layout of the file header
pub mod header {
    /// Camera model string (ASCII, NUL terminated)
    pub const MODEL: usize = 0;
    pub const MODEL_LEN: usize = 11;

    /// Firmware version string (ASCII, NUL terminated)
    pub const FIRMWARE: usize = 24;
    pub const FIRMWARE_LEN: usize = 5;
}

/// Layout of the trailing checksum footer
pub mod footer {
    /// CRC-16 stored big-endian in the final bytes
    pub const LEN: usize = 2;
}
