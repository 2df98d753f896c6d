//! Default tuning for section detection
//!
//! # Search Strategy
//!
//! Detection first trusts the known section offsets of a hardware
//! generation, then scans the whole dump for modes it could not confirm.
//!
//! ```text
//!   section start
//!   │
//!   ├── +924  i-menu slot table (12 entries, 4 bytes apart)
//!   │
//!   ├── +1240 mode-identifier byte
//!   │
//!   └── +1540 file-name prefix
//! ```
//!
//! The full scan anchors on the mode-identifier byte: every occurrence of a
//! mode's code at position `p` proposes a section start at `p - 1240`. That
//! visits every byte-aligned start whose mode byte could match, without
//! scoring the ~99% of positions that cannot.
//!
//! # Calibration
//!
//! Correctly identified sections in real dumps score around 70-75. Random
//! windows score near 0 because their padding bytes are non-zero and their
//! mode byte does not match.

/// Score a known offset must reach to be accepted without scanning
pub const HIGH_CONFIDENCE_SCORE: f64 = 65.0;

/// Score below which a candidate is discarded
pub const MIN_VIABLE_SCORE: f64 = 50.0;

/// Stride-1 refine radius around known offsets that nearly matched (bytes)
///
/// Firmware revisions observed so far shift sections by a few bytes, so
/// this leaves ample room.
pub const NEAR_MISS_RADIUS: usize = 64;

/// Candidates kept per mode after the full scan
pub const MAX_CANDIDATES_PER_MODE: usize = 4;

/// Largest slot value considered a plausible (if unknown) item ID
pub const MAX_PLAUSIBLE_ITEM_ID: u8 = 100;

// ============================================================================
// Scoring weights (raw points before normalization to 0-100)
// ============================================================================

pub const KNOWN_ITEM_POINTS: f64 = 4.0;
pub const EMPTY_SLOT_POINTS: f64 = 0.5;
pub const PLAUSIBLE_ITEM_POINTS: f64 = 1.5;
pub const IMPLAUSIBLE_ITEM_POINTS: f64 = -4.0;
pub const MODE_MATCH_POINTS: f64 = 40.0;
pub const MODE_MISMATCH_POINTS: f64 = -40.0;
/// Multiplied by the non-zero fraction of the structural window
pub const DENSITY_POINTS: f64 = 12.0;
