//! # ncset-core
//!
//! Core library for reading and editing NCSET camera menu-settings dumps.
//!
//! This crate provides:
//! - Bounds-checked access to the raw dump (`ByteBlob`) and its CRC-16 footer
//! - Section detection: known offsets per camera generation, then a full scan
//! - The i-menu slot codec, lossless for item IDs it does not recognize
//! - An editable model (`ConfigModel`) with sealed re-encoding
//!
//! ## Feature Flags
//!
//! - `debug-tools`: Enables detection reports, offset probing and hex dumps.
//!   This feature is intended for CLI tools and development, not production use.

pub mod blob;
pub mod checksum;
pub mod config;
#[cfg(feature = "debug-tools")]
pub mod debug;
pub mod diff;
pub mod error;
pub mod export;
pub mod imenu;
pub mod offset;
pub mod section;

#[cfg(test)]
mod fixture;

pub use blob::{ByteBlob, FileHeader};
pub use config::{DetectionConfig, DetectionConfigBuilder, ScoringWeights};
pub use diff::{ByteChange, Location, changed_modes, diff};
pub use error::{Error, Result};
pub use export::{ConfigExport, SectionExport, SlotExport, UnresolvedExport};
pub use imenu::{ItemCatalog, SlotItem, Slots, z5_items};
pub use offset::{
    Ambiguity, CandidateSection, DetectionPass, FormatDetector, GenerationProfile, GenerationSet,
    KnownOffset, ScoreBreakdown, SectionRegistry, SectionScorer, SlotClass, builtin_generation,
    load_generations, save_generations,
};
pub use section::{
    AbsenceReason, Confidence, ConfigModel, ConfigSection, DEFAULT_FILE_PREFIX, DetectionPhase,
    Mode, detect,
};

// Debug utilities (requires debug-tools feature)
#[cfg(feature = "debug-tools")]
pub use debug::{ChecksumStatus, DetectionReport, ModeResolution, format_hex_dump, probe_offset};
