//! Diagnostics for investigating dumps
//!
//! This module provides tools for:
//! - Summarizing a detection pass (`DetectionReport`)
//! - Scoring one offset against every mode (`probe_offset`)
//! - Rendering raw bytes (`format_hex_dump`)

mod hexdump;
mod probe;
mod report;

pub use hexdump::format_hex_dump;
pub use probe::probe_offset;
pub use report::{ChecksumStatus, DetectionReport, ModeResolution};
