use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::blob::FileHeader;
use crate::checksum;
use crate::error::Result;
use crate::offset::{Ambiguity, CandidateSection};
use crate::section::{AbsenceReason, ConfigModel, Confidence, DetectionPhase, Mode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumStatus {
    pub stored: Option<String>,
    pub computed: String,
    pub valid: bool,
}

impl ChecksumStatus {
    pub fn of(bytes: &[u8]) -> Self {
        Self {
            stored: checksum::stored(bytes).map(|crc| format!("0x{:04X}", crc)),
            computed: format!("0x{:04X}", checksum::compute(bytes)),
            valid: checksum::verify(bytes),
        }
    }
}

/// Outcome for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModeResolution {
    Resolved {
        mode: Mode,
        offset: String,
        score: f64,
        phase: DetectionPhase,
        confidence: Confidence,
        mode_id: u8,
    },
    Absent {
        mode: Mode,
        #[serde(flatten)]
        reason: AbsenceReason,
    },
}

/// Detection summary for diagnostic purposes
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub generated_at: DateTime<Local>,
    pub generation: String,
    pub file_size: usize,
    pub header: FileHeader,
    pub checksum: ChecksumStatus,
    pub modes: Vec<ModeResolution>,
    pub ambiguities: Vec<Ambiguity>,
    pub candidates: Vec<CandidateSection>,
}

impl DetectionReport {
    pub fn from_model(model: &ConfigModel) -> Self {
        let blob = model.blob();
        let modes = Mode::all()
            .filter_map(|mode| {
                if let Some(section) = model.section(mode) {
                    return Some(ModeResolution::Resolved {
                        mode,
                        offset: format!("0x{:X}", section.offset),
                        score: section.score,
                        phase: section.phase,
                        confidence: section.confidence,
                        mode_id: section.mode_id,
                    });
                }
                model.absence(mode).map(|reason| ModeResolution::Absent {
                    mode,
                    reason: *reason,
                })
            })
            .collect();

        Self {
            generated_at: Local::now(),
            generation: model.generation().to_string(),
            file_size: blob.len(),
            header: blob.header(),
            checksum: ChecksumStatus::of(blob.as_bytes()),
            modes,
            ambiguities: model.ambiguities().to_vec(),
            candidates: model.candidates().to_vec(),
        }
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
