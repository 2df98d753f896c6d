//! Section scoring.
//!
//! Each of the 12 slot entries is classified, the mode byte is compared with
//! the target mode's code, and the weighted sum is normalized to 0-100.

use serde::Serialize;

use crate::blob::ByteBlob;
use crate::blob::layout::section;
use crate::config::ScoringWeights;
use crate::error::Result;
use crate::imenu::{EMPTY_SLOT, ItemCatalog};
use crate::section::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotClass {
    Known,
    Empty,
    /// Small unlisted ID with zero padding
    Plausible,
    Implausible,
}

/// How a score was reached, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub mode: Mode,
    pub offset: usize,
    pub slots: [SlotClass; section::SLOT_COUNT],
    pub mode_byte: u8,
    pub mode_matches: bool,
    pub density: f64,
    pub raw: f64,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn count(&self, class: SlotClass) -> usize {
        self.slots.iter().filter(|&&c| c == class).count()
    }
}

pub struct SectionScorer<'a> {
    catalog: &'a ItemCatalog,
    weights: &'a ScoringWeights,
}

impl<'a> SectionScorer<'a> {
    pub fn new(catalog: &'a ItemCatalog, weights: &'a ScoringWeights) -> Self {
        Self { catalog, weights }
    }

    /// Classify one 4-byte slot entry (ID byte followed by padding).
    pub fn classify_slot(&self, entry: &[u8]) -> SlotClass {
        let id = entry[0];
        if entry[1..].iter().any(|&b| b != 0) {
            return SlotClass::Implausible;
        }
        if id == EMPTY_SLOT {
            SlotClass::Empty
        } else if self.catalog.is_known(id) {
            SlotClass::Known
        } else if id <= self.weights.max_plausible_item_id {
            SlotClass::Plausible
        } else {
            SlotClass::Implausible
        }
    }

    fn slot_points(&self, class: SlotClass) -> f64 {
        match class {
            SlotClass::Known => self.weights.known_item,
            SlotClass::Empty => self.weights.empty_slot,
            SlotClass::Plausible => self.weights.plausible_item,
            SlotClass::Implausible => self.weights.implausible_item,
        }
    }

    pub fn breakdown(&self, blob: &ByteBlob, offset: usize, mode: Mode) -> Result<ScoreBreakdown> {
        let window = blob.read_bytes(offset, section::STRUCTURAL_WINDOW)?;

        let mut slots = [SlotClass::Empty; section::SLOT_COUNT];
        let mut raw = 0.0;
        for (index, class) in slots.iter_mut().enumerate() {
            let start = section::slot(index);
            *class = self.classify_slot(&window[start..start + section::WORD]);
            raw += self.slot_points(*class);
        }

        let mode_byte = window[section::MODE_ID];
        let mode_matches = mode_byte == mode.code();
        raw += if mode_matches {
            self.weights.mode_match
        } else {
            self.weights.mode_mismatch
        };

        let density = blob.density(offset, section::STRUCTURAL_WINDOW)?;
        raw += density * self.weights.density;

        let score = normalize(raw, self.weights.max_raw());

        Ok(ScoreBreakdown {
            mode,
            offset,
            slots,
            mode_byte,
            mode_matches,
            density,
            raw,
            score,
        })
    }

    pub fn score(&self, blob: &ByteBlob, offset: usize, mode: Mode) -> Result<f64> {
        Ok(self.breakdown(blob, offset, mode)?.score)
    }
}

fn normalize(raw: f64, max_raw: f64) -> f64 {
    if max_raw <= 0.0 {
        return 0.0;
    }
    (raw / max_raw * 100.0).clamp(0.0, 100.0)
}
