//! Partial configuration model built from one detection pass.
//!
//! Slot and mode-byte edits live in the model until [`ConfigModel::encode`]
//! writes them out. Section-image operations (copy, reset, file prefix) act
//! on the owned blob directly after committing pending edits.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::blob::ByteBlob;
use crate::blob::layout::section;
use crate::checksum;
use crate::config::DetectionConfig;
use crate::error::{Error, Result};
use crate::imenu::codec::{self, Slots};
use crate::offset::{
    Ambiguity, CandidateSection, FormatDetector, GenerationProfile, SectionRegistry,
};
use crate::section::{Confidence, DetectionPhase, Mode};

/// Prefix the camera writes into a freshly reset section.
pub const DEFAULT_FILE_PREFIX: &str = "DSC";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSection {
    pub mode: Mode,
    pub offset: usize,
    /// Item IDs; 0 is an empty slot and unknown IDs are kept as-is
    pub slots: Slots,
    pub mode_id: u8,
    pub score: f64,
    pub phase: DetectionPhase,
    pub confidence: Confidence,
    #[serde(skip)]
    decoded_slots: Slots,
    #[serde(skip)]
    decoded_mode_id: u8,
}

impl ConfigSection {
    fn decode(blob: &ByteBlob, candidate: &CandidateSection, confidence: Confidence) -> Result<Self> {
        blob.check_range(candidate.offset, section::STRUCTURAL_WINDOW)?;
        let slots = codec::decode_slots(blob, candidate.offset)?;
        let mode_id = codec::decode_mode_id(blob, candidate.offset)?;
        Ok(Self {
            mode: candidate.mode,
            offset: candidate.offset,
            slots,
            mode_id,
            score: candidate.score,
            phase: candidate.phase,
            confidence,
            decoded_slots: slots,
            decoded_mode_id: mode_id,
        })
    }

    fn reload(&mut self, blob: &ByteBlob) -> Result<()> {
        self.slots = codec::decode_slots(blob, self.offset)?;
        self.mode_id = codec::decode_mode_id(blob, self.offset)?;
        self.decoded_slots = self.slots;
        self.decoded_mode_id = self.mode_id;
        Ok(())
    }

    /// Write back only the slots and mode byte changed since the last
    /// decode. Sections may overlap, so unchanged slots keep whatever the
    /// blob holds now.
    fn encode_into(&self, blob: &mut ByteBlob) -> Result<()> {
        let mut slots = codec::decode_slots(blob, self.offset)?;
        for (index, (value, decoded)) in self.slots.iter().zip(&self.decoded_slots).enumerate() {
            if value != decoded {
                slots[index] = *value;
            }
        }
        codec::encode_slots(blob, self.offset, &slots)?;
        if self.mode_id != self.decoded_mode_id {
            codec::encode_mode_id(blob, self.offset, self.mode_id)?;
        }
        Ok(())
    }

    /// Whether the section holds edits not yet written to the blob.
    pub fn is_dirty(&self) -> bool {
        self.slots != self.decoded_slots || self.mode_id != self.decoded_mode_id
    }

    pub fn slot(&self, index: usize) -> Option<u32> {
        self.slots.get(index).copied()
    }

    pub fn mode_id_matches(&self) -> bool {
        self.mode_id == self.mode.code()
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence == Confidence::Low
    }
}

/// Why a mode has no section in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbsenceReason {
    NoCandidate,
    /// The known offset for this mode lies past the end of the blob
    OutOfRange { offset: usize, blob_len: usize },
}

impl AbsenceReason {
    pub fn to_error(&self, mode: Mode) -> Error {
        match *self {
            Self::NoCandidate => Error::NoCandidateFound(mode),
            Self::OutOfRange { offset, blob_len } => Error::OffsetOutOfRange {
                offset,
                len: section::STRUCTURAL_WINDOW,
                blob_len,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigModel {
    blob: ByteBlob,
    generation: String,
    sections: BTreeMap<Mode, ConfigSection>,
    absent: BTreeMap<Mode, AbsenceReason>,
    ambiguities: Vec<Ambiguity>,
    candidates: Vec<CandidateSection>,
}

/// Detect every mode's section and build the model.
///
/// Never fails as a whole: modes that cannot be resolved are recorded as
/// absent with a reason.
pub fn detect(blob: ByteBlob, profile: &GenerationProfile, config: &DetectionConfig) -> ConfigModel {
    ConfigModel::detect(blob, profile, config)
}

impl ConfigModel {
    pub fn detect(blob: ByteBlob, profile: &GenerationProfile, config: &DetectionConfig) -> Self {
        let pass = FormatDetector::new(profile, config).detect(&blob);
        let registry: SectionRegistry = pass.candidates.iter().cloned().collect();
        let resolution = registry.resolve();

        let mut sections = BTreeMap::new();
        let mut absent = BTreeMap::new();
        for mode in Mode::all() {
            let Some(selection) = resolution.selected.get(&mode) else {
                let reason = pass
                    .out_of_range
                    .iter()
                    .find(|known| known.mode == mode)
                    .map(|known| AbsenceReason::OutOfRange {
                        offset: known.offset,
                        blob_len: blob.len(),
                    })
                    .unwrap_or(AbsenceReason::NoCandidate);
                debug!("{} unresolved: {:?}", mode, reason);
                absent.insert(mode, reason);
                continue;
            };

            match ConfigSection::decode(&blob, &selection.candidate, selection.confidence) {
                Ok(section) => {
                    sections.insert(mode, section);
                }
                Err(e) => {
                    warn!("Failed to decode {} at {:#x}: {}", mode, selection.candidate.offset, e);
                    absent.insert(
                        mode,
                        AbsenceReason::OutOfRange {
                            offset: selection.candidate.offset,
                            blob_len: blob.len(),
                        },
                    );
                }
            }
        }

        info!(
            "Resolved {}/{} sections ({} ambiguous pair(s))",
            sections.len(),
            Mode::all().count(),
            resolution.ambiguities.len()
        );

        Self {
            blob,
            generation: profile.name.clone(),
            sections,
            absent,
            ambiguities: resolution.ambiguities,
            candidates: registry.all().into_iter().cloned().collect(),
        }
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// The owned bytes. Slot and mode-byte edits show up only after
    /// [`encode`](Self::encode) or [`commit`](Self::commit).
    pub fn blob(&self) -> &ByteBlob {
        &self.blob
    }

    pub fn section(&self, mode: Mode) -> Option<&ConfigSection> {
        self.sections.get(&mode)
    }

    /// Mutable access for bulk edits. Values are validated at encode time.
    pub fn section_mut(&mut self, mode: Mode) -> Option<&mut ConfigSection> {
        self.sections.get_mut(&mode)
    }

    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.values()
    }

    pub fn require(&self, mode: Mode) -> Result<&ConfigSection> {
        self.sections
            .get(&mode)
            .ok_or_else(|| self.absence_error(mode))
    }

    /// Like [`require`](Self::require), but an overlapping section is an
    /// `AmbiguousSection` error.
    pub fn require_confident(&self, mode: Mode) -> Result<&ConfigSection> {
        let section = self.require(mode)?;
        if let Some(ambiguity) = self.ambiguities.iter().find(|a| a.involves(mode)) {
            return Err(ambiguity.to_error());
        }
        Ok(section)
    }

    fn require_mut(&mut self, mode: Mode) -> Result<&mut ConfigSection> {
        let error = self.absence_error(mode);
        self.sections.get_mut(&mode).ok_or(error)
    }

    fn absence_error(&self, mode: Mode) -> Error {
        self.absent
            .get(&mode)
            .map(|reason| reason.to_error(mode))
            .unwrap_or(Error::NoCandidateFound(mode))
    }

    pub fn absence(&self, mode: Mode) -> Option<&AbsenceReason> {
        self.absent.get(&mode)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (Mode, &AbsenceReason)> {
        self.absent.iter().map(|(mode, reason)| (*mode, reason))
    }

    pub fn is_complete(&self) -> bool {
        self.absent.is_empty()
    }

    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }

    pub fn has_low_confidence(&self) -> bool {
        self.sections.values().any(ConfigSection::is_low_confidence)
    }

    /// Every candidate the detection pass kept, for diagnostics.
    pub fn candidates(&self) -> &[CandidateSection] {
        &self.candidates
    }

    pub fn set_slot(&mut self, mode: Mode, index: usize, item_id: u32) -> Result<()> {
        codec::validate_slot_value(index, item_id)?;
        let section = self.require_mut(mode)?;
        debug!(
            "{} slot {}: {} -> {}",
            mode, index, section.slots[index], item_id
        );
        section.slots[index] = item_id;
        Ok(())
    }

    pub fn set_mode_id(&mut self, mode: Mode, mode_id: u8) -> Result<()> {
        self.require_mut(mode)?.mode_id = mode_id;
        Ok(())
    }

    /// Copy of the blob with the edited slots and mode bytes written back.
    /// The checksum footer is left as it was.
    pub fn encode(&self) -> Result<ByteBlob> {
        let mut blob = self.blob.clone();
        for section in self.sections.values().filter(|s| s.is_dirty()) {
            section.encode_into(&mut blob)?;
        }
        Ok(blob)
    }

    /// Encoded bytes with a repaired footer, checked before they are returned.
    pub fn encode_sealed(&self) -> Result<Vec<u8>> {
        let mut bytes = self.encode()?.into_bytes();
        checksum::repair_in_place(&mut bytes)?;
        checksum::check(&bytes)?;
        Ok(bytes)
    }

    /// Write pending edits into the owned blob.
    pub fn commit(&mut self) -> Result<()> {
        self.blob = self.encode()?;
        self.reload_sections()
    }

    pub fn file_prefix(&self, mode: Mode) -> Result<String> {
        codec::read_file_prefix(&self.blob, self.require(mode)?.offset)
    }

    pub fn set_file_prefix(&mut self, mode: Mode, prefix: &str) -> Result<()> {
        let offset = self.require(mode)?.offset;
        self.commit()?;
        codec::write_file_prefix(&mut self.blob, offset, prefix)?;
        self.reload_sections()
    }

    /// Copy the whole section image of `from` over `to`, keeping the
    /// target's mode byte.
    pub fn copy_section(&mut self, from: Mode, to: Mode) -> Result<()> {
        let src = self.require(from)?.offset;
        let dst = self.require(to)?.offset;
        self.blob.check_range(src, section::SIZE)?;
        self.blob.check_range(dst, section::SIZE)?;

        self.commit()?;
        let target_mode_id = codec::decode_mode_id(&self.blob, dst)?;
        self.blob.copy_within(src, dst, section::SIZE)?;
        codec::encode_mode_id(&mut self.blob, dst, target_mode_id)?;
        info!("Copied {} ({:#x}) to {} ({:#x})", from, src, to, dst);
        self.reload_sections()
    }

    /// Zero the section image, keeping its mode byte and writing the
    /// default file prefix.
    pub fn reset_section(&mut self, mode: Mode) -> Result<()> {
        let offset = self.require(mode)?.offset;
        self.blob.check_range(offset, section::SIZE)?;

        self.commit()?;
        let mode_id = codec::decode_mode_id(&self.blob, offset)?;
        self.blob.fill(offset, section::SIZE, 0)?;
        codec::encode_mode_id(&mut self.blob, offset, mode_id)?;
        codec::write_file_prefix(&mut self.blob, offset, DEFAULT_FILE_PREFIX)?;
        info!("Reset {} ({:#x})", mode, offset);
        self.reload_sections()
    }

    // Sections can overlap, so a write to one image may change another.
    fn reload_sections(&mut self) -> Result<()> {
        for section in self.sections.values_mut() {
            section.reload(&self.blob)?;
        }
        Ok(())
    }
}
