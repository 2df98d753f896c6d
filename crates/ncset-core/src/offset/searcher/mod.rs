//! Section detection for NCSET dumps
//!
//! Two phases per mode. Known offsets from the generation profile are scored
//! first; a mode that clears the high-confidence bar there is settled and
//! never scanned. Every other mode goes through the full scan: each byte equal
//! to the mode's code is treated as a possible mode-identifier byte, the
//! section start it implies is scored, and known offsets that only just
//! missed get a stride-1 sweep of their neighbourhood.

pub mod constants;
mod scoring;

use std::collections::{BTreeMap, BTreeSet};

use memchr::memchr_iter;
use tracing::{debug, info, warn};

use crate::blob::ByteBlob;
use crate::blob::layout::section;
use crate::config::DetectionConfig;
use crate::error::Error;
use crate::offset::{CandidateSection, DetectionPass, GenerationProfile};
use crate::section::{DetectionPhase, Mode};

pub use scoring::*;

pub struct FormatDetector<'a> {
    profile: &'a GenerationProfile,
    config: &'a DetectionConfig,
}

impl<'a> FormatDetector<'a> {
    pub fn new(profile: &'a GenerationProfile, config: &'a DetectionConfig) -> Self {
        Self { profile, config }
    }

    pub fn scorer(&self) -> SectionScorer<'a> {
        SectionScorer::new(&self.profile.items, &self.config.weights)
    }

    /// Run both phases over the blob.
    ///
    /// The result is a pure function of the blob, profile and config:
    /// modes come out in declaration order and each mode's candidates are
    /// ranked by score, then offset.
    pub fn detect(&self, blob: &ByteBlob) -> DetectionPass {
        debug!(
            "Detecting sections in {} bytes with profile {}",
            blob.len(),
            self.profile.name
        );
        let scorer = self.scorer();
        let mut pass = DetectionPass::default();

        for mode in Mode::all() {
            let known = self.score_known_offsets(blob, mode, &scorer, &mut pass);
            if !known.accepted.is_empty() {
                debug!("  {}: settled by known offset", mode);
                pass.resolved_by_known.push(mode);
                pass.candidates.extend(known.accepted);
                continue;
            }

            let found = self.scan_mode(blob, mode, &known.near_misses, &scorer);
            if found.is_empty() {
                debug!("  {}: no viable candidate", mode);
            }
            pass.candidates.extend(found);
        }

        info!(
            "Detection produced {} candidate(s), {} mode(s) settled by known offsets",
            pass.candidates.len(),
            pass.resolved_by_known.len()
        );
        pass
    }

    fn score_known_offsets(
        &self,
        blob: &ByteBlob,
        mode: Mode,
        scorer: &SectionScorer<'_>,
        pass: &mut DetectionPass,
    ) -> KnownPhase {
        let mut phase = KnownPhase::default();

        for known in self.profile.known_offsets_for(mode) {
            match scorer.score(blob, known.offset, mode) {
                Ok(score) if score >= self.config.high_confidence => {
                    debug!(
                        "  {} @ {:#x}: {:.1} (accepted)",
                        mode, known.offset, score
                    );
                    phase.accepted.push(CandidateSection::new(
                        mode,
                        known.offset,
                        score,
                        DetectionPhase::KnownOffset,
                    ));
                }
                Ok(score) if score >= self.config.min_viable => {
                    debug!(
                        "  {} @ {:#x}: {:.1} (near miss)",
                        mode, known.offset, score
                    );
                    phase.near_misses.push(known.offset);
                }
                Ok(score) => {
                    debug!("  {} @ {:#x}: {:.1}", mode, known.offset, score);
                }
                Err(Error::OffsetOutOfRange { blob_len, .. }) => {
                    warn!(
                        "Known offset {:#x} for {} lies outside the {}-byte blob",
                        known.offset, mode, blob_len
                    );
                    pass.out_of_range.push(known.clone());
                }
                Err(e) => {
                    warn!("Scoring {} @ {:#x} failed: {}", mode, known.offset, e);
                }
            }
        }

        phase.accepted.sort_by(CandidateSection::rank_cmp);
        phase
    }

    /// Full-scan phase for one mode.
    pub fn scan_mode(
        &self,
        blob: &ByteBlob,
        mode: Mode,
        near_misses: &[usize],
        scorer: &SectionScorer<'_>,
    ) -> Vec<CandidateSection> {
        let mut offsets = anchor_offsets(blob, mode);
        let anchors = offsets.len();
        for &expected in near_misses {
            offsets.extend(refine_window(blob, expected, self.config.near_miss_radius));
        }
        debug!(
            "  {}: scanning {} offset(s) ({} anchor(s), {} near miss(es))",
            mode,
            offsets.len(),
            anchors,
            near_misses.len()
        );

        let mut found: Vec<CandidateSection> = offsets
            .into_iter()
            .filter_map(|offset| {
                let score = scorer.score(blob, offset, mode).ok()?;
                (score >= self.config.min_viable).then(|| {
                    CandidateSection::new(mode, offset, score, DetectionPhase::FullScan)
                })
            })
            .collect();

        found.sort_by(CandidateSection::rank_cmp);
        found.truncate(self.config.max_candidates_per_mode);
        found
    }
}

#[derive(Default)]
struct KnownPhase {
    accepted: Vec<CandidateSection>,
    near_misses: Vec<usize>,
}

/// Section starts implied by every occurrence of the mode's code byte.
fn anchor_offsets(blob: &ByteBlob, mode: Mode) -> BTreeSet<usize> {
    memchr_iter(mode.code(), blob.as_bytes())
        .filter_map(|pos| pos.checked_sub(section::MODE_ID))
        .filter(|&start| blob.contains_range(start, section::STRUCTURAL_WINDOW))
        .collect()
}

/// Every in-range start within `radius` bytes of `expected`, walking outward.
fn refine_window(blob: &ByteBlob, expected: usize, radius: usize) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(radius.saturating_mul(2).saturating_add(1));
    let mut push = |offset: usize| {
        if blob.contains_range(offset, section::STRUCTURAL_WINDOW) {
            offsets.push(offset);
        }
    };

    for delta in 0..=radius {
        if delta == 0 {
            push(expected);
            continue;
        }
        if let Some(below) = expected.checked_sub(delta) {
            push(below);
        }
        if let Some(above) = expected.checked_add(delta) {
            push(above);
        }
    }
    offsets
}

/// Best candidate per mode from a detection pass, for quick summaries.
pub fn best_per_mode(pass: &DetectionPass) -> BTreeMap<Mode, &CandidateSection> {
    let mut best: BTreeMap<Mode, &CandidateSection> = BTreeMap::new();
    for candidate in &pass.candidates {
        best.entry(candidate.mode)
            .and_modify(|current| {
                if candidate.rank_cmp(*current).is_lt() {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }
    best
}
