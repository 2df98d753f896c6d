//! Candidate aggregation and final per-mode selection.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::blob::layout::section;
use crate::error::Error;
use crate::offset::CandidateSection;
use crate::section::{Confidence, Mode};

/// Two modes whose selected sections overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    pub first: Mode,
    pub first_offset: usize,
    pub second: Mode,
    pub second_offset: usize,
}

impl Ambiguity {
    pub fn involves(&self, mode: Mode) -> bool {
        self.first == mode || self.second == mode
    }

    pub fn to_error(&self) -> Error {
        Error::AmbiguousSection {
            first: self.first,
            first_offset: self.first_offset,
            second: self.second,
            second_offset: self.second_offset,
        }
    }
}

/// Chosen candidate for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub candidate: CandidateSection,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub selected: BTreeMap<Mode, Selection>,
    pub ambiguities: Vec<Ambiguity>,
}

#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    candidates: Vec<CandidateSection>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. A repeated (mode, offset) pair keeps the higher score;
    /// on equal scores the earlier entry stays.
    pub fn add(&mut self, candidate: CandidateSection) {
        match self
            .candidates
            .iter_mut()
            .find(|c| c.mode == candidate.mode && c.offset == candidate.offset)
        {
            Some(existing) if candidate.score > existing.score => *existing = candidate,
            Some(_) => {}
            None => self.candidates.push(candidate),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates for a mode, best first.
    pub fn candidates_for(&self, mode: Mode) -> Vec<&CandidateSection> {
        let mut ranked: Vec<_> = self.candidates.iter().filter(|c| c.mode == mode).collect();
        ranked.sort_by(|a, b| a.rank_cmp(b));
        ranked
    }

    /// All candidates, modes in declaration order, each mode ranked.
    pub fn all(&self) -> Vec<&CandidateSection> {
        Mode::all().flat_map(|mode| self.candidates_for(mode)).collect()
    }

    /// Pick the best candidate per mode and flag overlapping selections.
    ///
    /// Overlapping modes both stay selected with low confidence; nothing is
    /// dropped.
    pub fn resolve(&self) -> Resolution {
        let mut resolution = Resolution::default();
        for mode in Mode::all() {
            if let Some(best) = self.candidates_for(mode).first() {
                resolution.selected.insert(
                    mode,
                    Selection {
                        candidate: (*best).clone(),
                        confidence: Confidence::High,
                    },
                );
            }
        }

        let picked: Vec<(Mode, usize)> = resolution
            .selected
            .iter()
            .map(|(mode, s)| (*mode, s.candidate.offset))
            .collect();

        for (i, &(first, first_offset)) in picked.iter().enumerate() {
            for &(second, second_offset) in &picked[i + 1..] {
                if first_offset.abs_diff(second_offset) >= section::STRUCTURAL_WINDOW {
                    continue;
                }
                warn!(
                    "{} at {:#x} overlaps {} at {:#x}",
                    first, first_offset, second, second_offset
                );
                resolution.ambiguities.push(Ambiguity {
                    first,
                    first_offset,
                    second,
                    second_offset,
                });
                for mode in [first, second] {
                    if let Some(selection) = resolution.selected.get_mut(&mode) {
                        selection.confidence = Confidence::Low;
                    }
                }
            }
        }

        resolution
    }
}

impl Extend<CandidateSection> for SectionRegistry {
    fn extend<I: IntoIterator<Item = CandidateSection>>(&mut self, iter: I) {
        for candidate in iter {
            self.add(candidate);
        }
    }
}

impl FromIterator<CandidateSection> for SectionRegistry {
    fn from_iter<I: IntoIterator<Item = CandidateSection>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::DetectionPhase;

    fn candidate(mode: Mode, offset: usize, score: f64) -> CandidateSection {
        CandidateSection::new(mode, offset, score, DetectionPhase::FullScan)
    }

    #[test]
    fn test_best_score_wins() {
        let registry: SectionRegistry = [
            candidate(Mode::Manual, 1000, 60.0),
            candidate(Mode::Manual, 9000, 80.0),
        ]
        .into_iter()
        .collect();

        let resolution = registry.resolve();
        assert_eq!(resolution.selected[&Mode::Manual].candidate.offset, 9000);
        assert_eq!(resolution.selected[&Mode::Manual].confidence, Confidence::High);
    }

    #[test]
    fn test_tie_breaks_on_lowest_offset() {
        let registry: SectionRegistry = [
            candidate(Mode::Auto, 9000, 70.0),
            candidate(Mode::Auto, 1000, 70.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.resolve().selected[&Mode::Auto].candidate.offset, 1000);
    }

    #[test]
    fn test_duplicates_keep_highest_score() {
        let mut registry = SectionRegistry::new();
        registry.add(candidate(Mode::User1, 500, 55.0));
        registry.add(candidate(Mode::User1, 500, 72.0));
        registry.add(candidate(Mode::User1, 500, 60.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.candidates_for(Mode::User1)[0].score, 72.0);
    }

    #[test]
    fn test_overlap_flags_both_modes_low() {
        let registry: SectionRegistry = [
            candidate(Mode::User1, 294_100, 75.0),
            candidate(Mode::User2, 294_104, 74.0),
            candidate(Mode::Program, 272_312, 78.0),
        ]
        .into_iter()
        .collect();

        let resolution = registry.resolve();
        assert_eq!(resolution.selected.len(), 3);
        assert_eq!(resolution.selected[&Mode::User1].confidence, Confidence::Low);
        assert_eq!(resolution.selected[&Mode::User2].confidence, Confidence::Low);
        assert_eq!(resolution.selected[&Mode::Program].confidence, Confidence::High);
        assert_eq!(resolution.ambiguities.len(), 1);
        assert!(resolution.ambiguities[0].involves(Mode::User2));
        assert!(matches!(
            resolution.ambiguities[0].to_error(),
            Error::AmbiguousSection { first: Mode::User1, .. }
        ));
    }

    #[test]
    fn test_adjacent_sections_do_not_overlap() {
        let registry: SectionRegistry = [
            candidate(Mode::User1, 183_080, 75.0),
            candidate(Mode::User2, 183_080 + section::STRUCTURAL_WINDOW, 75.0),
        ]
        .into_iter()
        .collect();
        assert!(registry.resolve().ambiguities.is_empty());
    }

    #[test]
    fn test_all_orders_by_mode_then_rank() {
        let registry: SectionRegistry = [
            candidate(Mode::User3, 10, 90.0),
            candidate(Mode::Manual, 20, 60.0),
            candidate(Mode::Manual, 30, 65.0),
        ]
        .into_iter()
        .collect();
        let offsets: Vec<_> = registry.all().iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![30, 20, 10]);
    }
}
