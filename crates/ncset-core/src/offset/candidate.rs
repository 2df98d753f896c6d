use serde::Serialize;

use crate::offset::KnownOffset;
use crate::section::{DetectionPhase, Mode};

/// A proposed section start for one mode. Never edited after creation; a
/// better guess is a new candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSection {
    pub mode: Mode,
    pub offset: usize,
    /// Confidence on the 0-100 scale
    pub score: f64,
    pub phase: DetectionPhase,
}

impl CandidateSection {
    pub fn new(mode: Mode, offset: usize, score: f64, phase: DetectionPhase) -> Self {
        Self {
            mode,
            offset,
            score,
            phase,
        }
    }

    /// Ranking used everywhere candidates are ordered: score descending,
    /// then offset ascending.
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

/// Everything one detection pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionPass {
    /// Modes in declaration order, each mode's candidates ranked
    pub candidates: Vec<CandidateSection>,
    /// Known offsets that did not fit in the blob
    pub out_of_range: Vec<KnownOffset>,
    /// Modes settled by the known-offset phase
    pub resolved_by_known: Vec<Mode>,
}

impl DetectionPass {
    pub fn candidates_for(&self, mode: Mode) -> impl Iterator<Item = &CandidateSection> {
        self.candidates.iter().filter(move |c| c.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_cmp() {
        let a = CandidateSection::new(Mode::Manual, 200, 70.0, DetectionPhase::FullScan);
        let b = CandidateSection::new(Mode::Manual, 100, 70.0, DetectionPhase::FullScan);
        let c = CandidateSection::new(Mode::Manual, 50, 60.0, DetectionPhase::FullScan);

        let mut ranked = vec![c.clone(), a.clone(), b.clone()];
        ranked.sort_by(CandidateSection::rank_cmp);
        assert_eq!(ranked, vec![b, a, c]);
    }
}
