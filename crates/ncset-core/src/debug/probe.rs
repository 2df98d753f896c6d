use crate::blob::ByteBlob;
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::offset::{GenerationProfile, ScoreBreakdown, SectionScorer};
use crate::section::Mode;

/// Score one offset as a section start for every mode, best first.
pub fn probe_offset(
    blob: &ByteBlob,
    offset: usize,
    profile: &GenerationProfile,
    config: &DetectionConfig,
) -> Result<Vec<ScoreBreakdown>> {
    let scorer = SectionScorer::new(&profile.items, &config.weights);
    let mut results = Mode::all()
        .map(|mode| scorer.breakdown(blob, offset, mode))
        .collect::<Result<Vec<_>>>()?;
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fixture::{DumpBuilder, typical_slots};
    use crate::offset::builtin_generation;

    #[test]
    fn test_probe_ranks_matching_mode_first() {
        let blob = DumpBuilder::new(8192)
            .section(2048, Mode::User3.code(), typical_slots())
            .build();
        let results = probe_offset(
            &blob,
            2048,
            &builtin_generation(),
            &DetectionConfig::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 8);
        assert_eq!(results[0].mode, Mode::User3);
        assert!(results[0].mode_matches);
        assert!(results[1..].iter().all(|r| !r.mode_matches));
    }

    #[test]
    fn test_probe_out_of_range() {
        let blob = ByteBlob::new(vec![0; 100]);
        let result = probe_offset(&blob, 0, &builtin_generation(), &DetectionConfig::default());
        assert!(matches!(result, Err(Error::OffsetOutOfRange { .. })));
    }
}
