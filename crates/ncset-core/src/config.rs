//! Detection tuning.
//!
//! Thresholds and weights are empirical, so they live in data rather than in
//! the scorer. The CLI reads them from a TOML file; library callers use
//! [`DetectionConfig::builder`].

use serde::{Deserialize, Serialize};

use crate::blob::layout::section;
use crate::error::{Error, Result};
use crate::offset::constants::*;

/// Points awarded by the section scorer before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Slot holds an ID listed in the generation's item catalog
    pub known_item: f64,
    /// Slot holds the empty sentinel (0)
    pub empty_slot: f64,
    /// Slot holds an unlisted but small ID with clean padding
    pub plausible_item: f64,
    /// Slot value is too large or its padding bytes are non-zero
    pub implausible_item: f64,
    pub mode_match: f64,
    pub mode_mismatch: f64,
    /// Scaled by the non-zero fraction of the structural window
    pub density: f64,
    pub max_plausible_item_id: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            known_item: KNOWN_ITEM_POINTS,
            empty_slot: EMPTY_SLOT_POINTS,
            plausible_item: PLAUSIBLE_ITEM_POINTS,
            implausible_item: IMPLAUSIBLE_ITEM_POINTS,
            mode_match: MODE_MATCH_POINTS,
            mode_mismatch: MODE_MISMATCH_POINTS,
            density: DENSITY_POINTS,
            max_plausible_item_id: MAX_PLAUSIBLE_ITEM_ID,
        }
    }
}

impl ScoringWeights {
    /// Best achievable raw score: every slot known, mode matching, full density.
    pub fn max_raw(&self) -> f64 {
        crate::blob::layout::section::SLOT_COUNT as f64 * self.known_item
            + self.mode_match
            + self.density
    }
}

/// Configuration for a detection pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Known offsets scoring at least this are accepted without a scan
    pub high_confidence: f64,
    /// Candidates scoring below this are dropped
    pub min_viable: f64,
    /// Stride-1 refine radius around near-miss known offsets
    pub near_miss_radius: usize,
    /// Candidates kept per mode by the full scan
    pub max_candidates_per_mode: usize,
    pub weights: ScoringWeights,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            high_confidence: HIGH_CONFIDENCE_SCORE,
            min_viable: MIN_VIABLE_SCORE,
            near_miss_radius: NEAR_MISS_RADIUS,
            max_candidates_per_mode: MAX_CANDIDATES_PER_MODE,
            weights: ScoringWeights::default(),
        }
    }
}

impl DetectionConfig {
    /// Create a new configuration builder
    pub fn builder() -> DetectionConfigBuilder {
        DetectionConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        let in_scale = |v: f64| (0.0..=100.0).contains(&v);
        if !in_scale(self.high_confidence) || !in_scale(self.min_viable) {
            return Err(Error::InvalidConfig(format!(
                "thresholds must be within 0-100 (high={}, min={})",
                self.high_confidence, self.min_viable
            )));
        }
        if self.min_viable > self.high_confidence {
            return Err(Error::InvalidConfig(format!(
                "min_viable ({}) exceeds high_confidence ({})",
                self.min_viable, self.high_confidence
            )));
        }
        if self.max_candidates_per_mode == 0 {
            return Err(Error::InvalidConfig(
                "max_candidates_per_mode must be at least 1".to_string(),
            ));
        }
        if self.near_miss_radius > section::SIZE {
            return Err(Error::InvalidConfig(format!(
                "near_miss_radius ({}) exceeds the section size ({})",
                self.near_miss_radius,
                section::SIZE
            )));
        }
        if self.weights.max_raw() <= 0.0 {
            return Err(Error::InvalidConfig(
                "scoring weights leave no positive maximum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for DetectionConfig
#[derive(Debug, Clone, Default)]
pub struct DetectionConfigBuilder {
    high_confidence: Option<f64>,
    min_viable: Option<f64>,
    near_miss_radius: Option<usize>,
    max_candidates_per_mode: Option<usize>,
    weights: Option<ScoringWeights>,
}

impl DetectionConfigBuilder {
    pub fn high_confidence(mut self, score: f64) -> Self {
        self.high_confidence = Some(score);
        self
    }

    pub fn min_viable(mut self, score: f64) -> Self {
        self.min_viable = Some(score);
        self
    }

    pub fn near_miss_radius(mut self, bytes: usize) -> Self {
        self.near_miss_radius = Some(bytes);
        self
    }

    pub fn max_candidates_per_mode(mut self, count: usize) -> Self {
        self.max_candidates_per_mode = Some(count);
        self
    }

    pub fn weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Build the configuration, rejecting inconsistent thresholds
    pub fn build(self) -> Result<DetectionConfig> {
        let default = DetectionConfig::default();
        let config = DetectionConfig {
            high_confidence: self.high_confidence.unwrap_or(default.high_confidence),
            min_viable: self.min_viable.unwrap_or(default.min_viable),
            near_miss_radius: self.near_miss_radius.unwrap_or(default.near_miss_radius),
            max_candidates_per_mode: self
                .max_candidates_per_mode
                .unwrap_or(default.max_candidates_per_mode),
            weights: self.weights.unwrap_or(default.weights),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DetectionConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.weights.max_raw() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DetectionConfig::builder()
            .high_confidence(80.0)
            .near_miss_radius(8)
            .build()
            .unwrap();
        assert_eq!(config.high_confidence, 80.0);
        assert_eq!(config.near_miss_radius, 8);
        assert_eq!(config.min_viable, MIN_VIABLE_SCORE);
    }

    #[test]
    fn test_oversized_radius_rejected() {
        let result = DetectionConfig::builder()
            .near_miss_radius(usize::MAX)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let config = DetectionConfig::builder()
            .near_miss_radius(section::SIZE)
            .build()
            .unwrap();
        assert_eq!(config.near_miss_radius, section::SIZE);
    }

    #[test]
    fn test_builder_rejects_inverted_thresholds() {
        let result = DetectionConfig::builder()
            .high_confidence(40.0)
            .min_viable(60.0)
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_zero_candidates() {
        assert!(
            DetectionConfig::builder()
                .max_candidates_per_mode(0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DetectionConfig =
            serde_json::from_str(r#"{"min_viable": 45.0, "weights": {"density": 0.0}}"#).unwrap();
        assert_eq!(config.min_viable, 45.0);
        assert_eq!(config.high_confidence, HIGH_CONFIDENCE_SCORE);
        assert_eq!(config.weights.density, 0.0);
        assert_eq!(config.weights.known_item, KNOWN_ITEM_POINTS);
    }
}
