//! CLI settings file and generation selection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use ncset_core::{ByteBlob, DetectionConfig, GenerationProfile, GenerationSet};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Contents of the TOML settings file.
///
/// ```toml
/// generation = "Z5"
/// generations_file = "generations.json"
///
/// [detection]
/// high_confidence = 65.0
/// min_viable = 50.0
///
/// [detection.weights]
/// known_item = 4.0
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: Option<String>,
    pub generations_file: Option<PathBuf>,
    pub detection: DetectionConfig,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {}", path.display()))?;
        settings.detection.validate()?;
        Ok(settings)
    }
}

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub detection: DetectionConfig,
    pub generations: GenerationSet,
    pub generation: Option<String>,
}

impl Context {
    pub fn new(
        config: Option<&Path>,
        generations: Option<&Path>,
        generation: Option<String>,
    ) -> Result<Self> {
        let settings = match config {
            Some(path) => {
                let settings = Settings::load(path)?;
                info!("Loaded settings from {}", path.display());
                settings
            }
            None => Settings::default(),
        };

        let mut set = GenerationSet::default();
        if let Some(path) = generations.or(settings.generations_file.as_deref()) {
            let loaded = ncset_core::load_generations(path)?;
            for profile in loaded.generations {
                if set.entry(&profile.name).is_some() {
                    warn!("Generation {} redefined by {}", profile.name, path.display());
                    set.generations.retain(|p| !p.name.eq_ignore_ascii_case(&profile.name));
                }
                set.generations.push(profile);
            }
        }

        Ok(Self {
            detection: settings.detection,
            generations: set,
            generation: generation.or(settings.generation),
        })
    }

    /// Explicit generation, else one matching the file size, else the first.
    pub fn profile_for(&self, blob: &ByteBlob) -> Result<&GenerationProfile> {
        if let Some(name) = &self.generation {
            return match self.generations.entry(name) {
                Some(profile) => Ok(profile),
                None => bail!("Unknown generation {:?}", name),
            };
        }
        if let Some(profile) = self.generations.for_file_size(blob.len()) {
            debug!("Generation {} matched by file size", profile.name);
            return Ok(profile);
        }
        match self.generations.generations.first() {
            Some(profile) => Ok(profile),
            None => bail!("No generation profiles available"),
        }
    }
}
