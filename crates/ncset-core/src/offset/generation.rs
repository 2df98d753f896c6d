//! Per-hardware-generation lookup data.
//!
//! Each camera generation stores its sections at its own fixed offsets and
//! recognizes its own set of i-menu items. Only the earliest generation ships
//! built in; later ones are JSON data loaded at runtime, so supporting a new
//! body is a data change.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::imenu::{ItemCatalog, z5_items};
use crate::section::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownOffset {
    pub mode: Mode,
    pub offset: usize,
    /// Bank name for diagnostics (e.g., "primary")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
}

impl KnownOffset {
    pub fn new(mode: Mode, offset: usize) -> Self {
        Self {
            mode,
            offset,
            bank: None,
        }
    }

    pub fn in_bank(mode: Mode, offset: usize, bank: &str) -> Self {
        Self {
            mode,
            offset,
            bank: Some(bank.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProfile {
    /// Generation name (e.g., "Z5")
    pub name: String,
    /// Typical dump length, used to pick a profile for an unlabeled file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<usize>,
    /// Section offsets to try before scanning; a mode may have several
    pub known_offsets: Vec<KnownOffset>,
    #[serde(default)]
    pub items: ItemCatalog,
}

impl GenerationProfile {
    pub fn known_offsets_for(&self, mode: Mode) -> impl Iterator<Item = &KnownOffset> {
        self.known_offsets.iter().filter(move |k| k.mode == mode)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidGeneration(
                "generation name is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for known in &self.known_offsets {
            if !seen.insert((known.mode, known.offset)) {
                return Err(Error::InvalidGeneration(format!(
                    "{}: duplicate known offset {} for {}",
                    self.name, known.offset, known.mode
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSet {
    pub generations: Vec<GenerationProfile>,
}

impl GenerationSet {
    pub fn entry(&self, name: &str) -> Option<&GenerationProfile> {
        self.generations
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
    }

    /// Profile whose typical file size matches the dump, if any.
    pub fn for_file_size(&self, len: usize) -> Option<&GenerationProfile> {
        self.generations
            .iter()
            .find(|profile| profile.file_size == Some(len))
    }

    pub fn validate(&self) -> Result<()> {
        for profile in &self.generations {
            profile.validate()?;
        }
        Ok(())
    }
}

impl Default for GenerationSet {
    fn default() -> Self {
        Self {
            generations: vec![builtin_generation()],
        }
    }
}

/// Z5 (first generation) bank layout.
///
/// The primary bank holds whichever of P/S/A/M/Auto is selected on the dial
/// and the secondary bank holds the previous one, so every exposure mode is
/// tried at both. User settings have dedicated banks.
pub fn builtin_generation() -> GenerationProfile {
    const PRIMARY: usize = 169824;
    const SECONDARY: usize = 176452;

    let mut known_offsets = Vec::new();
    for mode in [
        Mode::Manual,
        Mode::Program,
        Mode::Aperture,
        Mode::Shutter,
        Mode::Auto,
    ] {
        known_offsets.push(KnownOffset::in_bank(mode, PRIMARY, "primary"));
        known_offsets.push(KnownOffset::in_bank(mode, SECONDARY, "secondary"));
    }
    known_offsets.push(KnownOffset::in_bank(Mode::User1, 183080, "U1"));
    known_offsets.push(KnownOffset::in_bank(Mode::User2, 189708, "U2"));
    known_offsets.push(KnownOffset::in_bank(Mode::User3, 196336, "U3"));

    GenerationProfile {
        name: "Z5".to_string(),
        file_size: None,
        known_offsets,
        items: z5_items(),
    }
}

pub fn load_generations<P: AsRef<Path>>(path: P) -> Result<GenerationSet> {
    let content = fs::read_to_string(&path)?;
    let set: GenerationSet = serde_json::from_str(&content)?;
    set.validate()?;
    debug!(
        "Loaded {} generation profile(s) from {}",
        set.generations.len(),
        path.as_ref().display()
    );
    Ok(set)
}

pub fn save_generations<P: AsRef<Path>>(path: P, set: &GenerationSet) -> Result<()> {
    let content = serde_json::to_string_pretty(set)?;
    fs::write(path, content)?;
    Ok(())
}
