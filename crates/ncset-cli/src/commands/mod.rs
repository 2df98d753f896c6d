//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod checksum;
pub mod compare;
pub mod detect;
pub mod edit;
pub mod export;
pub mod hex_utils;
pub mod hexdump;
pub mod offset;
pub mod probe;
pub mod show;

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use ncset_core::{ByteBlob, ConfigModel, Mode, checksum as crc};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::settings::Context;

/// Load a dump and run detection on it.
pub fn load_model(ctx: &Context, path: &Path) -> Result<ConfigModel> {
    let blob =
        ByteBlob::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let profile = ctx.profile_for(&blob)?;
    let model = ncset_core::detect(blob, profile, &ctx.detection);

    if !model.is_complete() {
        let missing: Vec<&str> = model.unresolved().map(|(mode, _)| mode.short_name()).collect();
        warn!(
            "Some sections unresolved ({}), proceed with caution",
            missing.join(", ")
        );
    }
    Ok(model)
}

/// Seal the model and write it, refusing output that does not verify.
pub fn write_sealed(model: &ConfigModel, input: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = model.encode_sealed()?;
    if !crc::verify(&bytes) {
        bail!("Sealed output failed checksum verification; nothing written");
    }

    let target = output.unwrap_or(input);
    std::fs::write(target, &bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!(
        "{} {} (crc 0x{:04X})",
        "Wrote".green(),
        target.display(),
        crc::compute(&bytes)
    );
    Ok(())
}

pub fn confidence_label(model: &ConfigModel, mode: Mode) -> String {
    match model.section(mode) {
        Some(section) if section.is_low_confidence() => "low".yellow().to_string(),
        Some(_) => "high".green().to_string(),
        None => "-".dimmed().to_string(),
    }
}
