//! Detect command: where each mode's section lives.

use std::path::Path;

use anyhow::Result;
use ncset_core::{AbsenceReason, DetectionReport, Mode};
use owo_colors::OwoColorize;

use super::{confidence_label, load_model};
use crate::settings::Context;

pub fn run(ctx: &Context, file: &Path, report: Option<&Path>) -> Result<()> {
    let model = load_model(ctx, file)?;
    let header = model.blob().header();

    println!(
        "{} ({} bytes, generation {})",
        file.display(),
        model.blob().len(),
        model.generation()
    );
    if let Some(camera) = &header.camera_model {
        println!(
            "Camera: {}  Firmware: {}",
            camera,
            header.firmware.as_deref().unwrap_or("?")
        );
    }
    let checksum = if model.blob().verify_checksum() {
        "valid".green().to_string()
    } else {
        "INVALID".red().to_string()
    };
    println!("Checksum: {}", checksum);
    println!();

    println!(
        "{:<6} {:>10} {:>7} {:<13} {:<5}",
        "Mode", "Offset", "Score", "Phase", "Conf"
    );
    for mode in Mode::all() {
        match model.section(mode) {
            Some(section) => println!(
                "{:<6} {:>10} {:>7.1} {:<13} {}",
                mode.short_name(),
                section.offset,
                section.score,
                section.phase.to_string(),
                confidence_label(&model, mode)
            ),
            None => {
                let reason = match model.absence(mode) {
                    Some(AbsenceReason::OutOfRange { offset, .. }) => {
                        format!("known offset {} past end of file", offset)
                    }
                    _ => "no candidate".to_string(),
                };
                println!("{:<6} {}", mode.short_name(), reason.dimmed());
            }
        }
    }

    for ambiguity in model.ambiguities() {
        println!("{} {}", "Ambiguous:".yellow(), ambiguity.to_error());
    }

    if let Some(path) = report {
        DetectionReport::from_model(&model).save(path)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}
