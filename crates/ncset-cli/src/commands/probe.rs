//! Probe command: score one offset against every mode.

use std::path::Path;

use anyhow::Result;
use ncset_core::{ByteBlob, SlotClass, probe_offset};
use owo_colors::OwoColorize;

use super::hex_utils::{format_offset, parse_offset};
use crate::settings::Context;

pub fn run(ctx: &Context, file: &Path, offset: &str) -> Result<()> {
    let blob = ByteBlob::load(file)?;
    let offset = parse_offset(offset)?;
    let profile = ctx.profile_for(&blob)?;
    let results = probe_offset(&blob, offset, profile, &ctx.detection)?;

    println!("Probe at {} (generation {}):", format_offset(offset), profile.name);
    println!();
    println!(
        "{:<6} {:>7} {:>5} {:>5} {:>5} {:>5} {:>8}  {}",
        "Mode", "Score", "Known", "Empty", "Plaus", "Bad", "Density", "Mode byte"
    );
    for result in results {
        let score = format!("{:>7.1}", result.score);
        let score = if result.score >= ctx.detection.high_confidence {
            score.green().to_string()
        } else if result.score >= ctx.detection.min_viable {
            score.yellow().to_string()
        } else {
            score
        };
        println!(
            "{:<6} {} {:>5} {:>5} {:>5} {:>5} {:>8.3}  {}{}",
            result.mode.short_name(),
            score,
            result.count(SlotClass::Known),
            result.count(SlotClass::Empty),
            result.count(SlotClass::Plausible),
            result.count(SlotClass::Implausible),
            result.density,
            result.mode_byte,
            if result.mode_matches { " (match)" } else { "" }
        );
    }

    Ok(())
}
