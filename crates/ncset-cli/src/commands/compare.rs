//! Compare command: byte differences annotated with section layout.

use std::path::Path;

use anyhow::Result;
use ncset_core::{ByteBlob, Location, changed_modes, diff};
use owo_colors::OwoColorize;

use super::load_model;
use crate::settings::Context;

pub fn run(ctx: &Context, before: &Path, after: &Path, limit: usize) -> Result<()> {
    let model = load_model(ctx, before)?;
    let other = ByteBlob::load(after)?;
    let changes = diff(model.blob(), &other, Some(&model))?;

    if changes.is_empty() {
        println!("{}", "Files are identical".green());
        return Ok(());
    }

    println!("{} differing byte(s)", changes.len());
    println!();
    for change in changes.iter().take(limit) {
        println!(
            "{:>8}  {:02X} -> {:02X}  {}",
            change.offset,
            change.before,
            change.after,
            describe(&change.location)
        );
    }
    if changes.len() > limit {
        println!("... {} more", changes.len() - limit);
    }

    let modes: Vec<&str> = changed_modes(&changes)
        .into_iter()
        .map(|mode| mode.short_name())
        .collect();
    if !modes.is_empty() {
        println!();
        println!("Sections touched: {}", modes.join(", "));
    }

    Ok(())
}

fn describe(location: &Location) -> String {
    match *location {
        Location::Footer => "checksum footer".to_string(),
        Location::Slot { mode, slot, byte: 0 } => {
            format!("{} i-menu slot {}", mode.short_name(), slot + 1)
        }
        Location::Slot { mode, slot, byte } => format!(
            "{} i-menu slot {} padding +{}",
            mode.short_name(),
            slot + 1,
            byte
        )
        .yellow()
        .to_string(),
        Location::ModeId { mode } => format!("{} mode byte", mode.short_name()),
        Location::FilePrefix { mode } => format!("{} file prefix", mode.short_name()),
        Location::Section { mode, relative } => format!("{} +{}", mode.short_name(), relative),
        Location::Outside => "outside known sections".dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncset_core::Mode;

    #[test]
    fn test_describe_slot() {
        let text = describe(&Location::Slot {
            mode: Mode::User1,
            slot: 2,
            byte: 0,
        });
        assert_eq!(text, "U1 i-menu slot 3");
        assert_eq!(describe(&Location::Footer), "checksum footer");
    }
}
