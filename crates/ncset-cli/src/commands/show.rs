//! Show command: the i-menu of each section.

use std::path::Path;

use anyhow::Result;
use ncset_core::{ConfigSection, ItemCatalog, Mode};
use owo_colors::OwoColorize;

use super::{confidence_label, load_model};
use crate::settings::Context;

pub fn run(ctx: &Context, file: &Path, mode: Option<Mode>) -> Result<()> {
    let model = load_model(ctx, file)?;
    let catalog = &ctx.profile_for(model.blob())?.items;

    let sections: Vec<&ConfigSection> = match mode {
        Some(mode) => vec![model.require(mode)?],
        None => model.sections().collect(),
    };

    for section in sections {
        println!(
            "{} [{}] @ {} (mode byte {}, confidence {})",
            section.mode.expand_name().bold(),
            section.mode.short_name(),
            section.offset,
            section.mode_id,
            confidence_label(&model, section.mode)
        );
        if let Ok(prefix) = model.file_prefix(section.mode) {
            println!("  File prefix: {}", prefix);
        }
        print_slots(section, catalog);
        println!();
    }

    Ok(())
}

fn print_slots(section: &ConfigSection, catalog: &ItemCatalog) {
    for (index, &value) in section.slots.iter().enumerate() {
        let label = match u8::try_from(value) {
            Ok(id) => catalog.describe(id).to_string(),
            Err(_) => format!("invalid ({})", value),
        };
        println!("  {:>2}: {:>3}  {}", index + 1, value, label);
    }
}
