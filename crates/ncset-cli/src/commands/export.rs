//! Export command for writing detected sections as JSON.

use std::path::Path;

use anyhow::Result;
use ncset_core::ConfigExport;

use super::load_model;
use crate::settings::Context;

pub fn run(ctx: &Context, file: &Path, output: Option<&Path>) -> Result<()> {
    let model = load_model(ctx, file)?;
    let catalog = &ctx.profile_for(model.blob())?.items;
    let export = ConfigExport::from_model(&model, catalog);

    match output {
        Some(path) => {
            export.save(path)?;
            eprintln!("Exported {} section(s) to {}", export.sections.len(), path.display());
        }
        None => println!("{}", export.to_json()?),
    }

    Ok(())
}
