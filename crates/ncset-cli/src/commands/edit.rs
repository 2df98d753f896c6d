//! Commands that modify a dump and write it back sealed.

use std::path::Path;

use anyhow::{Result, bail};
use ncset_core::{ConfigModel, Mode};
use tracing::info;

use super::{load_model, write_sealed};
use crate::cli::WriteArgs;
use crate::settings::Context;

/// Refuse to edit an overlapping section unless forced.
fn editable(model: &ConfigModel, mode: Mode, force: bool) -> Result<()> {
    if force {
        model.require(mode)?;
    } else {
        model.require_confident(mode)?;
    }
    Ok(())
}

/// Camera slot numbers are 1-based.
fn slot_index(slot: usize) -> Result<usize> {
    match slot.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Slot numbers start at 1"),
    }
}

pub fn set_slot(
    ctx: &Context,
    file: &Path,
    mode: Mode,
    slot: usize,
    item: u32,
    write: &WriteArgs,
) -> Result<()> {
    let mut model = load_model(ctx, file)?;
    editable(&model, mode, write.force)?;

    let index = slot_index(slot)?;
    model.set_slot(mode, index, item)?;
    info!("{} slot {} set to {}", mode.short_name(), slot, item);

    write_sealed(&model, file, write.output.as_deref())
}

pub fn set_prefix(
    ctx: &Context,
    file: &Path,
    mode: Mode,
    prefix: &str,
    write: &WriteArgs,
) -> Result<()> {
    let mut model = load_model(ctx, file)?;
    editable(&model, mode, write.force)?;

    model.set_file_prefix(mode, prefix)?;
    info!("{} file prefix set to {:?}", mode.short_name(), prefix);

    write_sealed(&model, file, write.output.as_deref())
}

pub fn copy_section(ctx: &Context, file: &Path, from: Mode, to: Mode, write: &WriteArgs) -> Result<()> {
    if from == to {
        bail!("Source and target are both {}", from);
    }
    let mut model = load_model(ctx, file)?;
    editable(&model, from, write.force)?;
    editable(&model, to, write.force)?;

    model.copy_section(from, to)?;
    write_sealed(&model, file, write.output.as_deref())
}

pub fn reset_section(ctx: &Context, file: &Path, mode: Mode, write: &WriteArgs) -> Result<()> {
    let mut model = load_model(ctx, file)?;
    editable(&model, mode, write.force)?;

    model.reset_section(mode)?;
    write_sealed(&model, file, write.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(1).unwrap(), 0);
        assert_eq!(slot_index(12).unwrap(), 11);
        assert!(slot_index(0).is_err());
    }
}
