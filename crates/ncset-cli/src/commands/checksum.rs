//! Checksum verification and repair.

use std::path::Path;

use anyhow::{Result, bail};
use ncset_core::{ByteBlob, checksum};
use owo_colors::OwoColorize;

pub fn verify(file: &Path) -> Result<()> {
    let blob = ByteBlob::load(file)?;
    let computed = checksum::compute(blob.as_bytes());

    match checksum::stored(blob.as_bytes()) {
        Some(stored) if stored == computed => {
            println!("{} crc 0x{:04X}", "OK".green().bold(), stored);
            Ok(())
        }
        Some(stored) => {
            println!(
                "{} stored 0x{:04X}, computed 0x{:04X}",
                "MISMATCH".red().bold(),
                stored,
                computed
            );
            bail!("Checksum mismatch in {}", file.display())
        }
        None => bail!("{} is too short to carry a checksum", file.display()),
    }
}

pub fn repair(file: &Path, output: Option<&Path>) -> Result<()> {
    let mut blob = ByteBlob::load(file)?;
    let before = checksum::stored(blob.as_bytes());
    let crc = blob.repair_checksum()?;
    checksum::check(blob.as_bytes())?;

    let target = output.unwrap_or(file);
    blob.save(target)?;

    match before {
        Some(old) if old == crc => println!("Checksum already valid (0x{:04X})", crc),
        Some(old) => println!("Repaired checksum 0x{:04X} -> 0x{:04X}", old, crc),
        None => println!("Wrote checksum 0x{:04X}", crc),
    }
    println!("{} {}", "Wrote".green(), target.display());
    Ok(())
}
