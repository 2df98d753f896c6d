//! Hexdump command implementation.
//!
//! Displays raw dump bytes in traditional hexdump format, useful for
//! checking a section's layout around a detected offset.

use std::path::Path;

use anyhow::Result;
use ncset_core::{ByteBlob, format_hex_dump};

use super::hex_utils::{format_offset, parse_offset};

/// Run the hexdump command
pub fn run(file: &Path, offset: &str, size: usize, ascii: bool) -> Result<()> {
    let blob = ByteBlob::load(file)?;
    let offset = parse_offset(offset)?;
    let size = size.min(blob.len().saturating_sub(offset));
    let bytes = blob.read_bytes(offset, size)?;

    println!("Hexdump at {} ({} bytes):", format_offset(offset), size);
    println!();
    for line in format_hex_dump(bytes, offset, ascii) {
        println!("{}", line);
    }

    Ok(())
}
