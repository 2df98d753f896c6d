//! Offset command implementation.

use anyhow::Result;

use super::hex_utils::{format_offset, parse_offset};

/// Run the offset command
pub fn run(from: &str, to: &str) -> Result<()> {
    let from = parse_offset(from)?;
    let to = parse_offset(to)?;

    let diff = from.abs_diff(to);
    let sign = if to >= from { "" } else { "-" };

    println!("From: {}", format_offset(from));
    println!("To:   {}", format_offset(to));
    println!();
    println!("Offset: {}{} (0x{:X})", sign, diff, diff);

    Ok(())
}
