//! Offset parsing and formatting utilities.

use anyhow::{Result, anyhow};

/// Parse an offset: hex with a 0x prefix, decimal otherwise.
///
/// # Examples
///
/// ```text
/// parse_offset("0x29760") == Ok(169824)
/// parse_offset("169824")  == Ok(169824)
/// ```
pub fn parse_offset(s: &str) -> Result<usize> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).map_err(|e| anyhow!("Invalid hex offset: {}", e)),
        None => s.parse().map_err(|e| anyhow!("Invalid offset: {}", e)),
    }
}

/// Format an offset as hex with the decimal value alongside.
pub fn format_offset(offset: usize) -> String {
    format!("0x{:X} ({})", offset, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset_hex() {
        assert_eq!(parse_offset("0x29760").unwrap(), 169824);
        assert_eq!(parse_offset("0X29760").unwrap(), 169824);
    }

    #[test]
    fn test_parse_offset_decimal() {
        assert_eq!(parse_offset("169824").unwrap(), 169824);
        assert_eq!(parse_offset(" 42 ").unwrap(), 42);
    }

    #[test]
    fn test_parse_offset_invalid() {
        assert!(parse_offset("0xZZZ").is_err());
        assert!(parse_offset("29760h").is_err());
        assert!(parse_offset("").is_err());
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0x1000), "0x1000 (4096)");
        assert_eq!(format_offset(0), "0x0 (0)");
    }
}
