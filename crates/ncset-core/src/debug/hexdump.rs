/// Traditional 16-bytes-per-line hex dump.
///
/// ```text
/// 0x29760: 4E 49 4B 4F 4E 20 5A 20  35 00 00 00 00 00 00 00  |NIKON Z 5.......|
/// ```
pub fn format_hex_dump(bytes: &[u8], base: usize, ascii: bool) -> Vec<String> {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let mut line = format!("0x{:05X}: ", base + i * 16);

            for j in 0..16 {
                if j == 8 {
                    line.push(' ');
                }
                match chunk.get(j) {
                    Some(byte) => line.push_str(&format!("{:02X} ", byte)),
                    None => line.push_str("   "),
                }
            }

            if ascii {
                line.push_str(" |");
                for byte in chunk {
                    line.push(if (0x20..0x7F).contains(byte) {
                        *byte as char
                    } else {
                        '.'
                    });
                }
                for _ in chunk.len()..16 {
                    line.push(' ');
                }
                line.push('|');
            }

            line.trim_end_matches(' ').to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line() {
        let lines = format_hex_dump(b"NIKON Z 5\0\0\0\0\0\0\0", 0, true);
        assert_eq!(
            lines,
            vec!["0x00000: 4E 49 4B 4F 4E 20 5A 20  35 00 00 00 00 00 00 00  |NIKON Z 5.......|"]
        );
    }

    #[test]
    fn test_partial_line_without_ascii() {
        let lines = format_hex_dump(&[0xAB; 18], 0x10, false);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "0x00020: AB AB");
    }

    #[test]
    fn test_partial_line_keeps_ascii_column() {
        let lines = format_hex_dump(b"DSC", 0, true);
        assert!(lines[0].ends_with("|DSC             |"));
    }
}
