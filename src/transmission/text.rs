/// Text <-> bit stream conversion, 8 bits per byte, MSB first
use tracing::warn;

pub fn text_to_bits(text: &str) -> Vec<u8> {
    bytes_to_bits(text.as_bytes())
}

pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .collect()
}

/// Trailing bits short of a full byte are dropped.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let chunks = bits.chunks_exact(8);
    if !chunks.remainder().is_empty() {
        warn!(
            "Dropping {} trailing bits that do not fill a byte",
            chunks.remainder().len()
        );
    }
    chunks
        .map(|byte| {
            byte.iter()
                .fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
        })
        .collect()
}

/// Invalid UTF-8 is replaced rather than rejected; received bits may be
/// corrupted by noise.
pub fn bits_to_text(bits: &[u8]) -> String {
    String::from_utf8_lossy(&bits_to_bytes(bits)).into_owned()
}

/// Parse a string of `0`/`1` characters, ignoring whitespace and `_`.
pub fn parse_bit_string(input: &str) -> Option<Vec<u8>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != ',')
        .map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect()
}

pub fn format_bits(bits: &[u8]) -> String {
    bits.iter()
        .map(|&b| if b == 0 { '0' } else { '1' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first() {
        assert_eq!(text_to_bits("A"), vec![0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_text_round_trip() {
        let text = "Hello World! 你好";
        assert_eq!(bits_to_text(&text_to_bits(text)), text);
    }

    #[test]
    fn test_partial_byte_dropped() {
        let mut bits = text_to_bits("ok");
        bits.extend([1, 0, 1]);
        assert_eq!(bits_to_text(&bits), "ok");
    }

    #[test]
    fn test_parse_bit_string() {
        assert_eq!(parse_bit_string("0101 0100"), Some(vec![0, 1, 0, 1, 0, 1, 0, 0]));
        assert_eq!(parse_bit_string("01x"), None);
        assert_eq!(format_bits(&[1, 0, 1]), "101");
    }
}
