//! Reflected-binary (Gray) code tables

use super::symbols::{check_bits_per_symbol, decimal_to_bits, max_symbol, symbol_count};
use crate::error::Result;

/// Gray code of `i`.
pub fn gray_code(i: u32) -> u32 {
    i ^ (i >> 1)
}

/// Gray table of a fixed width, in construction order.
///
/// Lookups go by position: `index_of(v)` is where `v` sits in the table,
/// which is the geometric slot Gray-coded modulations assign to `v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayTable {
    bits_per_symbol: usize,
    codes: Vec<u32>,
}

impl GrayTable {
    pub fn new(bits_per_symbol: usize) -> Result<Self> {
        check_bits_per_symbol(bits_per_symbol)?;
        let codes = (0..symbol_count(bits_per_symbol) as u32)
            .map(gray_code)
            .collect();
        Ok(Self {
            bits_per_symbol,
            codes,
        })
    }

    pub fn bits_per_symbol(&self) -> usize {
        self.bits_per_symbol
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Table rendered as fixed-width bit patterns.
    pub fn bit_patterns(&self) -> Vec<Vec<u8>> {
        self.codes
            .iter()
            .map(|&code| {
                // codes never exceed the table width
                decimal_to_bits(code, self.bits_per_symbol).unwrap_or_default()
            })
            .collect()
    }

    /// Table normalized into [0, 1].
    pub fn normalized(&self) -> Vec<f64> {
        let max = f64::from(max_symbol(self.bits_per_symbol));
        self.codes
            .iter()
            .map(|&code| f64::from(code) / max)
            .collect()
    }

    /// Position of `value` in the table.
    pub fn index_of(&self, value: u32) -> Option<usize> {
        self.codes
            .iter()
            .position(|&code| code == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bit_table() {
        let table = GrayTable::new(2).unwrap();
        assert_eq!(table.codes(), &[0, 1, 3, 2]);
        assert_eq!(
            table.bit_patterns(),
            vec![vec![0, 0], vec![0, 1], vec![1, 1], vec![1, 0]]
        );
    }

    #[test]
    fn test_adjacent_entries_differ_in_one_bit() {
        for width in 1..=8 {
            let table = GrayTable::new(width).unwrap();
            for pair in table.codes().windows(2) {
                assert_eq!(
                    (pair[0] ^ pair[1]).count_ones(),
                    1,
                    "width {width}: {} -> {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_bit_pattern_adjacency() {
        let patterns = GrayTable::new(4).unwrap().bit_patterns();
        for pair in patterns.windows(2) {
            let flips = pair[0]
                .iter()
                .zip(pair[1].iter())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(flips, 1);
        }
    }

    #[test]
    fn test_normalized_table() {
        let table = GrayTable::new(2).unwrap();
        let normalized = table.normalized();
        let expected = [0.0, 1.0 / 3.0, 1.0, 2.0 / 3.0];
        for (got, want) in normalized.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_index_of_uses_position() {
        let table = GrayTable::new(3).unwrap();
        // [0, 1, 3, 2, 6, 7, 5, 4]
        assert_eq!(table.index_of(2), Some(3));
        assert_eq!(table.index_of(4), Some(7));
        assert_eq!(table.index_of(8), None);
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(GrayTable::new(0).is_err());
    }
}
