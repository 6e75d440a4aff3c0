//! Bit-group <-> symbol conversion
//!
//! A symbol is `bits_per_symbol` consecutive bits read MSB first. Its
//! decimal form is the integer value normalized into [0, 1] by
//! `2^bits_per_symbol - 1`.

use crate::error::{PhyError, Result};
use crate::utils::consts::MAX_BITS_PER_SYMBOL;

/// Reject widths the mapper cannot normalize (0) or enumerate (too wide).
pub fn check_bits_per_symbol(bits_per_symbol: usize) -> Result<()> {
    if bits_per_symbol == 0 || bits_per_symbol > MAX_BITS_PER_SYMBOL {
        return Err(PhyError::InvalidBitsPerSymbol {
            got: bits_per_symbol,
            max: MAX_BITS_PER_SYMBOL,
        });
    }
    Ok(())
}

/// Largest symbol value for the width, `2^w - 1`.
pub fn max_symbol(bits_per_symbol: usize) -> u32 {
    ((1u64 << bits_per_symbol) - 1) as u32
}

/// Number of distinct symbols, `2^w`.
pub fn symbol_count(bits_per_symbol: usize) -> usize {
    1usize << bits_per_symbol
}

/// Group bits into symbols; remainder bits are dropped.
///
/// With one bit per symbol every bit is its own symbol.
pub fn bits_to_symbols(bits: &[u8], bits_per_symbol: usize) -> Vec<&[u8]> {
    bits.chunks_exact(bits_per_symbol).collect()
}

/// Integer value of one symbol, MSB first.
pub fn symbol_value(symbol: &[u8]) -> u32 {
    symbol
        .iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit & 1))
}

/// Group bits and return each symbol's integer value.
pub fn bits_to_values(bits: &[u8], bits_per_symbol: usize) -> Vec<u32> {
    bits_to_symbols(bits, bits_per_symbol)
        .into_iter()
        .map(symbol_value)
        .collect()
}

/// Normalize a symbol value into [0, 1].
pub fn normalize(value: u32, bits_per_symbol: usize) -> f64 {
    f64::from(value) / f64::from(max_symbol(bits_per_symbol))
}

/// Weighted sum of a level vector, normalized by its width.
///
/// Levels are usually bits, but line codes feed {-1, 0, 1} levels through
/// the same weights.
pub fn levels_to_decimal(levels: &[f64]) -> f64 {
    let width = levels.len();
    let weighted: f64 = levels
        .iter()
        .enumerate()
        .map(|(i, &level)| level * (1u64 << (width - 1 - i)) as f64)
        .sum();
    weighted / f64::from(max_symbol(width))
}

/// Decimal form of every symbol.
pub fn symbols_to_decimal(symbols: &[&[u8]], bits_per_symbol: usize) -> Vec<f64> {
    symbols
        .iter()
        .map(|symbol| normalize(symbol_value(symbol), bits_per_symbol))
        .collect()
}

/// Render a value as a left-zero-padded bit vector.
pub fn decimal_to_bits(value: u32, bits_per_symbol: usize) -> Result<Vec<u8>> {
    if u64::from(value) > u64::from(max_symbol(bits_per_symbol)) {
        return Err(PhyError::SymbolOutOfRange {
            value,
            bits_per_symbol,
        });
    }
    Ok((0..bits_per_symbol)
        .rev()
        .map(|shift| ((value >> shift) & 1) as u8)
        .collect())
}
