//! Minimum-distance symbol detection
//!
//! Every possible symbol has a canonical noiseless waveform. A received
//! window is assigned to the symbol whose waveform is closest in squared
//! Euclidean distance, which is the maximum-likelihood decision under
//! i.i.d. Gaussian noise with equiprobable symbols.

use super::symbols::{check_bits_per_symbol, decimal_to_bits, symbol_count};
use crate::error::{PhyError, Result};
use tracing::{debug, trace, warn};

/// Sum of squared differences over the common length.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Canonical waveform per symbol value, indexed by the value itself.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveformDictionary {
    bits_per_symbol: usize,
    window: usize,
    entries: Vec<Vec<f64>>,
}

/// Outcome of one detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub symbol: u32,
    pub distance: f64,
}

impl WaveformDictionary {
    /// Build from a generator called once per symbol value, ascending.
    pub fn build<F>(bits_per_symbol: usize, mut waveform: F) -> Result<Self>
    where
        F: FnMut(u32) -> Result<Vec<f64>>,
    {
        check_bits_per_symbol(bits_per_symbol)?;
        let entries = (0..symbol_count(bits_per_symbol) as u32)
            .map(&mut waveform)
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(bits_per_symbol, entries)
    }

    pub fn from_entries(bits_per_symbol: usize, entries: Vec<Vec<f64>>) -> Result<Self> {
        check_bits_per_symbol(bits_per_symbol)?;
        if entries.len() != symbol_count(bits_per_symbol) {
            return Err(PhyError::InvalidDictionary(format!(
                "expected {} entries for {} bits per symbol, got {}",
                symbol_count(bits_per_symbol),
                bits_per_symbol,
                entries.len()
            )));
        }
        let window = entries[0].len();
        if window == 0 {
            return Err(PhyError::InvalidDictionary(
                "waveforms must not be empty".to_string(),
            ));
        }
        if let Some(pos) = entries.iter().position(|e| e.len() != window) {
            return Err(PhyError::InvalidDictionary(format!(
                "entry {pos} has {} samples, expected {window}",
                entries[pos].len()
            )));
        }

        debug!(
            "Waveform dictionary: {} symbols x {} samples",
            entries.len(),
            window
        );

        Ok(Self {
            bits_per_symbol,
            window,
            entries,
        })
    }

    pub fn bits_per_symbol(&self) -> usize {
        self.bits_per_symbol
    }

    /// Samples consumed per detection.
    pub fn window_len(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: u32) -> Option<&[f64]> {
        self.entries
            .get(symbol as usize)
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[f64])> {
        self.entries
            .iter()
            .enumerate()
            .map(|(value, waveform)| (value as u32, waveform.as_slice()))
    }

    /// Closest symbol to one window; ties keep the lowest value.
    pub fn detect(&self, window: &[f64]) -> Detection {
        let mut best = Detection {
            symbol: 0,
            distance: f64::INFINITY,
        };
        for (symbol, waveform) in self.iter() {
            let distance = squared_distance(window, waveform);
            if distance < best.distance {
                best = Detection { symbol, distance };
            }
        }
        trace!("detected symbol {} (distance {:.6})", best.symbol, best.distance);
        best
    }

    /// Detect every full window; a trailing partial window is dropped.
    pub fn detect_all(&self, samples: &[f64]) -> Vec<u32> {
        let chunks = samples.chunks_exact(self.window);
        let leftover = chunks.remainder().len();
        if leftover > 0 {
            warn!(
                "Discarding {} trailing samples (window is {} samples)",
                leftover, self.window
            );
        }
        chunks
            .map(|window| self.detect(window).symbol)
            .collect()
    }

    /// Detect every window and render the symbols back to bits.
    pub fn decode_bits(&self, samples: &[f64]) -> Vec<u8> {
        let mut bits = Vec::with_capacity(samples.len() / self.window * self.bits_per_symbol);
        for symbol in self.detect_all(samples) {
            // detected symbols always index the dictionary
            if let Ok(symbol_bits) = decimal_to_bits(symbol, self.bits_per_symbol) {
                bits.extend(symbol_bits);
            }
        }
        bits
    }
}
