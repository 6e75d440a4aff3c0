//! Voltage pulse synthesis
//!
//! Ideal mode holds every level for a full symbol period. Shaped mode
//! approximates the same piecewise-constant sequence with a truncated
//! Fourier series, block by block, so the signal stays band-limited.

use crate::utils::consts::{FOURIER_HARMONICS, SYMBOLS_PER_PERIOD};
use std::f64::consts::PI;
use std::ops::Range;
use tracing::debug;

/// Samples covering `period` seconds at `sample_rate`, rounded down.
pub fn samples_per_period(sample_rate: f64, period: f64) -> usize {
    // guard against 0.1 * 1000 = 99.999...
    (sample_rate * period + 1e-9).floor() as usize
}

pub struct PulseShaper {
    sample_rate: f64,
    symbol_period: f64,
    samples_per_symbol: usize,
    symbols_per_period: usize,
    harmonics: usize,
}

impl PulseShaper {
    pub fn new(sample_rate: f64, symbol_period: f64) -> Self {
        Self {
            sample_rate,
            symbol_period,
            samples_per_symbol: samples_per_period(sample_rate, symbol_period),
            symbols_per_period: SYMBOLS_PER_PERIOD,
            harmonics: FOURIER_HARMONICS,
        }
    }

    /// Override the block size and the harmonic count.
    pub fn with_series(mut self, symbols_per_period: usize, harmonics: usize) -> Self {
        self.symbols_per_period = symbols_per_period.max(1);
        self.harmonics = harmonics;
        self
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// Constant run of samples per level.
    pub fn ideal(&self, levels: &[f64]) -> Vec<f64> {
        let mut samples = Vec::with_capacity(levels.len() * self.samples_per_symbol);
        for &level in levels {
            samples.extend(std::iter::repeat_n(level, self.samples_per_symbol));
        }
        samples
    }

    /// Fourier approximation of the level sequence, same length as [`Self::ideal`].
    pub fn shape(&self, levels: &[f64]) -> Vec<f64> {
        let blocks = split_blocks(
            levels.len(),
            (levels.len() / self.symbols_per_period).max(1),
        );
        debug!(
            "Shaping {} levels in {} blocks, {} harmonics",
            levels.len(),
            blocks.len(),
            self.harmonics
        );

        let mut samples = Vec::with_capacity(levels.len() * self.samples_per_symbol);
        for block in blocks {
            samples.extend(self.fourier_series(&levels[block]));
        }
        samples
    }

    /// Truncated Fourier series of one block, treated as one period.
    ///
    /// Coefficients integrate the constant pieces exactly.
    fn fourier_series(&self, levels: &[f64]) -> Vec<f64> {
        let period = levels.len() as f64 * self.symbol_period;
        let total = levels.len() * self.samples_per_symbol;
        if total == 0 {
            return Vec::new();
        }

        let mean = levels.iter().sum::<f64>() * self.symbol_period / period;
        let mut samples = vec![mean; total];

        for n in 1..=self.harmonics {
            let omega = 2.0 * PI * n as f64 / period;
            let (mut sine, mut cosine) = (0.0, 0.0);
            for (k, &level) in levels.iter().enumerate() {
                let start = omega * k as f64 * self.symbol_period;
                let end = omega * (k + 1) as f64 * self.symbol_period;
                sine += level * (start.cos() - end.cos());
                cosine += level * (end.sin() - start.sin());
            }
            let sine = sine * 2.0 / (period * omega);
            let cosine = cosine * 2.0 / (period * omega);

            for (i, sample) in samples.iter_mut().enumerate() {
                let phase = omega * i as f64 / self.sample_rate;
                *sample += sine * phase.sin() + cosine * phase.cos();
            }
        }

        samples
    }
}

/// Split `len` items into `parts` nearly equal ranges, longer ones first.
fn split_blocks(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let extra = len % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_per_period() {
        assert_eq!(samples_per_period(1000.0, 0.1), 100);
        assert_eq!(samples_per_period(1000.0, 1.0), 1000);
        assert_eq!(samples_per_period(1000.0, 1.0 / 3.0), 333);
    }

    #[test]
    fn test_split_blocks_like_array_split() {
        assert_eq!(split_blocks(10, 2), vec![0..5, 5..10]);
        assert_eq!(split_blocks(7, 1), vec![0..7]);
        assert_eq!(split_blocks(9, 2), vec![0..5, 5..9]);
        assert_eq!(split_blocks(11, 3), vec![0..4, 4..8, 8..11]);
    }

    #[test]
    fn test_ideal_holds_each_level() {
        let shaper = PulseShaper::new(10.0, 0.5);
        let samples = shaper.ideal(&[1.0, -2.0]);
        assert_eq!(samples, vec![1.0, 1.0, 1.0, 1.0, 1.0, -2.0, -2.0, -2.0, -2.0, -2.0]);
    }

    #[test]
    fn test_shape_matches_ideal_length() {
        let shaper = PulseShaper::new(100.0, 0.1);
        let levels = [3.3, -3.3, 3.3, 3.3, -3.3, -3.3, 3.3];
        assert_eq!(shaper.shape(&levels).len(), shaper.ideal(&levels).len());
    }

    #[test]
    fn test_constant_levels_stay_constant() {
        let shaper = PulseShaper::new(100.0, 0.1);
        let samples = shaper.shape(&[2.0; 8]);
        for sample in samples {
            assert!((sample - 2.0).abs() < 1e-9, "got {sample}");
        }
    }

    #[test]
    fn test_shaped_levels_keep_their_sign_on_average() {
        let shaper = PulseShaper::new(100.0, 0.1);
        let levels = [3.3, -3.3, 3.3, -3.3, -3.3, 3.3, 3.3, -3.3];
        let samples = shaper.shape(&levels);
        let n = shaper.samples_per_symbol();
        for (k, &level) in levels.iter().enumerate() {
            let mean = samples[k * n..(k + 1) * n].iter().sum::<f64>() / n as f64;
            assert_eq!(mean.signum(), level.signum(), "symbol {k}: mean {mean}");
            assert!((mean - level).abs() < 1.0, "symbol {k}: mean {mean}");
        }
    }

    #[test]
    fn test_empty_levels() {
        let shaper = PulseShaper::new(100.0, 0.1);
        assert!(shaper.shape(&[]).is_empty());
        assert!(shaper.ideal(&[]).is_empty());
    }
}
