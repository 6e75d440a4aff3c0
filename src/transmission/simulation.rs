//! Bit-error-rate measurement over a channel with additive Gaussian noise.

use super::cache::DictionaryCache;
use super::receiver::Receiver;
use super::transmitter::Transmitter;
use crate::error::Result;
use crate::utils::config::PhyConfig;
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::info;

/// Positions that differ, plus every bit missing from the shorter side.
pub fn count_bit_errors(sent: &[u8], received: &[u8]) -> usize {
    let mismatched = sent
        .iter()
        .zip(received)
        .filter(|(a, b)| a != b)
        .count();
    mismatched + sent.len().abs_diff(received.len())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BerPoint {
    pub sigma: f64,
    pub bits: usize,
    pub errors: usize,
    pub ber: f64,
}

/// Send `bits` once per noise level and measure the errors.
///
/// Every point shares one dictionary. With a seed in `config`, point `i`
/// uses `seed + i` so the sweep is reproducible. `progress` advances once
/// per point; finishing it is left to the caller.
pub fn run_ber_sweep(
    config: &PhyConfig,
    bits: &[u8],
    sigmas: &[f64],
    progress: Option<&ProgressBar>,
) -> Result<Vec<BerPoint>> {
    let mut cache = DictionaryCache::new();
    let receiver = Receiver::with_cache(config.clone(), &mut cache)?;
    let mut points = Vec::with_capacity(sigmas.len());

    for (i, &sigma) in sigmas.iter().enumerate() {
        let seed = config
            .seed
            .map(|s| s.wrapping_add(i as u64));
        let mut transmitter = Transmitter::new(config.clone().with_noise(sigma, seed))?;
        let received = receiver.receive(&transmitter.transmit(bits));
        let errors = count_bit_errors(bits, &received);
        let ber = if bits.is_empty() {
            0.0
        } else {
            errors as f64 / bits.len() as f64
        };
        info!("sigma = {:.3}: {} / {} bit errors (BER {:.4})", sigma, errors, bits.len(), ber);
        points.push(BerPoint {
            sigma,
            bits: bits.len(),
            errors,
            ber,
        });
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::Modulation;
    use crate::phy::scheme::Scheme;

    #[test]
    fn test_count_bit_errors() {
        assert_eq!(count_bit_errors(&[0, 1, 1, 0], &[0, 1, 1, 0]), 0);
        assert_eq!(count_bit_errors(&[0, 1, 1, 0], &[1, 1, 0, 0]), 2);
        assert_eq!(count_bit_errors(&[0, 1, 1, 0], &[0, 1]), 2);
    }

    #[test]
    fn test_zero_noise_point_is_error_free() {
        let mut config = PhyConfig::new(Scheme::Carrier(Modulation::Psk), 1);
        config.seed = Some(5);
        let bits: Vec<u8> = (0..40).map(|i| (i % 3 == 0) as u8).collect();
        let points = run_ber_sweep(&config, &bits, &[0.0, 50.0], None).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].errors, 0);
        assert!(points[1].ber > 0.0);
    }

    #[test]
    fn test_progress_advances_per_point() {
        let config = PhyConfig::new(Scheme::Carrier(Modulation::Ask), 1).ideal();
        let pb = ProgressBar::hidden();
        run_ber_sweep(&config, &[1, 0, 1], &[0.0, 0.1, 0.2], Some(&pb)).unwrap();
        assert_eq!(pb.position(), 3);
        assert!(!pb.is_finished());
    }
}
