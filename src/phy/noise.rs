//! Additive white Gaussian noise

use crate::error::{PhyError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Zero-mean Gaussian noise source driven by a caller-chosen RNG.
pub struct Noise<R = StdRng> {
    sigma: f64,
    distr: Normal<f64>,
    rng: R,
}

impl Noise<StdRng> {
    /// Noise seeded from the operating system.
    pub fn new(sigma: f64) -> Result<Self> {
        Self::with_rng(sigma, StdRng::from_os_rng())
    }

    /// Reproducible noise.
    pub fn seeded(sigma: f64, seed: u64) -> Result<Self> {
        Self::with_rng(sigma, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Noise<R> {
    pub fn with_rng(sigma: f64, rng: R) -> Result<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(PhyError::invalid(
                "noise_sigma",
                format!("standard deviation must be finite and >= 0, got {sigma}"),
            ));
        }
        let distr = Normal::new(0.0, sigma)
            .map_err(|err| PhyError::invalid("noise_sigma", err.to_string()))?;
        Ok(Self { sigma, distr, rng })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// `len` independent noise samples.
    pub fn sample(&mut self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|_| self.distr.sample(&mut self.rng))
            .collect()
    }

    /// Add noise to every sample in place.
    pub fn apply(&mut self, signal: &mut [f64]) {
        for sample in signal.iter_mut() {
            *sample += self.distr.sample(&mut self.rng);
        }
    }
}
