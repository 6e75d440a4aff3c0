/// Sinusoidal carrier synthesis
use super::params::CarrierParams;
use crate::phy::pulse::samples_per_period;
use std::f64::consts::PI;
use tracing::debug;

/// Carrier of fixed peak voltage and frequency; one cycle per symbol.
#[derive(Clone, Debug)]
pub struct Carrier {
    peak_voltage: f64,
    frequency: f64,
    phase: f64, // degrees
    sample_rate: f64,
    samples_per_symbol: usize,
}

impl Carrier {
    pub fn new(peak_voltage: f64, frequency: f64, sample_rate: f64) -> Self {
        Self {
            peak_voltage,
            frequency,
            phase: 0.0,
            sample_rate,
            samples_per_symbol: samples_per_period(sample_rate, 1.0 / frequency),
        }
    }

    /// Constant phase offset (degrees) added to every symbol.
    pub fn with_phase(mut self, degrees: f64) -> Self {
        self.phase = degrees;
        self
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    /// One symbol period of carrier shaped by `params`.
    ///
    /// Time restarts at zero for each symbol.
    pub fn cycle(&self, params: &CarrierParams) -> Vec<f64> {
        let amplitude = params.amplitude * self.peak_voltage;
        let frequency = params.frequency * self.frequency;
        let phase = (params.phase + self.phase).to_radians();

        (0..self.samples_per_symbol)
            .map(|i| {
                let t = i as f64 / self.sample_rate;
                amplitude * (2.0 * PI * frequency * t + phase).sin()
            })
            .collect()
    }

    /// Concatenated cycles, one per parameter triple.
    pub fn modulate(&self, params: &[CarrierParams]) -> Vec<f64> {
        let mut signal = Vec::with_capacity(params.len() * self.samples_per_symbol);
        for p in params {
            signal.extend(self.cycle(p));
        }
        debug!(
            "Carrier {} Hz: {} symbols -> {} samples",
            self.frequency,
            params.len(),
            signal.len()
        );
        signal
    }

    /// Unmodulated carrier at the given instants (seconds).
    pub fn waveform_at(&self, times: &[f64]) -> Vec<f64> {
        let phase = self.phase.to_radians();
        times
            .iter()
            .map(|&t| self.peak_voltage * (2.0 * PI * self.frequency * t + phase).sin())
            .collect()
    }
}
