/// Unified transmit path for every scheme
use super::text::text_to_bits;
use crate::error::Result;
use crate::modulation::Modulator;
use crate::phy::detector::WaveformDictionary;
use crate::phy::encoder::PhyEncoder;
use crate::phy::noise::Noise;
use crate::phy::scheme::Scheme;
use crate::utils::config::PhyConfig;
use tracing::{debug, info};

enum Stage {
    Baseband(PhyEncoder),
    Carrier(Modulator),
}

pub struct Transmitter {
    config: PhyConfig,
    stage: Stage,
    noise: Option<Noise>,
}

impl Transmitter {
    pub fn new(config: PhyConfig) -> Result<Self> {
        config.validate()?;
        let stage = match config.scheme {
            Scheme::Line(_) => Stage::Baseband(PhyEncoder::from_config(&config)?),
            Scheme::Carrier(_) => Stage::Carrier(Modulator::from_config(&config)?),
        };
        let noise = if config.ideal {
            None
        } else {
            Some(match config.seed {
                Some(seed) => Noise::seeded(config.noise_sigma, seed)?,
                None => Noise::new(config.noise_sigma)?,
            })
        };

        info!(
            "Transmitter ready: {} @ {} bits/symbol, {}",
            config.scheme,
            config.bits_per_symbol,
            if config.ideal { "ideal" } else { "noisy" }
        );

        Ok(Self {
            config,
            stage,
            noise,
        })
    }

    pub fn config(&self) -> &PhyConfig {
        &self.config
    }

    /// Samples per symbol window on the receive side.
    pub fn samples_per_symbol(&self) -> usize {
        match &self.stage {
            Stage::Baseband(encoder) => encoder.samples_per_symbol(),
            Stage::Carrier(modulator) => modulator.samples_per_symbol(),
        }
    }

    /// Bits that do not fill a whole symbol are dropped.
    pub fn transmit(&mut self, bits: &[u8]) -> Vec<f64> {
        let mut samples = match &self.stage {
            Stage::Baseband(encoder) if self.config.ideal => encoder.encode_ideal(bits),
            Stage::Baseband(encoder) => encoder.encode_shaped(bits),
            Stage::Carrier(modulator) => modulator.modulate(bits),
        };
        if let Some(noise) = self.noise.as_mut() {
            noise.apply(&mut samples);
        }
        debug!("Transmitted {} bits as {} samples", bits.len(), samples.len());
        samples
    }

    pub fn transmit_text(&mut self, text: &str) -> Vec<f64> {
        self.transmit(&text_to_bits(text))
    }

    pub fn waveform_dictionary(&self) -> Result<WaveformDictionary> {
        match &self.stage {
            Stage::Baseband(encoder) => encoder.waveform_dictionary(),
            Stage::Carrier(modulator) => modulator.waveform_dictionary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::Modulation;
    use crate::phy::line_coding::LineCoding;

    const MESSAGE: [u8; 8] = [0, 1, 0, 1, 0, 1, 0, 0];

    #[test]
    fn test_ideal_nrz_is_flat() {
        let config = PhyConfig::new(Scheme::Line(LineCoding::NrzPolar), 1).ideal();
        let mut tx = Transmitter::new(config).unwrap();
        let samples = tx.transmit(&MESSAGE);
        assert_eq!(samples.len(), 8 * 1000);
        assert!(samples[..1000].iter().all(|&x| x == -3.3));
        assert!(samples[1000..2000].iter().all(|&x| x == 3.3));
    }

    #[test]
    fn test_same_seed_same_signal() {
        let config = PhyConfig::new(Scheme::Carrier(Modulation::Fsk), 2).with_noise(0.3, Some(42));
        let a = Transmitter::new(config.clone()).unwrap().transmit(&MESSAGE);
        let b = Transmitter::new(config).unwrap().transmit(&MESSAGE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_only_outside_ideal_mode() {
        let config = PhyConfig::new(Scheme::Carrier(Modulation::Ask), 1);
        let clean = Transmitter::new(config.clone().ideal()).unwrap().transmit(&MESSAGE);
        let noisy = Transmitter::new(config.with_noise(0.2, Some(7)))
            .unwrap()
            .transmit(&MESSAGE);
        assert_eq!(clean.len(), noisy.len());
        assert_ne!(clean, noisy);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PhyConfig::new(Scheme::Line(LineCoding::Manchester), 0);
        assert!(Transmitter::new(config).is_err());
    }
}
