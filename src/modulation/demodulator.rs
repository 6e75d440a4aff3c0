/// Carrier demodulator: minimum-distance detection against the
/// modulator's own noiseless waveforms
use super::modulator::Modulator;
use super::Modulation;
use crate::error::Result;
use crate::phy::detector::WaveformDictionary;
use crate::utils::config::PhyConfig;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Demodulator {
    modulation: Modulation,
    dictionary: Arc<WaveformDictionary>,
}

impl Demodulator {
    /// Build the dictionary from a matching modulator.
    pub fn new(modulator: &Modulator) -> Result<Self> {
        let dictionary = Arc::new(modulator.waveform_dictionary()?);
        info!(
            "Demodulator initialized: {}, {} symbols, window {} samples",
            modulator.modulation(),
            dictionary.len(),
            dictionary.window_len()
        );
        Ok(Self::with_dictionary(modulator.modulation(), dictionary))
    }

    pub fn from_config(config: &PhyConfig) -> Result<Self> {
        Self::new(&Modulator::from_config(config)?)
    }

    /// Reuse a dictionary built elsewhere.
    pub fn with_dictionary(modulation: Modulation, dictionary: Arc<WaveformDictionary>) -> Self {
        Self {
            modulation,
            dictionary,
        }
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    pub fn dictionary(&self) -> &WaveformDictionary {
        &self.dictionary
    }

    pub fn demodulate(&self, signal: &[f64]) -> Vec<u8> {
        let bits = self.dictionary.decode_bits(signal);
        debug!(
            "Demodulated {} samples -> {} bits ({})",
            signal.len(),
            bits.len(),
            self.modulation
        );
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: [u8; 8] = [0, 1, 0, 1, 0, 1, 0, 0];

    #[test]
    fn test_ask_demodulation_without_noise() {
        let modulator = Modulator::new(Modulation::Ask, 1, 3.3, 10.0, 1000.0).unwrap();
        let demodulator = Demodulator::new(&modulator).unwrap();
        let signal = modulator.modulate(&MESSAGE);
        assert_eq!(demodulator.demodulate(&signal), MESSAGE.to_vec());
    }

    #[test]
    fn test_every_modulation_round_trips() {
        let bits: Vec<u8> = (0..32u32).map(|i| ((i * 7 + 3) % 5 % 2) as u8).collect();
        for modulation in Modulation::ALL {
            for width in [1, 2, 4] {
                let modulator = Modulator::new(modulation, width, 3.3, 10.0, 1000.0).unwrap();
                let demodulator = Demodulator::new(&modulator).unwrap();
                let signal = modulator.modulate(&bits);
                assert_eq!(
                    demodulator.demodulate(&signal),
                    bits,
                    "{modulation} at {width} bits/symbol"
                );
            }
        }
    }

    #[test]
    fn test_partial_window_is_discarded() {
        let modulator = Modulator::new(Modulation::Psk, 2, 1.0, 10.0, 1000.0).unwrap();
        let demodulator = Demodulator::new(&modulator).unwrap();
        let mut signal = modulator.modulate(&[1, 0, 0, 1]);
        signal.truncate(150);
        assert_eq!(demodulator.demodulate(&signal), vec![1, 0]);
    }
}
