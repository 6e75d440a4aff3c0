/// Unified receive path for every scheme
use super::cache::DictionaryCache;
use super::text::bits_to_text;
use crate::error::Result;
use crate::modulation::Demodulator;
use crate::phy::decoder::PhyDecoder;
use crate::phy::detector::WaveformDictionary;
use crate::phy::scheme::Scheme;
use crate::utils::config::PhyConfig;
use std::sync::Arc;

enum Stage {
    Baseband(PhyDecoder),
    Carrier(Demodulator),
}

pub struct Receiver {
    config: PhyConfig,
    stage: Stage,
}

impl Receiver {
    pub fn new(config: PhyConfig) -> Result<Self> {
        config.validate()?;
        let stage = match config.scheme {
            Scheme::Line(_) => Stage::Baseband(PhyDecoder::from_config(&config)?),
            Scheme::Carrier(_) => Stage::Carrier(Demodulator::from_config(&config)?),
        };
        Ok(Self { config, stage })
    }

    /// Take the dictionary from `cache`, building it on first use.
    pub fn with_cache(config: PhyConfig, cache: &mut DictionaryCache) -> Result<Self> {
        config.validate()?;
        let dictionary = cache.get_or_build(&config)?;
        Ok(Self::with_dictionary(config, dictionary))
    }

    pub fn with_dictionary(config: PhyConfig, dictionary: Arc<WaveformDictionary>) -> Self {
        let stage = match config.scheme {
            Scheme::Line(coding) => Stage::Baseband(PhyDecoder::with_dictionary(coding, dictionary)),
            Scheme::Carrier(modulation) => {
                Stage::Carrier(Demodulator::with_dictionary(modulation, dictionary))
            }
        };
        Self { config, stage }
    }

    pub fn config(&self) -> &PhyConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &WaveformDictionary {
        match &self.stage {
            Stage::Baseband(decoder) => decoder.dictionary(),
            Stage::Carrier(demodulator) => demodulator.dictionary(),
        }
    }

    pub fn receive(&self, samples: &[f64]) -> Vec<u8> {
        match &self.stage {
            Stage::Baseband(decoder) => decoder.decode(samples),
            Stage::Carrier(demodulator) => demodulator.demodulate(samples),
        }
    }

    pub fn receive_text(&self, samples: &[f64]) -> String {
        bits_to_text(&self.receive(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::Modulation;
    use crate::phy::line_coding::LineCoding;
    use crate::transmission::Transmitter;

    fn small(scheme: Scheme, width: usize) -> PhyConfig {
        let mut config = PhyConfig::new(scheme, width).ideal();
        config.sample_rate = 100;
        config.symbol_rate = 10.0;
        config
    }

    #[test]
    fn test_text_round_trip() {
        for scheme in [
            Scheme::Line(LineCoding::Bipolar),
            Scheme::Carrier(Modulation::Qam16),
        ] {
            let config = small(scheme, 4);
            let mut tx = Transmitter::new(config.clone()).unwrap();
            let rx = Receiver::new(config).unwrap();
            assert_eq!(rx.receive_text(&tx.transmit_text("phylink")), "phylink");
        }
    }

    #[test]
    fn test_cached_receiver_matches_fresh_one() {
        let config = small(Scheme::Carrier(Modulation::Psk), 2);
        let mut cache = DictionaryCache::new();
        let cached = Receiver::with_cache(config.clone(), &mut cache).unwrap();
        let fresh = Receiver::new(config.clone()).unwrap();
        assert_eq!(cached.dictionary(), fresh.dictionary());

        let again = Receiver::with_cache(config, &mut cache).unwrap();
        assert_eq!(again.dictionary().len(), 4);
        assert_eq!(cache.len(), 1);
    }
}
