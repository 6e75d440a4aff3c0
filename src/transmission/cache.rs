use crate::error::Result;
use crate::modulation::Modulator;
use crate::phy::detector::WaveformDictionary;
use crate::phy::encoder::PhyEncoder;
use crate::phy::scheme::Scheme;
use crate::utils::config::PhyConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Everything that changes the shape of an ideal waveform.
///
/// Floats are keyed by their bit pattern. Line codes ignore the carrier
/// frequency and carriers ignore the symbol rate, so only the rate that
/// matters for the scheme is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DictionaryKey {
    scheme: Scheme,
    bits_per_symbol: usize,
    sample_rate: u32,
    peak_voltage: u64,
    rate: u64,
}

impl DictionaryKey {
    pub fn new(config: &PhyConfig) -> Self {
        let rate = match config.scheme {
            Scheme::Line(_) => config.symbol_rate,
            Scheme::Carrier(_) => config.carrier_freq,
        };
        Self {
            scheme: config.scheme,
            bits_per_symbol: config.bits_per_symbol,
            sample_rate: config.sample_rate,
            peak_voltage: config.peak_voltage.to_bits(),
            rate: rate.to_bits(),
        }
    }
}

/// Build the dictionary for `config` by running its transmitter in ideal
/// mode.
pub fn build_dictionary(config: &PhyConfig) -> Result<WaveformDictionary> {
    match config.scheme {
        Scheme::Line(_) => PhyEncoder::from_config(config)?.waveform_dictionary(),
        Scheme::Carrier(_) => Modulator::from_config(config)?.waveform_dictionary(),
    }
}

/// Caller-owned memo of waveform dictionaries.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: HashMap<DictionaryKey, Arc<WaveformDictionary>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, config: &PhyConfig) -> Result<Arc<WaveformDictionary>> {
        let key = DictionaryKey::new(config);
        if let Some(dictionary) = self.entries.get(&key) {
            debug!("Dictionary cache hit: {} @ {} bits/symbol", config.scheme, config.bits_per_symbol);
            return Ok(Arc::clone(dictionary));
        }
        let dictionary = Arc::new(build_dictionary(config)?);
        self.entries
            .insert(key, Arc::clone(&dictionary));
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
