use crate::error::Result;
use crate::phy::detector::WaveformDictionary;
use crate::phy::scheme::SchemeRegistry;
use crate::utils::config::PhyConfig;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalDump {
    pub sample_rate: u32,
    pub scheme: String,
    pub bits_per_symbol: usize,
    pub samples: Vec<f64>,
    pub duration: f64,
}

impl SignalDump {
    pub fn new(scheme: &str, bits_per_symbol: usize, sample_rate: u32, samples: Vec<f64>) -> Self {
        let duration = samples.len() as f64 / f64::from(sample_rate.max(1));
        Self {
            sample_rate,
            scheme: scheme.to_string(),
            bits_per_symbol,
            samples,
            duration,
        }
    }

    /// Overwrite the fields of `config` that shaped this signal.
    ///
    /// Scheme, symbol width and sample rate recorded in the dump win over
    /// the configured ones; each override is logged.
    pub fn apply_to(&self, config: &mut PhyConfig, registry: &SchemeRegistry) -> Result<()> {
        let scheme = registry.resolve(&self.scheme)?;
        if scheme != config.scheme {
            warn!("Dump scheme {} overrides configured {}", scheme, config.scheme);
            config.scheme = scheme;
        }
        if self.bits_per_symbol != config.bits_per_symbol {
            warn!(
                "Dump width {} bits/symbol overrides configured {}",
                self.bits_per_symbol, config.bits_per_symbol
            );
            config.bits_per_symbol = self.bits_per_symbol;
        }
        if self.sample_rate != config.sample_rate {
            warn!(
                "Dump sample rate {} Hz overrides configured {} Hz",
                self.sample_rate, config.sample_rate
            );
            config.sample_rate = self.sample_rate;
        }
        config.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub symbol: u32,
    pub bits: String,
    pub waveform: Vec<f64>,
}

/// Waveform dictionary by symbol value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DictionaryDump {
    pub scheme: String,
    pub bits_per_symbol: usize,
    pub sample_rate: u32,
    pub window: usize,
    pub entries: Vec<DictionaryEntry>,
}

impl DictionaryDump {
    pub fn new(scheme: &str, sample_rate: u32, dictionary: &WaveformDictionary) -> Self {
        let width = dictionary.bits_per_symbol();
        let entries = dictionary
            .iter()
            .map(|(symbol, waveform)| DictionaryEntry {
                symbol,
                bits: format!("{symbol:0width$b}"),
                waveform: waveform.to_vec(),
            })
            .collect();
        Self {
            scheme: scheme.to_string(),
            bits_per_symbol: width,
            sample_rate,
            window: dictionary.window_len(),
            entries,
        }
    }

    pub fn into_dictionary(self) -> Result<WaveformDictionary> {
        let mut entries = self.entries;
        entries.sort_by_key(|e| e.symbol);
        WaveformDictionary::from_entries(
            self.bits_per_symbol,
            entries
                .into_iter()
                .map(|e| e.waveform)
                .collect(),
        )
    }
}

pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
