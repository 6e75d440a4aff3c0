use crate::error::{PhyError, Result};
use crate::phy::line_coding::LineCoding;
use crate::phy::pulse::samples_per_period;
use crate::phy::scheme::Scheme;
use crate::phy::symbols::{check_bits_per_symbol, symbol_count};
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Every parameter of one TX/RX run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyConfig {
    pub scheme: Scheme,
    pub bits_per_symbol: usize,
    pub peak_voltage: f64,
    /// Baseband symbols per second
    pub symbol_rate: f64,
    /// Carrier frequency [Hz], one cycle per symbol
    pub carrier_freq: f64,
    pub sample_rate: u32,
    pub noise_sigma: f64,
    /// Skip pulse shaping and noise
    pub ideal: bool,
    /// Noise seed; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Line(LineCoding::NrzPolar),
            bits_per_symbol: BITS_PER_SYMBOL,
            peak_voltage: PEAK_VOLTAGE,
            symbol_rate: SYMBOL_RATE,
            carrier_freq: CARRIER_FREQ,
            sample_rate: SAMPLE_RATE,
            noise_sigma: NOISE_SIGMA,
            ideal: false,
            seed: None,
        }
    }
}

impl PhyConfig {
    pub fn new(scheme: Scheme, bits_per_symbol: usize) -> Self {
        Self {
            scheme,
            bits_per_symbol,
            ..Self::default()
        }
    }

    pub fn ideal(mut self) -> Self {
        self.ideal = true;
        self
    }

    pub fn with_noise(mut self, sigma: f64, seed: Option<u64>) -> Self {
        self.noise_sigma = sigma;
        self.seed = seed;
        self.ideal = false;
        self
    }

    /// Duration of one symbol slot in seconds.
    pub fn symbol_period(&self) -> f64 {
        match self.scheme {
            Scheme::Line(_) => 1.0 / self.symbol_rate,
            Scheme::Carrier(_) => 1.0 / self.carrier_freq,
        }
    }

    /// Samples per symbol slot (before any clock doubling).
    pub fn samples_per_slot(&self) -> usize {
        samples_per_period(f64::from(self.sample_rate), self.symbol_period())
    }

    /// Samples in one detection window, clock slots and split cycles included.
    pub fn window_len(&self) -> usize {
        let slots = match self.scheme {
            Scheme::Line(coding) => coding.slots_per_symbol(),
            Scheme::Carrier(modulation) => modulation
                .native_bits_per_symbol()
                .map_or(1, |native| (self.bits_per_symbol / native).max(1)),
        };
        self.samples_per_slot() * slots
    }

    pub fn validate(&self) -> Result<()> {
        check_bits_per_symbol(self.bits_per_symbol)?;
        if self.sample_rate == 0 {
            return Err(PhyError::invalid("sample_rate", "must be positive"));
        }
        if !(self.peak_voltage.is_finite() && self.peak_voltage > 0.0) {
            return Err(PhyError::invalid(
                "peak_voltage",
                format!("must be positive, got {}", self.peak_voltage),
            ));
        }
        if !(self.noise_sigma.is_finite() && self.noise_sigma >= 0.0) {
            return Err(PhyError::invalid(
                "noise_sigma",
                format!("must be >= 0, got {}", self.noise_sigma),
            ));
        }
        let (name, rate) = match self.scheme {
            Scheme::Line(_) => ("symbol_rate", self.symbol_rate),
            Scheme::Carrier(_) => ("carrier_freq", self.carrier_freq),
        };
        if !(rate.is_finite() && rate > 0.0) {
            return Err(PhyError::invalid(name, format!("must be positive, got {rate}")));
        }
        if self.samples_per_slot() == 0 {
            return Err(PhyError::invalid(
                name,
                format!("{rate} Hz leaves no samples per symbol at {} Hz", self.sample_rate),
            ));
        }
        let dictionary_samples = symbol_count(self.bits_per_symbol).saturating_mul(self.window_len());
        if dictionary_samples > MAX_DICTIONARY_SAMPLES {
            return Err(PhyError::invalid(
                "bits_per_symbol",
                format!(
                    "{} bits per symbol needs a {dictionary_samples}-sample dictionary, limit is {MAX_DICTIONARY_SAMPLES}",
                    self.bits_per_symbol
                ),
            ));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulation::Modulation;

    #[test]
    fn test_default_is_valid() {
        let config = PhyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.samples_per_slot(), 1000);
    }

    #[test]
    fn test_carrier_symbol_period() {
        let config = PhyConfig::new(Scheme::Carrier(Modulation::Psk), 2);
        assert_eq!(config.samples_per_slot(), 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PhyConfig::default();
        config.bits_per_symbol = 0;
        assert!(matches!(
            config.validate(),
            Err(PhyError::InvalidBitsPerSymbol { got: 0, .. })
        ));

        let mut config = PhyConfig::default();
        config.symbol_rate = 0.0;
        assert!(config.validate().is_err());

        let mut config = PhyConfig::default();
        config.noise_sigma = -1.0;
        assert!(config.validate().is_err());

        let mut config = PhyConfig::new(Scheme::Carrier(Modulation::Ask), 1);
        config.carrier_freq = 5000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dictionary_size_is_bounded() {
        let config = PhyConfig::new(Scheme::Line(LineCoding::Manchester), 8);
        assert_eq!(config.window_len(), 2000);
        assert!(config.validate().is_ok());

        let config = PhyConfig::new(Scheme::Line(LineCoding::Manchester), 16);
        assert!(matches!(
            config.validate(),
            Err(PhyError::InvalidParameter { name: "bits_per_symbol", .. })
        ));

        // a coarser sample grid brings the same width back under the limit
        let mut config = PhyConfig::new(Scheme::Line(LineCoding::NrzPolar), 16);
        config.sample_rate = 100;
        assert!(config.validate().is_ok());

        let config = PhyConfig::new(Scheme::Carrier(Modulation::Qpsk), 8);
        assert_eq!(config.window_len(), 400);
    }

    #[test]
    fn test_json_partial_config() {
        let config: PhyConfig =
            serde_json::from_str(r#"{ "scheme": "16-qam", "bits_per_symbol": 4 }"#).unwrap();
        assert_eq!(config.scheme, Scheme::Carrier(Modulation::Qam16));
        assert_eq!(config.sample_rate, SAMPLE_RATE);
        assert_eq!(config.peak_voltage, PEAK_VOLTAGE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phy.json");
        let config = PhyConfig::new(Scheme::Line(LineCoding::Bipolar), 2).with_noise(0.2, Some(9));
        config.save(&path).unwrap();
        assert_eq!(PhyConfig::load(&path).unwrap(), config);
    }
}
