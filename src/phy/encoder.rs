use super::detector::WaveformDictionary;
use super::line_coding::LineCoding;
use super::pulse::PulseShaper;
use super::scheme::Scheme;
use super::symbols::{bits_to_symbols, check_bits_per_symbol, decimal_to_bits, levels_to_decimal};
use crate::error::{PhyError, Result};
use crate::utils::config::PhyConfig;
use tracing::{debug, info};

/// Baseband transmitter stage: bits -> line code -> voltage levels -> samples
pub struct PhyEncoder {
    coding: LineCoding,
    bits_per_symbol: usize,
    peak_voltage: f64,
    shaper: PulseShaper,
}

impl PhyEncoder {
    /// Create a new baseband encoder
    ///
    /// # Arguments
    /// * `symbol_rate` - slots per second; Manchester and Bipolar spend two
    ///   slots on every symbol
    /// * `sample_rate` - samples per second of the output buffer
    pub fn new(
        coding: LineCoding,
        bits_per_symbol: usize,
        peak_voltage: f64,
        symbol_rate: f64,
        sample_rate: f64,
    ) -> Result<Self> {
        check_bits_per_symbol(bits_per_symbol)?;
        let shaper = PulseShaper::new(sample_rate, 1.0 / symbol_rate);
        if shaper.samples_per_symbol() == 0 {
            return Err(PhyError::invalid(
                "symbol_rate",
                format!("{symbol_rate} Hz leaves no samples per symbol at {sample_rate} Hz"),
            ));
        }

        info!("PhyEncoder initialized:");
        info!("  - line coding: {}", coding);
        info!("  - bits per symbol: {}", bits_per_symbol);
        info!("  - samples per slot: {}", shaper.samples_per_symbol());

        Ok(Self {
            coding,
            bits_per_symbol,
            peak_voltage,
            shaper,
        })
    }

    pub fn from_config(config: &PhyConfig) -> Result<Self> {
        match config.scheme {
            Scheme::Line(coding) => Self::new(
                coding,
                config.bits_per_symbol,
                config.peak_voltage,
                config.symbol_rate,
                f64::from(config.sample_rate),
            ),
            Scheme::Carrier(modulation) => Err(PhyError::SchemeMismatch {
                expected: "line coding",
                got: modulation.name().to_string(),
            }),
        }
    }

    pub fn coding(&self) -> LineCoding {
        self.coding
    }

    pub fn bits_per_symbol(&self) -> usize {
        self.bits_per_symbol
    }

    /// Samples spanned by one symbol, clock slots included.
    pub fn samples_per_symbol(&self) -> usize {
        self.shaper.samples_per_symbol() * self.coding.slots_per_symbol()
    }

    /// One voltage per coded slot.
    pub fn levels(&self, bits: &[u8]) -> Vec<f64> {
        let symbols = bits_to_symbols(bits, self.bits_per_symbol);
        self.coding
            .encode(&symbols)
            .iter()
            .map(|slot| levels_to_decimal(slot) * self.peak_voltage)
            .collect()
    }

    /// Each slot held at a constant voltage.
    pub fn encode_ideal(&self, bits: &[u8]) -> Vec<f64> {
        let levels = self.levels(bits);
        debug!("Encoding {} bits -> {} slots (ideal)", bits.len(), levels.len());
        self.shaper.ideal(&levels)
    }

    /// Slots approximated by the truncated Fourier series.
    pub fn encode_shaped(&self, bits: &[u8]) -> Vec<f64> {
        let levels = self.levels(bits);
        debug!("Encoding {} bits -> {} slots (shaped)", bits.len(), levels.len());
        self.shaper.shape(&levels)
    }

    /// Ideal waveform of every symbol value.
    pub fn waveform_dictionary(&self) -> Result<WaveformDictionary> {
        WaveformDictionary::build(self.bits_per_symbol, |value| {
            let bits = decimal_to_bits(value, self.bits_per_symbol)?;
            Ok(self.encode_ideal(&bits))
        })
    }
}
