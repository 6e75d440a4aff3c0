/// Carrier modulator: bits -> symbol values -> carrier parameters -> samples
use super::carrier::Carrier;
use super::params::ParameterGenerator;
use super::Modulation;
use crate::error::{PhyError, Result};
use crate::phy::detector::WaveformDictionary;
use crate::phy::scheme::Scheme;
use crate::phy::symbols::{bits_to_values, check_bits_per_symbol, decimal_to_bits};
use crate::utils::config::PhyConfig;
use tracing::{debug, info};

pub struct Modulator {
    generator: ParameterGenerator,
    carrier: Carrier,
}

impl Modulator {
    /// # Arguments
    /// * `peak_voltage` - amplitude of an unscaled carrier cycle
    /// * `carrier_freq` - carrier frequency; the symbol period is one cycle
    pub fn new(
        modulation: Modulation,
        bits_per_symbol: usize,
        peak_voltage: f64,
        carrier_freq: f64,
        sample_rate: f64,
    ) -> Result<Self> {
        check_bits_per_symbol(bits_per_symbol)?;
        let generator = ParameterGenerator::new(modulation, bits_per_symbol)?;
        let carrier = Carrier::new(peak_voltage, carrier_freq, sample_rate);
        if carrier.samples_per_symbol() == 0 {
            return Err(PhyError::invalid(
                "carrier_freq",
                format!("{carrier_freq} Hz leaves no samples per cycle at {sample_rate} Hz"),
            ));
        }

        info!(
            "Modulator initialized: {}, {} bits/symbol, {} Hz carrier, {} samples/cycle",
            modulation,
            bits_per_symbol,
            carrier_freq,
            carrier.samples_per_symbol()
        );

        Ok(Self { generator, carrier })
    }

    pub fn from_config(config: &PhyConfig) -> Result<Self> {
        match config.scheme {
            Scheme::Carrier(modulation) => Self::new(
                modulation,
                config.bits_per_symbol,
                config.peak_voltage,
                config.carrier_freq,
                f64::from(config.sample_rate),
            ),
            Scheme::Line(coding) => Err(PhyError::SchemeMismatch {
                expected: "carrier modulation",
                got: coding.name().to_string(),
            }),
        }
    }

    pub fn modulation(&self) -> Modulation {
        self.generator.modulation()
    }

    pub fn bits_per_symbol(&self) -> usize {
        self.generator.bits_per_symbol()
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    /// Samples per configured symbol.
    pub fn samples_per_symbol(&self) -> usize {
        self.carrier.samples_per_symbol() * self.generator.cycles_per_symbol()
    }

    /// Noiseless modulated signal.
    pub fn modulate(&self, bits: &[u8]) -> Vec<f64> {
        let values = bits_to_values(bits, self.bits_per_symbol());
        let params = self.generator.generate_all(&values);
        debug!(
            "Modulating {} bits as {} symbols ({} cycles)",
            bits.len(),
            values.len(),
            params.len()
        );
        self.carrier.modulate(&params)
    }

    /// Noiseless waveform of every symbol value.
    pub fn waveform_dictionary(&self) -> Result<WaveformDictionary> {
        WaveformDictionary::build(self.bits_per_symbol(), |value| {
            let bits = decimal_to_bits(value, self.bits_per_symbol())?;
            Ok(self.modulate(&bits))
        })
    }
}
