use super::detector::WaveformDictionary;
use super::encoder::PhyEncoder;
use super::line_coding::LineCoding;
use crate::error::Result;
use crate::utils::config::PhyConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Baseband receiver stage
///
/// Detection windows span a whole symbol, so clock-bearing codes consume
/// their high and low slots together and step two slots at a time.
pub struct PhyDecoder {
    coding: LineCoding,
    dictionary: Arc<WaveformDictionary>,
}

impl PhyDecoder {
    /// Build the dictionary from a matching encoder.
    pub fn new(encoder: &PhyEncoder) -> Result<Self> {
        let dictionary = Arc::new(encoder.waveform_dictionary()?);
        info!(
            "PhyDecoder initialized: {}, {} symbols, window {} samples",
            encoder.coding(),
            dictionary.len(),
            dictionary.window_len()
        );
        Ok(Self::with_dictionary(encoder.coding(), dictionary))
    }

    pub fn from_config(config: &PhyConfig) -> Result<Self> {
        Self::new(&PhyEncoder::from_config(config)?)
    }

    /// Reuse a dictionary built elsewhere.
    pub fn with_dictionary(coding: LineCoding, dictionary: Arc<WaveformDictionary>) -> Self {
        Self { coding, dictionary }
    }

    pub fn coding(&self) -> LineCoding {
        self.coding
    }

    pub fn dictionary(&self) -> &WaveformDictionary {
        &self.dictionary
    }

    pub fn decode(&self, samples: &[f64]) -> Vec<u8> {
        let bits = match self.coding {
            // mark polarity carries no data
            LineCoding::Bipolar => {
                let rectified: Vec<f64> = samples
                    .iter()
                    .map(|x| x.abs())
                    .collect();
                self.dictionary.decode_bits(&rectified)
            }
            LineCoding::NrzPolar | LineCoding::Manchester => self.dictionary.decode_bits(samples),
        };
        debug!(
            "Decoded {} samples -> {} bits ({})",
            samples.len(),
            bits.len(),
            self.coding
        );
        bits
    }
}
