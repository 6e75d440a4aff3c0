//! Error types for the physical layer simulator.

use thiserror::Error;

/// Physical layer error type
#[derive(Error, Debug)]
pub enum PhyError {
    /// Scheme name not present in the registry
    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),

    /// Symbol width outside the supported range
    #[error("bits per symbol must be between 1 and {max}, got {got}")]
    InvalidBitsPerSymbol { got: usize, max: usize },

    /// Fixed-width scheme asked to carry an incompatible symbol width
    #[error("{scheme} cannot carry {bits_per_symbol} bits per symbol")]
    UnsupportedWidth {
        scheme: &'static str,
        bits_per_symbol: usize,
    },

    /// Rate, voltage or noise parameter out of range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Symbol value wider than the configured symbol width
    #[error("symbol value {value} does not fit in {bits_per_symbol} bits")]
    SymbolOutOfRange { value: u32, bits_per_symbol: usize },

    /// Stage constructed from a configuration of the other scheme family
    #[error("expected a {expected} scheme, got {got}")]
    SchemeMismatch { expected: &'static str, got: String },

    /// Waveform dictionary entries are missing or inconsistent
    #[error("invalid waveform dictionary: {0}")]
    InvalidDictionary(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhyError>;

impl PhyError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PhyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
