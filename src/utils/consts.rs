/// Log level (overridable with RUST_LOG)
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Physical Layer Defaults
// ============================================================================

/// Sample rate (Hz)
pub const SAMPLE_RATE: u32 = 1000;

/// Peak voltage of the transmitted signal (V)
pub const PEAK_VOLTAGE: f64 = 3.3;

/// Baseband symbol rate (symbols per second)
pub const SYMBOL_RATE: f64 = 1.0;

/// Carrier frequency (Hz); one carrier cycle per symbol
pub const CARRIER_FREQ: f64 = 10.0;

/// Standard deviation of the channel noise (V)
pub const NOISE_SIGMA: f64 = 0.1;

/// Default symbol width
pub const BITS_PER_SYMBOL: usize = 1;

/// Widest symbol accepted
pub const MAX_BITS_PER_SYMBOL: usize = 16;

/// Upper bound on symbols x window samples held by one waveform dictionary
pub const MAX_DICTIONARY_SAMPLES: usize = 1 << 24;

// Pulse synthesis
/// Symbols treated as one period of the Fourier approximation
pub const SYMBOLS_PER_PERIOD: usize = 4;

/// Harmonics kept in the truncated Fourier series
pub const FOURIER_HARMONICS: usize = 8;

// 16-QAM constellation magnitudes
/// Outer I/Q component magnitude, 1/√2
pub const QAM16_OUTER: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Inner I/Q component magnitude, 1/(3√2)
pub const QAM16_INNER: f64 = QAM16_OUTER / 3.0;
