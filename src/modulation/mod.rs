//! Carrier modulation: parameter generators, carrier synthesis,
//! and the matching modulator / demodulator pair.

pub mod carrier;
pub mod demodulator;
pub mod modulator;
pub mod params;

pub use carrier::Carrier;
pub use demodulator::Demodulator;
pub use modulator::Modulator;
pub use params::{CarrierParams, ParameterGenerator};

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modulation {
    /// Amplitude follows the decimal symbol
    Ask,
    /// Frequency multiplier 1 + decimal symbol
    Fsk,
    /// Gray-ordered phase slots over 360 degrees
    Psk,
    /// PSK with four phase slots
    Qpsk,
    /// Gray-ordered 4x4 amplitude/phase constellation
    Qam16,
}

impl Modulation {
    pub const ALL: [Modulation; 5] = [
        Modulation::Ask,
        Modulation::Fsk,
        Modulation::Psk,
        Modulation::Qpsk,
        Modulation::Qam16,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Modulation::Ask => "ask",
            Modulation::Fsk => "fsk",
            Modulation::Psk => "psk",
            Modulation::Qpsk => "qpsk",
            Modulation::Qam16 => "16-qam",
        }
    }

    /// Symbol width baked into the constellation, if any.
    pub fn native_bits_per_symbol(&self) -> Option<usize> {
        match self {
            Modulation::Qpsk => Some(2),
            Modulation::Qam16 => Some(4),
            Modulation::Ask | Modulation::Fsk | Modulation::Psk => None,
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
