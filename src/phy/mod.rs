//! Baseband physical layer: symbol mapping, line coding, pulse synthesis,
//! channel noise and minimum-distance detection.

pub mod decoder;
pub mod detector;
pub mod encoder;
pub mod gray;
pub mod line_coding;
pub mod noise;
pub mod pulse;
pub mod scheme;
pub mod symbols;

pub use decoder::PhyDecoder;
pub use detector::{Detection, WaveformDictionary};
pub use encoder::PhyEncoder;
pub use gray::GrayTable;
pub use line_coding::{AmiState, LineCoding};
pub use noise::Noise;
pub use pulse::PulseShaper;
pub use scheme::{Scheme, SchemeRegistry};
