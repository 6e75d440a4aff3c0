//! Scheme-agnostic transmit / receive facade and the helpers around it.

pub mod cache;
pub mod receiver;
pub mod simulation;
pub mod text;
pub mod transmitter;

pub use cache::{DictionaryCache, DictionaryKey};
pub use receiver::Receiver;
pub use simulation::{BerPoint, count_bit_errors, run_ber_sweep};
pub use text::{bits_to_text, text_to_bits};
pub use transmitter::Transmitter;
