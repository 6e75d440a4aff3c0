//! Baseband line codes
//!
//! Each code turns a sequence of symbols into a sequence of level slots.
//! A slot holds one level per bit of the symbol; the encoder later collapses
//! it to a single decimal voltage. Manchester and Bipolar drive a two-phase
//! clock (high, low) and emit two slots per symbol.

use std::fmt;

/// One coded slot: a level per bit of the source symbol.
pub type Slot = Vec<f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineCoding {
    /// 1 -> +1, 0 -> -1
    NrzPolar,
    /// bit XOR clock: inverted on the high phase, as-is on the low phase
    Manchester,
    /// Alternate mark inversion, marks only on the high phase
    Bipolar,
}

/// Polarity of the next Bipolar mark.
///
/// Every encode pass starts from [`AmiState::default`] (+1); the final
/// state is handed back so callers can observe the alternation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmiState {
    polarity: f64,
}

impl Default for AmiState {
    fn default() -> Self {
        Self { polarity: 1.0 }
    }
}

impl AmiState {
    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    /// Emit `symbol` as a mark and flip the register.
    fn mark(&mut self, symbol: &[u8]) -> Slot {
        let slot = symbol
            .iter()
            .map(|&bit| f64::from(bit) * self.polarity)
            .collect();
        self.polarity = -self.polarity;
        slot
    }
}

impl LineCoding {
    pub const ALL: [LineCoding; 3] = [
        LineCoding::NrzPolar,
        LineCoding::Manchester,
        LineCoding::Bipolar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LineCoding::NrzPolar => "nrz_polar",
            LineCoding::Manchester => "manchester",
            LineCoding::Bipolar => "bipolar",
        }
    }

    /// Codes that embed a clock emit a high and a low slot per symbol.
    pub fn has_clock(&self) -> bool {
        matches!(self, LineCoding::Manchester | LineCoding::Bipolar)
    }

    pub fn slots_per_symbol(&self) -> usize {
        if self.has_clock() { 2 } else { 1 }
    }

    /// Encode with a fresh alternation register.
    pub fn encode(&self, symbols: &[&[u8]]) -> Vec<Slot> {
        self.encode_with_state(symbols, AmiState::default()).0
    }

    /// Encode starting from `state`, returning the slots and the final state.
    ///
    /// Only Bipolar reads or changes the state.
    pub fn encode_with_state(
        &self,
        symbols: &[&[u8]],
        mut state: AmiState,
    ) -> (Vec<Slot>, AmiState) {
        let mut slots = Vec::with_capacity(symbols.len() * self.slots_per_symbol());

        match self {
            LineCoding::NrzPolar => {
                for symbol in symbols {
                    slots.push(
                        symbol
                            .iter()
                            .map(|&bit| if bit == 1 { 1.0 } else { -1.0 })
                            .collect(),
                    );
                }
            }
            LineCoding::Manchester => {
                for (symbol, clock) in symbols.iter().flat_map(|s| clock_phases(s)) {
                    // XOR with the clock: high inverts, low keeps
                    slots.push(
                        symbol
                            .iter()
                            .map(|&bit| f64::from((bit ^ clock) & 1))
                            .collect(),
                    );
                }
            }
            LineCoding::Bipolar => {
                for (symbol, clock) in symbols.iter().flat_map(|s| clock_phases(s)) {
                    let is_mark = symbol.iter().any(|&bit| bit == 1);
                    if clock == 1 && is_mark {
                        slots.push(state.mark(symbol));
                    } else {
                        slots.push(vec![0.0; symbol.len()]);
                    }
                }
            }
        }

        (slots, state)
    }
}

/// A symbol paired with the high then the low clock phase.
fn clock_phases<'a>(symbol: &'a [u8]) -> [(&'a [u8], u8); 2] {
    [(symbol, 1), (symbol, 0)]
}

impl fmt::Display for LineCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::symbols::bits_to_symbols;

    const MESSAGE: [u8; 8] = [0, 1, 0, 1, 0, 1, 0, 0];

    fn flatten(slots: &[Slot]) -> Vec<f64> {
        slots
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    #[test]
    fn test_nrz_polar_single_bit() {
        let symbols = bits_to_symbols(&MESSAGE, 1);
        let slots = LineCoding::NrzPolar.encode(&symbols);
        assert_eq!(
            flatten(&slots),
            vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0]
        );
    }

    #[test]
    fn test_nrz_polar_multi_bit() {
        let slots = LineCoding::NrzPolar.encode(&bits_to_symbols(&MESSAGE, 4));
        assert_eq!(slots[0], vec![-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(slots[1], vec![-1.0, 1.0, -1.0, -1.0]);

        let slots = LineCoding::NrzPolar.encode(&bits_to_symbols(&MESSAGE, 8));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0], vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_manchester() {
        let slots = LineCoding::Manchester.encode(&bits_to_symbols(&MESSAGE, 8));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(slots[1], vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);

        let slots = LineCoding::Manchester.encode(&bits_to_symbols(&MESSAGE, 1));
        assert_eq!(slots.len(), 16);
        // 0 -> (1, 0), 1 -> (0, 1)
        assert_eq!(flatten(&slots[..4]), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_bipolar_single_bit_alternates_marks() {
        let slots = LineCoding::Bipolar.encode(&bits_to_symbols(&MESSAGE, 1));
        assert_eq!(
            flatten(&slots),
            vec![
                0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );
    }

    #[test]
    fn test_bipolar_multi_bit_alternates_per_mark() {
        let bits = [0, 1, 0, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 0];
        let slots = LineCoding::Bipolar.encode(&bits_to_symbols(&bits, 8));
        assert_eq!(slots[0], vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(slots[1], vec![0.0; 8]);
        assert_eq!(slots[2], vec![0.0, -1.0, -1.0, 0.0, -1.0, 0.0, 0.0, 0.0]);
        assert_eq!(slots[3], vec![0.0; 8]);
    }

    #[test]
    fn test_bipolar_spaces_do_not_flip_register() {
        let bits = [0, 1, 0, 0, 0, 1];
        let (_, state) = LineCoding::Bipolar
            .encode_with_state(&bits_to_symbols(&bits, 1), AmiState::default());
        // two marks -> back to +1
        assert_eq!(state.polarity(), 1.0);
    }

    #[test]
    fn test_bipolar_register_resets_each_pass() {
        let symbols = bits_to_symbols(&[1], 1);
        let first = LineCoding::Bipolar.encode(&symbols);
        let second = LineCoding::Bipolar.encode(&symbols);
        assert_eq!(first, second);
        assert_eq!(first[0], vec![1.0]);
    }

    #[test]
    fn test_bipolar_honours_explicit_state() {
        let symbols = bits_to_symbols(&[1], 1);
        let (slots, state) = LineCoding::Bipolar.encode_with_state(
            &symbols,
            AmiState { polarity: -1.0 },
        );
        assert_eq!(slots[0], vec![-1.0]);
        assert_eq!(state.polarity(), 1.0);
    }

    #[test]
    fn test_slots_per_symbol() {
        assert_eq!(LineCoding::NrzPolar.slots_per_symbol(), 1);
        assert_eq!(LineCoding::Manchester.slots_per_symbol(), 2);
        assert_eq!(LineCoding::Bipolar.slots_per_symbol(), 2);
    }
}
