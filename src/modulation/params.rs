//! Symbol -> carrier parameter mapping for each modulation

use super::Modulation;
use crate::error::{PhyError, Result};
use crate::phy::gray::GrayTable;
use crate::phy::symbols::{check_bits_per_symbol, max_symbol, normalize};
use crate::utils::consts::{QAM16_INNER, QAM16_OUTER};

/// Gray-ordered 16-QAM constellation; row picks Q, column picks I.
pub const QAM16_GRAY: [[u32; 4]; 4] = [
    [7, 5, 13, 15],
    [6, 4, 12, 14],
    [2, 0, 8, 10],
    [3, 1, 9, 11],
];

/// Amplitude multiplier, frequency multiplier and phase (degrees)
/// for one carrier cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarrierParams {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl Default for CarrierParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
        }
    }
}

pub fn ask(decimal: f64) -> CarrierParams {
    CarrierParams {
        amplitude: decimal,
        ..CarrierParams::default()
    }
}

pub fn fsk(decimal: f64) -> CarrierParams {
    CarrierParams {
        frequency: 1.0 + decimal,
        ..CarrierParams::default()
    }
}

/// Phase slot of `value` inside the Gray table.
pub fn psk(value: u32, gray: &GrayTable) -> CarrierParams {
    let slot = gray.index_of(value).unwrap_or(0);
    CarrierParams {
        phase: slot as f64 * 360.0 / gray.len() as f64,
        ..CarrierParams::default()
    }
}

/// In-phase and quadrature components of a 16-QAM symbol.
pub fn qam16_components(value: u32) -> (f64, f64) {
    let (row, col) = QAM16_GRAY
        .iter()
        .enumerate()
        .find_map(|(row, cols)| {
            cols.iter()
                .position(|&v| v == value)
                .map(|col| (row, col))
        })
        .unwrap_or((2, 1));

    let i_sign = if col < 2 { -1.0 } else { 1.0 };
    let i_mag = if col == 1 || col == 2 { QAM16_INNER } else { QAM16_OUTER };
    let q_sign = if row < 2 { 1.0 } else { -1.0 };
    let q_mag = if row == 1 || row == 2 { QAM16_INNER } else { QAM16_OUTER };

    (i_sign * i_mag, q_sign * q_mag)
}

pub fn qam16(value: u32) -> CarrierParams {
    let (i, q) = qam16_components(value);
    CarrierParams {
        amplitude: i.hypot(q),
        frequency: 1.0,
        phase: q.atan2(i).to_degrees().rem_euclid(360.0),
    }
}

/// Maps configured symbols to carrier cycles.
///
/// QPSK and 16-QAM have a fixed constellation width. A narrower symbol is
/// spread onto that grid (`v * (2^n - 1) / (2^w - 1)`); a wider one is sent
/// as several consecutive constellation symbols. Either way one width must
/// divide the other.
pub struct ParameterGenerator {
    modulation: Modulation,
    bits_per_symbol: usize,
    native_bits: usize,
    gray: Option<GrayTable>,
}

impl ParameterGenerator {
    pub fn new(modulation: Modulation, bits_per_symbol: usize) -> Result<Self> {
        check_bits_per_symbol(bits_per_symbol)?;
        let native_bits = modulation
            .native_bits_per_symbol()
            .unwrap_or(bits_per_symbol);

        if native_bits % bits_per_symbol != 0 && bits_per_symbol % native_bits != 0 {
            return Err(PhyError::UnsupportedWidth {
                scheme: modulation.name(),
                bits_per_symbol,
            });
        }

        let gray = match modulation {
            Modulation::Psk | Modulation::Qpsk => Some(GrayTable::new(native_bits)?),
            Modulation::Ask | Modulation::Fsk | Modulation::Qam16 => None,
        };

        Ok(Self {
            modulation,
            bits_per_symbol,
            native_bits,
            gray,
        })
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    pub fn bits_per_symbol(&self) -> usize {
        self.bits_per_symbol
    }

    /// Carrier cycles emitted per configured symbol.
    pub fn cycles_per_symbol(&self) -> usize {
        (self.bits_per_symbol / self.native_bits).max(1)
    }

    /// Parameters for one configured symbol value, one entry per cycle.
    pub fn generate(&self, value: u32) -> Vec<CarrierParams> {
        self.native_symbols(value)
            .into_iter()
            .map(|native| self.native_params(native))
            .collect()
    }

    /// Parameters for a run of symbol values.
    pub fn generate_all(&self, values: &[u32]) -> Vec<CarrierParams> {
        values
            .iter()
            .flat_map(|&value| self.generate(value))
            .collect()
    }

    fn native_symbols(&self, value: u32) -> Vec<u32> {
        if self.bits_per_symbol <= self.native_bits {
            let scale = max_symbol(self.native_bits) / max_symbol(self.bits_per_symbol);
            return vec![value * scale];
        }
        let mask = max_symbol(self.native_bits);
        (0..self.cycles_per_symbol())
            .rev()
            .map(|group| (value >> (group * self.native_bits)) & mask)
            .collect()
    }

    fn native_params(&self, native: u32) -> CarrierParams {
        match (self.modulation, &self.gray) {
            (Modulation::Ask, _) => ask(normalize(native, self.native_bits)),
            (Modulation::Fsk, _) => fsk(normalize(native, self.native_bits)),
            (Modulation::Psk | Modulation::Qpsk, Some(gray)) => psk(native, gray),
            (Modulation::Psk | Modulation::Qpsk, None) => CarrierParams::default(),
            (Modulation::Qam16, _) => qam16(native),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ask_and_fsk() {
        let generator = ParameterGenerator::new(Modulation::Ask, 2).unwrap();
        let amplitudes: Vec<f64> = (0..4)
            .map(|v| generator.generate(v)[0].amplitude)
            .collect();
        assert!(close(amplitudes[1], 1.0 / 3.0));
        assert!(close(amplitudes[3], 1.0));

        let generator = ParameterGenerator::new(Modulation::Fsk, 1).unwrap();
        assert_eq!(generator.generate(0)[0].frequency, 1.0);
        assert_eq!(generator.generate(1)[0].frequency, 2.0);
    }

    #[test]
    fn test_psk_uses_gray_position() {
        let generator = ParameterGenerator::new(Modulation::Psk, 2).unwrap();
        // table [0, 1, 3, 2]
        let phases: Vec<f64> = (0..4)
            .map(|v| generator.generate(v)[0].phase)
            .collect();
        assert_eq!(phases, vec![0.0, 90.0, 270.0, 180.0]);

        let generator = ParameterGenerator::new(Modulation::Psk, 1).unwrap();
        assert_eq!(generator.generate(1)[0].phase, 180.0);
    }

    #[test]
    fn test_qpsk_spreads_single_bits_on_its_grid() {
        let generator = ParameterGenerator::new(Modulation::Qpsk, 1).unwrap();
        assert_eq!(generator.generate(0)[0].phase, 0.0);
        assert_eq!(generator.generate(1)[0].phase, 180.0);
    }

    #[test]
    fn test_qpsk_splits_wide_symbols() {
        let generator = ParameterGenerator::new(Modulation::Qpsk, 8).unwrap();
        assert_eq!(generator.cycles_per_symbol(), 4);
        // 0b01_11_10_00
        let phases: Vec<f64> = generator
            .generate(0b0111_1000)
            .iter()
            .map(|p| p.phase)
            .collect();
        assert_eq!(phases, vec![90.0, 180.0, 270.0, 0.0]);
    }

    #[test]
    fn test_incompatible_widths_rejected() {
        assert!(matches!(
            ParameterGenerator::new(Modulation::Qpsk, 3),
            Err(PhyError::UnsupportedWidth { .. })
        ));
        assert!(ParameterGenerator::new(Modulation::Qam16, 6).is_err());
        assert!(ParameterGenerator::new(Modulation::Qam16, 2).is_ok());
        assert!(ParameterGenerator::new(Modulation::Qam16, 8).is_ok());
        assert!(ParameterGenerator::new(Modulation::Psk, 5).is_ok());
    }

    #[test]
    fn test_qam16_constellation() {
        let allowed = [QAM16_INNER, QAM16_OUTER];
        for value in 0..16 {
            let (i, q) = qam16_components(value);
            assert!(allowed.iter().any(|&m| close(i.abs(), m)));
            assert!(allowed.iter().any(|&m| close(q.abs(), m)));

            let params = qam16(value);
            assert!(close(params.amplitude, (i * i + q * q).sqrt()));
            assert!((0.0..360.0).contains(&params.phase));
            assert_eq!(params.frequency, 1.0);
        }
    }

    #[test]
    fn test_qam16_quadrants() {
        // 0 sits at row 2, col 1: I inner negative, Q inner negative
        let (i, q) = qam16_components(0);
        assert!(close(i, -QAM16_INNER) && close(q, -QAM16_INNER));
        assert!(close(qam16(0).phase, 225.0));
        // 15 sits at row 0, col 3: both outer positive
        let (i, q) = qam16_components(15);
        assert!(close(i, QAM16_OUTER) && close(q, QAM16_OUTER));
        assert!(close(qam16(15).amplitude, 1.0));
        assert!(close(qam16(15).phase, 45.0));
    }

    #[test]
    fn test_qam16_points_are_distinct() {
        let points: Vec<(f64, f64)> = (0..16).map(qam16_components).collect();
        for a in 0..16 {
            for b in (a + 1)..16 {
                let (ia, qa) = points[a];
                let (ib, qb) = points[b];
                assert!(!(close(ia, ib) && close(qa, qb)), "{a} and {b} collide");
            }
        }
    }
}
