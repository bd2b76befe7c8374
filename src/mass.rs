use serde::{Deserialize, Serialize};

pub const PROTON: f64 = 1.007276466622;
pub const H: f64 = 1.007825035;
pub const O: f64 = 15.99491463;
pub const N: f64 = 14.003074;
pub const H2O: f64 = H * 2.0 + O;
pub const NH3: f64 = N + H * 3.0;

pub const N_TERMINUS: f64 = H;
pub const C_TERMINUS: f64 = O + H;

pub const OXIDATION: f64 = 15.994915;
pub const CARBAMIDOMETHYL: f64 = 57.021464;

/// Residue codes with an entry in the monoisotopic mass table.
/// Lowercase `m` is methionine carrying the resolved oxidation flag.
pub const VALID_AA: [u8; 21] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R', b'S',
    b'T', b'V', b'W', b'Y', b'm',
];

/// Monoisotopic mass of a single residue code, in Da.
///
/// Cysteine is fixed-modified with carbamidomethyl, matching the upstream
/// search settings that produced the sequences.
pub fn monoisotopic(residue: u8) -> Option<f64> {
    let mass = match residue {
        b'A' => 71.037114,
        b'R' => 156.101111,
        b'N' => 114.042927,
        b'D' => 115.026943,
        b'C' => 103.009185 + CARBAMIDOMETHYL,
        b'E' => 129.042593,
        b'Q' => 128.058578,
        b'G' => 57.021464,
        b'H' => 137.058912,
        b'I' => 113.084064,
        b'L' => 113.084064,
        b'K' => 128.094963,
        b'M' => 131.040485,
        b'm' => 131.040485 + OXIDATION,
        b'F' => 147.068414,
        b'P' => 97.052764,
        b'S' => 87.032028,
        b'T' => 101.047679,
        b'W' => 186.079313,
        b'Y' => 163.06332,
        b'V' => 99.068414,
        _ => return None,
    };
    Some(mass)
}

/// Which end of the backbone a fragment retains
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    B,
    Y,
}

impl Kind {
    /// Per-series mass offset accounting for N-/C-terminal chemistry,
    /// applied once per ion series
    pub fn offset(&self) -> f64 {
        match self {
            Kind::B => N_TERMINUS - H,
            Kind::Y => C_TERMINUS + H,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Kind::B => 'b',
            Kind::Y => 'y',
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// BLOSUM6.1 substitution value for a residue
pub fn blosum(residue: u8) -> Option<f64> {
    let value = match residue {
        b'A' => 0.19,
        b'C' => -1.05,
        b'D' => 0.01,
        b'E' => -0.08,
        b'F' => 0.29,
        b'G' => 1.19,
        b'H' => -0.79,
        b'I' => 0.28,
        b'K' => 0.1,
        b'L' => 0.34,
        b'M' => 0.37,
        b'N' => 0.83,
        b'P' => -2.02,
        b'Q' => -0.08,
        b'R' => 0.2,
        b'S' => 0.54,
        b'T' => 0.38,
        b'V' => 0.16,
        b'W' => 0.24,
        b'Y' => -0.48,
        _ => return None,
    };
    Some(value)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ResidueProperties {
    pub polarity: f64,
    pub hydrophobicity: f64,
    pub pka: f64,
}

const fn props(polarity: f64, hydrophobicity: f64, pka: f64) -> ResidueProperties {
    ResidueProperties {
        polarity,
        hydrophobicity,
        pka,
    }
}

/// Physicochemical properties (polarity, Kyte-Doolittle hydrophobicity,
/// carboxyl pKa) for the 20 standard residues
pub fn properties(residue: u8) -> Option<ResidueProperties> {
    let p = match residue {
        b'A' => props(0.0, 1.8, 2.35),
        b'C' => props(0.0, 2.5, 1.92),
        b'D' => props(1.0, -3.5, 1.99),
        b'E' => props(1.0, -3.5, 2.10),
        b'F' => props(0.0, -2.8, 2.20),
        b'G' => props(0.0, -0.4, 2.35),
        b'H' => props(1.0, -3.2, 1.80),
        b'I' => props(0.0, 4.5, 2.32),
        b'K' => props(1.0, -3.9, 2.16),
        b'L' => props(0.0, 3.8, 2.33),
        b'M' => props(0.0, 1.9, 2.13),
        b'N' => props(1.0, -3.5, 2.14),
        b'P' => props(0.0, -1.6, 1.95),
        b'Q' => props(1.0, -3.5, 2.17),
        b'R' => props(1.0, -4.5, 1.82),
        b'S' => props(1.0, -0.8, 2.19),
        b'T' => props(1.0, -0.7, 2.09),
        b'V' => props(0.0, 4.2, 2.29),
        b'W' => props(0.0, -0.9, 2.46),
        b'Y' => props(1.0, -1.3, 2.20),
        _ => return None,
    };
    Some(p)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smoke() {
        for ch in VALID_AA {
            assert!(monoisotopic(ch).unwrap() > 0.0);
        }
        assert!(monoisotopic(b'X').is_none());
        assert!(monoisotopic(b'c').is_none());
    }

    #[test]
    fn offsets() {
        // b ions carry no offset; y ions carry a full water
        assert_eq!(Kind::B.offset(), 0.0);
        assert!((Kind::Y.offset() - H2O).abs() < 1e-12);
    }

    #[test]
    fn oxidized_methionine() {
        let m = monoisotopic(b'M').unwrap();
        let m_ox = monoisotopic(b'm').unwrap();
        assert!((m_ox - m - OXIDATION).abs() < 1e-12);
    }

    #[test]
    fn property_tables_cover_standard_residues() {
        for ch in VALID_AA {
            if ch == b'm' {
                assert!(blosum(ch).is_none());
                assert!(properties(ch).is_none());
            } else {
                assert!(blosum(ch).is_some());
                assert!(properties(ch).is_some());
            }
        }
    }
}
