use serde::Serialize;

use crate::ion_series::ion_code;
use crate::mass::{self, Kind};
use crate::matching::IntensityMap;
use crate::Error;

/// Summed intensity recorded for one backbone position across charges 1-3.
///
/// `position` counts break points from the N terminus; for the y series it
/// is mirrored to the C-terminal fragment index before lookup. Positions
/// falling outside the ladder simply find no codes and sum to zero, so
/// neighbours of terminal flip sites need no special casing.
pub fn intensity_at(
    map: &IntensityMap,
    sequence_length: usize,
    position: usize,
    kind: Kind,
) -> f64 {
    let position = match kind {
        Kind::B => position,
        Kind::Y => match sequence_length.checked_sub(position) {
            Some(p) => p,
            None => return 0.0,
        },
    };
    if position == 0 {
        return 0.0;
    }
    (1..=3)
        .map(|charge| {
            map.get(&ion_code(kind, position, charge))
                .copied()
                .unwrap_or(0.0)
        })
        .sum()
}

/// Summed |matched - predicted| for one backbone position across charges 1-3
pub fn error_at(
    matched: &IntensityMap,
    predicted: &IntensityMap,
    sequence_length: usize,
    position: usize,
    kind: Kind,
) -> f64 {
    let position = match kind {
        Kind::B => position,
        Kind::Y => match sequence_length.checked_sub(position) {
            Some(p) => p,
            None => return 0.0,
        },
    };
    if position == 0 {
        return 0.0;
    }
    (1..=3)
        .map(|charge| {
            let code = ion_code(kind, position, charge);
            let observed = matched.get(&code).copied().unwrap_or(0.0);
            let expected = predicted.get(&code).copied().unwrap_or(0.0);
            (observed - expected).abs()
        })
        .sum()
}

/// Position of a flip boundary relative to the sequence length
pub fn relative_position(boundary: usize, sequence_length: usize) -> f64 {
    if sequence_length == 0 {
        return 0.0;
    }
    boundary as f64 / sequence_length as f64
}

/// Physicochemical differences between the two residues flanking a flip
/// boundary, as consumed by the downstream feature table
#[derive(Copy, Clone, Debug, Serialize)]
pub struct ResiduePairFeatures {
    pub n_oxidation: bool,
    pub c_oxidation: bool,
    pub blosum_n: f64,
    pub blosum_c: f64,
    pub blosum_diff: f64,
    pub mass_diff: f64,
    pub hydrophobicity_diff: f64,
    pub pka_diff: f64,
    pub polarity_diff: f64,
}

impl ResiduePairFeatures {
    /// `n_residue` / `c_residue` are the residue codes on either side of the
    /// swapped bond. Oxidized `m` keeps its heavier mass for the mass
    /// difference but is looked up as `M` in the substitution and property
    /// tables.
    pub fn new(n_residue: u8, c_residue: u8) -> Result<Self, Error> {
        let n_mass =
            mass::monoisotopic(n_residue).ok_or(Error::UnknownResidue(n_residue as char))?;
        let c_mass =
            mass::monoisotopic(c_residue).ok_or(Error::UnknownResidue(c_residue as char))?;

        let normalize = |r: u8| if r == b'm' { b'M' } else { r };
        let n = normalize(n_residue);
        let c = normalize(c_residue);

        let blosum_n = mass::blosum(n).ok_or(Error::UnknownResidue(n as char))?;
        let blosum_c = mass::blosum(c).ok_or(Error::UnknownResidue(c as char))?;
        let n_props = mass::properties(n).ok_or(Error::UnknownResidue(n as char))?;
        let c_props = mass::properties(c).ok_or(Error::UnknownResidue(c as char))?;

        Ok(Self {
            n_oxidation: n_residue == b'm',
            c_oxidation: c_residue == b'm',
            blosum_n,
            blosum_c,
            blosum_diff: (blosum_c - blosum_n).abs(),
            mass_diff: (c_mass - n_mass).abs(),
            hydrophobicity_diff: (c_props.hydrophobicity - n_props.hydrophobicity).abs(),
            pka_diff: (c_props.pka - n_props.pka).abs(),
            polarity_diff: (c_props.polarity - n_props.polarity).abs(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> IntensityMap {
        entries
            .iter()
            .map(|(code, value)| (code.to_string(), *value))
            .collect()
    }

    #[test]
    fn sums_across_charges() {
        let ions = map(&[("b3", 0.5), ("b3^2", 0.25), ("b3^3", 0.125), ("b4", 9.0)]);
        assert!((intensity_at(&ions, 7, 3, Kind::B) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn mirrors_y_positions() {
        // backbone position 2 of a 7-mer is the y5 fragment
        let ions = map(&[("y5", 0.5), ("y5^2", 0.25), ("y2", 9.0)]);
        assert!((intensity_at(&ions, 7, 2, Kind::Y) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_positions_are_zero() {
        let ions = map(&[("b1", 1.0), ("y1", 1.0)]);
        assert_eq!(intensity_at(&ions, 7, 0, Kind::B), 0.0);
        assert_eq!(intensity_at(&ions, 7, 7, Kind::Y), 0.0);
        assert_eq!(intensity_at(&ions, 7, 8, Kind::Y), 0.0);
    }

    #[test]
    fn error_sums_absolute_differences() {
        let matched = map(&[("y4", 0.6), ("y4^2", 0.1)]);
        let predicted = map(&[("y4", 0.8), ("y4^3", 0.2)]);
        // backbone position 3 of a 7-mer -> y4
        let err = error_at(&matched, &predicted, 7, 3, Kind::Y);
        assert!((err - (0.2 + 0.1 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn pair_features() {
        let f = ResiduePairFeatures::new(b'G', b'P').unwrap();
        assert!((f.blosum_n - 1.19).abs() < 1e-12);
        assert!((f.blosum_c - -2.02).abs() < 1e-12);
        assert!((f.blosum_diff - 3.21).abs() < 1e-12);
        assert!((f.mass_diff - (97.052764 - 57.021464)).abs() < 1e-9);
        assert!((f.hydrophobicity_diff - 1.2).abs() < 1e-12);
        assert!((f.pka_diff - 0.4).abs() < 1e-12);
        assert_eq!(f.polarity_diff, 0.0);
        assert!(!f.n_oxidation && !f.c_oxidation);
    }

    #[test]
    fn oxidized_methionine_pair() {
        let f = ResiduePairFeatures::new(b'm', b'A').unwrap();
        assert!(f.n_oxidation);
        // oxidized mass difference, unmodified substitution score
        let expected = (71.037114 - (131.040485 + mass::OXIDATION)).abs();
        assert!((f.mass_diff - expected).abs() < 1e-9);
        assert!((f.blosum_n - 0.37).abs() < 1e-12);
    }

    #[test]
    fn unknown_residue() {
        assert!(matches!(
            ResiduePairFeatures::new(b'Z', b'A'),
            Err(Error::UnknownResidue('Z'))
        ));
    }
}
