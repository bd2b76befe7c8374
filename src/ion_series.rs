use serde::Serialize;

use crate::mass::{self, Kind, C_TERMINUS, N_TERMINUS, PROTON};
use crate::Error;

/// Fragment charge states enumerated for every series
pub const MAX_FRAGMENT_CHARGE: u8 = 3;

/// Monoisotopic masses for every residue of `sequence`, in order.
pub fn residue_masses(sequence: &str) -> Result<Vec<f64>, Error> {
    sequence
        .bytes()
        .map(|r| mass::monoisotopic(r).ok_or(Error::UnknownResidue(r as char)))
        .collect()
}

/// Iterator over cumulative neutral fragment masses for one ion series.
///
/// Memoizes the running sum of residue masses so that each fragment costs a
/// single addition - forward over the sequence for b ions, backward for y.
pub struct IonSeries<'a> {
    pub kind: Kind,
    cumulative_mass: f64,
    masses: &'a [f64],
    idx: usize,
}

impl<'a> IonSeries<'a> {
    pub fn new(masses: &'a [f64], kind: Kind) -> Self {
        Self {
            kind,
            cumulative_mass: kind.offset(),
            masses,
            idx: 0,
        }
    }
}

impl<'a> Iterator for IonSeries<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        // L - 1 break points: the full-length "fragment" is not an ion
        if self.idx + 1 >= self.masses.len() {
            return None;
        }
        let r = match self.kind {
            Kind::B => self.masses[self.idx],
            Kind::Y => self.masses[self.masses.len() - 1 - self.idx],
        };
        self.cumulative_mass += r;
        self.idx += 1;
        Some(self.cumulative_mass)
    }
}

/// One ion series at one charge state, m/z per fragmentation position.
/// Index 0 is the break after the first retained residue.
#[derive(Clone, Debug, Serialize)]
pub struct IonLadder {
    pub kind: Kind,
    pub charge: u8,
    pub mz: Vec<f64>,
}

/// All theoretical b/y ladders (charges 1-3) for one sequence
#[derive(Clone, Debug, Serialize)]
pub struct TheoreticalIons {
    pub ladders: Vec<IonLadder>,
    /// Neutral precursor mass: residues plus both terminal offsets.
    /// Diagnostic side product, not consumed by the scorer.
    pub precursor_mass: f64,
}

impl TheoreticalIons {
    pub fn n_fragments(&self) -> usize {
        self.ladders.first().map(|l| l.mz.len()).unwrap_or(0)
    }

    pub fn ladder(&self, kind: Kind, charge: u8) -> Option<&IonLadder> {
        self.ladders
            .iter()
            .find(|l| l.kind == kind && l.charge == charge)
    }
}

/// Generate theoretical m/z values for all b/y ion sub-types of `sequence`.
///
/// Pure function of the sequence and the static mass table: no theoretical
/// value ever references an observed spectrum.
pub fn generate_ions(sequence: &str) -> Result<TheoreticalIons, Error> {
    let masses = residue_masses(sequence)?;
    if masses.len() < 2 {
        return Err(Error::SequenceTooShort(masses.len()));
    }

    let residue_total = masses.iter().sum::<f64>();
    let mut ladders = Vec::with_capacity(2 * MAX_FRAGMENT_CHARGE as usize);
    for kind in [Kind::B, Kind::Y] {
        for charge in 1..=MAX_FRAGMENT_CHARGE {
            let z = charge as f64;
            let mz = IonSeries::new(&masses, kind)
                .map(|neutral| (neutral + z * PROTON) / z)
                .collect();
            ladders.push(IonLadder { kind, charge, mz });
        }
    }

    Ok(TheoreticalIons {
        ladders,
        precursor_mass: residue_total + N_TERMINUS + C_TERMINUS,
    })
}

/// Format an ion code: series letter, 1-based fragment position, charge
/// suffix (`y3`, `b4^2`, ...). Singly-charged ions carry no suffix.
pub fn ion_code(kind: Kind, position: usize, charge: u8) -> String {
    match charge {
        1 => format!("{}{}", kind, position),
        z => format!("{}{}^{}", kind, position, z),
    }
}

/// Parse an ion code back into (series, 1-based position, charge)
pub fn parse_ion_code(code: &str) -> Option<(Kind, usize, u8)> {
    let mut chars = code.chars();
    let kind = match chars.next()? {
        'b' => Kind::B,
        'y' => Kind::Y,
        _ => return None,
    };
    let rest = chars.as_str();
    let (digits, charge) = match rest.split_once('^') {
        Some((digits, z)) => (digits, z.parse::<u8>().ok()?),
        None => (rest, 1),
    };
    if charge == 0 {
        return None;
    }
    let position = digits.parse::<usize>().ok()?;
    if position == 0 {
        return None;
    }
    Some((kind, position, charge))
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_within(observed: &[f64], expected: &[f64]) {
        assert_eq!(expected.len(), observed.len());
        assert!(
            expected
                .iter()
                .zip(observed.iter())
                .all(|(a, b)| (a - b).abs() < 1e-4),
            "{:?}",
            expected
                .iter()
                .zip(observed.iter())
                .map(|(a, b)| a - b)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn b_ions() {
        let ions = generate_ions("PEPTIDE").unwrap();
        let expected_mz = [
            98.060040, 227.102633, 324.155397, 425.203076, 538.287140, 653.314083,
        ];
        check_within(&ions.ladder(Kind::B, 1).unwrap().mz, &expected_mz);
    }

    #[test]
    fn y_ions() {
        let ions = generate_ions("PEPTIDE").unwrap();
        // Ascending fragment index: y1 is the C-terminal residue alone
        let expected_mz = [
            148.060434, 263.087377, 376.171441, 477.219120, 574.271884, 703.314477,
        ];
        check_within(&ions.ladder(Kind::Y, 1).unwrap().mz, &expected_mz);
    }

    #[test]
    fn doubly_charged_y_ions() {
        let ions = generate_ions("PEPTIDE").unwrap();
        let expected_mz = [
            74.533855, 132.047327, 188.589359, 239.113198, 287.639580, 352.160877,
        ];
        check_within(&ions.ladder(Kind::Y, 2).unwrap().mz, &expected_mz);
    }

    #[test]
    fn ladder_lengths() {
        for seq in ["AG", "PEPTIDE", "LLLLLLLLLLLLLLLLLLLK"] {
            let ions = generate_ions(seq).unwrap();
            assert_eq!(ions.ladders.len(), 6);
            for ladder in &ions.ladders {
                assert_eq!(ladder.mz.len(), seq.len() - 1);
            }
        }
    }

    #[test]
    fn precursor_mass() {
        let ions = generate_ions("PEPTIDE").unwrap();
        assert!((ions.precursor_mass - 799.359964).abs() < 1e-5);
    }

    #[test]
    fn complementarity() {
        // b_mass[i] + y_mass[L-2-i] covers every residue exactly once
        let seq = "PEPTIDE";
        let masses = residue_masses(seq).unwrap();
        let total = masses.iter().sum::<f64>();
        let b = IonSeries::new(&masses, Kind::B).collect::<Vec<_>>();
        let y = IonSeries::new(&masses, Kind::Y).collect::<Vec<_>>();
        for i in 0..seq.len() - 1 {
            let neutral_sum =
                (b[i] - Kind::B.offset()) + (y[seq.len() - 2 - i] - Kind::Y.offset());
            assert!((neutral_sum - total).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_residue() {
        assert!(matches!(
            generate_ions("PEPTXDE"),
            Err(Error::UnknownResidue('X'))
        ));
    }

    #[test]
    fn too_short() {
        assert!(matches!(generate_ions("P"), Err(Error::SequenceTooShort(1))));
    }

    #[test]
    fn ion_codes() {
        assert_eq!(ion_code(Kind::B, 2, 1), "b2");
        assert_eq!(ion_code(Kind::Y, 3, 2), "y3^2");
        assert_eq!(parse_ion_code("b2"), Some((Kind::B, 2, 1)));
        assert_eq!(parse_ion_code("y12^3"), Some((Kind::Y, 12, 3)));
        assert_eq!(parse_ion_code("a4"), None);
        assert_eq!(parse_ion_code("y"), None);
        assert_eq!(parse_ion_code("y0"), None);
    }
}
