use fnv::FnvHashSet;
use serde::Serialize;

use crate::ion_series::{parse_ion_code, residue_masses};
use crate::mass::{Kind, PROTON};
use crate::matching::{l2_norm, IntensityMap};
use crate::spectrum::ObservedSpectrum;
use crate::Error;

/// Normalized dot product between two named-intensity vectors, clamped to
/// [0, 1]. Only keys present in `truth` contribute; absent predicted keys
/// count as zero. Two zero-norm vectors are defined as orthogonal (0.0).
fn normed_dot_product(truth: &IntensityMap, predicted: &IntensityMap) -> f64 {
    let true_norm = l2_norm(truth);
    let pred_norm = l2_norm(predicted);

    if true_norm == 0.0 && pred_norm == 0.0 {
        return 0.0;
    }

    let mut product = truth
        .iter()
        .map(|(code, value)| value * predicted.get(code).copied().unwrap_or(0.0))
        .sum::<f64>();

    let norm_product = true_norm * pred_norm;
    if norm_product > 0.0 {
        product /= norm_product;
    }
    product.clamp(0.0, 1.0)
}

/// Bounded spectral angle between a matched (true) and predicted intensity
/// map: 1.0 for identical direction, 0.0 for orthogonal or degenerate.
///
/// `prefix` restricts both maps to ion codes starting with it (e.g. `"b"`)
/// before scoring. A numerically undefined cosine is an error, never a
/// default - 0.0 and 1.0 are both meaningful scores and must not stand in
/// for "could not compute".
pub fn spectral_angle(
    truth: &IntensityMap,
    predicted: &IntensityMap,
    prefix: Option<&str>,
) -> Result<f64, Error> {
    let product = match prefix {
        Some(prefix) => {
            let restrict = |map: &IntensityMap| -> IntensityMap {
                map.iter()
                    .filter(|(code, _)| code.starts_with(prefix))
                    .map(|(code, value)| (code.clone(), *value))
                    .collect()
            };
            normed_dot_product(&restrict(truth), &restrict(predicted))
        }
        None => normed_dot_product(truth, predicted),
    };

    if product.is_nan() {
        return Err(Error::UndefinedSimilarity);
    }
    Ok(1.0 - 2.0 * product.acos() / std::f64::consts::PI)
}

/// Summary of how much of the theoretical fragment ladder found evidence
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Coverage {
    /// Matched ion codes over total fragmentation positions (L - 1),
    /// capped at 1.0: several charge states of one position count toward
    /// the numerator but cannot push the fraction past full coverage
    pub matched_fraction: f64,
    /// Distinct backbone positions confirmed by either series, over L - 1.
    /// A position confirmed by several charge states counts once.
    pub position_coverage: f64,
}

pub fn coverage(matched: &IntensityMap, sequence_length: usize) -> Coverage {
    let n_fragments = sequence_length.saturating_sub(1);
    if n_fragments == 0 {
        return Coverage {
            matched_fraction: 0.0,
            position_coverage: 0.0,
        };
    }

    let mut positions = FnvHashSet::default();
    for code in matched.keys() {
        let (kind, position, _) = match parse_ion_code(code) {
            Some(parsed) => parsed,
            None => continue,
        };
        // y indices count from the C terminus; mirror onto the backbone
        let backbone = match kind {
            Kind::B => position,
            Kind::Y => match sequence_length.checked_sub(position) {
                Some(p) => p,
                None => continue,
            },
        };
        positions.insert(backbone);
    }

    Coverage {
        matched_fraction: (matched.len() as f64 / n_fragments as f64).min(1.0),
        position_coverage: positions.len() as f64 / n_fragments as f64,
    }
}

/// Observed intensity appearing at the new fragmentation boundary created by
/// a residue flip.
///
/// `sequence` is the flipped sequence and `boundary` the 1-based index of
/// the bond between the swapped residues. The two halves are summed directly
/// (only fragment totals are needed, not per-position ladders) and each
/// candidate charge in `1..min(4, precursor_charge + 1)` is checked against
/// the nearest observed peak under `tolerance` - a tighter window than the
/// full-spectrum matcher, since this probes one specific new bond. Returns
/// the accumulated (b_side, y_side) intensities, unnormalized; scaling into
/// the matched map's reference frame is the caller's job.
pub fn flip_new_intensity(
    sequence: &str,
    boundary: usize,
    spectrum: &ObservedSpectrum,
    precursor_charge: u8,
    tolerance: f64,
) -> Result<(f64, f64), Error> {
    let length = sequence.len();
    if boundary == 0 || boundary >= length {
        return Err(Error::MalformedBoundary { boundary, length });
    }
    if spectrum.is_empty() {
        return Err(Error::EmptySpectrum);
    }

    let masses = residue_masses(sequence)?;
    let b_mass = masses[..boundary].iter().sum::<f64>();
    let y_mass = masses[boundary..].iter().sum::<f64>();

    let mut b_new = 0.0;
    let mut y_new = 0.0;
    let max_charge = precursor_charge.saturating_add(1).min(4);
    for charge in 1..max_charge {
        let z = charge as f64;
        for (mass, kind, acc) in [
            (b_mass, Kind::B, &mut b_new),
            (y_mass, Kind::Y, &mut y_new),
        ] {
            let mz = (kind.offset() + mass + z * PROTON) / z;
            if let Some(peak) = spectrum.nearest_peak(mz) {
                if (peak.mz - mz).abs() < tolerance {
                    *acc += peak.intensity;
                }
            }
        }
    }
    Ok((b_new, y_new))
}
