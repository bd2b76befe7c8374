use fnv::{FnvHashMap, FnvHashSet};

use crate::ion_series::{ion_code, TheoreticalIons};
use crate::spectrum::ObservedSpectrum;
use crate::Error;

/// Sparse named-intensity vector keyed by ion code (`"y3^2"` etc.)
pub type IntensityMap = FnvHashMap<String, f64>;

/// Ion codes a comparison partner actually reports
pub type IonCodeSet = FnvHashSet<String>;

/// The key set of a predicted intensity map, for use as the matcher's
/// accepted-code filter
pub fn accepted_codes(predicted: &IntensityMap) -> IonCodeSet {
    predicted.keys().cloned().collect()
}

/// Match theoretical ions against an observed spectrum.
///
/// For every theoretical m/z the single nearest observed peak is located by
/// scanning all peaks; the match is accepted only if the residual is strictly
/// below `tolerance` (Da) and the derived ion code appears in `accepted`.
///
/// A single observed peak may be claimed by several distinct ion codes; no
/// exclusivity is enforced across claims. Insertions are keyed by ion code,
/// so only repeated claims of the *same* code overwrite.
pub fn match_ions(
    ions: &TheoreticalIons,
    accepted: &IonCodeSet,
    spectrum: &ObservedSpectrum,
    tolerance: f64,
) -> Result<IntensityMap, Error> {
    if spectrum.is_empty() {
        return Err(Error::EmptySpectrum);
    }

    let mut matched = IntensityMap::default();
    for ladder in &ions.ladders {
        for (idx, &mz) in ladder.mz.iter().enumerate() {
            let peak = spectrum
                .nearest_peak(mz)
                .ok_or(Error::EmptySpectrum)?;
            if (peak.mz - mz).abs() < tolerance {
                let code = ion_code(ladder.kind, idx + 1, ladder.charge);
                if accepted.contains(&code) {
                    matched.insert(code, peak.intensity);
                }
            }
        }
    }
    Ok(matched)
}

/// L2 norm over the map's values
pub fn l2_norm(map: &IntensityMap) -> f64 {
    map.values().map(|v| v * v).sum::<f64>().sqrt()
}

/// Scale the map to unit L2 norm in place, returning the pre-normalization
/// norm. A zero-norm map (empty, or all zeros) is left untouched and 0.0 is
/// returned - the caller uses the returned norm to fold further evidence
/// into the same reference frame without recomputing it.
pub fn l2_normalize(map: &mut IntensityMap) -> f64 {
    let norm = l2_norm(map);
    if norm > 0.0 {
        for value in map.values_mut() {
            *value /= norm;
        }
    }
    norm
}
