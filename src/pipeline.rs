use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::ion_series::generate_ions;
use crate::matching::{accepted_codes, l2_normalize, match_ions, IntensityMap};
use crate::scoring::{coverage, spectral_angle, Coverage};
use crate::spectrum::ObservedSpectrum;
use crate::Error;

/// Parse an externally supplied predicted-intensity map from its JSON
/// object representation (`{"y3^2": 0.12, ...}`)
pub fn intensity_map_from_json(s: &str) -> Result<IntensityMap, Error> {
    Ok(serde_json::from_str(s)?)
}

/// Fold flip-boundary evidence into the matched map's reference frame:
/// `new / (existing_l2_norm + new)`. Zero when there is no evidence at all.
pub fn composed_new_intensity(new: f64, existing_l2_norm: f64) -> f64 {
    let denominator = existing_l2_norm + new;
    if denominator > 0.0 {
        new / denominator
    } else {
        0.0
    }
}

/// One (sequence, observed spectrum, predicted spectrum) row to score
#[derive(Clone, Debug)]
pub struct ScoreRequest<'a> {
    pub sequence: &'a str,
    pub spectrum: &'a ObservedSpectrum,
    pub predicted: &'a IntensityMap,
    /// Match tolerance in Da
    pub tolerance: f64,
}

/// Per-row scoring output. `None` marks "could not compute" - never
/// substituted with zero, since zero is a valid, distinct score.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RowScore {
    pub matched: Option<IntensityMap>,
    /// Pre-normalization L2 norm of the matched map
    pub l2_norm: Option<f64>,
    pub spectral_angle: Option<f64>,
    pub coverage: Option<Coverage>,
}

/// Score a single row. Failures stay local: an unscoreable stage leaves its
/// fields `None` and downstream fields that depend on it `None` as well.
pub fn score_row(request: &ScoreRequest<'_>) -> RowScore {
    let mut row = RowScore::default();

    let ions = match generate_ions(request.sequence) {
        Ok(ions) => ions,
        Err(e) => {
            warn!("cannot fragment {}: {}", request.sequence, e);
            return row;
        }
    };

    let accepted = accepted_codes(request.predicted);
    let mut matched = match match_ions(&ions, &accepted, request.spectrum, request.tolerance) {
        Ok(matched) => matched,
        Err(e) => {
            warn!("no matched map for {}: {}", request.sequence, e);
            return row;
        }
    };

    row.l2_norm = Some(l2_normalize(&mut matched));
    row.coverage = Some(coverage(&matched, request.sequence.chars().count()));

    match spectral_angle(&matched, request.predicted, None) {
        Ok(angle) => row.spectral_angle = Some(angle),
        Err(e) => warn!("no spectral angle for {}: {}", request.sequence, e),
    }

    row.matched = Some(matched);
    row
}

/// Score a batch of rows in parallel. Rows are independent pure
/// computations, so this is a straight data-parallel map; a failed row never
/// aborts the batch.
pub fn score_rows(rows: &[ScoreRequest<'_>]) -> Vec<RowScore> {
    rows.par_iter().map(score_row).collect()
}
