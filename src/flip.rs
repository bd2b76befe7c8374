use rand::seq::SliceRandom;
use rand::Rng;

use crate::Error;

/// Swap the two residues flanking a 1-based boundary index, producing the
/// flipped sequence used to probe predictor sensitivity to local order.
pub fn flip_at(sequence: &str, boundary: usize) -> Result<String, Error> {
    let mut residues = sequence.chars().collect::<Vec<_>>();
    let length = residues.len();
    if boundary == 0 || boundary >= length {
        return Err(Error::MalformedBoundary { boundary, length });
    }
    residues.swap(boundary - 1, boundary);
    Ok(residues.into_iter().collect())
}

/// Draw `n_flips` interior boundaries at random, then discard any whose
/// flanking residues are identical (swapping those leaves the sequence
/// unchanged). Discarded draws are not replaced, so fewer than `n_flips`
/// boundaries may come back even when the sequence has enough usable ones.
pub fn sample_flip_boundaries<R: Rng + ?Sized>(
    sequence: &str,
    n_flips: usize,
    rng: &mut R,
) -> Vec<usize> {
    let residues = sequence.chars().collect::<Vec<_>>();
    let mut boundaries = (1..residues.len()).collect::<Vec<_>>();
    boundaries.shuffle(rng);
    boundaries.truncate(n_flips);
    boundaries.retain(|&b| residues[b - 1] != residues[b]);
    boundaries
}
