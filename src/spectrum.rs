use serde::{Deserialize, Serialize};

use crate::Error;

/// A single observed MS2 peak
#[derive(PartialEq, PartialOrd, Copy, Clone, Default, Debug, Serialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

/// One observed MS2 scan: parallel m/z and intensity arrays.
///
/// Peaks are stored exactly as supplied - no sorting, filtering, or
/// deisotoping. The matcher's nearest-neighbor search does not assume any
/// m/z order.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ObservedSpectrum {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl ObservedSpectrum {
    pub fn new(mz: Vec<f64>, intensity: Vec<f64>) -> Result<Self, Error> {
        if mz.len() != intensity.len() {
            return Err(Error::MismatchedPeakArrays {
                mz: mz.len(),
                intensity: intensity.len(),
            });
        }
        Ok(Self { mz, intensity })
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Linear scan for the observed peak closest to `mz`.
    ///
    /// Every peak is examined (argmin over the full array); `None` only for
    /// an empty spectrum. Exact-distance ties resolve to the earlier peak,
    /// the argmin convention.
    pub fn nearest_peak(&self, mz: f64) -> Option<Peak> {
        let mut best = None;
        let mut min_eps = f64::MAX;
        for (&peak_mz, &intensity) in self.mz.iter().zip(self.intensity.iter()) {
            let eps = (peak_mz - mz).abs();
            if eps < min_eps {
                min_eps = eps;
                best = Some(Peak {
                    mz: peak_mz,
                    intensity,
                });
            }
        }
        best
    }
}
