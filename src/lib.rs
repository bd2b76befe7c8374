pub mod features;
pub mod flip;
pub mod ion_series;
pub mod mass;
pub mod matching;
pub mod pipeline;
pub mod scoring;
pub mod spectrum;

#[derive(Debug)]
pub enum Error {
    /// A residue code absent from the monoisotopic mass table
    UnknownResidue(char),
    /// Fragmentation needs at least one break point (L >= 2)
    SequenceTooShort(usize),
    /// The observed spectrum has no peaks to match against
    EmptySpectrum,
    /// m/z and intensity arrays differ in length
    MismatchedPeakArrays { mz: usize, intensity: usize },
    /// A flip boundary index outside 1..sequence_length
    MalformedBoundary { boundary: usize, length: usize },
    /// Numeric domain violation in the arccosine step - "no score", not 0 or 1
    UndefinedSimilarity,
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownResidue(c) => write!(f, "unknown residue code: {}", c),
            Self::SequenceTooShort(len) => {
                write!(f, "sequence of length {} has no fragmentation sites", len)
            }
            Self::EmptySpectrum => f.write_str("observed spectrum contains no peaks"),
            Self::MismatchedPeakArrays { mz, intensity } => write!(
                f,
                "m/z and intensity arrays differ in length: {} vs {}",
                mz, intensity
            ),
            Self::MalformedBoundary { boundary, length } => write!(
                f,
                "flip boundary {} is not an interior position of a length-{} sequence",
                boundary, length
            ),
            Self::UndefinedSimilarity => {
                f.write_str("spectral angle is undefined for this input")
            }
            Self::Json(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
