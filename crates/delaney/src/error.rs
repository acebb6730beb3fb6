//! Error type shared by the chamber-system checks, the search and the generators.

use std::fmt;

/// Everything that can go wrong before a search starts.
///
/// Rejected branching vectors are never errors; they are filtered silently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DsError {
    /// Wrong number of index functions, wrong row length or an empty set.
    InvalidShape { reason: String },
    /// Index function `index` maps `chamber` outside `[1, size]`.
    OutOfRange {
        index: usize,
        chamber: usize,
        image: usize,
    },
    /// Index function `index` is not an involution at `chamber`.
    NotAnInvolution {
        index: usize,
        chamber: usize,
        image: usize,
    },
    /// A chamber automorphism split an orbit across several target orbits.
    /// Indicates a bug in the finder, not bad input.
    InconsistentOrbitMap { orbit: usize },
    /// Generator parameters out of range.
    InvalidParams { reason: String },
    /// A generator ran out of attempts.
    DegenerateSample { reason: String },
}

impl DsError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { reason } => write!(f, "malformed chamber system: {reason}"),
            Self::OutOfRange {
                index,
                chamber,
                image,
            } => write!(
                f,
                "index function {index} maps chamber {chamber} to {image}, outside the chamber range"
            ),
            Self::NotAnInvolution {
                index,
                chamber,
                image,
            } => write!(
                f,
                "index function {index} is not an involution: {chamber} -> {image} does not map back"
            ),
            Self::InconsistentOrbitMap { orbit } => {
                write!(f, "internal error: automorphism splits orbit {orbit}")
            }
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for DsError {}
