//! Errors reported by the layout engine and the area generators.

use std::error::Error;
use std::fmt;

/// An invalid engine configuration, rejected before any simulation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutConfigError {
    /// The epoch limit must be at least one.
    MaxEpochsOutOfRange {
        /// The rejected value.
        max_epochs: usize,
    },
    /// Each epoch must run at least one generation.
    GenerationsOutOfRange {
        /// The rejected value.
        generations: usize,
    },
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutConfigError::MaxEpochsOutOfRange { max_epochs } => {
                write!(f, "the epoch limit must be at least 1, got {max_epochs}")
            }
            LayoutConfigError::GenerationsOutOfRange { generations } => {
                write!(
                    f,
                    "each epoch must run at least 1 generation, got {generations}"
                )
            }
        }
    }
}

impl Error for LayoutConfigError {}

/// A failure to generate a set of areas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    /// No generated set of areas could be placed without overlaps within
    /// the allowed number of attempts.
    PlacementFailed {
        /// How many full generate-and-place attempts were made.
        attempts: usize,
    },
    /// The placement engine was misconfigured.
    Config(LayoutConfigError),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::PlacementFailed { attempts } => {
                write!(
                    f,
                    "could not generate a valid layout of areas in {attempts} attempts"
                )
            }
            GeneratorError::Config(err) => write!(f, "invalid placement configuration: {err}"),
        }
    }
}

impl Error for GeneratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeneratorError::Config(err) => Some(err),
            GeneratorError::PlacementFailed { .. } => None,
        }
    }
}

impl From<LayoutConfigError> for GeneratorError {
    fn from(err: LayoutConfigError) -> Self {
        GeneratorError::Config(err)
    }
}
