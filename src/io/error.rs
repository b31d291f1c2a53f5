//! Error taxonomy for catalogue, region and search operations

use crate::spatial::cells::Cell;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all cover operations
///
/// Configuration errors are raised before any search starts. Invariant
/// violations indicate a defect in matrix construction or translation and
/// are never expected on valid input. An empty search result is not an
/// error.
#[derive(Debug)]
pub enum CoverError {
    /// A piece's base perimeter is unusable
    InvalidShape {
        /// Name of the offending piece
        name: String,
        /// What is wrong with the perimeter
        reason: String,
    },

    /// The target region is unusable
    InvalidRegion {
        /// What is wrong with the region
        reason: String,
    },

    /// A piece has no placement inside the region
    UnplaceablePiece {
        /// Piece key with zero placements
        piece: String,
    },

    /// A region cell is not covered by any placement
    UncoverableCell {
        /// First cell without a covering placement
        cell: Cell,
    },

    /// A clue starts outside the region
    ClueOutsideRegion {
        /// Piece named by the clue
        piece: String,
        /// Start cell of the clue
        cell: Cell,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal bookkeeping invariant broken
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the broken invariant
        reason: String,
    },

    /// Failed to save a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl CoverError {
    /// Test whether the error rejects the problem setup before searching
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. }
                | Self::InvalidRegion { .. }
                | Self::UnplaceablePiece { .. }
                | Self::UncoverableCell { .. }
                | Self::ClueOutsideRegion { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Test whether the error reports a broken internal invariant
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { name, reason } => {
                write!(f, "Invalid shape '{name}': {reason}")
            }
            Self::InvalidRegion { reason } => {
                write!(f, "Invalid region: {reason}")
            }
            Self::UnplaceablePiece { piece } => {
                write!(f, "Piece '{piece}' has no placement inside the region")
            }
            Self::UncoverableCell { cell } => {
                write!(f, "No placement covers {cell}")
            }
            Self::ClueOutsideRegion { piece, cell } => {
                write!(f, "Clue for '{piece}' starts outside the region at {cell}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CoverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for cover results
pub type Result<T> = std::result::Result<T, CoverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CoverError {
    CoverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> CoverError {
    CoverError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}
