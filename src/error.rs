//! Error kinds raised at the boundary of table construction and error computation.

use thiserror::Error;

/// Errors that can occur while building an index or computing an error field.
///
/// Public operations return [`anyhow::Result`]; use `downcast_ref::<RtinError>()` to tell the kinds apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RtinError {
    /// `grid_size - 1` is not a power of two, or the grid is smaller than 3x3.
    #[error("Expected grid size to be 2^n+1 with n >= 1, got {grid_size}")]
    InvalidGridSize { grid_size: usize },

    /// The heightfield does not hold exactly `grid_size²` elevations.
    #[error("Expected terrain data of length {expected}, got {actual}")]
    TerrainLengthMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RtinError::InvalidGridSize { grid_size: 512 };
        assert_eq!(
            format!("{err}"),
            "Expected grid size to be 2^n+1 with n >= 1, got 512"
        );

        let err = RtinError::TerrainLengthMismatch {
            expected: 25,
            actual: 24,
        };
        assert!(format!("{err}").contains("25"));
        assert!(format!("{err}").contains("24"));
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = RtinError::InvalidGridSize { grid_size: 4 }.into();
        assert_eq!(
            err.downcast_ref::<RtinError>(),
            Some(&RtinError::InvalidGridSize { grid_size: 4 })
        );
    }
}
