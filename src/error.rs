use thiserror::Error;

/// Errors from spatial index operations.
///
/// Every variant is a caller-input error raised before any traversal starts,
/// so a failed call never leaves the index partially modified.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KdTreeError {
    /// A point argument has a NaN or infinite coordinate.
    #[error("invalid point ({x}, {y}): coordinates must be finite")]
    InvalidPoint { x: f64, y: f64 },

    /// A rectangle argument has a NaN bound or min > max on some axis.
    #[error("invalid rectangle {min:?}..{max:?}: bounds must not be NaN and min must not exceed max")]
    InvalidRectangle { min: [f64; 2], max: [f64; 2] },
}

/// Result type for spatial index operations.
pub type Result<T> = std::result::Result<T, KdTreeError>;
