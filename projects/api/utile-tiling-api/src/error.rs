//! Error types for surface-level operations.

use thiserror::Error;
use utile_tiling::allocate::AllocateError;
use utile_tiling::{TilingError, TilingValidationError};

/// Errors returned by surface-level tiling operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The requested region extends outside the surface.
    #[error("region ({x}, {y}) {width}x{height} exceeds the {surface_width}x{surface_height} surface")]
    RegionOutOfBounds {
        /// Region origin X in pixels.
        x: usize,
        /// Region origin Y in pixels.
        y: usize,
        /// Region width in pixels.
        width: usize,
        /// Region height in pixels.
        height: usize,
        /// Surface width in pixels.
        surface_width: usize,
        /// Surface height in pixels.
        surface_height: usize,
    },

    /// Source and destination surfaces of a copy have different formats.
    #[error("source and destination surface formats differ")]
    FormatMismatch,

    /// Parameter validation in the tiling core failed.
    #[error(transparent)]
    Validation(#[from] TilingValidationError),

    /// Allocating a staging or output buffer failed.
    #[error(transparent)]
    Allocation(#[from] AllocateError),
}

impl From<TilingError> for SurfaceError {
    fn from(err: TilingError) -> Self {
        match err {
            TilingError::Validation(err) => Self::Validation(err),
            TilingError::Allocation(err) => Self::Allocation(err),
        }
    }
}
