#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod allocate;
pub mod format;
pub mod layout;
pub mod safe;

pub(crate) mod lut;
pub(crate) mod pixel;

mod access;

// Re-export main types and functions at the crate root
pub use access::{copy_tiled, load_tiled, store_tiled};
pub use format::{BlockFormat, Region, ZsInterleave};
pub use safe::{
    copy_tiled_slice, load_tiled_slice, store_tiled_slice, TilingError, TilingValidationError,
};

/// Width in pixels of a tile of an uncompressed format.
///
/// Block-compressed formats use 4x4-block tiles instead, which cover the
/// same 16x16 pixels for the common 4x4 block sizes.
pub const TILE_WIDTH: usize = 16;

/// Height in pixels of a tile of an uncompressed format.
pub const TILE_HEIGHT: usize = 16;

/// Number of pixels stored inside one tile of an uncompressed format.
pub const PIXELS_PER_TILE: usize = TILE_WIDTH * TILE_HEIGHT;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
