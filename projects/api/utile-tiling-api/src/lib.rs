#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod error;
pub mod surface;

pub use error::SurfaceError;
pub use surface::{
    copy_surface, detile_surface_allocating, load_surface, store_surface,
    tile_surface_allocating, SurfaceDescriptor,
};

// Re-export the core types surface callers need.
pub use utile_tiling::{BlockFormat, Region, ZsInterleave};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
