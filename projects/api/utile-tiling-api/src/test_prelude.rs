//! Common imports and helpers for the crate's test modules.
#![allow(unused_imports)]

extern crate alloc;

pub use alloc::vec;
pub use alloc::vec::Vec;

pub use rstest::rstest;

pub use crate::error::SurfaceError;
pub use crate::surface::*;
pub use utile_tiling::{BlockFormat, Region, ZsInterleave};

/// Fills a buffer with a deterministic pseudo-random byte pattern.
pub(crate) fn fill_pattern(buf: &mut [u8], mut seed: u32) {
    for byte in buf.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *byte = (seed >> 24) as u8;
    }
}
