//! Common imports and helpers for the crate's test modules.
#![allow(unused_imports)]

extern crate alloc;

pub use alloc::vec;
pub use alloc::vec::Vec;

pub use rstest::rstest;

pub use crate::format::{BlockFormat, Region, ZsInterleave};
pub use crate::{copy_tiled, load_tiled, store_tiled};
pub use crate::{PIXELS_PER_TILE, TILE_HEIGHT, TILE_WIDTH};

/// Fills a buffer with a deterministic pseudo-random byte pattern.
pub(crate) fn fill_pattern(buf: &mut [u8], mut seed: u32) {
    for byte in buf.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *byte = (seed >> 24) as u8;
    }
}

/// Tile-internal index of `(x, y)`, built bit by bit from the curve's
/// definition rather than the lookup tables.
pub(crate) fn naive_tile_index(x: usize, y: usize) -> usize {
    let mut index = 0;
    for bit in 0..4 {
        let xb = (x >> bit) & 1;
        let yb = (y >> bit) & 1;
        index |= yb << (2 * bit + 1);
        index |= (xb ^ yb) << (2 * bit);
    }
    index
}

/// Byte offset of pixel `(x, y)` in an uncompressed tiled image, straight
/// from the addressing law.
pub(crate) fn naive_tiled_offset(x: usize, y: usize, bytes: usize, tiled_stride: usize) -> usize {
    (y >> 4) * tiled_stride
        + (x >> 4) * PIXELS_PER_TILE * bytes
        + naive_tile_index(x & 0xF, y & 0xF) * bytes
}
