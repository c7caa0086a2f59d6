//! Generic kernel for unaligned regions and arbitrary block sizes.
//!
//! Works one block at a time with direct shift/mask arithmetic instead of
//! precomputed tile-row bases, trading throughput for generality. All
//! coordinates here are in block units; `TILE_SHIFT` is 4 for uncompressed
//! formats (16x16-block tiles) and 2 for block-compressed ones (4x4-block
//! tiles).

use crate::lut::{BIT_DUPLICATION, SPACE_4};
use crate::pixel::{transfer_pixel, transfer_pixel_any};

/// Transfers an arbitrary region between a tiled image and a linear
/// buffer, one block at a time.
///
/// # Safety
///
/// - `tiled` must be valid for the tiled extent of the region.
/// - `linear` must be valid for `h` rows of `w` blocks at `linear_stride`
///   bytes per row.
#[inline(always)]
pub(crate) unsafe fn access_unaligned<
    const TILED_BYTES: usize,
    const LINEAR_BYTES: usize,
    const ZS: u8,
    const IS_STORE: bool,
    const TILE_SHIFT: u32,
>(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
) {
    let mask = (1usize << TILE_SHIFT) - 1;

    for row in 0..h {
        let y = sy + row;
        let tile_row = (y >> TILE_SHIFT) * tiled_stride;
        let source_row = row * linear_stride;
        let expanded_y = BIT_DUPLICATION[y & mask] as usize;

        for col in 0..w {
            let x = sx + col;
            let tile_col = (x >> TILE_SHIFT) << (TILE_SHIFT * 2);
            let index = expanded_y ^ SPACE_4[x & mask] as usize;
            let source = linear.add(source_row + LINEAR_BYTES * col);
            let dest = tiled.add(tile_row + TILED_BYTES * (tile_col + index));
            transfer_pixel::<TILED_BYTES, ZS, IS_STORE>(dest, source);
        }
    }
}

/// Runtime-sized fallback for block sizes outside the specialized set.
/// Same traversal as [`access_unaligned`], interleaving not supported.
///
/// # Safety
///
/// Same as [`access_unaligned`], with `bytes` as the block size on both
/// sides.
pub(crate) unsafe fn access_unaligned_any<const IS_STORE: bool, const TILE_SHIFT: u32>(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    bytes: usize,
) {
    let mask = (1usize << TILE_SHIFT) - 1;

    for row in 0..h {
        let y = sy + row;
        let tile_row = (y >> TILE_SHIFT) * tiled_stride;
        let source_row = row * linear_stride;
        let expanded_y = BIT_DUPLICATION[y & mask] as usize;

        for col in 0..w {
            let x = sx + col;
            let tile_col = (x >> TILE_SHIFT) << (TILE_SHIFT * 2);
            let index = expanded_y ^ SPACE_4[x & mask] as usize;
            let source = linear.add(source_row + bytes * col);
            let dest = tiled.add(tile_row + bytes * (tile_col + index));
            transfer_pixel_any::<IS_STORE>(dest, source, bytes);
        }
    }
}
