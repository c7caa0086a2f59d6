//! Fast kernel for tile-aligned accesses of power-of-two pixel sizes.

use crate::lut::{BIT_DUPLICATION, SPACE_4};
use crate::pixel::transfer_pixel;
use crate::PIXELS_PER_TILE;

/// Transfers a region between a tiled image and a linear buffer, with the
/// starting X tile-aligned.
///
/// `tiled_base` precomputes the offset of the first horizontal tile being
/// accessed: `sx` is 16-aligned, tiles are stored linearly, so the X tile
/// number shifted out of `sx` times the bytes per tile lands on the tile's
/// first byte.
///
/// For each destination row we slice the low 4 bits off `y` to find which
/// row of 16x16 tiles we are in; multiplying by the tile-row stride gives
/// the byte offset of that tile row. Within a row the index along the
/// space-filling curve is `BIT_DUPLICATION[y & 15] ^ SPACE_4[x & 15]`,
/// scaled by the pixel size. The Y half is constant across the row, so it
/// is looked up once per row; the inner loop then walks the linear side in
/// 16-pixel tile segments using only a table lookup, an XOR and a
/// specialized pixel copy.
///
/// # Safety
///
/// - `tiled` must be valid for the tiled extent of the region
///   (`sx..sx+w`, `sy..sy+h` at `tiled_stride` bytes per tile row).
/// - `linear` must be valid for `h` rows of `w` pixels at `linear_stride`
///   bytes per row.
/// - `sx` and `w` must be multiples of 16 and `TILED_BYTES` a power of
///   two.
#[inline(always)]
pub(crate) unsafe fn access_aligned<
    const TILED_BYTES: usize,
    const LINEAR_BYTES: usize,
    const ZS: u8,
    const IS_STORE: bool,
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
    debug_assert!(TILED_BYTES.is_power_of_two());
    debug_assert!(sx % 16 == 0 && w % 16 == 0);

    let shift = TILED_BYTES.trailing_zeros();
    let tiled_base = tiled.add((sx >> 4) * PIXELS_PER_TILE * TILED_BYTES);

    for row in 0..h {
        let y = sy + row;
        let mut tile = tiled_base.add((y >> 4) * tiled_stride);
        let mut source = linear.add(row * linear_stride);
        let source_end = source.add(w * LINEAR_BYTES);
        let expanded_y = (BIT_DUPLICATION[y & 0xF] as usize) << shift;

        while source < source_end {
            for i in 0..16 {
                let index = expanded_y ^ ((SPACE_4[i] as usize) << shift);
                transfer_pixel::<TILED_BYTES, ZS, IS_STORE>(tile.add(index), source);
                source = source.add(LINEAR_BYTES);
            }
            tile = tile.add(PIXELS_PER_TILE << shift);
        }
    }
}
