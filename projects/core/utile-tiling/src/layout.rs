//! Size and stride math for tiled and linear buffers.
//!
//! The safe wrappers use these to validate buffer capacities; callers can
//! use them to size allocations and pick strides.

use crate::format::{BlockFormat, Region, ZsInterleave};

/// Size in bytes of one tile of the given format.
pub const fn tile_size_bytes(format: BlockFormat) -> usize {
    format.bytes_per_block() << (2 * format.tile_shift())
}

/// Pixel size in bytes on the linear side of a transfer.
///
/// Equal to the block size except for [`ZsInterleave::Stencil`], where the
/// linear image is tightly packed S8.
pub const fn linear_pixel_size(format: BlockFormat, interleave: ZsInterleave) -> usize {
    match interleave {
        ZsInterleave::Stencil => 1,
        _ => format.bytes_per_block(),
    }
}

/// Minimum byte distance between adjacent rows of tiles for an image of
/// the given pixel width.
pub fn tiled_row_stride_bytes(format: BlockFormat, width_px: usize) -> usize {
    let width_bl = width_px.div_ceil(format.block_width as usize);
    let tiles_across = width_bl.div_ceil(format.tile_extent_blocks());
    tiles_across * tile_size_bytes(format)
}

/// Minimum size in bytes of a tiled image, using the minimum tile-row
/// stride.
pub fn tiled_size_bytes(format: BlockFormat, width_px: usize, height_px: usize) -> usize {
    let height_bl = height_px.div_ceil(format.block_height as usize);
    let tile_rows = height_bl.div_ceil(format.tile_extent_blocks());
    tile_rows * tiled_row_stride_bytes(format, width_px)
}

/// Minimum byte distance between adjacent rows of a linear image of the
/// given pixel width.
pub fn linear_row_stride_bytes(
    format: BlockFormat,
    width_px: usize,
    interleave: ZsInterleave,
) -> usize {
    width_px.div_ceil(format.block_width as usize) * linear_pixel_size(format, interleave)
}

/// Minimum size in bytes of a linear image, using the minimum row stride.
pub fn linear_size_bytes(
    format: BlockFormat,
    width_px: usize,
    height_px: usize,
    interleave: ZsInterleave,
) -> usize {
    let height_bl = height_px.div_ceil(format.block_height as usize);
    height_bl * linear_row_stride_bytes(format, width_px, interleave)
}

/// Number of bytes a tiled buffer must hold for an access to `region` with
/// the given tile-row stride. Returns the one-past-the-end offset of the
/// last tile touched.
pub fn tiled_region_required_bytes(
    format: BlockFormat,
    region: Region,
    tiled_stride: usize,
) -> usize {
    if region.is_empty() {
        return 0;
    }
    let shift = format.tile_shift();
    let end_x_bl = (region.x + region.width).div_ceil(format.block_width as usize);
    let end_y_bl = (region.y + region.height).div_ceil(format.block_height as usize);
    let last_tile_row = (end_y_bl - 1) >> shift;
    let last_tile_col = (end_x_bl - 1) >> shift;
    last_tile_row * tiled_stride + (last_tile_col + 1) * tile_size_bytes(format)
}

/// Number of bytes a linear buffer must hold for an access to a
/// `width x height` pixel region with the given row stride.
pub fn linear_region_required_bytes(
    format: BlockFormat,
    width_px: usize,
    height_px: usize,
    linear_stride: usize,
    interleave: ZsInterleave,
) -> usize {
    if width_px == 0 || height_px == 0 {
        return 0;
    }
    let w_bl = width_px.div_ceil(format.block_width as usize);
    let h_bl = height_px.div_ceil(format.block_height as usize);
    (h_bl - 1) * linear_stride + w_bl * linear_pixel_size(format, interleave)
}
