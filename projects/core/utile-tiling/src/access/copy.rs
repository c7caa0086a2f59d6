//! Tiled-to-tiled region copies.

use super::{load_tiled, store_tiled};
use crate::allocate::{allocate_align_64, AllocateError};
use crate::format::{BlockFormat, ZsInterleave};
use crate::layout::tile_size_bytes;
use core::ptr::copy_nonoverlapping;

/// Default staging buffer size for the chunked copy path. Small enough to
/// stay in L1/L2 while a chunk is retiled; grown when a single tile does
/// not fit.
const CHUNK_SIZE_B: usize = 65536;

/// Copies a pixel region between two tiled images of the same format.
///
/// When both regions sit on tile boundaries the copy is straight memcpys
/// of whole tiles. Otherwise the region is staged through a bounded linear
/// buffer, detiling chunks of the source and retiling them into the
/// destination; allocation failure of that buffer is the only error.
///
/// # Safety
///
/// - `dst` and `src` must be valid for the tiled extents of their regions
///   (see [`crate::layout::tiled_region_required_bytes`]) and must not
///   overlap.
/// - Coordinates and dimensions must be aligned to the format's block
///   size; strides must be multiples of the block byte size.
#[allow(clippy::too_many_arguments)]
pub unsafe fn copy_tiled(
    dst: *mut u8,
    src: *const u8,
    dst_x: usize,
    dst_y: usize,
    src_x: usize,
    src_y: usize,
    w: usize,
    h: usize,
    dst_stride: usize,
    src_stride: usize,
    format: BlockFormat,
) -> Result<(), AllocateError> {
    if w == 0 || h == 0 {
        return Ok(());
    }

    let block_bytes = format.bytes_per_block();
    let bw = format.block_width as usize;
    let bh = format.block_height as usize;
    let tile_extent = format.tile_extent_blocks();
    let tile_px_w = tile_extent * bw;
    let tile_px_h = tile_extent * bh;
    let tile_size = tile_size_bytes(format);

    // Tile contents do not depend on the tile's position, so when both
    // regions are tile-aligned whole tiles can be copied verbatim.
    if src_x % tile_px_w == 0
        && src_y % tile_px_h == 0
        && dst_x % tile_px_w == 0
        && dst_y % tile_px_h == 0
        && w % tile_px_w == 0
        && h % tile_px_h == 0
    {
        let width_tl = w / tile_px_w;
        let src_x_tl = src_x / tile_px_w;
        let src_y_tl = src_y / tile_px_h;
        let dst_x_tl = dst_x / tile_px_w;
        let dst_y_tl = dst_y / tile_px_h;

        for row_tl in 0..h / tile_px_h {
            let src_row = src.add((src_y_tl + row_tl) * src_stride + src_x_tl * tile_size);
            let dst_row = dst.add((dst_y_tl + row_tl) * dst_stride + dst_x_tl * tile_size);
            copy_nonoverlapping(src_row, dst_row, width_tl * tile_size);
        }
        return Ok(());
    }

    // Blocks beyond 256 bytes make a single tile larger than the default
    // budget; the staging buffer always holds at least one tile.
    let chunk_bytes = CHUNK_SIZE_B.max(tile_size);
    let mut chunk = allocate_align_64(chunk_bytes)?;

    // Chunk dimensions in blocks: near-square, rounded down to whole tiles
    // so the detile side of each chunk stays tile-aligned where possible.
    let chunk_blocks = chunk_bytes / block_bytes;
    let chunk_width_bl = (chunk_blocks.isqrt() / tile_extent) * tile_extent;
    let chunk_height_bl = ((chunk_blocks / chunk_width_bl) / tile_extent) * tile_extent;
    debug_assert!(chunk_width_bl >= tile_extent && chunk_height_bl >= tile_extent);

    let chunk_width_px = chunk_width_bl * bw;
    let chunk_height_px = chunk_height_bl * bh;
    let chunk_stride = chunk_width_bl * block_bytes;

    // The chunk grid is anchored on the source's tile grid; alignment
    // cannot hold on both sides at once, and the load is the scatter-heavy
    // half.
    let grid_x = (src_x / tile_px_w) * tile_px_w;
    let grid_y = (src_y / tile_px_h) * tile_px_h;

    let mut x = grid_x;
    while x < src_x + w {
        let mut y = grid_y;
        while y < src_y + h {
            // Clamp the chunk cell to the copy region; the first row and
            // column of cells may start inside the region.
            let src_chunk_x = src_x.max(x);
            let src_chunk_y = src_y.max(y);
            let width = (src_chunk_x + chunk_width_px).min(src_x + w) - src_chunk_x;
            let height = (src_chunk_y + chunk_height_px).min(src_y + h) - src_chunk_y;

            let dst_chunk_x = dst_x + (src_chunk_x - src_x);
            let dst_chunk_y = dst_y + (src_chunk_y - src_y);

            load_tiled(
                chunk.as_mut_ptr(),
                src,
                src_chunk_x,
                src_chunk_y,
                width,
                height,
                chunk_stride,
                src_stride,
                format,
                ZsInterleave::None,
            );
            store_tiled(
                dst,
                chunk.as_ptr(),
                dst_chunk_x,
                dst_chunk_y,
                width,
                height,
                dst_stride,
                chunk_stride,
                format,
                ZsInterleave::None,
            );

            y += chunk_height_px;
        }
        x += chunk_width_px;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{linear_row_stride_bytes, tiled_row_stride_bytes, tiled_size_bytes};
    use crate::test_prelude::*;

    /// Builds a tiled image of the given pixel dimensions filled with a
    /// deterministic pattern.
    fn tiled_image(format: BlockFormat, w: usize, h: usize, seed: u32) -> Vec<u8> {
        let linear_stride = linear_row_stride_bytes(format, w, ZsInterleave::None);
        let rows = h.div_ceil(format.block_height as usize);
        let mut linear = vec![0u8; rows * linear_stride];
        fill_pattern(&mut linear, seed);

        let mut tiled = vec![0u8; tiled_size_bytes(format, w, h)];
        unsafe {
            store_tiled(
                tiled.as_mut_ptr(),
                linear.as_ptr(),
                0,
                0,
                w,
                h,
                tiled_row_stride_bytes(format, w),
                linear_stride,
                format,
                ZsInterleave::None,
            );
        }
        tiled
    }

    /// Detiles a region into a tightly packed linear buffer.
    fn read_region(
        tiled: &[u8],
        format: BlockFormat,
        image_w: usize,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
    ) -> Vec<u8> {
        let linear_stride = linear_row_stride_bytes(format, w, ZsInterleave::None);
        let rows = h.div_ceil(format.block_height as usize);
        let mut out = vec![0u8; rows * linear_stride];
        unsafe {
            load_tiled(
                out.as_mut_ptr(),
                tiled.as_ptr(),
                x,
                y,
                w,
                h,
                linear_stride,
                tiled_row_stride_bytes(format, image_w),
                format,
                ZsInterleave::None,
            );
        }
        out
    }

    #[test]
    fn tile_aligned_copy_uses_whole_tiles() {
        let format = BlockFormat::uncompressed(32);
        let src = tiled_image(format, 64, 64, 0x5EED);
        let mut dst = vec![0u8; tiled_size_bytes(format, 64, 64)];
        let stride = tiled_row_stride_bytes(format, 64);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                32,
                0,
                16,
                16,
                32,
                32,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        assert_eq!(
            read_region(&dst, format, 64, 32, 0, 32, 32),
            read_region(&src, format, 64, 16, 16, 32, 32)
        );
    }

    #[test]
    fn tile_aligned_copy_of_compressed_tiles() {
        // 4x4-block tiles are 16x16 pixels for BC-style formats.
        let format = BlockFormat::new(4, 4, 64);
        let src = tiled_image(format, 64, 64, 0xB10C);
        let mut dst = vec![0u8; tiled_size_bytes(format, 64, 64)];
        let stride = tiled_row_stride_bytes(format, 64);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                0,
                32,
                16,
                16,
                32,
                32,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        assert_eq!(
            read_region(&dst, format, 64, 0, 32, 32, 32),
            read_region(&src, format, 64, 16, 16, 32, 32)
        );
    }

    #[test]
    fn misaligned_copy_stages_through_chunks() {
        let format = BlockFormat::uncompressed(8);
        let src = tiled_image(format, 64, 64, 41);
        let mut dst = vec![0u8; tiled_size_bytes(format, 64, 64)];
        let stride = tiled_row_stride_bytes(format, 64);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                9,
                3,
                5,
                7,
                40,
                33,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        assert_eq!(
            read_region(&dst, format, 64, 9, 3, 40, 33),
            read_region(&src, format, 64, 5, 7, 40, 33)
        );
    }

    #[test]
    fn copy_with_blocks_larger_than_the_staging_budget() {
        // 257-byte pixels: one tile is 65792 bytes, larger than the default
        // staging buffer, so the chunk grows to hold a single tile.
        let format = BlockFormat::uncompressed(2056);
        let src = tiled_image(format, 32, 32, 0x51);
        let mut dst = vec![0u8; tiled_size_bytes(format, 32, 32)];
        let stride = tiled_row_stride_bytes(format, 32);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                0,
                0,
                1,
                1,
                16,
                16,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        assert_eq!(
            read_region(&dst, format, 32, 0, 0, 16, 16),
            read_region(&src, format, 32, 1, 1, 16, 16)
        );
    }

    #[test]
    fn copy_spanning_multiple_chunks() {
        // 256x256 at 4 bytes per pixel is four times the staging buffer.
        let format = BlockFormat::uncompressed(32);
        let src = tiled_image(format, 256, 256, 0xD15C);
        let mut dst = vec![0u8; tiled_size_bytes(format, 256, 256)];
        let stride = tiled_row_stride_bytes(format, 256);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                17,
                33,
                3,
                2,
                128,
                96,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        assert_eq!(
            read_region(&dst, format, 256, 17, 33, 128, 96),
            read_region(&src, format, 256, 3, 2, 128, 96)
        );
    }

    #[test]
    fn zero_sized_copy_is_a_no_op() {
        let format = BlockFormat::uncompressed(32);
        let src = tiled_image(format, 32, 32, 1);
        let mut dst = vec![0xEEu8; tiled_size_bytes(format, 32, 32)];
        let stride = tiled_row_stride_bytes(format, 32);

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                3,
                4,
                5,
                6,
                0,
                16,
                stride,
                stride,
                format,
            )
            .unwrap();
        }
        assert!(dst.iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn copy_does_not_disturb_destination_outside_region() {
        let format = BlockFormat::uncompressed(32);
        let src = tiled_image(format, 64, 64, 77);
        let stride = tiled_row_stride_bytes(format, 64);

        let mut dst = vec![0u8; tiled_size_bytes(format, 64, 64)];
        fill_pattern(&mut dst, 99);
        let before = dst.clone();

        unsafe {
            copy_tiled(
                dst.as_mut_ptr(),
                src.as_ptr(),
                20,
                24,
                4,
                8,
                24,
                16,
                stride,
                stride,
                format,
            )
            .unwrap();
        }

        // Check a pixel just outside each region edge.
        for (x, y) in [(19usize, 24usize), (44, 24), (20, 23), (20, 40)] {
            let offset = naive_tiled_offset(x, y, 4, stride);
            assert_eq!(
                dst[offset..offset + 4],
                before[offset..offset + 4],
                "pixel ({x}, {y})"
            );
        }
        assert_eq!(
            read_region(&dst, format, 64, 20, 24, 24, 16),
            read_region(&src, format, 64, 4, 8, 24, 16)
        );
    }
}
