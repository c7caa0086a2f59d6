//! Tiled image access: kernel dispatch, region decomposition and the
//! public load/store entry points.
//!
//! The addressing math is always computed on whichever buffer is tiled, so
//! loads and stores share one traversal with the buffer roles swapped.

mod aligned;
mod copy;
mod unaligned;

pub use copy::copy_tiled;

use crate::format::{BlockFormat, ZsInterleave};
use crate::layout::linear_pixel_size;
use crate::pixel::{ZS_DEPTH, ZS_NONE, ZS_STENCIL};
use crate::{TILE_HEIGHT, TILE_WIDTH};
use aligned::access_aligned;
use unaligned::{access_unaligned, access_unaligned_any};

/// One call per configuration, so that the inlined kernel is specialized
/// for each pixel size and interleave mode.
#[inline(always)]
unsafe fn unaligned_variants<const IS_STORE: bool, const TILE_SHIFT: u32>(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    bits_per_block: u32,
    interleave: ZsInterleave,
) {
    match (bits_per_block, interleave) {
        (8, _) => access_unaligned::<1, 1, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (16, _) => access_unaligned::<2, 2, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (24, _) => access_unaligned::<3, 3, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::None) => access_unaligned::<4, 4, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::Depth) => access_unaligned::<4, 4, ZS_DEPTH, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::Stencil) => access_unaligned::<4, 1, ZS_STENCIL, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (48, _) => access_unaligned::<6, 6, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (64, _) => access_unaligned::<8, 8, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (96, _) => access_unaligned::<12, 12, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (128, _) => access_unaligned::<16, 16, ZS_NONE, IS_STORE, TILE_SHIFT>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        _ => {
            debug_assert!(
                bits_per_block != 0 && bits_per_block % 8 == 0,
                "bits per block must be a non-zero multiple of 8"
            );
            access_unaligned_any::<IS_STORE, TILE_SHIFT>(
                tiled,
                linear,
                sx,
                sy,
                w,
                h,
                tiled_stride,
                linear_stride,
                (bits_per_block / 8) as usize,
            )
        }
    }
}

/// Fast-path dispatch; callers guarantee a power-of-two pixel size.
#[inline(always)]
unsafe fn aligned_variants<const IS_STORE: bool>(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    bits_per_block: u32,
    interleave: ZsInterleave,
) {
    match (bits_per_block, interleave) {
        (8, _) => access_aligned::<1, 1, ZS_NONE, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (16, _) => access_aligned::<2, 2, ZS_NONE, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::None) => access_aligned::<4, 4, ZS_NONE, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::Depth) => access_aligned::<4, 4, ZS_DEPTH, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (32, ZsInterleave::Stencil) => access_aligned::<4, 1, ZS_STENCIL, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (64, _) => access_aligned::<8, 8, ZS_NONE, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        (128, _) => access_aligned::<16, 16, ZS_NONE, IS_STORE>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
        ),
        _ => debug_assert!(false, "aligned kernel requires a power-of-two pixel size"),
    }
}

/// Generic access to a tiled image. Works for block-compressed images on
/// entire blocks at a time; `sx`/`sy`/`w`/`h` are in pixels, the kernels
/// work in blocks, so units are converted here.
pub(crate) unsafe fn access_generic(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
    is_store: bool,
) {
    let bw = format.block_width as usize;
    let bh = format.block_height as usize;
    let bpp = format.bits_per_block;

    // Convert units
    let sx = sx / bw;
    let sy = sy / bh;
    let w = w.div_ceil(bw);
    let h = h.div_ceil(bh);

    if format.is_compressed() {
        if is_store {
            unaligned_variants::<true, 2>(
                tiled,
                linear,
                sx,
                sy,
                w,
                h,
                tiled_stride,
                linear_stride,
                bpp,
                interleave,
            )
        } else {
            unaligned_variants::<false, 2>(
                tiled,
                linear,
                sx,
                sy,
                w,
                h,
                tiled_stride,
                linear_stride,
                bpp,
                interleave,
            )
        }
    } else if is_store {
        unaligned_variants::<true, 4>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
            bpp,
            interleave,
        )
    } else {
        unaligned_variants::<false, 4>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
            bpp,
            interleave,
        )
    }
}

/// Optimized variant of [`access_generic`] requiring `sx`/`sy`/`w`/`h` to
/// be tile-aligned and the pixel size to be a power of two.
pub(crate) unsafe fn access_generic_aligned(
    tiled: *mut u8,
    linear: *mut u8,
    sx: usize,
    sy: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
    is_store: bool,
) {
    let bpp = format.bits_per_block;

    debug_assert!(sx % TILE_WIDTH == 0);
    debug_assert!(sy % TILE_HEIGHT == 0);
    debug_assert!(w % TILE_WIDTH == 0);
    debug_assert!(h % TILE_HEIGHT == 0);
    debug_assert!(bpp.is_power_of_two());

    if is_store {
        aligned_variants::<true>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
            bpp,
            interleave,
        )
    } else {
        aligned_variants::<false>(
            tiled,
            linear,
            sx,
            sy,
            w,
            h,
            tiled_stride,
            linear_stride,
            bpp,
            interleave,
        )
    }
}

/// Decomposes an arbitrary region into up to four unaligned edge strips
/// routed to the generic kernel plus a tile-aligned interior routed to the
/// fast kernel. Strips are disjoint, so every requested pixel is touched
/// exactly once.
pub(crate) unsafe fn access_tiled(
    tiled: *mut u8,
    linear: *mut u8,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
    is_store: bool,
) {
    if interleave != ZsInterleave::None {
        debug_assert!(
            format.bits_per_block == 32 && !format.is_compressed(),
            "depth/stencil interleave only applies to Z24S8"
        );
    }

    let block_bytes = format.bytes_per_block();
    let linear_px = linear_pixel_size(format, interleave);
    debug_assert!(tiled_stride % block_bytes == 0, "unaligned tiled stride");
    debug_assert!(linear_stride % linear_px == 0, "unaligned linear stride");

    if !format.has_fast_tiling() {
        access_generic(
            tiled,
            linear,
            x,
            y,
            w,
            h,
            tiled_stride,
            linear_stride,
            format,
            interleave,
            is_store,
        );
        return;
    }

    let (mut x, mut y, mut w, mut h) = (x, y, w, h);
    let first_tile_x = x.div_ceil(TILE_WIDTH) * TILE_WIDTH;
    let first_tile_y = y.div_ceil(TILE_HEIGHT) * TILE_HEIGHT;
    let last_tile_x = ((x + w) / TILE_WIDTH) * TILE_WIDTH;
    let last_tile_y = ((y + h) / TILE_HEIGHT) * TILE_HEIGHT;

    // The strips index the linear buffer relative to the original region
    // origin; the x/y/w/h bookkeeping below only shrinks the tiled-side
    // region.
    let (orig_x, orig_y) = (x, y);
    let linear_at = |px: usize, py: usize| -> *mut u8 {
        unsafe { linear.add((py - orig_y) * linear_stride + (px - orig_x) * linear_px) }
    };

    // Top unaligned strip
    if first_tile_y != y {
        let dist = (first_tile_y - y).min(h);

        access_generic(
            tiled,
            linear_at(x, y),
            x,
            y,
            w,
            dist,
            tiled_stride,
            linear_stride,
            format,
            interleave,
            is_store,
        );

        if dist == h {
            return;
        }

        y += dist;
        h -= dist;
    }

    // Bottom unaligned strip
    if last_tile_y != y + h {
        let dist = (y + h) - last_tile_y;

        access_generic(
            tiled,
            linear_at(x, last_tile_y),
            x,
            last_tile_y,
            w,
            dist,
            tiled_stride,
            linear_stride,
            format,
            interleave,
            is_store,
        );

        h -= dist;
    }

    // Left unaligned strip
    if first_tile_x != x {
        let dist = (first_tile_x - x).min(w);

        access_generic(
            tiled,
            linear_at(x, y),
            x,
            y,
            dist,
            h,
            tiled_stride,
            linear_stride,
            format,
            interleave,
            is_store,
        );

        if dist == w {
            return;
        }

        x += dist;
        w -= dist;
    }

    // Right unaligned strip
    if last_tile_x != x + w {
        let dist = (x + w) - last_tile_x;

        access_generic(
            tiled,
            linear_at(last_tile_x, y),
            last_tile_x,
            y,
            dist,
            h,
            tiled_stride,
            linear_stride,
            format,
            interleave,
            is_store,
        );

        w -= dist;
    }

    // Tile-aligned interior
    access_generic_aligned(
        tiled,
        linear_at(x, y),
        x,
        y,
        w,
        h,
        tiled_stride,
        linear_stride,
        format,
        interleave,
        is_store,
    );
}

/// Stores a rectangular region from a linear staging image into a tiled
/// image.
///
/// `x`/`y`/`w`/`h` select the region of interest of the destination in
/// pixels and must be aligned to the format's block size. `tiled_stride`
/// is the number of bytes between adjacent rows of tiles in the
/// destination; `linear_stride` is the byte stride of the linear source.
///
/// # Safety
///
/// - `tiled` must be valid for writes covering every tile the region
///   touches (see [`crate::layout::tiled_region_required_bytes`]).
/// - `linear` must be valid for reads of the region at `linear_stride`
///   bytes per row.
/// - Strides must be multiples of the respective pixel/block byte sizes.
pub unsafe fn store_tiled(
    tiled: *mut u8,
    linear: *const u8,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    tiled_stride: usize,
    linear_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
) {
    access_tiled(
        tiled,
        linear as *mut u8,
        x,
        y,
        w,
        h,
        tiled_stride,
        linear_stride,
        format,
        interleave,
        true,
    );
}

/// Loads a rectangular region of a tiled image into a linear staging
/// image. Inverse of [`store_tiled`]; the region addresses the tiled
/// source.
///
/// # Safety
///
/// - `linear` must be valid for writes of the region at `linear_stride`
///   bytes per row.
/// - `tiled` must be valid for reads covering every tile the region
///   touches.
/// - Strides must be multiples of the respective pixel/block byte sizes.
pub unsafe fn load_tiled(
    linear: *mut u8,
    tiled: *const u8,
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    linear_stride: usize,
    tiled_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
) {
    access_tiled(
        tiled as *mut u8,
        linear,
        x,
        y,
        w,
        h,
        tiled_stride,
        linear_stride,
        format,
        interleave,
        false,
    );
}
