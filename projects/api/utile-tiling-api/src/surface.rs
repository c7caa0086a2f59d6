//! Surface descriptors and whole-surface tiling operations.

use crate::error::SurfaceError;
use core::ptr::write_bytes;
use safe_allocator_api::RawAlloc;
use utile_tiling::allocate::allocate_align_64;
use utile_tiling::layout;
use utile_tiling::{
    copy_tiled_slice, load_tiled_slice, store_tiled_slice, BlockFormat, Region, ZsInterleave,
};

/// Format and pixel dimensions of one tiled surface.
///
/// Strides and sizes derived from the descriptor are the minimal ones for
/// the dimensions; surfaces with padded strides should use the core crate's
/// region API directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    /// Block geometry of the surface's pixel format.
    pub format: BlockFormat,
    /// Surface width in pixels.
    pub width: usize,
    /// Surface height in pixels.
    pub height: usize,
}

impl SurfaceDescriptor {
    /// Creates a descriptor from a format and pixel dimensions.
    pub const fn new(format: BlockFormat, width: usize, height: usize) -> Self {
        Self {
            format,
            width,
            height,
        }
    }

    /// Byte distance between adjacent rows of tiles in the tiled image.
    pub fn tiled_stride(&self) -> usize {
        layout::tiled_row_stride_bytes(self.format, self.width)
    }

    /// Size in bytes of the whole tiled image.
    pub fn tiled_size(&self) -> usize {
        layout::tiled_size_bytes(self.format, self.width, self.height)
    }

    /// Byte distance between adjacent rows of a full-width linear image.
    pub fn linear_stride(&self, interleave: ZsInterleave) -> usize {
        layout::linear_row_stride_bytes(self.format, self.width, interleave)
    }

    /// Size in bytes of a full-width linear image of the surface.
    pub fn linear_size(&self, interleave: ZsInterleave) -> usize {
        layout::linear_size_bytes(self.format, self.width, self.height, interleave)
    }

    /// The full surface as a region.
    pub const fn full_region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    fn check_region(&self, region: Region) -> Result<(), SurfaceError> {
        if region.x + region.width > self.width || region.y + region.height > self.height {
            return Err(SurfaceError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                surface_width: self.width,
                surface_height: self.height,
            });
        }
        Ok(())
    }
}

/// Stores a region of linear pixels into a tiled surface.
///
/// `linear` holds just the region, tightly packed at
/// `linear_row_stride_bytes(format, region.width, interleave)` bytes per
/// row.
pub fn store_surface(
    surface: &SurfaceDescriptor,
    tiled: &mut [u8],
    linear: &[u8],
    region: Region,
    interleave: ZsInterleave,
) -> Result<(), SurfaceError> {
    surface.check_region(region)?;
    let linear_stride = layout::linear_row_stride_bytes(surface.format, region.width, interleave);
    store_tiled_slice(
        tiled,
        linear,
        region,
        surface.tiled_stride(),
        linear_stride,
        surface.format,
        interleave,
    )?;
    Ok(())
}

/// Loads a region of a tiled surface into a tightly packed linear buffer.
/// Inverse of [`store_surface`].
pub fn load_surface(
    surface: &SurfaceDescriptor,
    linear: &mut [u8],
    tiled: &[u8],
    region: Region,
    interleave: ZsInterleave,
) -> Result<(), SurfaceError> {
    surface.check_region(region)?;
    let linear_stride = layout::linear_row_stride_bytes(surface.format, region.width, interleave);
    load_tiled_slice(
        linear,
        tiled,
        region,
        linear_stride,
        surface.tiled_stride(),
        surface.format,
        interleave,
    )?;
    Ok(())
}

/// Copies a pixel region between two tiled surfaces of the same format.
#[allow(clippy::too_many_arguments)]
pub fn copy_surface(
    dst_surface: &SurfaceDescriptor,
    dst: &mut [u8],
    src_surface: &SurfaceDescriptor,
    src: &[u8],
    dst_x: usize,
    dst_y: usize,
    src_x: usize,
    src_y: usize,
    width: usize,
    height: usize,
) -> Result<(), SurfaceError> {
    if dst_surface.format != src_surface.format {
        return Err(SurfaceError::FormatMismatch);
    }
    dst_surface.check_region(Region::new(dst_x, dst_y, width, height))?;
    src_surface.check_region(Region::new(src_x, src_y, width, height))?;
    copy_tiled_slice(
        dst,
        src,
        dst_x,
        dst_y,
        src_x,
        src_y,
        width,
        height,
        dst_surface.tiled_stride(),
        src_surface.tiled_stride(),
        dst_surface.format,
    )?;
    Ok(())
}

/// Tiles an entire linear image into a freshly allocated, cache-line
/// aligned tiled image.
pub fn tile_surface_allocating(
    surface: &SurfaceDescriptor,
    linear: &[u8],
) -> Result<RawAlloc, SurfaceError> {
    let size = surface.tiled_size().max(1);
    let mut out = allocate_align_64(size)?;
    // Surfaces whose dimensions are not tile multiples leave padding
    // inside trailing tiles unwritten; start from zeroed memory so the
    // result is fully initialized either way.
    unsafe { write_bytes(out.as_mut_ptr(), 0, size) };
    let tiled = unsafe { core::slice::from_raw_parts_mut(out.as_mut_ptr(), size) };
    store_surface(
        surface,
        tiled,
        linear,
        surface.full_region(),
        ZsInterleave::None,
    )?;
    Ok(out)
}

/// Detiles an entire tiled image into a freshly allocated, cache-line
/// aligned linear image. Inverse of [`tile_surface_allocating`].
pub fn detile_surface_allocating(
    surface: &SurfaceDescriptor,
    tiled: &[u8],
) -> Result<RawAlloc, SurfaceError> {
    let size = surface.linear_size(ZsInterleave::None).max(1);
    let mut out = allocate_align_64(size)?;
    unsafe { write_bytes(out.as_mut_ptr(), 0, size) };
    let linear = unsafe { core::slice::from_raw_parts_mut(out.as_mut_ptr(), size) };
    load_surface(
        surface,
        linear,
        tiled,
        surface.full_region(),
        ZsInterleave::None,
    )?;
    Ok(out)
}
