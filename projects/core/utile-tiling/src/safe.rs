//! Slice-based wrappers around the raw pointer API.
//!
//! These validate formats, alignment and buffer capacities up front and
//! return errors instead of invoking the kernels with out-of-bounds
//! accesses. Overlap between source and destination is ruled out by the
//! borrow checker.

use crate::access::{copy_tiled, load_tiled, store_tiled};
use crate::allocate::AllocateError;
use crate::format::{BlockFormat, Region, ZsInterleave};
use crate::layout::{
    linear_pixel_size, linear_region_required_bytes, tiled_region_required_bytes,
};
use thiserror::Error;

/// Validation errors for the safe tiled-access wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TilingValidationError {
    /// The format's block size is zero or not a whole number of bytes.
    #[error("unsupported bits per block: {0} (must be a non-zero multiple of 8)")]
    UnsupportedBitsPerBlock(u32),

    /// Depth/stencil interleaving was requested for a format other than an
    /// uncompressed 32-bit one.
    #[error("interleave {interleave:?} requires an uncompressed 32-bit format, got {bits_per_block} bits per block")]
    InvalidInterleave {
        /// The requested interleave mode.
        interleave: ZsInterleave,
        /// The offending format's block size in bits.
        bits_per_block: u32,
    },

    /// The region is not aligned to the format's block dimensions.
    #[error("region ({x}, {y}) {width}x{height} is not aligned to the {block_width}x{block_height} block size")]
    RegionNotBlockAligned {
        /// Region origin X in pixels.
        x: usize,
        /// Region origin Y in pixels.
        y: usize,
        /// Region width in pixels.
        width: usize,
        /// Region height in pixels.
        height: usize,
        /// Format block width in pixels.
        block_width: u32,
        /// Format block height in pixels.
        block_height: u32,
    },

    /// A row stride is not a multiple of the element size it must step
    /// over.
    #[error("stride {stride} is not a multiple of the {element_size}-byte element size")]
    UnalignedStride {
        /// The offending stride in bytes.
        stride: usize,
        /// The element size the stride must be a multiple of.
        element_size: usize,
    },

    /// The tiled buffer cannot hold every tile the region touches.
    #[error("tiled buffer too small: need {needed} bytes, got {actual}")]
    TiledBufferTooSmall {
        /// Bytes the access requires.
        needed: usize,
        /// Bytes the buffer actually holds.
        actual: usize,
    },

    /// The linear buffer cannot hold the region at the given stride.
    #[error("linear buffer too small: need {needed} bytes, got {actual}")]
    LinearBufferTooSmall {
        /// Bytes the access requires.
        needed: usize,
        /// Bytes the buffer actually holds.
        actual: usize,
    },
}

/// Errors from safe tiled-access operations that may allocate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilingError {
    /// Input validation failed; no bytes were moved.
    #[error(transparent)]
    Validation(#[from] TilingValidationError),

    /// The staging buffer for a tiled-to-tiled copy could not be
    /// allocated.
    #[error(transparent)]
    Allocation(#[from] AllocateError),
}

fn validate_access(
    format: BlockFormat,
    interleave: ZsInterleave,
    region: Region,
    tiled_stride: usize,
    linear_stride: usize,
) -> Result<(), TilingValidationError> {
    if format.bits_per_block == 0 || format.bits_per_block % 8 != 0 {
        return Err(TilingValidationError::UnsupportedBitsPerBlock(
            format.bits_per_block,
        ));
    }
    if interleave != ZsInterleave::None && (format.bits_per_block != 32 || format.is_compressed())
    {
        return Err(TilingValidationError::InvalidInterleave {
            interleave,
            bits_per_block: format.bits_per_block,
        });
    }

    let bw = format.block_width as usize;
    let bh = format.block_height as usize;
    if region.x % bw != 0 || region.y % bh != 0 || region.width % bw != 0 || region.height % bh != 0
    {
        return Err(TilingValidationError::RegionNotBlockAligned {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            block_width: format.block_width,
            block_height: format.block_height,
        });
    }

    let block_bytes = format.bytes_per_block();
    if tiled_stride % block_bytes != 0 {
        return Err(TilingValidationError::UnalignedStride {
            stride: tiled_stride,
            element_size: block_bytes,
        });
    }
    let linear_px = linear_pixel_size(format, interleave);
    if linear_stride % linear_px != 0 {
        return Err(TilingValidationError::UnalignedStride {
            stride: linear_stride,
            element_size: linear_px,
        });
    }

    Ok(())
}

fn check_tiled_capacity(
    buf_len: usize,
    format: BlockFormat,
    region: Region,
    tiled_stride: usize,
) -> Result<(), TilingValidationError> {
    let needed = tiled_region_required_bytes(format, region, tiled_stride);
    if buf_len < needed {
        return Err(TilingValidationError::TiledBufferTooSmall {
            needed,
            actual: buf_len,
        });
    }
    Ok(())
}

fn check_linear_capacity(
    buf_len: usize,
    format: BlockFormat,
    region: Region,
    linear_stride: usize,
    interleave: ZsInterleave,
) -> Result<(), TilingValidationError> {
    let needed =
        linear_region_required_bytes(format, region.width, region.height, linear_stride, interleave);
    if buf_len < needed {
        return Err(TilingValidationError::LinearBufferTooSmall {
            needed,
            actual: buf_len,
        });
    }
    Ok(())
}

/// Stores a region of a linear image into a tiled image, validating
/// formats, alignment and capacities first.
///
/// `region` addresses the tiled destination in pixels; the linear source
/// holds just the region at `linear_stride` bytes per row. See
/// [`store_tiled`] for the underlying operation.
pub fn store_tiled_slice(
    tiled: &mut [u8],
    linear: &[u8],
    region: Region,
    tiled_stride: usize,
    linear_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
) -> Result<(), TilingValidationError> {
    validate_access(format, interleave, region, tiled_stride, linear_stride)?;
    if region.is_empty() {
        return Ok(());
    }
    check_tiled_capacity(tiled.len(), format, region, tiled_stride)?;
    check_linear_capacity(linear.len(), format, region, linear_stride, interleave)?;

    unsafe {
        store_tiled(
            tiled.as_mut_ptr(),
            linear.as_ptr(),
            region.x,
            region.y,
            region.width,
            region.height,
            tiled_stride,
            linear_stride,
            format,
            interleave,
        );
    }
    Ok(())
}

/// Loads a region of a tiled image into a linear one, validating formats,
/// alignment and capacities first. Inverse of [`store_tiled_slice`].
pub fn load_tiled_slice(
    linear: &mut [u8],
    tiled: &[u8],
    region: Region,
    linear_stride: usize,
    tiled_stride: usize,
    format: BlockFormat,
    interleave: ZsInterleave,
) -> Result<(), TilingValidationError> {
    validate_access(format, interleave, region, tiled_stride, linear_stride)?;
    if region.is_empty() {
        return Ok(());
    }
    check_tiled_capacity(tiled.len(), format, region, tiled_stride)?;
    check_linear_capacity(linear.len(), format, region, linear_stride, interleave)?;

    unsafe {
        load_tiled(
            linear.as_mut_ptr(),
            tiled.as_ptr(),
            region.x,
            region.y,
            region.width,
            region.height,
            linear_stride,
            tiled_stride,
            format,
            interleave,
        );
    }
    Ok(())
}

/// Copies a region between two tiled images of the same format,
/// validating alignment and capacities first. May allocate a bounded
/// staging buffer when the regions are not tile-aligned.
#[allow(clippy::too_many_arguments)]
pub fn copy_tiled_slice(
    dst: &mut [u8],
    src: &[u8],
    dst_x: usize,
    dst_y: usize,
    src_x: usize,
    src_y: usize,
    width: usize,
    height: usize,
    dst_stride: usize,
    src_stride: usize,
    format: BlockFormat,
) -> Result<(), TilingError> {
    let dst_region = Region::new(dst_x, dst_y, width, height);
    let src_region = Region::new(src_x, src_y, width, height);
    validate_access(format, ZsInterleave::None, dst_region, dst_stride, 0)?;
    validate_access(format, ZsInterleave::None, src_region, src_stride, 0)?;
    if width == 0 || height == 0 {
        return Ok(());
    }
    check_tiled_capacity(dst.len(), format, dst_region, dst_stride)?;
    check_tiled_capacity(src.len(), format, src_region, src_stride)?;

    unsafe {
        copy_tiled(
            dst.as_mut_ptr(),
            src.as_ptr(),
            dst_x,
            dst_y,
            src_x,
            src_y,
            width,
            height,
            dst_stride,
            src_stride,
            format,
        )?;
    }
    Ok(())
}
