//! The innermost per-pixel transfer primitive.
//!
//! Everything here is monomorphized over the pixel byte size, the
//! depth/stencil interleave mode and the transfer direction, so the hot
//! loops contain no per-pixel runtime dispatch.

use core::ptr::{copy_nonoverlapping, read_unaligned, write_unaligned};

use crate::format::ZsInterleave;

pub(crate) const ZS_NONE: u8 = ZsInterleave::None as u8;
pub(crate) const ZS_DEPTH: u8 = ZsInterleave::Depth as u8;
pub(crate) const ZS_STENCIL: u8 = ZsInterleave::Stencil as u8;

/// Transfers one pixel between a tiled location and a linear location.
///
/// `TILED_BYTES` is the pixel size within the tiled image. For
/// [`ZS_DEPTH`] only the low three bytes of a 32-bit Z24S8 pixel move; for
/// [`ZS_STENCIL`] only the top byte moves, against a 1-byte linear S8
/// pixel. The untouched sub-channel keeps its previous contents.
///
/// The byte layout matches the little-endian view the hardware has of a
/// Z24S8 pixel.
///
/// # Safety
///
/// - `tiled` must be valid for `TILED_BYTES` bytes of access (reads for
///   loads, writes for stores; depth/stencil stores also read).
/// - `linear` must be valid for the linear pixel size (1 byte for
///   [`ZS_STENCIL`], `TILED_BYTES` otherwise).
#[inline(always)]
pub(crate) unsafe fn transfer_pixel<const TILED_BYTES: usize, const ZS: u8, const IS_STORE: bool>(
    tiled: *mut u8,
    linear: *mut u8,
) {
    if ZS == ZS_NONE {
        if IS_STORE {
            copy_nonoverlapping(linear, tiled, TILED_BYTES);
        } else {
            copy_nonoverlapping(tiled, linear, TILED_BYTES);
        }
    } else if ZS == ZS_DEPTH {
        debug_assert!(TILED_BYTES == 4, "depth interleave only applies to Z24S8");
        if IS_STORE {
            let pixel = read_unaligned(linear as *const u32);
            write_unaligned(tiled as *mut u16, (pixel & 0xffff) as u16);
            *tiled.add(2) = ((pixel >> 16) & 0xff) as u8;
        } else {
            // The top byte of linear Z24X8 is unused, so one 32-bit write
            // replaces separate 16-bit and 8-bit writes.
            let pixel = read_unaligned(tiled as *const u32);
            write_unaligned(linear as *mut u32, pixel & 0x00ff_ffff);
        }
    } else {
        debug_assert!(TILED_BYTES == 4, "stencil interleave only applies to Z24S8");
        if IS_STORE {
            *tiled.add(3) = *linear;
        } else {
            *linear = *tiled.add(3);
        }
    }
}

/// Runtime-sized variant of [`transfer_pixel`] for bit depths outside the
/// specialized set. No interleaving; used by the generic fallback only.
///
/// # Safety
///
/// Both pointers must be valid for `bytes` bytes of the respective access.
#[inline(always)]
pub(crate) unsafe fn transfer_pixel_any<const IS_STORE: bool>(
    tiled: *mut u8,
    linear: *mut u8,
    bytes: usize,
) {
    if IS_STORE {
        copy_nonoverlapping(linear, tiled, bytes);
    } else {
        copy_nonoverlapping(tiled, linear, bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_store_preserves_stencil() {
        let mut tiled = [0u8; 4];
        tiled[3] = 0x5A; // stencil sentinel
        let linear = 0x00AB_CDEFu32.to_le_bytes();
        unsafe {
            transfer_pixel::<4, ZS_DEPTH, true>(tiled.as_mut_ptr(), linear.as_ptr() as *mut u8);
        }
        assert_eq!(u32::from_le_bytes(tiled), 0x5AAB_CDEF);
    }

    #[test]
    fn depth_load_zeroes_top_byte() {
        let tiled = 0x5AAB_CDEFu32.to_le_bytes();
        let mut linear = [0xFFu8; 4];
        unsafe {
            transfer_pixel::<4, ZS_DEPTH, false>(tiled.as_ptr() as *mut u8, linear.as_mut_ptr());
        }
        assert_eq!(u32::from_le_bytes(linear), 0x00AB_CDEF);
    }

    #[test]
    fn stencil_store_preserves_depth() {
        let mut tiled = 0x00AB_CDEFu32.to_le_bytes();
        let linear = [0x5Au8];
        unsafe {
            transfer_pixel::<4, ZS_STENCIL, true>(tiled.as_mut_ptr(), linear.as_ptr() as *mut u8);
        }
        assert_eq!(u32::from_le_bytes(tiled), 0x5AAB_CDEF);
    }

    #[test]
    fn stencil_load_reads_top_byte() {
        let tiled = 0x5AAB_CDEFu32.to_le_bytes();
        let mut linear = [0u8];
        unsafe {
            transfer_pixel::<4, ZS_STENCIL, false>(tiled.as_ptr() as *mut u8, linear.as_mut_ptr());
        }
        assert_eq!(linear[0], 0x5A);
    }
}
