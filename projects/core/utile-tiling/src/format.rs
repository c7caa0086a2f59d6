//! Pixel format descriptors and the depth/stencil interleave selector.

use derive_enum_all_values::AllValues;

/// Describes the addressable unit of a pixel format.
///
/// For uncompressed formats a block is a single pixel. For block-compressed
/// formats (BC1, ASTC, ...) one block covers `block_width x block_height`
/// pixels and the tiling engine addresses whole blocks.
///
/// The descriptor is supplied by the caller's format database; this crate
/// never interprets the channel contents, only the block geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFormat {
    /// Width of one block in pixels. At least 1.
    pub block_width: u32,
    /// Height of one block in pixels. At least 1.
    pub block_height: u32,
    /// Bits per block (bits per pixel for uncompressed formats).
    ///
    /// Must be a multiple of 8. Sizes of 8, 16, 24, 32, 48, 64, 96 and 128
    /// bits take specialized paths; other multiples of 8 fall back to a
    /// generic per-pixel copy.
    pub bits_per_block: u32,
}

impl BlockFormat {
    /// Creates a descriptor from explicit block geometry.
    pub const fn new(block_width: u32, block_height: u32, bits_per_block: u32) -> Self {
        Self {
            block_width,
            block_height,
            bits_per_block,
        }
    }

    /// Creates a descriptor for an uncompressed format with the given bits
    /// per pixel.
    pub const fn uncompressed(bits_per_pixel: u32) -> Self {
        Self::new(1, 1, bits_per_pixel)
    }

    /// Size of one block in bytes.
    pub const fn bytes_per_block(&self) -> usize {
        (self.bits_per_block / 8) as usize
    }

    /// Whether one block covers more than one pixel.
    pub const fn is_compressed(&self) -> bool {
        self.block_width > 1
    }

    /// log2 of the tile extent in blocks: 16x16-block tiles for
    /// uncompressed formats, 4x4-block tiles for compressed ones.
    pub(crate) const fn tile_shift(&self) -> u32 {
        if self.is_compressed() {
            2
        } else {
            4
        }
    }

    /// Tile extent in blocks along either axis.
    pub(crate) const fn tile_extent_blocks(&self) -> usize {
        1 << self.tile_shift()
    }

    /// Whether the tile-aligned fast path can handle this format.
    pub(crate) const fn has_fast_tiling(&self) -> bool {
        !self.is_compressed() && self.bits_per_block.is_power_of_two()
    }
}

/// A rectangular region of an image, in pixel units, relative to the
/// top-left origin of the full image.
///
/// For block-compressed formats all four fields must be multiples of the
/// block dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge in pixels.
    pub x: usize,
    /// Top edge in pixels.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Region {
    /// Creates a region from its origin and extent.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the region contains no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The depth and stencil aspects of a Z24S8 image share one 32-bit pixel,
/// with depth in the low 24 bits and stencil in the top 8. When copying
/// to/from a tiled Z24S8 image, this selector selects whether to
/// (de)interleave one of the aspects or move the pixel whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AllValues)]
#[repr(u8)]
pub enum ZsInterleave {
    /// Copy all aspects, no interleaving.
    None = 0,
    /// Copy only the depth aspect of a tiled Z24S8 image to/from linear
    /// Z24X8. The stencil byte of the tiled image is left untouched.
    Depth = 1,
    /// Copy only the stencil aspect of a tiled Z24S8 image to/from linear
    /// S8. The depth bytes of the tiled image are left untouched.
    Stencil = 2,
}

impl ZsInterleave {
    /// Selects the interleave mode for accessing the given aspects of a
    /// combined Z24S8 format. At least one aspect must be requested.
    ///
    /// Images that are not combined depth/stencil always use
    /// [`ZsInterleave::None`]; this helper does not apply to them.
    pub fn from_aspects(depth: bool, stencil: bool) -> Self {
        debug_assert!(depth || stencil, "at least one aspect must be specified");
        match (depth, stencil) {
            (true, false) => ZsInterleave::Depth,
            (false, true) => ZsInterleave::Stencil,
            _ => ZsInterleave::None,
        }
    }
}
