#![no_main]

// Round-trips arbitrary regions and formats through the safe store/load
// wrappers. Every access the validator accepts must restore the original
// linear bytes (modulo the depth top byte, which loads as zero).

use libfuzzer_sys::{arbitrary, fuzz_target};
use utile_tiling::layout::{linear_row_stride_bytes, tiled_row_stride_bytes, tiled_size_bytes};
use utile_tiling::{load_tiled_slice, store_tiled_slice, BlockFormat, Region, ZsInterleave};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Access {
    pub bpp_index: u8,
    pub compressed: bool,
    pub interleave: u8,
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    pub seed: u32,
}

const BPP: [u32; 9] = [8, 16, 24, 32, 40, 48, 64, 96, 128];

fuzz_target!(|access: Access| {
    let bits = BPP[access.bpp_index as usize % BPP.len()];
    let format = if access.compressed {
        BlockFormat::new(4, 4, bits)
    } else {
        BlockFormat::uncompressed(bits)
    };
    let interleave = match access.interleave % 3 {
        1 => ZsInterleave::Depth,
        2 => ZsInterleave::Stencil,
        _ => ZsInterleave::None,
    };

    // Origins up to 64 plus extents up to 255 stay inside a 320x320 image.
    let region = Region::new(
        access.x as usize % 64,
        access.y as usize % 64,
        access.width as usize,
        access.height as usize,
    );
    let (image_w, image_h) = (320usize, 320usize);

    let tiled_stride = tiled_row_stride_bytes(format, image_w);
    let linear_stride = linear_row_stride_bytes(format, region.width, interleave);
    let rows = region.height.div_ceil(format.block_height as usize);

    let mut linear = vec![0u8; rows * linear_stride];
    let mut seed = access.seed;
    for byte in linear.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *byte = (seed >> 24) as u8;
    }

    let mut tiled = vec![0u8; tiled_size_bytes(format, image_w, image_h)];
    if store_tiled_slice(
        &mut tiled,
        &linear,
        region,
        tiled_stride,
        linear_stride,
        format,
        interleave,
    )
    .is_err()
    {
        // Rejected inputs (misaligned regions, invalid interleave) are fine.
        return;
    }

    let mut restored = vec![0xA5u8; linear.len()];
    load_tiled_slice(
        &mut restored,
        &tiled,
        region,
        linear_stride,
        tiled_stride,
        format,
        interleave,
    )
    .expect("load must accept what store accepted");

    if interleave == ZsInterleave::Depth {
        for (got, put) in restored.chunks_exact(4).zip(linear.chunks_exact(4)) {
            assert_eq!(&got[..3], &put[..3], "depth bytes don't round-trip");
            assert_eq!(got[3], 0, "depth load must zero the stencil byte");
        }
    } else {
        assert_eq!(restored, linear, "region doesn't round-trip");
    }
});
