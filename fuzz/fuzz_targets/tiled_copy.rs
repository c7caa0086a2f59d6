#![no_main]

// Copies arbitrary regions between two tiled images and checks the result
// against detiled readbacks of source and destination.

use libfuzzer_sys::{arbitrary, fuzz_target};
use utile_tiling::layout::{linear_row_stride_bytes, tiled_row_stride_bytes, tiled_size_bytes};
use utile_tiling::{
    copy_tiled_slice, load_tiled_slice, store_tiled_slice, BlockFormat, Region, ZsInterleave,
};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Copy {
    pub bpp_index: u8,
    pub compressed: bool,
    pub dst_x: u8,
    pub dst_y: u8,
    pub src_x: u8,
    pub src_y: u8,
    pub width: u8,
    pub height: u8,
    pub seed: u32,
}

const BPP: [u32; 6] = [8, 16, 24, 32, 64, 128];

fuzz_target!(|copy: Copy| {
    let bits = BPP[copy.bpp_index as usize % BPP.len()];
    let format = if copy.compressed {
        BlockFormat::new(4, 4, bits)
    } else {
        BlockFormat::uncompressed(bits)
    };

    let (image_w, image_h) = (320usize, 320usize);
    let stride = tiled_row_stride_bytes(format, image_w);
    let size = tiled_size_bytes(format, image_w, image_h);

    // Fill the source image through a full-surface store.
    let full = Region::new(0, 0, image_w, image_h);
    let linear_stride = linear_row_stride_bytes(format, image_w, ZsInterleave::None);
    let rows = image_h.div_ceil(format.block_height as usize);
    let mut linear = vec![0u8; rows * linear_stride];
    let mut seed = copy.seed;
    for byte in linear.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *byte = (seed >> 24) as u8;
    }
    let mut src = vec![0u8; size];
    store_tiled_slice(
        &mut src,
        &linear,
        full,
        stride,
        linear_stride,
        format,
        ZsInterleave::None,
    )
    .expect("full-surface store must be valid");

    let dst_x = copy.dst_x as usize % 64;
    let dst_y = copy.dst_y as usize % 64;
    let src_x = copy.src_x as usize % 64;
    let src_y = copy.src_y as usize % 64;
    let width = copy.width as usize;
    let height = copy.height as usize;

    let mut dst = vec![0u8; size];
    if copy_tiled_slice(
        &mut dst, &src, dst_x, dst_y, src_x, src_y, width, height, stride, stride, format,
    )
    .is_err()
    {
        return;
    }

    let out_stride = linear_row_stride_bytes(format, width, ZsInterleave::None);
    let out_rows = height.div_ceil(format.block_height as usize);
    let mut got = vec![0u8; out_rows * out_stride];
    let mut want = vec![0u8; out_rows * out_stride];
    load_tiled_slice(
        &mut got,
        &dst,
        Region::new(dst_x, dst_y, width, height),
        out_stride,
        stride,
        format,
        ZsInterleave::None,
    )
    .expect("destination readback must be valid");
    load_tiled_slice(
        &mut want,
        &src,
        Region::new(src_x, src_y, width, height),
        out_stride,
        stride,
        format,
        ZsInterleave::None,
    )
    .expect("source readback must be valid");
    assert_eq!(got, want, "copied region doesn't match the source");
});
