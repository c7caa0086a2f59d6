use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use utile_tiling::layout::{linear_row_stride_bytes, tiled_row_stride_bytes, tiled_size_bytes};
use utile_tiling::{copy_tiled, load_tiled, store_tiled, BlockFormat, Region, ZsInterleave};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn fill_pattern(buf: &mut [u8], mut seed: u32) {
    for byte in buf.iter_mut() {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        *byte = (seed >> 24) as u8;
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let format = BlockFormat::uncompressed(32);
    let (w, h) = (512usize, 512usize);
    let tiled_stride = tiled_row_stride_bytes(format, w);
    let linear_stride = linear_row_stride_bytes(format, w, ZsInterleave::None);
    let size = tiled_size_bytes(format, w, h);

    let mut linear = vec![0u8; h * linear_stride];
    fill_pattern(&mut linear, 0x1234);
    let mut tiled = vec![0u8; size];
    let mut tiled_dst = vec![0u8; size];

    let mut group = c.benchmark_group("tiling_access");
    group.throughput(Throughput::Bytes(linear.len() as u64));

    group.bench_function("store aligned 512x512 bpp32", |b| {
        b.iter(|| unsafe {
            store_tiled(
                black_box(tiled.as_mut_ptr()),
                black_box(linear.as_ptr()),
                0,
                0,
                w,
                h,
                tiled_stride,
                linear_stride,
                format,
                ZsInterleave::None,
            )
        })
    });

    group.bench_function("load aligned 512x512 bpp32", |b| {
        b.iter(|| unsafe {
            load_tiled(
                black_box(linear.as_mut_ptr()),
                black_box(tiled.as_ptr()),
                0,
                0,
                w,
                h,
                linear_stride,
                tiled_stride,
                format,
                ZsInterleave::None,
            )
        })
    });

    let region = Region::new(3, 5, 501, 499);
    group.bench_function("store unaligned 501x499 bpp32", |b| {
        b.iter(|| unsafe {
            store_tiled(
                black_box(tiled.as_mut_ptr()),
                black_box(linear.as_ptr()),
                region.x,
                region.y,
                region.width,
                region.height,
                tiled_stride,
                linear_stride,
                format,
                ZsInterleave::None,
            )
        })
    });

    group.bench_function("copy misaligned 256x256 bpp32", |b| {
        b.iter(|| unsafe {
            copy_tiled(
                black_box(tiled_dst.as_mut_ptr()),
                black_box(tiled.as_ptr()),
                17,
                9,
                3,
                5,
                256,
                256,
                tiled_stride,
                tiled_stride,
                format,
            )
            .unwrap()
        })
    });

    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
