use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_dmtx::{DmtxScanner, Frame, RegionScanner, ScanConfig, ScanPipeline};

#[path = "../tests/common/mod.rs"]
mod common;

use common::{Canvas, TestSymbol, gif};

fn bench_scan_png_small(c: &mut Criterion) {
    let blob = Canvas::with_symbol(&TestSymbol::ascii(b"Hello, World!"), 4, 0.0).png();
    let pipeline = ScanPipeline::default();
    c.bench_function("scan_png_18x18_symbol", |b| {
        b.iter(|| pipeline.run(black_box(&blob)))
    });
}

fn bench_scan_rotated(c: &mut Criterion) {
    let symbol = TestSymbol::ascii(&[b'y'; 60]);
    let canvas = Canvas::with_symbol(&symbol, 5, 33.0);
    let frame = Frame::new(canvas.width, canvas.height, canvas.rgb_bytes()).unwrap();
    let scanner = DmtxScanner::new(ScanConfig::default());
    c.bench_function("scan_frame_32x32_rotated", |b| {
        b.iter(|| scanner.scan_all(black_box(&frame), None))
    });
}

fn bench_scan_shrink(c: &mut Criterion) {
    let symbol = TestSymbol::ascii(&[b'Q'; 200]);
    let canvas = Canvas::with_symbol(&symbol, 6, 0.0);
    let frame = Frame::new(canvas.width, canvas.height, canvas.rgb_bytes()).unwrap();
    for shrink in [1, 2] {
        let scanner = DmtxScanner::new(ScanConfig::default().with_shrink_min(shrink));
        c.bench_function(&format!("scan_frame_52x52_shrink_{shrink}"), |b| {
            b.iter(|| scanner.scan_all(black_box(&frame), None))
        });
    }
}

fn bench_scan_gif_frames(c: &mut Criterion) {
    let first = Canvas::with_symbol(&TestSymbol::ascii(b"FRAME-ONE"), 4, 0.0);
    let second = Canvas::with_symbol(&TestSymbol::ascii(b"FRAME-TWO"), 4, 0.0);
    let blob = gif(&[first, second]);
    let pipeline = ScanPipeline::default();
    c.bench_function("scan_gif_two_frames", |b| {
        b.iter(|| pipeline.run(black_box(&blob)))
    });
}

fn bench_scan_blank_large(c: &mut Criterion) {
    let frame = Frame::new(1920, 1080, vec![255u8; 1920 * 1080 * 3]).unwrap();
    let scanner = DmtxScanner::new(ScanConfig::default());
    c.bench_function("scan_frame_blank_1920x1080", |b| {
        b.iter(|| scanner.scan_all(black_box(&frame), None))
    });
}

criterion_group!(
    benches,
    bench_scan_png_small,
    bench_scan_rotated,
    bench_scan_shrink,
    bench_scan_gif_frames,
    bench_scan_blank_large
);
criterion_main!(benches);
