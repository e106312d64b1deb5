use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use harris_detect::{
    init_thread_pool, select_maxima, CrossTerm, GaussianMode, HarrisConfig, HarrisDetector,
    RgbImage, Smoothing,
};

/// Gradient background with bright squares scattered over it
fn create_benchmark_image(rows: usize, cols: usize) -> RgbImage {
    let mut img = RgbImage::new(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            let base = ((c as f32 / cols as f32) * 60.0) as u8 + ((r + c) % 7) as u8;
            img.set(r, c, [base + 40, base + 50, base + 30]);
        }
    }
    for i in 0..20 {
        let cr = (i * 37) % rows.saturating_sub(8).max(1);
        let cc = (i * 53) % cols.saturating_sub(8).max(1);
        for r in cr..(cr + 6).min(rows) {
            for c in cc..(cc + 6).min(cols) {
                img.set(r, c, [230, 230, 230]);
            }
        }
    }
    img
}

/// Pin the global rayon pool to one thread; later calls are no-ops
fn single_threaded() {
    let _ = init_thread_pool(1);
}

fn config(smoothing: Smoothing) -> HarrisConfig {
    HarrisConfig {
        k: 0.04,
        filter_range: 2,
        smoothing,
        cross_term: CrossTerm::AliasVertical,
        n_threads: 1,
    }
}

/// Benchmark full construction per smoothing strategy
fn bench_construction(c: &mut Criterion) {
    single_threaded();
    let mut group = c.benchmark_group("construction");

    let sizes = vec![(64, 64), (256, 256), (512, 512)];
    let strategies = vec![
        ("box_sum", Smoothing::BoxSum),
        ("gauss_literal", Smoothing::Gaussian { mode: GaussianMode::Literal }),
        ("gauss_sliding", Smoothing::Gaussian { mode: GaussianMode::SlidingWindow }),
    ];

    for &(rows, cols) in &sizes {
        let img = create_benchmark_image(rows, cols);
        for (name, smoothing) in &strategies {
            let cfg = config(*smoothing);
            group.bench_with_input(
                BenchmarkId::new(format!("{}x{}", rows, cols), name),
                &(&img, cfg),
                |b, (img, cfg)| {
                    b.iter(|| black_box(HarrisDetector::with_config(*img, cfg).unwrap()))
                },
            );
        }
    }

    group.finish();
}

/// Benchmark maxima selection on cached responses
fn bench_selection(c: &mut Criterion) {
    single_threaded();
    let mut group = c.benchmark_group("selection");

    let img = create_benchmark_image(256, 256);
    let detector = HarrisDetector::with_config(&img, &config(Smoothing::BoxSum)).unwrap();

    for radius in [0usize, 3, 10] {
        group.bench_with_input(BenchmarkId::new("radius", radius), &radius, |b, &radius| {
            b.iter(|| {
                black_box(select_maxima(black_box(detector.responses()), 0.01, 2, radius).unwrap())
            })
        });
    }

    group.bench_function("percentage_full", |b| {
        b.iter(|| black_box(detector.maxima_points(1.0, 3).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_selection);
criterion_main!(benches);
