use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dasp_signal::{rate, Signal};
use phyfft::kernel::KernelLifecycle;
use phyfft::signal::traits::{AutoCorrelate1D, CrossCorrelate1D};
use phyfft::signal::{AutoCorrelateKernel, CorrelateConfig, CrossCorrelateKernel};
use rand::Rng;

/// One second of a 440 Hz tone at 48 kHz plus uniform noise, the kind of
/// buffer a pitch detector feeds into the auto-correlation.
fn noisy_tone(len: usize) -> Vec<f32> {
    let mut rng = rand::rng();
    let mut tone = rate(48_000.).const_hz(440.).sine();
    (0..len)
        .map(|_| tone.next() as f32 + rng.random_range(-0.1f32..0.1))
        .collect()
}

fn auto_correlate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_correlate_f32");
    for len in [1024usize, 4096, 48_000] {
        let kernel = AutoCorrelateKernel::try_new(CorrelateConfig { n: len })
            .expect("benchmark length should be valid");
        let input = noisy_tone(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                kernel
                    .run_in_place(black_box(buf.as_mut_slice()))
                    .expect("benchmark buffer should satisfy kernel length");
                black_box(buf);
            });
        });
    }
    group.finish();
}

fn cross_correlate_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("cross_correlate_f32");
    for len in [1024usize, 4096, 48_000] {
        let kernel = CrossCorrelateKernel::try_new(CorrelateConfig { n: len })
            .expect("benchmark length should be valid");
        let x = noisy_tone(len);
        let mut y = x.clone();
        y.rotate_right(len / 7);
        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(x, y),
            |b, (x, y)| {
                b.iter(|| {
                    black_box(
                        kernel
                            .run_alloc(black_box(x.as_slice()), black_box(y.as_slice()))
                            .expect("benchmark buffers should satisfy kernel length"),
                    );
                });
            },
        );
    }
    group.finish();
}

/// Host-style padded correlation where a short pattern slides along a longer trace.
fn sliding_cross_correlation(c: &mut Criterion) {
    let trace = noisy_tone(8192);
    let pattern = trace[2000..2512].to_vec();
    c.bench_function("sliding_cross_correlation_8192x512", |b| {
        b.iter(|| {
            black_box(
                phyfft::signal::sliding_cross_correlation(
                    black_box(&trace),
                    black_box(&pattern),
                )
                .expect("non-empty inputs"),
            );
        });
    });
}

criterion_group!(
    benches,
    auto_correlate_sizes,
    cross_correlate_sizes,
    sliding_cross_correlation
);
criterion_main!(benches);
