use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dasp_signal::{rate, Signal};
use phyfft::kernel::KernelLifecycle;
use phyfft::signal::traits::{BroadcastPower1D, ComplexSpectrum1D};
use phyfft::signal::{ComplexFftConfig, ComplexFftKernel, PowerConfig, PowerKernel};

fn complex_forward_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("complex_forward_fft_f32");
    for n in [256usize, 1000, 4096] {
        let kernel = ComplexFftKernel::try_new(ComplexFftConfig { n })
            .expect("benchmark length should be valid");
        let mut re = rate(1000.).const_hz(50.).sine();
        let mut im = rate(1000.).const_hz(120.).sine();
        let xy: Vec<f32> = (0..n)
            .flat_map(|_| [re.next() as f32, im.next() as f32])
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &xy, |b, xy| {
            b.iter(|| black_box(kernel.run_alloc(black_box(xy)).expect("valid buffer")));
        });
    }
    group.finish();
}

fn broadcast_power(c: &mut Criterion) {
    let kernel = PowerKernel::try_new(PowerConfig).expect("stateless kernel");
    let bases: Vec<f64> = (0..10_000).map(|i| 1.0 + i as f64 * 1e-3).collect();
    let exponents = vec![2.5f64];
    c.bench_function("broadcast_power_f64_10000x1", |b| {
        b.iter(|| {
            black_box(
                kernel
                    .run_alloc(black_box(&bases), black_box(&exponents))
                    .expect("slices"),
            )
        });
    });
}

criterion_group!(benches, complex_forward_fft, broadcast_power);
criterion_main!(benches);
