use std::cell::Cell;
use std::f32::consts::PI;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orient_fusion::{
    Acceleration, AngleUnit, AngularRate, Clock, ComplementaryFilter, OrientationProcessor,
};
use rand::prelude::*;
use rand_pcg::Pcg64;

struct BenchClock(Cell<u64>);

impl Clock for BenchClock {
    fn now_us(&self) -> u64 {
        self.0.get()
    }
}

// Pre-generated sensor data to eliminate RNG overhead during benchmarks
struct PreGeneratedData {
    samples: Vec<(Acceleration, AngularRate)>,
    index: usize,
}

impl PreGeneratedData {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.01; // 100Hz sample rate
            let motion_phase = time * 0.5 * 2.0 * PI;

            let accelerometer = Acceleration::new(
                -1.0 * motion_phase.sin() + rng.random_range(-0.02..0.02),
                1.0 * motion_phase.cos() + rng.random_range(-0.02..0.02),
                9.81 + rng.random_range(-0.02..0.02),
            );

            let gyroscope = AngularRate::new(
                0.2 * motion_phase.sin() + rng.random_range(-0.01..0.01),
                0.2 * (motion_phase * 1.3).cos() + rng.random_range(-0.01..0.01),
                rng.random_range(-0.01..0.01),
            );

            samples.push((accelerometer, gyroscope));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> (Acceleration, AngularRate) {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

/// Benchmark a filter update with an explicit time step
fn bench_filter_update(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let mut filter = ComplementaryFilter::new(&clock);
    let mut data = PreGeneratedData::new(1_000, 42);

    c.bench_function("filter_update", |b| {
        b.iter(|| {
            let (accelerometer, gyroscope) = data.next();
            filter.update(
                black_box(accelerometer),
                black_box(gyroscope),
                black_box(Some(0.01)),
            )
        })
    });
}

/// Benchmark a filter update that measures its own time step
fn bench_filter_update_measured(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let mut filter = ComplementaryFilter::new(&clock);
    let mut data = PreGeneratedData::new(1_000, 43);

    c.bench_function("filter_update_measured", |b| {
        b.iter(|| {
            clock.0.set(clock.0.get() + 10_000);
            let (accelerometer, gyroscope) = data.next();
            filter.update(black_box(accelerometer), black_box(gyroscope), None)
        })
    });
}

/// Benchmark an accepted processor update (bias removal plus filter)
fn bench_processor_update(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let mut processor = OrientationProcessor::new(&clock);
    processor.set_gyro_offset(AngularRate::new(0.01, -0.02, 0.005));
    let mut data = PreGeneratedData::new(1_000, 44);

    c.bench_function("processor_update", |b| {
        b.iter(|| {
            clock.0.set(clock.0.get() + 10_000);
            let (accelerometer, gyroscope) = data.next();
            processor.update(black_box(accelerometer), black_box(gyroscope))
        })
    });
}

/// Benchmark a rate-gated processor call that is skipped
fn bench_processor_gated(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let mut processor = OrientationProcessor::new(&clock);
    let (accelerometer, gyroscope) = PreGeneratedData::new(1, 45).next();

    c.bench_function("processor_update_gated", |b| {
        b.iter(|| processor.update(black_box(accelerometer), black_box(gyroscope)))
    });
}

/// Benchmark the accelerometer-only angle computation
fn bench_accelerometer_angles(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let filter = ComplementaryFilter::new(&clock);
    let accelerometer = Acceleration::new(-1.2, 0.8, 9.6);

    c.bench_function("accelerometer_angles", |b| {
        b.iter(|| filter.accelerometer_angles(black_box(&accelerometer)))
    });
}

/// Benchmark reading the estimate in degrees
fn bench_angles_degrees(c: &mut Criterion) {
    let clock = BenchClock(Cell::new(0));
    let filter = ComplementaryFilter::new(&clock);

    c.bench_function("angles_degrees", |b| {
        b.iter(|| black_box(filter.angles(AngleUnit::Degrees)))
    });
}

criterion_group!(
    benches,
    bench_filter_update,
    bench_filter_update_measured,
    bench_processor_update,
    bench_processor_gated,
    bench_accelerometer_angles,
    bench_angles_degrees
);

criterion_main!(benches);
