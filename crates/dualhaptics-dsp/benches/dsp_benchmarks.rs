//! DSP Benchmarks
//!
//! Criterion benchmarks for the producer hot path: one filtered resample
//! cycle must finish well inside the 21 ms it takes to receive a window.

use criterion::{Criterion, criterion_group, criterion_main};
use dualhaptics_dsp::prelude::*;

fn sine_window() -> [f32; RESAMPLE_INPUT_SAMPLES] {
    let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];
    for (i, frame) in window.chunks_exact_mut(2).enumerate() {
        let t = i as f32 / SOURCE_RATE_HZ as f32;
        let s = (2.0 * std::f32::consts::PI * 440.0 * t).sin();
        frame[0] = s;
        frame[1] = s;
    }
    window
}

fn bench_sample_filter(c: &mut Criterion) {
    let mut filter = SampleFilter::new(0.95);
    let mut window = sine_window();

    c.bench_function("sample_filter_window", |b| {
        b.iter(|| {
            filter.apply_interleaved(std::hint::black_box(&mut window));
        })
    });
}

fn bench_resample_block(c: &mut Criterion) {
    let window = sine_window();

    c.bench_function("resample_block", |b| {
        b.iter(|| resample_block(std::hint::black_box(&window)))
    });
}

fn bench_accumulate_and_resample(c: &mut Criterion) {
    let input = sine_window();
    let mut acc = BlockAccumulator::with_capacity_blocks(4);
    let mut window = [0.0f32; RESAMPLE_INPUT_SAMPLES];

    c.bench_function("accumulate_and_resample", |b| {
        b.iter(|| {
            let pushed = acc.push(std::hint::black_box(&input));
            while acc.pop_block(&mut window) {
                std::hint::black_box(resample_block(&window));
            }
            pushed
        })
    });
}

criterion_group!(
    benches,
    bench_sample_filter,
    bench_resample_block,
    bench_accumulate_and_resample
);
criterion_main!(benches);
