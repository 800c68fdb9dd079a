// SPDX-License-Identifier: LGPL-3.0-or-later

//! Criterion benchmarks for the stereo processor and its filter design.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use simple_eq::filters::butterworth::{make_highpass_cascade, make_lowpass_cascade};
use simple_eq::filters::cascade::CutCascade;
use simple_eq::filters::coeffs::make_peak_coefficients;
use simple_eq::{ChainSettings, EqProcessor, Slope};

const BUF_SIZE: usize = 1024;
const SR: f32 = 48000.0;

/// Generate a deterministic white noise buffer using a simple LCG.
fn white_noise(len: usize) -> Vec<f32> {
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as i32) as f32 / (i32::MAX as f32)
        })
        .collect()
}

fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("processor");
    let input = white_noise(BUF_SIZE);
    let mut left = vec![0.0f32; BUF_SIZE];
    let mut right = vec![0.0f32; BUF_SIZE];

    for slope in [Slope::Slope12, Slope::Slope48] {
        group.bench_function(format!("stereo_{}db", slope.db_per_octave()), |b| {
            let settings = ChainSettings {
                low_cut_freq: 80.0,
                low_cut_slope: slope,
                high_cut_freq: 12000.0,
                high_cut_slope: slope,
                peak_freq: 1000.0,
                peak_gain_db: 3.0,
                peak_q: 1.0,
            };
            let mut eq = EqProcessor::new();
            if eq.prepare(SR, BUF_SIZE).is_err() {
                return;
            }

            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                eq.process_with_settings(&settings, black_box(&mut left), black_box(&mut right));
            });
        });
    }

    group.bench_function("stereo_from_parameters", |b| {
        let mut eq = EqProcessor::new();
        if eq.prepare(SR, BUF_SIZE).is_err() {
            return;
        }

        b.iter(|| {
            left.copy_from_slice(&input);
            right.copy_from_slice(&input);
            eq.process(black_box(&mut left), black_box(&mut right));
        });
    });

    group.finish();
}

fn bench_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("design");

    group.bench_function("peak", |b| {
        b.iter(|| make_peak_coefficients(SR, black_box(1000.0), black_box(2.0), black_box(1.5)));
    });

    for slope in Slope::ALL {
        group.bench_function(format!("cut_order{}", slope.order()), |b| {
            b.iter(|| {
                (
                    make_highpass_cascade(black_box(80.0), SR, slope.order()),
                    make_lowpass_cascade(black_box(12000.0), SR, slope.order()),
                )
            });
        });
    }

    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut_cascade");
    let input = white_noise(BUF_SIZE);
    let mut buf = vec![0.0f32; BUF_SIZE];

    for slope in Slope::ALL {
        group.bench_function(format!("highpass_{}db", slope.db_per_octave()), |b| {
            let mut cascade = CutCascade::new();
            cascade.update(&make_highpass_cascade(1000.0, SR, slope.order()), slope);

            b.iter(|| {
                buf.copy_from_slice(&input);
                cascade.process_inplace(black_box(&mut buf));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_processor, bench_design, bench_cascade);
criterion_main!(benches);
