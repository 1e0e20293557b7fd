// SPDX-License-Identifier: PMPL-1.0-or-later
//! Benchmarks for the healthcheck pipeline stages

use a11y_healthcheck::mapper::map_to_assertions;
use a11y_healthcheck::metadata::sample_button;
use a11y_healthcheck::signals::{color, derive_signals};
use a11y_healthcheck::simulate::{simulate, ContextId, ContextProfile};
use a11y_healthcheck::{Pipeline, SampleSource};
use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_contrast(c: &mut Criterion) {
    let teal = (0x20, 0x6f, 0x77);
    let white = (0xff, 0xff, 0xff);

    c.bench_function("contrast_ratio", |b| {
        b.iter(|| color::contrast_ratio(black_box(teal), black_box(white)))
    });
    c.bench_function("perceptual_contrast", |b| {
        b.iter(|| color::perceptual_contrast(black_box(white), black_box(teal)))
    });
}

fn bench_signals(c: &mut Criterion) {
    let metadata = sample_button();

    c.bench_function("derive_signals", |b| {
        b.iter(|| derive_signals(black_box(&metadata)))
    });
}

fn bench_simulate(c: &mut Criterion) {
    let signals = derive_signals(&sample_button()).expect("sample metadata is well formed");
    let assertions = map_to_assertions(&signals);
    let contexts: Vec<ContextProfile> = ContextId::ALL.into_iter().map(ContextProfile::builtin).collect();

    c.bench_function("simulate_all_contexts", |b| {
        b.iter(|| simulate(black_box(&assertions), black_box(&contexts)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let now = Utc::now();

    c.bench_function("full_pipeline", |b| {
        b.iter(|| pipeline.run_at(black_box(&SampleSource), now))
    });
}

criterion_group!(benches, bench_contrast, bench_signals, bench_simulate, bench_pipeline);
criterion_main!(benches);
