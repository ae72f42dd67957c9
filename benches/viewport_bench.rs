use criterion::{Criterion, criterion_group, criterion_main};
use feedchart::api::{ViewportConfig, ViewportStateMachine};
use feedchart::core::{
    AxisDomain, AxisRangeTuning, AxisSide, FeedInfo, ParsedSamples, Sample, SeriesDescriptor,
    merge, range_for_sides, reshape_all,
};
use std::hint::black_box;

fn generated_samples(rows: usize, seed: f64) -> ParsedSamples {
    ParsedSamples::from_samples(
        (0..rows)
            .map(|i| {
                let t = i as f64 * 60.0;
                let value = seed + (t * 0.001).sin() * 25.0;
                if i % 3 == 0 {
                    Sample::banded(t, Some(value - 2.0), Some(value), Some(value + 2.0))
                } else {
                    Sample::scalar(t, Some(value))
                }
            })
            .collect(),
    )
}

fn feed_inputs() -> Vec<(SeriesDescriptor, ParsedSamples)> {
    (0..4u64)
        .map(|id| {
            let side = if id % 2 == 0 { AxisSide::Left } else { AxisSide::Right };
            (
                SeriesDescriptor::new(id + 1, format!("feed-{id}"), side),
                generated_samples(10_000, id as f64 * 100.0),
            )
        })
        .collect()
}

fn bench_reshape_and_merge_4x10k(c: &mut Criterion) {
    let inputs = feed_inputs();

    c.bench_function("reshape_and_merge_4x10k", |b| {
        b.iter(|| {
            let frame = merge(reshape_all(black_box(inputs.clone())));
            black_box(frame.data.len());
        })
    });
}

fn bench_axis_range_over_loaded_frame(c: &mut Criterion) {
    let inputs = feed_inputs();
    let descriptors: Vec<SeriesDescriptor> =
        inputs.iter().map(|(descriptor, _)| descriptor.clone()).collect();
    let frame = merge(reshape_all(inputs));

    c.bench_function("axis_range_over_40k_rows", |b| {
        b.iter(|| {
            let _ = range_for_sides(
                black_box(&descriptors),
                black_box(&frame.data),
                black_box(60_000.0),
                black_box(420_000.0),
                AxisDomain::default(),
                AxisRangeTuning::default(),
            );
        })
    });
}

fn bench_navigation_round(c: &mut Criterion) {
    let mut machine = ViewportStateMachine::new(ViewportConfig::default()).expect("machine init");
    machine.add_feed(FeedInfo::new(1u64, "mains", 0.0, 63_072_000.0), AxisSide::Left);
    machine.add_feed(FeedInfo::new(2u64, "solar", 86_400.0, 31_536_000.0), AxisSide::Right);

    c.bench_function("navigation_round", |b| {
        b.iter(|| {
            machine.zoom_out();
            machine.pan_forward();
            machine.zoom_in();
            machine.go_to_end();
            machine.go_to_start();
            black_box(machine.state().nav_capabilities);
        })
    });
}

criterion_group!(
    benches,
    bench_reshape_and_merge_4x10k,
    bench_axis_range_over_loaded_frame,
    bench_navigation_round
);
criterion_main!(benches);
