use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tonepad::{
    engine::{
        mixer::{GainTarget, Timbre},
        ToneEngine,
    },
    notes,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK_SIZE: usize = 512;

fn bench_render_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_block");

    group.bench_function("single sine note", |b| {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        let note = notes::catalogue().nth(30).unwrap();
        engine.trigger(note, note.frequency());

        let mut out = vec![0.0f32; BLOCK_SIZE];
        b.iter(|| {
            engine.render_block(black_box(&mut out));
        });
    });

    group.bench_function("ten notes, all timbres", |b| {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        for timbre in Timbre::ALL {
            engine.set_gain(GainTarget::Timbre(timbre), 0.5);
        }
        for note in notes::catalogue().step_by(6).take(10) {
            engine.trigger(note, note.frequency());
        }

        let mut out = vec![0.0f32; BLOCK_SIZE];
        b.iter(|| {
            engine.render_block(black_box(&mut out));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render_block);
criterion_main!(benches);
