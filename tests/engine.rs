//! End-to-end checks of the voice/mixer state machine.

use std::sync::Arc;

use tonepad::{
    dsp::oscillator::{Waveform, Wavetable},
    engine::{
        mixer::{GainTarget, Timbre},
        voice::GeneratorSource,
        ToneEngine,
    },
    notes::{self, NoteId, PitchClass},
};

const SAMPLE_RATE: f32 = 48_000.0;

fn la4() -> NoteId {
    NoteId::new(PitchClass::La, 4).unwrap()
}

fn do1() -> NoteId {
    NoteId::new(PitchClass::Do, 1).unwrap()
}

/// Engine with every timbre muted, for building up explicit mixes.
fn muted_engine() -> ToneEngine {
    let mut engine = ToneEngine::new(SAMPLE_RATE);
    for timbre in Timbre::ALL {
        engine.set_gain(GainTarget::Timbre(timbre), 0.0);
    }
    engine
}

#[test]
fn toggle_pairs_return_a_note_to_idle() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);

    engine.toggle(la4(), 440.0);
    assert!(engine.is_playing(la4()));

    engine.toggle(la4(), 440.0);
    assert!(!engine.is_playing(la4()));
    assert_eq!(engine.active_voices(), 0, "no leaked generators");
}

#[test]
fn at_most_one_voice_group_per_note() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);

    // Arbitrary interleaving of toggles across two notes.
    engine.toggle(la4(), 440.0);
    engine.toggle(do1(), 32.7);
    engine.trigger(la4(), 440.0); // already playing: absorbed
    engine.trigger(la4(), 440.0);
    assert_eq!(engine.active_voices(), 2);

    engine.toggle(do1(), 32.7);
    engine.toggle(do1(), 32.7);
    assert_eq!(engine.active_voices(), 2);

    engine.toggle(do1(), 32.7);
    assert_eq!(engine.active_voices(), 1);
}

#[test]
fn stopping_an_idle_note_is_a_noop() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);
    engine.stop(la4());
    assert_eq!(engine.active_voices(), 0);

    // And it does not disturb other playing notes.
    engine.trigger(do1(), 32.7);
    engine.stop(la4());
    assert!(engine.is_playing(do1()));
}

#[test]
fn muted_timbre_is_excluded_and_never_added_retroactively() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);
    engine.set_gain(GainTarget::Timbre(Timbre::Sine), 0.0);
    engine.set_gain(GainTarget::Timbre(Timbre::Square), 0.6);

    engine.trigger(la4(), 440.0);
    let group = engine.voice(la4()).unwrap();
    assert!(group
        .generators()
        .iter()
        .all(|g| g.timbre() != Timbre::Sine));
    assert_eq!(group.generators().len(), 1);

    // Unmuting afterward must not grow the running group.
    engine.set_gain(GainTarget::Timbre(Timbre::Sine), 0.9);
    assert_eq!(engine.voice(la4()).unwrap().generators().len(), 1);
}

#[test]
fn all_timbres_muted_still_occupies_the_playing_slot() {
    let mut engine = muted_engine();

    engine.trigger(la4(), 440.0);
    let group = engine.voice(la4()).unwrap();
    assert!(group.is_silent());
    assert!(engine.is_playing(la4()));

    // The silent group still toggles back to Idle normally.
    engine.toggle(la4(), 440.0);
    assert!(!engine.is_playing(la4()));
}

#[test]
fn stop_all_returns_every_note_to_idle() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);
    for note in notes::catalogue().take(12) {
        engine.trigger(note, note.frequency());
    }
    assert_eq!(engine.active_voices(), 12);

    engine.stop_all();
    assert_eq!(engine.active_voices(), 0);
    for note in notes::catalogue().take(12) {
        assert!(!engine.is_playing(note));
    }
}

#[test]
fn noise_buffer_is_two_seconds_bounded_and_stable() {
    let mut engine = ToneEngine::new(SAMPLE_RATE);

    let first = engine.noise_buffer();
    assert_eq!(first.len(), 2 * SAMPLE_RATE as usize);
    assert!(first.iter().all(|s| (-1.0..=1.0).contains(s)));

    // Referential stability: repeated calls hand back the same buffer.
    let second = engine.noise_buffer();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn la4_with_only_sine_audible_has_one_sine_generator() {
    let mut engine = muted_engine();
    engine.set_gain(GainTarget::Timbre(Timbre::Sine), 0.5);

    engine.toggle(la4(), 440.0);
    let group = engine.voice(la4()).unwrap();
    assert_eq!(group.generators().len(), 1);

    let generator = &group.generators()[0];
    assert_eq!(generator.timbre(), Timbre::Sine);
    assert_eq!(generator.frequency(), 440.0);
    assert!(matches!(
        generator.source(),
        GeneratorSource::Canonical(Waveform::Sine)
    ));

    engine.toggle(la4(), 440.0);
    assert!(!engine.is_playing(la4()));
    assert!(engine.voice(la4()).is_none());
}

#[test]
fn do1_with_sine_and_noise_gets_both_generators() {
    let mut engine = muted_engine();
    engine.set_gain(GainTarget::Timbre(Timbre::Sine), 0.5);
    engine.set_gain(GainTarget::Timbre(Timbre::Noise), 0.4);

    engine.trigger(do1(), 32.7);
    let group = engine.voice(do1()).unwrap();
    assert_eq!(group.generators().len(), 2);

    let sine = group
        .generators()
        .iter()
        .find(|g| g.timbre() == Timbre::Sine)
        .expect("sine generator");
    assert_eq!(sine.frequency(), 32.7);

    let noise = group
        .generators()
        .iter()
        .find(|g| g.timbre() == Timbre::Noise)
        .expect("noise generator");
    assert!(matches!(noise.source(), GeneratorSource::Noise(_)));
}

#[test]
fn registered_custom_wave_replaces_the_canonical_shape() {
    let mut engine = muted_engine();
    engine.set_gain(GainTarget::Timbre(Timbre::Square), 0.5);

    let table = Arc::new(Wavetable::from_samples(vec![0.0, 1.0, 0.0, -1.0]));
    engine.register_custom_wave(Waveform::Square, table);

    engine.trigger(la4(), 440.0);
    let group = engine.voice(la4()).unwrap();
    assert!(matches!(
        group.generators()[0].source(),
        GeneratorSource::Custom(_)
    ));

    // Other pitched timbres are untouched by the registration.
    engine.set_gain(GainTarget::Timbre(Timbre::Triangle), 0.5);
    engine.trigger(do1(), 32.7);
    let group = engine.voice(do1()).unwrap();
    let triangle = group
        .generators()
        .iter()
        .find(|g| g.timbre() == Timbre::Triangle)
        .unwrap();
    assert!(matches!(
        triangle.source(),
        GeneratorSource::Canonical(Waveform::Triangle)
    ));
}

#[test]
fn generators_of_one_trigger_start_phase_aligned() {
    let mut engine = muted_engine();
    engine.set_gain(GainTarget::Timbre(Timbre::Sine), 1.0);
    engine.set_gain(GainTarget::Timbre(Timbre::Triangle), 1.0);
    engine.set_gain(GainTarget::Master, 1.0);

    engine.trigger(la4(), 440.0);

    // Both shapes start their cycle at zero, so the very first rendered
    // sample of the mix is (near) zero rather than a click.
    let mut out = vec![0.0f32; 64];
    engine.render_block(&mut out);
    assert!(out[0].abs() < 0.01, "onset should be click-free, got {}", out[0]);
}
