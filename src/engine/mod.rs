//! Voice management and mixing - the heart of the pad.
//!
//! [`ToneEngine`] is the single, explicitly owned engine context: it holds
//! the mixer, the table of active voice groups, the memoized noise buffer
//! and the custom-wave registry. Front ends drive it through [`Command`]
//! messages; the audio callback drives [`ToneEngine::render_block`].

pub mod command;
pub mod mixer;
#[cfg(feature = "rtrb")]
pub mod scope;
pub mod voice;

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    dsp::{
        noise,
        oscillator::{Waveform, Wavetable},
    },
    engine::{
        command::Command,
        mixer::{GainTarget, Mixer, Timbre},
        voice::{Generator, GeneratorSource, VoiceGroup},
    },
    notes::NoteId,
    MAX_BLOCK_SIZE,
};

#[cfg(feature = "rtrb")]
use crate::engine::scope::ScopeTap;

/// The voice/mixer synthesis engine.
///
/// Every note identity is either Idle (no entry in the voice table) or
/// Playing (exactly one [`VoiceGroup`]). `trigger`, `stop` and `toggle`
/// are the only operations that construct or destroy groups.
pub struct ToneEngine {
    sample_rate: f32,
    mixer: Mixer,
    voices: HashMap<NoteId, VoiceGroup>,
    custom_waves: HashMap<Waveform, Arc<Wavetable>>,
    noise: Option<Arc<[f32]>>,
    buses: [Vec<f32>; 5],
    temp: Vec<f32>,
    #[cfg(feature = "rtrb")]
    scope: Option<ScopeTap>,
}

impl ToneEngine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            mixer: Mixer::new(sample_rate),
            voices: HashMap::new(),
            custom_waves: HashMap::new(),
            noise: None,
            buses: std::array::from_fn(|_| vec![0.0; MAX_BLOCK_SIZE]),
            temp: vec![0.0; MAX_BLOCK_SIZE],
            #[cfg(feature = "rtrb")]
            scope: None,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Attach the engine half of a scope tap. The render path feeds it
    /// with every master-output sample from then on.
    #[cfg(feature = "rtrb")]
    pub fn attach_scope(&mut self, tap: ScopeTap) {
        self.scope = Some(tap);
    }

    /// Replace the canonical shape of one pitched timbre with a custom
    /// wavetable. Applies to generators created after the call; running
    /// generators keep the shape they resolved at trigger time.
    pub fn register_custom_wave(&mut self, waveform: Waveform, table: Arc<Wavetable>) {
        self.custom_waves.insert(waveform, table);
    }

    /// The shared noise buffer, generated on first use and memoized.
    pub fn noise_buffer(&mut self) -> Arc<[f32]> {
        let sample_rate = self.sample_rate;
        let buffer = self.noise.get_or_insert_with(|| {
            let buffer = noise::generate(sample_rate);
            log::debug!("allocated noise buffer ({} samples)", buffer.len());
            buffer
        });
        Arc::clone(buffer)
    }

    /// Forward a gain change to the mixer.
    pub fn set_gain(&mut self, target: GainTarget, value: f32) {
        match target {
            GainTarget::Timbre(timbre) => self.mixer.set_timbre_gain(timbre, value),
            GainTarget::Master => self.mixer.set_master_gain(value),
        }
    }

    /// The pad-button entry point: trigger when Idle, stop when Playing.
    pub fn toggle(&mut self, note: NoteId, frequency: f32) {
        if self.voices.contains_key(&note) {
            self.stop(note);
        } else {
            self.trigger(note, frequency);
        }
    }

    /// Idle -> Playing. A no-op when the note already has a voice group.
    ///
    /// One generator is created per timbre that is audible *now*; later
    /// gain changes re-balance running generators but never add or remove
    /// them. If every timbre is muted the group is created empty and the
    /// note still occupies its Playing slot.
    pub fn trigger(&mut self, note: NoteId, frequency: f32) {
        if self.voices.contains_key(&note) {
            return;
        }

        let mut group = VoiceGroup::new(note);
        for timbre in Timbre::ALL {
            if !self.mixer.is_audible(timbre) {
                continue;
            }
            let source = match timbre.waveform() {
                None => GeneratorSource::Noise(self.noise_buffer()),
                Some(wave) => match self.custom_waves.get(&wave) {
                    Some(table) => GeneratorSource::Custom(Arc::clone(table)),
                    None => GeneratorSource::Canonical(wave),
                },
            };
            group.push(Generator::new(timbre, source, frequency));
        }

        log::debug!(
            "note {note} on: {} generator(s) at {frequency} Hz",
            group.generators().len()
        );
        self.voices.insert(note, group);
    }

    /// Playing -> Idle. Stopping an Idle note is a no-op, never an error.
    pub fn stop(&mut self, note: NoteId) {
        if self.voices.remove(&note).is_some() {
            log::debug!("note {note} off");
        }
    }

    /// Stop every playing note. Order is immaterial; groups are independent.
    pub fn stop_all(&mut self) {
        if !self.voices.is_empty() {
            log::debug!("stopping all {} note(s)", self.voices.len());
            self.voices.clear();
        }
    }

    pub fn is_playing(&self, note: NoteId) -> bool {
        self.voices.contains_key(&note)
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn voice(&self, note: NoteId) -> Option<&VoiceGroup> {
        self.voices.get(&note)
    }

    /// Dispatch one front-end command synchronously.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Toggle { note, frequency } => self.toggle(note, frequency),
            Command::Trigger { note, frequency } => self.trigger(note, frequency),
            Command::Stop { note } => self.stop(note),
            Command::StopAll => self.stop_all(),
            Command::SetGain { target, value } => self.set_gain(target, value),
        }
    }

    /// Render one block of the mixed master output into `out`.
    ///
    /// Each generator renders into scratch and accumulates onto its
    /// timbre's bus; the buses are then combined sample by sample under
    /// the smoothed timbre and master gains, so knob moves reach running
    /// notes mid-block.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        let frames = out.len().min(MAX_BLOCK_SIZE);
        let sample_rate = self.sample_rate;

        for bus in self.buses.iter_mut() {
            bus[..frames].fill(0.0);
        }

        for group in self.voices.values_mut() {
            for generator in group.generators_mut() {
                let temp = &mut self.temp[..frames];
                generator.render(temp, sample_rate);

                let bus = &mut self.buses[generator.timbre().index()];
                for (b, &s) in bus[..frames].iter_mut().zip(temp.iter()) {
                    *b += s;
                }
            }
        }

        for (i, sample) in out[..frames].iter_mut().enumerate() {
            let (gains, master) = self.mixer.step();
            let mut acc = 0.0;
            for (bus, gain) in self.buses.iter().zip(gains.iter()) {
                acc += bus[i] * gain;
            }
            *sample = acc * master;
        }

        #[cfg(feature = "rtrb")]
        if let Some(scope) = self.scope.as_mut() {
            scope.push_block(&out[..frames]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::PitchClass;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn la4() -> NoteId {
        NoteId::new(PitchClass::La, 4).unwrap()
    }

    #[test]
    fn trigger_is_guarded_against_double_groups() {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        engine.trigger(la4(), 440.0);
        engine.trigger(la4(), 440.0);
        assert_eq!(engine.active_voices(), 1);
    }

    #[test]
    fn render_produces_signal_for_an_audible_note() {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        engine.trigger(la4(), 440.0);

        let mut out = vec![0.0f32; 512];
        engine.render_block(&mut out);

        assert!(out.iter().any(|&s| s.abs() > 0.0));
        assert!(out.iter().all(|&s| s.is_finite()));
    }

    #[test]
    fn render_is_silent_with_no_notes() {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        let mut out = vec![1.0f32; 256];
        engine.render_block(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn gain_change_reaches_a_running_note() {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        engine.trigger(la4(), 440.0);

        // Let the note run, then mute the master and render well past the
        // smoothing horizon. The running generator must fade to silence
        // without being recreated.
        let mut out = vec![0.0f32; 1024];
        engine.render_block(&mut out);
        engine.set_gain(GainTarget::Master, 0.0);
        for _ in 0..10 {
            engine.render_block(&mut out);
        }

        let peak = out.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!(peak < 1e-3, "expected faded output, peak was {peak}");
        assert_eq!(engine.active_voices(), 1);
    }

    #[test]
    fn commands_map_onto_engine_operations() {
        let mut engine = ToneEngine::new(SAMPLE_RATE);
        engine.apply(Command::Toggle {
            note: la4(),
            frequency: 440.0,
        });
        assert!(engine.is_playing(la4()));

        engine.apply(Command::SetGain {
            target: GainTarget::Timbre(Timbre::Noise),
            value: 0.8,
        });
        assert!(engine.mixer().is_audible(Timbre::Noise));

        engine.apply(Command::StopAll);
        assert_eq!(engine.active_voices(), 0);
    }
}
