use std::sync::Arc;

use crate::dsp::oscillator::{Phase, Waveform, Wavetable};
use crate::engine::mixer::Timbre;
use crate::notes::NoteId;

/// How a generator produces samples. Resolved once at creation time, so
/// the render path is a plain match instead of a name lookup.
pub enum GeneratorSource {
    /// One of the four built-in periodic shapes.
    Canonical(Waveform),
    /// A custom wavetable registered for this timbre before the trigger.
    Custom(Arc<Wavetable>),
    /// The shared noise buffer, looped indefinitely.
    Noise(Arc<[f32]>),
}

/// One running sound-producing unit.
///
/// A generator is bound to exactly one timbre and, for pitched sources,
/// one frequency for its entire lifetime. It is owned by its voice group
/// and dropped when the group stops; there is no per-generator control
/// surface - live mixing happens at the timbre gain it is routed through.
pub struct Generator {
    timbre: Timbre,
    source: GeneratorSource,
    frequency: f32,
    phase: Phase,
    position: usize, // read cursor into the noise buffer
}

impl Generator {
    pub(crate) fn new(timbre: Timbre, source: GeneratorSource, frequency: f32) -> Self {
        Self {
            timbre,
            source,
            frequency,
            phase: Phase::new(),
            position: 0,
        }
    }

    pub fn timbre(&self) -> Timbre {
        self.timbre
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn source(&self) -> &GeneratorSource {
        &self.source
    }

    /// Render one block, overwriting `out`.
    pub(crate) fn render(&mut self, out: &mut [f32], sample_rate: f32) {
        match &self.source {
            GeneratorSource::Canonical(wave) => {
                for s in out.iter_mut() {
                    *s = wave.value_at(self.phase.advance(self.frequency, sample_rate));
                }
            }
            GeneratorSource::Custom(table) => {
                for s in out.iter_mut() {
                    *s = table.value_at(self.phase.advance(self.frequency, sample_rate));
                }
            }
            GeneratorSource::Noise(buffer) => {
                for s in out.iter_mut() {
                    *s = buffer[self.position];
                    self.position += 1;
                    if self.position == buffer.len() {
                        self.position = 0; // loop
                    }
                }
            }
        }
    }
}

/// The set of generators producing one currently-playing note.
///
/// Ephemeral: created on trigger, dropped on stop. A group with zero
/// generators (every timbre muted at trigger time) is still a valid
/// playing note - it holds the note's single "active" slot, and a later
/// unmute does not retroactively add sound to it.
pub struct VoiceGroup {
    note: NoteId,
    generators: Vec<Generator>,
}

impl VoiceGroup {
    pub(crate) fn new(note: NoteId) -> Self {
        Self {
            note,
            generators: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, generator: Generator) {
        self.generators.push(generator);
    }

    pub fn note(&self) -> NoteId {
        self.note
    }

    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    pub(crate) fn generators_mut(&mut self) -> &mut [Generator] {
        &mut self.generators
    }

    /// True for the playing-but-silent case.
    pub fn is_silent(&self) -> bool {
        self.generators.is_empty()
    }
}
