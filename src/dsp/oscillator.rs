#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Periodic Waveforms
==================

The pad blends four periodic shapes into every note. Each shape is a pure
function of phase, where phase runs over one cycle in [0, 1):

  Sine      sin(2*pi*phase). Fundamental only; smooth and hollow.
  Square    +1 for the first half cycle, -1 for the second. Odd harmonics.
  Sawtooth  linear ramp -1 -> +1 over the cycle. All harmonics.
  Triangle  rises 0 -> +1 -> -1 -> 0. Odd harmonics, falling off as 1/n^2.

All four start their cycle at (or crossing) zero, so generators created in
the same block stay phase-aligned at onset.

Shapes are ideal (non-band-limited). At the top of the catalogue the square
and saw alias audibly; that is the accepted character of the instrument,
matching the source's canonical oscillator shapes.

A `Wavetable` replaces the canonical shape of one timbre when registered
with the engine: the table holds one cycle of samples, read back with
linear interpolation at the same phase. How tables are authored is up to
the caller.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Evaluate the shape at `phase` in [0, 1).
    #[inline]
    pub fn value_at(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (std::f32::consts::TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

/// Phase accumulator shared by the periodic generator sources.
///
/// `advance` returns the phase for the current sample, then steps it by
/// `frequency / sample_rate`, wrapping at 1.0. Frequency is fixed for a
/// generator's lifetime, but the accumulator takes it per call so the same
/// type serves every pitched source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phase {
    value: f32,
}

impl Phase {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    #[inline]
    pub fn advance(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let phase = self.value;
        self.value += frequency / sample_rate;
        if self.value >= 1.0 {
            self.value -= self.value.floor();
        }
        phase
    }
}

/// One cycle of a custom periodic shape, read back by phase.
#[derive(Debug, Clone)]
pub struct Wavetable {
    samples: Vec<f32>,
}

impl Wavetable {
    /// Builds a table from one cycle of samples.
    ///
    /// # Panics
    /// Panics if `samples` is empty; a zero-length cycle has no meaning.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        assert!(!samples.is_empty(), "wavetable needs at least one sample");
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear-interpolated lookup at `phase` in [0, 1), wrapping at the ends.
    #[inline]
    pub fn value_at(&self, phase: f32) -> f32 {
        let pos = phase * self.samples.len() as f32;
        let i = pos as usize % self.samples.len();
        let j = (i + 1) % self.samples.len();
        let frac = pos - pos.floor();
        self.samples[i] + (self.samples[j] - self.samples[i]) * frac
    }
}
