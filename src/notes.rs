/*
Note Catalogue
==============

The pad exposes a fixed table of 63 playable keys: seven solfège pitch
classes (Dó, Ré, Mi, Fá, Sol, Lá, Si) across nine octaves. Each key has a
stable display name ("Lá4") and a frequency in Hz. The table is static and
read-only; front ends iterate it to build their grid and hand the engine a
`(NoteId, frequency)` pair on every trigger.

Octave numbering starts at 1, so "Lá4" is the fourth entry of the Lá row
(440 Hz), not the scientific-pitch octave 4.
*/

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of octaves per pitch class.
pub const OCTAVES: u8 = 9;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    Do,
    Re,
    Mi,
    Fa,
    Sol,
    La,
    Si,
}

/// Pitch classes in pad-row order.
pub const PITCH_CLASSES: [PitchClass; 7] = [
    PitchClass::Do,
    PitchClass::Re,
    PitchClass::Mi,
    PitchClass::Fa,
    PitchClass::Sol,
    PitchClass::La,
    PitchClass::Si,
];

/// Frequencies in Hz, one row per pitch class, one column per octave.
const FREQUENCIES: [[f32; OCTAVES as usize]; 7] = [
    [32.7, 65.41, 130.81, 261.63, 523.25, 1046.5, 2093.0, 4186.01, 8372.02],
    [36.71, 73.42, 146.83, 293.66, 587.33, 1174.66, 2349.32, 4698.63, 9397.27],
    [41.2, 82.41, 164.81, 329.63, 659.26, 1318.51, 2637.02, 5274.04, 10548.08],
    [43.65, 87.31, 174.61, 349.23, 698.46, 1396.91, 2793.83, 5587.65, 11175.3],
    [49.0, 98.0, 196.0, 392.0, 783.99, 1567.98, 3135.96, 6271.93, 12543.85],
    [55.0, 110.0, 220.0, 440.0, 880.0, 1760.0, 3520.0, 7040.0, 14080.0],
    [61.74, 123.47, 246.94, 493.88, 987.77, 1975.53, 3951.07, 7902.13, 15804.27],
];

impl PitchClass {
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::Do => "Dó",
            PitchClass::Re => "Ré",
            PitchClass::Mi => "Mi",
            PitchClass::Fa => "Fá",
            PitchClass::Sol => "Sol",
            PitchClass::La => "Lá",
            PitchClass::Si => "Si",
        }
    }

    fn index(self) -> usize {
        match self {
            PitchClass::Do => 0,
            PitchClass::Re => 1,
            PitchClass::Mi => 2,
            PitchClass::Fa => 3,
            PitchClass::Sol => 4,
            PitchClass::La => 5,
            PitchClass::Si => 6,
        }
    }
}

/// Stable identity of one playable key on the pad.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId {
    class: PitchClass,
    octave: u8, // 1..=OCTAVES
}

impl NoteId {
    /// Returns `None` when the octave falls outside the catalogue.
    pub fn new(class: PitchClass, octave: u8) -> Option<Self> {
        if (1..=OCTAVES).contains(&octave) {
            Some(Self { class, octave })
        } else {
            None
        }
    }

    pub fn class(self) -> PitchClass {
        self.class
    }

    pub fn octave(self) -> u8 {
        self.octave
    }

    /// Catalogue frequency in Hz.
    pub fn frequency(self) -> f32 {
        FREQUENCIES[self.class.index()][(self.octave - 1) as usize]
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

/// All 63 keys in grid order: pitch-class rows, ascending octaves within a row.
pub fn catalogue() -> impl Iterator<Item = NoteId> {
    PITCH_CLASSES.iter().flat_map(|&class| {
        (1..=OCTAVES).map(move |octave| NoteId { class, octave })
    })
}
