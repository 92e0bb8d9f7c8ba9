use crate::dsp::oscillator::Waveform;
use crate::dsp::smooth::SmoothedParam;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Timbre Mixer
============

One persistent gain control per timbre plus one master control. The
routing mirrors the instrument's signal flow:

    generators --> timbre gain --+
    generators --> timbre gain --+--> master gain --> output + scope tap
    ...                          |
    generators --> timbre gain --+

Because gain is applied at the bus rather than inside the generators,
turning a knob changes every note currently sounding through that timbre,
in real time. Gains move through the fixed 10 ms smoothing ramp in
`dsp::smooth`; nothing here clamps the incoming value - the input adapter
owns the [0, 1] guarantee.

Audibility reads the *target* gain, not the mid-ramp value: the target is
the user's setting, and it is what decides which generators a trigger
creates. Muting a timbre and triggering in the same instant therefore
reliably excludes it, even though the audible ramp is still dying out.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timbre {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    Noise,
}

impl Timbre {
    /// The fixed timbre set, in mixer-channel order.
    pub const ALL: [Timbre; 5] = [
        Timbre::Sine,
        Timbre::Square,
        Timbre::Sawtooth,
        Timbre::Triangle,
        Timbre::Noise,
    ];

    pub fn index(self) -> usize {
        match self {
            Timbre::Sine => 0,
            Timbre::Square => 1,
            Timbre::Sawtooth => 2,
            Timbre::Triangle => 3,
            Timbre::Noise => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Timbre::Sine => "sine",
            Timbre::Square => "square",
            Timbre::Sawtooth => "sawtooth",
            Timbre::Triangle => "triangle",
            Timbre::Noise => "noise",
        }
    }

    /// The periodic shape behind this timbre, or `None` for noise.
    pub fn waveform(self) -> Option<Waveform> {
        match self {
            Timbre::Sine => Some(Waveform::Sine),
            Timbre::Square => Some(Waveform::Square),
            Timbre::Sawtooth => Some(Waveform::Sawtooth),
            Timbre::Triangle => Some(Waveform::Triangle),
            Timbre::Noise => None,
        }
    }
}

/// Which gain control a `SetGain` addresses.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainTarget {
    Timbre(Timbre),
    Master,
}

/// Starting knob positions, in `Timbre::ALL` order. Only the sine channel
/// is audible out of the box.
pub const DEFAULT_TIMBRE_GAINS: [f32; 5] = [0.5, 0.0, 0.0, 0.0, 0.0];
pub const DEFAULT_MASTER_GAIN: f32 = 0.75;

pub struct Mixer {
    gains: [SmoothedParam; 5],
    master: SmoothedParam,
}

impl Mixer {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gains: std::array::from_fn(|i| {
                SmoothedParam::new(DEFAULT_TIMBRE_GAINS[i], sample_rate)
            }),
            master: SmoothedParam::new(DEFAULT_MASTER_GAIN, sample_rate),
        }
    }

    /// Retarget one timbre's gain ramp. Generators already routed through
    /// this channel hear the change immediately.
    pub fn set_timbre_gain(&mut self, timbre: Timbre, value: f32) {
        self.gains[timbre.index()].set_target(value);
    }

    /// Retarget the master gain ramp.
    pub fn set_master_gain(&mut self, value: f32) {
        self.master.set_target(value);
    }

    /// True iff the timbre's set gain is nonzero.
    pub fn is_audible(&self, timbre: Timbre) -> bool {
        self.gains[timbre.index()].target() != 0.0
    }

    /// The user-facing gain setting for one timbre.
    pub fn timbre_gain(&self, timbre: Timbre) -> f32 {
        self.gains[timbre.index()].target()
    }

    pub fn master_gain(&self) -> f32 {
        self.master.target()
    }

    /// Advance every ramp by one sample and return the per-timbre gains
    /// (in `Timbre::ALL` order) plus the master gain.
    #[inline]
    pub(crate) fn step(&mut self) -> ([f32; 5], f32) {
        let gains = std::array::from_fn(|i| self.gains[i].next());
        (gains, self.master.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn defaults_leave_only_sine_audible() {
        let mixer = Mixer::new(SAMPLE_RATE);
        assert!(mixer.is_audible(Timbre::Sine));
        for timbre in [Timbre::Square, Timbre::Sawtooth, Timbre::Triangle, Timbre::Noise] {
            assert!(!mixer.is_audible(timbre), "{} should start muted", timbre.name());
        }
        assert_eq!(mixer.master_gain(), DEFAULT_MASTER_GAIN);
    }

    #[test]
    fn muting_takes_effect_before_the_ramp_finishes() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.set_timbre_gain(Timbre::Sine, 0.0);

        // The smoothed value is still decaying, but audibility follows the
        // setting, not the ramp.
        assert!(!mixer.is_audible(Timbre::Sine));
        let (gains, _) = mixer.step();
        assert!(gains[Timbre::Sine.index()] > 0.0);
    }

    #[test]
    fn step_walks_toward_targets() {
        let mut mixer = Mixer::new(SAMPLE_RATE);
        mixer.set_timbre_gain(Timbre::Noise, 1.0);

        let mut last = 0.0;
        for _ in 0..(SAMPLE_RATE * 0.05) as usize {
            let (gains, _) = mixer.step();
            assert!(gains[Timbre::Noise.index()] >= last);
            last = gains[Timbre::Noise.index()];
        }
        assert!(last > 0.99);
    }

    #[test]
    fn timbre_order_matches_the_mixer_channels() {
        for (i, timbre) in Timbre::ALL.iter().enumerate() {
            assert_eq!(timbre.index(), i);
        }
        assert_eq!(Timbre::ALL.map(Timbre::name), [
            "sine", "square", "sawtooth", "triangle", "noise",
        ]);
    }
}
