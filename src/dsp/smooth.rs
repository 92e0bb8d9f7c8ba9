/*
Smoothed Parameters
===================

Jumping a gain control instantaneously puts a step into the signal, which
the ear hears as a click. Every live control in the mixer therefore moves
through a one-pole exponential approach toward its target:

    current += (target - current) * coeff
    coeff    = 1 - exp(-1 / (tau * sample_rate))

`tau` is the smoothing time constant. After one tau the value has covered
~63% of the distance to the target; after five it is within 1%. The
constant is fixed at 10 ms for the whole session and is not configurable
per call - the contract is "click-free", not "shaped".

`target()` is the value the user asked for; `current()` is where the ramp
actually is. Audibility decisions read the target, the render path reads
`next()` once per sample.
*/

/// Fixed smoothing time constant for all live gain changes, in seconds.
pub const GAIN_SMOOTHING_SECONDS: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
}

impl SmoothedParam {
    pub fn new(initial: f32, sample_rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0 - (-1.0 / (GAIN_SMOOTHING_SECONDS * sample_rate)).exp(),
        }
    }

    /// Retarget the ramp. The value glides there over the next few blocks.
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// Jump current and target at once. Used only at construction time,
    /// before any audio has been rendered.
    pub fn snap_to(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.coeff;
        self.current
    }
}
