//! Low-level DSP primitives used by the synthesis engine.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to run inside the audio callback. They stay focused on
//! the signal math; voice lifecycle and routing live in [`crate::engine`].

/// Noise buffer generation for the unpitched timbre.
pub mod noise;
/// Periodic waveform shapes and custom wavetables.
pub mod oscillator;
/// One-pole parameter smoothing for click-free gain changes.
pub mod smooth;

pub use smooth::SmoothedParam;
