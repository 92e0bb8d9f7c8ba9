use std::sync::Arc;

use rand::Rng;

/// Length of the shared noise buffer, in seconds of audio.
pub const NOISE_SECONDS: usize = 2;

/// Fill a fresh noise buffer: `NOISE_SECONDS` of independent uniform
/// samples in [-1, 1].
///
/// The noise timbre loops this one buffer forever, so every noise
/// generator shares it instead of carrying its own RNG into the render
/// path. Generation happens once, lazily, on the first trigger that needs
/// it (the engine memoizes the returned `Arc`). The source is not seeded;
/// callers must treat the contents as opaque.
pub fn generate(sample_rate: f32) -> Arc<[f32]> {
    let len = NOISE_SECONDS * sample_rate as usize;
    let mut rng = rand::rng();
    let mut samples = Vec::with_capacity(len);
    for _ in 0..len {
        samples.push(rng.random_range(-1.0f32..=1.0));
    }
    Arc::from(samples)
}
