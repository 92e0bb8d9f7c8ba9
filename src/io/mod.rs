//! Platform audio output.
//!
//! This is the boundary with the host's real-time audio scheduler: the
//! engine only configures it (gains, generator starts and stops) and never
//! blocks on it. The engine itself lives inside the cpal callback; the
//! rest of the program reaches it exclusively through the command queue
//! and the scope tap.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::Consumer;
use thiserror::Error;

use crate::{
    engine::{command::Command, scope::ScopeTap, ToneEngine},
    MAX_BLOCK_SIZE,
};

/// The host offers no usable audio capability.
///
/// Surfaced once, at the first trigger attempt that lazily opens the
/// output; callers present it to the user and leave the engine
/// uninitialized for the rest of the session. Nothing here is retried.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoOutputDevice,
    #[error("failed to query the default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build the output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start the output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// A running output stream with a [`ToneEngine`] inside its callback.
pub struct AudioOutput {
    _stream: cpal::Stream,
    sample_rate: f32,
}

impl AudioOutput {
    /// Open the default output device and start rendering.
    ///
    /// Construction is deliberately lazy: call this from the first user
    /// trigger, not at program start, so platforms that gate audio behind
    /// a user gesture are satisfied. `configure` runs once on the freshly
    /// built engine (custom waves, non-default gains) before any audio is
    /// rendered.
    pub fn start(
        mut commands: Consumer<Command>,
        scope: ScopeTap,
        configure: impl FnOnce(&mut ToneEngine),
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoOutputDevice)?;
        let config = device.default_output_config()?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let mut engine = ToneEngine::new(sample_rate);
        engine.attach_scope(scope);
        configure(&mut engine);

        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(command) = commands.pop() {
                    engine.apply(command);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let rendered = &mut block[..frames];
                    engine.render_block(rendered);

                    // Mono engine output, fanned out to every channel.
                    let offset = frames_written * channels;
                    for (i, &sample) in rendered.iter().enumerate() {
                        for ch in 0..channels {
                            data[offset + i * channels + ch] = sample;
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;
        log::info!("audio output running at {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            _stream: stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
