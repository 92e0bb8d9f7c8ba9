use rtrb::{Consumer, Producer, RingBuffer};

/*
Visualization Sampler
=====================

The oscilloscope view pulls one frame of the master output per rendering
frame, forever. The engine side of the tap pushes every rendered master
sample into a lock-free ring buffer and never blocks: if the UI falls
behind, samples are dropped and the next frame simply shows newer audio.
There is no history and no restart.

Frames are fixed-size byte sequences in the classic time-domain byte
convention: [-1, 1] maps to 0..=255 with silence at 128. Consumers own the
drawing surface and pixel mapping entirely.
*/

/// Samples per scope frame.
pub const SCOPE_FRAME_LEN: usize = 1024;

/// Byte value of a silent sample.
pub const SCOPE_SILENCE: u8 = 128;

/// Create the two halves of a scope tap. The `ScopeTap` goes to the
/// engine, the `ScopeReader` to whoever draws.
pub fn scope_channel(capacity: usize) -> (ScopeTap, ScopeReader) {
    let (tx, rx) = RingBuffer::new(capacity);
    (
        ScopeTap { tx },
        ScopeReader {
            rx,
            window: vec![0.0; SCOPE_FRAME_LEN],
        },
    )
}

/// Engine half: fed from the render path.
pub struct ScopeTap {
    tx: Producer<f32>,
}

impl ScopeTap {
    /// Push a rendered block. Drops the remainder when the ring is full;
    /// the render path must never wait on the display.
    pub(crate) fn push_block(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.tx.push(sample).is_err() {
                return;
            }
        }
    }
}

/// Display half: drains the tap and keeps a sliding window of the most
/// recent master samples.
pub struct ScopeReader {
    rx: Consumer<f32>,
    window: Vec<f32>,
}

impl ScopeReader {
    /// Snapshot the current master output as one byte frame.
    ///
    /// Never blocks and never fails; before any audio has arrived the
    /// frame is all-silence (128s).
    pub fn frame(&mut self) -> [u8; SCOPE_FRAME_LEN] {
        while let Ok(sample) = self.rx.pop() {
            self.window.push(sample);
        }
        if self.window.len() > SCOPE_FRAME_LEN {
            let excess = self.window.len() - SCOPE_FRAME_LEN;
            self.window.drain(0..excess);
        }

        let mut frame = [SCOPE_SILENCE; SCOPE_FRAME_LEN];
        for (byte, &sample) in frame.iter_mut().zip(self.window.iter()) {
            *byte = ((1.0 + sample.clamp(-1.0, 1.0)) * 128.0).min(255.0) as u8;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_maps_to_center_bytes() {
        let (_tap, mut reader) = scope_channel(256);
        let frame = reader.frame();
        assert_eq!(frame.len(), SCOPE_FRAME_LEN);
        assert!(frame.iter().all(|&b| b == SCOPE_SILENCE));
    }

    #[test]
    fn full_scale_samples_hit_the_byte_rails() {
        let (mut tap, mut reader) = scope_channel(SCOPE_FRAME_LEN * 2);
        let block = [1.0f32, -1.0, 0.0];
        tap.push_block(&block);

        let frame = reader.frame();
        let tail = &frame[SCOPE_FRAME_LEN - 3..];
        assert_eq!(tail, &[255, 0, 128]);
    }

    #[test]
    fn tap_drops_instead_of_blocking_when_full() {
        let (mut tap, mut reader) = scope_channel(4);
        tap.push_block(&[0.5; 64]);
        tap.push_block(&[0.9; 64]); // ring already full, silently dropped

        let frame = reader.frame();
        // Only the first four samples made it through.
        assert!(frame[SCOPE_FRAME_LEN - 4..].iter().all(|&b| b == 192));
    }
}
