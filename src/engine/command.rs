#[cfg(feature = "rtrb")]
use rtrb::Consumer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::mixer::GainTarget;
use crate::notes::NoteId;

/// Messages a front end dispatches into the engine.
///
/// `Toggle` is the entry point wired to the pad buttons; `Trigger` and
/// `Stop` are the underlying transitions for front ends that track note
/// state themselves. All of them are absorbed as defined no-ops when the
/// note is already in the requested state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone)]
pub enum Command {
    Toggle { note: NoteId, frequency: f32 },
    Trigger { note: NoteId, frequency: f32 },
    Stop { note: NoteId },
    StopAll,
    SetGain { target: GainTarget, value: f32 },
}

pub trait CommandReceiver {
    fn pop(&mut self) -> Option<Command>;
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for Consumer<Command> {
    fn pop(&mut self) -> Option<Command> {
        Consumer::pop(self).ok()
    }
}
