//! Application state and event loop.
//!
//! The app owns the UI side of both queues: it produces [`Command`]s for
//! the engine and drains the scope tap for the oscilloscope. The audio
//! stream (and with it the engine) is opened lazily on the first note
//! toggle; if the platform has no audio, the failure is shown once and
//! every later toggle stays a no-op for the session.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::{Producer, PushError, RingBuffer};

use crate::ui;

use tonepad::{
    engine::{
        command::Command,
        mixer::{GainTarget, Timbre, DEFAULT_MASTER_GAIN, DEFAULT_TIMBRE_GAINS},
        scope::{scope_channel, ScopeReader, SCOPE_FRAME_LEN, SCOPE_SILENCE},
    },
    io::AudioOutput,
    notes::{NoteId, OCTAVES, PITCH_CLASSES},
};

const COMMAND_QUEUE_CAPACITY: usize = 256;
const SCOPE_QUEUE_CAPACITY: usize = 16 * SCOPE_FRAME_LEN;

/// Knob step per keypress.
const GAIN_STEP: f32 = 0.05;

/// Mixer rows: the five timbres followed by the master control.
pub const KNOB_COUNT: usize = 6;
pub const MASTER_KNOB: usize = 5;

struct AudioState {
    output: AudioOutput,
    commands: Producer<Command>,
    scope: ScopeReader,
}

pub struct App {
    audio: Option<AudioState>,
    audio_error: Option<String>,
    /// Grid cursor: (pitch-class row, octave column).
    cursor: (usize, usize),
    knob: usize,
    /// UI mirror of the knob positions; the engine holds the live ramps.
    gains: [f32; KNOB_COUNT],
    /// UI mirror of the engine's playing set, for grid highlighting.
    playing: HashSet<NoteId>,
    scope_frame: [u8; SCOPE_FRAME_LEN],
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let mut gains = [0.0; KNOB_COUNT];
        gains[..5].copy_from_slice(&DEFAULT_TIMBRE_GAINS);
        gains[MASTER_KNOB] = DEFAULT_MASTER_GAIN;

        Self {
            audio: None,
            audio_error: None,
            cursor: (0, 0),
            knob: 0,
            gains,
            playing: HashSet::new(),
            scope_frame: [SCOPE_SILENCE; SCOPE_FRAME_LEN],
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            if let Some(audio) = self.audio.as_mut() {
                self.scope_frame = audio.scope.frame();
            }

            terminal.draw(|frame| ui::render(frame, self))?;

            // ~60fps input polling
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.cursor.0 = self.cursor.0.saturating_sub(1),
            KeyCode::Down => self.cursor.0 = (self.cursor.0 + 1).min(PITCH_CLASSES.len() - 1),
            KeyCode::Left => self.cursor.1 = self.cursor.1.saturating_sub(1),
            KeyCode::Right => self.cursor.1 = (self.cursor.1 + 1).min(OCTAVES as usize - 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_cursor_note(),
            KeyCode::Tab => self.knob = (self.knob + 1) % KNOB_COUNT,
            KeyCode::BackTab => self.knob = (self.knob + KNOB_COUNT - 1) % KNOB_COUNT,
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_knob(GAIN_STEP),
            KeyCode::Char('-') | KeyCode::Char('_') => self.adjust_knob(-GAIN_STEP),
            KeyCode::Char('x') | KeyCode::Char('X') => self.stop_all(),
            _ => {}
        }
    }

    pub fn cursor_note(&self) -> NoteId {
        let class = PITCH_CLASSES[self.cursor.0];
        NoteId::new(class, self.cursor.1 as u8 + 1).expect("cursor stays inside the catalogue")
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn knob(&self) -> usize {
        self.knob
    }

    pub fn gains(&self) -> &[f32; KNOB_COUNT] {
        &self.gains
    }

    pub fn is_playing(&self, note: NoteId) -> bool {
        self.playing.contains(&note)
    }

    pub fn scope_frame(&self) -> &[u8; SCOPE_FRAME_LEN] {
        &self.scope_frame
    }

    pub fn audio_error(&self) -> Option<&str> {
        self.audio_error.as_deref()
    }

    pub fn sample_rate(&self) -> f32 {
        self.audio
            .as_ref()
            .map(|audio| audio.output.sample_rate())
            .unwrap_or(48_000.0)
    }

    fn toggle_cursor_note(&mut self) {
        if !self.ensure_audio() {
            return;
        }

        let note = self.cursor_note();
        self.send(Command::Toggle {
            note,
            frequency: note.frequency(),
        });

        if !self.playing.remove(&note) {
            self.playing.insert(note);
        }
    }

    fn adjust_knob(&mut self, delta: f32) {
        // The adapter owns the [0, 1] guarantee; the engine never clamps.
        let value = (self.gains[self.knob] + delta).clamp(0.0, 1.0);
        self.gains[self.knob] = value;

        if self.audio.is_some() {
            let target = if self.knob == MASTER_KNOB {
                GainTarget::Master
            } else {
                GainTarget::Timbre(Timbre::ALL[self.knob])
            };
            self.send(Command::SetGain { target, value });
        }
    }

    fn stop_all(&mut self) {
        if self.audio.is_some() {
            self.send(Command::StopAll);
        }
        self.playing.clear();
    }

    /// Lazily open the audio output. Returns false when the platform has
    /// no audio; the failure sticks for the whole session.
    fn ensure_audio(&mut self) -> bool {
        if self.audio.is_some() {
            return true;
        }
        if self.audio_error.is_some() {
            return false;
        }

        let (commands_tx, commands_rx) = RingBuffer::new(COMMAND_QUEUE_CAPACITY);
        let (scope_tap, scope_reader) = scope_channel(SCOPE_QUEUE_CAPACITY);

        let gains = self.gains;
        match AudioOutput::start(commands_rx, scope_tap, move |engine| {
            // Replay knob positions moved before the first trigger.
            for (i, timbre) in Timbre::ALL.iter().enumerate() {
                engine.set_gain(GainTarget::Timbre(*timbre), gains[i]);
            }
            engine.set_gain(GainTarget::Master, gains[MASTER_KNOB]);
        }) {
            Ok(output) => {
                self.audio = Some(AudioState {
                    output,
                    commands: commands_tx,
                    scope: scope_reader,
                });
                true
            }
            Err(err) => {
                log::warn!("audio unavailable: {err}");
                self.audio_error = Some(err.to_string());
                false
            }
        }
    }

    fn send(&mut self, command: Command) {
        let Some(audio) = self.audio.as_mut() else {
            return;
        };

        let mut pending = command;
        loop {
            match audio.commands.push(pending) {
                Ok(()) => break,
                Err(PushError::Full(returned)) => {
                    if audio.commands.is_abandoned() {
                        log::warn!("command queue abandoned; dropping {returned:?}");
                        break;
                    }
                    pending = returned;
                    thread::sleep(Duration::from_micros(200));
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
