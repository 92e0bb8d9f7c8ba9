//! TUI rendering for the tone pad.
//!
//! Layout: status bar, the note grid beside the mixer column, and the
//! oscilloscope beside the spectrum analyzer along the bottom.

mod mixer;
mod pad;
mod scope;
mod spectrum;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Status bar
            Constraint::Min(9),     // Note grid + mixer
            Constraint::Length(12), // Scope + spectrum
            Constraint::Length(1),  // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], app);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(chunks[1]);

    pad::render_pad(frame, top[0], app);
    mixer::render_mixer(frame, top[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    scope::render_scope(frame, bottom[0], app.scope_frame());
    spectrum::render_spectrum(frame, bottom[1], app.scope_frame(), app.sample_rate());

    let help = Paragraph::new(
        " [←↑↓→] Move  [Enter] Toggle note  [Tab] Knob  [+/-] Gain  [X] Stop all  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn render_status(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let note = app.cursor_note();
    let (text, style) = match app.audio_error() {
        Some(err) => (
            format!(" audio unavailable: {err} (restart to retry)"),
            Style::default().fg(Color::Red),
        ),
        None => (
            format!(" tonepad | {note} · {} Hz", note.frequency().round()),
            Style::default().fg(Color::Cyan),
        ),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
