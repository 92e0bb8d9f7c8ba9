//! The 7x9 note grid.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use tonepad::notes::{NoteId, OCTAVES, PITCH_CLASSES};

use crate::app::App;

/// One distinct color per pitch-class row, like the source pad's buttons.
const ROW_COLORS: [Color; 7] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::White,
];

pub fn render_pad(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Note pad ").borders(Borders::ALL);

    let mut lines = Vec::with_capacity(PITCH_CLASSES.len());
    for (row, &class) in PITCH_CLASSES.iter().enumerate() {
        let mut spans = Vec::with_capacity(OCTAVES as usize);
        for col in 0..OCTAVES as usize {
            let note = NoteId::new(class, col as u8 + 1).expect("grid stays in range");
            spans.push(cell_span(note, row, col, app));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn cell_span(note: NoteId, row: usize, col: usize, app: &App) -> Span<'static> {
    let mut style = Style::default().fg(ROW_COLORS[row]);
    if app.is_playing(note) {
        style = style
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
    }
    if app.cursor() == (row, col) {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Span::styled(format!(" {:<5}", note.to_string()), style)
}
