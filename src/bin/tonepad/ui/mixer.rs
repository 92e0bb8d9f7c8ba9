//! The mixer column: five timbre knobs plus the master volume.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use tonepad::engine::mixer::Timbre;

use crate::app::{App, MASTER_KNOB};

const BAR_WIDTH: usize = 16;

pub fn render_mixer(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Mixer ").borders(Borders::ALL);

    let mut lines = Vec::with_capacity(6);
    for (i, gain) in app.gains().iter().enumerate() {
        let name = if i == MASTER_KNOB {
            "volume"
        } else {
            Timbre::ALL[i].name()
        };
        lines.push(knob_line(name, *gain, i == app.knob()));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn knob_line(name: &'static str, gain: f32, selected: bool) -> Line<'static> {
    let filled = (gain * BAR_WIDTH as f32).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));

    let mut label_style = Style::default().fg(Color::Gray);
    if selected {
        label_style = label_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled(format!(" {name:<9}"), label_style),
        Span::styled(bar, Style::default().fg(Color::Green)),
        Span::styled(
            format!(" {:>3}%", (gain * 100.0).round() as u32),
            label_style,
        ),
    ])
}
