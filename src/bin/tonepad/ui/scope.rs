//! Oscilloscope widget: draws the latest scope frame as a line chart.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render one byte frame of the master output. Bytes use the time-domain
/// convention with silence at 128; the chart re-centers them on zero.
pub fn render_scope(frame: &mut Frame, area: Rect, scope_frame: &[u8]) {
    let block = Block::default().title(" Oscilloscope ").borders(Borders::ALL);

    let data: Vec<(f64, f64)> = scope_frame
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            let x = i as f64 / scope_frame.len() as f64;
            let y = (byte as f64 - 128.0) / 128.0;
            (x, y)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
