//! Spectrum analyzer widget.
//!
//! FFT of the current scope frame, displayed over logarithmic frequency
//! bins so octaves get equal horizontal space.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, FftPlanner};

const NUM_BINS: usize = 48;

pub fn render_spectrum(frame: &mut Frame, area: Rect, scope_frame: &[u8], sample_rate: f32) {
    let samples: Vec<f32> = scope_frame
        .iter()
        .map(|&byte| (byte as f32 - 128.0) / 128.0)
        .collect();

    let data = compute_spectrum(&samples, sample_rate);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&data);

    let max_freq = data
        .iter()
        .map(|(f, _)| *f)
        .fold(1.0f64, |acc, f| acc.max(f));

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, 10.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

fn compute_spectrum(samples: &[f32], sample_rate: f32) -> Vec<(f64, f64)> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    // Hann window to reduce spectral leakage
    let mut windowed: Vec<Complex<f32>> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let window = if n > 1 {
                let denom = (n - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
            } else {
                1.0
            };
            Complex::new(sample * window, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut windowed);

    let min_freq = 20.0f64;
    let max_freq = (sample_rate as f64 / 2.0).min(20_000.0);

    let mut spectrum = Vec::with_capacity(NUM_BINS);
    for i in 0..NUM_BINS {
        let t = i as f64 / (NUM_BINS - 1) as f64;
        let freq = min_freq * (max_freq / min_freq).powf(t);

        let bin_index = (freq * n as f64 / sample_rate as f64).round() as usize;
        if bin_index >= windowed.len() / 2 {
            break;
        }

        let c = &windowed[bin_index];
        let magnitude = (c.re * c.re + c.im * c.im).sqrt();
        let magnitude_db = if magnitude > 1e-10 {
            20.0 * (magnitude as f64).log10()
        } else {
            -100.0
        };

        spectrum.push((freq, magnitude_db));
    }

    spectrum
}
