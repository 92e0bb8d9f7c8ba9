//! tonepad - terminal tone pad
//!
//! A 7x9 grid of sustained notes, a five-way timbre mixer and a live
//! oscilloscope. Run with: cargo run

mod app;
mod ui;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut terminal = ratatui::init();
    let result = App::new().run(&mut terminal);
    ratatui::restore();
    result
}
