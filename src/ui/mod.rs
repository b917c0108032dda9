pub mod cli;
pub mod tui;

pub use cli::Cli;
pub use tui::{Glyphs, TuiConfig, run_tui};
