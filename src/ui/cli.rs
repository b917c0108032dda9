use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "musictui",
    version,
    about = "Terminal dashboard for Apple Music"
)]
pub struct Cli {
    /// Use the ASCII glyph set
    #[arg(long, conflicts_with = "unicode")]
    pub ascii: bool,

    /// Use the Unicode glyph set even where ASCII would be picked
    #[arg(long)]
    pub unicode: bool,

    /// Settings file (default `{config_dir}/settings.json`)
    #[arg(long, env = "MUSICTUI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the log directory (default `{data_local_dir}/logs`)
    #[arg(long, env = "MUSICTUI_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Override the log filter (same syntax as RUST_LOG)
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Glyph override from the command line, if any.
    pub fn glyph_override(&self) -> Option<bool> {
        match (self.ascii, self.unicode) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}
