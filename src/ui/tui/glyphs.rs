/// Character set for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub ascii: bool,
    pub app_title: &'static str,

    pub box_tl: &'static str,
    pub box_tr: &'static str,
    pub box_bl: &'static str,
    pub box_br: &'static str,
    pub box_h: &'static str,
    pub box_v: &'static str,

    pub progress_filled: &'static str,
    pub progress_head: &'static str,
    pub progress_empty: &'static str,

    pub separator: &'static str,
    pub selected: &'static str,
    pub playing_mark: &'static str,
    pub search_cursor: &'static str,
    pub rule: &'static str,

    pub chip_playing: &'static str,
    pub chip_paused: &'static str,
    pub chip_idle: &'static str,
    pub chip_shuffle: &'static str,
    pub chip_repeat: &'static str,
    pub chip_volume: &'static str,

    pub status_playing: &'static str,
    pub status_paused: &'static str,
    pub status_stopped: &'static str,
}

impl Glyphs {
    pub const UNICODE: Self = Self {
        ascii: false,
        app_title: " ♫ Apple Music",
        box_tl: "╭",
        box_tr: "╮",
        box_bl: "╰",
        box_br: "╯",
        box_h: "─",
        box_v: "│",
        progress_filled: "━",
        progress_head: "●",
        progress_empty: "╌",
        separator: "  ·  ",
        selected: "▸ ",
        playing_mark: "♫ ",
        search_cursor: "▏",
        rule: "─",
        chip_playing: "●",
        chip_paused: "⏸",
        chip_idle: "○",
        chip_shuffle: "⇆",
        chip_repeat: "↻",
        chip_volume: "♪",
        status_playing: "▶",
        status_paused: "⏸",
        status_stopped: "·",
    };

    pub const ASCII: Self = Self {
        ascii: true,
        app_title: " Apple Music",
        box_tl: "+",
        box_tr: "+",
        box_bl: "+",
        box_br: "+",
        box_h: "-",
        box_v: "|",
        progress_filled: "=",
        progress_head: "O",
        progress_empty: "-",
        separator: "  -  ",
        selected: "> ",
        playing_mark: "# ",
        search_cursor: "|",
        rule: "-",
        chip_playing: ">",
        chip_paused: "||",
        chip_idle: ".",
        chip_shuffle: "~",
        chip_repeat: "R",
        chip_volume: "#",
        status_playing: ">",
        status_paused: "=",
        status_stopped: ".",
    };

    pub fn new(ascii: bool) -> Self {
        if ascii { Self::ASCII } else { Self::UNICODE }
    }

    /// Picks the glyph set from an explicit override, then `MUSICTUI_ASCII`, then `TERM`.
    pub fn detect(force: Option<bool>) -> Self {
        let env_flag = std::env::var("MUSICTUI_ASCII").ok();
        let term = std::env::var("TERM").ok();
        Self::new(use_ascii(force, env_flag.as_deref(), term.as_deref()))
    }
}

pub fn use_ascii(force: Option<bool>, env_flag: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ascii) = force {
        return ascii;
    }
    if env_flag == Some("1") {
        return true;
    }
    term.is_some_and(|t| t.to_ascii_lowercase().contains("ghostty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_environment() {
        assert!(!use_ascii(Some(false), Some("1"), Some("xterm-ghostty")));
        assert!(use_ascii(Some(true), None, None));
    }

    #[test]
    fn ghostty_and_env_flag_force_ascii() {
        assert!(use_ascii(None, Some("1"), Some("xterm-256color")));
        assert!(use_ascii(None, None, Some("xterm-ghostty")));
        assert!(!use_ascii(None, Some("0"), Some("xterm-256color")));
        assert!(!use_ascii(None, None, None));
    }
}
