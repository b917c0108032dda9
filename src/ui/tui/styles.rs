use crate::domain::PlayerStatus;
use ratatui::style::{Color, Modifier, Style};

pub(super) fn accent(status: PlayerStatus) -> Style {
    let fg = match status {
        PlayerStatus::Playing => Color::Blue,
        PlayerStatus::Paused => Color::Magenta,
        _ => Color::White,
    };
    Style::default().fg(fg)
}

pub(super) fn selected(status: PlayerStatus) -> Style {
    let (fg, bg) = match status {
        PlayerStatus::Playing => (Color::White, Color::Blue),
        PlayerStatus::Paused => (Color::White, Color::Magenta),
        _ => (Color::Black, Color::White),
    };
    Style::default()
        .fg(fg)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn dim() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
}

pub(super) fn bright() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn header_bar() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

pub(super) fn status_bar() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}
