use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Span;
use std::fmt::Display;

#[cfg(test)]
const CTRL_PREFIX: &str = "⌃";
#[cfg(all(not(test), target_os = "macos"))]
const CTRL_PREFIX: &str = "⌃";
#[cfg(all(not(test), not(target_os = "macos")))]
const CTRL_PREFIX: &str = "Ctrl+";

fn key_hint_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub(crate) fn ctrl(key: impl Display) -> Span<'static> {
    Span::styled(format!("{CTRL_PREFIX}{key}"), key_hint_style())
}

pub(crate) fn plain(key: impl Display) -> Span<'static> {
    Span::styled(format!("{key}"), key_hint_style())
}
