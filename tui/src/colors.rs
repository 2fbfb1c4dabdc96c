use dojo_content::Tint;
use ratatui::style::Color;

/// Map a content tint to the terminal palette. Content stays free of any
/// rendering crate; this is the only place the mapping lives.
pub(crate) fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Blue => Color::Blue,
        Tint::Cyan => Color::Cyan,
        Tint::Green => Color::Green,
        Tint::Magenta => Color::Magenta,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
    }
}
