//! Assembly pipeline view: per-component rows with token-weighted bars and
//! the terminal quality indicator.

use dojo_content::PlaygroundScenario;
use dojo_core::PlaygroundSession;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;
use unicode_width::UnicodeWidthStr;

use crate::colors::tint_color;

const MAX_BAR: usize = 24;

pub(crate) fn render(
    area: Rect,
    buf: &mut Buffer,
    scenario: &PlaygroundScenario,
    session: &PlaygroundSession,
) {
    if area.is_empty() {
        return;
    }
    Paragraph::new(lines(scenario, session)).render_ref(area, buf);
}

fn lines(scenario: &PlaygroundScenario, session: &PlaygroundSession) -> Vec<Line<'static>> {
    let max_tokens = scenario
        .components
        .iter()
        .map(|c| c.tokens)
        .max()
        .unwrap_or(0)
        .max(1);
    let name_width = scenario
        .components
        .iter()
        .map(|c| c.short_name.width())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for component in &scenario.components {
        let enabled = session.is_enabled(&component.id);
        let bar_len = (component.tokens as usize * MAX_BAR).div_ceil(max_tokens as usize);
        let bar = "▔".repeat(bar_len.clamp(1, MAX_BAR));
        let marker: Span<'static> = if enabled {
            Span::from("● ").fg(tint_color(component.tint))
        } else {
            "○ ".dim()
        };
        let name = format!("{:<name_width$} ", component.short_name);
        let name: Span<'static> = if enabled { name.into() } else { name.dim() };
        let bar: Span<'static> = if enabled {
            Span::from(bar).fg(tint_color(component.tint))
        } else {
            bar.dim()
        };
        lines.push(Line::from(vec![
            marker,
            name,
            bar,
            format!(" {}t", component.tokens).dim(),
        ]));
    }

    lines.push(Line::from("      ⇣".dim()));

    let total = session.enabled_tokens(scenario);
    let budget: u32 = scenario.components.iter().map(|c| c.tokens).sum();
    let filled = (total as usize * MAX_BAR) / budget.max(1) as usize;
    lines.push(Line::from(vec![
        "assembled ".bold(),
        "█".repeat(filled).cyan(),
        "░".repeat(MAX_BAR - filled.min(MAX_BAR)).dim(),
        format!(" {total}t").dim(),
    ]));

    if session.enabled().is_empty() {
        lines.push(Line::from(vec!["✗ ".red(), "no context — generic response".red().dim()]));
    } else {
        lines.push(Line::from(vec![
            "✓ ".green(),
            "context-shaped response".green(),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.clone())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect()
    }

    #[test]
    fn quality_indicator_tracks_has_context() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ToolUse);
        let scenario = &academy.scenarios[0];
        let mut session = PlaygroundSession::new(scenario);

        let rendered = plain(&lines(scenario, &session));
        assert!(rendered.iter().any(|l| l.starts_with("✗ no context")));

        session.toggle(&scenario.components[0].id);
        let rendered = plain(&lines(scenario, &session));
        assert!(rendered.iter().any(|l| l.starts_with("✓ context-shaped")));
    }

    #[test]
    fn one_row_per_catalog_component_plus_summary() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ToolUse);
        let scenario = &academy.scenarios[0];
        let session = PlaygroundSession::new(scenario);
        let rendered = lines(scenario, &session);
        // component rows + arrow + assembled bar + quality line
        assert_eq!(rendered.len(), scenario.components.len() + 3);
    }
}
