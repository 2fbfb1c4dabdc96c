//! Context window preview: the literal concatenation of enabled components'
//! content, then the customer message, simulating what the model would "see".

use dojo_content::PlaygroundScenario;
use dojo_core::PlaygroundSession;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::colors::tint_color;

pub(crate) fn render(
    area: Rect,
    buf: &mut Buffer,
    scenario: &PlaygroundScenario,
    session: &PlaygroundSession,
) {
    if area.is_empty() {
        return;
    }
    Paragraph::new(lines(scenario, session, usize::from(area.width))).render_ref(area, buf);
}

fn lines(
    scenario: &PlaygroundScenario,
    session: &PlaygroundSession,
    width: usize,
) -> Vec<Line<'static>> {
    let wrap = width.saturating_sub(2).max(16);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let mut any = false;
    // Catalog order, not toggle order: assembly is deterministic.
    for component in &scenario.components {
        if !session.is_enabled(&component.id) {
            continue;
        }
        any = true;
        lines.push(Line::from(
            format!("── {} ({} tokens)", component.name, component.tokens)
                .fg(tint_color(component.tint)),
        ));
        for piece in textwrap::wrap(&component.content, wrap) {
            lines.push(Line::from(piece.into_owned()));
        }
        lines.push(Line::from(""));
    }
    if !any {
        lines.push(Line::from("(no context assembled)".dim().italic()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from("── customer message".bold()));
    for piece in textwrap::wrap(&scenario.customer_message, wrap) {
        lines.push(Line::from(piece.into_owned().italic()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        format!("assembled: {} tokens", session.enabled_tokens(scenario)).dim(),
    ));
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
    fn empty_set_shows_placeholder_and_customer_message() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ContextEngineering);
        let scenario = &academy.scenarios[0];
        let session = PlaygroundSession::new(scenario);
        let rendered = plain(&lines(scenario, &session, 60));
        assert_eq!(rendered[0], "(no context assembled)");
        assert!(rendered.iter().any(|l| l == "── customer message"));
        assert!(rendered.last().map(String::as_str) == Some("assembled: 0 tokens"));
    }

    #[test]
    fn enabled_components_appear_in_catalog_order_with_token_tally() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ContextEngineering);
        let scenario = &academy.scenarios[0];
        let mut session = PlaygroundSession::new(scenario);
        // Toggle in reverse order; preview must still follow catalog order.
        session.toggle(&scenario.components[2].id);
        session.toggle(&scenario.components[0].id);
        let rendered = plain(&lines(scenario, &session, 80));
        let first = rendered
            .iter()
            .position(|l| l.starts_with(&format!("── {}", scenario.components[0].name)));
        let second = rendered
            .iter()
            .position(|l| l.starts_with(&format!("── {}", scenario.components[2].name)));
        assert!(first < second, "catalog order violated: {rendered:?}");
        let total = scenario.components[0].tokens + scenario.components[2].tokens;
        assert!(
            rendered
                .last()
                .is_some_and(|l| l == &format!("assembled: {total} tokens"))
        );
    }
}
