//! Principles checklist: which authored principles the current enabled set
//! satisfies.

use dojo_content::PlaygroundScenario;
use dojo_content::Principle;
use dojo_core::PlaygroundSession;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

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

fn satisfied(principle: &Principle, session: &PlaygroundSession) -> bool {
    principle
        .satisfied_by
        .iter()
        .all(|id| session.is_enabled(id))
}

fn lines(
    scenario: &PlaygroundScenario,
    session: &PlaygroundSession,
    width: usize,
) -> Vec<Line<'static>> {
    let wrap = width.saturating_sub(6).max(16);
    let mut lines: Vec<Line<'static>> = Vec::new();
    for principle in &scenario.principles {
        if principle.satisfied_by.is_empty() {
            // Informational: no component can satisfy or violate it.
            lines.push(Line::from(vec![
                "◇ ".dim(),
                principle.title.clone().dim().bold(),
            ]));
        } else if satisfied(principle, session) {
            lines.push(Line::from(vec![
                "[✓] ".green(),
                principle.title.clone().bold(),
            ]));
        } else {
            lines.push(Line::from(vec![
                "[ ] ".dim(),
                principle.title.clone().dim().bold(),
            ]));
        }
        for piece in textwrap::wrap(&principle.detail, wrap) {
            lines.push(Line::from(format!("    {piece}").dim()));
        }
        lines.push(Line::from(""));
    }
    if scenario.principles.is_empty() {
        lines.push(Line::from("(no principles authored)".dim().italic()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn principles_check_off_as_their_components_enable() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ContextEngineering);
        let scenario = &academy.scenarios[0];
        let mut session = PlaygroundSession::new(scenario);

        let before = plain(&lines(scenario, &session, 60));
        assert!(before.iter().all(|l| !l.starts_with("[✓]")));

        // Enable the component satisfying the first principle.
        let id = scenario.principles[0].satisfied_by[0].clone();
        session.toggle(&id);
        let after = plain(&lines(scenario, &session, 60));
        assert!(
            after
                .iter()
                .any(|l| l.starts_with(&format!("[✓] {}", scenario.principles[0].title)))
        );
    }

    #[test]
    fn informational_principles_render_as_diamonds() {
        let academy = dojo_content::academy(dojo_content::AcademyId::ContextEngineering);
        let scenario = &academy.scenarios[0];
        let session = PlaygroundSession::new(scenario);
        let rendered = plain(&lines(scenario, &session, 60));
        // The curriculum ships one informational principle in this scenario.
        assert!(rendered.iter().any(|l| l.starts_with("◇ ")));
    }
}
