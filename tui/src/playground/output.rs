//! Agent output view: the matched response with a typewriter reveal, its
//! quality gauge, and the issue/strength lists.

use dojo_content::PlaygroundResponse;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Gauge;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use ratatui::widgets::Wrap;

pub(crate) fn render(
    area: Rect,
    buf: &mut Buffer,
    matched: Option<&PlaygroundResponse>,
    visible_text: &str,
    reveal_done: bool,
) {
    if area.is_empty() {
        return;
    }
    let Some(response) = matched else {
        Paragraph::new(Line::from("(no response authored)".dim().italic()))
            .render_ref(area, buf);
        return;
    };

    let [header, gauge_area, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(area);

    Paragraph::new(Line::from(vec![
        Span::from(response.label.clone()).bold(),
        format!("  ({} / 100)", response.score).dim(),
    ]))
    .render_ref(header, buf);

    Gauge::default()
        .gauge_style(Style::default().fg(score_color(response.score)))
        .ratio(f64::from(response.score) / 100.0)
        .use_unicode(true)
        .render(gauge_area, buf);

    let mut lines: Vec<Line<'static>> = vec![Line::from("")];
    for text_line in visible_text.lines() {
        lines.push(Line::from(text_line.to_string()));
    }
    if !reveal_done {
        // Block cursor while the reveal is in flight.
        match lines.last_mut() {
            Some(last) if !visible_text.ends_with('\n') => last.spans.push("▌".cyan()),
            _ => lines.push(Line::from("▌".cyan())),
        }
    } else {
        annotations(&mut lines, response);
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render_ref(body, buf);
}

fn annotations(lines: &mut Vec<Line<'static>>, response: &PlaygroundResponse) {
    if !response.strengths.is_empty() {
        lines.push(Line::from(""));
        for strength in &response.strengths {
            lines.push(Line::from(vec!["  + ".green(), strength.clone().into()]));
        }
    }
    if !response.issues.is_empty() {
        lines.push(Line::from(""));
        for issue in &response.issues {
            lines.push(Line::from(vec!["  - ".red(), issue.clone().into()]));
        }
    }
}

fn score_color(score: u8) -> Color {
    match score {
        0..=39 => Color::Red,
        40..=69 => Color::Yellow,
        _ => Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn score_bands_map_to_traffic_light_colors() {
        assert_eq!(score_color(10), Color::Red);
        assert_eq!(score_color(39), Color::Red);
        assert_eq!(score_color(40), Color::Yellow);
        assert_eq!(score_color(69), Color::Yellow);
        assert_eq!(score_color(70), Color::Green);
        assert_eq!(score_color(100), Color::Green);
    }
}
