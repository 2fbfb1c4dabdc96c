//! Renders an academy's chapters into one scrollable document of styled
//! lines, remembering where each chapter starts so the sidebar and the
//! progress tracker can follow the viewport.

use dojo_content::Academy;
use dojo_content::Chapter;
use dojo_content::ScenarioId;
use dojo_content::Section;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

/// The assembled document for one academy at one wrap width.
pub(crate) struct ChapterDoc {
    pub(crate) lines: Vec<Line<'static>>,
    /// Line index where each chapter's heading sits; parallel to
    /// `academy.chapters`.
    pub(crate) anchors: Vec<usize>,
    width: u16,
}

impl ChapterDoc {
    pub(crate) fn build(academy: &Academy, width: u16) -> Self {
        let wrap = usize::from(width.max(20)).saturating_sub(2);
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut anchors = Vec::with_capacity(academy.chapters.len());

        lines.push(Line::from(academy.title.clone().bold().cyan()));
        lines.push(Line::from(academy.tagline.clone().italic().dim()));

        for chapter in &academy.chapters {
            lines.push(Line::from(""));
            anchors.push(lines.len());
            push_chapter(&mut lines, chapter, wrap);
        }

        Self {
            lines,
            anchors,
            width,
        }
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn max_scroll(&self, viewport_height: u16) -> usize {
        self.lines.len().saturating_sub(usize::from(viewport_height))
    }

    /// Chapter whose extent intersects the viewport band: the last chapter
    /// whose anchor is at or above `scroll + band`. A viewport parked at the
    /// bottom counts as the final chapter, which could otherwise be too
    /// short to ever reach the band.
    pub(crate) fn active_chapter(&self, scroll: usize, viewport_height: u16) -> usize {
        if self.anchors.is_empty() {
            return 0;
        }
        if scroll >= self.max_scroll(viewport_height) {
            return self.anchors.len() - 1;
        }
        let band = scroll + usize::from(viewport_height / 3);
        self.anchors
            .iter()
            .rposition(|&anchor| anchor <= band)
            .unwrap_or(0)
    }
}

fn push_chapter(lines: &mut Vec<Line<'static>>, chapter: &Chapter, wrap: usize) {
    lines.push(Line::from(vec![
        Span::from(format!("{}. ", chapter.ordinal)).bold().cyan(),
        Span::from(chapter.title.clone()).bold(),
    ]));
    lines.push(Line::from(chapter.subtitle.clone().dim().italic()));
    lines.push(Line::from("─".repeat(wrap.min(48)).dim()));

    for section in &chapter.body {
        push_section(lines, section, wrap);
    }
}

fn push_section(lines: &mut Vec<Line<'static>>, section: &Section, wrap: usize) {
    match section {
        Section::Heading(text) => {
            lines.push(Line::from(""));
            lines.push(Line::from(text.clone().bold()));
        }
        Section::Prose(text) => {
            lines.push(Line::from(""));
            for piece in textwrap::wrap(text, wrap) {
                lines.push(Line::from(piece.into_owned()));
            }
        }
        Section::Bullets(items) => {
            lines.push(Line::from(""));
            for item in items {
                let wrapped = textwrap::wrap(item, wrap.saturating_sub(4).max(8));
                for (i, piece) in wrapped.iter().enumerate() {
                    let prefix = if i == 0 { "  • " } else { "    " };
                    lines.push(Line::from(format!("{prefix}{piece}")));
                }
            }
        }
        Section::Table { headers, rows } => {
            lines.push(Line::from(""));
            push_table(lines, headers, rows);
        }
        Section::Code { lang, source } => {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("  ┌ {lang}").dim()));
            for code_line in source.lines() {
                lines.push(Line::from(vec![
                    "  │ ".dim(),
                    Span::from(code_line.to_string()),
                ]));
            }
            lines.push(Line::from("  └".to_string().dim()));
        }
        Section::Callout(text) => {
            lines.push(Line::from(""));
            for piece in textwrap::wrap(text, wrap.saturating_sub(2).max(8)) {
                lines.push(Line::from(vec![
                    "▌ ".magenta(),
                    Span::from(piece.into_owned()).italic(),
                ]));
            }
        }
        Section::Playground(_) => {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                "◆ ".cyan(),
                "Interactive playground — rendered in the pane below".cyan().italic(),
            ]));
        }
    }
}

fn push_table(lines: &mut Vec<Line<'static>>, headers: &[String], rows: &[Vec<String>]) {
    let columns = headers.len();
    if columns == 0 {
        return;
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let render_row = |cells: &[String]| -> String {
        let mut out = String::from("  ");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            out.push_str(cell);
            out.push_str(&" ".repeat(width.saturating_sub(cell.width()) + 2));
        }
        out.trim_end().to_string()
    };

    lines.push(Line::from(render_row(headers).bold()));
    lines.push(Line::from(
        format!("  {}", "─".repeat(widths.iter().sum::<usize>() + 2 * (columns - 1))).dim(),
    ));
    for row in rows {
        lines.push(Line::from(render_row(row)));
    }
}

/// Scenario embedded by the chapter, if any (the first playground section
/// wins; chapters embed at most one in practice).
pub(crate) fn embedded_scenario(chapter: &Chapter) -> Option<&ScenarioId> {
    chapter.playground_refs().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_content::AcademyId;
    use pretty_assertions::assert_eq;

    fn academy() -> Academy {
        Academy {
            id: AcademyId::LlmEvals,
            title: "T".to_string(),
            tagline: "tag".to_string(),
            chapters: vec![
                Chapter::new("a", 1, "Alpha", "first", vec![
                    Section::Prose("one paragraph of text".to_string()),
                ]),
                Chapter::new("b", 2, "Beta", "second", vec![
                    Section::Bullets(vec!["x".to_string(), "y".to_string()]),
                ]),
            ],
            scenarios: Vec::new(),
        }
    }

    #[test]
    fn anchors_point_at_chapter_headings() {
        let doc = ChapterDoc::build(&academy(), 60);
        assert_eq!(doc.anchors.len(), 2);
        for (index, &anchor) in doc.anchors.iter().enumerate() {
            let text: String = doc.lines[anchor]
                .spans
                .iter()
                .map(|s| s.content.clone())
                .collect();
            assert!(
                text.starts_with(&format!("{}. ", index + 1)),
                "anchor {index} points at `{text}`"
            );
        }
    }

    #[test]
    fn active_chapter_follows_scroll_and_clamps_at_bottom() {
        let doc = ChapterDoc::build(&academy(), 60);
        assert_eq!(doc.active_chapter(0, 9), 0);
        // Scrolled far enough that the second anchor is inside the band.
        assert_eq!(doc.active_chapter(doc.anchors[1], 9), 1);
        // Parked at (or past) the bottom counts as the last chapter.
        let max = doc.max_scroll(9);
        assert_eq!(doc.active_chapter(max, 9), 1);
    }

    #[test]
    fn narrow_widths_still_produce_a_document() {
        let doc = ChapterDoc::build(&academy(), 10);
        assert!(doc.len() > 0);
        assert_eq!(doc.width(), 10);
    }
}
