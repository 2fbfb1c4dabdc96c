//! Chapter sidebar: active marker, visited ticks, progress line.

use dojo_content::Academy;
use dojo_core::ReadingProgress;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::text_formatting::truncate_text;

pub(crate) struct Sidebar<'a> {
    academy: &'a Academy,
    progress: &'a ReadingProgress,
}

impl<'a> Sidebar<'a> {
    pub(crate) fn new(academy: &'a Academy, progress: &'a ReadingProgress) -> Self {
        Self { academy, progress }
    }

    fn chapter_line(&self, index: usize, width: u16) -> Line<'static> {
        let chapter = &self.academy.chapters[index];
        let is_active = self.progress.active() == index;
        let visited = self.progress.is_visited(index);

        let marker: Span<'static> = if is_active {
            "▸ ".cyan().bold()
        } else if visited {
            "✓ ".green()
        } else {
            "  ".into()
        };
        let max_cols = usize::from(width).saturating_sub(6);
        let title = truncate_text(&chapter.title, max_cols);
        let label = format!("{}. {title}", chapter.ordinal);
        let text: Span<'static> = if is_active {
            label.bold()
        } else if visited {
            label.into()
        } else {
            label.dim()
        };
        Line::from(vec![marker, text])
    }
}

impl WidgetRef for Sidebar<'_> {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(self.academy.title.clone().bold()));
        lines.push(Line::from(""));
        for index in 0..self.academy.chapters.len() {
            lines.push(self.chapter_line(index, area.width));
        }
        lines.push(Line::from(""));

        let percent = self.progress.percent();
        lines.push(Line::from(vec![
            "Progress ".dim(),
            format!("{percent}%").bold(),
        ]));
        let bar_width = usize::from(area.width).saturating_sub(2).min(20);
        if bar_width > 0 {
            let filled = bar_width * usize::from(percent) / 100;
            lines.push(Line::from(vec![
                "█".repeat(filled).green(),
                "░".repeat(bar_width - filled).dim(),
            ]));
        }

        Paragraph::new(lines).render_ref(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_content::AcademyId;
    use dojo_content::Chapter;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn academy() -> Academy {
        Academy {
            id: AcademyId::AgenticRag,
            title: "RAG".to_string(),
            tagline: String::new(),
            chapters: vec![
                Chapter::new("one", 1, "One", "", Vec::new()),
                Chapter::new("two", 2, "Two", "", Vec::new()),
                Chapter::new("three", 3, "Three", "", Vec::new()),
            ],
            scenarios: Vec::new(),
        }
    }

    fn render_rows(academy: &Academy, progress: &ReadingProgress) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(24, 8)).expect("terminal");
        terminal
            .draw(|f| Sidebar::new(academy, progress).render_ref(f.area(), f.buffer_mut()))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| {
                        buffer
                            .cell((x, y))
                            .map(|cell| cell.symbol().to_string())
                            .unwrap_or_default()
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn marks_active_and_visited_chapters() {
        let academy = academy();
        let mut progress = ReadingProgress::new(3);
        progress.observe_active(1);
        let rows = render_rows(&academy, &progress);
        assert_eq!(rows[2], "✓ 1. One");
        assert_eq!(rows[3], "▸ 2. Two");
        assert_eq!(rows[4], "  3. Three");
    }

    #[test]
    fn shows_rounded_progress_percent() {
        let academy = academy();
        let mut progress = ReadingProgress::new(3);
        progress.observe_active(2);
        let rows = render_rows(&academy, &progress);
        assert!(rows.iter().any(|r| r.contains("Progress 67%")), "rows: {rows:?}");
    }
}
