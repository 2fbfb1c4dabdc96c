//! Startup picker listing the six academies with simple search.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use dojo_content::Academy;
use dojo_content::AcademyId;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;

use crate::key_hint;
use crate::text_formatting::truncate_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickerSelection {
    Open(AcademyId),
    Exit,
}

pub(crate) struct AcademyPicker {
    all: Vec<&'static Academy>,
    filtered: Vec<&'static Academy>,
    selected: usize,
    query: String,
}

impl AcademyPicker {
    pub(crate) fn new() -> Self {
        let all: Vec<&'static Academy> = dojo_content::academies().iter().collect();
        Self {
            filtered: all.clone(),
            all,
            selected: 0,
            query: String::new(),
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<PickerSelection> {
        match key.code {
            KeyCode::Esc => return Some(PickerSelection::Exit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(PickerSelection::Exit);
            }
            KeyCode::Enter => {
                if let Some(academy) = self.filtered.get(self.selected) {
                    return Some(PickerSelection::Open(academy.id));
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) => {
                // Basic text input for search; leave chords to the terminal.
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.query.push(c);
                    self.apply_filter();
                }
            }
            _ => {}
        }
        None
    }

    fn apply_filter(&mut self) {
        if self.query.is_empty() {
            self.filtered = self.all.clone();
        } else {
            let q = self.query.to_lowercase();
            self.filtered = self
                .all
                .iter()
                .filter(|a| {
                    a.title.to_lowercase().contains(&q) || a.tagline.to_lowercase().contains(&q)
                })
                .copied()
                .collect();
        }
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }
}

impl WidgetRef for AcademyPicker {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let [header, search, list, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(Line::from("Pick an academy".bold().cyan())).render_ref(header, buf);

        let q = if self.query.is_empty() {
            Line::from("Type to search".dim())
        } else {
            Line::from(format!("Search: {}", self.query))
        };
        Paragraph::new(q).render_ref(search, buf);

        let mut lines: Vec<Line<'static>> = Vec::new();
        if self.filtered.is_empty() {
            lines.push(Line::from("No academy matches".italic().dim()));
        }
        for (index, academy) in self.filtered.iter().enumerate() {
            let is_sel = index == self.selected;
            let marker = if is_sel { "> ".bold() } else { "  ".into() };
            let title = if is_sel {
                academy.title.clone().bold().cyan()
            } else {
                academy.title.clone().into()
            };
            let max_cols = usize::from(area.width).saturating_sub(30);
            lines.push(Line::from(vec![
                marker,
                title,
                "  ".into(),
                truncate_text(&academy.tagline, max_cols).dim(),
            ]));
        }
        Paragraph::new(lines).render_ref(list, buf);

        let hint_line: Line = vec![
            key_hint::plain("Enter"),
            " to open  ".dim(),
            key_hint::plain("Esc"),
            " to quit  ".dim(),
            key_hint::plain("↑/↓"),
            " to choose".dim(),
        ]
        .into();
        Paragraph::new(hint_line).render_ref(hint, buf);
    }
}
