//! The interactive playground pane: a component rail on the left, one of
//! four derived views on the right, all reading the same session state.

mod context_view;
mod output;
mod pipeline;
mod principles;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use dojo_content::PlaygroundScenario;
use dojo_core::PlaybackStep;
use dojo_core::PlaygroundSession;
use dojo_core::PlaygroundView;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;
use strum::IntoEnumIterator;

use crate::colors::tint_color;
use crate::text_formatting::truncate_text;
use crate::typewriter::AnimationSink;
use crate::typewriter::TypewriterController;

const RAIL_WIDTH: u16 = 26;

/// What the app loop should do with its animation timers after a pane
/// interaction. The pane has already applied the state transition; the
/// request is purely about timer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaneRequest {
    StartPlayback,
    StopPlayback,
}

pub(crate) struct PlaygroundPane {
    scenario: &'static PlaygroundScenario,
    session: PlaygroundSession,
    cursor: usize,
    typewriter: TypewriterController,
}

impl PlaygroundPane {
    pub(crate) fn new(scenario: &'static PlaygroundScenario, sink: &impl AnimationSink) -> Self {
        let mut pane = Self {
            scenario,
            session: PlaygroundSession::new(scenario),
            cursor: 0,
            typewriter: TypewriterController::new(),
        };
        pane.sync_matched(sink);
        pane
    }

    pub(crate) fn scenario(&self) -> &'static PlaygroundScenario {
        self.scenario
    }

    /// Re-derive the matched response and point the typewriter at its text.
    /// Call after every session mutation; a no-op when the match is stable.
    pub(crate) fn sync_matched(&mut self, sink: &impl AnimationSink) {
        let text = dojo_core::best_response(self.scenario, self.session.enabled())
            .map(|r| r.agent_response.as_str())
            .unwrap_or_default();
        self.typewriter.set_text(text, sink);
    }

    /// One build-order playback tick from the app's timer chain.
    pub(crate) fn on_playback_tick(&mut self, sink: &impl AnimationSink) -> Option<PlaybackStep> {
        let step = self.session.advance_playback();
        if step.is_some() {
            self.sync_matched(sink);
        }
        step
    }

    pub(crate) fn on_typewriter_tick(&mut self, step: usize, sink: &impl AnimationSink) {
        let _ = self.typewriter.on_tick(step, sink);
    }

    pub(crate) fn handle_key(
        &mut self,
        key: KeyEvent,
        sink: &impl AnimationSink,
    ) -> Option<PaneRequest> {
        // Modifier guard: chords belong to the terminal, not the pane.
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Tab => {
                self.session.cycle_view();
                None
            }
            KeyCode::Char('1') => {
                self.session.set_view(PlaygroundView::Output);
                None
            }
            KeyCode::Char('2') => {
                self.session.set_view(PlaygroundView::Context);
                None
            }
            KeyCode::Char('3') => {
                self.session.set_view(PlaygroundView::Pipeline);
                None
            }
            KeyCode::Char('4') => {
                self.session.set_view(PlaygroundView::Principles);
                None
            }
            KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(self.scenario.components.len().saturating_sub(1));
                None
            }
            KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Char(' ') => {
                if let Some(component) = self.scenario.components.get(self.cursor) {
                    self.session.toggle(&component.id);
                    self.sync_matched(sink);
                }
                None
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.sync_matched(sink);
                Some(PaneRequest::StopPlayback)
            }
            KeyCode::Char('a') => {
                self.session.enable_all();
                self.sync_matched(sink);
                Some(PaneRequest::StopPlayback)
            }
            KeyCode::Char('g') => {
                self.session.begin_playback();
                self.sync_matched(sink);
                Some(PaneRequest::StartPlayback)
            }
            _ => None,
        }
    }

    fn rail_lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let label = self
            .scenario
            .input_label
            .clone()
            .unwrap_or_else(|| "Input".to_string());
        lines.push(Line::from(label.bold()));
        let msg_cols = usize::from(width).saturating_sub(2);
        lines.push(Line::from(
            truncate_text(&self.scenario.customer_message, msg_cols).italic().dim(),
        ));
        lines.push(Line::from(""));

        for (index, component) in self.scenario.components.iter().enumerate() {
            let selected = index == self.cursor;
            let enabled = self.session.is_enabled(&component.id);
            let marker: Span<'static> = if selected { "› ".bold() } else { "  ".into() };
            let checkbox: Span<'static> = if enabled {
                Span::from("[x] ").fg(tint_color(component.tint))
            } else {
                "[ ] ".dim()
            };
            let name_cols = usize::from(width).saturating_sub(12);
            let name = truncate_text(&component.short_name, name_cols);
            let name: Span<'static> = if enabled { name.into() } else { name.dim() };
            lines.push(Line::from(vec![
                marker,
                checkbox,
                name,
                format!(" {}t", component.tokens).dim(),
            ]));
        }

        lines.push(Line::from(""));
        if self.session.is_animating() {
            lines.push(Line::from("building…".cyan().italic()));
        } else {
            lines.push(Line::from(
                format!("{} tokens assembled", self.session.enabled_tokens(self.scenario)).dim(),
            ));
        }
        lines
    }

    fn tab_line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (index, view) in PlaygroundView::iter().enumerate() {
            if index > 0 {
                spans.push(" │ ".dim());
            }
            let label = format!("{} {view}", index + 1);
            if view == self.session.active_view() {
                spans.push(label.bold().cyan());
            } else {
                spans.push(label.dim());
            }
        }
        Line::from(spans)
    }
}

impl WidgetRef for PlaygroundPane {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" Playground ".bold());
        let inner = block.inner(area);
        block.render_ref(area, buf);
        if inner.is_empty() {
            return;
        }

        let [rail, view] =
            Layout::horizontal([Constraint::Length(RAIL_WIDTH), Constraint::Min(10)]).areas(inner);

        Paragraph::new(self.rail_lines(rail.width)).render_ref(rail, buf);

        let [tabs, body] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(view);
        Paragraph::new(vec![self.tab_line(), Line::from("")]).render_ref(tabs, buf);

        let matched = dojo_core::best_response(self.scenario, self.session.enabled());
        match self.session.active_view() {
            PlaygroundView::Output => output::render(
                body,
                buf,
                matched,
                self.typewriter.visible(),
                self.typewriter.is_done(),
            ),
            PlaygroundView::Context => {
                context_view::render(body, buf, self.scenario, &self.session)
            }
            PlaygroundView::Pipeline => {
                pipeline::render(body, buf, self.scenario, &self.session)
            }
            PlaygroundView::Principles => {
                principles::render(body, buf, self.scenario, &self.session)
            }
        }
    }
}
