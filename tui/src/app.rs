//! The app loop: screen state, key routing, and ownership of the two
//! animation timer chains (build-order playback and typewriter reveal).
//!
//! At most one timer chain of each kind is live. Starting a chain bumps a
//! generation counter and aborts the previous task; ticks carry the
//! generation they were minted with and stale ones are dropped, so a chain
//! racing its own cancellation can never mutate the session it lost.

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use dojo_content::Academy;
use dojo_content::AcademyId;
use dojo_core::PlaybackStep;
use dojo_core::ReadingProgress;
use dojo_core::config::Config;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::WidgetRef;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::academy_picker::AcademyPicker;
use crate::academy_picker::PickerSelection;
use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::chapter::ChapterDoc;
use crate::chapter::embedded_scenario;
use crate::key_hint;
use crate::playground::PaneRequest;
use crate::playground::PlaygroundPane;
use crate::sidebar::Sidebar;
use crate::tui::Tui;
use crate::typewriter::AppEventAnimationSink;

const SIDEBAR_WIDTH: u16 = 28;
const PANE_HEIGHT: u16 = 16;

enum Screen {
    Picker(AcademyPicker),
    Academy(AcademyView),
}

struct AcademyView {
    academy: &'static Academy,
    progress: ReadingProgress,
    scroll: usize,
    doc: ChapterDoc,
    pane: Option<PlaygroundPane>,
    /// Height of the document viewport at the last draw; drives paging and
    /// the active-chapter band.
    doc_height: u16,
}

impl AcademyView {
    fn new(academy: &'static Academy) -> Self {
        Self {
            academy,
            progress: ReadingProgress::new(academy.chapters.len()),
            scroll: 0,
            doc: ChapterDoc::build(academy, 80),
            pane: None,
            doc_height: 20,
        }
    }

    fn active_scenario_id(&self) -> Option<&dojo_content::ScenarioId> {
        let chapter = self.academy.chapters.get(self.progress.active())?;
        embedded_scenario(chapter)
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.doc.max_scroll(self.doc_height);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
        self.progress
            .observe_active(self.doc.active_chapter(self.scroll, self.doc_height));
    }

    /// Jump to an adjacent chapter (clamped, no wraparound) and mark it
    /// visited directly: keyboard navigation is an explicit visit even when
    /// clamping keeps its anchor out of the observer band.
    fn jump_to(&mut self, target: usize) {
        let max = self.doc.max_scroll(self.doc_height);
        if let Some(&anchor) = self.doc.anchors.get(target) {
            self.scroll = anchor.min(max);
            self.progress.observe_active(target);
        }
    }
}

pub(crate) struct App {
    config: Config,
    app_event_tx: AppEventSender,
    screen: Screen,
    playback_timer: Option<JoinHandle<()>>,
    playback_generation: u64,
    typewriter_timer: Option<JoinHandle<()>>,
    typewriter_generation: u64,
    should_quit: bool,
}

impl App {
    fn new(config: Config, app_event_tx: AppEventSender) -> Self {
        Self {
            config,
            app_event_tx,
            screen: Screen::Picker(AcademyPicker::new()),
            playback_timer: None,
            playback_generation: 0,
            typewriter_timer: None,
            typewriter_generation: 0,
            should_quit: false,
        }
    }

    pub(crate) async fn run(config: Config, tui: &mut Tui) -> std::io::Result<()> {
        let (tx_raw, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let tx = AppEventSender::new(tx_raw);
        let mut app = App::new(config, tx.clone());
        if let Some(id) = app.config.default_academy {
            app.open_academy(id);
        }
        app.draw(tui)?;

        let mut events = tui.event_stream();
        while !app.should_quit {
            tokio::select! {
                Some(Ok(event)) = events.next() => {
                    match event {
                        Event::Key(key) if key.kind != KeyEventKind::Release => {
                            tx.send(AppEvent::Key(key));
                        }
                        Event::Resize(_, _) => tx.send(AppEvent::Redraw),
                        _ => {}
                    }
                }
                Some(event) = rx.recv() => {
                    app.handle_event(event);
                    // Coalesce whatever else is queued into one repaint.
                    while let Ok(event) = rx.try_recv() {
                        app.handle_event(event);
                    }
                    app.draw(tui)?;
                }
            }
        }

        app.stop_playback_timer();
        app.stop_typewriter_timer();
        Ok(())
    }

    fn sink(&self) -> AppEventAnimationSink {
        AppEventAnimationSink(self.app_event_tx.clone())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Redraw => {}
            AppEvent::BuildPlaybackTick(generation) => self.on_playback_tick(generation),
            AppEvent::StartTypewriter => self.start_typewriter_timer(),
            AppEvent::StopTypewriter => self.stop_typewriter_timer(),
            AppEvent::TypewriterTick(generation) => self.on_typewriter_tick(generation),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Screen::Picker(picker) = &mut self.screen {
            match picker.handle_key(key) {
                Some(PickerSelection::Exit) => self.should_quit = true,
                Some(PickerSelection::Open(id)) => self.open_academy(id),
                None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                self.close_academy();
                return;
            }
            _ => {}
        }
        // Keys with a control/alt modifier belong to the terminal.
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }

        let sink = self.sink();
        let mut pane_request: Option<PaneRequest> = None;
        if let Screen::Academy(view) = &mut self.screen {
            let page = view.doc_height.saturating_sub(1).max(1) as isize;
            match key.code {
                KeyCode::Up => view.scroll_by(-1),
                KeyCode::Down => view.scroll_by(1),
                KeyCode::PageUp => view.scroll_by(-page),
                KeyCode::PageDown => view.scroll_by(page),
                KeyCode::Char(']') | KeyCode::Char('n') => {
                    let target = view.progress.next_target();
                    view.jump_to(target);
                }
                KeyCode::Char('[') | KeyCode::Char('p') => {
                    let target = view.progress.prev_target();
                    view.jump_to(target);
                }
                _ => {
                    if let Some(pane) = view.pane.as_mut() {
                        pane_request = pane.handle_key(key, &sink);
                    }
                }
            }
        }
        match pane_request {
            Some(PaneRequest::StartPlayback) => self.start_playback_timer(),
            Some(PaneRequest::StopPlayback) => self.stop_playback_timer(),
            None => {}
        }
        self.sync_pane_binding();
    }

    fn open_academy(&mut self, id: AcademyId) {
        self.stop_playback_timer();
        self.stop_typewriter_timer();
        self.screen = Screen::Academy(AcademyView::new(dojo_content::academy(id)));
        self.sync_pane_binding();
    }

    fn close_academy(&mut self) {
        self.stop_playback_timer();
        self.stop_typewriter_timer();
        self.screen = Screen::Picker(AcademyPicker::new());
    }

    /// Bind the playground pane to the active chapter's scenario. A change
    /// of scenario identity tears down both timer chains and builds a fresh
    /// pane, so no state (and no timer) carries over.
    fn sync_pane_binding(&mut self) {
        let sink = self.sink();
        let (academy, desired_id, current_id) = match &self.screen {
            Screen::Academy(view) => (
                view.academy,
                view.active_scenario_id().cloned(),
                view.pane.as_ref().map(|p| p.scenario().id.clone()),
            ),
            Screen::Picker(_) => return,
        };
        if desired_id == current_id {
            return;
        }
        self.stop_playback_timer();
        self.stop_typewriter_timer();
        let desired = desired_id.and_then(|id| academy.scenario(&id));
        if let Screen::Academy(view) = &mut self.screen {
            view.pane = desired.map(|scenario| PlaygroundPane::new(scenario, &sink));
        }
    }

    fn on_playback_tick(&mut self, generation: u64) {
        if generation != self.playback_generation {
            return;
        }
        let sink = self.sink();
        let Screen::Academy(view) = &mut self.screen else {
            return;
        };
        let Some(pane) = view.pane.as_mut() else {
            return;
        };
        match pane.on_playback_tick(&sink) {
            Some(PlaybackStep::Applied(_)) => {}
            Some(PlaybackStep::Finished) | None => self.stop_playback_timer(),
        }
    }

    fn on_typewriter_tick(&mut self, generation: u64) {
        if generation != self.typewriter_generation {
            return;
        }
        let sink = self.sink();
        let step = usize::from(self.config.typewriter_chars_per_tick);
        let Screen::Academy(view) = &mut self.screen else {
            return;
        };
        if let Some(pane) = view.pane.as_mut() {
            pane.on_typewriter_tick(step, &sink);
        }
    }

    fn start_playback_timer(&mut self) {
        self.stop_playback_timer();
        self.playback_generation += 1;
        let generation = self.playback_generation;
        let tx = self.app_event_tx.clone();
        let start_delay = self.config.build_start_delay;
        let interval = self.config.build_step_interval;
        self.playback_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(start_delay).await;
            loop {
                tx.send(AppEvent::BuildPlaybackTick(generation));
                tokio::time::sleep(interval).await;
            }
        }));
    }

    fn stop_playback_timer(&mut self) {
        if let Some(handle) = self.playback_timer.take() {
            handle.abort();
        }
    }

    fn start_typewriter_timer(&mut self) {
        self.stop_typewriter_timer();
        self.typewriter_generation += 1;
        let generation = self.typewriter_generation;
        let tx = self.app_event_tx.clone();
        let interval = self.config.typewriter_interval;
        self.typewriter_timer = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                tx.send(AppEvent::TypewriterTick(generation));
            }
        }));
    }

    fn stop_typewriter_timer(&mut self) {
        if let Some(handle) = self.typewriter_timer.take() {
            handle.abort();
        }
    }

    fn draw(&mut self, tui: &mut Tui) -> std::io::Result<()> {
        // Fit the document to the current terminal before rendering.
        let size = tui.terminal.size()?;
        if let Screen::Academy(view) = &mut self.screen {
            let main_width = size.width.saturating_sub(SIDEBAR_WIDTH);
            let pane_visible = view.active_scenario_id().is_some();
            let doc_height = if pane_visible {
                size.height.saturating_sub(PANE_HEIGHT + 1)
            } else {
                size.height.saturating_sub(1)
            }
            .max(3);
            view.doc_height = doc_height;
            if view.doc.width() != main_width {
                view.doc = ChapterDoc::build(view.academy, main_width);
            }
            view.scroll = view.scroll.min(view.doc.max_scroll(doc_height));
        }

        let screen = &self.screen;
        tui.draw(|frame| match screen {
            Screen::Picker(picker) => picker.render_ref(frame.area(), frame.buffer_mut()),
            Screen::Academy(view) => render_academy(view, frame.area(), frame.buffer_mut()),
        })
    }
}

fn render_academy(view: &AcademyView, area: Rect, buf: &mut ratatui::buffer::Buffer) {
    let [sidebar_area, main] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)]).areas(area);
    Sidebar::new(view.academy, &view.progress).render_ref(sidebar_area, buf);

    let pane_visible = view.pane.is_some();
    let (doc_area, pane_area, hint_area) = if pane_visible {
        let [doc, pane, hint] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(PANE_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(main);
        (doc, Some(pane), hint)
    } else {
        let [doc, hint] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(main);
        (doc, None, hint)
    };

    let start = view.scroll.min(view.doc.len());
    let end = (start + usize::from(doc_area.height)).min(view.doc.len());
    Paragraph::new(view.doc.lines[start..end].to_vec()).render_ref(doc_area, buf);

    if let (Some(pane_area), Some(pane)) = (pane_area, view.pane.as_ref()) {
        pane.render_ref(pane_area, buf);
    }

    let mut hint: Vec<ratatui::text::Span<'static>> = vec![
        key_hint::plain("↑↓"),
        " scroll  ".dim(),
        key_hint::plain("[ ]"),
        " chapters  ".dim(),
    ];
    if pane_visible {
        hint.extend(vec![
            key_hint::plain("Space"),
            " toggle  ".dim(),
            key_hint::plain("g"),
            " guided build  ".dim(),
            key_hint::plain("r"),
            " reset  ".dim(),
            key_hint::plain("a"),
            " recommended  ".dim(),
            key_hint::plain("Tab"),
            " views  ".dim(),
        ]);
    }
    hint.extend(vec![
        key_hint::plain("Esc"),
        " academies  ".dim(),
        key_hint::ctrl("C"),
        " quit".dim(),
    ]);
    Paragraph::new(Line::from(hint)).render_ref(hint_area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        let (tx_raw, _rx) = tokio::sync::mpsc::unbounded_channel();
        let config = Config {
            dojo_home: std::path::PathBuf::from("/tmp/dojo-test"),
            default_academy: None,
            build_start_delay: std::time::Duration::from_millis(0),
            build_step_interval: std::time::Duration::from_millis(1),
            typewriter_interval: std::time::Duration::from_millis(1),
            typewriter_chars_per_tick: 3,
        };
        App::new(config, AppEventSender::new(tx_raw))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn starts_on_the_picker_and_opens_an_academy() {
        let mut app = test_app();
        assert!(matches!(app.screen, Screen::Picker(_)));
        app.handle_event(AppEvent::Key(key(KeyCode::Enter)));
        let Screen::Academy(view) = &app.screen else {
            panic!("expected academy screen");
        };
        assert_eq!(view.academy.id, dojo_content::academies()[0].id);
    }

    #[test]
    fn escape_returns_to_the_picker() {
        let mut app = test_app();
        app.open_academy(AcademyId::LlmEvals);
        app.handle_event(AppEvent::Key(key(KeyCode::Esc)));
        assert!(matches!(app.screen, Screen::Picker(_)));
    }

    #[test]
    fn chapter_jump_marks_target_visited_and_clamps() {
        let mut app = test_app();
        app.open_academy(AcademyId::AgenticRag);
        let Screen::Academy(view) = &mut app.screen else {
            panic!("expected academy screen");
        };
        let chapters = view.academy.chapters.len();
        for _ in 0..chapters + 3 {
            app.handle_event(AppEvent::Key(key(KeyCode::Char(']'))));
        }
        let Screen::Academy(view) = &app.screen else {
            panic!("expected academy screen");
        };
        assert_eq!(view.progress.active(), chapters - 1);
        assert_eq!(view.progress.percent(), 100);
        // And back past the beginning without wrapping.
        for _ in 0..chapters + 3 {
            app.handle_event(AppEvent::Key(key(KeyCode::Char('['))));
        }
        let Screen::Academy(view) = &app.screen else {
            panic!("expected academy screen");
        };
        assert_eq!(view.progress.active(), 0);
        assert_eq!(view.progress.percent(), 100);
    }

    fn current_pane_scenario(app: &App) -> Option<&str> {
        match &app.screen {
            Screen::Academy(view) => view.pane.as_ref().map(|p| p.scenario().id.as_str()),
            Screen::Picker(_) => None,
        }
    }

    #[test]
    fn pane_binds_to_the_lab_chapter_and_unbinds_past_it() {
        let mut app = test_app();
        app.open_academy(AcademyId::ContextEngineering);
        assert_eq!(current_pane_scenario(&app), None);

        // The lab chapter (index 3) embeds the scenario.
        for _ in 0..3 {
            app.handle_event(AppEvent::Key(key(KeyCode::Char(']'))));
        }
        let Screen::Academy(view) = &app.screen else {
            panic!("expected academy screen");
        };
        assert_eq!(view.progress.active(), 3);
        assert_eq!(current_pane_scenario(&app), Some("support-triage"));

        // Moving on unbinds the pane; state never carries over.
        app.handle_event(AppEvent::Key(key(KeyCode::Char(']'))));
        assert_eq!(current_pane_scenario(&app), None);
    }

    #[test]
    fn stale_ticks_are_dropped() {
        let mut app = test_app();
        app.open_academy(AcademyId::ContextEngineering);
        // No timer was ever started, so any tick generation is stale; these
        // must be inert no-ops.
        app.handle_event(AppEvent::BuildPlaybackTick(7));
        app.handle_event(AppEvent::TypewriterTick(7));
        let Screen::Academy(view) = &app.screen else {
            panic!("expected academy screen");
        };
        assert!(view.pane.is_none());
    }
}
