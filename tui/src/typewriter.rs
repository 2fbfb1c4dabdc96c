//! Character-by-character reveal of the matched response text.
//!
//! The controller owns the reveal state; pacing comes from a timer task that
//! the app spawns and aborts through the [`AnimationSink`]. Whenever the
//! matched response changes, the reveal restarts from zero for the new text,
//! and exactly one tick chain is live at a time.

use unicode_segmentation::UnicodeSegmentation;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

/// Sink for typewriter animation control.
pub(crate) trait AnimationSink {
    fn start_typewriter(&self);
    fn stop_typewriter(&self);
}

/// Concrete sink backed by `AppEventSender`.
pub(crate) struct AppEventAnimationSink(pub(crate) AppEventSender);

impl AnimationSink for AppEventAnimationSink {
    fn start_typewriter(&self) {
        self.0.send(AppEvent::StartTypewriter);
    }

    fn stop_typewriter(&self) {
        self.0.send(AppEvent::StopTypewriter);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Progressed,
    Done,
}

pub(crate) struct TypewriterController {
    text: String,
    /// Byte offsets of grapheme boundaries; `revealed` indexes into this.
    boundaries: Vec<usize>,
    revealed: usize,
}

impl TypewriterController {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            boundaries: Vec::new(),
            revealed: 0,
        }
    }

    /// Point the controller at (possibly new) response text. A change resets
    /// the reveal and starts the tick chain; identical text is a no-op so
    /// unrelated redraws never restart the animation.
    pub(crate) fn set_text(&mut self, text: &str, sink: &impl AnimationSink) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.boundaries = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        self.revealed = 0;
        if self.boundaries.is_empty() {
            sink.stop_typewriter();
        } else {
            sink.start_typewriter();
        }
    }

    /// Reveal up to `step` more graphemes. Stops the tick chain once the
    /// whole text is visible.
    pub(crate) fn on_tick(&mut self, step: usize, sink: &impl AnimationSink) -> TickOutcome {
        self.revealed = (self.revealed + step.max(1)).min(self.boundaries.len());
        if self.is_done() {
            sink.stop_typewriter();
            TickOutcome::Done
        } else {
            TickOutcome::Progressed
        }
    }

    /// Skip the animation and show everything (used when the user toggles
    /// mid-reveal and the pane needs to settle instantly).
    pub(crate) fn reveal_all(&mut self, sink: &impl AnimationSink) {
        self.revealed = self.boundaries.len();
        sink.stop_typewriter();
    }

    pub(crate) fn is_done(&self) -> bool {
        self.revealed >= self.boundaries.len()
    }

    /// The currently revealed prefix, always on a grapheme boundary.
    pub(crate) fn visible(&self) -> &str {
        match self.boundaries.get(self.revealed) {
            Some(&offset) => &self.text[..offset],
            None => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct TestSink {
        calls: RefCell<Vec<&'static str>>,
    }

    impl AnimationSink for TestSink {
        fn start_typewriter(&self) {
            self.calls.borrow_mut().push("start");
        }

        fn stop_typewriter(&self) {
            self.calls.borrow_mut().push("stop");
        }
    }

    #[test]
    fn reveals_text_in_steps_and_stops_when_done() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        tw.set_text("abcde", &sink);
        assert_eq!(tw.visible(), "");
        assert_eq!(tw.on_tick(2, &sink), TickOutcome::Progressed);
        assert_eq!(tw.visible(), "ab");
        assert_eq!(tw.on_tick(2, &sink), TickOutcome::Progressed);
        assert_eq!(tw.visible(), "abcd");
        assert_eq!(tw.on_tick(2, &sink), TickOutcome::Done);
        assert_eq!(tw.visible(), "abcde");
        assert_eq!(*sink.calls.borrow(), vec!["start", "stop"]);
    }

    #[test]
    fn text_change_restarts_the_reveal() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        tw.set_text("first response", &sink);
        let _ = tw.on_tick(5, &sink);
        tw.set_text("second", &sink);
        assert_eq!(tw.visible(), "");
        assert!(!tw.is_done());
        assert_eq!(*sink.calls.borrow(), vec!["start", "start"]);
    }

    #[test]
    fn identical_text_does_not_restart() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        tw.set_text("same", &sink);
        let _ = tw.on_tick(10, &sink);
        tw.set_text("same", &sink);
        assert!(tw.is_done());
        assert_eq!(tw.visible(), "same");
        assert_eq!(*sink.calls.borrow(), vec!["start", "stop"]);
    }

    #[test]
    fn reveal_respects_grapheme_boundaries() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        // Multi-byte graphemes: a combining pair and an emoji.
        tw.set_text("e\u{301}🚀x", &sink);
        let _ = tw.on_tick(1, &sink);
        assert_eq!(tw.visible(), "e\u{301}");
        let _ = tw.on_tick(1, &sink);
        assert_eq!(tw.visible(), "e\u{301}🚀");
        let _ = tw.on_tick(1, &sink);
        assert_eq!(tw.visible(), "e\u{301}🚀x");
        assert!(tw.is_done());
    }

    #[test]
    fn reveal_all_completes_and_stops() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        tw.set_text("long response text", &sink);
        tw.reveal_all(&sink);
        assert!(tw.is_done());
        assert_eq!(tw.visible(), "long response text");
        assert_eq!(*sink.calls.borrow(), vec!["start", "stop"]);
    }

    #[test]
    fn empty_text_is_immediately_done() {
        let sink = TestSink::default();
        let mut tw = TypewriterController::new();
        tw.set_text("x", &sink);
        tw.set_text("", &sink);
        assert!(tw.is_done());
        assert_eq!(tw.visible(), "");
        assert_eq!(*sink.calls.borrow(), vec!["start", "stop"]);
    }
}
