//! Mutable state of one playground session.
//!
//! The session is the only mutable runtime entity in the system: the enabled
//! component set, the active presentation view, and the armed build-order
//! playback. All transitions are synchronous; the TUI owns the pacing and
//! calls [`PlaygroundSession::advance_playback`] on each animation tick.

use std::collections::BTreeSet;

use dojo_content::ComponentId;
use dojo_content::PlaygroundScenario;
use dojo_content::ScenarioId;

/// The four renderings of the same session state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum PlaygroundView {
    #[default]
    #[strum(serialize = "Agent output")]
    Output,
    #[strum(serialize = "Context window")]
    Context,
    #[strum(serialize = "Pipeline")]
    Pipeline,
    #[strum(serialize = "Principles")]
    Principles,
}

impl PlaygroundView {
    pub fn next(self) -> Self {
        match self {
            Self::Output => Self::Context,
            Self::Context => Self::Pipeline,
            Self::Pipeline => Self::Principles,
            Self::Principles => Self::Output,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Output => Self::Principles,
            Self::Context => Self::Output,
            Self::Pipeline => Self::Context,
            Self::Principles => Self::Pipeline,
        }
    }
}

/// Result of one playback tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStep {
    /// The next build-order component was enabled.
    Applied(ComponentId),
    /// The build order is exhausted; the session left the animating state.
    Finished,
}

#[derive(Debug, Clone)]
struct BuildPlayback {
    order: Vec<ComponentId>,
    next: usize,
}

/// State machine: `Idle --begin_playback--> Animating --Finished--> Idle`,
/// with `reset` / `enable_all` / scenario change cancelling back to `Idle`
/// from anywhere.
#[derive(Debug, Clone)]
pub struct PlaygroundSession {
    scenario_id: ScenarioId,
    catalog: BTreeSet<ComponentId>,
    recommended: Vec<ComponentId>,
    enabled: BTreeSet<ComponentId>,
    playback: Option<BuildPlayback>,
    active_view: PlaygroundView,
}

impl PlaygroundSession {
    pub fn new(scenario: &PlaygroundScenario) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            catalog: scenario.component_ids().cloned().collect(),
            recommended: scenario.recommended_build_order.clone(),
            enabled: BTreeSet::new(),
            playback: None,
            active_view: PlaygroundView::default(),
        }
    }

    pub fn scenario_id(&self) -> &ScenarioId {
        &self.scenario_id
    }

    pub fn enabled(&self) -> &BTreeSet<ComponentId> {
        &self.enabled
    }

    pub fn is_enabled(&self, id: &ComponentId) -> bool {
        self.enabled.contains(id)
    }

    pub fn is_animating(&self) -> bool {
        self.playback.is_some()
    }

    pub fn active_view(&self) -> PlaygroundView {
        self.active_view
    }

    pub fn set_view(&mut self, view: PlaygroundView) {
        self.active_view = view;
    }

    pub fn cycle_view(&mut self) {
        self.active_view = self.active_view.next();
    }

    /// Flip membership of `id`. Unknown ids are ignored, and toggling is
    /// rejected while a playback is running (the source UI disables the
    /// buttons during the animation).
    pub fn toggle(&mut self, id: &ComponentId) {
        if self.is_animating() || !self.catalog.contains(id) {
            return;
        }
        if !self.enabled.remove(id) {
            self.enabled.insert(id.clone());
        }
    }

    /// Clear everything: empty set, playback cancelled, default view.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.enabled.clear();
        self.playback = None;
        self.active_view = PlaygroundView::default();
    }

    /// Enable exactly the recommended build-order set, not the whole
    /// catalog. Cancels any running playback.
    pub fn enable_all(&mut self) {
        self.playback = None;
        self.enabled = self.recommended.iter().cloned().collect();
    }

    /// Arm the guided playback: clears the set and enters the animating
    /// state. Re-arming while already animating restarts from the beginning.
    pub fn begin_playback(&mut self) {
        self.enabled.clear();
        self.playback = Some(BuildPlayback {
            order: self.recommended.clone(),
            next: 0,
        });
    }

    /// Cancel a running playback without touching the enabled set.
    pub fn cancel_playback(&mut self) {
        self.playback = None;
    }

    /// Apply one playback step. Returns `None` when no playback is armed
    /// (e.g. a stale tick arriving after cancellation).
    pub fn advance_playback(&mut self) -> Option<PlaybackStep> {
        let playback = self.playback.as_mut()?;
        match playback.order.get(playback.next) {
            Some(id) => {
                let id = id.clone();
                playback.next += 1;
                self.enabled.insert(id.clone());
                Some(PlaybackStep::Applied(id))
            }
            None => {
                self.playback = None;
                Some(PlaybackStep::Finished)
            }
        }
    }

    /// Replace the scenario. All state resets; nothing carries over, so a
    /// timer chain belonging to the old scenario can never mutate the new one.
    pub fn set_scenario(&mut self, scenario: &PlaygroundScenario) {
        *self = Self::new(scenario);
    }

    /// Sum of the enabled components' authored token counts.
    pub fn enabled_tokens(&self, scenario: &PlaygroundScenario) -> u32 {
        scenario
            .components
            .iter()
            .filter(|c| self.enabled.contains(&c.id))
            .map(|c| c.tokens)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_content::ContextComponent;
    use dojo_content::PlaygroundResponse;
    use dojo_content::Tint;
    use pretty_assertions::assert_eq;

    fn scenario() -> PlaygroundScenario {
        PlaygroundScenario {
            id: ScenarioId::from("s"),
            customer_message: "m".to_string(),
            input_label: None,
            components: vec![
                ContextComponent::new("sys", "System", "sys", 50, Tint::Cyan, ""),
                ContextComponent::new("tools", "Tools", "tools", 80, Tint::Yellow, ""),
                ContextComponent::new("rag", "Docs", "rag", 120, Tint::Green, ""),
            ],
            responses: vec![PlaygroundResponse::new(&[], 10, "Baseline", "-")],
            // Recommended deliberately excludes `tools`.
            recommended_build_order: vec!["sys".into(), "rag".into()],
            principles: Vec::new(),
        }
    }

    fn ids(session: &PlaygroundSession) -> Vec<&str> {
        session.enabled().iter().map(ComponentId::as_str).collect()
    }

    #[test]
    fn toggle_flips_membership_and_ignores_unknown_ids() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.toggle(&"sys".into());
        assert_eq!(ids(&session), vec!["sys"]);
        session.toggle(&"sys".into());
        assert_eq!(ids(&session), Vec::<&str>::new());
        session.toggle(&"nonsense".into());
        assert_eq!(ids(&session), Vec::<&str>::new());
    }

    #[test]
    fn toggle_is_rejected_while_animating() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.begin_playback();
        session.toggle(&"tools".into());
        assert_eq!(ids(&session), Vec::<&str>::new());
        assert!(session.is_animating());
    }

    #[test]
    fn reset_clears_set_view_and_playback_idempotently() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.toggle(&"sys".into());
        session.set_view(PlaygroundView::Pipeline);
        session.begin_playback();
        session.reset();
        assert_eq!(ids(&session), Vec::<&str>::new());
        assert!(!session.is_animating());
        assert_eq!(session.active_view(), PlaygroundView::Output);
        // Second reset is a no-op.
        session.reset();
        assert!(!session.is_animating());
    }

    #[test]
    fn enable_all_mirrors_the_recommended_set_not_the_catalog() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.enable_all();
        assert_eq!(ids(&session), vec!["rag", "sys"]);
        assert!(!session.is_enabled(&"tools".into()));
    }

    #[test]
    fn playback_applies_build_order_in_order_then_finishes() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.toggle(&"tools".into());
        session.begin_playback();
        // begin_playback clears whatever was enabled.
        assert_eq!(ids(&session), Vec::<&str>::new());

        assert_eq!(
            session.advance_playback(),
            Some(PlaybackStep::Applied("sys".into()))
        );
        assert!(session.is_animating());
        assert_eq!(
            session.advance_playback(),
            Some(PlaybackStep::Applied("rag".into()))
        );
        assert_eq!(session.advance_playback(), Some(PlaybackStep::Finished));
        assert!(!session.is_animating());
        assert_eq!(ids(&session), vec!["rag", "sys"]);
        // Ticks after completion are inert.
        assert_eq!(session.advance_playback(), None);
    }

    #[test]
    fn stale_tick_after_reset_mutates_nothing() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.begin_playback();
        session.reset();
        assert_eq!(session.advance_playback(), None);
        assert_eq!(ids(&session), Vec::<&str>::new());
    }

    #[test]
    fn enable_all_and_begin_playback_cancel_a_running_playback() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.begin_playback();
        let _ = session.advance_playback();
        session.enable_all();
        assert!(!session.is_animating());

        session.begin_playback();
        let _ = session.advance_playback();
        session.begin_playback();
        // Restart begins from the top with a cleared set.
        assert_eq!(ids(&session), Vec::<&str>::new());
        assert_eq!(
            session.advance_playback(),
            Some(PlaybackStep::Applied("sys".into()))
        );
    }

    #[test]
    fn scenario_change_resets_everything() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        session.toggle(&"sys".into());
        session.begin_playback();

        let mut other = scenario();
        other.id = ScenarioId::from("other");
        session.set_scenario(&other);
        assert_eq!(session.scenario_id(), &ScenarioId::from("other"));
        assert_eq!(ids(&session), Vec::<&str>::new());
        assert!(!session.is_animating());
        assert_eq!(session.advance_playback(), None);
    }

    #[test]
    fn enabled_tokens_sums_only_enabled_components() {
        let s = scenario();
        let mut session = PlaygroundSession::new(&s);
        assert_eq!(session.enabled_tokens(&s), 0);
        session.toggle(&"sys".into());
        session.toggle(&"rag".into());
        assert_eq!(session.enabled_tokens(&s), 170);
    }

    #[test]
    fn view_cycle_wraps_in_both_directions() {
        let mut view = PlaygroundView::default();
        for _ in 0..4 {
            view = view.next();
        }
        assert_eq!(view, PlaygroundView::Output);
        assert_eq!(PlaygroundView::Output.prev(), PlaygroundView::Principles);
    }
}
