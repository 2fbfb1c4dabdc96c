use crossterm::event::KeyEvent;

/// Events processed by the app loop. Terminal input is translated into
/// `Key`; everything else is internal plumbing between widgets, controllers,
/// and the animation timer tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Something changed off the key path (resize, timer mutation); repaint.
    Redraw,

    /// One step of the build-order playback. Carries the generation of the
    /// timer chain that produced it; stale generations are dropped, so a
    /// chain that lost a race with cancellation cannot mutate the session.
    BuildPlaybackTick(u64),

    /// Spawn the typewriter tick chain for the current response text.
    StartTypewriter,

    /// Tear down the typewriter tick chain, if any.
    StopTypewriter,

    /// One typewriter reveal step, generation-tagged like playback ticks.
    TypewriterTick(u64),
}
