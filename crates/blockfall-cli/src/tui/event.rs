use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Timer expiry (based on `tick_interval`).
    Tick,
    /// The screen is out of date and must be redrawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
