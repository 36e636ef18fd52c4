use std::fmt;

/// Lifecycle of a pull-to-refresh surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PullState {
    #[default]
    Idle,
    /// A pull is being dragged, or was released with the auto-cancel timer
    /// still pending.
    Tracking,
    /// The pull passed the trigger distance; transient on the way to
    /// `Refreshing`.
    Triggered,
    Refreshing,
    /// Offset and percentage are animating back to rest.
    Returning,
}

impl PullState {
    /// Whether a `Down` in this state may begin a new pull.
    pub fn accepts_pull(self) -> bool {
        matches!(self, PullState::Idle | PullState::Tracking)
    }
}

impl fmt::Display for PullState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PullState::Idle => "idle",
            PullState::Tracking => "tracking",
            PullState::Triggered => "triggered",
            PullState::Refreshing => "refreshing",
            PullState::Returning => "returning",
        };
        f.write_str(name)
    }
}
