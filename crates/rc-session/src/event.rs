//! Events the session emits for its presentation layer.

/// What the stage should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Suspense animation frame. These names are not selections.
    Flash(Vec<String>),
    /// The selected name(s) of a cycle.
    Selected(Vec<String>),
    /// The name under the cursor after a manual step.
    Cursor(String),
    /// Free text such as the idle placeholder or the pause notice.
    Text(String),
    /// Seconds left on the countdown.
    Countdown(u32),
}

/// One observable effect of a session operation or task.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Update the stage.
    Display(Frame),
    /// Text was handed to the speech engine.
    Announce(String),
    /// A user-facing notice, usually an error message.
    Notice(String),
    /// The history was appended to or cleared.
    HistoryChanged,
    /// The roster was replaced, extended or cleared.
    RosterChanged,
    /// A cycle started (`true`) or finished (`false`).
    RunningChanged(bool),
}

impl SessionEvent {
    /// The frame, if this is a display event.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            SessionEvent::Display(frame) => Some(frame),
            _ => None,
        }
    }
}
