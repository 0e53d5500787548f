//! Outbound interfaces: what the session shows and what it says.

use std::time::Duration;

use rc_core::{HistoryLog, Roster};

use crate::event::Frame;

/// Error raised by a speech engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct SpeechError(pub String);

/// One thing to say.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Rate multiplier (1.0 = normal).
    pub rate: f32,
    /// Locale tag, e.g. `zh-CN`.
    pub locale: String,
}

/// When an announcement is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// Already finished (or nothing was spoken).
    #[default]
    Done,
    /// Finishes after the given duration of virtual time.
    After(Duration),
}

/// A speech engine.
///
/// The session never observes completion inline: it schedules the completion
/// as a task, so a cycle always returns to the event loop before it ends.
pub trait Announcer {
    /// Speak an utterance and report when it will be finished.
    fn announce(&mut self, utterance: &Utterance) -> Result<Completion, SpeechError>;
}

/// An announcer that says nothing and finishes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _utterance: &Utterance) -> Result<Completion, SpeechError> {
        Ok(Completion::Done)
    }
}

/// The rendering side of the session.
///
/// [`crate::Session::flush`] drains pending events into an implementation.
pub trait PresentationSink {
    /// Show a frame on the stage.
    fn display(&mut self, frame: &Frame);

    /// Show a transient notice.
    fn notify(&mut self, notice: &str);

    /// The history changed.
    fn render_history(&mut self, history: &HistoryLog);

    /// Text was handed to the speech engine.
    fn announced(&mut self, _text: &str) {}

    /// The roster changed.
    fn render_roster(&mut self, _roster: &Roster) {}

    /// A cycle started or finished.
    fn running_changed(&mut self, _running: bool) {}
}
