//! Selection-and-presentation state machine for Rollcall.
//!
//! A [`Session`] composes the roster, history and selection policies from
//! `rc-core` with a virtual-time scheduler, an injectable speech
//! [`Announcer`] and a typed event stream for whatever renders the stage.

/// Text command language for interactive front-ends.
pub mod command;
/// Session configuration and persisted settings.
pub mod config;
/// Events emitted by the session.
pub mod event;
/// Virtual-time task queue with cancellable handles.
pub mod scheduler;
/// The session state machine.
pub mod session;
/// Speech and presentation interfaces.
pub mod sink;
/// Modes, status and persisted state.
pub mod state;

/// Re-export command types.
pub use command::{Command, parse_command};
/// Re-export configuration types.
pub use config::{SessionConfig, Settings, VoiceModeConfig, locale_for};
/// Re-export event types.
pub use event::{Frame, SessionEvent};
/// Re-export scheduler types.
pub use scheduler::{Scheduler, TimerHandle};
/// Re-export the session.
pub use session::Session;
/// Re-export interface types.
pub use sink::{Announcer, Completion, PresentationSink, SilentAnnouncer, SpeechError, Utterance};
/// Re-export state types.
pub use state::{Mode, PersistedState, SessionState, Status};
