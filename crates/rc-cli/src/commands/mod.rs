pub mod call;
pub mod draw;
pub mod history;
pub mod reset;
pub mod roster;
pub mod sequence;
pub mod settings;
pub mod shell;
pub mod timer;

use std::env;
use std::path::PathBuf;

use rc_session::{Session, SessionConfig, locale_for};

use crate::driver::{self, Clock};
use crate::store::Store;
use crate::terminal::{SpeechBackend, TerminalSink, announcer_for};

/// Global options shared by every subcommand.
pub struct Context {
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub instant: bool,
    pub speech: SpeechBackend,
}

/// A loaded session plus everything needed to render, drive and save it.
pub struct Workspace {
    pub session: Session,
    pub sink: TerminalSink,
    pub clock: Clock,
    store: Store,
}

impl Workspace {
    /// Load the data directory into a fresh session.
    pub fn open(ctx: &Context) -> Result<Self, String> {
        let store = Store::new(&ctx.data_dir);
        let state = store.load().map_err(|e| e.to_string())?;

        let mut config = SessionConfig::default().with_locale(system_locale());
        if let Some(seed) = ctx.seed {
            config = config.with_seed(seed);
        }
        let mut session = Session::new(config, announcer_for(ctx.speech));
        session.restore(state);

        let sink = TerminalSink::new(ctx.speech != SpeechBackend::Off, !ctx.instant);
        let clock = Clock::new(&session, ctx.instant);
        Ok(Self {
            session,
            sink,
            clock,
            store,
        })
    }

    /// Write the session back to the data directory.
    pub fn save(&self) -> Result<(), String> {
        self.store
            .save(&self.session.snapshot())
            .map_err(|e| e.to_string())
    }

    /// Print pending events.
    pub fn flush(&mut self) {
        self.session.flush(&mut self.sink);
        self.sink.settle();
    }

    /// Drive the current cycle to its end.
    pub fn run_cycle(&mut self) {
        driver::run_cycle(&mut self.session, &mut self.sink, &self.clock);
    }
}

fn system_locale() -> &'static str {
    let lang = env::var("LC_ALL")
        .or_else(|_| env::var("LANG"))
        .unwrap_or_default();
    locale_for(&lang)
}
