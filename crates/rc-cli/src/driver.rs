//! Maps session virtual time onto the wall clock.

use std::thread;
use std::time::{Duration, Instant};

use rc_session::Session;

use crate::terminal::TerminalSink;

/// Wall-clock anchor for a session. In instant mode nothing ever sleeps.
pub struct Clock {
    instant: bool,
    started: Instant,
    base: u64,
}

impl Clock {
    pub fn new(session: &Session, instant: bool) -> Self {
        Self {
            instant,
            started: Instant::now(),
            base: session.now(),
        }
    }

    pub fn is_instant(&self) -> bool {
        self.instant
    }

    /// Virtual time corresponding to now.
    pub fn now(&self) -> u64 {
        let elapsed = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.base.saturating_add(elapsed)
    }

    /// Wall time left until virtual time `due`.
    pub fn until(&self, due: u64) -> Duration {
        if self.instant {
            return Duration::ZERO;
        }
        Duration::from_millis(due.saturating_sub(self.now()))
    }

    fn wait_for(&self, due: u64) {
        let wait = self.until(due);
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

/// Run due tasks, sleeping between them, while `keep_going` holds.
pub fn run_while<F>(
    session: &mut Session,
    sink: &mut TerminalSink,
    clock: &Clock,
    mut keep_going: F,
) where
    F: FnMut(&Session, &TerminalSink) -> bool,
{
    session.flush(sink);
    while keep_going(session, sink) {
        let Some(due) = session.next_due() else {
            break;
        };
        clock.wait_for(due);
        session.advance_to(due);
        session.flush(sink);
    }
    sink.settle();
}

/// Run until the current cycle ends.
pub fn run_cycle(session: &mut Session, sink: &mut TerminalSink, clock: &Clock) {
    run_while(session, sink, clock, |s, _| s.is_running());
}

/// Run until the cycle ends or a sequence is waiting out its interval.
pub fn run_to_rest(session: &mut Session, sink: &mut TerminalSink, clock: &Clock) {
    run_while(session, sink, clock, |s, _| s.is_running() && !s.is_between_calls());
}
