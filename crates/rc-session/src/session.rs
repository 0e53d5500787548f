//! The roll-call session state machine.
//!
//! A [`Session`] owns the roster, the history and the settings, and runs
//! every timed step (suspense frames, staggered reveals, sequence calls,
//! countdown ticks, speech completions) as a task on a virtual-time
//! [`Scheduler`]. Callers drive time with [`Session::advance`] and read the
//! resulting [`SessionEvent`]s with [`Session::drain_events`] or
//! [`Session::flush`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use rc_core::selection::{
    draw_without_replacement, round_robin, sample_with_replacement, single_draw,
};
use rc_core::{CallKind, HistoryLog, Picker, RcResult, RollCallError, Roster};

use crate::command::Command;
use crate::config::{SessionConfig, Settings};
use crate::event::{Frame, SessionEvent};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sink::{Announcer, Completion, PresentationSink, Utterance};
use crate::state::{Mode, PersistedState, SessionState, Status};

/// Suspense frames per draw. The last frame performs the real draw.
pub const SUSPENSE_FRAMES: u32 = 20;
/// Milliseconds between suspense frames.
pub const SUSPENSE_FRAME_MS: u64 = 100;
/// Gap between consecutive quick-draw reveals.
pub const QUICK_STAGGER_MS: u64 = 800;
/// Delay after the last quick-draw reveal before the cycle ends.
pub const QUICK_SETTLE_MS: u64 = 1_000;
/// Countdown tick period.
pub const COUNTDOWN_TICK_MS: u64 = 1_000;

/// Idle stage text.
pub const PLACEHOLDER: &str = "准备开始";
/// Stage text after a sequence pause.
pub const PAUSED_TEXT: &str = "已暂停";
/// Stage text after the countdown stops.
pub const TIMER_DONE_TEXT: &str = "计时结束";
/// Spoken when the countdown reaches zero.
pub const TIME_UP_TEXT: &str = "时间到！";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Draw {
    Single(CallKind),
    Quick(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Cycle {
    Idle,
    Suspense { draw: Draw, frame: u32 },
    Speaking,
    Staggered { picks: Vec<String> },
    Sequence,
    Paused,
    Countdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AfterSpeech {
    FinishCycle,
    AdvanceSequence,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Task {
    SuspenseFrame,
    QuickEntry(usize),
    QuickSettle,
    SequenceNext,
    CountdownTick,
    SpeechDone { epoch: u64, then: AfterSpeech },
}

/// A roll-call session.
pub struct Session {
    roster: Roster,
    history: HistoryLog,
    settings: Settings,
    locale: String,
    mode: Mode,
    running: bool,
    cursor: usize,
    remaining: u32,
    cycle: Cycle,
    // Bumped whenever a cycle starts or is interrupted; speech completions
    // carry the epoch they were issued in.
    epoch: u64,
    pending: Option<TimerHandle>,
    scheduler: Scheduler<Task>,
    picker: Box<dyn Picker>,
    announcer: Box<dyn Announcer>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session with a seeded (or OS-seeded) random picker.
    pub fn new(config: SessionConfig, announcer: Box<dyn Announcer>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_picker(config, announcer, Box::new(rng))
    }

    /// Create a session with an explicit picker.
    pub fn with_picker(
        config: SessionConfig,
        announcer: Box<dyn Announcer>,
        picker: Box<dyn Picker>,
    ) -> Self {
        Self {
            roster: Roster::new(),
            history: HistoryLog::new(),
            settings: Settings::default(),
            locale: config.locale,
            mode: Mode::default(),
            running: false,
            cursor: 0,
            remaining: 0,
            cycle: Cycle::Idle,
            epoch: 0,
            pending: None,
            scheduler: Scheduler::new(),
            picker,
            announcer,
            events: Vec::new(),
        }
    }

    // --- Accessors ---

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The call history, newest first.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings. Changes apply from the next cycle step.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a cycle is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The round-robin cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot of mode, running flag, cursor and countdown.
    pub fn state(&self) -> SessionState {
        SessionState {
            mode: self.mode,
            running: self.running,
            cursor: self.cursor,
            remaining_time: self.remaining,
        }
    }

    /// Coarse lifecycle status.
    pub fn status(&self) -> Status {
        if self.running {
            Status::Running(self.mode)
        } else if self.cycle == Cycle::Paused {
            Status::Paused(self.mode)
        } else {
            Status::Idle
        }
    }

    /// Whether a running sequence is waiting out the interval before its
    /// next call. The previous announcement has finished at this point.
    pub fn is_between_calls(&self) -> bool {
        self.running && self.cycle == Cycle::Sequence && self.pending.is_some()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Due time of the next pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    // --- Time ---

    /// Run every task due within the next `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.advance_to(self.scheduler.now().saturating_add(ms));
    }

    /// Run every task due at or before `time`, then move the clock there.
    pub fn advance_to(&mut self, time: u64) {
        while let Some(task) = self.scheduler.pop_due(time) {
            self.run_task(task);
        }
        self.scheduler.advance_to(time);
    }

    /// Jump to the next pending task and run everything due then.
    /// Returns false when nothing is pending.
    pub fn step(&mut self) -> bool {
        match self.scheduler.next_due() {
            Some(due) => {
                self.advance_to(due);
                true
            }
            None => false,
        }
    }

    /// Step until the current cycle ends or `limit_ms` of virtual time has
    /// passed. Returns the virtual time consumed.
    pub fn run_until_idle(&mut self, limit_ms: u64) -> u64 {
        let start = self.scheduler.now();
        let deadline = start.saturating_add(limit_ms);
        while self.running {
            match self.scheduler.next_due() {
                Some(due) if due <= deadline => self.advance_to(due),
                _ => break,
            }
        }
        self.scheduler.now() - start
    }

    // --- Events ---

    /// Take every pending event.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain pending events into a presentation sink.
    pub fn flush(&mut self, sink: &mut dyn PresentationSink) {
        for event in std::mem::take(&mut self.events) {
            match event {
                SessionEvent::Display(frame) => sink.display(&frame),
                SessionEvent::Announce(text) => sink.announced(&text),
                SessionEvent::Notice(notice) => sink.notify(&notice),
                SessionEvent::HistoryChanged => sink.render_history(&self.history),
                SessionEvent::RosterChanged => sink.render_roster(&self.roster),
                SessionEvent::RunningChanged(running) => sink.running_changed(running),
            }
        }
    }

    // --- Roster and history ---

    /// Replace the roster. Returns the number of names kept after
    /// trimming and deduplication.
    pub fn set_roster<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kept = self.roster.set(names);
        self.after_roster_change();
        debug!(kept, "roster replaced");
        kept
    }

    /// Append names to the roster. Returns the number of new names.
    pub fn add_names<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.roster.add(names);
        self.after_roster_change();
        debug!(added, "roster extended");
        added
    }

    /// Remove every name and weight from the roster.
    pub fn clear_roster(&mut self) {
        self.roster.clear();
        self.after_roster_change();
    }

    /// Remove every history record.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.emit(SessionEvent::HistoryChanged);
    }

    fn after_roster_change(&mut self) {
        if self.cursor >= self.roster.len() {
            self.cursor = 0;
        }
        self.emit(SessionEvent::RosterChanged);
    }

    /// Stop everything, clear roster, weights and history, rewind the cursor.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.pending = None;
        self.epoch += 1;
        self.roster.clear();
        self.history.clear();
        self.cursor = 0;
        self.remaining = 0;
        self.cycle = Cycle::Idle;
        self.set_running(false);
        self.emit(SessionEvent::RosterChanged);
        self.emit(SessionEvent::HistoryChanged);
        self.emit(SessionEvent::Display(Frame::Text(PLACEHOLDER.to_string())));
        info!("session reset");
    }

    // --- Persistence ---

    /// Everything that should survive a restart.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            students: self.roster.names().to_vec(),
            history: self.history.clone(),
            weights: self.roster.weights().clone(),
            settings: self.settings.clone(),
            cursor: self.cursor,
        }
    }

    /// Load persisted state. Pending work is dropped.
    pub fn restore(&mut self, state: PersistedState) {
        self.scheduler.clear();
        self.pending = None;
        self.epoch += 1;
        self.cycle = Cycle::Idle;
        self.running = false;
        self.roster = Roster::from_parts(state.students, state.weights);
        self.history = state.history;
        self.settings = state.settings;
        self.settings.normalize();
        self.cursor = if state.cursor < self.roster.len() {
            state.cursor
        } else {
            0
        };
        debug!(
            students = self.roster.len(),
            history = self.history.len(),
            cursor = self.cursor,
            "state restored"
        );
    }

    // --- Mode control ---

    /// Switch the active mode. Refused while a cycle runs.
    pub fn switch_mode(&mut self, mode: Mode) -> RcResult<()> {
        if self.running {
            return Err(RollCallError::Busy);
        }
        if self.cycle == Cycle::Paused {
            self.cycle = Cycle::Idle;
        }
        self.mode = mode;
        self.emit(SessionEvent::Display(Frame::Text(PLACEHOLDER.to_string())));
        debug!(%mode, "mode switched");
        Ok(())
    }

    /// Start the active mode, or pause it if it is a running sequence or countdown.
    pub fn start(&mut self) -> RcResult<()> {
        match self.mode {
            Mode::Sequence if self.running => self.pause_sequence(),
            Mode::Sequence => self.start_sequence(),
            Mode::Random => self.start_random(),
            Mode::Question => self.ask_question(),
            Mode::Quick => self.start_quick_draw(),
            Mode::Timer if self.running => self.pause_timer(),
            Mode::Timer => self.start_timer(),
        }
    }

    /// Pause whatever can be paused.
    pub fn pause(&mut self) -> RcResult<()> {
        match self.mode {
            Mode::Sequence => self.pause_sequence(),
            Mode::Timer => self.pause_timer(),
            _ if self.running => Err(RollCallError::Busy),
            _ => Err(RollCallError::NotRunning),
        }
    }

    // --- Random and question ---

    /// Draw one random name after the suspense phase.
    pub fn start_random(&mut self) -> RcResult<()> {
        self.start_single(Mode::Random, CallKind::Random)
    }

    /// Draw one random name for a classroom question.
    pub fn ask_question(&mut self) -> RcResult<()> {
        self.start_single(Mode::Question, CallKind::Question)
    }

    fn start_single(&mut self, mode: Mode, kind: CallKind) -> RcResult<()> {
        self.guard_draw()?;
        self.begin_cycle(
            mode,
            Cycle::Suspense {
                draw: Draw::Single(kind),
                frame: 0,
            },
        );
        self.scheduler.schedule(SUSPENSE_FRAME_MS, Task::SuspenseFrame);
        Ok(())
    }

    // --- Quick draw ---

    /// Draw the configured number of distinct names.
    pub fn start_quick_draw(&mut self) -> RcResult<()> {
        let count = self.settings.voice_mode.quick.count;
        self.start_quick_draw_with(count)
    }

    /// Draw `count` distinct names.
    pub fn start_quick_draw_with(&mut self, count: usize) -> RcResult<()> {
        self.guard_draw()?;
        let count = count.max(1);
        if count > self.roster.len() {
            return Err(RollCallError::InsufficientCandidates {
                requested: count,
                available: self.roster.len(),
            });
        }
        self.begin_cycle(
            Mode::Quick,
            Cycle::Suspense {
                draw: Draw::Quick(count),
                frame: 0,
            },
        );
        self.scheduler.schedule(SUSPENSE_FRAME_MS, Task::SuspenseFrame);
        Ok(())
    }

    // --- Sequence ---

    /// Start calling names in roster order from the cursor.
    pub fn start_sequence(&mut self) -> RcResult<()> {
        self.guard_draw()?;
        info!(cursor = self.cursor, "sequence started");
        self.begin_cycle(Mode::Sequence, Cycle::Sequence);
        self.call_sequence_name();
        Ok(())
    }

    /// Pause the running sequence. The cursor stays on the interrupted name.
    pub fn pause_sequence(&mut self) -> RcResult<()> {
        if !(self.running && self.mode == Mode::Sequence) {
            return Err(RollCallError::NotRunning);
        }
        self.epoch += 1;
        self.cancel_pending();
        self.cycle = Cycle::Paused;
        self.set_running(false);
        self.emit(SessionEvent::Display(Frame::Text(PAUSED_TEXT.to_string())));
        info!(cursor = self.cursor, "sequence paused");
        Ok(())
    }

    /// Move the cursor forward and show the name there.
    pub fn next(&mut self) {
        let len = self.roster.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor % len + 1) % len;
        self.show_cursor();
    }

    /// Move the cursor back and show the name there.
    pub fn prev(&mut self) {
        let len = self.roster.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor % len + len - 1) % len;
        self.show_cursor();
    }

    fn show_cursor(&mut self) {
        if let Some(name) = self.roster.get(self.cursor) {
            let frame = Frame::Cursor(name.to_string());
            self.emit(SessionEvent::Display(frame));
        }
    }

    fn call_sequence_name(&mut self) {
        let name = match round_robin(&self.roster, self.cursor) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.abort_cycle(e);
                return;
            }
        };
        self.cursor %= self.roster.len();
        debug!(%name, cursor = self.cursor, "sequence call");
        self.emit(SessionEvent::Display(Frame::Selected(vec![name.clone()])));
        self.record(&name, CallKind::Sequence);
        self.announce(&name, Some(AfterSpeech::AdvanceSequence));
    }

    // --- Countdown ---

    /// Start a countdown of the configured duration.
    pub fn start_timer(&mut self) -> RcResult<()> {
        let seconds = self.settings.voice_mode.timer.duration;
        self.start_timer_with(seconds)
    }

    /// Start a countdown of `seconds`.
    pub fn start_timer_with(&mut self, seconds: u32) -> RcResult<()> {
        if seconds < 1 {
            return Err(RollCallError::InvalidDuration);
        }
        if self.running {
            return Err(RollCallError::Busy);
        }
        self.remaining = seconds;
        info!(seconds, "countdown started");
        self.begin_cycle(Mode::Timer, Cycle::Countdown);
        self.countdown_tick();
        Ok(())
    }

    /// Stop the countdown. It cannot be resumed.
    pub fn pause_timer(&mut self) -> RcResult<()> {
        if !(self.running && self.mode == Mode::Timer) {
            return Err(RollCallError::NotRunning);
        }
        self.stop_countdown();
        Ok(())
    }

    fn countdown_tick(&mut self) {
        if !(self.running && self.cycle == Cycle::Countdown) {
            return;
        }
        let remaining = self.remaining;
        self.emit(SessionEvent::Display(Frame::Countdown(remaining)));
        if remaining == 0 {
            self.announce(TIME_UP_TEXT, None);
            info!("countdown finished");
            self.stop_countdown();
            return;
        }
        if remaining % 60 == 0 {
            self.announce(&format!("{}分钟剩余", remaining / 60), None);
        }
        self.remaining -= 1;
        self.pending = Some(
            self.scheduler
                .schedule(COUNTDOWN_TICK_MS, Task::CountdownTick),
        );
    }

    fn stop_countdown(&mut self) {
        self.epoch += 1;
        self.cancel_pending();
        self.cycle = Cycle::Idle;
        self.set_running(false);
        self.emit(SessionEvent::Display(Frame::Text(TIMER_DONE_TEXT.to_string())));
    }

    // --- Manual call ---

    /// Call a student to the office. Works whether or not a cycle runs.
    pub fn call(&mut self, name: &str) -> RcResult<()> {
        if self.roster.is_empty() {
            return Err(RollCallError::EmptyRoster);
        }
        let name = self.roster.resolve(name)?.to_string();
        let text = format!("请 {name} 到办公室");
        info!(%name, "manual call");
        self.emit(SessionEvent::Display(Frame::Text(text.clone())));
        self.record(&name, CallKind::Manual);
        self.announce(&text, None);
        Ok(())
    }

    // --- Commands ---

    /// Run a parsed command. Failures become notices; `Busy` is dropped
    /// silently. Display-only commands (roster, history, status, help, quit)
    /// are left to the front-end and do nothing here.
    pub fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::StartPause => self.start(),
            Command::Sequence => self.start_sequence(),
            Command::Random => self.start_random(),
            Command::Question => self.ask_question(),
            Command::Quick { count: None } => self.start_quick_draw(),
            Command::Quick { count: Some(n) } => self.start_quick_draw_with(n),
            Command::Timer { seconds: None } => self.start_timer(),
            Command::Timer { seconds: Some(s) } => self.start_timer_with(s),
            Command::Pause => self.pause(),
            Command::Next => {
                self.next();
                Ok(())
            }
            Command::Prev => {
                self.prev();
                Ok(())
            }
            Command::Mode(mode) => self.switch_mode(mode),
            Command::Call { name } => self.call(&name),
            Command::Add { names } => {
                self.add_names(names);
                Ok(())
            }
            Command::ClearRoster => {
                self.clear_roster();
                Ok(())
            }
            Command::ClearHistory => {
                self.clear_history();
                Ok(())
            }
            Command::ToggleSpeech => {
                self.settings.toggle_speech();
                Ok(())
            }
            Command::Rate(rate) => {
                self.settings.set_speech_rate(rate);
                Ok(())
            }
            Command::Interval(seconds) => {
                self.settings.set_sequence_interval(seconds);
                Ok(())
            }
            Command::Count(count) => {
                self.settings.set_quick_count(count);
                Ok(())
            }
            Command::Duration(seconds) => self.settings.set_timer_duration(seconds),
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::Invalid { usage } => {
                self.emit(SessionEvent::Notice(format!("用法: {usage}")));
                Ok(())
            }
            Command::Unknown { input } => {
                self.emit(SessionEvent::Notice(format!("未知命令: {input}")));
                Ok(())
            }
            Command::ShowRoster
            | Command::ShowHistory
            | Command::Status
            | Command::Help
            | Command::Quit => Ok(()),
        };
        match result {
            Ok(()) => {}
            Err(RollCallError::Busy) => debug!("command ignored while busy"),
            Err(e) => self.emit(SessionEvent::Notice(e.to_string())),
        }
    }

    // --- Task handling ---

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SuspenseFrame => self.on_suspense_frame(),
            Task::QuickEntry(index) => self.on_quick_entry(index),
            Task::QuickSettle => {
                if matches!(self.cycle, Cycle::Staggered { .. }) {
                    self.finish_cycle();
                }
            }
            Task::SequenceNext => {
                self.pending = None;
                if self.running && self.cycle == Cycle::Sequence {
                    self.call_sequence_name();
                }
            }
            Task::CountdownTick => {
                self.pending = None;
                self.countdown_tick();
            }
            Task::SpeechDone { epoch, then } => self.on_speech_done(epoch, then),
        }
    }

    fn on_suspense_frame(&mut self) {
        let (draw, frame) = match &self.cycle {
            Cycle::Suspense { draw, frame } => (*draw, *frame + 1),
            _ => return,
        };
        if frame < SUSPENSE_FRAMES {
            let count = match draw {
                Draw::Single(_) => 1,
                Draw::Quick(count) => count,
            };
            match sample_with_replacement(&self.roster, count, &mut *self.picker) {
                Ok(names) => {
                    self.cycle = Cycle::Suspense { draw, frame };
                    self.emit(SessionEvent::Display(Frame::Flash(names)));
                    self.scheduler.schedule(SUSPENSE_FRAME_MS, Task::SuspenseFrame);
                }
                Err(e) => self.abort_cycle(e),
            }
            return;
        }
        match draw {
            Draw::Single(kind) => self.reveal_single(kind),
            Draw::Quick(count) => self.reveal_quick(count),
        }
    }

    fn reveal_single(&mut self, kind: CallKind) {
        let name = match single_draw(&self.roster, &mut *self.picker) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.abort_cycle(e);
                return;
            }
        };
        debug!(%name, %kind, "drew");
        self.emit(SessionEvent::Display(Frame::Selected(vec![name.clone()])));
        self.record(&name, kind);
        self.cycle = Cycle::Speaking;
        self.announce(&name, Some(AfterSpeech::FinishCycle));
    }

    fn reveal_quick(&mut self, count: usize) {
        let picks = match draw_without_replacement(&self.roster, count, &mut *self.picker) {
            Ok(picks) => picks,
            Err(e) => {
                self.abort_cycle(e);
                return;
            }
        };
        debug!(?picks, "quick draw");
        self.emit(SessionEvent::Display(Frame::Selected(picks.clone())));
        for index in 0..picks.len() {
            self.scheduler
                .schedule(index as u64 * QUICK_STAGGER_MS, Task::QuickEntry(index));
        }
        self.cycle = Cycle::Staggered { picks };
    }

    fn on_quick_entry(&mut self, index: usize) {
        let (name, last) = match &self.cycle {
            Cycle::Staggered { picks } => match picks.get(index) {
                Some(name) => (name.clone(), index + 1 == picks.len()),
                None => return,
            },
            _ => return,
        };
        self.record(&name, CallKind::Quick);
        self.announce(&name, None);
        if last {
            self.scheduler.schedule(QUICK_SETTLE_MS, Task::QuickSettle);
        }
    }

    fn on_speech_done(&mut self, epoch: u64, then: AfterSpeech) {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "stale speech completion");
            return;
        }
        match then {
            AfterSpeech::FinishCycle => {
                if self.cycle == Cycle::Speaking {
                    self.finish_cycle();
                }
            }
            AfterSpeech::AdvanceSequence => {
                if !(self.running && self.cycle == Cycle::Sequence) {
                    return;
                }
                let len = self.roster.len();
                self.cursor = if len == 0 { 0 } else { (self.cursor + 1) % len };
                // Settings fields are public; a zero interval would refire at the same instant.
                let interval = self.settings.voice_mode.sequence.interval.clamp(1, 60);
                let delay = u64::from(interval) * 1_000;
                self.pending = Some(self.scheduler.schedule(delay, Task::SequenceNext));
            }
        }
    }

    // --- Helpers ---

    fn guard_draw(&self) -> RcResult<()> {
        if self.roster.is_empty() {
            return Err(RollCallError::EmptyRoster);
        }
        if self.running {
            return Err(RollCallError::Busy);
        }
        Ok(())
    }

    fn begin_cycle(&mut self, mode: Mode, cycle: Cycle) {
        self.mode = mode;
        self.epoch += 1;
        self.cycle = cycle;
        self.set_running(true);
        debug!(%mode, "cycle started");
    }

    fn finish_cycle(&mut self) {
        self.cycle = Cycle::Idle;
        self.set_running(false);
        info!(mode = %self.mode, "cycle finished");
    }

    fn abort_cycle(&mut self, error: RollCallError) {
        warn!(%error, "cycle aborted");
        self.epoch += 1;
        self.cancel_pending();
        self.cycle = Cycle::Idle;
        self.set_running(false);
        self.emit(SessionEvent::Notice(error.to_string()));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            self.emit(SessionEvent::RunningChanged(running));
        }
    }

    fn record(&mut self, name: &str, kind: CallKind) {
        self.history.append(name, kind);
        self.emit(SessionEvent::HistoryChanged);
    }

    fn announce(&mut self, text: &str, then: Option<AfterSpeech>) {
        let completion = if self.settings.speech_enabled {
            self.emit(SessionEvent::Announce(text.to_string()));
            let utterance = Utterance {
                text: text.to_string(),
                rate: self.settings.speech_rate,
                locale: self.locale.clone(),
            };
            match self.announcer.announce(&utterance) {
                Ok(completion) => completion,
                Err(e) => {
                    warn!(error = %e, "speech failed");
                    let notice = RollCallError::SpeechUnavailable(e.to_string());
                    self.emit(SessionEvent::Notice(notice.to_string()));
                    Completion::Done
                }
            }
        } else {
            Completion::Done
        };
        if let Some(then) = then {
            let delay = match completion {
                Completion::Done => 0,
                Completion::After(d) => u64::try_from(d.as_millis()).unwrap_or(u64::MAX),
            };
            let epoch = self.epoch;
            self.scheduler.schedule(delay, Task::SpeechDone { epoch, then });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }
}
