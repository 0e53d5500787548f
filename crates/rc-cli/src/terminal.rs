//! Terminal rendering and speech backends.

use std::fmt::Display;
use std::io::{self, Write};
use std::process::Command;
use std::time::Duration;

use clap::ValueEnum;
use colored::Colorize;

use rc_core::HistoryLog;
use rc_session::{
    Announcer, Completion, Frame, PresentationSink, SilentAnnouncer, SpeechError, Utterance,
};

/// Where announcements go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeechBackend {
    /// Print announcements to the terminal
    Console,
    /// Speak through espeak
    Espeak,
    /// Speak through macOS `say`
    Say,
    /// Stay silent
    Off,
}

pub fn announcer_for(backend: SpeechBackend) -> Box<dyn Announcer> {
    match backend {
        SpeechBackend::Console => Box::new(ConsoleAnnouncer),
        SpeechBackend::Espeak => Box::new(ProcessAnnouncer::Espeak),
        SpeechBackend::Say => Box::new(ProcessAnnouncer::Say),
        SpeechBackend::Off => Box::new(SilentAnnouncer),
    }
}

const MS_PER_CHAR: f64 = 250.0;
const MIN_SPEECH_MS: u64 = 600;

/// Paces completions at roughly speaking speed. The words themselves are
/// printed by [`TerminalSink`].
pub struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&mut self, utterance: &Utterance) -> Result<Completion, SpeechError> {
        Ok(Completion::After(speaking_time(utterance)))
    }
}

fn speaking_time(utterance: &Utterance) -> Duration {
    let chars = utterance.text.chars().count() as f64;
    let ms = chars * MS_PER_CHAR / f64::from(utterance.rate.max(0.1));
    Duration::from_millis((ms as u64).max(MIN_SPEECH_MS))
}

/// Speaks through an external text-to-speech program. Blocks until the
/// program exits, so completion is immediate.
pub enum ProcessAnnouncer {
    Espeak,
    Say,
}

impl ProcessAnnouncer {
    fn command(&self, utterance: &Utterance) -> Command {
        // Both programs take words per minute; 175 is their default.
        let wpm = ((175.0 * utterance.rate) as u32).max(1).to_string();
        match self {
            ProcessAnnouncer::Espeak => {
                let voice = if utterance.locale.starts_with("zh") {
                    "zh"
                } else {
                    "en"
                };
                let mut cmd = Command::new("espeak");
                cmd.args(["-s", wpm.as_str(), "-v", voice, utterance.text.as_str()]);
                cmd
            }
            ProcessAnnouncer::Say => {
                let mut cmd = Command::new("say");
                cmd.args(["-r", wpm.as_str(), utterance.text.as_str()]);
                cmd
            }
        }
    }
}

impl Announcer for ProcessAnnouncer {
    fn announce(&mut self, utterance: &Utterance) -> Result<Completion, SpeechError> {
        let mut cmd = self.command(utterance);
        let program = cmd.get_program().to_string_lossy().into_owned();
        let output = cmd
            .output()
            .map_err(|e| SpeechError(format!("{program}: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError(format!("{program}: {}", stderr.trim())));
        }
        Ok(Completion::Done)
    }
}

/// Renders session events as terminal lines.
pub struct TerminalSink {
    echo_speech: bool,
    animate: bool,
    inline: bool,
    selections: usize,
}

impl TerminalSink {
    /// `echo_speech` prints a line per announcement; `animate` shows
    /// suspense frames.
    pub fn new(echo_speech: bool, animate: bool) -> Self {
        Self {
            echo_speech,
            animate,
            inline: false,
            selections: 0,
        }
    }

    /// Number of selection reveals shown so far.
    pub fn selections(&self) -> usize {
        self.selections
    }

    /// End any in-place line so the next output starts fresh.
    pub fn settle(&mut self) {
        if self.inline {
            println!();
            self.inline = false;
        }
    }

    fn line(&mut self, text: impl Display) {
        self.settle();
        println!("  {text}");
    }

    fn overwrite(&mut self, text: impl Display) {
        print!("\r  {text}    ");
        let _ = io::stdout().flush();
        self.inline = true;
    }
}

impl PresentationSink for TerminalSink {
    fn display(&mut self, frame: &Frame) {
        match frame {
            Frame::Flash(names) => {
                if self.animate {
                    self.overwrite(names.join("  ").dimmed());
                }
            }
            Frame::Selected(names) => {
                self.selections += 1;
                if self.inline {
                    // Overwrite the last suspense frame.
                    print!("\r");
                    self.inline = false;
                }
                println!("  {}", names.join("  ").bold().green());
            }
            Frame::Cursor(name) => self.line(format!("→ {}", name.cyan())),
            Frame::Text(text) => self.line(text),
            Frame::Countdown(seconds) => self.overwrite(format_clock(*seconds).bold()),
        }
    }

    fn notify(&mut self, notice: &str) {
        self.line(notice.yellow());
    }

    // History is printed on demand by `history show`.
    fn render_history(&mut self, _history: &HistoryLog) {}

    fn announced(&mut self, text: &str) {
        if self.echo_speech {
            self.line(format!("🔊 {text}"));
        }
    }
}

/// `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
