//! Text commands for interactive front-ends.
//!
//! One line of input maps to one [`Command`]. An empty line is the
//! start/pause shortcut, mirroring the space bar of a keyboard front-end.

use crate::state::Mode;

/// A parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the active mode, or pause it if it is a running sequence or countdown.
    StartPause,
    /// Start a sequence run.
    Sequence,
    /// Draw one random name.
    Random,
    /// Draw one random name for a classroom question.
    Question,
    /// Draw several distinct names.
    Quick {
        /// Override the configured count for this draw.
        count: Option<usize>,
    },
    /// Start a countdown.
    Timer {
        /// Override the configured duration for this countdown.
        seconds: Option<u32>,
    },
    /// Pause the running sequence or countdown.
    Pause,
    /// Move the cursor forward and show the name.
    Next,
    /// Move the cursor back and show the name.
    Prev,
    /// Switch the active mode.
    Mode(Mode),
    /// Call a named student to the office.
    Call {
        /// Name as typed.
        name: String,
    },
    /// Add names to the roster.
    Add {
        /// Names to add.
        names: Vec<String>,
    },
    /// Remove every name from the roster.
    ClearRoster,
    /// Remove every history record.
    ClearHistory,
    /// Turn speech on or off.
    ToggleSpeech,
    /// Set the speech rate.
    Rate(f32),
    /// Set the sequence interval in seconds.
    Interval(u32),
    /// Set the quick-draw count.
    Count(usize),
    /// Set the countdown duration in seconds.
    Duration(u32),
    /// Stop everything and clear roster and history.
    Reset,
    /// Show the roster.
    ShowRoster,
    /// Show the history.
    ShowHistory,
    /// Show mode, status and settings.
    Status,
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
    /// A known verb with a missing or malformed argument.
    Invalid {
        /// Correct usage for the verb.
        usage: &'static str,
    },
    /// Unrecognised input.
    Unknown {
        /// The original input.
        input: String,
    },
}

const START_VERBS: &[&str] = &["start", "s", "go", "开始"];
const SEQUENCE_VERBS: &[&str] = &["sequence", "seq"];
const RANDOM_VERBS: &[&str] = &["random", "r", "随机"];
const QUESTION_VERBS: &[&str] = &["question", "ask", "提问"];
const QUICK_VERBS: &[&str] = &["quick", "batch", "b", "连抽"];
const TIMER_VERBS: &[&str] = &["timer", "t", "计时"];
const PAUSE_VERBS: &[&str] = &["pause", "stop", "暂停"];
const NEXT_VERBS: &[&str] = &["next", "n"];
const PREV_VERBS: &[&str] = &["prev", "p", "previous"];
const MODE_VERBS: &[&str] = &["mode", "m"];
const CALL_VERBS: &[&str] = &["call", "叫号"];
const ADD_VERBS: &[&str] = &["add"];
const ROSTER_VERBS: &[&str] = &["roster", "list", "ls", "名单"];
const HISTORY_VERBS: &[&str] = &["history", "h", "记录"];
const CLEAR_VERBS: &[&str] = &["clear", "c"];
const VOICE_VERBS: &[&str] = &["voice", "v", "speech"];
const HELP_VERBS: &[&str] = &["help", "?"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Parse one line of input.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::StartPause;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let verb = verb.as_str();
    let rest = words.get(1..).unwrap_or(&[]);

    if START_VERBS.contains(&verb) {
        return Command::StartPause;
    }
    if SEQUENCE_VERBS.contains(&verb) {
        return Command::Sequence;
    }
    if RANDOM_VERBS.contains(&verb) {
        return Command::Random;
    }
    if QUESTION_VERBS.contains(&verb) {
        return Command::Question;
    }
    if QUICK_VERBS.contains(&verb) {
        return match optional_arg(rest) {
            Ok(count) => Command::Quick { count },
            Err(()) => Command::Invalid {
                usage: "quick [count]",
            },
        };
    }
    if TIMER_VERBS.contains(&verb) {
        return match optional_arg(rest) {
            Ok(seconds) => Command::Timer { seconds },
            Err(()) => Command::Invalid {
                usage: "timer [seconds]",
            },
        };
    }
    if PAUSE_VERBS.contains(&verb) {
        return Command::Pause;
    }
    if NEXT_VERBS.contains(&verb) {
        return Command::Next;
    }
    if PREV_VERBS.contains(&verb) {
        return Command::Prev;
    }
    if MODE_VERBS.contains(&verb) {
        return match rest.first().and_then(|m| m.parse::<Mode>().ok()) {
            Some(mode) => Command::Mode(mode),
            None => Command::Invalid {
                usage: "mode <sequence|random|quick|question|timer>",
            },
        };
    }
    if CALL_VERBS.contains(&verb) {
        if rest.is_empty() {
            return Command::Invalid {
                usage: "call <name>",
            };
        }
        return Command::Call {
            name: rest.join(" "),
        };
    }
    if ADD_VERBS.contains(&verb) {
        if rest.is_empty() {
            return Command::Invalid {
                usage: "add <name>...",
            };
        }
        return Command::Add {
            names: rest.iter().map(|s| s.to_string()).collect(),
        };
    }
    if ROSTER_VERBS.contains(&verb) {
        return Command::ShowRoster;
    }
    if HISTORY_VERBS.contains(&verb) {
        return Command::ShowHistory;
    }
    if CLEAR_VERBS.contains(&verb) {
        return match rest.first().map(|w| w.to_lowercase()).as_deref() {
            None | Some("history") => Command::ClearHistory,
            Some("roster") => Command::ClearRoster,
            Some(_) => Command::Invalid {
                usage: "clear [history|roster]",
            },
        };
    }
    if VOICE_VERBS.contains(&verb) {
        return Command::ToggleSpeech;
    }
    if verb == "rate" {
        return required_arg(rest)
            .map(Command::Rate)
            .unwrap_or(Command::Invalid { usage: "rate <0.1-10>" });
    }
    if verb == "interval" {
        return required_arg(rest)
            .map(Command::Interval)
            .unwrap_or(Command::Invalid {
                usage: "interval <seconds>",
            });
    }
    if verb == "count" {
        return required_arg(rest)
            .map(Command::Count)
            .unwrap_or(Command::Invalid { usage: "count <1-10>" });
    }
    if verb == "duration" {
        return required_arg(rest)
            .map(Command::Duration)
            .unwrap_or(Command::Invalid {
                usage: "duration <seconds>",
            });
    }
    if verb == "reset" {
        return Command::Reset;
    }
    if verb == "status" {
        return Command::Status;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::Quit;
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn optional_arg<T: std::str::FromStr>(rest: &[&str]) -> Result<Option<T>, ()> {
    match rest.first() {
        None => Ok(None),
        Some(word) => word.parse().map(Some).map_err(|_| ()),
    }
}

fn required_arg<T: std::str::FromStr>(rest: &[&str]) -> Option<T> {
    rest.first().and_then(|w| w.parse().ok())
}

/// One-line usage summary for each command, for help output.
pub const HELP_LINES: &[(&str, &str)] = &[
    ("<enter> | start", "start or pause the current mode"),
    ("sequence", "start calling names in order"),
    ("random | r", "draw one random name"),
    ("question | ask", "draw one name for a question"),
    ("quick [n] | b", "draw n distinct names"),
    ("timer [secs] | t", "start a countdown"),
    ("pause", "pause the sequence or countdown"),
    ("next | prev", "move the cursor"),
    ("mode <name>", "switch mode"),
    ("call <name>", "call a student to the office"),
    ("add <name>...", "add names to the roster"),
    ("roster | history", "show the roster or history"),
    ("clear [history|roster]", "clear history (default) or roster"),
    ("voice | v", "toggle speech"),
    ("rate | interval | count | duration <n>", "change a setting"),
    ("status", "show mode and settings"),
    ("reset", "stop and clear everything"),
    ("quit", "leave"),
];
