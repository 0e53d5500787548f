//! CLI frontend for Rollcall, a classroom roll-call tool.

mod commands;
mod driver;
mod store;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Context;
use commands::settings::{Change, Switch};
use terminal::SpeechBackend;

#[derive(Parser)]
#[command(
    name = "rollcall",
    about = "Rollcall: classroom roll call with suspense draws, quick draws and a spoken timer",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding students.json, history.json, weights.json and settings.json
    #[arg(long, global = true, default_value = ".rollcall")]
    data_dir: PathBuf,

    /// RNG seed for reproducible draws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Run timed steps immediately instead of in real time
    #[arg(long, global = true)]
    instant: bool,

    /// Speech backend
    #[arg(long, global = true, value_enum, default_value_t = SpeechBackend::Console)]
    speech: SpeechBackend,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the class roster
    Roster {
        #[command(subcommand)]
        action: RosterAction,
    },

    /// Show, clear or export the call history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Draw one random student
    Random,

    /// Draw one random student for a classroom question
    Question,

    /// Draw several distinct students
    Quick {
        /// Number of students (default: the saved quick-draw count)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Call students in roster order from the saved position
    Sequence {
        /// Number of students to call
        #[arg(short, long, default_value = "1")]
        calls: usize,
    },

    /// Move the roster cursor forward and show the student there
    Next,

    /// Move the roster cursor back and show the student there
    Prev,

    /// Run a spoken countdown
    Timer {
        /// Length in seconds (default: the saved timer duration)
        #[arg(short, long)]
        duration: Option<u32>,
    },

    /// Call a student to the office
    Call {
        /// Student name (case-insensitive, typos are suggested)
        name: String,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Delete the roster, weights and history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Interactive roll-call shell
    Shell,
}

#[derive(Subcommand)]
enum RosterAction {
    /// Replace the roster
    Set {
        /// Student names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Append students to the roster
    Add {
        /// Student names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Replace the roster from a file with one name per line
    Import {
        /// Roster file
        file: PathBuf,
    },
    /// List the roster
    Show,
    /// Remove every student
    Clear,
    /// Write the roster as plain text
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past calls, newest first
    Show {
        /// Show at most this many records
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Remove every record
    Clear,
    /// Write the history as CSV
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show every setting
    Show,
    /// Turn speech on or off
    Speech {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Speech rate multiplier (0.1-10)
    Rate { value: f32 },
    /// Seconds between sequence calls (1-60)
    Interval { seconds: u32 },
    /// Students per quick draw (1-10)
    Count { count: usize },
    /// Default countdown length in seconds
    Duration { seconds: u32 },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context {
        data_dir: cli.data_dir,
        seed: cli.seed,
        instant: cli.instant,
        speech: cli.speech,
    };

    let result = match cli.command {
        Commands::Roster { action } => match action {
            RosterAction::Set { names } => commands::roster::set(&ctx, &names),
            RosterAction::Add { names } => commands::roster::add(&ctx, &names),
            RosterAction::Import { file } => commands::roster::import(&ctx, &file),
            RosterAction::Show => commands::roster::show(&ctx),
            RosterAction::Clear => commands::roster::clear(&ctx),
            RosterAction::Export { output } => commands::roster::export(&ctx, output.as_deref()),
        },
        Commands::History { action } => match action {
            HistoryAction::Show { limit } => commands::history::show(&ctx, limit),
            HistoryAction::Clear => commands::history::clear(&ctx),
            HistoryAction::Export { output } => commands::history::export(&ctx, output.as_deref()),
        },
        Commands::Random => commands::draw::random(&ctx),
        Commands::Question => commands::draw::question(&ctx),
        Commands::Quick { count } => commands::draw::quick(&ctx, count),
        Commands::Sequence { calls } => commands::sequence::run(&ctx, calls),
        Commands::Next => commands::sequence::next(&ctx),
        Commands::Prev => commands::sequence::prev(&ctx),
        Commands::Timer { duration } => commands::timer::run(&ctx, duration),
        Commands::Call { name } => commands::call::run(&ctx, &name),
        Commands::Settings { action } => match action {
            None | Some(SettingsAction::Show) => commands::settings::show(&ctx),
            Some(SettingsAction::Speech { state }) => {
                commands::settings::change(&ctx, Change::Speech(state))
            }
            Some(SettingsAction::Rate { value }) => {
                commands::settings::change(&ctx, Change::Rate(value))
            }
            Some(SettingsAction::Interval { seconds }) => {
                commands::settings::change(&ctx, Change::Interval(seconds))
            }
            Some(SettingsAction::Count { count }) => {
                commands::settings::change(&ctx, Change::Count(count))
            }
            Some(SettingsAction::Duration { seconds }) => {
                commands::settings::change(&ctx, Change::Duration(seconds))
            }
        },
        Commands::Reset { yes } => commands::reset::run(&ctx, yes),
        Commands::Shell => commands::shell::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
