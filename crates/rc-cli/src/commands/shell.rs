use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use colored::Colorize;

use rc_session::command::HELP_LINES;
use rc_session::{Command, Mode, parse_command};

use super::{Context, Workspace, history, roster, settings};
use crate::driver;

// Upper bound on a blocking wait when nothing is scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

pub fn run(ctx: &Context) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;

    println!("  {} Rollcall", "Starting".bold());
    println!(
        "  {} students | mode: {}",
        ws.session.roster().len(),
        ws.session.mode().label()
    );
    println!("  Press Enter to start/pause, 'help' for commands, 'quit' to exit.\n");

    // Stdin is read on its own thread so timed steps keep running while we wait.
    let (tx, rx) = mpsc::channel::<io::Result<String>>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    prompt()?;
    loop {
        // In instant mode every cycle has already run to rest; a sequence
        // waits for input at its first interval.
        let wait = match ws.session.next_due() {
            Some(due) if !ws.clock.is_instant() => ws.clock.until(due),
            _ => IDLE_WAIT,
        };

        match rx.recv_timeout(wait) {
            Ok(Ok(line)) => {
                catch_up(&mut ws);
                if !handle_line(&mut ws, &line) {
                    break;
                }
                if ws.clock.is_instant() {
                    driver::run_to_rest(&mut ws.session, &mut ws.sink, &ws.clock);
                }
                save(&ws);
                prompt()?;
            }
            Ok(Err(e)) => return Err(e.to_string()),
            Err(RecvTimeoutError::Timeout) => {
                let was_running = ws.session.is_running();
                catch_up(&mut ws);
                if was_running && !ws.session.is_running() {
                    save(&ws);
                    prompt()?;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // End of input: let a draw in flight finish, leave a sequence where it is.
                driver::run_to_rest(&mut ws.session, &mut ws.sink, &ws.clock);
                break;
            }
        }
    }

    ws.sink.settle();
    ws.save()
}

/// Run everything that came due while we were waiting.
fn catch_up(ws: &mut Workspace) {
    if !ws.clock.is_instant() {
        ws.session.advance_to(ws.clock.now());
    }
    ws.session.flush(&mut ws.sink);
}

/// Handle one input line. Returns false to leave the shell.
fn handle_line(ws: &mut Workspace, line: &str) -> bool {
    match parse_command(line) {
        Command::Quit => return false,
        Command::Help => print_help(),
        Command::ShowRoster => roster::print_table(ws.session.roster(), ws.session.history()),
        Command::ShowHistory => history::print_table(ws.session.history(), Some(20)),
        Command::Status => settings::print_status(&ws.session),
        command => ws.session.dispatch(command),
    }
    ws.flush();
    true
}

fn save(ws: &Workspace) {
    if let Err(e) = ws.save() {
        println!("  {}", e.yellow());
    }
}

fn prompt() -> Result<(), String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())
}

fn print_help() {
    println!();
    for (usage, what) in HELP_LINES {
        println!("  {} {what}", format!("{usage:<40}").bold());
    }
    let modes: Vec<String> = Mode::ALL
        .iter()
        .map(|mode| format!("{mode} ({})", mode.label()))
        .collect();
    println!("\n  modes: {}", modes.join(", "));
    println!();
}
