use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table};

use rc_session::Session;

use super::{Context, Workspace};

/// On/off switch for boolean settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

/// A settings change.
pub enum Change {
    Speech(Switch),
    Rate(f32),
    Interval(u32),
    Count(usize),
    Duration(u32),
}

pub fn show(ctx: &Context) -> Result<(), String> {
    let ws = Workspace::open(ctx)?;
    print_status(&ws.session);
    Ok(())
}

pub fn change(ctx: &Context, change: Change) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    let settings = ws.session.settings_mut();
    let message = match change {
        Change::Speech(switch) => {
            settings.speech_enabled = switch == Switch::On;
            format!("Speech {}", on_off(settings.speech_enabled))
        }
        Change::Rate(rate) => {
            settings.set_speech_rate(rate);
            format!("Speech rate set to {}", settings.speech_rate)
        }
        Change::Interval(seconds) => {
            settings.set_sequence_interval(seconds);
            format!(
                "Sequence interval set to {}s",
                settings.voice_mode.sequence.interval
            )
        }
        Change::Count(count) => {
            settings.set_quick_count(count);
            format!("Quick-draw count set to {}", settings.voice_mode.quick.count)
        }
        Change::Duration(seconds) => {
            settings
                .set_timer_duration(seconds)
                .map_err(|e| e.to_string())?;
            format!("Timer duration set to {seconds}s")
        }
    };
    ws.save()?;
    println!("  {message}");
    Ok(())
}

/// Print mode, status and every setting.
pub fn print_status(session: &Session) {
    let settings = session.settings();
    let voice = &settings.voice_mode;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![
        "Mode".to_string(),
        format!("{} ({})", session.mode().label(), session.mode()),
    ]);
    table.add_row(vec!["Status".to_string(), session.status().to_string()]);
    table.add_row(vec!["Students".to_string(), session.roster().len().to_string()]);
    table.add_row(vec!["Cursor".to_string(), session.cursor().to_string()]);
    table.add_row(vec!["Speech".to_string(), on_off(settings.speech_enabled).to_string()]);
    table.add_row(vec!["Speech rate".to_string(), settings.speech_rate.to_string()]);
    table.add_row(vec![
        "Sequence interval".to_string(),
        format!("{}s", voice.sequence.interval),
    ]);
    table.add_row(vec!["Quick-draw count".to_string(), voice.quick.count.to_string()]);
    table.add_row(vec![
        "Timer duration".to_string(),
        format!("{}s", voice.timer.duration),
    ]);
    println!("{table}");
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
