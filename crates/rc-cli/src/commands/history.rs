use std::path::Path;

use chrono::Local;
use comfy_table::{ContentArrangement, Table};

use rc_core::HistoryLog;
use rc_core::export::{history_csv, record_time};

use super::roster::write_or_print;
use super::{Context, Workspace};

pub fn show(ctx: &Context, limit: Option<usize>) -> Result<(), String> {
    let ws = Workspace::open(ctx)?;
    print_table(ws.session.history(), limit);
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    ws.session.clear_history();
    ws.save()?;
    println!("  History cleared");
    Ok(())
}

pub fn export(ctx: &Context, output: Option<&Path>) -> Result<(), String> {
    let ws = Workspace::open(ctx)?;
    write_or_print(&history_csv(ws.session.history()), output)
}

/// Print the newest `limit` records (all when `None`).
pub fn print_table(history: &HistoryLog, limit: Option<usize>) {
    if history.is_empty() {
        println!("  No history yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Name", "Mode"]);

    let shown = limit.unwrap_or(history.len());
    for record in history.iter().take(shown) {
        table.add_row(vec![
            record_time(record, &Local),
            record.name.clone(),
            record.mode.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} records", history.len());
}
