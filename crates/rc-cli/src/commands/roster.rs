use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use rc_core::export::roster_text;
use rc_core::{HistoryLog, Roster};

use super::{Context, Workspace};
use crate::store::read_names;

pub fn set(ctx: &Context, names: &[String]) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    let kept = ws.session.set_roster(names);
    ws.save()?;
    println!("  Saved {kept} students");
    Ok(())
}

pub fn add(ctx: &Context, names: &[String]) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    let added = ws.session.add_names(names);
    ws.save()?;
    println!(
        "  Added {added} students ({} total)",
        ws.session.roster().len()
    );
    Ok(())
}

pub fn import(ctx: &Context, file: &Path) -> Result<(), String> {
    let names = read_names(file).map_err(|e| e.to_string())?;
    let mut ws = Workspace::open(ctx)?;
    let kept = ws.session.set_roster(&names);
    ws.save()?;
    println!("  Imported {kept} students from {}", file.display());
    Ok(())
}

pub fn show(ctx: &Context) -> Result<(), String> {
    let ws = Workspace::open(ctx)?;
    print_table(ws.session.roster(), ws.session.history());
    Ok(())
}

pub fn clear(ctx: &Context) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    ws.session.clear_roster();
    ws.save()?;
    println!("  Roster cleared");
    Ok(())
}

pub fn export(ctx: &Context, output: Option<&Path>) -> Result<(), String> {
    let ws = Workspace::open(ctx)?;
    let content = roster_text(ws.session.roster());
    write_or_print(&content, output)
}

/// Print the roster with weights and call counts.
pub fn print_table(roster: &Roster, history: &HistoryLog) {
    if roster.is_empty() {
        println!("  No students yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Weight", "Called"]);

    for (i, name) in roster.names().iter().enumerate() {
        let weight = roster
            .weight(name)
            .map_or_else(|| "—".to_string(), |w| w.to_string());
        table.add_row(vec![
            (i + 1).to_string(),
            name.clone(),
            weight,
            history.count_for(name).to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} students", roster.len());
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), String> {
    if let Some(path) = output {
        std::fs::write(path, content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else if content.ends_with('\n') {
        print!("{content}");
    } else {
        println!("{content}");
    }
    Ok(())
}
