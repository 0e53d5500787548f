use crate::driver;

use super::{Context, Workspace};

/// Call `calls` names in roster order, starting at the saved cursor.
pub fn run(ctx: &Context, calls: usize) -> Result<(), String> {
    if calls == 0 {
        return Err("--calls must be at least 1".into());
    }
    let mut ws = Workspace::open(ctx)?;
    ws.session.start_sequence().map_err(|e| e.to_string())?;

    // Stop once the last call has been announced; the cursor has moved on by then.
    driver::run_while(&mut ws.session, &mut ws.sink, &ws.clock, |session, sink| {
        session.is_running() && !(sink.selections() >= calls && session.is_between_calls())
    });
    ws.save()
}

pub fn next(ctx: &Context) -> Result<(), String> {
    step(ctx, true)
}

pub fn prev(ctx: &Context) -> Result<(), String> {
    step(ctx, false)
}

fn step(ctx: &Context, forward: bool) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    if ws.session.roster().is_empty() {
        println!("  No students yet.");
        return Ok(());
    }
    if forward {
        ws.session.next();
    } else {
        ws.session.prev();
    }
    ws.flush();
    ws.save()
}
