use super::{Context, Workspace};

pub fn run(ctx: &Context, duration: Option<u32>) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    match duration {
        Some(seconds) => ws.session.start_timer_with(seconds),
        None => ws.session.start_timer(),
    }
    .map_err(|e| e.to_string())?;
    ws.run_cycle();
    Ok(())
}
