use rc_core::RcResult;
use rc_session::Session;

use super::{Context, Workspace};

pub fn random(ctx: &Context) -> Result<(), String> {
    run(ctx, Session::start_random)
}

pub fn question(ctx: &Context) -> Result<(), String> {
    run(ctx, Session::ask_question)
}

pub fn quick(ctx: &Context, count: Option<usize>) -> Result<(), String> {
    run(ctx, |session| match count {
        Some(count) => session.start_quick_draw_with(count),
        None => session.start_quick_draw(),
    })
}

fn run<F>(ctx: &Context, start: F) -> Result<(), String>
where
    F: FnOnce(&mut Session) -> RcResult<()>,
{
    let mut ws = Workspace::open(ctx)?;
    start(&mut ws.session).map_err(|e| e.to_string())?;
    ws.run_cycle();
    ws.save()
}
