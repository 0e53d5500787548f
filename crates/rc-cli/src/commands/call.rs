use super::{Context, Workspace};

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let mut ws = Workspace::open(ctx)?;
    ws.session.call(name).map_err(|e| e.to_string())?;
    ws.flush();
    ws.save()
}
