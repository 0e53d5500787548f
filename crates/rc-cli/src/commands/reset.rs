use super::{Context, Workspace};

pub fn run(ctx: &Context, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("reset deletes the roster, weights and history; pass --yes to confirm".into());
    }
    let mut ws = Workspace::open(ctx)?;
    ws.session.reset();
    ws.save()?;
    println!("  All data reset");
    Ok(())
}
