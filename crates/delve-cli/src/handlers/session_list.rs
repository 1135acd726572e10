use crate::args::ListOrder;
use crate::context::ExecutionContext;
use crate::presentation::views::session::sessions_table;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, limit: Option<usize>, order: ListOrder) -> Result<()> {
    let manager = ctx.open_manager()?;
    let limit = limit.unwrap_or(ctx.config.list_limit);
    let sessions = manager
        .database()
        .list_sessions_ordered(order.into(), limit)?;

    if ctx.renderer.is_json() {
        return ctx.renderer.print_json(&sessions);
    }

    print!("{}", sessions_table(&sessions, &ctx.renderer));
    Ok(())
}
