use serde_json::Value;
use tenantctl_core::{fetch_events, follow_events, EventQuery, FollowOptions, FOLLOW_INTERVAL};
use tracing::warn;

use crate::cli_args::*;
use crate::modules::shared::print_value;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_logs(args: LogsArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let query = EventQuery {
        event_type: args.event_type,
        from: args.from,
        size: args.size,
    };

    if !args.follow {
        let events = fetch_events(ctx.executor, &ctx.session, &query).await?;
        print_value(&events, ctx.output)?;
        return Ok(());
    }

    let options = FollowOptions {
        interval: FOLLOW_INTERVAL,
        max_rounds: None,
    };
    follow_events(ctx.executor, &ctx.session, query, options, print_event_line).await;
    Ok(())
}

/// One compact JSON document per line so followers can pipe into `jq`.
fn print_event_line(event: &Value) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(err) => warn!(error = %err, "failed to serialize event"),
    }
}
