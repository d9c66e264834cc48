//! `!help` — command summary.

use anyhow::Result;
use serenity::all::{Context, Message};

const HELP_TEXT: &str = "\
**Server Startup Bot Commands**
!ssu <server_name> <@host> <@ping> <description> — Announce server startup
!ssd — Shut down the current server session
!ssup <server_name> <time> <@role> <description> — Startup poll with countdown (e.g. 45min, 1d30min)
!ussup <message_id> — Refresh a poll
!config — Show or change bot channels/roles
!help — Show this help
";

pub async fn run(ctx: &Context, msg: &Message) -> Result<()> {
    msg.channel_id.say(&ctx.http, HELP_TEXT).await?;
    Ok(())
}
