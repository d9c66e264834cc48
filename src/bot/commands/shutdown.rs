//! `!ssd` — announce shutdown of the active session.

use anyhow::{Context as _, Result};
use serenity::all::{Context, CreateMessage, Message};
use tracing::info;

use super::{is_authorized, target_channel, NO_PERMISSION};
use crate::bot::embeds::shutdown_embed;
use crate::bot::state::BotState;

pub async fn run(ctx: &Context, msg: &Message, state: &BotState) -> Result<()> {
    let config = state.config.get().await;
    if !is_authorized(&config, msg) {
        msg.channel_id.say(&ctx.http, NO_PERMISSION).await?;
        return Ok(());
    }

    let Some(last) = state.history.load_last().await? else {
        msg.channel_id
            .say(&ctx.http, "No active server session found.")
            .await?;
        return Ok(());
    };

    let channel = target_channel(config.ssd_channel_id, msg.channel_id);
    channel
        .send_message(&ctx.http, CreateMessage::new().embed(shutdown_embed(&last)))
        .await
        .context("failed to post shutdown announcement")?;

    // The server is going down; any countdown still ticking toward a
    // startup poll is stale now.
    let cancelled = state.polls.cancel_all().await;
    if cancelled > 0 {
        info!(cancelled, "Cancelled outstanding startup polls");
    }

    state.history.clear_last().await?;
    info!(server = %last.server_name, "Server shutdown announced");
    Ok(())
}
