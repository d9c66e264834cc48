//! `!ssu` — announce and log a server startup.

use anyhow::{Context as _, Result};
use serenity::all::{Context, CreateMessage, Message};
use tracing::info;

use super::{is_authorized, target_channel, NO_PERMISSION};
use crate::bot::args::split_args;
use crate::bot::embeds::startup_embed;
use crate::bot::state::BotState;
use crate::models::StartupRecord;

const USAGE: &str = "Usage: !ssu <server_name> <@host> <@ping> <description>";

pub async fn run(ctx: &Context, msg: &Message, rest: &str, state: &BotState) -> Result<()> {
    let config = state.config.get().await;
    if !is_authorized(&config, msg) {
        msg.channel_id.say(&ctx.http, NO_PERMISSION).await?;
        return Ok(());
    }

    let args = split_args(rest);
    if args.len() < 4 {
        msg.channel_id.say(&ctx.http, USAGE).await?;
        return Ok(());
    }
    let server_name = args[0].clone();
    let host = args[1].clone();
    let ping = args[2].clone();
    let description = args[3..].join(" ");

    let channel = target_channel(config.ssu_channel_id, msg.channel_id);
    let mut record = StartupRecord::new(server_name, host, ping, description, 0, channel.get());

    let sent = channel
        .send_message(&ctx.http, CreateMessage::new().embed(startup_embed(&record)))
        .await
        .context("failed to post startup announcement")?;
    record.message_id = sent.id.get();

    state
        .history
        .record_startup(&record)
        .await
        .context("startup announced but could not be logged")?;

    info!(server = %record.server_name, "Server startup announced");
    Ok(())
}
