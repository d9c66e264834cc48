//! `!ssup` / `!ussup` — startup polls with an auto-updating countdown.

use anyhow::{bail, Context as _, Result};
use serenity::all::{
    Context, CreateEmbed, CreateMessage, EditMessage, Message, MessageId, Timestamp,
};
use tracing::{info, warn};

use super::{is_authorized, target_channel, NO_PERMISSION};
use crate::bot::args::split_args;
use crate::bot::embeds::{poll_embed, PollEmbedParts};
use crate::bot::poll_target::MessageCountdownTarget;
use crate::bot::state::BotState;
use crate::countdown::{format_countdown, parse_duration_secs};
use crate::poll::run_countdown_poll;

const USAGE: &str = "Usage: !ssup <server_name> <time> <@role> <description>";

/// Post a startup poll and spawn its countdown updater.
pub async fn start(ctx: &Context, msg: &Message, rest: &str, state: &BotState) -> Result<()> {
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
    let seconds = parse_duration_secs(&args[1]);
    let parts = PollEmbedParts {
        server_name: args[0].clone(),
        host_role: args[2].clone(),
        description: args[3..].join(" "),
        created: Timestamp::now(),
    };

    let channel = target_channel(config.ssup_channel_id, msg.channel_id);
    let embed = poll_embed(&parts, &format_countdown(seconds));
    let sent = channel
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
        .context("failed to post startup poll")?;

    let message_id = sent.id.get();
    let cancel = state.polls.register(message_id).await;
    let target = MessageCountdownTarget::new(ctx.http.clone(), channel, sent.id, parts);
    let polls = state.polls.clone();

    tokio::spawn(async move {
        match run_countdown_poll(target, seconds, cancel).await {
            Ok(outcome) => info!(message_id, ?outcome, "Startup poll finished"),
            Err(e) => warn!(message_id, "Startup poll ended with error: {}", e),
        }
        polls.remove(message_id).await;
    });

    info!(message_id, seconds, "Startup poll created");
    Ok(())
}

/// Manually refresh a poll message's embed timestamp.
pub async fn refresh(ctx: &Context, msg: &Message, rest: &str) -> Result<()> {
    let Some(id) = split_args(rest).first().and_then(|s| s.parse::<u64>().ok()) else {
        msg.channel_id
            .say(&ctx.http, "Usage: !ussup <message_id>")
            .await?;
        return Ok(());
    };
    if id == 0 {
        bail!("message id must be non-zero");
    }

    let fetched = msg
        .channel_id
        .message(&ctx.http, MessageId::new(id))
        .await
        .context("could not fetch that message")?;
    let Some(embed) = fetched.embeds.first() else {
        bail!("that message has no poll embed");
    };

    let refreshed = CreateEmbed::from(embed.clone()).timestamp(Timestamp::now());
    msg.channel_id
        .edit_message(&ctx.http, fetched.id, EditMessage::new().embed(refreshed))
        .await
        .context("could not refresh the poll")?;

    msg.channel_id.say(&ctx.http, "Poll refreshed!").await?;
    Ok(())
}
