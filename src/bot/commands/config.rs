//! `!config` — show and edit the bot configuration.

use anyhow::Result;
use serenity::all::{Context, CreateMessage, Message};

use super::{is_authorized, parse_snowflake, NO_PERMISSION};
use crate::bot::args::split_args;
use crate::bot::embeds::config_embed;
use crate::bot::state::BotState;

const USAGE: &str = "Usage: !config [ssu_channel|ssd_channel|ssup_channel <id> | \
                     add_role|remove_role <id> | clear_roles]";

pub async fn run(ctx: &Context, msg: &Message, rest: &str, state: &BotState) -> Result<()> {
    let config = state.config.get().await;
    if !is_authorized(&config, msg) {
        msg.channel_id.say(&ctx.http, NO_PERMISSION).await?;
        return Ok(());
    }

    let args = split_args(rest);
    if args.is_empty() {
        msg.channel_id
            .send_message(&ctx.http, CreateMessage::new().embed(config_embed(&config)))
            .await?;
        return Ok(());
    }

    let id_arg = args.get(1).map(String::as_str).and_then(parse_snowflake);
    let outcome = match (args[0].as_str(), id_arg) {
        ("ssu_channel", Some(id)) => state.config.update(|c| c.ssu_channel_id = Some(id)).await,
        ("ssd_channel", Some(id)) => state.config.update(|c| c.ssd_channel_id = Some(id)).await,
        ("ssup_channel", Some(id)) => state.config.update(|c| c.ssup_channel_id = Some(id)).await,
        ("add_role", Some(id)) => {
            state
                .config
                .update(|c| {
                    if !c.allowed_roles.contains(&id) {
                        c.allowed_roles.push(id);
                    }
                })
                .await
        }
        ("remove_role", Some(id)) => {
            state
                .config
                .update(|c| c.allowed_roles.retain(|&r| r != id))
                .await
        }
        ("clear_roles", _) => state.config.update(|c| c.allowed_roles.clear()).await,
        _ => {
            msg.channel_id.say(&ctx.http, USAGE).await?;
            return Ok(());
        }
    };

    match outcome {
        Ok(_) => {
            msg.channel_id.say(&ctx.http, "Configuration updated.").await?;
        }
        Err(e) => {
            msg.channel_id
                .say(&ctx.http, format!("Configuration not saved: {}", e))
                .await?;
        }
    }
    Ok(())
}
