//! Discord gateway client and command dispatch.

pub mod args;
pub mod commands;
pub mod embeds;
pub mod poll_target;
pub mod state;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use serenity::all::{Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::async_trait;
use serenity::Client;
use tracing::{error, info};

use crate::config::{BotConfig, ConfigStore};
use crate::storage::HistoryStore;
use state::BotState;

pub const COMMAND_PREFIX: &str = "!";

/// Gateway event handler.
pub struct Herald {
    state: Arc<BotState>,
}

impl Herald {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Herald {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Bot is online as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some((command, rest)) = parse_command(&msg.content) else {
            return;
        };

        if let Err(e) = commands::dispatch(&ctx, &msg, &command, rest, &self.state).await {
            error!(command = %command, "Command failed: {:#}", e);
            let _ = msg
                .channel_id
                .say(&ctx.http, format!("Error: {}", e))
                .await;
        }
    }
}

/// Split `!name rest…` into a lowercased command name and its raw
/// argument text. Non-command messages yield `None`.
fn parse_command(content: &str) -> Option<(String, &str)> {
    let stripped = content.trim_start().strip_prefix(COMMAND_PREFIX)?;
    let stripped = stripped.trim_start();
    if stripped.is_empty() {
        return None;
    }
    let (name, rest) = match stripped.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (stripped, ""),
    };
    Some((name.to_ascii_lowercase(), rest))
}

/// Connect to the gateway and serve commands until the process stops.
pub async fn run(config: ConfigStore, history: HistoryStore) -> Result<()> {
    let token = resolve_token(&config.get().await)?;
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let state = Arc::new(BotState::new(config, history));
    let mut client = Client::builder(&token, intents)
        .event_handler(Herald::new(state))
        .await
        .context("failed to build Discord client")?;

    client.start().await.context("gateway connection failed")?;
    Ok(())
}

/// Token from the environment, falling back to the config file.
fn resolve_token(config: &BotConfig) -> Result<String> {
    std::env::var("DISCORD_BOT_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| (!config.token.is_empty()).then(|| config.token.clone()))
        .context("no bot token: set DISCORD_BOT_TOKEN or the `token` field in config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_command_basic() {
        assert_eq!(
            parse_command("!ssu Site-19 @Host @everyone go"),
            Some(("ssu".to_string(), "Site-19 @Host @everyone go"))
        );
    }

    #[test]
    fn test_parse_command_no_args() {
        assert_eq!(parse_command("!ssd"), Some(("ssd".to_string(), "")));
    }

    #[test]
    fn test_parse_command_case_insensitive_name() {
        assert_eq!(parse_command("!SSU x"), Some(("ssu".to_string(), "x")));
    }

    #[test]
    fn test_parse_command_ignores_plain_messages() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("!"), None);
        assert_eq!(parse_command(""), None);
    }
}
