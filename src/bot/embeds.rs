//! Announcement embed construction.

use serenity::all::{Colour, CreateEmbed, Timestamp};

use crate::config::BotConfig;
use crate::models::StartupRecord;

pub const STARTUP_COLOR: u32 = 0x43b581;
pub const SHUTDOWN_COLOR: u32 = 0xf04747;
pub const POLL_COLOR: u32 = 0x7289da;
pub const CONFIG_COLOR: u32 = 0x5865F2;

/// The green `SERVER STARTUP` announcement.
pub fn startup_embed(record: &StartupRecord) -> CreateEmbed {
    CreateEmbed::new()
        .title("\u{1f7e2} SERVER STARTUP")
        .colour(Colour::new(STARTUP_COLOR))
        .timestamp(Timestamp::now())
        .field("Server Name", record.server_name.clone(), true)
        .field("Host", record.host.clone(), true)
        .field("Ping", record.ping.clone(), true)
        .field("Description", record.description.clone(), false)
}

/// The red `SERVER SHUTDOWN` announcement, echoing the startup's fields.
pub fn shutdown_embed(record: &StartupRecord) -> CreateEmbed {
    CreateEmbed::new()
        .title("\u{1f534} SERVER SHUTDOWN")
        .colour(Colour::new(SHUTDOWN_COLOR))
        .timestamp(Timestamp::now())
        .field("Server Name", record.server_name.clone(), true)
        .field("Host", record.host.clone(), true)
        .field("Ping", record.ping.clone(), true)
        .field("Description", record.description.clone(), false)
}

/// Static parts of a poll embed, kept by the updater task so it can
/// re-render the whole embed with a fresh countdown each tick.
#[derive(Debug, Clone)]
pub struct PollEmbedParts {
    pub server_name: String,
    pub host_role: String,
    pub description: String,
    pub created: Timestamp,
}

/// The blurple `SERVER STARTUP POLL`. `Time Left` must stay the last
/// field; the updater replaces only that value.
pub fn poll_embed(parts: &PollEmbedParts, countdown: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("\u{1f4ca} SERVER STARTUP POLL")
        .colour(Colour::new(POLL_COLOR))
        .timestamp(parts.created)
        .field("Server Name", parts.server_name.clone(), true)
        .field("Host Role", parts.host_role.clone(), true)
        .field("Description", parts.description.clone(), false)
        .field("Time Left", countdown.to_string(), false)
}

/// Current configuration, one field per key.
pub fn config_embed(config: &BotConfig) -> CreateEmbed {
    let opt = |v: Option<u64>| v.map_or_else(|| "not set".to_string(), |id| id.to_string());
    let token = if config.token.is_empty() {
        "(from environment)".to_string()
    } else {
        "(set in file)".to_string()
    };
    let roles = if config.allowed_roles.is_empty() {
        "everyone".to_string()
    } else {
        config
            .allowed_roles
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    CreateEmbed::new()
        .title("Bot Configuration")
        .colour(Colour::new(CONFIG_COLOR))
        .field("token", token, false)
        .field("ssu_channel_id", opt(config.ssu_channel_id), false)
        .field("ssd_channel_id", opt(config.ssd_channel_id), false)
        .field("ssup_channel_id", opt(config.ssup_channel_id), false)
        .field("guild_id", opt(config.guild_id), false)
        .field("allowed_roles", roles, false)
}
