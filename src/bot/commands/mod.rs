//! Chat command handlers.
//!
//! Commands are prefix-style (`!ssu …`), matched case-insensitively.
//! Handlers return `anyhow::Result`; the dispatcher reports failures
//! back into the channel instead of letting them take the process down.

pub mod config;
pub mod help;
pub mod poll;
pub mod shutdown;
pub mod startup;

use anyhow::Result;
use serenity::all::{ChannelId, Context, Message};

use super::state::BotState;
use crate::config::BotConfig;

pub const NO_PERMISSION: &str = "You don't have permission to use this command.";

/// Route a parsed command to its handler. Unknown commands are ignored.
pub async fn dispatch(
    ctx: &Context,
    msg: &Message,
    command: &str,
    rest: &str,
    state: &BotState,
) -> Result<()> {
    match command {
        "config" => config::run(ctx, msg, rest, state).await,
        "ssu" => startup::run(ctx, msg, rest, state).await,
        "ssd" => shutdown::run(ctx, msg, state).await,
        "ssup" => poll::start(ctx, msg, rest, state).await,
        "ussup" => poll::refresh(ctx, msg, rest).await,
        "help" => help::run(ctx, msg).await,
        _ => Ok(()),
    }
}

/// Whether the message author may run restricted commands.
///
/// An empty allowed-role list opens every command to everyone.
pub fn is_authorized(config: &BotConfig, msg: &Message) -> bool {
    let held: Vec<u64> = msg
        .member
        .as_ref()
        .map(|m| m.roles.iter().map(|r| r.get()).collect())
        .unwrap_or_default();
    roles_permit(&config.allowed_roles, &held)
}

fn roles_permit(allowed: &[u64], held: &[u64]) -> bool {
    allowed.is_empty() || held.iter().any(|r| allowed.contains(r))
}

/// Where an announcement goes: the configured channel when set,
/// otherwise the channel the command came from.
pub fn target_channel(configured: Option<u64>, fallback: ChannelId) -> ChannelId {
    match configured {
        Some(id) if id != 0 => ChannelId::new(id),
        _ => fallback,
    }
}

/// Parse a channel/role/user id, accepting either a bare snowflake or a
/// mention (`<#…>`, `<@&…>`, `<@…>`).
pub fn parse_snowflake(input: &str) -> Option<u64> {
    let inner = input
        .strip_prefix("<#")
        .or_else(|| input.strip_prefix("<@&"))
        .or_else(|| input.strip_prefix("<@"))
        .map(|s| s.strip_suffix('>').unwrap_or(s))
        .unwrap_or(input);
    inner.parse::<u64>().ok().filter(|&id| id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_permit_empty_allows_everyone() {
        assert!(roles_permit(&[], &[]));
        assert!(roles_permit(&[], &[1, 2]));
    }

    #[test]
    fn test_roles_permit_requires_membership() {
        assert!(roles_permit(&[5, 6], &[6]));
        assert!(!roles_permit(&[5, 6], &[7]));
        assert!(!roles_permit(&[5, 6], &[]));
    }

    #[test]
    fn test_target_channel_prefers_configured() {
        assert_eq!(
            target_channel(Some(42), ChannelId::new(9)),
            ChannelId::new(42)
        );
        assert_eq!(target_channel(None, ChannelId::new(9)), ChannelId::new(9));
        assert_eq!(target_channel(Some(0), ChannelId::new(9)), ChannelId::new(9));
    }

    #[test]
    fn test_parse_snowflake_bare() {
        assert_eq!(parse_snowflake("123456"), Some(123456));
        assert_eq!(parse_snowflake("0"), None);
        assert_eq!(parse_snowflake("abc"), None);
    }

    #[test]
    fn test_parse_snowflake_mentions() {
        assert_eq!(parse_snowflake("<#123>"), Some(123));
        assert_eq!(parse_snowflake("<@&456>"), Some(456));
        assert_eq!(parse_snowflake("<@789>"), Some(789));
    }
}
