//! Poll message editing over the Discord HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId, EditMessage, MessageId};
use serenity::http::{Http, HttpError};

use super::embeds::{poll_embed, PollEmbedParts};
use crate::poll::{CountdownTarget, PollEditError};

/// A previously sent poll message the updater task owns for its
/// lifetime. Each render rebuilds the full embed from the stored static
/// parts plus the new countdown, so repeated edits with the same value
/// are harmless.
pub struct MessageCountdownTarget {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
    parts: PollEmbedParts,
}

impl MessageCountdownTarget {
    pub fn new(
        http: Arc<Http>,
        channel_id: ChannelId,
        message_id: MessageId,
        parts: PollEmbedParts,
    ) -> Self {
        Self {
            http,
            channel_id,
            message_id,
            parts,
        }
    }
}

#[async_trait]
impl CountdownTarget for MessageCountdownTarget {
    async fn render(&self, countdown: &str) -> Result<(), PollEditError> {
        let embed = poll_embed(&self.parts, countdown);
        self.channel_id
            .edit_message(
                &self.http,
                self.message_id,
                EditMessage::new().embed(embed),
            )
            .await
            .map(|_| ())
            .map_err(classify_edit_error)
    }
}

/// Deleted messages and revoked access are terminal; everything else
/// (network hiccups, rate limiting) is worth another tick.
fn classify_edit_error(err: serenity::Error) -> PollEditError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        match response.status_code.as_u16() {
            401 | 403 | 404 => return PollEditError::Gone(err.to_string()),
            _ => {}
        }
    }
    PollEditError::Transient(err.to_string())
}
