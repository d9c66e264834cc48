//! Core data records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged server startup.
///
/// Written to the day log on `!ssu` and kept as `last_ssu.json` until the
/// matching `!ssd` clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupRecord {
    /// Role-play server name
    pub server_name: String,

    /// Host mention or name
    pub host: String,

    /// Ping target (role/user mention)
    pub ping: String,

    /// Free-form description
    pub description: String,

    /// Announcement message id
    pub message_id: u64,

    /// Channel the announcement was posted in
    pub channel_id: u64,

    /// When the startup was announced
    pub timestamp: DateTime<Utc>,
}

impl StartupRecord {
    pub fn new(
        server_name: String,
        host: String,
        ping: String,
        description: String,
        message_id: u64,
        channel_id: u64,
    ) -> Self {
        Self {
            server_name,
            host,
            ping,
            description,
            message_id,
            channel_id,
            timestamp: Utc::now(),
        }
    }
}
