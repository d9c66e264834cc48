//! Shared state handed to every command handler.

use crate::config::ConfigStore;
use crate::poll::PollRegistry;
use crate::storage::HistoryStore;

/// Everything a handler needs: the config store, the history store, and
/// supervision over running countdown polls. Handlers receive it by
/// reference; nothing here is a module-level singleton.
pub struct BotState {
    pub config: ConfigStore,
    pub history: HistoryStore,
    pub polls: PollRegistry,
}

impl BotState {
    pub fn new(config: ConfigStore, history: HistoryStore) -> Self {
        Self {
            config,
            history,
            polls: PollRegistry::new(),
        }
    }
}
