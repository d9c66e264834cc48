//! # SSU Herald
//!
//! A Discord bot that posts and tracks role-play "server status"
//! announcements, backed by flat JSON files.
//!
//! ## Architecture
//!
//! - **models**: Core data records (startup sessions)
//! - **countdown**: Duration token parsing and countdown rendering
//! - **poll**: The long-lived countdown updater task and its supervision
//! - **bot**: Gateway client, command dispatch, embed construction
//! - **config**: Configuration store (load, mutate, persist)
//! - **storage**: Startup history and active-session files

pub mod bot;
pub mod config;
pub mod countdown;
pub mod models;
pub mod poll;
pub mod storage;

pub use models::*;
