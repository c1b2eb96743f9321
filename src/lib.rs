//! dxbot - a chat-room quote bot.
//!
//! Watches a chat stream for `!quote`, `!lookup` and `!grab` commands and
//! keeps attributed quotes in SQLite.

pub mod domain;
pub mod application;
pub mod infrastructure;
