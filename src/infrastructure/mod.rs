//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite quote store
//! - Adapters: Platform integrations (Slack, console)

pub mod config;
pub mod database;
pub mod adapters;
