//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),

    /// The event source has ended for good
    #[error("Event stream closed")]
    Closed,
}

/// Command execution errors, each one becomes a chat response
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Nothing to grab")]
    NothingToGrab,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CommandError {
    /// Text sent back to the channel for this failure
    pub fn response(&self) -> String {
        match self {
            CommandError::InvalidArgs(msg) => msg.clone(),
            CommandError::UnknownUser(name) => format!("I don't know anyone called {}.", name),
            CommandError::NothingToGrab => "There is nothing to grab.".to_string(),
            CommandError::Storage(_) => "Sorry, I couldn't reach the quote database.".to_string(),
        }
    }
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
