use async_trait::async_trait;
use crate::domain::entities::{ChatEvent, Member};
use crate::application::errors::BotError;

/// Bot trait - abstraction for the chat platform transport
#[async_trait]
pub trait Bot: Send + Sync {
    /// Authenticate and prepare to read events
    async fn connect(&mut self) -> Result<(), BotError>;

    /// Read the next batch of events, possibly empty
    async fn read_events(&mut self) -> Result<Vec<ChatEvent>, BotError>;

    /// Post a message to a channel
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError>;

    /// List workspace members for the user directory
    async fn list_members(&self) -> Result<Vec<Member>, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
