//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::entities::{ChatEvent, Member};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

const CONSOLE_CHANNEL: &str = "console";
const CONSOLE_USER_ID: &str = "console-user";

/// Console bot adapter for local development.
///
/// Each line typed on stdin becomes one message event.
pub struct ConsoleAdapter {
    info: BotInfo,
    user_name: String,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "dxbot".to_string(),
            },
            user_name: user_name.into(),
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn connect(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode) as {}", self.user_name);
        Ok(())
    }

    async fn read_events(&mut self) -> Result<Vec<ChatEvent>, BotError> {
        let line = self.lines
            .get_mut()
            .next_line()
            .await
            .map_err(|e| BotError::Network(format!("stdin: {}", e)))?;

        match line {
            Some(text) if !text.trim().is_empty() => {
                Ok(vec![ChatEvent::message(text.trim_end(), CONSOLE_CHANNEL, CONSOLE_USER_ID)])
            }
            Some(_) => Ok(Vec::new()),
            None => Err(BotError::Closed),
        }
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>, BotError> {
        Ok(vec![Member::new(CONSOLE_USER_ID, self.user_name.clone())])
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
