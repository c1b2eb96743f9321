//! Command dispatcher - Routes correlated commands to quote operations

use crate::domain::entities::{ChatEvent, CommandKind, UserDirectory};
use crate::application::errors::CommandError;
use crate::application::services::QuoteService;
use super::correlator::CorrelatedCommand;

/// Sent when a command word matches nothing in the routing table
pub const DEFAULT_RESPONSE: &str = "That is not a valid command.";

/// Response to deliver to a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub channel_id: String,
    pub text: String,
}

/// Maps each recognized command to exactly one response
pub struct CommandDispatcher {
    quotes: QuoteService,
    users: UserDirectory,
}

impl CommandDispatcher {
    pub fn new(quotes: QuoteService, users: UserDirectory) -> Self {
        Self { quotes, users }
    }

    /// Route a command and produce its reply. Failures become reply text.
    pub fn dispatch(&self, correlated: &CorrelatedCommand) -> Reply {
        let text = match self.route(correlated) {
            Ok(response) => response,
            Err(e) => {
                if let CommandError::Storage(ref inner) = e {
                    tracing::warn!("[{}] Quote store failed: {}", correlated.channel_id, inner);
                } else {
                    tracing::debug!("[{}] {}", correlated.channel_id, e);
                }
                e.response()
            }
        };

        Reply {
            channel_id: correlated.channel_id.clone(),
            text,
        }
    }

    fn route(&self, correlated: &CorrelatedCommand) -> Result<String, CommandError> {
        let command = &correlated.command;
        let argument = command.argument.as_deref();

        match command.kind() {
            CommandKind::Quote => match argument {
                Some(arg) if command.arg_count() > 1 => self.quotes.add_quote(arg, &self.users),
                _ => self.quotes.get_quote(argument, &self.users),
            },
            CommandKind::Lookup => match argument {
                Some(arg) if command.arg_count() == 1 => self.quotes.get_quote_by_lookup(arg, &self.users),
                _ => Ok("Too many arguments provided".to_string()),
            },
            CommandKind::Grab => self.grab(correlated.prior.as_ref()),
            CommandKind::Unknown(_) => Ok(DEFAULT_RESPONSE.to_string()),
        }
    }

    /// Quote the last ordinary message under its author's display name
    fn grab(&self, prior: Option<&ChatEvent>) -> Result<String, CommandError> {
        let prior = prior.ok_or(CommandError::NothingToGrab)?;
        let name = self
            .users
            .display_name(&prior.user_id)
            .ok_or_else(|| CommandError::InvalidArgs("I don't know who said that.".to_string()))?;

        self.quotes.add_quote(&format!("{} {}", name, prior.text), &self.users)
    }
}
