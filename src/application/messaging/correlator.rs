//! Event correlator - Finds the first command in a batch and the ordinary
//! message that preceded it

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::domain::entities::{ChatEvent, ParsedCommand};
use super::parser::CommandParser;

/// How the last ordinary message is remembered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingMode {
    /// One value shared by every channel
    #[default]
    Global,
    /// One value per channel
    PerChannel,
}

/// Running memory of the most recent non-command message
#[derive(Debug, Clone, Default)]
pub struct CorrelationState {
    mode: TrackingMode,
    global: Option<ChatEvent>,
    per_channel: HashMap<String, ChatEvent>,
}

impl CorrelationState {
    pub fn new(mode: TrackingMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The last ordinary message visible from `channel_id`
    pub fn last_ordinary(&self, channel_id: &str) -> Option<&ChatEvent> {
        match self.mode {
            TrackingMode::Global => self.global.as_ref(),
            TrackingMode::PerChannel => self.per_channel.get(channel_id),
        }
    }

    fn remember(&mut self, event: &ChatEvent) {
        match self.mode {
            TrackingMode::Global => self.global = Some(event.clone()),
            TrackingMode::PerChannel => {
                self.per_channel.insert(event.channel_id.clone(), event.clone());
            }
        }
    }
}

/// A command together with where it came from and what came before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelatedCommand {
    pub command: ParsedCommand,
    pub channel_id: String,
    pub prior: Option<ChatEvent>,
}

/// Scans event batches for commands while keeping the correlation state current
pub struct EventCorrelator {
    parser: CommandParser,
}

impl EventCorrelator {
    pub fn new(parser: CommandParser) -> Self {
        Self { parser }
    }

    /// Process `events` in order and return the first command found.
    ///
    /// Events after that command are left unprocessed. Prefixed text never
    /// replaces the remembered message, so consecutive commands all see the
    /// same prior.
    pub fn correlate(&self, events: &[ChatEvent], state: &mut CorrelationState) -> Option<CorrelatedCommand> {
        for event in events.iter().filter(|e| e.is_plain_message()) {
            let prior = state.last_ordinary(&event.channel_id).cloned();

            if !self.parser.has_prefix(&event.text) {
                state.remember(event);
            }

            if let Some(command) = self.parser.parse(&event.text) {
                tracing::debug!("[{}] command {:?} arg {:?}", event.channel_id, command.name, command.argument);
                return Some(CorrelatedCommand {
                    command,
                    channel_id: event.channel_id.clone(),
                    prior,
                });
            }
        }
        None
    }
}
