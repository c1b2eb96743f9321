use serde::{Deserialize, Serialize};

/// Type of a raw event delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Message,
    Other(String),
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "message" => EventKind::Message,
            other => EventKind::Other(other.to_string()),
        }
    }
}

/// A single event from the chat stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub kind: EventKind,
    /// Edits, joins, bot posts and the like carry a subtype
    pub subtype: Option<String>,
    pub text: String,
    pub channel_id: String,
    pub user_id: String,
}

impl ChatEvent {
    pub fn new(kind: EventKind, text: impl Into<String>, channel_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            subtype: None,
            text: text.into(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
        }
    }

    /// An ordinary chat message with no subtype
    pub fn message(text: impl Into<String>, channel_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(EventKind::Message, text, channel_id, user_id)
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Only plain messages are considered for commands and correlation
    pub fn is_plain_message(&self) -> bool {
        self.kind == EventKind::Message && self.subtype.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        let event = ChatEvent::message("hi", "C1", "U1");
        assert!(event.is_plain_message());
        assert!(!event.clone().with_subtype("message_changed").is_plain_message());
        assert!(!ChatEvent::new(EventKind::from("user_typing"), "", "C1", "U1").is_plain_message());
    }
}
