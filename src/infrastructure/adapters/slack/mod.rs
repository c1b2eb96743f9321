//! Slack adapter over the Web API

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::{ChatEvent, EventKind, Member};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Slack Web API base URL
const API_BASE: &str = "https://slack.com/api";

/// Page size for history and member listing
const PAGE_LIMIT: u32 = 200;

/// Every Slack response carries `ok` and, on failure, `error`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    body: Option<T>,
}

/// A message as returned by `conversations.history`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    #[serde(default)]
    pub text: String,
    pub user: Option<String>,
    pub ts: String,
}

impl HistoryMessage {
    fn into_event(self, channel_id: &str) -> ChatEvent {
        ChatEvent {
            kind: EventKind::from(self.kind.as_str()),
            subtype: self.subtype,
            text: self.text,
            channel_id: channel_id.to_string(),
            user_id: self.user.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SlackMember {
    id: String,
    name: String,
    #[serde(default)]
    deleted: bool,
}

/// Slack bot adapter, polling a fixed set of channels
pub struct SlackAdapter {
    token: String,
    client: Client,
    info: BotInfo,
    channels: Vec<String>,
    /// Newest message timestamp seen per channel
    cursors: HashMap<String, String>,
}

impl SlackAdapter {
    pub fn new(token: impl Into<String>, channels: Vec<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "dxbot".to_string(),
            },
            channels,
            cursors: HashMap::new(),
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", API_BASE, method)
    }

    async fn get<T: DeserializeOwned>(&self, method: &str, query: &[(&str, String)]) -> Result<T, BotError> {
        let response = self.client
            .get(self.api_url(method))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Self::unwrap_envelope(method, response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, method: &str, body: &B) -> Result<T, BotError> {
        let response = self.client
            .post(self.api_url(method))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Self::unwrap_envelope(method, response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> Result<T, BotError> {
        if !response.status().is_success() {
            return Err(BotError::Network(format!("Slack API error on {}: {}", method, response.status())));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        match envelope {
            Envelope { ok: true, body: Some(body), .. } => Ok(body),
            Envelope { ok: true, body: None, .. } => {
                Err(BotError::Parse(format!("{} returned an empty body", method)))
            }
            Envelope { error, .. } => {
                let error = error.unwrap_or_else(|| "unknown_error".to_string());
                match error.as_str() {
                    "invalid_auth" | "not_authed" | "account_inactive" | "token_revoked" => {
                        Err(BotError::Auth(error))
                    }
                    _ => Err(BotError::Platform(format!("{}: {}", method, error))),
                }
            }
        }
    }

    /// New messages in one channel, oldest first
    async fn channel_history(&self, channel_id: &str) -> Result<Vec<HistoryMessage>, BotError> {
        #[derive(Deserialize)]
        struct History {
            #[serde(default)]
            messages: Vec<HistoryMessage>,
        }

        let mut query = vec![
            ("channel", channel_id.to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        if let Some(oldest) = self.cursors.get(channel_id) {
            query.push(("oldest", oldest.clone()));
        }

        let history: History = self.get("conversations.history", &query).await?;
        // Slack returns newest first
        let mut messages = history.messages;
        messages.reverse();
        Ok(messages)
    }
}

/// Merge per-channel history reads into one batch.
///
/// A failed channel keeps its cursor and is retried next poll while the
/// others still deliver. Only when every channel fails is the read an error.
fn merge_histories(
    histories: Vec<(String, Result<Vec<HistoryMessage>, BotError>)>,
    cursors: &mut HashMap<String, String>,
) -> Result<Vec<ChatEvent>, BotError> {
    let mut events = Vec::new();
    let mut last_error = None;
    let mut any_ok = histories.is_empty();

    for (channel, result) in histories {
        match result {
            Ok(messages) => {
                any_ok = true;
                if let Some(newest) = messages.last() {
                    cursors.insert(channel.clone(), newest.ts.clone());
                }
                events.extend(messages.into_iter().map(|m| m.into_event(&channel)));
            }
            Err(e) => {
                tracing::warn!("Failed to read channel {}: {}", channel, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !any_ok => Err(e),
        _ => Ok(events),
    }
}

/// Current time in Slack's `seconds.micros` timestamp format
fn slack_now() -> String {
    let now = Utc::now();
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

#[async_trait]
impl Bot for SlackAdapter {
    async fn connect(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct AuthTest {
            user_id: String,
            user: String,
        }

        let auth: AuthTest = self.post("auth.test", &serde_json::json!({})).await?;
        self.info = BotInfo {
            id: auth.user_id,
            name: auth.user,
        };

        // Only messages posted after startup are read
        let start = slack_now();
        for channel in &self.channels {
            self.cursors.insert(channel.clone(), start.clone());
        }

        tracing::info!("Connected to Slack as {} ({})", self.info.name, self.info.id);
        Ok(())
    }

    async fn read_events(&mut self) -> Result<Vec<ChatEvent>, BotError> {
        let mut histories = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            histories.push((channel.clone(), self.channel_history(channel).await));
        }
        merge_histories(histories, &mut self.cursors)
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct PostMessage<'a> {
            channel: &'a str,
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct Posted {
            #[allow(dead_code)]
            ts: String,
        }

        let _: Posted = self.post("chat.postMessage", &PostMessage { channel: channel_id, text }).await?;
        Ok(())
    }

    async fn list_members(&self) -> Result<Vec<Member>, BotError> {
        #[derive(Deserialize)]
        struct MemberPage {
            #[serde(default)]
            members: Vec<SlackMember>,
            response_metadata: Option<Metadata>,
        }

        #[derive(Deserialize)]
        struct Metadata {
            next_cursor: Option<String>,
        }

        let mut members = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = vec![("limit", PAGE_LIMIT.to_string())];
            if let Some(c) = &cursor {
                query.push(("cursor", c.clone()));
            }

            let page: MemberPage = self.get("users.list", &query).await?;
            members.extend(
                page.members
                    .into_iter()
                    .filter(|m| !m.deleted)
                    .map(|m| Member::new(m.id, m.name)),
            );

            cursor = page
                .response_metadata
                .and_then(|m| m.next_cursor)
                .filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }
        Ok(members)
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_message_into_event() {
        let raw = r#"{"type":"message","text":"hello everyone","user":"U3","ts":"1700000000.000100"}"#;
        let message: HistoryMessage = serde_json::from_str(raw).unwrap();
        let event = message.into_event("C1");
        assert!(event.is_plain_message());
        assert_eq!(event.channel_id, "C1");
        assert_eq!(event.user_id, "U3");
    }

    #[test]
    fn test_subtyped_message_is_not_plain() {
        let raw = r#"{"type":"message","subtype":"channel_join","text":"<@U3> has joined","ts":"1.2"}"#;
        let message: HistoryMessage = serde_json::from_str(raw).unwrap();
        let event = message.into_event("C1");
        assert!(!event.is_plain_message());
        assert_eq!(event.user_id, "");
    }

    #[test]
    fn test_error_envelope() {
        let raw = r#"{"ok":false,"error":"channel_not_found"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.error.as_deref(), Some("channel_not_found"));
    }

    fn history(text: &str, ts: &str) -> HistoryMessage {
        HistoryMessage {
            kind: "message".to_string(),
            subtype: None,
            text: text.to_string(),
            user: Some("U1".to_string()),
            ts: ts.to_string(),
        }
    }

    #[test]
    fn test_failed_channel_does_not_drop_others() {
        let mut cursors = HashMap::from([
            ("C1".to_string(), "100.000000".to_string()),
            ("Cbad".to_string(), "100.000000".to_string()),
        ]);
        let histories = vec![
            ("C1".to_string(), Ok(vec![history("hello", "101.000000"), history("!quote", "102.000000")])),
            ("Cbad".to_string(), Err(BotError::Platform("conversations.history: channel_not_found".to_string()))),
        ];

        let events = merge_histories(histories, &mut cursors).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].text, "!quote");
        assert_eq!(events[1].channel_id, "C1");
        assert_eq!(cursors["C1"], "102.000000");
        assert_eq!(cursors["Cbad"], "100.000000");
    }

    #[test]
    fn test_all_channels_failing_is_an_error() {
        let mut cursors = HashMap::new();
        let histories = vec![
            ("C1".to_string(), Err(BotError::Network("timed out".to_string()))),
            ("C2".to_string(), Err(BotError::Network("timed out".to_string()))),
        ];
        assert!(matches!(merge_histories(histories, &mut cursors), Err(BotError::Network(_))));
        assert!(cursors.is_empty());
    }

    #[test]
    fn test_empty_channel_keeps_cursor() {
        let mut cursors = HashMap::from([("C1".to_string(), "5.000000".to_string())]);
        let events = merge_histories(vec![("C1".to_string(), Ok(Vec::new()))], &mut cursors).unwrap();
        assert!(events.is_empty());
        assert_eq!(cursors["C1"], "5.000000");
    }

    #[test]
    fn test_slack_now_format() {
        let ts = slack_now();
        let (secs, micros) = ts.split_once('.').unwrap();
        assert!(secs.parse::<i64>().unwrap() > 0);
        assert_eq!(micros.len(), 6);
    }
}
