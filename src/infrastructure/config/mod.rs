//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::application::messaging::TrackingMode;
use crate::application::services::NamePolicy;

/// Bot configuration. Every section and field may be omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub quotes: QuotesConfig,
    pub users: UsersConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub poll_delay_ms: u64,
    /// Remember the last message globally (as deployed) or per channel
    pub tracking: TrackingMode,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "dxbot".to_string(),
            prefix: "!".to_string(),
            poll_delay_ms: 1000,
            tracking: TrackingMode::Global,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct QuotesConfig {
    pub database: PathBuf,
    /// Reject quotes attributed to names outside the user directory
    pub require_known_name: bool,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("dxbot.db"),
            require_known_name: false,
        }
    }
}

/// Accounts left out of the user directory
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UsersConfig {
    pub exclude: Vec<String>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            exclude: ["slackbot", "scryfall", "dx_bot", "dx_cal_bot", "resistance_bot"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AdaptersConfig {
    pub slack: Option<SlackConfig>,
    pub console: Option<ConsoleConfig>,
}

impl Default for AdaptersConfig {
    fn default() -> Self {
        Self {
            slack: Some(SlackConfig::default()),
            console: Some(ConsoleConfig::default()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SlackConfig {
    pub enabled: bool,
    pub token: Option<String>,
    /// Channel ids to poll
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Display name of the person typing at the console
    pub user_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_name: "console".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse YAML without validating; call `validate` once overrides are applied
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay environment variables on top of the current values
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("DXBOT_TOKEN") {
            self.set_slack_token(token);
        }

        if let Ok(prefix) = std::env::var("COMMAND_CHARACTER") {
            self.bot.prefix = prefix;
        }

        if let Ok(path) = std::env::var("DXBOT_DB") {
            self.quotes.database = PathBuf::from(path);
        }

        if let Ok(channels) = std::env::var("DXBOT_CHANNELS") {
            let channels = parse_channel_list(&channels);
            self.adapters
                .slack
                .get_or_insert_with(SlackConfig::default)
                .channels = channels;
        }
    }

    /// Set a Slack token, which also enables the Slack adapter
    pub fn set_slack_token(&mut self, token: impl Into<String>) {
        let slack = self.adapters.slack.get_or_insert_with(SlackConfig::default);
        slack.token = Some(token.into());
        slack.enabled = true;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.chars().count() != 1 {
            return Err(ConfigError::InvalidValue(format!(
                "prefix must be a single character, got {:?}",
                self.bot.prefix
            )));
        }
        if self.bot.poll_delay_ms == 0 {
            return Err(ConfigError::InvalidValue("poll-delay-ms must be positive".to_string()));
        }
        if let Some(slack) = self.slack() {
            if slack.token.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingField("adapters.slack.token".to_string()));
            }
        }
        Ok(())
    }

    /// Enabled Slack settings, if any
    pub fn slack(&self) -> Option<&SlackConfig> {
        self.adapters.slack.as_ref().filter(|s| s.enabled)
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.bot.poll_delay_ms)
    }

    pub fn name_policy(&self) -> NamePolicy {
        if self.quotes.require_known_name {
            NamePolicy::RequireKnown
        } else {
            NamePolicy::Verbatim
        }
    }

    pub fn console_user_name(&self) -> String {
        self.adapters
            .console
            .as_ref()
            .map(|c| c.user_name.clone())
            .unwrap_or_else(|| "console".to_string())
    }
}

fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
