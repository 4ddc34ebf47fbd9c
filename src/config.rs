use std::env;
use std::fmt;
use teloxide::types::ChatId;

const PRACTICUM_TOKEN_VAR: &str = "MY_PRACTICUM_TOKEN";
const TELEGRAM_TOKEN_VAR: &str = "MY_TG_TOKEN";
const CHAT_ID_VAR: &str = "MY_TG_CHAT_ID";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    Missing(&'static str),
    /// The chat id variable is set but not a number.
    BadChatId(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => {
                write!(f, "required environment variable '{}' is not set", name)
            }
            Self::BadChatId(value) => {
                write!(f, "{} must be a numeric chat id, got '{}'", CHAT_ID_VAR, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    /// Bearer token for the homework review API.
    pub practicum_token: String,
    pub telegram_token: String,
    /// The one chat every notification goes to.
    pub chat_id: ChatId,
}

impl Config {
    /// Read the three required secrets from the process environment.
    /// Any of them missing or empty makes startup impossible.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            env::var(PRACTICUM_TOKEN_VAR).ok(),
            env::var(TELEGRAM_TOKEN_VAR).ok(),
            env::var(CHAT_ID_VAR).ok(),
        )
    }

    fn from_values(
        practicum_token: Option<String>,
        telegram_token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let practicum_token = required(PRACTICUM_TOKEN_VAR, practicum_token)?;
        let telegram_token = required(TELEGRAM_TOKEN_VAR, telegram_token)?;
        let chat_id = required(CHAT_ID_VAR, chat_id)?;
        let chat_id = chat_id
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| ConfigError::BadChatId(chat_id))?;

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
        })
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}
