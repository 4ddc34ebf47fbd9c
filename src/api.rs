//! Client for the homework review API.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

pub struct ApiClient {
    token: String,
    endpoint: String,
    http: reqwest::Client,
}

/// Query string for a poll: everything reviewed since `from_date`.
#[derive(Serialize)]
struct PollQuery {
    from_date: u64,
}

#[derive(Debug)]
pub enum ApiError {
    /// The endpoint could not be reached at all.
    Unavailable(reqwest::Error),
    /// The endpoint answered with something other than 200.
    Status(StatusCode),
    /// The 200 body was not valid JSON.
    Parse(serde_json::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "endpoint unavailable: {e}"),
            Self::Status(code) => write!(f, "unexpected API status: {code}"),
            Self::Parse(e) => write!(f, "malformed API response: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(e) => Some(e),
            Self::Status(_) => None,
            Self::Parse(e) => Some(e),
        }
    }
}

impl ApiClient {
    pub fn new(token: String) -> Self {
        Self {
            token,
            endpoint: ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_endpoint(token: String, endpoint: String) -> Self {
        Self {
            token,
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch homework statuses reviewed since `timestamp`.
    ///
    /// One attempt per call, no timeout beyond the client default. The
    /// retry cadence is the poll loop's business, not this client's.
    pub async fn get_api_answer(&self, timestamp: u64) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&PollQuery { from_date: timestamp })
            .send()
            .await
            .map_err(|e| {
                error!("Homework endpoint unreachable: {e}");
                ApiError::Unavailable(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response body: {e}");
            ApiError::Unavailable(e)
        })?;

        interpret(status, &body)
    }
}

fn interpret(status: StatusCode, body: &str) -> Result<Value, ApiError> {
    if status != StatusCode::OK {
        error!("API answered with status {status}");
        return Err(ApiError::Status(status));
    }
    serde_json::from_str(body).map_err(ApiError::Parse)
}
