//! The polling loop: fetch, validate, translate, maybe notify, sleep.

use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::error;

use crate::api::{ApiClient, ApiError};
use crate::notify::Notifier;
use crate::status::{CheckError, StatusError, check_response, parse_status};

pub const RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Any failure of a single poll iteration. Logged by the loop, never fatal.
#[derive(Debug)]
pub enum PollError {
    Api(ApiError),
    Check(CheckError),
    Status(StatusError),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{e}"),
            Self::Check(e) => write!(f, "{e}"),
            Self::Status(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Check(e) => Some(e),
            Self::Status(e) => Some(e),
        }
    }
}

impl From<ApiError> for PollError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<CheckError> for PollError {
    fn from(e: CheckError) -> Self {
        Self::Check(e)
    }
}

impl From<StatusError> for PollError {
    fn from(e: StatusError) -> Self {
        Self::Status(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum PollOutcome {
    /// The status text changed and a send was attempted.
    Sent,
    /// Same text as last time, nothing sent.
    Suppressed,
}

pub struct Poller {
    api: ApiClient,
    notifier: Notifier,
    /// Lower bound for the next fetch. Stays at 0 for the process
    /// lifetime: every poll re-reads the full history and only the
    /// newest record is inspected.
    timestamp: u64,
    /// The last composed notification text, for duplicate suppression.
    last_message: String,
}

impl Poller {
    pub fn new(api: ApiClient, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            timestamp: 0,
            last_message: String::new(),
        }
    }

    /// Whether `text` differs from the last composed notification.
    ///
    /// Updates the suppression state before any delivery attempt, so a
    /// failed send still suppresses the same text on the next poll.
    fn should_notify(&mut self, text: &str) -> bool {
        if text == self.last_message {
            return false;
        }
        self.last_message = text.to_string();
        true
    }

    async fn poll_once(&mut self) -> Result<PollOutcome, PollError> {
        let response = self.api.get_api_answer(self.timestamp).await?;
        let homework = check_response(&response)?;
        let text = parse_status(homework)?;

        if self.should_notify(&text) {
            self.notifier.send_message(&text).await;
            Ok(PollOutcome::Sent)
        } else {
            Ok(PollOutcome::Suppressed)
        }
    }

    /// Poll forever. Per-iteration failures are logged and the loop
    /// sleeps out the retry period exactly as it does after a success.
    pub async fn run(mut self) {
        loop {
            if let Err(e) = self.poll_once().await {
                error!("Poll iteration failed: {e}");
            }
            sleep(RETRY_PERIOD).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::Bot;
    use teloxide::types::ChatId;
    use tokio::net::TcpListener;

    fn test_poller() -> Poller {
        let api = ApiClient::new("practicum-token".to_string());
        let notifier = Notifier::new(Bot::new("123456:TEST"), ChatId(1));
        Poller::new(api, notifier)
    }

    #[test]
    fn test_initial_state() {
        let poller = test_poller();
        // from_date stays at 0, the full history is re-read every poll
        assert_eq!(poller.timestamp, 0);
        assert_eq!(poller.last_message, "");
    }

    #[test]
    fn test_suppression() {
        let mut poller = test_poller();
        assert!(poller.should_notify("first status"));
        assert!(!poller.should_notify("first status"));
        assert!(poller.should_notify("second status"));
        assert!(!poller.should_notify("second status"));
    }

    #[test]
    fn test_suppression_state_updates_before_delivery() {
        // should_notify itself records the text, so a later send failure
        // cannot cause the same text to be re-sent
        let mut poller = test_poller();
        assert!(poller.should_notify("status"));
        assert_eq!(poller.last_message, "status");
    }

    #[tokio::test]
    async fn test_poll_failure_is_an_error_not_a_panic() {
        // A port nothing listens on: the fetch fails, the iteration
        // reports an error instead of tearing anything down
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = ApiClient::with_endpoint("practicum-token".to_string(), format!("http://{addr}/"));
        let notifier = Notifier::new(Bot::new("123456:TEST"), ChatId(1));
        let mut poller = Poller::new(api, notifier);

        let err = poller.poll_once().await.unwrap_err();
        assert!(matches!(err, PollError::Api(ApiError::Unavailable(_))));
    }
}
