mod api;
mod config;
mod notify;
mod poll;
mod status;

use std::process::ExitCode;

use teloxide::Bot;
use tracing::{error, info};

use api::ApiClient;
use config::Config;
use notify::Notifier;
use poll::Poller;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    // The three secrets are the only configuration; without them there is
    // nothing to do
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Environment variables are not available: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bot = Bot::new(&config.telegram_token);
    let api = ApiClient::new(config.practicum_token);
    let notifier = Notifier::new(bot, config.chat_id);

    info!("🚀 Starting homework status polling");
    Poller::new(api, notifier).run().await;
    ExitCode::SUCCESS
}
