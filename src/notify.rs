//! Outbound Telegram delivery.

use teloxide::prelude::*;
use tracing::{debug, error};

/// Sends notification text to the one configured chat.
pub struct Notifier {
    bot: Bot,
    chat_id: ChatId,
}

impl Notifier {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Deliver `text` to the chat. Always returns unit: a delivery failure
    /// is logged and dropped, so callers must not assume the message
    /// actually arrived.
    pub async fn send_message(&self, text: &str) {
        match self.bot.send_message(self.chat_id, text).await {
            Ok(_) => debug!("Sent message: {text}"),
            Err(e) => error!("Failed to send message: {e}"),
        }
    }
}
