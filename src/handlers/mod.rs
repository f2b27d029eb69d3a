mod callback;
mod shorts;

use crate::{commands::Command, error::Result, fetch::StatsSource};
use std::sync::Arc;
use teloxide::{
    RequestError,
    dispatching::UpdateHandler,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};
use tracing::{error, warn};

pub use callback::handle_callback;
pub use shorts::handle_message;

/// Callback data of the "start a new extraction" button.
pub const NEW_PARSE: &str = "new_parse";
pub const START_LABEL: &str = "📊 Start extraction";
pub const RUN_AGAIN_LABEL: &str = "🔁 Run again";
pub const GENERIC_ERROR: &str = "⚠️ An error occurred. Please try again.";

/// Dependencies shared by every update handler.
pub struct AppState {
    pub source: Arc<dyn StatsSource>,
    pub concurrency: usize,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn StatsSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency,
        }
    }
}

/// Single-button keyboard that restarts the extraction flow.
#[must_use]
pub fn new_parse_keyboard(label: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(label, NEW_PARSE)]])
}

/// Something that can drop a plain text message into a chat.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, chat: ChatId, text: &str) -> Result<()>;
}

#[async_trait::async_trait]
impl Notifier for Bot {
    async fn notify(&self, chat: ChatId, text: &str) -> Result<()> {
        self.send_message(chat, text).await?;
        Ok(())
    }
}

/// Run `task`; if it fails, log the error and tell the chat to try again.
///
/// Every endpoint goes through this so a failed update never leaves the
/// user without an answer.
pub async fn guarded<N, F>(notifier: &N, chat: ChatId, task: F)
where
    N: Notifier + ?Sized,
    F: Future<Output = Result<()>>,
{
    if let Err(err) = task.await {
        error!(%err, chat = chat.0, "handler failed");
        if let Err(err) = notifier.notify(chat, GENERIC_ERROR).await {
            warn!(%err, chat = chat.0, "failed to send error reply");
        }
    }
}

/// Update routing: commands first, then button presses, then plain text.
#[must_use]
pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(crate::commands::answer),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(Update::filter_message().endpoint(handle_message))
}
