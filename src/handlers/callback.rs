use super::{NEW_PARSE, guarded};
use crate::error::Result;
use teloxide::{prelude::*, types::MessageId};
use tracing::debug;

const SEND_LINKS: &str = "📩 Send me YouTube Shorts links.";

/// Where the "send me links" prompt goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    /// Replace the text of the message carrying the button.
    Edit(ChatId, MessageId),
    /// The message is gone or too old to edit.
    Send(ChatId),
}

impl Prompt {
    const fn chat(self) -> ChatId {
        match self {
            Self::Edit(chat, _) | Self::Send(chat) => chat,
        }
    }
}

fn prompt_target(q: &CallbackQuery) -> Prompt {
    if let Some(message) = q.regular_message() {
        return Prompt::Edit(message.chat.id, message.id);
    }
    let chat = q
        .message
        .as_ref()
        .map_or_else(|| ChatId::from(q.from.id), |m| m.chat().id);
    Prompt::Send(chat)
}

/// Answer inline button presses.
///
/// # Errors
///
/// Never; failures are reported to the chat instead.
pub async fn handle_callback(bot: Bot, q: CallbackQuery) -> ResponseResult<()> {
    let target = prompt_target(&q);
    guarded(&bot, target.chat(), answer(&bot, &q, target)).await;
    Ok(())
}

async fn answer(bot: &Bot, q: &CallbackQuery, target: Prompt) -> Result<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() != Some(NEW_PARSE) {
        debug!(data = ?q.data, "ignoring unknown callback");
        return Ok(());
    }

    match target {
        Prompt::Edit(chat, message) => {
            bot.edit_message_text(chat, message, SEND_LINKS).await?;
        }
        Prompt::Send(chat) => {
            bot.send_message(chat, SEND_LINKS).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(message: Option<serde_json::Value>) -> CallbackQuery {
        let mut value = serde_json::json!({
            "id": "4382",
            "from": {"id": 77, "is_bot": false, "first_name": "Ann"},
            "chat_instance": "-1",
            "data": NEW_PARSE,
        });
        if let Some(message) = message {
            value["message"] = message;
        }
        serde_json::from_value(value).expect("callback query")
    }

    fn message(date: i64) -> serde_json::Value {
        serde_json::json!({
            "message_id": 10,
            "date": date,
            "chat": {"id": 5, "type": "private", "first_name": "Ann"},
            "text": "report",
        })
    }

    #[test]
    fn button_message_is_edited() {
        let q = query(Some(message(1_700_000_000)));
        assert_eq!(prompt_target(&q), Prompt::Edit(ChatId(5), MessageId(10)));
    }

    #[test]
    fn inaccessible_message_gets_new_prompt() {
        let q = query(Some(message(0)));
        assert_eq!(prompt_target(&q), Prompt::Send(ChatId(5)));
    }

    #[test]
    fn missing_message_falls_back_to_user() {
        let q = query(None);
        assert_eq!(prompt_target(&q), Prompt::Send(ChatId(77)));
    }
}
