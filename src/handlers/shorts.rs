use super::{AppState, RUN_AGAIN_LABEL, guarded, new_parse_keyboard};
use crate::{
    error::Result, extract::extract_short_ids, fetch::fetch_batch, report::AggregateReport,
};
use chrono::Local;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};
use tracing::{info, warn};

const NO_LINKS: &str = "❌ No links found.";

/// Handle a plain text message that may contain Shorts links.
///
/// The batch itself runs in a spawned task so long batches do not hold up
/// the dispatcher. Failures anywhere, including a panic while fetching or
/// aggregating, end in the generic error reply.
///
/// # Errors
///
/// Never; failures are reported to the chat instead.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let ids = extract_short_ids(text);
    let chat = msg.chat.id;

    if ids.is_empty() {
        guarded(&bot, chat, reply_no_links(&bot, chat)).await;
        return Ok(());
    }

    tokio::spawn(async move {
        guarded(&bot, chat, process_batch(&bot, chat, ids, state)).await;
    });

    Ok(())
}

async fn reply_no_links(bot: &Bot, chat: ChatId) -> Result<()> {
    bot.send_message(chat, NO_LINKS).await?;
    Ok(())
}

async fn process_batch(
    bot: &Bot,
    chat: ChatId,
    ids: Vec<String>,
    state: Arc<AppState>,
) -> Result<()> {
    info!(chat = chat.0, videos = ids.len(), "processing shorts");
    let ack = bot
        .send_message(chat, format!("⏳ Processing {} videos...", ids.len()))
        .await?;

    // A panic in here surfaces as a `JoinError` instead of a silent task.
    let job = tokio::spawn(async move {
        let records = fetch_batch(state.source.as_ref(), &ids, state.concurrency).await;
        let report = AggregateReport::build(&records);
        info!(
            chat = chat.0,
            processed = report.processed,
            failed = report.failed,
            "batch aggregated"
        );
        report.render(Local::now().naive_local())
    });
    let rendered = job.await;

    if let Err(err) = bot.delete_message(chat, ack.id).await {
        warn!(%err, "failed to delete acknowledgement");
    }

    bot.send_message(chat, rendered?)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(new_parse_keyboard(RUN_AGAIN_LABEL))
        .await?;

    Ok(())
}
