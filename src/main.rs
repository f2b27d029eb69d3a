use dotenv::dotenv;
use shorts_stats_rs::{
    config::Config,
    handlers::{self, AppState},
    health,
    telemetry::setup_logger,
    youtube::YoutubeClient,
};
use std::sync::Arc;
use teloxide::{error_handlers::LoggingErrorHandler, prelude::*};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    color_eyre::install()?;
    setup_logger()?;

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    let source = YoutubeClient::new(&config.youtube)?;
    let state = Arc::new(AppState::new(Arc::new(source), config.youtube.concurrency));

    let health_config = config.health;
    tokio::spawn(async move {
        if let Err(err) = health::serve(health_config).await {
            error!(%err, "health endpoint stopped");
        }
    });

    let bot = Bot::new(config.bot_token);
    info!("bot starting");

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            debug!(?update, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
