use crate::{
    error::Result,
    handlers::{START_LABEL, guarded, new_parse_keyboard},
};
use teloxide::{prelude::*, utils::command::BotCommands};

const WELCOME: &str = "👋 Welcome to YouTube Shorts Statistics!";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Start a new extraction.
    Start,
    /// Display this text.
    #[command(aliases = ["h", "?"])]
    Help,
}

/// Handle a command from the user.
///
/// # Errors
///
/// Never; failures are reported to the chat instead.
pub async fn answer(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    guarded(&bot, msg.chat.id, reply(&bot, &msg, cmd)).await;
    Ok(())
}

async fn reply(bot: &Bot, msg: &Message, cmd: Command) -> Result<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, WELCOME)
                .reply_markup(new_parse_keyboard(START_LABEL))
                .await?
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert!(matches!(Command::parse("/start", "bot"), Ok(Command::Start)));
        assert!(matches!(Command::parse("/help", "bot"), Ok(Command::Help)));
        assert!(matches!(Command::parse("/h", "bot"), Ok(Command::Help)));
        assert!(Command::parse("https://youtube.com/shorts/aaaaaaaaaaa", "bot").is_err());
    }
}
