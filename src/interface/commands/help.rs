//! # Help Command
//!
//! Handles `heroku help`.
//! Lists the usage line of every registered command.

use crate::application::grammar::CommandTable;
use crate::application::responder::ResponseChannel;

pub async fn handle_help(table: &CommandTable, channel: &ResponseChannel) {
    let mut lines = vec![crate::strings::messages::HELP_HEADER.to_string()];
    lines.extend(table.usages().into_iter().map(|usage| format!("* {usage}")));
    channel.send(&lines.join("\n")).await;
}
