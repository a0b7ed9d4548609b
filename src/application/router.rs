//! # Command Router
//!
//! Entry point for every inbound chat message. Matches the text against the command
//! table and hands a match to the orchestrator together with a fresh response channel.
//! Text that matches nothing is ignored without a reply.

use std::sync::Arc;

use crate::application::grammar::CommandTable;
use crate::application::orchestrator::Orchestrator;
use crate::application::responder::ResponseChannel;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use crate::strings::logs;

pub struct CommandRouter {
    table: Arc<CommandTable>,
    orchestrator: Orchestrator,
    surface: String,
}

impl CommandRouter {
    pub fn new(table: Arc<CommandTable>, orchestrator: Orchestrator, surface: &str) -> Self {
        Self {
            table,
            orchestrator,
            surface: surface.to_string(),
        }
    }

    /// Routes one message. Returns whether it was recognized as a command.
    pub async fn route(&self, chat: Arc<dyn ChatProvider>, message: InboundMessage) -> bool {
        tracing::info!("{}", logs::received_message(&message.sender, &message.id));

        let Some(invocation) = self.table.parse(&message.body, &message.sender) else {
            return false;
        };

        tracing::info!(
            "Router dispatching cmd='{}' sender='{}' room='{}'",
            invocation.pattern.name,
            message.sender,
            chat.room_id()
        );

        let channel = ResponseChannel::for_surface(&self.surface, chat, &message);
        self.orchestrator.execute(&invocation, &channel).await;
        true
    }
}
