//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! Threaded replies are sent with an `m.thread` relation rooted at the given event.

use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;
use crate::strings::logs;
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::EventId;
use matrix_sdk::ruma::events::relation::Thread;
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, Relation, RoomMessageEventContent,
};

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

/// Converts a text message event into an [`InboundMessage`]; other message types yield `None`.
pub fn inbound_from_event(event: &OriginalSyncRoomMessageEvent) -> Option<InboundMessage> {
    let MessageType::Text(text) = &event.content.msgtype else {
        return None;
    };

    let message = InboundMessage::new(
        event.event_id.as_str(),
        event.sender.as_str(),
        text.body.as_str(),
    );
    Some(match &event.content.relates_to {
        Some(Relation::Thread(thread)) => message.in_thread(thread.event_id.as_str()),
        _ => message,
    })
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str, thread_id: Option<&str>) -> Result<String, String> {
        tracing::info!("{}", logs::sending_reply(&self.room_id(), content.chars().count()));
        let mut message = RoomMessageEventContent::text_markdown(content);

        if let Some(root) = thread_id {
            let root = EventId::parse(root).map_err(|e| e.to_string())?;
            message.relates_to = Some(Relation::Thread(Thread::plain(root.clone(), root)));
        }

        self.room
            .send(message)
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }
}
