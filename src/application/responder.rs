//! # Response Channel
//!
//! Delivers text back to whoever sent a command. The public surface is a single
//! `send`; how replies are grouped (threaded or flat) is picked from the chat
//! surface identifier when the channel is created.

use std::sync::{Arc, Mutex};

use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;

/// Surfaces whose replies are grouped in a thread under the triggering message.
const THREADED_SURFACES: &[&str] = &["slack", "matrix"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadStrategy {
    /// Replies go into a thread rooted at the triggering message.
    Threaded,
    /// Replies go straight into the room.
    Flat,
}

impl ThreadStrategy {
    pub fn for_surface(surface: &str) -> Self {
        if THREADED_SURFACES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(surface))
        {
            ThreadStrategy::Threaded
        } else {
            ThreadStrategy::Flat
        }
    }
}

/// Reply channel for one inbound message.
pub struct ResponseChannel {
    chat: Arc<dyn ChatProvider>,
    strategy: ThreadStrategy,
    message_id: String,
    /// Stamped on first send, reused afterwards.
    thread_id: Mutex<Option<String>>,
}

impl ResponseChannel {
    pub fn for_surface(
        surface: &str,
        chat: Arc<dyn ChatProvider>,
        message: &InboundMessage,
    ) -> Self {
        Self {
            chat,
            strategy: ThreadStrategy::for_surface(surface),
            message_id: message.id.clone(),
            thread_id: Mutex::new(message.thread_id.clone()),
        }
    }

    pub fn strategy(&self) -> ThreadStrategy {
        self.strategy
    }

    /// Thread replies are currently going to, if one has been stamped.
    pub fn thread_id(&self) -> Option<String> {
        self.thread_id
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn resolve_thread(&self) -> Option<String> {
        match self.strategy {
            ThreadStrategy::Flat => None,
            ThreadStrategy::Threaded => {
                let mut guard = match self.thread_id.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                Some(
                    guard
                        .get_or_insert_with(|| self.message_id.clone())
                        .clone(),
                )
            }
        }
    }

    /// Best-effort delivery; failures are logged, never returned.
    pub async fn send(&self, text: &str) {
        let thread = self.resolve_thread();
        if let Err(e) = self.chat.send_message(text, thread.as_deref()).await {
            tracing::warn!(
                "Failed to deliver reply to {}: {}",
                self.chat.room_id(),
                e
            );
        }
    }
}
