//! # Console Service Adapter
//!
//! A `ChatProvider` on the local terminal: commands are read from stdin one per line and
//! replies are printed to stdout. Handy for trying commands without a chat account.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::router::CommandRouter;
use crate::domain::traits::ChatProvider;
use crate::domain::types::InboundMessage;

/// Surface name the console reports; replies are never threaded.
pub const CONSOLE_SURFACE: &str = "shell";

#[derive(Default)]
pub struct ConsoleService {
    sent: AtomicU64,
}

#[async_trait]
impl ChatProvider for ConsoleService {
    fn room_id(&self) -> String {
        "console".to_string()
    }

    async fn send_message(&self, content: &str, _thread_id: Option<&str>) -> Result<String, String> {
        println!("{content}");
        let id = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("console-reply-{id}"))
    }
}

/// Feeds stdin lines to `router` as `requester` until end of input.
pub async fn run(router: Arc<CommandRouter>, requester: &str) -> Result<()> {
    let chat: Arc<dyn ChatProvider> = Arc::new(ConsoleService::default());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let message = InboundMessage::new(format!("console-{line_no}"), requester, line);
        if !router.route(chat.clone(), message).await {
            println!("(not a command, try `heroku help`)");
        }
    }
    Ok(())
}
