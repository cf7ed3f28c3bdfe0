//! Middleware that trims incoming text

use anyhow::Result;
use async_trait::async_trait;
use parley_shared::{IncomingMessage, Middleware};

/// Strips leading and trailing whitespace before patterns are matched
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimMiddleware;

#[async_trait]
impl Middleware for TrimMiddleware {
    fn name(&self) -> String {
        "trim".into()
    }

    async fn received(&self, mut message: IncomingMessage) -> Result<IncomingMessage> {
        let trimmed = message.text.trim();
        if trimmed.len() != message.text.len() {
            message.text = trimmed.to_string();
        }
        Ok(message)
    }
}
