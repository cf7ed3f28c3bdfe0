//! Middleware capability
//!
//! Middleware is invoked around command execution by the conversation
//! engine. Every hook passes its input through unchanged unless overridden.

use crate::IncomingMessage;
use anyhow::Result;
use async_trait::async_trait;
use std::any::type_name;

#[async_trait]
pub trait Middleware: Send + Sync {
    /// Human-readable name, used in command snapshots
    fn name(&self) -> String {
        crate::short_type_name(type_name::<Self>()).to_string()
    }

    /// Called for every message a driver receives
    async fn received(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        Ok(message)
    }

    /// Called when a message is captured as a conversation answer
    async fn captured(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        Ok(message)
    }

    /// Decide whether `message` matches `pattern`, given the result of the
    /// pattern match itself
    fn matching(&self, _message: &IncomingMessage, _pattern: &str, regex_matched: bool) -> bool {
        regex_matched
    }

    /// Called right before the command's callback runs
    async fn heard(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        Ok(message)
    }
}
