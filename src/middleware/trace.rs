//! Middleware that logs every hook it sees

use anyhow::Result;
use async_trait::async_trait;
use parley_shared::{IncomingMessage, Middleware};
use tracing::{debug, trace};

/// Logs messages passing through the conversation engine
#[derive(Debug, Clone)]
pub struct TraceMiddleware {
    label: String,
}

impl TraceMiddleware {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        Self::new("trace")
    }
}

#[async_trait]
impl Middleware for TraceMiddleware {
    fn name(&self) -> String {
        self.label.clone()
    }

    async fn received(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        debug!(
            "[{}] received from {} via {}: {:?}",
            self.label, message.sender, message.driver, message.text
        );
        Ok(message)
    }

    async fn captured(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        debug!("[{}] captured answer from {}", self.label, message.sender);
        Ok(message)
    }

    fn matching(&self, message: &IncomingMessage, pattern: &str, regex_matched: bool) -> bool {
        trace!(
            "[{}] {:?} against {:?}: {}",
            self.label,
            message.text,
            pattern,
            regex_matched
        );
        regex_matched
    }

    async fn heard(&self, message: IncomingMessage) -> Result<IncomingMessage> {
        debug!("[{}] heard {:?}", self.label, message.text);
        Ok(message)
    }
}
