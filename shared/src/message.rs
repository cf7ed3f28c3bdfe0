//! Incoming chat message as seen by middleware hooks and handlers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message received from any driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// The message text
    pub text: String,
    /// Driver-specific sender ID
    pub sender: String,
    /// Driver-specific addressee (bot, channel or user)
    pub recipient: String,
    /// Short name of the driver that produced the message
    pub driver: String,
    /// Extra values attached by drivers or middleware
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl IncomingMessage {
    /// Create a new message with empty extras
    pub fn new(
        text: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        driver: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            driver: driver.into(),
            extras: Map::new(),
        }
    }

    /// Attach an extra value, replacing any previous value under `key`
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Get an extra value by key
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }
}
