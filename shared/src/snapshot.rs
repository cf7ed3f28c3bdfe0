//! Command snapshots
//!
//! [`CommandMapping`] is what `Command::to_mapping` hands to a registry: it
//! shares the callback and middleware with the command. [`CommandRecord`] is
//! the owned, serializable form used for storage and the frame codec.

use crate::{Callback, DriverFilter, Middleware};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Snapshot of a command's exported fields
#[derive(Clone)]
pub struct CommandMapping {
    pub pattern: String,
    pub callback: Callback,
    pub driver: Option<DriverFilter>,
    pub middleware: Vec<Arc<dyn Middleware>>,
    pub recipient: Option<String>,
}

impl CommandMapping {
    /// Owned record with middleware reduced to names
    pub fn to_record(&self) -> CommandRecord {
        CommandRecord::from(self)
    }
}

impl fmt::Debug for CommandMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_record(), f)
    }
}

impl Serialize for CommandMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Serialized form of a callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackRecord {
    /// An inline handler; it cannot be serialized, only noted
    Handler,
    Named(String),
}

impl From<&Callback> for CallbackRecord {
    fn from(callback: &Callback) -> Self {
        match callback {
            Callback::Handler(_) => CallbackRecord::Handler,
            Callback::Named(name) => CallbackRecord::Named(name.clone()),
        }
    }
}

/// Owned command snapshot.
///
/// Always serializes all five keys; absent values become `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub pattern: String,
    pub callback: CallbackRecord,
    pub driver: Option<DriverFilter>,
    pub middleware: Vec<String>,
    pub recipient: Option<String>,
}

impl From<&CommandMapping> for CommandRecord {
    fn from(mapping: &CommandMapping) -> Self {
        Self {
            pattern: mapping.pattern.clone(),
            callback: CallbackRecord::from(&mapping.callback),
            driver: mapping.driver.clone(),
            middleware: mapping.middleware.iter().map(|mw| mw.name()).collect(),
            recipient: mapping.recipient.clone(),
        }
    }
}
