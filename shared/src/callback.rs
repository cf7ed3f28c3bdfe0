//! Command callbacks

use crate::IncomingMessage;
use std::fmt;
use std::sync::Arc;

/// Signature of an inline command handler.
///
/// Receives the matched message and the parameters captured from the pattern.
pub type HandlerFn = dyn Fn(&IncomingMessage, &[String]) -> anyhow::Result<()> + Send + Sync;

/// What to run when a command matches
#[derive(Clone)]
pub enum Callback {
    /// Inline handler
    Handler(Arc<HandlerFn>),
    /// Identifier resolved by the conversation engine (e.g. `"Weather@forecast"`)
    Named(String),
}

impl Callback {
    /// Wrap a closure as an inline handler
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&IncomingMessage, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Callback::Handler(Arc::new(f))
    }

    /// Create a named callback
    pub fn named(name: impl Into<String>) -> Self {
        Callback::Named(name.into())
    }

    /// The identifier, if this is a named callback
    pub fn name(&self) -> Option<&str> {
        match self {
            Callback::Named(name) => Some(name),
            Callback::Handler(_) => None,
        }
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, Callback::Handler(_))
    }

    /// True if both refer to the same handler allocation or the same name
    pub fn same_as(&self, other: &Callback) -> bool {
        match (self, other) {
            (Callback::Handler(a), Callback::Handler(b)) => Arc::ptr_eq(a, b),
            (Callback::Named(a), Callback::Named(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Handler(_) => f.write_str("Handler(..)"),
            Callback::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl From<&str> for Callback {
    fn from(name: &str) -> Self {
        Callback::named(name)
    }
}

impl From<String> for Callback {
    fn from(name: String) -> Self {
        Callback::Named(name)
    }
}
