//! Parley Shared Command Types
//!
//! This crate provides the command definition that chatbot registries hold,
//! the driver and middleware capability contracts it relies on, and the
//! codec used to store command snapshots.

pub mod attributes;
pub mod callback;
pub mod codec;
pub mod command;
pub mod driver;
pub mod message;
pub mod middleware;
pub mod snapshot;

// Re-export commonly used types at crate root
pub use attributes::{AttributeValue, GroupAttributes};
pub use callback::{Callback, HandlerFn};
pub use command::{Command, ConversationDirective};
pub use driver::{normalize_driver_name, Driver, DriverFilter, DriverList, DriverName, DriverRef};
pub use message::IncomingMessage;
pub use middleware::Middleware;
pub use snapshot::{CallbackRecord, CommandMapping, CommandRecord};

/// Attribute keys recognized when group attributes are applied to a command
pub mod keys {
    /// Middleware to prepend to every command in the group
    pub const MIDDLEWARE: &str = "middleware";

    /// Driver filter for every command in the group
    pub const DRIVER: &str = "driver";

    /// Recipient for every command in the group
    pub const RECIPIENT: &str = "recipient";
}

/// Last path segment of a Rust type path, ignoring generic arguments.
///
/// `type_name` output is not guaranteed stable, so this is only used to
/// derive human-readable names.
pub(crate) fn short_type_name(type_path: &str) -> &str {
    let base = type_path.split('<').next().unwrap_or(type_path);
    base.rsplit(&[':', '\\', '/'][..])
        .find(|segment| !segment.is_empty())
        .unwrap_or(base)
}
