//! Command registry with attribute groups

use parley_shared::{Callback, Command, CommandMapping, GroupAttributes};
use tracing::debug;

/// Owns the registered commands.
///
/// Commands registered inside [`CommandRegistry::group`] receive the
/// group's attributes. No matching happens here.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    /// Merged attributes of every open group, innermost last
    groups: Vec<GroupAttributes>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command for `pattern`
    pub fn hears(
        &mut self,
        pattern: impl Into<String>,
        callback: impl Into<Callback>,
    ) -> &mut Command {
        self.hears_for(pattern, callback, None)
    }

    /// Register a command for `pattern` addressed to `recipient`.
    ///
    /// A recipient set by an enclosing group takes precedence.
    pub fn hears_for(
        &mut self,
        pattern: impl Into<String>,
        callback: impl Into<Callback>,
        recipient: Option<String>,
    ) -> &mut Command {
        let mut command = Command::with_target(pattern, callback, recipient, None);
        if let Some(attributes) = self.groups.last() {
            command.apply_group_attributes(attributes);
        }

        debug!(
            "Registered command {:?} (group depth {})",
            command.pattern(),
            self.groups.len()
        );

        let index = self.commands.len();
        self.commands.push(command);
        &mut self.commands[index]
    }

    /// Register commands that share `attributes`.
    ///
    /// Groups nest: inner attributes are merged onto the outer ones for the
    /// duration of `register`.
    pub fn group<F>(&mut self, attributes: GroupAttributes, register: F)
    where
        F: FnOnce(&mut Self),
    {
        let merged = match self.groups.last() {
            Some(outer) => outer.merge(&attributes),
            None => attributes,
        };

        self.groups.push(merged);
        register(self);
        self.groups.pop();
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Snapshots of every command, in registration order
    pub fn snapshots(&self) -> Vec<CommandMapping> {
        self.commands.iter().map(Command::to_mapping).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{ConsoleDriver, WebDriver};
    use crate::middleware::{TraceMiddleware, TrimMiddleware};
    use parley_shared::{AttributeValue, DriverFilter, DriverRef};

    fn middleware_names(command: &Command) -> Vec<String> {
        command.middleware().iter().map(|mw| mw.name()).collect()
    }

    #[test]
    fn test_hears_outside_group() {
        let mut registry = CommandRegistry::new();
        assert!(registry.is_empty());

        registry.hears("hello", "Greeter@hello");
        registry.hears_for("ping", "Health@ping", Some("ops".into()));

        assert_eq!(registry.len(), 2);
        let ping = &registry.commands()[1];
        assert_eq!(ping.recipient(), Some("ops"));
        assert!(ping.driver_filter().is_none());
        assert!(ping.middleware().is_empty());
    }

    #[test]
    fn test_hears_returns_command_for_chaining() {
        let mut registry = CommandRegistry::new();
        registry.hears("stop", "Bot@stop").mark_stops_conversation();

        assert!(registry.commands()[0].should_stop_conversation());
    }

    #[test]
    fn test_group_applies_attributes() {
        let mut registry = CommandRegistry::new();
        let attributes = GroupAttributes::new()
            .driver(DriverRef::of::<WebDriver>())
            .middleware(AttributeValue::middleware(TrimMiddleware))
            .recipient("support");

        registry.group(attributes, |r| {
            r.hears_for("help", "Support@help", Some("ignored".into()));
        });
        registry.hears("outside", "Bot@outside");

        let help = &registry.commands()[0];
        assert_eq!(help.recipient(), Some("support"));
        assert_eq!(help.driver_filter(), Some(&DriverFilter::Any(vec!["Web".into()])));
        assert_eq!(middleware_names(help), vec!["trim"]);

        // Group attributes do not leak past the group
        let outside = &registry.commands()[1];
        assert!(outside.recipient().is_none());
        assert!(outside.driver_filter().is_none());
        assert!(outside.middleware().is_empty());
    }

    #[test]
    fn test_nested_groups_merge() {
        let mut registry = CommandRegistry::new();
        let outer = GroupAttributes::new()
            .driver(DriverRef::of::<ConsoleDriver>())
            .middleware(AttributeValue::middleware(TraceMiddleware::default()));
        let inner = GroupAttributes::new()
            .middleware(AttributeValue::middleware(TrimMiddleware))
            .driver(vec![DriverRef::of::<WebDriver>(), DriverRef::name("slack")]);

        registry.group(outer, |r| {
            r.hears("outer", "Bot@outer");
            r.group(inner, |r| {
                r.hears("inner", "Bot@inner");
            });
            r.hears("outer-again", "Bot@outerAgain");
        });

        let commands = registry.commands();
        assert_eq!(middleware_names(&commands[0]), vec!["trace"]);
        assert_eq!(
            commands[0].driver_filter(),
            Some(&DriverFilter::Any(vec!["Console".into()]))
        );

        assert_eq!(middleware_names(&commands[1]), vec!["trace", "trim"]);
        assert_eq!(
            commands[1].driver_filter(),
            Some(&DriverFilter::Any(vec!["Web".into(), "slack".into()]))
        );

        assert_eq!(middleware_names(&commands[2]), vec!["trace"]);
    }

    #[test]
    fn test_command_middleware_is_prepended_to_group_middleware() {
        let mut registry = CommandRegistry::new();
        registry.group(
            GroupAttributes::new().middleware(AttributeValue::middleware(TrimMiddleware)),
            |r| {
                r.hears("hi", "Bot@hi")
                    .set_middleware(AttributeValue::middleware(TraceMiddleware::new("cmd")));
            },
        );

        assert_eq!(middleware_names(&registry.commands()[0]), vec!["cmd", "trim"]);
    }

    #[test]
    fn test_snapshots_in_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.hears("a", "Bot@a");
        registry.hears("b", Callback::handler(|_, _| Ok(())));

        let patterns: Vec<String> = registry
            .snapshots()
            .into_iter()
            .map(|mapping| mapping.pattern)
            .collect();
        assert_eq!(patterns, vec!["a", "b"]);
    }
}
