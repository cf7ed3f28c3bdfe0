//! Command definition
//!
//! A [`Command`] pairs a message pattern with the callback to run when it
//! matches, together with the restrictions and middleware the conversation
//! engine applies around it. Matching and execution happen elsewhere; this
//! type only holds the registration.

use crate::{
    keys, AttributeValue, Callback, CommandMapping, DriverFilter, DriverList, GroupAttributes,
    Middleware,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// How a matched command should interact with a running conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationDirective {
    /// End the conversation before running the command
    Stop,
    /// Run the command without touching the conversation
    Skip,
    /// Let the conversation handle the message
    Continue,
}

/// A chatbot command registration
#[derive(Clone)]
pub struct Command {
    pattern: String,
    callback: Callback,
    recipient: Option<String>,
    driver: Option<DriverFilter>,
    middleware: Vec<Arc<dyn Middleware>>,
    stops_conversation: bool,
    skips_conversation: bool,
}

impl Command {
    /// Create a command for any recipient and driver
    pub fn new(pattern: impl Into<String>, callback: impl Into<Callback>) -> Self {
        Self::with_target(pattern, callback, None, None)
    }

    /// Create a command scoped to a recipient and/or driver.
    ///
    /// The driver name is stored as given.
    pub fn with_target(
        pattern: impl Into<String>,
        callback: impl Into<Callback>,
        recipient: Option<String>,
        driver: Option<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            callback: callback.into(),
            recipient,
            driver: driver.map(DriverFilter::Single),
            middleware: Vec::new(),
            stops_conversation: false,
            skips_conversation: false,
        }
    }

    /// Apply attributes inherited from a command group.
    ///
    /// Only the `middleware`, `driver` and `recipient` keys are read. A
    /// recipient that is not text is ignored, as is a driver value naming no
    /// drivers.
    pub fn apply_group_attributes(&mut self, attributes: &GroupAttributes) {
        if attributes.is_empty() {
            return;
        }

        debug!(
            pattern = %self.pattern,
            keys = ?attributes.keys().collect::<Vec<_>>(),
            "Applying group attributes"
        );

        if let Some(middleware) = attributes.get(keys::MIDDLEWARE) {
            self.set_middleware(middleware.clone());
        }

        if let Some(driver) = attributes.get(keys::DRIVER) {
            let drivers = driver.clone().into_drivers();
            if drivers.is_empty() {
                trace!(kind = driver.kind(), "Ignoring driver attribute without drivers");
            } else {
                self.set_driver(drivers);
            }
        }

        if let Some(recipient) = attributes.get(keys::RECIPIENT) {
            match recipient.as_text() {
                Some(text) => {
                    self.set_recipient(text);
                }
                None => trace!(kind = recipient.kind(), "Ignoring non-text recipient"),
            }
        }
    }

    /// Restrict the command to one or more drivers.
    ///
    /// Driver type references are reduced to their short name; literal
    /// names are kept as-is. Replaces any previous filter.
    pub fn set_driver(&mut self, drivers: impl Into<DriverList>) -> &mut Self {
        let drivers: DriverList = drivers.into();
        self.driver = Some(DriverFilter::from(drivers));
        self
    }

    /// Mark that a running conversation should be stopped by this command
    pub fn mark_stops_conversation(&mut self) -> &mut Self {
        self.stops_conversation = true;
        self
    }

    pub fn should_stop_conversation(&self) -> bool {
        self.stops_conversation
    }

    /// Mark that a running conversation should be skipped by this command
    pub fn mark_skips_conversation(&mut self) -> &mut Self {
        self.skips_conversation = true;
        self
    }

    pub fn should_skip_conversation(&self) -> bool {
        self.skips_conversation
    }

    /// Both conversation flags folded into one directive; stopping wins
    pub fn conversation_directive(&self) -> ConversationDirective {
        if self.stops_conversation {
            ConversationDirective::Stop
        } else if self.skips_conversation {
            ConversationDirective::Skip
        } else {
            ConversationDirective::Continue
        }
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) -> &mut Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Prepend middleware to the command.
    ///
    /// A single value is treated as a one-element list. Values that are not
    /// middleware are dropped; the rest keep their order and go in front of
    /// the middleware already registered. Duplicates are kept.
    pub fn set_middleware(&mut self, middleware: impl Into<AttributeValue>) -> &mut Self {
        let value: AttributeValue = middleware.into();
        let mut merged: Vec<Arc<dyn Middleware>> = value
            .into_items()
            .into_iter()
            .filter_map(|item| match item {
                AttributeValue::Middleware(mw) => Some(mw),
                other => {
                    trace!(kind = other.kind(), "Dropping value that is not middleware");
                    None
                }
            })
            .collect();

        merged.append(&mut self.middleware);
        self.middleware = merged;
        self
    }

    /// Snapshot of the exported fields
    pub fn to_mapping(&self) -> CommandMapping {
        CommandMapping {
            pattern: self.pattern.clone(),
            callback: self.callback.clone(),
            driver: self.driver.clone(),
            middleware: self.middleware.clone(),
            recipient: self.recipient.clone(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn driver_filter(&self) -> Option<&DriverFilter> {
        self.driver.as_ref()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("pattern", &self.pattern)
            .field("callback", &self.callback)
            .field("recipient", &self.recipient)
            .field("driver", &self.driver)
            .field(
                "middleware",
                &self.middleware.iter().map(|mw| mw.name()).collect::<Vec<_>>(),
            )
            .field("stops_conversation", &self.stops_conversation)
            .field("skips_conversation", &self.skips_conversation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Driver, DriverRef};
    use serde_json::json;

    struct Auth;
    impl Middleware for Auth {}

    struct Audit;
    impl Middleware for Audit {}

    struct TelegramDriver;
    impl Driver for TelegramDriver {}

    fn names(command: &Command) -> Vec<String> {
        command.middleware().iter().map(|mw| mw.name()).collect()
    }

    #[test]
    fn test_new_command_mapping() {
        let command = Command::new("hello", Callback::handler(|_, _| Ok(())));
        let json = serde_json::to_value(command.to_mapping()).unwrap();

        assert_eq!(
            json,
            json!({
                "pattern": "hello",
                "callback": "handler",
                "driver": null,
                "middleware": [],
                "recipient": null,
            })
        );
        assert!(command.to_mapping().callback.same_as(command.callback()));
    }

    #[test]
    fn test_with_target_keeps_driver_literal() {
        let command = Command::with_target(
            "hi",
            "Greeter@hi",
            Some("ops".into()),
            Some("TelegramDriver".into()),
        );

        assert_eq!(command.recipient(), Some("ops"));
        assert_eq!(
            command.driver_filter(),
            Some(&DriverFilter::Single("TelegramDriver".into()))
        );
        assert_eq!(command.callback().name(), Some("Greeter@hi"));
    }

    #[test]
    fn test_conversation_flags_are_independent() {
        let mut command = Command::new("stop", "Bot@stop");
        assert_eq!(command.conversation_directive(), ConversationDirective::Continue);

        command.mark_stops_conversation();
        assert!(command.should_stop_conversation());
        assert!(!command.should_skip_conversation());
        assert_eq!(command.conversation_directive(), ConversationDirective::Stop);

        let mut skipper = Command::new("skip", "Bot@skip");
        skipper.mark_skips_conversation();
        assert!(skipper.should_skip_conversation());
        assert!(!skipper.should_stop_conversation());
        assert_eq!(skipper.conversation_directive(), ConversationDirective::Skip);

        skipper.mark_stops_conversation();
        assert_eq!(skipper.conversation_directive(), ConversationDirective::Stop);
    }

    #[test]
    fn test_set_driver_normalizes_types_only() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_driver([DriverRef::of::<TelegramDriver>(), DriverRef::name("web")]);
        assert_eq!(
            command.driver_filter(),
            Some(&DriverFilter::Any(vec!["Telegram".into(), "web".into()]))
        );

        command.set_driver("SlackDriver");
        assert_eq!(
            command.driver_filter(),
            Some(&DriverFilter::Any(vec!["SlackDriver".into()]))
        );
    }

    #[test]
    fn test_set_middleware_filters_and_prepends() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_middleware(AttributeValue::middleware(Audit));
        command.set_middleware(vec![
            AttributeValue::middleware(Auth),
            AttributeValue::from("not middleware"),
            DriverRef::name("web").into(),
            AttributeValue::middleware(Audit),
        ]);

        assert_eq!(names(&command), vec!["Auth", "Audit", "Audit"]);
    }

    #[test]
    fn test_set_middleware_non_list_non_middleware_is_noop() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_middleware("auth");
        assert!(command.middleware().is_empty());
    }

    #[test]
    fn test_set_middleware_keeps_duplicates_across_calls() {
        let auth: Arc<dyn Middleware> = Arc::new(Auth);
        let mut command = Command::new("hi", "Bot@hi");
        command.set_middleware(vec![auth.clone()]);
        command.set_middleware(vec![auth.clone()]);

        assert_eq!(command.middleware().len(), 2);
        assert!(Arc::ptr_eq(&command.middleware()[0], &auth));
        assert!(Arc::ptr_eq(&command.middleware()[1], &auth));
    }

    #[test]
    fn test_apply_group_attributes_without_known_keys_is_noop() {
        let mut command = Command::with_target("hi", "Bot@hi", Some("me".into()), None);
        let attrs = GroupAttributes::new().with("prefix", "!").with("name", "greetings");
        command.apply_group_attributes(&attrs);

        assert_eq!(command.recipient(), Some("me"));
        assert!(command.driver_filter().is_none());
        assert!(command.middleware().is_empty());
    }

    #[test]
    fn test_apply_group_attributes() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_middleware(AttributeValue::middleware(Audit));

        let attrs = GroupAttributes::new()
            .middleware(AttributeValue::middleware(Auth))
            .driver(DriverRef::of::<TelegramDriver>())
            .recipient("ops");
        command.apply_group_attributes(&attrs);

        assert_eq!(names(&command), vec!["Auth", "Audit"]);
        assert_eq!(
            command.driver_filter(),
            Some(&DriverFilter::Any(vec!["Telegram".into()]))
        );
        assert_eq!(command.recipient(), Some("ops"));
    }

    #[test]
    fn test_apply_group_attributes_keeps_filter_when_driver_value_has_no_drivers() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_driver("web");

        let attrs = GroupAttributes::new().with("driver", AttributeValue::middleware(Auth));
        command.apply_group_attributes(&attrs);
        assert_eq!(
            command.driver_filter(),
            Some(&DriverFilter::Any(vec!["web".into()]))
        );

        let mut unrestricted = Command::new("bye", "Bot@bye");
        let empty = GroupAttributes::new().with("driver", AttributeValue::List(vec![]));
        unrestricted.apply_group_attributes(&empty);
        assert!(unrestricted.driver_filter().is_none());
    }

    #[test]
    fn test_apply_group_attributes_ignores_non_text_recipient() {
        let mut command = Command::with_target("hi", "Bot@hi", Some("me".into()), None);
        let attrs = GroupAttributes::new().with("recipient", AttributeValue::middleware(Auth));
        command.apply_group_attributes(&attrs);

        assert_eq!(command.recipient(), Some("me"));
    }

    #[test]
    fn test_fluent_chaining() {
        let mut command = Command::new("weather in {city}", "Weather@city");
        command
            .set_recipient("weather-bot")
            .set_driver("web")
            .set_middleware(AttributeValue::middleware(Auth))
            .mark_skips_conversation();

        let json = serde_json::to_value(command.to_mapping()).unwrap();
        assert_eq!(json["recipient"], "weather-bot");
        assert_eq!(json["driver"], json!(["web"]));
        assert_eq!(json["middleware"], json!(["Auth"]));
        assert_eq!(json["callback"], json!({ "named": "Weather@city" }));
        assert!(command.should_skip_conversation());
    }

    #[test]
    fn test_mapping_always_has_five_keys() {
        let mut command = Command::new("hi", "Bot@hi");
        let count = |c: &Command| {
            serde_json::to_value(c.to_mapping())
                .unwrap()
                .as_object()
                .map(|o| o.len())
        };

        assert_eq!(count(&command), Some(5));
        command.set_recipient("ops").set_driver("web").mark_stops_conversation();
        assert_eq!(count(&command), Some(5));
    }

    #[test]
    fn test_debug_lists_middleware_names() {
        let mut command = Command::new("hi", "Bot@hi");
        command.set_middleware(AttributeValue::middleware(Auth));
        let debug = format!("{:?}", command);
        assert!(debug.contains("[\"Auth\"]"));
    }
}
