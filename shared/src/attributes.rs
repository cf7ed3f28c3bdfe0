//! Group attributes applied to commands at registration time

use crate::{keys, DriverList, DriverRef, Middleware};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A loosely-typed attribute value.
///
/// Setters pick out the variants they understand and ignore the rest.
#[derive(Clone)]
pub enum AttributeValue {
    Middleware(Arc<dyn Middleware>),
    Driver(DriverRef),
    Text(String),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Wrap a middleware instance
    pub fn middleware<M: Middleware + 'static>(middleware: M) -> Self {
        AttributeValue::Middleware(Arc::new(middleware))
    }

    /// The value as a sequence: lists yield their items, anything else
    /// yields itself
    pub fn into_items(self) -> Vec<AttributeValue> {
        match self {
            AttributeValue::List(items) => items,
            other => vec![other],
        }
    }

    /// Driver references contained in this value; text is read as a driver
    /// name and everything else is skipped
    pub fn into_drivers(self) -> DriverList {
        self.into_items()
            .into_iter()
            .filter_map(|item| match item {
                AttributeValue::Driver(driver) => Some(driver),
                AttributeValue::Text(name) => Some(DriverRef::name(name)),
                _ => None,
            })
            .collect()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short description used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Middleware(_) => "middleware",
            AttributeValue::Driver(_) => "driver",
            AttributeValue::Text(_) => "text",
            AttributeValue::List(_) => "list",
        }
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Middleware(mw) => f.debug_tuple("Middleware").field(&mw.name()).finish(),
            AttributeValue::Driver(driver) => f.debug_tuple("Driver").field(driver).finish(),
            AttributeValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            AttributeValue::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl From<Arc<dyn Middleware>> for AttributeValue {
    fn from(middleware: Arc<dyn Middleware>) -> Self {
        AttributeValue::Middleware(middleware)
    }
}

impl From<Vec<Arc<dyn Middleware>>> for AttributeValue {
    fn from(middleware: Vec<Arc<dyn Middleware>>) -> Self {
        AttributeValue::List(middleware.into_iter().map(AttributeValue::Middleware).collect())
    }
}

impl From<DriverRef> for AttributeValue {
    fn from(driver: DriverRef) -> Self {
        AttributeValue::Driver(driver)
    }
}

impl From<DriverList> for AttributeValue {
    fn from(drivers: DriverList) -> Self {
        AttributeValue::List(drivers.0.into_iter().map(AttributeValue::Driver).collect())
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        AttributeValue::List(items)
    }
}

/// String-keyed attributes shared by a group of commands.
///
/// Only `middleware`, `driver` and `recipient` have meaning to a command;
/// other keys are carried but ignored.
#[derive(Debug, Clone, Default)]
pub struct GroupAttributes {
    values: BTreeMap<String, AttributeValue>,
}

impl GroupAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn middleware(self, middleware: impl Into<AttributeValue>) -> Self {
        self.with(keys::MIDDLEWARE, middleware)
    }

    pub fn driver(self, drivers: impl Into<DriverList>) -> Self {
        let drivers: DriverList = drivers.into();
        self.with(keys::DRIVER, drivers)
    }

    pub fn recipient(self, recipient: impl Into<String>) -> Self {
        self.with(keys::RECIPIENT, AttributeValue::Text(recipient.into()))
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Combine outer group attributes with an inner group's.
    ///
    /// Middleware accumulates with the outer group's entries first; every
    /// other key takes the inner value.
    pub fn merge(&self, inner: &GroupAttributes) -> GroupAttributes {
        let mut merged = self.clone();

        for (key, value) in &inner.values {
            let combined = match (key.as_str(), merged.values.remove(key)) {
                (keys::MIDDLEWARE, Some(outer)) => {
                    let mut items = outer.into_items();
                    items.extend(value.clone().into_items());
                    AttributeValue::List(items)
                }
                _ => value.clone(),
            };
            merged.values.insert(key.clone(), combined);
        }

        merged
    }
}
