//! Driver capability and driver filters
//!
//! A command may be restricted to one or more drivers. Drivers are referred
//! to either by a literal name or by their Rust type; type references carry
//! the driver's short name, the same one its instances report.

use serde::{Deserialize, Serialize};
use std::any::type_name;

const DRIVER_SUFFIX: &str = "Driver";

/// A transport-specific adapter (chat platform integration)
pub trait Driver: DriverName + Send + Sync + 'static {
    /// Short name used in driver filters and returned by [`DriverName::name`].
    ///
    /// Override this to rename a driver; type references and instances
    /// both read it.
    fn short_name() -> String
    where
        Self: Sized,
    {
        normalize_driver_name(type_name::<Self>())
    }

    /// Whether the driver has the configuration it needs to run
    fn is_configured(&self) -> bool {
        true
    }
}

/// Instance-side access to a driver's short name, usable on `dyn Driver`
pub trait DriverName {
    fn name(&self) -> String;
}

impl<D: Driver> DriverName for D {
    fn name(&self) -> String {
        D::short_name()
    }
}

/// Reduce a driver type path to its short name.
///
/// Takes the last path segment and removes one trailing `Driver`, so
/// `parley::drivers::WebDriver` becomes `Web`. A type named exactly
/// `Driver` keeps its name.
pub fn normalize_driver_name(type_path: &str) -> String {
    let base = crate::short_type_name(type_path);
    match base.strip_suffix(DRIVER_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => base.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DriverRefKind {
    Name(String),
    Type { path: &'static str, name: String },
}

/// Reference to a driver by name or by type.
///
/// Type references can only be built for types implementing [`Driver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRef(DriverRefKind);

impl DriverRef {
    /// Refer to a driver by literal name; the name is used as-is
    pub fn name(name: impl Into<String>) -> Self {
        Self(DriverRefKind::Name(name.into()))
    }

    /// Refer to a driver by its type
    pub fn of<D: Driver>() -> Self {
        Self(DriverRefKind::Type {
            path: type_name::<D>(),
            name: D::short_name(),
        })
    }

    pub fn is_type(&self) -> bool {
        matches!(self.0, DriverRefKind::Type { .. })
    }

    /// Full type path for type references
    pub fn type_path(&self) -> Option<&'static str> {
        match self.0 {
            DriverRefKind::Type { path, .. } => Some(path),
            DriverRefKind::Name(_) => None,
        }
    }

    /// The name this reference contributes to a driver filter
    pub fn resolve(&self) -> String {
        match &self.0 {
            DriverRefKind::Name(name) | DriverRefKind::Type { name, .. } => name.clone(),
        }
    }
}

impl From<&str> for DriverRef {
    fn from(name: &str) -> Self {
        DriverRef::name(name)
    }
}

impl From<String> for DriverRef {
    fn from(name: String) -> Self {
        DriverRef::name(name)
    }
}

/// One or more driver references, as accepted by `Command::set_driver`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverList(pub Vec<DriverRef>);

impl DriverList {
    pub fn iter(&self) -> impl Iterator<Item = &DriverRef> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<DriverRef> for DriverList {
    fn from(driver: DriverRef) -> Self {
        DriverList(vec![driver])
    }
}

impl From<&str> for DriverList {
    fn from(name: &str) -> Self {
        DriverList(vec![DriverRef::name(name)])
    }
}

impl From<String> for DriverList {
    fn from(name: String) -> Self {
        DriverList(vec![DriverRef::name(name)])
    }
}

impl<T: Into<DriverRef>> From<Vec<T>> for DriverList {
    fn from(drivers: Vec<T>) -> Self {
        DriverList(drivers.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DriverRef>, const N: usize> From<[T; N]> for DriverList {
    fn from(drivers: [T; N]) -> Self {
        DriverList(drivers.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<DriverRef> for DriverList {
    fn from_iter<I: IntoIterator<Item = DriverRef>>(iter: I) -> Self {
        DriverList(iter.into_iter().collect())
    }
}

/// Drivers allowed to trigger a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriverFilter {
    /// A single driver name as given at construction
    Single(String),
    /// Names set through `Command::set_driver`
    Any(Vec<String>),
}

impl DriverFilter {
    /// Whether a driver with the given short name passes this filter
    pub fn allows(&self, driver: &str) -> bool {
        self.names().any(|name| name == driver)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            DriverFilter::Single(name) => std::slice::from_ref(name),
            DriverFilter::Any(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

impl From<DriverList> for DriverFilter {
    fn from(list: DriverList) -> Self {
        DriverFilter::Any(list.iter().map(DriverRef::resolve).collect())
    }
}
