//! Web driver for HTTP widget integrations

use parley_shared::Driver;

/// Receives messages over HTTP and posts replies to an endpoint
#[derive(Debug, Clone, Default)]
pub struct WebDriver {
    endpoint: Option<String>,
}

impl WebDriver {
    pub fn new(endpoint: Option<String>) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl Driver for WebDriver {
    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}
