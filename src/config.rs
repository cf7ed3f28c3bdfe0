//! Bot configuration
//!
//! Defaults are usable as-is; environment variables override them:
//! - `PARLEY_BOT_NAME`
//! - `PARLEY_RECIPIENT`
//! - `PARLEY_DRIVERS` (comma separated)
//! - `PARLEY_WEB_ENDPOINT`
//! - `PARLEY_OUTPUT` (`json` or `framed`)

use anyhow::{bail, Result};
use std::fmt;

/// How command snapshots are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Length-prefixed frames
    Framed,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Framed => write!(f, "framed"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "framed" => Ok(OutputFormat::Framed),
            other => bail!("unknown output format: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Name used in logs
    pub bot_name: String,
    /// Recipient applied to the default command group
    pub recipient: Option<String>,
    /// Drivers the default command group is restricted to
    pub drivers: Vec<String>,
    /// Endpoint the web driver posts replies to
    pub web_endpoint: Option<String>,
    pub output: OutputFormat,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_name: "parley".into(),
            recipient: None,
            drivers: vec!["console".into(), "web".into()],
            web_endpoint: None,
            output: OutputFormat::Json,
        }
    }
}

impl BotConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = get("PARLEY_BOT_NAME") {
            config.bot_name = name;
        }
        if let Some(recipient) = get("PARLEY_RECIPIENT") {
            config.recipient = Some(recipient);
        }
        if let Some(drivers) = get("PARLEY_DRIVERS") {
            config.drivers = drivers
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(endpoint) = get("PARLEY_WEB_ENDPOINT") {
            config.web_endpoint = Some(endpoint);
        }
        if let Some(output) = get("PARLEY_OUTPUT") {
            config.output = output.parse()?;
        }

        Ok(config)
    }
}
