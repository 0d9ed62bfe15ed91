#![forbid(unsafe_code)]

//! Binding configuration.
//!
//! Defaults suit most applications. Values can be overridden in code with
//! the builder methods or loaded from the environment:
//!
//! | Variable | Type | Default |
//! |----------|------|---------|
//! | `FTUI_BIND_PRUNE_THRESHOLD` | `usize` | `32` |
//! | `FTUI_BIND_TRACE_DROPS` | `1/true/yes/on`, `0/false/no/off` | off |
//!
//! [`Bindings::new`](crate::Bindings::new) uses [`BindConfig::global`], read
//! from the environment once per process.

use std::fmt;
use std::sync::OnceLock;

use tracing::warn;

/// Environment key for [`BindConfig::prune_threshold`].
pub const ENV_PRUNE_THRESHOLD: &str = "FTUI_BIND_PRUNE_THRESHOLD";
/// Environment key for [`BindConfig::trace_dropped_values`].
pub const ENV_TRACE_DROPS: &str = "FTUI_BIND_TRACE_DROPS";

const DEFAULT_PRUNE_THRESHOLD: usize = 32;

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something that does not parse.
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value '{value}' for {key}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning knobs for [`Bindings`](crate::Bindings) and
/// [`BindingSink`](crate::BindingSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindConfig {
    /// Once a `Bindings` holds this many tokens, cancelled ones are compacted
    /// out on the next insert. `0` compacts on every insert.
    pub prune_threshold: usize,
    /// Emit a `trace!` event whenever a sink drops a value because its owner
    /// is gone or its binding was cancelled.
    pub trace_dropped_values: bool,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BindConfig {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            trace_dropped_values: false,
        }
    }

    #[must_use]
    pub const fn prune_threshold(mut self, value: usize) -> Self {
        self.prune_threshold = value;
        self
    }

    #[must_use]
    pub const fn trace_dropped_values(mut self, value: bool) -> Self {
        self.trace_dropped_values = value;
        self
    }

    /// Load from the process environment. Unset variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load using a custom environment lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(value) = get_env(ENV_PRUNE_THRESHOLD) {
            config.prune_threshold = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PRUNE_THRESHOLD,
                value: value.clone(),
            })?;
        }
        if let Some(value) = get_env(ENV_TRACE_DROPS) {
            config.trace_dropped_values =
                parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_TRACE_DROPS,
                    value: value.clone(),
                })?;
        }
        Ok(config)
    }

    /// Like [`from_env_with`](Self::from_env_with), but an unparsable
    /// variable logs a warning and yields the defaults.
    pub fn from_env_or_default<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_env_with(get_env).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring binding configuration from environment");
            Self::new()
        })
    }

    /// Process-wide configuration, loaded from the environment on first use.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<BindConfig> = OnceLock::new();
        *GLOBAL.get_or_init(|| Self::from_env_or_default(|key| std::env::var(key).ok()))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
