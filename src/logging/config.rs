// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for logging.

use crate::config::{ConfigError, load_file};
use crate::logging::structured::{LogFormat, LoggerConfig};
use crate::wrapper::Wrapper;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format (terminal or json)
    #[serde(default = "default_format")]
    pub format: String,

    /// Log level
    #[serde(default = "default_level")]
    pub level: String,

    /// Static fields to include in all logs
    #[serde(default)]
    pub static_fields: BTreeMap<String, String>,

    /// Process-wide default wrapper, in wrapper config syntax.
    /// Left unset, the built-in default stays in place.
    #[serde(default)]
    pub default_wrapper: Wrapper,
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            level: default_level(),
            static_fields: BTreeMap::new(),
            default_wrapper: Wrapper::unset(),
        }
    }
}

impl LoggingConfig {
    /// Load from a JSON, TOML or YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_file(path)
    }

    /// Convert to logger config
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: match self.format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Terminal,
            },
            level: match self.level.to_lowercase().as_str() {
                "trace" => slog::Level::Trace,
                "debug" => slog::Level::Debug,
                "info" => slog::Level::Info,
                "warn" | "warning" => slog::Level::Warning,
                "error" => slog::Level::Error,
                "critical" => slog::Level::Critical,
                _ => slog::Level::Info,
            },
            static_fields: self.static_fields.clone(),
        }
    }
}
