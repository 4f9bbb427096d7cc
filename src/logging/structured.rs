// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building the slog logger that structured wrappers write through.

use crate::wrapper::kv::KvPairs;
use serde_json::Value;
use slog::{Drain, Logger, o};
use slog_async::{Async, AsyncGuard};
use slog_json::Json;
use slog_term::{FullFormat, TermDecorator};
use std::collections::BTreeMap;
use std::io;

/// Structured logging format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable terminal output
    Terminal,
    /// JSON formatted output
    Json,
}

/// Structured logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Output format (Terminal or JSON)
    pub format: LogFormat,
    /// Minimum level that reaches the output
    pub level: slog::Level,
    /// Key-value pairs included in every record
    pub static_fields: BTreeMap<String, String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            level: slog::Level::Info,
            static_fields: BTreeMap::new(),
        }
    }
}

/// Create a structured logger with the given configuration.
///
/// Records are written by a background worker. Dropping the returned
/// [`AsyncGuard`] flushes every queued record and stops the worker; records
/// logged through the logger after that are discarded.
pub fn create_logger(config: &LoggerConfig) -> (Logger, AsyncGuard) {
    let (drain, guard) = match config.format {
        LogFormat::Terminal => {
            let decorator = TermDecorator::new().build();
            let drain = FullFormat::new(decorator).build().fuse();
            let drain = drain.filter_level(config.level).fuse();
            Async::new(drain).build_with_guard()
        }
        LogFormat::Json => {
            let drain = Json::new(io::stdout())
                .add_default_keys()
                .set_flush(true)
                .build()
                .fuse();
            let drain = drain.filter_level(config.level).fuse();
            Async::new(drain).build_with_guard()
        }
    };
    let logger = Logger::root(drain.ignore_res(), o!());
    (with_static_fields(&logger, &config.static_fields), guard)
}

/// A child of `logger` carrying `fields` on every record.
pub fn with_static_fields(logger: &Logger, fields: &BTreeMap<String, String>) -> Logger {
    if fields.is_empty() {
        return logger.clone();
    }
    let fields: BTreeMap<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    logger.new(slog::OwnedKV(KvPairs::new(&fields)))
}
