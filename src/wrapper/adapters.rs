// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wrapper implementations backed by external logging libraries.

use super::kv::KvPairs;
use super::{Level, Wrapper, WrapperKind};
use serde_json::Value;
use slog::Logger;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

const LOG_TARGET: &str = "logwrap";

/// Arguments for [`Wrapper::structured`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredArgs {
    /// Level every record is emitted at.
    pub level: Level,
    /// Pairs attached to every record.
    pub pairs: BTreeMap<String, Value>,
}

impl StructuredArgs {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            pairs: BTreeMap::new(),
        }
    }

    /// Add a key/value pair.
    pub fn with_pair(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.pairs.insert(key.into(), value.into());
        self
    }
}

/// The message handed to Sentry as an error value.
#[derive(Debug, Error)]
#[error("{0}")]
struct LoggedMessage(String);

impl Wrapper {
    /// A wrapper that discards everything.
    pub fn nop() -> Self {
        Self::with_kind(WrapperKind::Nop, |_, _| {})
    }

    /// Write messages through a `log::Log` implementation, at info.
    ///
    /// `None` gives [`Wrapper::nop`].
    pub fn std_logger(logger: Option<Arc<dyn log::Log>>) -> Self {
        let Some(logger) = logger else {
            return Self::nop();
        };
        Self::with_kind(WrapperKind::Std, move |_, msg| {
            logger.log(
                &log::Record::builder()
                    .args(format_args!("{msg}"))
                    .level(log::Level::Info)
                    .target(LOG_TARGET)
                    .build(),
            );
        })
    }

    /// A [`Wrapper::std_logger`] writing timestamped lines to stderr.
    ///
    /// The underlying `env_logger` is private to the wrapper and is not
    /// installed as the global `log` logger.
    pub fn std_stderr() -> Self {
        let logger = env_logger::Builder::new()
            .target(env_logger::Target::Stderr)
            .filter_level(log::LevelFilter::Trace)
            .format_timestamp_secs()
            .build();
        let logger: Arc<dyn log::Log> = Arc::new(logger);
        Self::std_logger(Some(logger))
    }

    /// Emit slog records at `args.level` with `args.pairs` attached.
    ///
    /// The logger comes from the [`LogContext`](super::LogContext), or the
    /// global logger when the context has none. [`Level::Disabled`] gives
    /// [`Wrapper::nop`].
    ///
    /// [`Level::Fatal`] flushes the logger installed by
    /// [`logging::init`](crate::logging::init) before exiting.
    /// [`Level::Panic`] relies on the [`LoggerGuard`](crate::LoggerGuard)
    /// being dropped while the panic unwinds.
    pub fn structured(args: StructuredArgs) -> Self {
        let level = args.level;
        if level == Level::Disabled {
            return Self::nop();
        }

        let pairs = KvPairs::new(&args.pairs);
        Self::with_kind(WrapperKind::Structured(args), move |ctx, msg| {
            let mut logger = ctx.logger();
            if !pairs.is_empty() {
                logger = logger.new(slog::OwnedKV(pairs.clone()));
            }
            emit(&logger, level, msg);
        })
    }

    /// Log at error through slog, then report the message to Sentry.
    ///
    /// The context's hub is used when present, otherwise the current hub.
    /// Without a configured Sentry client this is just an error-level
    /// [`Wrapper::structured`].
    ///
    /// Don't hand this to anything that logs routine network I/O errors;
    /// every call becomes a Sentry event.
    pub fn error_with_sentry() -> Self {
        Self::with_kind(WrapperKind::ErrorWithSentry, |ctx, msg| {
            slog::error!(ctx.logger(), "{}", msg);

            let err = LoggedMessage(msg.to_owned());
            match ctx.hub() {
                Some(hub) => {
                    hub.capture_error(&err);
                }
                None => {
                    sentry::capture_error(&err);
                }
            }
        })
    }
}

fn emit(logger: &Logger, level: Level, msg: &str) {
    match level {
        Level::Debug => slog::debug!(logger, "{}", msg),
        Level::Info => slog::info!(logger, "{}", msg),
        Level::Warn => slog::warn!(logger, "{}", msg),
        Level::Error => slog::error!(logger, "{}", msg),
        Level::Panic => {
            slog::crit!(logger, "{}", msg);
            panic!("{msg}");
        }
        Level::Fatal => {
            slog::crit!(logger, "{}", msg);
            // `exit` skips destructors, so the async worker never drains on its own.
            crate::logging::flush();
            std::process::exit(1);
        }
        Level::Disabled => {}
    }
}
