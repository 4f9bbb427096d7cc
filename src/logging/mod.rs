// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-level logging setup.
//!
//! Structured wrappers write through the `slog_scope` global logger unless
//! the [`LogContext`](crate::LogContext) carries one. [`init`] installs that
//! global logger from a [`LoggingConfig`] and, optionally, the process-wide
//! default wrapper. Until a global logger is installed through this module,
//! records without a context logger are discarded.

pub mod config;
pub mod structured;

#[cfg(test)]
pub(crate) mod test_logger;

pub use config::LoggingConfig;
pub use structured::{LogFormat, LoggerConfig, create_logger};

use crate::wrapper::set_default_wrapper;
use once_cell::sync::Lazy;
use slog::{Discard, Logger, o};
use slog_async::AsyncGuard;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

// slog_scope's own fallback panics on every record, so the crate tracks
// whether a global logger is installed and discards otherwise.
static GLOBAL_INSTALLED: AtomicBool = AtomicBool::new(false);

// Worker behind the logger installed by `init`.
static ASYNC_GUARD: Lazy<Mutex<Option<AsyncGuard>>> = Lazy::new(|| Mutex::new(None));

/// Keeps the global structured logger installed.
///
/// Dropping it flushes the logger's background worker and uninstalls the
/// global logger, after which records without a context logger are
/// discarded. Hold it in `main` so a panic unwinding out of `main` still
/// flushes.
pub struct LoggerGuard {
    _guard: slog_scope::GlobalLoggerGuard,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        GLOBAL_INSTALLED.store(false, Ordering::SeqCst);
        flush();
    }
}

/// Install `logger` as the global structured logger.
pub fn set_global_logger(logger: Logger) -> LoggerGuard {
    let guard = slog_scope::set_global_logger(logger);
    GLOBAL_INSTALLED.store(true, Ordering::SeqCst);
    LoggerGuard { _guard: guard }
}

/// Install the global structured logger described by `config`.
///
/// When `config.default_wrapper` is set it also becomes the process-wide
/// default wrapper.
pub fn init(config: &LoggingConfig) -> LoggerGuard {
    let (logger, worker) = create_logger(&config.to_logger_config());
    let previous = lock_worker().replace(worker);
    let guard = set_global_logger(logger);
    drop(previous);

    if !config.default_wrapper.is_unset() {
        set_default_wrapper(config.default_wrapper.clone());
    }

    guard
}

/// Write out every record queued for the logger installed by [`init`], then
/// stop its worker.
///
/// Records logged through that logger afterwards are discarded, so only call
/// this when the process is about to end.
pub fn flush() {
    let worker = lock_worker().take();
    if worker.is_some() {
        log::debug!("flushing structured log worker");
    }
    drop(worker);
}

/// The installed global logger, or a discarding one when none is installed.
pub(crate) fn global_logger() -> Logger {
    if GLOBAL_INSTALLED.load(Ordering::SeqCst) {
        slog_scope::logger()
    } else {
        Logger::root(Discard, o!())
    }
}

fn lock_worker() -> std::sync::MutexGuard<'static, Option<AsyncGuard>> {
    ASYNC_GUARD.lock().unwrap_or_else(PoisonError::into_inner)
}
