// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! logwrap - last-resort logging for library code
//!
//! Libraries should hand errors back to their callers. When that is not
//! possible (a failure on a background thread, a cleanup path with nobody to
//! report to) they still need somewhere to say so, and that somewhere should
//! be the caller's choice. [`Wrapper`] is that choice: a single nil-safe
//! logging function the caller configures and the library calls.
//!
//! # Implementations
//!
//! - [`Wrapper::nop`]: discard.
//! - [`Wrapper::std_logger`] / [`Wrapper::std_stderr`]: a plain `log::Log` line logger.
//! - [`Wrapper::structured`]: slog records at a chosen level with fixed fields.
//! - [`Wrapper::error_with_sentry`]: error-level slog record plus a Sentry event.
//!   This is the process-wide default.
//! - [`counter_wrapper`]: bump a metric, then delegate.
//! - [`testing::TestReporter`]: fail the test that triggered the call.
//!
//! # Configuration
//!
//! Wrappers parse from short strings and deserialize from config files:
//!
//! ```rust
//! use logwrap::{LogContext, Wrapper};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct ClientConfig {
//!     #[serde(default)]
//!     logger: Wrapper,
//! }
//!
//! let config: ClientConfig = serde_json::from_str(r#"{"logger": "slog:warn:component=uploader"}"#).unwrap();
//! config.logger.log(&LogContext::background(), "upload queue dropped a batch");
//! ```
//!
//! See [`config`] for the full grammar.

pub mod config;
pub mod logging;
pub mod wrapper;

pub use config::ConfigError;
pub use logging::{LoggerGuard, LoggingConfig};
pub use wrapper::{
    Counter, Level, LogContext, LogFn, StructuredArgs, Wrapper, WrapperKind, counter_wrapper,
    default_wrapper, set_default_wrapper, testing,
};
