// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The last-resort log [`Wrapper`].
//!
//! Library code should not log. Errors belong to the caller, who decides
//! whether to log them, retry, or give up. Occasionally that is impossible,
//! for example when a failure happens on a background thread with nobody left
//! to hand the error to. Those are the only places a [`Wrapper`] is meant for:
//!
//! 1. something bad happened,
//! 2. it was unexpected (expected errors are handled or returned),
//! 3. it is recoverable (unrecoverable errors are returned too).
//!
//! A [`Wrapper`] is a cheap, cloneable function value. The caller picks the
//! implementation, usually through configuration text (see
//! [`crate::config`]), and the library just calls [`Wrapper::log`].
//!
//! An unset wrapper is valid: calling it dispatches to the process-wide
//! default, which starts out as [`Wrapper::error_with_sentry`] and can be
//! replaced with [`set_default_wrapper`].

mod adapters;
mod context;
mod counter;
pub(crate) mod kv;
mod level;
pub mod testing;


pub use adapters::StructuredArgs;
pub use context::LogContext;
pub use counter::{Counter, counter_wrapper};
pub use level::Level;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// The function shape every wrapper implementation has.
pub type LogFn = dyn Fn(&LogContext, &str) + Send + Sync;

/// Describes which implementation a [`Wrapper`] holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WrapperKind {
    /// No implementation; calls go to the process-wide default.
    #[default]
    Unset,
    /// Discards every message.
    Nop,
    /// Writes through a `log::Log` line logger.
    Std,
    /// Emits slog records at a fixed level with fixed key/value pairs.
    Structured(StructuredArgs),
    /// Emits an error record and reports the message to Sentry.
    ErrorWithSentry,
    /// Bumps a counter, then delegates.
    Counter,
    /// Records test failures.
    Testing,
    /// Built from an arbitrary function.
    Custom,
}

/// A nil-safe logging function for unexpected-but-recoverable failures.
#[derive(Clone, Default)]
pub struct Wrapper {
    func: Option<Arc<LogFn>>,
    kind: WrapperKind,
}

static DEFAULT_WRAPPER: Lazy<ArcSwap<Wrapper>> =
    Lazy::new(|| ArcSwap::from_pointee(Wrapper::error_with_sentry()));

/// Returns a snapshot of the process-wide default wrapper.
pub fn default_wrapper() -> Wrapper {
    Wrapper::clone(&DEFAULT_WRAPPER.load())
}

/// Replaces the process-wide default wrapper, returning the previous one.
///
/// Passing an unset wrapper restores the built-in default
/// ([`Wrapper::error_with_sentry`]).
pub fn set_default_wrapper(wrapper: Wrapper) -> Wrapper {
    let wrapper = if wrapper.is_unset() {
        Wrapper::error_with_sentry()
    } else {
        wrapper
    };
    log::debug!("replacing default log wrapper with {:?}", wrapper.kind);
    let previous = DEFAULT_WRAPPER.swap(Arc::new(wrapper));
    Arc::unwrap_or_clone(previous)
}

impl Wrapper {
    /// Wrap an arbitrary function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&LogContext, &str) + Send + Sync + 'static,
    {
        Self::with_kind(WrapperKind::Custom, f)
    }

    pub(crate) fn with_kind<F>(kind: WrapperKind, f: F) -> Self
    where
        F: Fn(&LogContext, &str) + Send + Sync + 'static,
    {
        Self {
            func: Some(Arc::new(f)),
            kind,
        }
    }

    /// An unset wrapper. Same as `Wrapper::default()`.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Whether this wrapper falls through to the process-wide default.
    pub fn is_unset(&self) -> bool {
        self.func.is_none()
    }

    /// Which implementation this wrapper holds.
    pub fn kind(&self) -> &WrapperKind {
        &self.kind
    }

    /// Log `msg`.
    ///
    /// Never fails. An unset wrapper uses the process-wide default instead.
    pub fn log(&self, ctx: &LogContext, msg: &str) {
        match &self.func {
            Some(func) => func(ctx, msg),
            None => {
                let default = DEFAULT_WRAPPER.load();
                if let Some(func) = &default.func {
                    func(ctx, msg);
                }
            }
        }
    }

    /// This wrapper, or the current default if it is unset.
    pub fn resolved(&self) -> Wrapper {
        if self.is_unset() {
            default_wrapper()
        } else {
            self.clone()
        }
    }

    /// Adapt into a context-free `Fn(&str)` for APIs that only take a message.
    ///
    /// Every call uses a background [`LogContext`]. An unset wrapper is
    /// resolved against the default once, here.
    pub fn to_message_fn(&self) -> impl Fn(&str) + Send + Sync + 'static + use<> {
        let wrapper = self.resolved();
        let ctx = LogContext::background();
        move |msg: &str| wrapper.log(&ctx, msg)
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper").field("kind", &self.kind).finish()
    }
}
