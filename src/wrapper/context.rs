// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sentry::Hub;
use slog::Logger;
use std::fmt;
use std::sync::Arc;

/// Per-call context handed to every [`Wrapper`](super::Wrapper).
///
/// Carries the handles a backend may want to prefer over its global
/// counterpart: a request-scoped slog logger and a Sentry hub. Implementations
/// that don't care ignore it. Callers without one pass
/// [`LogContext::background`].
#[derive(Clone, Default)]
pub struct LogContext {
    logger: Option<Logger>,
    hub: Option<Arc<Hub>>,
}

impl LogContext {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Attach a structured logger.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Attach a Sentry hub.
    pub fn with_hub(mut self, hub: Arc<Hub>) -> Self {
        self.hub = Some(hub);
        self
    }

    /// The attached logger, falling back to the global logger installed by
    /// [`logging::init`](crate::logging::init).
    pub fn logger(&self) -> Logger {
        match &self.logger {
            Some(logger) => logger.clone(),
            None => crate::logging::global_logger(),
        }
    }

    /// The attached Sentry hub, if any.
    pub fn hub(&self) -> Option<&Arc<Hub>> {
        self.hub.as_ref()
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("logger", &self.logger.is_some())
            .field("hub", &self.hub.is_some())
            .finish()
    }
}
