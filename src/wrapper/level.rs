// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Severity used by the structured wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    /// Logs at critical, then panics with the message.
    Panic,
    /// Logs at critical, then exits the process with status 1.
    Fatal,
    /// Turns the structured wrapper into a no-op.
    Disabled,
}

impl Level {
    /// Parse a level name, case-insensitively.
    ///
    /// Empty and unrecognised names map to [`Level::Info`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" | "warning" => Level::Warn,
            "error" => Level::Error,
            "panic" => Level::Panic,
            "fatal" => Level::Fatal,
            "nop" | "disabled" => Level::Disabled,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Disabled => "nop",
        }
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
