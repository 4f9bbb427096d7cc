// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the configuration module.

use std::io;
use thiserror::Error;

/// Errors that can occur while turning configuration into a wrapper.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// More than two `:` in a structured wrapper config.
    #[error("malformed log wrapper config: too many \":\": {0:?}")]
    TooManySeparators(String),

    /// A key/value pair without `=`.
    #[error("malformed log wrapper config: no \"=\" in kv pair {0:?}")]
    MissingEquals(String),

    /// The same key given twice.
    #[error("malformed log wrapper config: key {0:?} appeared at least twice")]
    DuplicateKey(String),

    /// Text that names no known wrapper.
    #[error("unsupported log wrapper config: {0:?}")]
    Unsupported(String),

    /// Raw config bytes were not UTF-8.
    #[error("log wrapper config is not valid UTF-8")]
    InvalidUtf8,

    /// A config file with an extension we can't read.
    #[error("unsupported config file format: {0}")]
    UnsupportedFileFormat(String),

    /// An IO error occurred (e.g., while reading a configuration file).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A config file that failed to deserialize.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),
}
