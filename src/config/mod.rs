// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Text configuration for [`Wrapper`].
//!
//! A wrapper can be written as a short string, so it can sit directly in a
//! YAML, JSON or TOML config file:
//!
//! | text | wrapper |
//! |------|---------|
//! | *empty* | the current process-wide default |
//! | `nop` | [`Wrapper::nop`] |
//! | `std` | [`Wrapper::std_stderr`] |
//! | `slog` | [`Wrapper::structured`] at info, no pairs |
//! | `slog:<level>` | [`Wrapper::structured`] at `<level>`, no pairs |
//! | `slog:<level>:k1=v1,k2=v2` | [`Wrapper::structured`] at `<level>` with pairs |
//! | `sentry` | [`Wrapper::error_with_sentry`] |
//!
//! `zap` is accepted anywhere `slog` is. Keywords are case-sensitive, level
//! names are not, and an unknown level means info. Values may contain `=`;
//! only the first one in a pair separates key from value.
//!
//! Counter wrappers have no text form. Wrap the parsed value at startup with
//! [`crate::counter_wrapper`].

pub mod error;
mod file;


pub use error::ConfigError;
pub use file::{FileFormat, load_file};

use crate::wrapper::{Level, StructuredArgs, Wrapper, default_wrapper};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Keyword selecting the structured (slog) wrapper.
pub const STRUCTURED_KEYWORD: &str = "slog";

/// Older name for [`STRUCTURED_KEYWORD`], still accepted.
pub const STRUCTURED_ALIAS: &str = "zap";

/// Parse wrapper config text.
pub fn parse(text: &str) -> Result<Wrapper, ConfigError> {
    let wrapper = match structured_suffix(text) {
        Some(rest) => parse_structured(text, rest)?,
        None => match text {
            "" => default_wrapper(),
            "nop" => Wrapper::nop(),
            "std" => Wrapper::std_stderr(),
            STRUCTURED_KEYWORD | STRUCTURED_ALIAS => Wrapper::structured(StructuredArgs::default()),
            "sentry" => Wrapper::error_with_sentry(),
            other => return Err(ConfigError::Unsupported(other.to_string())),
        },
    };
    log::debug!("parsed log wrapper config {:?} as {:?}", text, wrapper.kind());
    Ok(wrapper)
}

/// The part after `slog:` or `zap:`, if `text` has either prefix.
fn structured_suffix(text: &str) -> Option<&str> {
    [STRUCTURED_KEYWORD, STRUCTURED_ALIAS]
        .iter()
        .find_map(|keyword| text.strip_prefix(keyword)?.strip_prefix(':'))
}

fn parse_structured(text: &str, rest: &str) -> Result<Wrapper, ConfigError> {
    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() > 2 {
        return Err(ConfigError::TooManySeparators(text.to_string()));
    }

    let mut args = StructuredArgs::new(Level::parse_lenient(parts[0]));
    if let Some(pairs) = parts.get(1) {
        args.pairs = parse_pairs(pairs)?;
    }
    Ok(Wrapper::structured(args))
}

fn parse_pairs(text: &str) -> Result<BTreeMap<String, Value>, ConfigError> {
    let mut pairs: BTreeMap<String, Value> = BTreeMap::new();
    for pair in text.split(',') {
        let pair = pair.trim();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::MissingEquals(pair.to_string()))?;
        if pairs.contains_key(key) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
        pairs.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(pairs)
}

impl Wrapper {
    /// Parse wrapper config from raw bytes, which must be UTF-8.
    pub fn from_text(text: &[u8]) -> Result<Self, ConfigError> {
        let text = std::str::from_utf8(text).map_err(|_| ConfigError::InvalidUtf8)?;
        parse(text)
    }
}

impl FromStr for Wrapper {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl<'de> Deserialize<'de> for Wrapper {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}
