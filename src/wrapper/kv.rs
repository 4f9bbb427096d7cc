// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static key/value pairs attached to structured records.

use once_cell::sync::Lazy;
use serde_json::Value;
use slog::{KV, Key, Record, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

// slog keys are `&'static str`. Config keys are leaked once per distinct name
// so re-parsing the same config does not grow memory.
static KEYS: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(|| Mutex::new(HashSet::new()));

fn intern(key: &str) -> &'static str {
    let mut keys = KEYS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(interned) = keys.get(key) {
        return *interned;
    }
    let leaked: &'static str = Box::leak(key.to_owned().into_boxed_str());
    keys.insert(leaked);
    leaked
}

/// Pairs ready to be serialized by slog, in key order.
#[derive(Clone)]
pub(crate) struct KvPairs(Arc<[(Key, Value)]>);

impl KvPairs {
    pub(crate) fn new(pairs: &BTreeMap<String, Value>) -> Self {
        Self(
            pairs
                .iter()
                .map(|(key, value)| (intern(key), value.clone()))
                .collect(),
        )
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn serialize_into(&self, serializer: &mut dyn Serializer) -> slog::Result {
        for (key, value) in self.0.iter() {
            emit_value(serializer, *key, value)?;
        }
        Ok(())
    }
}

impl KV for KvPairs {
    fn serialize(&self, _record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        self.serialize_into(serializer)
    }
}

fn emit_value(serializer: &mut dyn Serializer, key: Key, value: &Value) -> slog::Result {
    match value {
        Value::Null => serializer.emit_none(key),
        Value::Bool(b) => serializer.emit_bool(key, *b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serializer.emit_i64(key, i)
            } else if let Some(u) = n.as_u64() {
                serializer.emit_u64(key, u)
            } else {
                serializer.emit_f64(key, n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => serializer.emit_str(key, s),
        other => serializer.emit_str(key, &other.to_string()),
    }
}
