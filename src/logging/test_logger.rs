// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test loggers that keep what they receive.

use slog::{Drain, Key, Logger, Never, OwnedKVList, Record, Serializer, KV, o};
use std::fmt;
use std::sync::{Arc, Mutex};

/// One slog record as seen by [`CaptureDrain`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: slog::Level,
    pub msg: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedRecord {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct FieldCollector(Vec<(String, String)>);

impl Serializer for FieldCollector {
    fn emit_arguments(&mut self, key: Key, val: &fmt::Arguments<'_>) -> slog::Result {
        self.0.push((key.to_string(), val.to_string()));
        Ok(())
    }
}

/// A drain that stores every record.
#[derive(Clone, Default)]
pub struct CaptureDrain {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl CaptureDrain {
    /// A root logger writing into this drain.
    pub fn logger(&self) -> Logger {
        Logger::root(self.clone(), o!())
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Drain for CaptureDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<(), Never> {
        let mut fields = FieldCollector::default();
        let _ = values.serialize(record, &mut fields);
        let _ = record.kv().serialize(record, &mut fields);

        self.records.lock().unwrap().push(CapturedRecord {
            level: record.level(),
            msg: record.msg().to_string(),
            fields: fields.0,
        });
        Ok(())
    }
}

/// A `log::Log` that stores formatted messages.
#[derive(Clone, Default)]
pub struct CaptureLog {
    lines: Arc<Mutex<Vec<(log::Level, String)>>>,
}

impl CaptureLog {
    pub fn lines(&self) -> Vec<(log::Level, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl log::Log for CaptureLog {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}
