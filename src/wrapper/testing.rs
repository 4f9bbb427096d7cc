// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A wrapper for unit tests of library code.
//!
//! Library code only calls its [`Wrapper`] when something unexpected went
//! wrong, so in tests every call is a failure. [`TestReporter`] records each
//! call without stopping the test, and fails the test when it is dropped.
//!
//! ```rust
//! use logwrap::testing::TestReporter;
//!
//! let reporter = TestReporter::new();
//! let wrapper = reporter.wrapper();
//! // ... exercise code that was handed `wrapper` ...
//! # let _ = &wrapper;
//! assert!(reporter.failures().is_empty());
//! ```

use super::{Wrapper, WrapperKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

#[derive(Debug, Default)]
struct Shared {
    failures: Mutex<Vec<String>>,
    closed: AtomicBool,
}

/// Collects wrapper calls as test failures.
///
/// A call made after the reporter is dropped has no test left to fail, so it
/// panics on the calling thread instead.
#[derive(Debug, Default)]
pub struct TestReporter {
    shared: Arc<Shared>,
}

impl TestReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wrapper that records one failure per call.
    pub fn wrapper(&self) -> Wrapper {
        let shared = Arc::clone(&self.shared);
        Wrapper::with_kind(WrapperKind::Testing, move |_, msg| {
            let failure = format!("logger called with msg: {msg:?}");
            if shared.closed.load(Ordering::SeqCst) {
                panic!("{failure} after the test reporter was dropped");
            }
            log::error!("{failure}");
            lock(&shared).push(failure);
        })
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> Vec<String> {
        lock(&self.shared).clone()
    }

    /// Drain recorded failures, so dropping the reporter won't fail the test.
    pub fn take_failures(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.shared))
    }
}

fn lock(shared: &Shared) -> MutexGuard<'_, Vec<String>> {
    shared.failures.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        if thread::panicking() {
            return;
        }
        let failures = self.take_failures();
        if !failures.is_empty() {
            panic!("{}", failures.join("\n"));
        }
    }
}
