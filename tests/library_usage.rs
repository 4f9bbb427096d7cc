// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! How a library and its caller use `logwrap` together.

use logwrap::testing::TestReporter;
use logwrap::{Counter, LogContext, Wrapper, WrapperKind, counter_wrapper};
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

/// A stand-in library component that drains a queue on a background thread
/// and has no caller to return errors to.
struct Flusher {
    logger: Wrapper,
}

impl Flusher {
    fn run(&self, batches: Vec<Result<usize, String>>) -> usize {
        let logger = self.logger.clone();
        thread::spawn(move || {
            let ctx = LogContext::background();
            let mut flushed = 0;
            for batch in batches {
                match batch {
                    Ok(n) => flushed += n,
                    Err(e) => logger.log(&ctx, &format!("flush failed: {e}")),
                }
            }
            flushed
        })
        .join()
        .unwrap()
    }
}

#[derive(Debug, Deserialize)]
struct FlusherConfig {
    #[serde(default)]
    logger: Wrapper,
}

#[derive(Default)]
struct Failures(AtomicU64);

impl Counter for Failures {
    fn add(&self, amount: f64) {
        self.0.fetch_add(amount as u64, Ordering::SeqCst);
    }
}

#[test]
fn test_reporter_catches_unexpected_logging() {
    let reporter = TestReporter::new();
    let flusher = Flusher {
        logger: reporter.wrapper(),
    };

    let flushed = flusher.run(vec![Ok(2), Err("disk full".into()), Ok(3)]);
    assert_eq!(flushed, 5);

    let failures = reporter.take_failures();
    assert_eq!(failures, vec!["logger called with msg: \"flush failed: disk full\""]);
}

#[test]
fn test_reporter_quiet_on_happy_path() {
    let reporter = TestReporter::new();
    let flusher = Flusher {
        logger: reporter.wrapper(),
    };
    assert_eq!(flusher.run(vec![Ok(1), Ok(1)]), 2);
}

#[test]
fn test_configured_wrapper_wrapped_with_counter() {
    let config: FlusherConfig = serde_yaml::from_str("logger: nop").unwrap();
    assert_eq!(config.logger.kind(), &WrapperKind::Nop);

    let failures = Arc::new(Failures::default());
    let flusher = Flusher {
        logger: counter_wrapper(config.logger, Arc::clone(&failures)),
    };

    flusher.run(vec![Err("a".into()), Ok(1), Err("b".into()), Err("c".into())]);
    assert_eq!(failures.0.load(Ordering::SeqCst), 3);
}

#[test]
fn test_bad_config_fails_at_load_time() {
    let err = serde_yaml::from_str::<FlusherConfig>("logger: \"zap:info:key1=value1,key1=value2\"")
        .unwrap_err();
    assert!(err.to_string().contains("appeared at least twice"));
}

#[test]
fn test_message_fn_for_message_only_apis() {
    let reporter = TestReporter::new();
    let log_message = reporter.wrapper().to_message_fn();

    log_message("plain callback");

    assert_eq!(reporter.take_failures().len(), 1);
}
