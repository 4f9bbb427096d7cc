// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Wrapper, WrapperKind};
use std::sync::Arc;

/// Anything that can be bumped by a float amount.
pub trait Counter: Send + Sync {
    fn add(&self, amount: f64);
}

impl Counter for metrics::Counter {
    fn add(&self, amount: f64) {
        self.increment(amount.round() as u64);
    }
}

impl Counter for metrics::Gauge {
    fn add(&self, amount: f64) {
        self.increment(amount);
    }
}

impl<C: Counter + ?Sized> Counter for Arc<C> {
    fn add(&self, amount: f64) {
        (**self).add(amount);
    }
}

/// Wrap `delegate` so every call first adds 1 to `counter`.
///
/// Counter wrappers can't be expressed in config text. Parse the delegate
/// first, then wrap it during startup:
///
/// ```rust,no_run
/// use logwrap::{Wrapper, counter_wrapper};
///
/// let failures = metrics::counter!("tracing_failures_total");
/// let delegate: Wrapper = "slog:error".parse().unwrap();
/// let wrapper = counter_wrapper(delegate, failures);
/// ```
pub fn counter_wrapper<C>(delegate: Wrapper, counter: C) -> Wrapper
where
    C: Counter + 'static,
{
    Wrapper::with_kind(WrapperKind::Counter, move |ctx, msg| {
        counter.add(1.0);
        delegate.log(ctx, msg);
    })
}
