//! Refresh coordination between the form, list, and dashboard views.
//!
//! Three mechanisms decide when a view re-fetches:
//!
//! - [`RefreshSignal`]: a generation counter bumped once per successful
//!   submission. Each polling view holds a [`RefreshSubscription`] and
//!   re-fetches when it observes a generation it has not seen.
//! - [`REFRESH_INTERVAL`]: an independent timer per polling view.
//! - [`RequestTracker`]: stamps every fetch so that a slower, older response
//!   cannot overwrite a newer one.

use std::time::Duration;

/// Interval between background refreshes of each polling view.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// A view that refreshes itself on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTarget {
    /// Feedback list view.
    FeedbackList,
    /// Analytics dashboard view.
    Dashboard,
}

/// Monotonic token announcing that new feedback exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSignal {
    generation: u64,
}

impl RefreshSignal {
    /// Creates a signal at generation zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Returns the current generation.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    /// Advances the signal and returns the new generation.
    pub const fn bump(&mut self) -> u64 {
        self.generation = self.generation.saturating_add(1);
        self.generation
    }
}

/// A view's record of the last refresh generation it acted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSubscription {
    seen: u64,
}

impl RefreshSubscription {
    /// Returns `true` exactly once for each generation the subscriber has
    /// not yet seen, and records it as seen.
    pub const fn observe(&mut self, signal: RefreshSignal) -> bool {
        if signal.generation() > self.seen {
            self.seen = signal.generation();
            true
        } else {
            false
        }
    }
}

/// Stamps fetches so only the most recent one is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTracker {
    issued: u64,
}

impl RequestTracker {
    /// Issues a new request number.
    pub const fn next(&mut self) -> u64 {
        self.issued = self.issued.saturating_add(1);
        self.issued
    }

    /// Returns the number of requests issued so far.
    #[must_use]
    pub const fn issued(self) -> u64 {
        self.issued
    }

    /// Returns `true` if `request` is the latest issued request.
    #[must_use]
    pub const fn is_current(self, request: u64) -> bool {
        request == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::{RefreshSignal, RefreshSubscription, RequestTracker};

    #[test]
    fn subscription_sees_each_generation_once() {
        let mut signal = RefreshSignal::new();
        let mut subscription = RefreshSubscription::default();

        assert!(!subscription.observe(signal));

        signal.bump();
        assert!(subscription.observe(signal));
        assert!(!subscription.observe(signal));
    }

    #[test]
    fn independent_subscriptions_each_observe_the_bump() {
        let mut signal = RefreshSignal::new();
        let mut list = RefreshSubscription::default();
        let mut dashboard = RefreshSubscription::default();

        assert_eq!(signal.bump(), 1);

        assert!(list.observe(signal));
        assert!(dashboard.observe(signal));
    }

    #[test]
    fn only_latest_request_is_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.next();
        let second = tracker.next();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(tracker.issued(), 2);
    }
}
