//! Error classification for circuit breakers.
//!
//! By default every operation error is a circuit-worthy failure. Some error
//! kinds should not count against the breaker (a lookup miss is not a sign
//! the dependency is down), and some callers want only a specific kind to
//! count. A classifier captures either rule as a predicate over the
//! operation's error type; how errors are matched (enum variant, error kind
//! field, downcast) is up to the caller.

use std::sync::Arc;

pub(crate) type MatchFn<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Decides whether an operation error counts as a failure event.
///
/// An error that does not count is neutral: it is neither a failure event
/// nor a success event, and leaves the failure counter untouched.
pub(crate) enum Classifier<E> {
    /// Every error counts. The default.
    CountAll,

    /// Errors matching the predicate are allowed and do not count; all
    /// others do.
    Allowed(MatchFn<E>),

    /// Only errors matching the predicate count; all others are neutral.
    Failure(MatchFn<E>),
}

impl<E> Classifier<E> {
    pub(crate) fn counts(&self, error: &E) -> bool {
        match self {
            Classifier::CountAll => true,
            Classifier::Allowed(matches) => !matches(error),
            Classifier::Failure(matches) => matches(error),
        }
    }
}
