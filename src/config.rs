//! Configuration for circuit breakers.

use std::sync::Arc;
use std::time::Duration;

use crate::breaker::{CircuitBreaker, ValidateFn};
use crate::classify::{Classifier, MatchFn};
use crate::error::ConfigError;
use crate::hook::HookRegistry;

/// Default number of consecutive failures that trips the circuit.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Default cooldown before an open circuit allows a trial call.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Builder for creating circuit breakers with custom configurations.
///
/// Configuration is validated once, at [`build`](Self::build); a breaker
/// that constructs successfully never fails on configuration at call time.
pub struct BreakerBuilder<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    failure_threshold: u32,
    cooldown: Duration,
    validate: Option<ValidateFn<T>>,
    allowed: Option<MatchFn<E>>,
    failure: Option<MatchFn<E>>,
    hooks: Arc<HookRegistry>,
}

impl<T, E> Default for BreakerBuilder<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> BreakerBuilder<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            cooldown: DEFAULT_COOLDOWN,
            validate: None,
            allowed: None,
            failure: None,
            hooks: Arc::new(HookRegistry::new()),
        }
    }

    /// Sets the number of consecutive failures that trips the circuit.
    pub fn failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Sets the cooldown duration before the circuit transitions from open
    /// to half-open.
    pub fn cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = duration;
        self
    }

    /// Sets a predicate over the operation's successful return value.
    ///
    /// A returned value the predicate rejects counts as a failure event even
    /// though the operation did not error, for domains where failure is
    /// signaled by data (an HTTP 500 in a response body, say) rather than by
    /// the error channel.
    pub fn validate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(predicate));
        self
    }

    /// Excludes matching errors from failure counting.
    ///
    /// A matching error is neutral: it neither increments the failure
    /// counter nor resets it. Mutually exclusive with
    /// [`fail_on_errors`](Self::fail_on_errors).
    pub fn allow_errors<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.allowed = Some(Arc::new(predicate));
        self
    }

    /// Counts only matching errors as failures; all others are neutral.
    ///
    /// Mutually exclusive with [`allow_errors`](Self::allow_errors).
    pub fn fail_on_errors<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.failure = Some(Arc::new(predicate));
        self
    }

    /// Sets a hook registry for the circuit breaker.
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Builds a new circuit breaker with the configured settings.
    ///
    /// Fails fast on contradictory or invalid configuration rather than
    /// surfacing it at call time.
    pub fn build(self) -> Result<CircuitBreaker<T, E>, ConfigError> {
        if self.failure_threshold == 0 {
            return Err(ConfigError::ZeroFailureThreshold);
        }
        if self.cooldown.is_zero() {
            return Err(ConfigError::ZeroCooldown);
        }

        let classifier = match (self.allowed, self.failure) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingClassifiers),
            (Some(allowed), None) => Classifier::Allowed(allowed),
            (None, Some(failure)) => Classifier::Failure(failure),
            (None, None) => Classifier::CountAll,
        };

        Ok(CircuitBreaker::new(
            self.failure_threshold,
            self.cooldown,
            self.validate,
            classifier,
            self.hooks,
        ))
    }
}
