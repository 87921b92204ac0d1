//! Core circuit breaker implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::classify::Classifier;
use crate::error::{BreakerError, BreakerResult};
use crate::hook::HookRegistry;
use crate::state::{Core, State, Transition};

pub(crate) type ValidateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Inner state of the circuit breaker, shared between clones.
struct BreakerInner<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    core: Mutex<Core>,
    failure_threshold: u32,
    cooldown: Duration,
    validate: Option<ValidateFn<T>>,
    classifier: Classifier<E>,
    hooks: Arc<HookRegistry>,
}

/// A circuit breaker that wraps calls to a fallible operation and stops
/// invoking it while it is failing.
///
/// The breaker is generic over the operation's success value `T` (so a
/// validation predicate can inspect it) and its error type `E`. One breaker
/// guards one operation for that operation's lifetime.
///
/// The entire check-invoke-record sequence runs under a single mutex, so
/// state checks and bookkeeping are linearized and race-free. The cost is
/// that only one guarded call executes at a time per breaker, and a hung
/// operation holds the lock until it returns; callers needing a timeout must
/// build it into the wrapped operation itself.
pub struct CircuitBreaker<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    inner: Arc<BreakerInner<T, E>>,
}

impl<T, E> CircuitBreaker<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    pub(crate) fn new(
        failure_threshold: u32,
        cooldown: Duration,
        validate: Option<ValidateFn<T>>,
        classifier: Classifier<E>,
        hooks: Arc<HookRegistry>,
    ) -> Self {
        let inner = BreakerInner {
            core: Mutex::new(Core::new()),
            failure_threshold,
            cooldown,
            validate,
            classifier,
            hooks,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a new builder for customizing a circuit breaker.
    pub fn builder() -> crate::config::BreakerBuilder<T, E> {
        crate::config::BreakerBuilder::new()
    }

    /// Gets the current state of the circuit breaker.
    ///
    /// Observing the state is itself a state check: if the breaker is open
    /// and the cooldown deadline has passed, this applies the transition to
    /// half-open.
    pub fn current_state(&self) -> State {
        let (state, moved) = self.inner.core.lock().check_state(Instant::now());
        if let Some(transition) = moved {
            self.publish(&[transition]);
        }

        state
    }

    /// Gets the number of consecutive failures recorded since the breaker
    /// last closed.
    pub fn failure_count(&self) -> u32 {
        self.inner.core.lock().failure_count()
    }

    /// Executes an operation guarded by the circuit breaker.
    ///
    /// While the circuit is open the operation is not invoked and the call
    /// returns [`BreakerError::Open`] immediately. Otherwise the operation
    /// runs and its result is recorded: an error counts as a failure event
    /// (subject to the configured error classifier), a success counts as a
    /// success event unless the validation predicate rejects the returned
    /// value. The operation's own result is forwarded to the caller either
    /// way.
    pub fn call<F>(&self, f: F) -> BreakerResult<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        // At most two transitions occur per call: a lazy open-to-half-open
        // on the state check, then half-open-to-open on a failed trial.
        let mut transitions: SmallVec<[Transition; 2]> = SmallVec::new();

        let mut core = self.inner.core.lock();
        let (state, moved) = core.check_state(Instant::now());
        if let Some(transition) = moved {
            transitions.push(transition);
        }

        if state == State::Open {
            drop(core);
            self.publish(&transitions);
            tracing::debug!("circuit open, call short-circuited");
            self.inner.hooks.notify_short_circuit();
            return Err(BreakerError::Open);
        }

        let result = f();

        match &result {
            Ok(value) => {
                let valid = self.inner.validate.as_ref().map_or(true, |v| v(value));
                let moved = if valid {
                    core.record_success()
                } else {
                    core.record_failure(
                        Instant::now(),
                        self.inner.failure_threshold,
                        self.inner.cooldown,
                    )
                };
                if let Some(transition) = moved {
                    transitions.push(transition);
                }
            }
            Err(error) => {
                // Errors the classifier excludes are neutral: neither a
                // failure event nor a success event.
                if self.inner.classifier.counts(error) {
                    if let Some(transition) = core.record_failure(
                        Instant::now(),
                        self.inner.failure_threshold,
                        self.inner.cooldown,
                    ) {
                        transitions.push(transition);
                    }
                }
            }
        }

        drop(core);
        self.publish(&transitions);

        result.map_err(BreakerError::Operation)
    }

    /// Forces the circuit breaker to the open state, arming the cooldown
    /// deadline as if it had tripped. Returns false if it was already open.
    pub fn force_open(&self) -> bool {
        let moved = self
            .inner
            .core
            .lock()
            .force_open(Instant::now(), self.inner.cooldown);

        match moved {
            Some(transition) => {
                self.publish(&[transition]);
                true
            }
            None => false,
        }
    }

    /// Forces the circuit breaker to the closed state, resetting the failure
    /// counter. Returns false if it was already closed.
    pub fn force_closed(&self) -> bool {
        let moved = self.inner.core.lock().force_closed();

        match moved {
            Some(transition) => {
                self.publish(&[transition]);
                true
            }
            None => false,
        }
    }

    /// Emits tracing events and hooks for transitions, outside the lock.
    fn publish(&self, transitions: &[Transition]) {
        for transition in transitions {
            match transition.to {
                State::Open => {
                    tracing::warn!(from = ?transition.from, "circuit breaker opened");
                }
                State::HalfOpen => {
                    tracing::info!("circuit breaker half-open, probing recovery");
                }
                State::Closed => {
                    tracing::info!(from = ?transition.from, "circuit breaker closed");
                }
            }

            self.inner.hooks.notify_transition(*transition);
        }
    }
}

// Allow cloning of circuit breakers - cheap because inner state is Arc'd
impl<T, E> Clone for CircuitBreaker<T, E>
where
    T: 'static,
    E: std::error::Error + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
