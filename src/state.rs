//! Circuit breaker state machine implementation.

use std::time::{Duration, Instant};

/// Represents the possible states of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Circuit is closed and operations are allowed.
    Closed,

    /// Circuit is open and operations are rejected until the cooldown elapses.
    Open,

    /// Circuit is allowing a trial operation to test recovery.
    HalfOpen,
}

/// A state transition observed by the core, reported so that hooks and
/// tracing can run after the breaker's lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State the breaker left.
    pub from: State,
    /// State the breaker entered.
    pub to: State,
}

/// Mutable state of a circuit breaker.
///
/// Lives behind the breaker's mutex; every method takes `&mut self` and is
/// the only way the state, counter, or deadline change. Transitions are
/// returned to the caller rather than acted on here.
#[derive(Debug)]
pub(crate) struct Core {
    state: State,
    failure_count: u32,
    /// Absolute deadline after which the next state check moves the breaker
    /// from open to half-open. Only meaningful while the state is `Open`.
    half_open_at: Option<Instant>,
}

impl Core {
    /// Creates a new core in the closed state with a zero failure count.
    pub(crate) fn new() -> Self {
        Self {
            state: State::Closed,
            failure_count: 0,
            half_open_at: None,
        }
    }

    pub(crate) fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Evaluates the current state, applying the lazy open-to-half-open
    /// transition when the cooldown deadline has passed.
    ///
    /// The deadline is an absolute instant set when the breaker opened, so
    /// repeated checks never drift it.
    pub(crate) fn check_state(&mut self, now: Instant) -> (State, Option<Transition>) {
        if self.state == State::Open {
            if let Some(deadline) = self.half_open_at {
                if now >= deadline {
                    self.state = State::HalfOpen;
                    let transition = Transition {
                        from: State::Open,
                        to: State::HalfOpen,
                    };
                    return (self.state, Some(transition));
                }
            }
        }

        (self.state, None)
    }

    /// Records a failure event.
    ///
    /// Increments the consecutive-failure counter. In the closed state the
    /// breaker opens once the counter reaches `threshold`; in the half-open
    /// state a single failure re-opens it immediately, re-arming the
    /// deadline. Sub-threshold failures leave the breaker closed.
    pub(crate) fn record_failure(
        &mut self,
        now: Instant,
        threshold: u32,
        cooldown: Duration,
    ) -> Option<Transition> {
        self.failure_count += 1;

        match self.state {
            State::HalfOpen => Some(self.open(now, cooldown, State::HalfOpen)),
            State::Closed if self.failure_count >= threshold => {
                Some(self.open(now, cooldown, State::Closed))
            }
            _ => None,
        }
    }

    /// Records a success event: closes the breaker and resets the counter.
    pub(crate) fn record_success(&mut self) -> Option<Transition> {
        let from = self.state;
        self.state = State::Closed;
        self.failure_count = 0;
        self.half_open_at = None;

        if from == State::Closed {
            None
        } else {
            Some(Transition {
                from,
                to: State::Closed,
            })
        }
    }

    /// Forces the breaker open regardless of the failure count.
    pub(crate) fn force_open(&mut self, now: Instant, cooldown: Duration) -> Option<Transition> {
        if self.state == State::Open {
            return None;
        }

        let from = self.state;
        Some(self.open(now, cooldown, from))
    }

    /// Forces the breaker closed, resetting the counter.
    pub(crate) fn force_closed(&mut self) -> Option<Transition> {
        if self.state == State::Closed {
            return None;
        }

        self.record_success()
    }

    fn open(&mut self, now: Instant, cooldown: Duration, from: State) -> Transition {
        self.state = State::Open;
        self.half_open_at = Some(now + cooldown);

        Transition {
            from,
            to: State::Open,
        }
    }
}
