use proptest::prelude::*;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tripswitch::{CircuitBreaker, State};

#[derive(Debug)]
struct StubError;

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub error")
    }
}

impl Error for StubError {}

fn breaker(threshold: u32) -> CircuitBreaker<(), StubError> {
    CircuitBreaker::builder()
        .failure_threshold(threshold)
        .cooldown(Duration::from_secs(60))
        .build()
        .unwrap()
}

proptest! {
    // Any number of consecutive failures below the threshold leaves the
    // breaker closed with an exact count
    #[test]
    fn sub_threshold_failures_stay_closed(threshold in 1u32..40, failures in 0u32..40) {
        prop_assume!(failures < threshold);

        let breaker = breaker(threshold);
        for _ in 0..failures {
            let _ = breaker.call(|| -> Result<(), StubError> { Err(StubError) });
        }

        prop_assert_eq!(breaker.current_state(), State::Closed);
        prop_assert_eq!(breaker.failure_count(), failures);
    }

    // Reaching the threshold always opens the circuit
    #[test]
    fn threshold_failures_open(threshold in 1u32..40) {
        let breaker = breaker(threshold);
        for _ in 0..threshold {
            let _ = breaker.call(|| -> Result<(), StubError> { Err(StubError) });
        }

        prop_assert_eq!(breaker.current_state(), State::Open);
        prop_assert_eq!(breaker.failure_count(), threshold);
    }

    // A success after any sub-threshold run of failures resets the counter
    #[test]
    fn success_resets_counter(threshold in 2u32..40, failures in 0u32..40) {
        prop_assume!(failures < threshold);

        let breaker = breaker(threshold);
        for _ in 0..failures {
            let _ = breaker.call(|| -> Result<(), StubError> { Err(StubError) });
        }
        let _ = breaker.call(|| -> Result<(), StubError> { Ok(()) });

        prop_assert_eq!(breaker.current_state(), State::Closed);
        prop_assert_eq!(breaker.failure_count(), 0);
    }
}
