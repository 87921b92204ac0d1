use std::error::Error;
use std::fmt;
use std::thread;
use std::time::Duration;
use tripswitch::{BreakerError, CircuitBreaker};

// Custom error type that implements Error trait
#[derive(Debug)]
struct ServiceError(String);

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Service error: {}", self.0)
    }
}

impl Error for ServiceError {}

fn main() {
    // Create a circuit breaker with a short cooldown for the demo
    let breaker = CircuitBreaker::<String, ServiceError>::builder()
        .failure_threshold(3) // Trip after 3 consecutive failures
        .cooldown(Duration::from_secs(2)) // 2 second cooldown period
        .build()
        .expect("valid configuration");

    println!("Circuit initial state: {:?}", breaker.current_state());

    // Create a mutable counter for tracking calls to the fake service
    let mut call_counter = 0u32;

    // A service that fails for a while, then recovers
    let call_service = |counter: &mut u32| -> Result<String, ServiceError> {
        *counter += 1;
        if *counter <= 5 {
            Err(ServiceError("External service error".to_string()))
        } else {
            Ok("Success".to_string())
        }
    };

    // Make 12 calls with the circuit breaker
    for i in 1..=12 {
        println!("\nAttempt {}: ", i);

        match breaker.call(|| call_service(&mut call_counter)) {
            Ok(result) => println!("Call succeeded with result: {}", result),
            Err(BreakerError::Open) => {
                println!("Circuit is open, waiting before retry...");
                thread::sleep(Duration::from_millis(500));
            }
            Err(BreakerError::Operation(err)) => {
                println!("Call failed with error: {}", err);
            }
        }

        println!(
            "Current state: {:?}, consecutive failures: {}",
            breaker.current_state(),
            breaker.failure_count()
        );

        // Add a small delay between calls
        thread::sleep(Duration::from_millis(300));
    }
}
