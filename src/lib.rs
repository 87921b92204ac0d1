//! # tripswitch
//!
//! A small, thread-safe circuit breaker for wrapping fallible operations.
//!
//! ## What is a Circuit Breaker?
//!
//! The Circuit Breaker pattern prevents cascading failures by temporarily
//! refusing to invoke an operation that is currently failing. The pattern is
//! inspired by electrical circuit breakers and operates in three states:
//!
//! - **Closed**: Normal operation. Calls pass through to the protected
//!   operation; consecutive failures are counted.
//! - **Open**: Calls are rejected immediately without invoking the operation,
//!   until a fixed cooldown elapses.
//! - **Half-Open**: After the cooldown, a trial call is permitted to check
//!   whether the operation has recovered. Success closes the circuit;
//!   failure re-opens it and re-arms the cooldown.
//!
//! ## Concurrency
//!
//! A breaker may be shared across threads (it is `Clone`, and clones share
//! state). The whole check-invoke-record sequence for a guarded call runs
//! under one mutex, which makes the bookkeeping race-free at the cost of
//! serializing the wrapped operation: only one guarded call runs at a time
//! per breaker. For lightweight guards this is the right trade; it is not a
//! fit for wrapping slow operations called from many threads at once.
//!
//! ## Basic Usage
//!
//! ```rust
//! use tripswitch::{BreakerError, CircuitBreaker};
//! use std::error::Error;
//! use std::fmt;
//! use std::time::Duration;
//!
//! // Define a custom error type that implements Error trait
//! #[derive(Debug)]
//! struct ServiceError(String);
//!
//! impl fmt::Display for ServiceError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Service error: {}", self.0)
//!     }
//! }
//!
//! impl Error for ServiceError {}
//!
//! // Create a circuit breaker with custom settings
//! let breaker = CircuitBreaker::<String, ServiceError>::builder()
//!     .failure_threshold(3) // Trip after 3 consecutive failures
//!     .cooldown(Duration::from_secs(30)) // Wait 30 seconds before probing
//!     .build()
//!     .unwrap();
//!
//! // Use the circuit breaker to wrap function calls
//! match breaker.call(|| {
//!     // Your service call that might fail
//!     Ok("Success".to_string()) // Simulate success
//!     // Err(ServiceError("Service unavailable".to_string())) // Or simulate failure
//! }) {
//!     Ok(result) => println!("Call succeeded: {}", result),
//!     Err(BreakerError::Open) => println!("Circuit is open, call was prevented"),
//!     Err(BreakerError::Operation(err)) => println!("Call failed: {}", err),
//! }
//! ```
//!
//! ## Result Validation
//!
//! Some operations signal failure through their return value rather than an
//! error. A validation predicate classifies a returned value as acceptable
//! or not; a rejected value counts as a failure event even though the value
//! is still returned to the caller:
//!
//! ```rust
//! use tripswitch::CircuitBreaker;
//! use std::io;
//!
//! let breaker = CircuitBreaker::<u16, io::Error>::builder()
//!     .validate(|status| *status < 500)
//!     .build()
//!     .unwrap();
//!
//! let _ = breaker.call(|| Ok(503)); // counts as a failure
//! assert_eq!(breaker.failure_count(), 1);
//! ```
//!
//! ## Error Classification
//!
//! Not every error is evidence that a dependency is down. The builder can
//! exclude error kinds from counting (`allow_errors`) or restrict counting
//! to specific kinds (`fail_on_errors`); an excluded error is neutral and
//! leaves the failure counter untouched. Configuring both classifiers is
//! contradictory and fails at build time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breaker;
mod classify;
mod config;
mod error;
mod hook;
pub mod prelude;
mod state;

// Re-exports
pub use breaker::CircuitBreaker;
pub use config::{BreakerBuilder, DEFAULT_COOLDOWN, DEFAULT_FAILURE_THRESHOLD};
pub use error::{BreakerError, BreakerResult, ConfigError};
pub use hook::HookRegistry;
pub use state::{State, Transition};
