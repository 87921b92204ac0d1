//! Error types for the circuit breaker library.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Result type for guarded calls.
pub type BreakerResult<T, E> = Result<T, BreakerError<E>>;

/// Outcome of a guarded call that did not produce a value.
///
/// Distinguishes "the breaker declined to invoke the operation" from "the
/// operation ran and failed", so callers can react differently to each.
#[derive(Debug)]
pub enum BreakerError<E> {
    /// The circuit is open; the operation was not invoked.
    Open,

    /// The operation was invoked and failed with the underlying error.
    Operation(E),
}

/// Construction-time misconfiguration, reported by
/// [`BreakerBuilder::build`](crate::BreakerBuilder::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The failure threshold must be a positive integer.
    ZeroFailureThreshold,

    /// The cooldown duration must be positive.
    ZeroCooldown,

    /// An allowed-error classifier and a failure-error classifier were both
    /// configured; they contradict each other.
    ConflictingClassifiers,
}

impl<E> Display for BreakerError<E>
where
    E: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BreakerError::Open => write!(f, "Circuit breaker is open"),
            BreakerError::Operation(e) => write!(f, "Operation error: {}", e),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFailureThreshold => {
                write!(f, "Failure threshold must be greater than zero")
            }
            ConfigError::ZeroCooldown => write!(f, "Cooldown duration must be greater than zero"),
            ConfigError::ConflictingClassifiers => {
                write!(
                    f,
                    "Allowed-error and failure-error classifiers cannot both be set"
                )
            }
        }
    }
}

impl<E: Error + 'static> Error for BreakerError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BreakerError::Open => None,
            BreakerError::Operation(e) => Some(e),
        }
    }
}

impl Error for ConfigError {}
