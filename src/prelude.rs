//! Re-exports common types for convenient usage.
//!
//! # Example
//! ```rust,no_run
//! use tripswitch::prelude::*;
//! ```

pub use crate::breaker::CircuitBreaker;
pub use crate::config::BreakerBuilder;
pub use crate::error::{BreakerError, BreakerResult, ConfigError};
pub use crate::state::State;
