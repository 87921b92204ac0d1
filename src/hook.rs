//! Hook registry for circuit breaker events.

use crate::state::{State, Transition};
use parking_lot::RwLock;
use std::sync::Arc;

type TransitionFn = Arc<dyn Fn(State, State) + Send + Sync + 'static>;
type HookFn = Arc<dyn Fn() + Send + Sync + 'static>;

/// A registry for circuit breaker event hooks.
///
/// Hooks are invoked after the breaker releases its lock, so a slow hook
/// delays the calling thread but never blocks other callers' access to the
/// breaker.
pub struct HookRegistry {
    on_transition: RwLock<Option<TransitionFn>>,
    on_short_circuit: RwLock<Option<HookFn>>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            on_transition: RwLock::new(None),
            on_short_circuit: RwLock::new(None),
        }
    }

    /// Sets the hook to call on every state transition, with the state left
    /// and the state entered.
    pub fn set_on_transition<F>(&self, f: F)
    where
        F: Fn(State, State) + Send + Sync + 'static,
    {
        *self.on_transition.write() = Some(Arc::new(f));
    }

    /// Sets the hook to call when an open breaker rejects a call without
    /// invoking the wrapped operation.
    pub fn set_on_short_circuit<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.on_short_circuit.write() = Some(Arc::new(f));
    }

    pub(crate) fn notify_transition(&self, transition: Transition) {
        let hook = self.on_transition.read().as_ref().map(Arc::clone);
        if let Some(hook) = hook {
            hook(transition.from, transition.to);
        }
    }

    pub(crate) fn notify_short_circuit(&self) {
        let hook = self.on_short_circuit.read().as_ref().map(Arc::clone);
        if let Some(hook) = hook {
            hook();
        }
    }
}
