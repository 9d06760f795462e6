//! One-shot process-wide bootstrap latch per engine
//!
//! Engines may need global initialization (memory pools, lookup tables,
//! thread pools) that must run exactly once per process, before any session
//! is created, independent of any particular game or match. This module
//! provides that latch: the first `run_static_init` call for an engine runs
//! its init function; every later call is a no-op that returns the cached
//! outcome. A failed bootstrap is sticky: the engine stays unusable for the
//! remainder of the process lifetime.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{info, warn};

/// Error from an engine's process-wide bootstrap.
///
/// Clone-able so the sticky outcome can be cached and handed back to every
/// later caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("engine initialization failed: {0}")]
    InitFailed(String),

    #[error("engine is incompatible with this host: {0}")]
    Incompatible(String),
}

/// Cached bootstrap outcome per engine name.
static BOOTSTRAP_STATE: Lazy<Mutex<HashMap<String, Result<(), BootstrapError>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Run `init` at most once per process for the named engine.
///
/// The first call runs `init` and caches its outcome; all later calls are
/// no-ops returning the cached result, so accidental double invocation (e.g.,
/// host retry logic) cannot corrupt shared state. The lock is held across
/// `init`, which serializes bootstrap ahead of any session-level concurrency;
/// `init` must not call back into this module.
pub fn run_static_init<F>(engine: &str, init: F) -> Result<(), BootstrapError>
where
    F: FnOnce() -> Result<(), BootstrapError>,
{
    let mut state = BOOTSTRAP_STATE.lock().unwrap();

    if let Some(outcome) = state.get(engine) {
        if let Err(err) = outcome {
            warn!(engine = %engine, error = %err, "engine bootstrap previously failed; engine stays unusable");
        }
        return outcome.clone();
    }

    info!(engine = %engine, "running one-time engine bootstrap");
    let outcome = init();
    if let Err(err) = &outcome {
        warn!(engine = %engine, error = %err, "engine bootstrap failed");
    }
    state.insert(engine.to_string(), outcome.clone());
    outcome
}

/// Whether the named engine has bootstrapped successfully.
pub fn is_bootstrapped(engine: &str) -> bool {
    let state = BOOTSTRAP_STATE.lock().unwrap();
    matches!(state.get(engine), Some(Ok(())))
}

/// Forget all cached bootstrap outcomes (mainly for testing).
pub fn clear_bootstrap_state() {
    let mut state = BOOTSTRAP_STATE.lock().unwrap();
    state.clear();
}
