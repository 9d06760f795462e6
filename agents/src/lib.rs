//! Engine registration for the agent protocol
//!
//! This crate provides a single initialization point for registering all
//! bundled decision engines with the agent-core registry.
//!
//! # Usage
//!
//! ```rust
//! use agents::register_all_engines;
//!
//! // Call once at startup - safe to call multiple times
//! register_all_engines();
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Register all bundled engines with the agent-core registry.
///
/// This function uses `std::sync::Once` to ensure registration only
/// happens once, even if called multiple times. Safe to call from
/// multiple threads.
///
/// Currently registers:
/// - UCT (`"UCT"`)
/// - Random (`"Random"`)
pub fn register_all_engines() {
    INIT.call_once(|| {
        agents_uct::register_uct();
        agents_random::register_random();
    });
}

// Re-export individual registration functions for advanced use cases
pub use agents_random::register_random;
pub use agents_uct::register_uct;
