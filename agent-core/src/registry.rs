//! Static engine registry for compile-time engine registration
//!
//! This module provides a thread-safe registry that engine crates register
//! into at startup and the host queries at runtime. Each entry carries a
//! factory for fresh engine handles plus a capability probe, so the host can
//! filter engines by game without instantiating them.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::descriptor::GameDescriptor;
use crate::erased::ErasedEngine;

/// Factory function type for creating fresh engine handles
pub type EngineFactory = fn() -> Box<dyn ErasedEngine>;

/// Capability probe type: can the engine play the described game?
pub type CapabilityProbe = fn(&GameDescriptor) -> bool;

#[derive(Clone, Copy)]
struct RegistryEntry {
    factory: EngineFactory,
    probe: CapabilityProbe,
}

/// Thread-safe registry mapping engine name to factory and probe
static REGISTRY: Lazy<Mutex<HashMap<String, RegistryEntry>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// One registered engine as seen by the host.
///
/// Carries the probe by value so the host can filter a listing without
/// holding the registry lock or instantiating anything.
#[derive(Clone)]
pub struct EngineListing {
    /// Engine name, as registered.
    pub name: String,
    probe: CapabilityProbe,
}

impl EngineListing {
    /// Run the engine's capability probe against a game descriptor.
    pub fn supports(&self, descriptor: &GameDescriptor) -> bool {
        (self.probe)(descriptor)
    }
}

impl std::fmt::Debug for EngineListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineListing")
            .field("name", &self.name)
            .finish()
    }
}

/// Register an engine with the global registry
///
/// This function should typically be called from engine crate initialization
/// or using the `register_engine!` macro. Registering a name twice replaces
/// the earlier entry; the last registration wins.
///
/// # Arguments
///
/// * `name` - Unique engine name (e.g., "UCT")
/// * `factory` - Function that creates fresh handles for the engine
/// * `probe` - Function that reports whether the engine can play a game
pub fn register_engine(name: String, factory: EngineFactory, probe: CapabilityProbe) {
    let mut registry = REGISTRY.lock().unwrap();
    if registry.contains_key(&name) {
        warn!(engine = %name, "Overriding existing engine registration");
    }
    registry.insert(name, RegistryEntry { factory, probe });
}

/// Create a fresh engine handle by name
///
/// Every call produces a new idle handle; handles never share session state.
///
/// # Returns
///
/// Returns `Some(engine)` if the name is registered, `None` otherwise.
pub fn instantiate(name: &str) -> Option<Box<dyn ErasedEngine>> {
    let registry = REGISTRY.lock().unwrap();
    match registry.get(name) {
        Some(entry) => Some((entry.factory)()),
        None => {
            warn!(engine = %name, "Attempted to instantiate unregistered engine");
            None
        }
    }
}

/// Snapshot of all registered engines, with their capability probes.
///
/// The snapshot is decoupled from the registry: later registrations do not
/// show up in an already-taken listing.
pub fn list_engines() -> Vec<EngineListing> {
    let registry = REGISTRY.lock().unwrap();
    registry
        .iter()
        .map(|(name, entry)| EngineListing {
            name: name.clone(),
            probe: entry.probe,
        })
        .collect()
}

/// Check if an engine is registered
pub fn is_registered(name: &str) -> bool {
    let registry = REGISTRY.lock().unwrap();
    registry.contains_key(name)
}

/// Clear all registered engines (mainly for testing)
pub fn clear_registry() {
    let mut registry = REGISTRY.lock().unwrap();
    registry.clear();
}

/// Convenience macro for registering engines
///
/// Creates the factory (wrapping the engine type in an
/// [`EngineAdapter`](crate::adapter::EngineAdapter)) and the capability probe
/// from the engine type's `Default` impl, then calls `register_engine`.
///
/// # Example
///
/// ```ignore
/// register_engine!(UctEngine, "UCT");
/// ```
#[macro_export]
macro_rules! register_engine {
    ($engine_type:ty, $name:expr) => {{
        fn factory() -> Box<dyn $crate::erased::ErasedEngine> {
            Box::new($crate::adapter::EngineAdapter::new(
                <$engine_type>::default(),
            ))
        }
        fn probe(descriptor: &$crate::descriptor::GameDescriptor) -> bool {
            $crate::typed::DecisionEngine::supports_game(&<$engine_type>::default(), descriptor)
        }
        $crate::registry::register_engine($name.to_string(), factory, probe);
    }};
}
