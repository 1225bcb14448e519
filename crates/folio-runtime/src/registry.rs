//! Component registries and the layered resolution stack.
//!
//! Each bundle owns a registry mapping component hashes to constructors.
//! When several bundles are loaded their registries stack, and lookup walks
//! the stack newest-first. A hash no loaded bundle knows stays unresolved;
//! that is an expected outcome, not an error.

use std::collections::HashMap;

use crate::component::Constructor;

/// A registered component: its human-readable name and constructor.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Component name, for manifests and logs.
    pub name: String,

    /// Constructor invoked on dispatch.
    pub constructor: Constructor,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Hash-to-constructor mapping for one bundle.
///
/// Populated while the bundle is assembled, read-only afterwards.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, RegistryEntry>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `hash`. A duplicate hash replaces the
    /// earlier entry.
    pub fn register(&mut self, hash: impl Into<String>, name: impl Into<String>, constructor: Constructor) {
        self.components.insert(
            hash.into(),
            RegistryEntry {
                name: name.into(),
                constructor,
            },
        );
    }

    /// Look up a component by hash.
    pub fn get(&self, hash: &str) -> Option<&RegistryEntry> {
        self.components.get(hash)
    }

    /// Check if a hash is registered.
    pub fn contains(&self, hash: &str) -> bool {
        self.components.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over `(hash, entry)` pairs in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.components.iter().map(|(h, e)| (h.as_str(), e))
    }

    /// All registered component names.
    pub fn names(&self) -> Vec<&str> {
        self.components.values().map(|e| e.name.as_str()).collect()
    }
}

/// Registries from all loaded bundles, ordered oldest to newest.
///
/// Resolution walks newest-first, so a later bundle can shadow a hash an
/// earlier one registered while unmatched hashes still fall through to the
/// oldest layer.
#[derive(Debug, Default)]
pub struct RegistryStack {
    layers: Vec<ComponentRegistry>,
}

impl RegistryStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registry as the newest layer.
    pub fn push(&mut self, registry: ComponentRegistry) {
        self.layers.push(registry);
    }

    /// Resolve a hash against the stack, newest layer first.
    pub fn resolve(&self, hash: &str) -> Option<&RegistryEntry> {
        self.layers.iter().rev().find_map(|layer| layer.get(hash))
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
