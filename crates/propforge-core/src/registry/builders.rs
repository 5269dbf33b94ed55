use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::builder::Builder;
use crate::builder::erased::{RegisteredBuilder, SharedBuilder, downcast_builder};

/// Process-wide default registry, created on first access.
static DEFAULT_BUILDERS: OnceLock<Arc<BuilderRegistry>> = OnceLock::new();

/// Registry of builders, indexed by name.
///
/// Holds shared handles only: removing a builder from the registry does not
/// drop it while other `Arc`s exist. Uses `DashMap` so registration, removal
/// and lookup are safe from many threads at once; handles are cloned out so
/// no map guard outlives a call.
#[derive(Default)]
pub struct BuilderRegistry {
    builders: DashMap<String, SharedBuilder>,
}

impl BuilderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            builders: DashMap::new(),
        }
    }

    /// The process-wide registry.
    ///
    /// Concurrent first calls still create exactly one instance.
    pub fn get_default() -> Arc<BuilderRegistry> {
        Arc::clone(DEFAULT_BUILDERS.get_or_init(|| {
            tracing::debug!("initializing default builder registry");
            Arc::new(BuilderRegistry::new())
        }))
    }

    /// Snapshot of every registered builder.
    pub fn builders(&self) -> HashMap<String, SharedBuilder> {
        self.builders
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect()
    }

    /// Look up a builder by name.
    pub fn get_builder(&self, name: &str) -> Option<SharedBuilder> {
        self.builders.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Look up a builder by name and recover its concrete type.
    ///
    /// Returns `None` if the name is unknown or the builder targets another type.
    pub fn get_typed<T: 'static>(&self, name: &str) -> Option<Arc<Builder<T>>> {
        self.get_builder(name).and_then(downcast_builder::<T>)
    }

    /// Insert or replace the builder under `name`, returning the replaced one.
    pub fn put_builder(&self, name: impl Into<String>, builder: SharedBuilder) -> Option<SharedBuilder> {
        let name = name.into();
        tracing::debug!(builder = %name, target_type = builder.target_type(), "registering builder");
        self.builders.insert(name, builder)
    }

    /// Register `builder` under its own name and return the shared handle.
    pub fn register<T: 'static>(&self, builder: Builder<T>) -> Arc<Builder<T>> {
        let builder = Arc::new(builder);
        self.put_builder(builder.name().to_string(), Arc::clone(&builder) as SharedBuilder);
        builder
    }

    /// Remove the builder under `name`, returning it if present.
    pub fn remove_builder(&self, name: &str) -> Option<SharedBuilder> {
        let removed = self.builders.remove(name).map(|(_, b)| b);
        if removed.is_some() {
            tracing::debug!(builder = %name, "removed builder");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Snapshot of all registered names.
    pub fn names(&self) -> Vec<String> {
        self.builders.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    pub fn clear(&self) {
        self.builders.clear();
    }
}
