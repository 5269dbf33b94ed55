//! The builder: a named property set plus the two-phase `build()` contract.
//!
//! A [`Builder`] owns its properties exclusively and hands out only shared
//! borrows of them. Insertion runs the property's own validator first, and
//! a rejected property never enters the set. `build()` leaves the properties
//! in place, so one builder can produce many instances from the same
//! template.

pub mod erased;
pub mod factory;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use propforge_types::config::BuilderSettings;
use propforge_types::{
    BuildStage, BuilderError, InstanceBuildError, PropertyValue, ValidationPolicy,
};

use crate::property::Property;
use crate::property::set::PropertySet;
use crate::validator::{BuildSubject, SharedBuilderValidator};

use factory::{InstanceFactory, SharedInstanceFactory};

/// Accumulates properties and builds instances of `T` through a factory.
pub struct Builder<T> {
    name: String,
    properties: PropertySet,
    validator: Option<SharedBuilderValidator<T>>,
    factory: SharedInstanceFactory<T>,
    policy: ValidationPolicy,
}

impl<T: 'static> Builder<T> {
    /// Create an empty builder registered under `name`.
    ///
    /// The policy defaults to `PostConstruct`.
    pub fn new(name: impl Into<String>, factory: impl InstanceFactory<T> + 'static) -> Self {
        Self::with_shared_factory(name, Arc::new(factory))
    }

    /// Create an empty builder sharing an existing factory.
    pub fn with_shared_factory(name: impl Into<String>, factory: SharedInstanceFactory<T>) -> Self {
        Self {
            name: name.into(),
            properties: PropertySet::new(),
            validator: None,
            factory,
            policy: ValidationPolicy::default(),
        }
    }

    /// Create an empty builder using the policy from `settings`.
    pub fn from_config(
        name: impl Into<String>,
        factory: impl InstanceFactory<T> + 'static,
        settings: &BuilderSettings,
    ) -> Self {
        Self::new(name, factory).with_policy(settings.validation_policy)
    }
}

impl<T> Builder<T> {
    /// The registry key for this builder.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ValidationPolicy) {
        self.policy = policy;
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn factory(&self) -> &SharedInstanceFactory<T> {
        &self.factory
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    pub fn property_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys()
    }

    pub fn property_values(&self) -> impl Iterator<Item = &PropertyValue> + '_ {
        self.properties.values()
    }

    /// Plain key -> value pairs, copied out of the property set.
    pub fn map_properties(&self) -> HashMap<String, PropertyValue> {
        self.properties.to_value_map()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn contains_property(&self, key: &str) -> bool {
        self.properties.contains(key)
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Validate `property` and insert it.
    ///
    /// Fails with `NullProperty` for an empty key, `DuplicateKey` if the key
    /// is taken, or `InvalidProperty` if the property's validator rejects
    /// its value. On failure the property set is unchanged.
    pub fn put_property(&mut self, mut property: Property) -> Result<(), BuilderError> {
        if property.key().trim().is_empty() {
            return Err(BuilderError::NullProperty);
        }

        match self.properties.entry(property.key().clone()) {
            Entry::Occupied(occupied) => {
                tracing::debug!(
                    builder = %self.name,
                    key = %occupied.key(),
                    "rejected duplicate property key"
                );
                Err(BuilderError::DuplicateKey(occupied.key().clone()))
            }
            Entry::Vacant(vacant) => {
                if let Err(source) = property.validate() {
                    tracing::warn!(
                        builder = %self.name,
                        key = %vacant.key(),
                        "property rejected by its validator: {source}"
                    );
                    return Err(BuilderError::InvalidProperty {
                        key: vacant.into_key(),
                        source,
                    });
                }
                tracing::debug!(builder = %self.name, key = %vacant.key(), "property inserted");
                vacant.insert(property);
                Ok(())
            }
        }
    }

    /// Like [`Builder::put_property`], treating `None` as a null property.
    pub fn put_property_opt(&mut self, property: Option<Property>) -> Result<(), BuilderError> {
        match property {
            Some(property) => self.put_property(property),
            None => Err(BuilderError::NullProperty),
        }
    }

    /// Insert an unvalidated property built from `key` and `value`.
    pub fn put_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<(), BuilderError> {
        self.put_property(Property::with_value(key, value))
    }

    /// Chaining form of [`Builder::put_property`].
    pub fn with_property(mut self, property: Property) -> Result<Self, BuilderError> {
        self.put_property(property)?;
        Ok(self)
    }

    /// Chaining form of [`Builder::put_value`].
    pub fn with_value(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<Self, BuilderError> {
        self.put_value(key, value)?;
        Ok(self)
    }

    /// Replace the value of an existing property and re-validate it.
    ///
    /// If the property's validator rejects the new value, the old value stays.
    pub fn set_value(
        &mut self,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), BuilderError> {
        let Some(current) = self.properties.get_mut(key) else {
            return Err(BuilderError::PropertyNotFound(key.to_string()));
        };

        let mut candidate = current.clone();
        candidate.set_value(value);
        candidate
            .validate()
            .map_err(|source| BuilderError::InvalidProperty {
                key: key.to_string(),
                source,
            })?;

        *current = candidate;
        tracing::debug!(builder = %self.name, key, "property value replaced");
        Ok(())
    }

    /// Move the property stored under `old` to `new`.
    pub fn set_key(&mut self, old: &str, new: impl Into<String>) -> Result<(), BuilderError> {
        let new = new.into();
        if new.trim().is_empty() {
            return Err(BuilderError::NullProperty);
        }
        let Some(current) = self.properties.get(old) else {
            return Err(BuilderError::PropertyNotFound(old.to_string()));
        };
        if old == new {
            return Ok(());
        }
        if self.properties.contains(&new) {
            return Err(BuilderError::DuplicateKey(new));
        }

        let mut candidate = current.clone();
        candidate.set_key(new.clone());
        if let Err(source) = candidate.validate() {
            return Err(BuilderError::InvalidProperty { key: new, source });
        }

        self.properties.remove(old);
        tracing::debug!(builder = %self.name, old, new = %new, "property key renamed");
        self.properties.entry(new).or_insert(candidate);
        Ok(())
    }

    /// Remove and return the property under `key`.
    pub fn remove_property(&mut self, key: &str) -> Option<Property> {
        let removed = self.properties.remove(key);
        if removed.is_some() {
            tracing::debug!(builder = %self.name, key, "property removed");
        }
        removed
    }

    pub fn clear_properties(&mut self) {
        self.properties.clear();
    }

    // -----------------------------------------------------------------------
    // Builder validator
    // -----------------------------------------------------------------------

    pub fn builder_validator(&self) -> Option<&SharedBuilderValidator<T>> {
        self.validator.as_ref()
    }

    pub fn set_builder_validator(&mut self, validator: SharedBuilderValidator<T>) {
        self.validator = Some(validator);
    }

    pub fn clear_builder_validator(&mut self) -> Option<SharedBuilderValidator<T>> {
        self.validator.take()
    }

    pub fn with_builder_validator(mut self, validator: SharedBuilderValidator<T>) -> Self {
        self.validator = Some(validator);
        self
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    /// Validate and construct a new instance.
    ///
    /// Under `PreConstruct` the builder validator (if any) checks the
    /// property set and construction only runs if it passes. Under
    /// `PostConstruct` the factory runs first and the validator checks the
    /// result; a rejected instance is dropped. Without a builder validator
    /// the factory's result is returned as-is.
    pub fn build(&self) -> Result<T, InstanceBuildError> {
        let mut stage = BuildStage::Idle;
        tracing::debug!(builder = %self.name, policy = %self.policy, "build started");

        let result = match self.policy {
            ValidationPolicy::PreConstruct => {
                stage = stage.next(self.policy);
                self.validate_subject(stage, BuildSubject::Properties(&self.properties))
                    .and_then(|()| {
                        stage = stage.next(self.policy);
                        self.construct(stage)
                    })
            }
            ValidationPolicy::PostConstruct => {
                stage = stage.next(self.policy);
                self.construct(stage).and_then(|instance| {
                    stage = stage.next(self.policy);
                    self.validate_subject(stage, BuildSubject::Instance(&instance))
                        .map(|()| instance)
                })
            }
        };

        match &result {
            Ok(_) => {
                stage = stage.next(self.policy);
                tracing::debug!(builder = %self.name, %stage, "build finished");
            }
            Err(err) => {
                tracing::warn!(
                    builder = %self.name,
                    stage = %BuildStage::Failed,
                    failed_in = %stage,
                    "build failed: {err}"
                );
            }
        }
        result
    }

    fn construct(&self, stage: BuildStage) -> Result<T, InstanceBuildError> {
        tracing::trace!(builder = %self.name, %stage, "constructing instance");
        self.factory
            .build_instance(&self.properties)
            .map_err(|source| InstanceBuildError::Construction {
                builder: self.name.clone(),
                source,
            })
    }

    fn validate_subject(
        &self,
        stage: BuildStage,
        subject: BuildSubject<'_, T>,
    ) -> Result<(), InstanceBuildError> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        tracing::trace!(builder = %self.name, %stage, "running builder validator");
        validator.validate(subject).map_err(|source| match subject {
            BuildSubject::Properties(_) => InstanceBuildError::PreValidation {
                builder: self.name.clone(),
                source,
            },
            BuildSubject::Instance(_) => InstanceBuildError::PostValidation {
                builder: self.name.clone(),
                source,
            },
        })
    }
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            properties: self.properties.clone(),
            validator: self.validator.clone(),
            factory: Arc::clone(&self.factory),
            policy: self.policy,
        }
    }
}

impl<T> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("properties", &self.properties)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
