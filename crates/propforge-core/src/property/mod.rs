//! A single named, optionally validated value.
//!
//! Changing the key, the value or the validator marks the property as not
//! validated until [`Property::validate`] succeeds again.

pub mod set;

use std::fmt;
use std::sync::Arc;

use propforge_types::{InvalidProperty, PropertyValue};

use crate::validator::{PropertyValidator, SharedPropertyValidator};

/// Key, value and optional validator.
///
/// Builders hold `Property<String, PropertyValue>`; other key/value types are
/// available to callers that want a property bound to one concrete type.
pub struct Property<K = String, V = PropertyValue> {
    key: K,
    value: V,
    validator: Option<SharedPropertyValidator<V>>,
    validated: bool,
}

impl<K, V: Default> Property<K, V> {
    /// A property with the default value (`Null` for `PropertyValue`) and no validator.
    pub fn new(key: impl Into<K>) -> Self {
        Self::with_value(key, V::default())
    }
}

impl<K, V> Property<K, V> {
    /// A property with no validator.
    pub fn with_value(key: impl Into<K>, value: impl Into<V>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            validator: None,
            validated: false,
        }
    }

    /// A property checked by `validator`.
    pub fn with_validator(
        key: impl Into<K>,
        value: impl Into<V>,
        validator: SharedPropertyValidator<V>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            validator: Some(validator),
            validated: false,
        }
    }

    /// Attach `validator`, consuming and returning the property.
    pub fn validated_by(mut self, validator: SharedPropertyValidator<V>) -> Self {
        self.set_property_validator(validator);
        self
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<K>) {
        self.key = key.into();
        self.validated = false;
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<V>) {
        self.value = value.into();
        self.validated = false;
    }

    /// Split into key and value, dropping the validator.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn property_validator(&self) -> Option<&SharedPropertyValidator<V>> {
        self.validator.as_ref()
    }

    pub fn set_property_validator(&mut self, validator: SharedPropertyValidator<V>) {
        self.validator = Some(validator);
        self.validated = false;
    }

    /// Remove the validator. A property without one always validates.
    pub fn clear_property_validator(&mut self) -> Option<SharedPropertyValidator<V>> {
        self.validated = false;
        self.validator.take()
    }

    /// Run the validator, if any, against the current value.
    ///
    /// The validator's rejection is returned unchanged.
    pub fn validate(&mut self) -> Result<(), InvalidProperty> {
        self.check()?;
        self.validated = true;
        Ok(())
    }

    /// Same check as [`Property::validate`] without recording the outcome.
    pub fn check(&self) -> Result<(), InvalidProperty> {
        match &self.validator {
            Some(validator) => validator.validate(&self.value),
            None => Ok(()),
        }
    }

    /// True after a successful `validate()` with no mutation since.
    pub fn is_validated(&self) -> bool {
        self.validated
    }
}

impl<K: Clone, V: Clone> Clone for Property<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            validator: self.validator.clone(),
            validated: self.validated,
        }
    }
}

/// Equal when key and value are equal and both share the same validator (or neither has one).
impl<K: PartialEq, V: PartialEq> PartialEq for Property<K, V> {
    fn eq(&self, other: &Self) -> bool {
        let same_validator = match (&self.validator, &other.validator) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.key == other.key && self.value == other.value && same_validator
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Property<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("has_validator", &self.validator.is_some())
            .field("validated", &self.validated)
            .finish()
    }
}
