//! Validation capabilities.
//!
//! Two pluggable checks exist: a [`PropertyValidator`] checks a single
//! property value when it is inserted or re-validated, and a
//! [`BuilderValidator`] checks either the whole property set (before
//! construction) or the finished instance (after construction).
//!
//! Validators are shared, never owned: the same `Arc` may be attached to
//! many properties or builders. Plain closures implement both traits.

pub mod stock;

use std::sync::Arc;

use propforge_types::{InvalidBuilderState, InvalidProperty, PropertyValue};

use crate::property::set::PropertySet;

/// Check run against a property's current value.
pub trait PropertyValidator<V: ?Sized>: Send + Sync {
    fn validate(&self, value: &V) -> Result<(), InvalidProperty>;
}

impl<V, F> PropertyValidator<V> for F
where
    V: ?Sized,
    F: Fn(&V) -> Result<(), InvalidProperty> + Send + Sync,
{
    fn validate(&self, value: &V) -> Result<(), InvalidProperty> {
        self(value)
    }
}

/// Shared handle to a property validator.
pub type SharedPropertyValidator<V = PropertyValue> = Arc<dyn PropertyValidator<V>>;

/// What a [`BuilderValidator`] is asked to check.
///
/// Under `PreConstruct` the validator sees the accumulated properties; under
/// `PostConstruct` it sees the freshly built instance.
#[derive(Debug)]
pub enum BuildSubject<'a, T> {
    Properties(&'a PropertySet),
    Instance(&'a T),
}

impl<'a, T> BuildSubject<'a, T> {
    pub fn properties(&self) -> Option<&'a PropertySet> {
        match *self {
            BuildSubject::Properties(properties) => Some(properties),
            BuildSubject::Instance(_) => None,
        }
    }

    pub fn instance(&self) -> Option<&'a T> {
        match *self {
            BuildSubject::Properties(_) => None,
            BuildSubject::Instance(instance) => Some(instance),
        }
    }
}

impl<T> Clone for BuildSubject<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BuildSubject<'_, T> {}

/// Check run by `Builder::build()` against the builder state or the built instance.
pub trait BuilderValidator<T>: Send + Sync {
    fn validate(&self, subject: BuildSubject<'_, T>) -> Result<(), InvalidBuilderState>;
}

impl<T, F> BuilderValidator<T> for F
where
    F: Fn(BuildSubject<'_, T>) -> Result<(), InvalidBuilderState> + Send + Sync,
{
    fn validate(&self, subject: BuildSubject<'_, T>) -> Result<(), InvalidBuilderState> {
        self(subject)
    }
}

/// Shared handle to a builder validator.
pub type SharedBuilderValidator<T> = Arc<dyn BuilderValidator<T>>;

/// Wrap a closure as a shared property validator.
///
/// Exists mostly so the closure's argument type is inferred.
pub fn property_validator<V, F>(check: F) -> SharedPropertyValidator<V>
where
    V: ?Sized + 'static,
    F: Fn(&V) -> Result<(), InvalidProperty> + Send + Sync + 'static,
{
    Arc::new(check)
}

/// Wrap a closure as a shared builder validator.
pub fn builder_validator<T, F>(check: F) -> SharedBuilderValidator<T>
where
    T: 'static,
    F: Fn(BuildSubject<'_, T>) -> Result<(), InvalidBuilderState> + Send + Sync + 'static,
{
    Arc::new(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closure_property_validator() {
        let positive = property_validator(|value: &i64| {
            if *value > 0 {
                Ok(())
            } else {
                Err(InvalidProperty::new("must be positive"))
            }
        });
        assert!(positive.validate(&3).is_ok());
        assert_eq!(
            positive.validate(&0).unwrap_err().message,
            "must be positive"
        );
    }

    #[test]
    fn test_closure_builder_validator_sees_both_subjects() {
        let validator = builder_validator(|subject: BuildSubject<'_, String>| match subject {
            BuildSubject::Properties(props) if props.is_empty() => {
                Err(InvalidBuilderState::new("no properties"))
            }
            BuildSubject::Properties(_) => Ok(()),
            BuildSubject::Instance(s) if s.is_empty() => {
                Err(InvalidBuilderState::new("empty instance"))
            }
            BuildSubject::Instance(_) => Ok(()),
        });

        let empty = PropertySet::new();
        assert!(validator.validate(BuildSubject::Properties(&empty)).is_err());

        let instance = "built".to_string();
        assert!(validator.validate(BuildSubject::Instance(&instance)).is_ok());
        let blank = String::new();
        assert_eq!(
            validator
                .validate(BuildSubject::Instance(&blank))
                .unwrap_err()
                .message,
            "empty instance"
        );
    }

    #[test]
    fn test_build_subject_accessors() {
        let props = PropertySet::new();
        let subject: BuildSubject<'_, u8> = BuildSubject::Properties(&props);
        assert!(subject.properties().is_some());
        assert!(subject.instance().is_none());

        let value = 7u8;
        let subject = BuildSubject::Instance(&value);
        assert_eq!(subject.instance(), Some(&7));
        assert!(subject.properties().is_none());
    }

    #[test]
    fn test_shared_validator_reused() {
        let not_null: SharedPropertyValidator = property_validator(|v: &PropertyValue| {
            if v.is_null() {
                Err(InvalidProperty::new("null"))
            } else {
                Ok(())
            }
        });
        let other = Arc::clone(&not_null);
        assert!(not_null.validate(&json!(1)).is_ok());
        assert!(other.validate(&PropertyValue::Null).is_err());
        assert_eq!(Arc::strong_count(&not_null), 2);
    }
}
