//! Type-erased view of a builder, used by the registries.
//!
//! Registries index builders of many target types under one map, so they
//! store `Arc<dyn RegisteredBuilder>`. The erased view exposes everything
//! that does not mention `T`; [`RegisteredBuilder::into_any`] lets callers
//! that know the target type recover the concrete `Arc<Builder<T>>`.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use propforge_types::{PropertyValue, ValidationPolicy};

use crate::property::Property;
use crate::property::set::PropertySet;
use crate::validator::SharedPropertyValidator;

use super::Builder;

/// Object-safe, read-only view of a [`Builder`] of any target type.
///
/// Blanket-implemented for every `Builder<T>` with `T: 'static`.
pub trait RegisteredBuilder: Send + Sync {
    fn name(&self) -> &str;

    /// `std::any::type_name` of the target type, for diagnostics.
    fn target_type(&self) -> &'static str;

    fn policy(&self) -> ValidationPolicy;

    fn properties(&self) -> &PropertySet;

    fn has_builder_validator(&self) -> bool;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    fn property(&self, key: &str) -> Option<&Property> {
        self.properties().get(key)
    }

    /// The validator attached to the property under `key`, if both exist.
    fn property_validator(&self, key: &str) -> Option<SharedPropertyValidator> {
        self.property(key)
            .and_then(|p| p.property_validator().cloned())
    }

    fn map_properties(&self) -> HashMap<String, PropertyValue> {
        self.properties().to_value_map()
    }
}

/// Shared handle stored in a [`BuilderRegistry`](crate::BuilderRegistry).
pub type SharedBuilder = Arc<dyn RegisteredBuilder>;

impl<T: 'static> RegisteredBuilder for Builder<T> {
    fn name(&self) -> &str {
        Builder::name(self)
    }

    fn target_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn policy(&self) -> ValidationPolicy {
        Builder::policy(self)
    }

    fn properties(&self) -> &PropertySet {
        Builder::properties(self)
    }

    fn has_builder_validator(&self) -> bool {
        self.builder_validator().is_some()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Recover the concrete builder behind a shared handle.
///
/// Returns `None` if the builder targets a type other than `T`.
pub fn downcast_builder<T: 'static>(builder: SharedBuilder) -> Option<Arc<Builder<T>>> {
    builder.into_any().downcast::<Builder<T>>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::stock::non_negative;
    use serde_json::json;

    fn number_builder() -> Builder<i64> {
        Builder::new("number", |props: &PropertySet| -> anyhow::Result<i64> {
            Ok(props.get_as("n")?)
        })
    }

    #[test]
    fn test_erased_view_matches_builder() {
        let validator = non_negative();
        let builder = number_builder()
            .with_property(Property::with_validator("n", 5, Arc::clone(&validator)))
            .unwrap();
        let shared: SharedBuilder = Arc::new(builder);

        assert_eq!(shared.name(), "number");
        assert_eq!(shared.target_type(), "i64");
        assert_eq!(shared.policy(), ValidationPolicy::PostConstruct);
        assert!(!shared.has_builder_validator());
        assert_eq!(shared.map_properties().get("n"), Some(&json!(5)));

        let found = shared.property_validator("n").unwrap();
        assert!(Arc::ptr_eq(&found, &validator));
        assert!(shared.property_validator("missing").is_none());
    }

    #[test]
    fn test_property_without_validator_yields_none() {
        let builder = number_builder().with_value("n", 1).unwrap();
        let shared: SharedBuilder = Arc::new(builder);
        assert!(shared.property("n").is_some());
        assert!(shared.property_validator("n").is_none());
    }

    #[test]
    fn test_downcast_to_concrete_builder() {
        let shared: SharedBuilder = Arc::new(number_builder().with_value("n", 21).unwrap());

        let typed = downcast_builder::<i64>(Arc::clone(&shared)).unwrap();
        assert_eq!(typed.build().unwrap(), 21);

        assert!(downcast_builder::<String>(shared).is_none());
    }
}
