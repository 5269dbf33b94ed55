use std::sync::{Arc, OnceLock};

use propforge_types::{InvalidProperty, PropertyValue};

use crate::builder::erased::RegisteredBuilder;
use crate::validator::{PropertyValidator, SharedPropertyValidator};

use super::builders::BuilderRegistry;

/// Process-wide default, bound to [`BuilderRegistry::get_default`].
static DEFAULT_VALIDATORS: OnceLock<Arc<ValidatorRegistry>> = OnceLock::new();

/// Resolves property validators by builder name and property key.
///
/// Holds no validators of its own: every lookup goes through the builder
/// registry to the builder, then to the property, then to its validator.
#[derive(Clone)]
pub struct ValidatorRegistry {
    builders: Arc<BuilderRegistry>,
}

impl ValidatorRegistry {
    /// A registry resolving through `builders`.
    pub fn new(builders: Arc<BuilderRegistry>) -> Self {
        Self { builders }
    }

    /// The process-wide registry, resolving through the default builder registry.
    pub fn get_default() -> Arc<ValidatorRegistry> {
        Arc::clone(DEFAULT_VALIDATORS.get_or_init(|| {
            tracing::debug!("initializing default validator registry");
            Arc::new(ValidatorRegistry::new(BuilderRegistry::get_default()))
        }))
    }

    pub fn builder_registry(&self) -> &Arc<BuilderRegistry> {
        &self.builders
    }

    /// The validator of property `key` in builder `builder_name`.
    ///
    /// `None` if the builder is unknown, it has no such property, or the
    /// property has no validator.
    pub fn get_validator(&self, builder_name: &str, key: &str) -> Option<SharedPropertyValidator> {
        self.builders
            .get_builder(builder_name)?
            .property_validator(key)
    }

    /// Check `value` with the validator of property `key` in `builder_name`.
    ///
    /// Passes when no validator resolves.
    pub fn validate(
        &self,
        builder_name: &str,
        key: &str,
        value: &PropertyValue,
    ) -> Result<(), InvalidProperty> {
        match self.get_validator(builder_name, key) {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }
}
