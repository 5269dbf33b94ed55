//! Builder-pattern construction from named, validated properties.
//!
//! A [`Builder`] accumulates [`Property`] values keyed by name, optionally
//! validating each one on insertion, and turns them into a target instance
//! through an [`InstanceFactory`] supplied by the caller. A builder-level
//! [`BuilderValidator`] may check the property set before construction or
//! the finished instance after it, depending on the [`ValidationPolicy`].
//!
//! [`BuilderRegistry`] and [`ValidatorRegistry`] index builders by name so
//! that unrelated code can find a builder, or a property's validator,
//! without holding a reference to it. Both can be constructed explicitly or
//! reached through a lazily initialized process-wide default.

pub mod builder;
pub mod config;
pub mod property;
pub mod registry;
pub mod validator;

pub use builder::factory::{InstanceFactory, SharedInstanceFactory, instance_factory};
pub use builder::erased::{RegisteredBuilder, SharedBuilder};
pub use builder::Builder;
pub use property::set::PropertySet;
pub use property::Property;
pub use registry::builders::BuilderRegistry;
pub use registry::validators::ValidatorRegistry;
pub use validator::{
    BuildSubject, BuilderValidator, PropertyValidator, SharedBuilderValidator,
    SharedPropertyValidator, builder_validator, property_validator,
};

pub use propforge_types::{
    BuildStage, BuilderError, ConfigError, InstanceBuildError, InvalidBuilderState,
    InvalidProperty, PropertyAccessError, PropertyValue, ValidationPolicy,
};
