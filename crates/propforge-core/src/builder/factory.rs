//! The construction extension point.
//!
//! The core never knows how to build a target type. Each target supplies an
//! [`InstanceFactory`] that reads the builder's current properties and
//! returns a new instance. Closures taking `&PropertySet` implement it.

use std::sync::Arc;

use crate::property::set::PropertySet;

/// Builds one `T` from a property set.
pub trait InstanceFactory<T>: Send + Sync {
    fn build_instance(&self, properties: &PropertySet) -> anyhow::Result<T>;
}

impl<T, F> InstanceFactory<T> for F
where
    F: Fn(&PropertySet) -> anyhow::Result<T> + Send + Sync,
{
    fn build_instance(&self, properties: &PropertySet) -> anyhow::Result<T> {
        self(properties)
    }
}

/// Shared handle to a factory.
pub type SharedInstanceFactory<T> = Arc<dyn InstanceFactory<T>>;

/// Wrap a closure as a shared factory.
pub fn instance_factory<T, F>(build: F) -> SharedInstanceFactory<T>
where
    T: 'static,
    F: Fn(&PropertySet) -> anyhow::Result<T> + Send + Sync + 'static,
{
    Arc::new(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use serde_json::json;

    struct Greeting;

    impl InstanceFactory<String> for Greeting {
        fn build_instance(&self, properties: &PropertySet) -> anyhow::Result<String> {
            let name: String = properties.get_as("name")?;
            Ok(format!("hello {name}"))
        }
    }

    #[test]
    fn test_struct_factory() {
        let mut set = PropertySet::new();
        set.entry("name".to_string())
            .or_insert_with(|| Property::with_value("name", json!("Ann")));
        assert_eq!(Greeting.build_instance(&set).unwrap(), "hello Ann");
    }

    #[test]
    fn test_closure_factory_propagates_error() {
        let factory = instance_factory(|props: &PropertySet| {
            let n: i64 = props.get_as("n")?;
            Ok(n * 2)
        });
        let err = factory.build_instance(&PropertySet::new()).unwrap_err();
        assert!(err.to_string().contains("'n' is missing"));
    }
}
