//! Property value representation.
//!
//! A property may hold any value, including an explicit null. Rather than
//! type-erasing with `Any`, values are a closed tagged variant: the JSON data
//! model (null, bool, number, string, array, object). Builders that want a
//! single concrete type per property can still use `Property<K, V>` directly.

/// Value stored in a builder property. `PropertyValue::Null` is the absent sentinel.
pub type PropertyValue = serde_json::Value;

/// Whether a value is the absent/null sentinel.
pub fn is_absent(value: &PropertyValue) -> bool {
    value.is_null()
}

/// Short, stable name of the variant held by `value` (used in log fields and errors).
pub fn kind_name(value: &PropertyValue) -> &'static str {
    match value {
        PropertyValue::Null => "null",
        PropertyValue::Bool(_) => "bool",
        PropertyValue::Number(_) => "number",
        PropertyValue::String(_) => "string",
        PropertyValue::Array(_) => "array",
        PropertyValue::Object(_) => "object",
    }
}
