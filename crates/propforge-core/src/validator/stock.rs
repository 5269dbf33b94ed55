//! Ready-made validators for [`PropertyValue`] properties.

use propforge_types::value::kind_name;
use propforge_types::{InvalidProperty, PropertyValue};

use super::{SharedPropertyValidator, property_validator};

/// Rejects the null sentinel.
pub fn not_null() -> SharedPropertyValidator {
    property_validator(|value: &PropertyValue| {
        if value.is_null() {
            Err(InvalidProperty::new("value must not be null"))
        } else {
            Ok(())
        }
    })
}

/// Rejects numbers below zero and anything that is not a number.
pub fn non_negative() -> SharedPropertyValidator {
    property_validator(|value: &PropertyValue| match value.as_f64() {
        Some(n) if n >= 0.0 => Ok(()),
        Some(n) => Err(InvalidProperty::new(format!(
            "value must not be negative, got {n}"
        ))),
        None => Err(InvalidProperty::new(format!(
            "expected a number, got {}",
            kind_name(value)
        ))),
    })
}

/// Accepts numbers in `min..=max`.
pub fn in_range(min: f64, max: f64) -> SharedPropertyValidator {
    property_validator(move |value: &PropertyValue| match value.as_f64() {
        Some(n) if (min..=max).contains(&n) => Ok(()),
        Some(n) => Err(InvalidProperty::new(format!(
            "value {n} is outside {min}..={max}"
        ))),
        None => Err(InvalidProperty::new(format!(
            "expected a number, got {}",
            kind_name(value)
        ))),
    })
}

/// Accepts strings with at least one non-whitespace character.
pub fn non_empty_string() -> SharedPropertyValidator {
    property_validator(|value: &PropertyValue| match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(InvalidProperty::new("string must not be empty")),
        None => Err(InvalidProperty::new(format!(
            "expected a string, got {}",
            kind_name(value)
        ))),
    })
}

/// Accepts only values equal to one of `allowed`.
pub fn one_of(allowed: Vec<PropertyValue>) -> SharedPropertyValidator {
    property_validator(move |value: &PropertyValue| {
        if allowed.contains(value) {
            Ok(())
        } else {
            Err(InvalidProperty::new(format!("value {value} is not allowed")))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_null() {
        let v = not_null();
        assert!(v.validate(&json!(0)).is_ok());
        assert!(v.validate(&PropertyValue::Null).is_err());
    }

    #[test]
    fn test_non_negative() {
        let v = non_negative();
        assert!(v.validate(&json!(0)).is_ok());
        assert!(v.validate(&json!(30)).is_ok());
        assert!(v.validate(&json!(2.5)).is_ok());

        let err = v.validate(&json!(-1)).unwrap_err();
        assert!(err.message.contains("negative"));

        let err = v.validate(&json!("thirty")).unwrap_err();
        assert_eq!(err.message, "expected a number, got string");
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let v = in_range(0.0, 150.0);
        assert!(v.validate(&json!(0)).is_ok());
        assert!(v.validate(&json!(150)).is_ok());
        assert!(v.validate(&json!(151)).is_err());
        assert!(v.validate(&json!(null)).is_err());
    }

    #[test]
    fn test_non_empty_string() {
        let v = non_empty_string();
        assert!(v.validate(&json!("Ann")).is_ok());
        assert!(v.validate(&json!("   ")).is_err());
        assert!(v.validate(&json!(1)).is_err());
    }

    #[test]
    fn test_one_of() {
        let v = one_of(vec![json!("red"), json!("green")]);
        assert!(v.validate(&json!("red")).is_ok());
        let err = v.validate(&json!("blue")).unwrap_err();
        assert_eq!(err.message, "value \"blue\" is not allowed");
    }
}
