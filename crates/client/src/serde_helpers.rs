//! Serde helpers for Graph's loose JSON typing.
//!
//! Responsibilities:
//! - Treat explicit `null` the same as an absent field for collection and string fields.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (required/optional business rules).
//!
//! Invariants / assumptions:
//! - Graph returns `null` for unset directory attributes and, on some tenants,
//!   for empty collections such as `disabledPlans`.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an optional string, mapping blank values to `None`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        plans: Vec<String>,
        #[serde(default, deserialize_with = "blank_as_none")]
        department: Option<String>,
    }

    #[test]
    fn test_null_collection_becomes_empty() {
        let sample: Sample = serde_json::from_str(r#"{"plans": null}"#).unwrap();
        assert!(sample.plans.is_empty());

        let sample: Sample = serde_json::from_str(r#"{"plans": ["a"]}"#).unwrap();
        assert_eq!(sample.plans, vec!["a".to_string()]);
    }

    #[test]
    fn test_blank_string_becomes_none() {
        let sample: Sample = serde_json::from_str(r#"{"department": "   "}"#).unwrap();
        assert!(sample.department.is_none());

        let sample: Sample = serde_json::from_str(r#"{"department": null}"#).unwrap();
        assert!(sample.department.is_none());

        let sample: Sample = serde_json::from_str(r#"{"department": "Sales"}"#).unwrap();
        assert_eq!(sample.department.as_deref(), Some("Sales"));
    }
}
