//! Per-field validation messages
//!
//! Validation itself is the host application's job. These types only carry
//! the resulting messages into field descriptors and produce the CSS hooks
//! templates use to highlight failing fields.

use std::collections::HashMap;

use serde::Serialize;

/// CSS class applied to fields with validation messages
pub const ERROR_CLASS: &str = "has-error";

/// Collection of validation messages keyed by field name
///
/// # Examples
///
/// ```rust
/// use formao::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("name", "is required");
/// errors.add("name", "is too short");
///
/// assert!(errors.has_errors());
/// assert_eq!(errors.for_field("name").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create a new empty error collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Check if there are any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All messages for a specific field
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of messages
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Merge messages from another collection
    pub fn merge(&mut self, other: &Self) {
        for (field, messages) in &other.errors {
            self.errors
                .entry(field.clone())
                .or_default()
                .extend(messages.iter().cloned());
        }
    }

    /// Iterate over fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.add(field, message);
        }
        errors
    }
}

/// Attributes a template can splat onto a failing field's wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationClass {
    /// Always [`ERROR_CLASS`]
    pub class: String,
    /// All messages for the field, joined with `"; "`
    #[serde(rename = "data-message")]
    pub data_message: String,
}

/// Map every field with messages to its error-highlighting attributes
#[must_use]
pub fn validation_classes(errors: &ValidationErrors) -> HashMap<String, ValidationClass> {
    errors
        .iter()
        .map(|(field, messages)| {
            (
                field.to_string(),
                ValidationClass {
                    class: ERROR_CLASS.to_string(),
                    data_message: messages.join("; "),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_new() {
        let errors = ValidationErrors::new();
        assert!(!errors.has_errors());
        assert_eq!(errors.count(), 0);
        assert!(errors.for_field("name").is_empty());
    }

    #[test]
    fn test_validation_errors_merge() {
        let mut errors1: ValidationErrors = [("name", "is required")].into_iter().collect();
        let errors2: ValidationErrors = [("name", "is too short"), ("endDate", "before start")]
            .into_iter()
            .collect();

        errors1.merge(&errors2);

        assert_eq!(errors1.for_field("name").len(), 2);
        assert_eq!(errors1.for_field("endDate").len(), 1);
        assert_eq!(errors1.count(), 3);
    }

    #[test]
    fn test_validation_classes() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        errors.add("name", "is too short");

        let classes = validation_classes(&errors);
        assert_eq!(classes.len(), 1);
        let name = &classes["name"];
        assert_eq!(name.class, "has-error");
        assert_eq!(name.data_message, "is required; is too short");

        let json = serde_json::to_value(name).unwrap();
        assert_eq!(json["data-message"], "is required; is too short");
    }
}
