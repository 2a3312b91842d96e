//! Naming conventions shared by the mapper and the builder
//!
//! - default labels from camel-case attribute names
//! - DOM ids that are always valid HTML ids
//! - the key/timestamp filter applied to model attributes

use once_cell::sync::Lazy;
use regex::Regex;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel-case regex"));

static INVALID_ID_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("valid id regex"));

static AUTO_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(id|at)$").expect("valid auto-field regex"));

/// Turn an attribute name into a display label
///
/// Camel-case boundaries become spaces and the first letter is upper-cased.
/// Applying it to its own output is a no-op.
///
/// ```rust
/// use formao::forms::humanize;
///
/// assert_eq!(humanize("startDate"), "Start Date");
/// assert_eq!(humanize("name"), "Name");
/// assert_eq!(humanize("Start Date"), "Start Date");
/// ```
#[must_use]
pub fn humanize(field: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(field, "$1 $2");
    let mut chars = split.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Replace each run of characters outside `[A-Za-z0-9_-]` with `_`
#[must_use]
pub fn sanitize_id(raw: &str) -> String {
    INVALID_ID_RUN.replace_all(raw, "_").into_owned()
}

/// DOM id of `field` inside the form identified by `form_id`
///
/// ```rust
/// use formao::forms::dom_id;
///
/// assert_eq!(dom_id("F", "my field!"), "F_my_field_");
/// ```
#[must_use]
pub fn dom_id(form_id: &str, field: &str) -> String {
    format!("{form_id}_{}", sanitize_id(field))
}

/// Whether an attribute is a key or timestamp column left out of forms
///
/// Matches names ending in `id` or `at`, case-insensitively.
#[must_use]
pub fn is_auto_field(field: &str) -> bool {
    AUTO_FIELD.is_match(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("startDate"), "Start Date");
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize("completedOn2Days"), "Completed On2 Days");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_id("my field!"), "my_field_");
        assert_eq!(sanitize_id("a  ..b"), "a_b");
        assert_eq!(sanitize_id("keep-this_one"), "keep-this_one");
    }

    #[test]
    fn test_dom_id() {
        assert_eq!(dom_id("MyModel_Form", "startDate"), "MyModel_Form_startDate");
        assert_eq!(dom_id("F", "my field!"), "F_my_field_");
    }

    #[test]
    fn test_auto_fields() {
        for name in ["id", "ID", "projectId", "createdAt", "updatedAT", "format"] {
            assert!(is_auto_field(name), "{name} should be filtered");
        }
        for name in ["name", "description", "startDate", "identity", "atlas"] {
            assert!(!is_auto_field(name), "{name} should be kept");
        }
    }

    proptest! {
        #[test]
        fn humanize_is_idempotent(field in "[a-zA-Z][a-zA-Z0-9]{0,24}") {
            let once = humanize(&field);
            prop_assert_eq!(humanize(&once), once);
        }

        #[test]
        fn sanitized_ids_are_valid(raw in ".{0,40}") {
            let id = sanitize_id(&raw);
            prop_assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }
}
