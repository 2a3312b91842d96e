//! Form-level configuration owned by one builder
//!
//! The `id` and `class` attributes are kept apart from the free-form
//! attribute list: the id seeds every field's DOM id and the class list is
//! an ordered, de-duplicated set.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{FormaoError, Result};
use crate::template::helpers::escape_attr;

// HTML attribute names: no whitespace, quotes, `>`, `/` or `=`
static ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s"'>/=]+$"#).expect("valid attribute regex"));

static METHOD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid method regex"));

/// Default HTTP method for new forms
pub const DEFAULT_METHOD: &str = "POST";

/// Configuration surface of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub(crate) id: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) method: String,
    pub(crate) action: Option<String>,
    pub(crate) labels: HashMap<String, String>,
    pub(crate) submit_label: Option<String>,
}

impl FormConfig {
    /// Create a configuration with the given form id and defaults elsewhere
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            method: DEFAULT_METHOD.to_string(),
            action: None,
            labels: HashMap::new(),
            submit_label: None,
        }
    }

    /// Form id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// HTTP method
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Explicitly configured action URL
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// CSS classes in insertion order
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Free-form attributes (never `id` or `class`) in insertion order
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Read any attribute, including `id` and `class`
    ///
    /// `class` is reported as the space-joined class list, or `None` when
    /// the list is empty.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Borrowed(&self.id)),
            "class" if self.classes.is_empty() => None,
            "class" => Some(Cow::Owned(self.classes.join(" "))),
            _ => self
                .attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| Cow::Borrowed(v.as_str())),
        }
    }

    /// Label for a field (override or generated default)
    #[must_use]
    pub fn label(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    /// All labels keyed by field name
    #[must_use]
    pub const fn labels(&self) -> &HashMap<String, String> {
        &self.labels
    }

    /// Submit button label, if one was configured
    #[must_use]
    pub fn submit_label(&self) -> Option<&str> {
        self.submit_label.as_deref()
    }

    /// Set one attribute, routing `id` and `class` to their dedicated slots
    ///
    /// Setting `class` replaces the class list with the whitespace-split
    /// value; [`add_classes`](Self::add_classes) merges instead.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "id" => self.id = value,
            "class" => {
                self.classes.clear();
                self.add_classes(&value);
            }
            _ => {
                if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
                    slot.1 = value;
                } else {
                    self.attributes.push((key, value));
                }
            }
        }
    }

    /// Union whitespace-separated class names into the class list
    pub fn add_classes(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
    }

    /// Render `id`, `method`, `action`, `class` and the remaining attributes
    /// as an escaped attribute string for the `<form>` tag
    ///
    /// `action` is the effective action for this render, which may come
    /// from the request rather than the stored configuration.
    #[must_use]
    pub fn attributes_html(&self, action: Option<&str>) -> String {
        let mut html = String::new();
        Self::write_attr(&mut html, "id", &self.id);
        Self::write_attr(&mut html, "method", &self.method);
        if let Some(action) = action {
            Self::write_attr(&mut html, "action", action);
        }
        if !self.classes.is_empty() {
            Self::write_attr(&mut html, "class", &self.classes.join(" "));
        }
        for (key, value) in &self.attributes {
            Self::write_attr(&mut html, key, value);
        }
        html
    }

    fn write_attr(html: &mut String, name: &str, value: &str) {
        if !html.is_empty() {
            html.push(' ');
        }
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&escape_attr(value));
        html.push('"');
    }

    /// Check the parts of the configuration the type system cannot
    ///
    /// # Errors
    ///
    /// Returns [`FormaoError::Configuration`] for an empty or non-alphabetic
    /// method, an empty form id, or an attribute name that is not a valid
    /// HTML attribute name.
    pub fn validate(&self) -> Result<()> {
        if !METHOD_TOKEN.is_match(&self.method) {
            return Err(FormaoError::configuration(format!(
                "invalid form method '{}'",
                self.method
            )));
        }
        if self.id.trim().is_empty() {
            return Err(FormaoError::configuration("form id cannot be empty"));
        }
        if let Some((name, _)) = self
            .attributes
            .iter()
            .find(|(name, _)| !ATTRIBUTE_NAME.is_match(name))
        {
            return Err(FormaoError::configuration(format!(
                "invalid attribute name '{name}'"
            )));
        }
        Ok(())
    }

    /// Snapshot handed to the form template
    #[must_use]
    pub(crate) fn view(&self, action: Option<&str>) -> FormView {
        FormView {
            id: self.id.clone(),
            method: self.method.clone(),
            action: action.map(ToString::to_string),
            classes: self.classes.clone(),
            class: self.classes.join(" "),
            attributes: self
                .attributes
                .iter()
                .map(|(name, value)| AttributeCtx {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            attributes_html: self.attributes_html(action),
            submit_label: self.submit_label.clone(),
        }
    }
}

/// Template-facing view of a [`FormConfig`]
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FormView {
    id: String,
    method: String,
    action: Option<String>,
    classes: Vec<String>,
    class: String,
    attributes: Vec<AttributeCtx>,
    attributes_html: String,
    submit_label: Option<String>,
}

/// Context for one free-form attribute in templates
#[derive(Debug, Clone, Serialize)]
struct AttributeCtx {
    name: String,
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::new("MyModel_Form");
        assert_eq!(config.id(), "MyModel_Form");
        assert_eq!(config.method(), "POST");
        assert!(config.action().is_none());
        assert!(config.attribute("class").is_none());
    }

    #[test]
    fn test_add_classes_preserves_order_and_dedupes() {
        let mut config = FormConfig::new("F");
        config.add_classes("a b");
        config.add_classes("b c");
        assert_eq!(config.classes(), ["a", "b", "c"]);
    }

    #[test]
    fn test_id_and_class_routing() {
        let mut config = FormConfig::new("F");
        config.set_attribute("id", "X");
        config.set_attribute("class", "one  two");
        config.set_attribute("data-testing", "12345");

        assert_eq!(config.attribute("id").as_deref(), Some("X"));
        assert_eq!(config.attribute("class").as_deref(), Some("one two"));
        assert_eq!(config.attribute("data-testing").as_deref(), Some("12345"));
        assert_eq!(config.attributes().len(), 1);
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut config = FormConfig::new("F");
        config.set_attribute("a", "1");
        config.set_attribute("b", "2");
        config.set_attribute("a", "3");
        assert_eq!(
            config.attributes(),
            [("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_attributes_html() {
        let mut config = FormConfig::new("MyModel_Form");
        config.method = "PUT".into();
        config.add_classes("mytest verbose");
        config.set_attribute("data-testing", "12345");

        assert_eq!(
            config.attributes_html(Some("/testaction")),
            r#"id="MyModel_Form" method="PUT" action="/testaction" class="mytest verbose" data-testing="12345""#
        );
    }

    #[test]
    fn test_attributes_html_escapes_values() {
        let mut config = FormConfig::new("F");
        config.set_attribute("title", r#"say "hi" & <bye>"#);
        let html = config.attributes_html(None);
        assert!(html.contains(r#"title="say &quot;hi&quot; &amp; &lt;bye&gt;""#));
        assert!(!html.contains("action="));
    }

    #[test]
    fn test_validate() {
        let mut config = FormConfig::new("F");
        assert!(config.validate().is_ok());

        config.set_attribute("bad name", "x");
        assert!(matches!(
            config.validate(),
            Err(FormaoError::Configuration(_))
        ));

        let mut config = FormConfig::new("F");
        config.method = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_framework_attribute_names_are_accepted() {
        for name in ["@click", "x-on:submit", ":class", "hx-post", "data-x.y"] {
            let mut config = FormConfig::new("F");
            config.set_attribute(name, "go");
            assert!(config.validate().is_ok(), "{name}");
        }

        for name in ["bad name", "a=b", "a/b", "a>b", r#"a"b"#, "a'b"] {
            let mut config = FormConfig::new("F");
            config.set_attribute(name, "x");
            assert!(
                matches!(config.validate(), Err(FormaoError::Configuration(_))),
                "{name}"
            );
        }
    }
}
