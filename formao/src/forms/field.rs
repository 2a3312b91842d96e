//! Field descriptor types
//!
//! Defines the render-ready representation of one model field and the
//! input kinds the mapper dispatches to.

use serde::Serialize;

/// HTML input shape chosen for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Checkbox for boolean columns
    Checkbox,
    /// Select dropdown for enum columns
    Select,
    /// Date picker
    Date,
    /// Numeric input
    Number,
    /// Multi-line text
    Textarea,
    /// Plain text input (default)
    #[default]
    Text,
}

impl InputKind {
    /// Every kind, in dispatch-table order
    pub const ALL: [Self; 6] = [
        Self::Checkbox,
        Self::Select,
        Self::Date,
        Self::Number,
        Self::Textarea,
        Self::Text,
    ];

    /// Get the kind name (also the template stem)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Date => "date",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Text => "text",
        }
    }

    /// Template identifier for this kind under `dir`
    #[must_use]
    pub fn template(&self, dir: &str) -> String {
        template_path(dir, self.as_str())
    }
}

/// `<dir>/<stem>.html`, or `<stem>.html` when `dir` is empty
pub(crate) fn template_path(dir: &str, stem: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("{stem}.html")
    } else {
        format!("{dir}/{stem}.html")
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Option for select dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Value attribute
    pub value: String,
    /// Display text
    pub label: String,
    /// Whether this option matches the current value
    pub selected: bool,
}

impl SelectOption {
    /// Create a select option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// Kind-specific descriptor data
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldExtra {
    /// Nothing beyond the common fields
    #[default]
    None,
    /// Declared enum choices
    Select {
        /// Available options, in declaration order
        options: Vec<SelectOption>,
    },
    /// Checkbox state
    Checkbox {
        /// Whether the current value is truthy
        checked: bool,
    },
}

/// The computed, render-ready representation of one form field
///
/// This is also the data handed to the field template, so every member is
/// serialized under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name (used for form submission)
    pub name: String,
    /// Display label
    pub label: String,
    /// Input shape
    pub kind: InputKind,
    /// Generated DOM id
    pub id: String,
    /// Current value; never absent, empty when unknown
    pub value: String,
    /// Kind-specific data
    pub extra: FieldExtra,
    /// Validation messages attached to this field
    pub errors: Vec<String>,
}

impl FieldDescriptor {
    /// Template identifier for this field under `dir`
    #[must_use]
    pub fn template(&self, dir: &str) -> String {
        self.kind.template(dir)
    }

    /// Whether any validation message is attached
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Enum choices, empty for non-select fields
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match &self.extra {
            FieldExtra::Select { options } => options,
            _ => &[],
        }
    }

    /// Checkbox state, `false` for non-checkbox fields
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        matches!(self.extra, FieldExtra::Checkbox { checked: true })
    }
}
