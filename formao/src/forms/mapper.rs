//! Field metadata to descriptor mapping
//!
//! The column type is resolved through an ordered chain of resolvers and the
//! first one that produces something wins:
//!
//! 1. the dialect-native type string (`original_type`)
//! 2. the type name hint (`type_name`)
//! 3. the tag's string form
//! 4. the tag itself
//!
//! Names are matched case-insensitively with any `(...)` parameters
//! stripped; tags are matched exactly. Anything unrecognized maps to a plain
//! text input.

use serde_json::Value;

use super::config::FormConfig;
use super::error::ValidationErrors;
use super::field::{FieldDescriptor, FieldExtra, InputKind, SelectOption};
use super::naming::{dom_id, humanize, is_auto_field};
use crate::error::{FormaoError, Result};
use crate::model::{AttributeDescriptor, DataType, Instance, ModelSource};

/// Outcome of type resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType<'a> {
    /// A type name to match case-insensitively
    Name(&'a str),
    /// The raw tag, matched exactly
    Tag(&'a DataType),
}

type Resolver = fn(&AttributeDescriptor) -> Option<ResolvedType<'_>>;

const RESOLVERS: [Resolver; 4] = [
    resolve_original_type,
    resolve_type_name,
    resolve_type_string,
    resolve_raw_tag,
];

fn non_empty(name: &str) -> Option<ResolvedType<'_>> {
    (!name.trim().is_empty()).then_some(ResolvedType::Name(name))
}

fn resolve_original_type(attr: &AttributeDescriptor) -> Option<ResolvedType<'_>> {
    attr.original_type.as_deref().and_then(non_empty)
}

fn resolve_type_name(attr: &AttributeDescriptor) -> Option<ResolvedType<'_>> {
    attr.type_name.as_deref().and_then(non_empty)
}

fn resolve_type_string(attr: &AttributeDescriptor) -> Option<ResolvedType<'_>> {
    non_empty(attr.data_type.as_str())
}

#[allow(clippy::unnecessary_wraps)]
const fn resolve_raw_tag(attr: &AttributeDescriptor) -> Option<ResolvedType<'_>> {
    Some(ResolvedType::Tag(&attr.data_type))
}

/// Run the resolver chain for one attribute
#[must_use]
pub fn resolve_type(attr: &AttributeDescriptor) -> ResolvedType<'_> {
    RESOLVERS
        .iter()
        .find_map(|resolve| resolve(attr))
        .unwrap_or(ResolvedType::Tag(&attr.data_type))
}

/// Input kind for a resolved type
#[must_use]
pub fn input_kind(resolved: ResolvedType<'_>) -> InputKind {
    match resolved {
        ResolvedType::Tag(tag) => kind_for_tag(tag),
        ResolvedType::Name(name) => kind_for_name(name),
    }
}

const fn kind_for_tag(tag: &DataType) -> InputKind {
    match tag {
        DataType::Boolean => InputKind::Checkbox,
        DataType::Enum => InputKind::Select,
        DataType::Date | DataType::DateOnly => InputKind::Date,
        DataType::Float
        | DataType::Double
        | DataType::Decimal
        | DataType::Integer
        | DataType::BigInt => InputKind::Number,
        DataType::Text => InputKind::Textarea,
        DataType::String | DataType::Uuid | DataType::Json | DataType::Other(_) => {
            InputKind::Text
        }
    }
}

/// Multi-word type names, matched before modifiers are dropped
const COMPOUND_TYPES: [(&str, InputKind); 3] = [
    ("double precision", InputKind::Number),
    ("timestamp with time zone", InputKind::Date),
    ("timestamp without time zone", InputKind::Date),
];

fn kind_for_name(name: &str) -> InputKind {
    let lower = name.trim().to_ascii_lowercase();
    if lower.starts_with("tinyint(1)") {
        return InputKind::Checkbox;
    }
    if let Some((_, kind)) = COMPOUND_TYPES
        .iter()
        .find(|(compound, _)| lower.starts_with(compound))
    {
        return *kind;
    }

    // "int(11) unsigned" -> "int"
    let base = lower
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    match base {
        "boolean" | "bool" => InputKind::Checkbox,
        "enum" => InputKind::Select,
        "date" | "dateonly" | "datetime" | "timestamp" | "timestamptz" => InputKind::Date,
        "float" | "double" | "real" | "decimal" | "numeric" | "integer" | "int" | "bigint"
        | "smallint" | "mediumint" | "tinyint" => InputKind::Number,
        "text" | "mediumtext" | "longtext" => InputKind::Textarea,
        _ => {
            tracing::debug!(type_name = %name, "unrecognized column type, using text input");
            InputKind::Text
        }
    }
}

/// Render a stored value for an HTML value attribute
fn value_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(
            s.to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes" | "checked"
        ),
        _ => false,
    }
}

/// Maps model attributes into field descriptors
///
/// Pure: the same model, configuration and instance always yield the same
/// descriptors.
pub struct FieldMapper<'a> {
    model: &'a dyn ModelSource,
    config: &'a FormConfig,
    instance: Option<&'a Instance>,
    errors: Option<&'a ValidationErrors>,
}

impl<'a> FieldMapper<'a> {
    /// Create a mapper over a model and a form configuration
    #[must_use]
    pub fn new(model: &'a dyn ModelSource, config: &'a FormConfig) -> Self {
        Self {
            model,
            config,
            instance: None,
            errors: None,
        }
    }

    /// Use `instance` for current values
    #[must_use]
    pub const fn with_instance(mut self, instance: Option<&'a Instance>) -> Self {
        self.instance = instance;
        self
    }

    /// Attach validation messages
    #[must_use]
    pub const fn with_errors(mut self, errors: Option<&'a ValidationErrors>) -> Self {
        self.errors = errors;
        self
    }

    /// Model attributes that become form fields, in declaration order
    ///
    /// Keys and timestamps (`...id`, `...at`) are left out.
    #[must_use]
    pub fn fields(&self) -> Vec<&'a str> {
        retained_fields(self.model)
    }

    /// Build the descriptor for one field
    ///
    /// # Errors
    ///
    /// Returns [`FormaoError::Lookup`] if the model has no such attribute.
    pub fn describe(&self, field: &str) -> Result<FieldDescriptor> {
        let attr = self
            .model
            .descriptor(field)
            .ok_or_else(|| FormaoError::lookup(self.model.name(), field))?;

        let kind = input_kind(resolve_type(attr));
        let current = self.instance.and_then(|instance| instance.get(field));
        let value = value_string(current);

        let extra = match kind {
            InputKind::Select => FieldExtra::Select {
                options: attr
                    .values
                    .iter()
                    .map(|choice| SelectOption {
                        selected: *choice == value,
                        ..SelectOption::new(choice.clone(), choice.clone())
                    })
                    .collect(),
            },
            InputKind::Checkbox => FieldExtra::Checkbox {
                checked: is_truthy(current),
            },
            _ => FieldExtra::None,
        };

        let label = self
            .config
            .label(field)
            .map_or_else(|| humanize(field), ToString::to_string);

        Ok(FieldDescriptor {
            name: field.to_string(),
            label,
            kind,
            id: dom_id(self.config.id(), field),
            value,
            extra,
            errors: self
                .errors
                .map(|errors| errors.for_field(field).to_vec())
                .unwrap_or_default(),
        })
    }
}

/// Attribute names of `model` minus keys and timestamps, in order
#[must_use]
pub fn retained_fields(model: &dyn ModelSource) -> Vec<&str> {
    model
        .attributes()
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| !is_auto_field(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelMetadata;
    use serde_json::json;

    fn model() -> ModelMetadata {
        ModelMetadata::new("MyModel")
            .field("id", DataType::Integer)
            .field("name", DataType::String)
            .field("description", DataType::Text)
            .field("startDate", DataType::Date)
            .attribute(
                "stage",
                AttributeDescriptor::enumeration(["pending", "processed", "cancelled"]),
            )
            .field("completed", DataType::Boolean)
            .field("budget", DataType::Float)
            .field("createdAt", DataType::Date)
            .field("updatedAt", DataType::Date)
    }

    fn config() -> FormConfig {
        FormConfig::new("MyModel_Form")
    }

    #[test]
    fn test_retained_fields_drop_keys_and_timestamps() {
        let model = model();
        assert_eq!(
            retained_fields(&model),
            ["name", "description", "startDate", "stage", "completed", "budget"]
        );
    }

    #[test]
    fn test_dispatch_by_tag() {
        let model = model();
        let config = config();
        let mapper = FieldMapper::new(&model, &config);

        let kinds: Vec<_> = mapper
            .fields()
            .into_iter()
            .map(|f| mapper.describe(f).unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            [
                InputKind::Text,
                InputKind::Textarea,
                InputKind::Date,
                InputKind::Select,
                InputKind::Checkbox,
                InputKind::Number,
            ]
        );
    }

    #[test]
    fn test_original_type_wins() {
        let attr = AttributeDescriptor::new(DataType::String)
            .type_name("VARCHAR")
            .original_type("timestamp with time zone");
        assert_eq!(
            resolve_type(&attr),
            ResolvedType::Name("timestamp with time zone")
        );
        assert_eq!(input_kind(resolve_type(&attr)), InputKind::Date);
    }

    #[test]
    fn test_type_name_before_tag_string() {
        let attr = AttributeDescriptor::new(DataType::Other("custom".into())).type_name("BIGINT");
        assert_eq!(input_kind(resolve_type(&attr)), InputKind::Number);
    }

    #[test]
    fn test_blank_hints_are_skipped() {
        let attr = AttributeDescriptor::new(DataType::Text)
            .original_type("  ")
            .type_name("");
        assert_eq!(resolve_type(&attr), ResolvedType::Name("TEXT"));
    }

    #[test]
    fn test_raw_tag_is_last_resort() {
        let attr = AttributeDescriptor::new(DataType::Other(String::new()));
        assert_eq!(resolve_type(&attr), ResolvedType::Tag(&DataType::Other(String::new())));
        assert_eq!(input_kind(resolve_type(&attr)), InputKind::Text);
    }

    #[test]
    fn test_name_dispatch_is_case_insensitive_and_strips_params() {
        for (name, kind) in [
            ("Boolean", InputKind::Checkbox),
            ("TINYINT(1)", InputKind::Checkbox),
            ("ENUM('a','b')", InputKind::Select),
            ("TIMESTAMPTZ", InputKind::Date),
            ("decimal(10,2)", InputKind::Number),
            ("Integer", InputKind::Number),
            ("text", InputKind::Textarea),
            ("VARCHAR(255)", InputKind::Text),
            ("geometry", InputKind::Text),
            ("int unsigned", InputKind::Number),
            ("BIGINT UNSIGNED", InputKind::Number),
            ("int(11) unsigned zerofill", InputKind::Number),
            ("tinyint(1) unsigned", InputKind::Checkbox),
            ("tinyint(4)", InputKind::Number),
            ("double precision", InputKind::Number),
            ("timestamp without time zone", InputKind::Date),
            ("character varying(40)", InputKind::Text),
        ] {
            assert_eq!(input_kind(ResolvedType::Name(name)), kind, "{name}");
        }
    }

    #[test]
    fn test_native_type_with_modifiers_keeps_numeric_kind() {
        let model = ModelMetadata::new("Counter")
            .attribute(
                "hits",
                AttributeDescriptor::new(DataType::Integer).original_type("int unsigned"),
            )
            .attribute(
                "total",
                AttributeDescriptor::new(DataType::BigInt).original_type("BIGINT UNSIGNED"),
            );
        let config = FormConfig::new("Counter_Form");
        let mapper = FieldMapper::new(&model, &config);

        let kinds: Vec<_> = mapper
            .fields()
            .into_iter()
            .map(|f| mapper.describe(f).unwrap().kind)
            .collect();
        assert_eq!(kinds, [InputKind::Number, InputKind::Number]);
    }

    #[test]
    fn test_values_and_labels() {
        let model = model();
        let mut config = config();
        config.labels.insert("name".into(), "Project name".into());
        let instance = Instance::new()
            .with("name", "Test name")
            .with("budget", 12.5)
            .with("stage", "processed")
            .with("completed", true)
            .with("description", Value::Null);
        let mapper = FieldMapper::new(&model, &config).with_instance(Some(&instance));

        let name = mapper.describe("name").unwrap();
        assert_eq!(name.label, "Project name");
        assert_eq!(name.value, "Test name");
        assert_eq!(name.id, "MyModel_Form_name");

        let start = mapper.describe("startDate").unwrap();
        assert_eq!(start.label, "Start Date");
        assert_eq!(start.value, "");

        assert_eq!(mapper.describe("description").unwrap().value, "");
        assert_eq!(mapper.describe("budget").unwrap().value, "12.5");
        assert!(mapper.describe("completed").unwrap().is_checked());

        let stage = mapper.describe("stage").unwrap();
        let selected: Vec<_> = stage
            .options()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["processed"]);
        assert_eq!(stage.options().len(), 3);
    }

    #[test]
    fn test_unknown_field_is_lookup_error() {
        let model = model();
        let config = config();
        let err = FieldMapper::new(&model, &config).describe("owner").unwrap_err();
        assert!(matches!(err, FormaoError::Lookup { ref field, .. } if field == "owner"));
    }

    #[test]
    fn test_errors_attached() {
        let model = model();
        let config = config();
        let mut errors = ValidationErrors::new();
        errors.add("name", "is required");
        let mapper = FieldMapper::new(&model, &config).with_errors(Some(&errors));

        assert_eq!(mapper.describe("name").unwrap().errors, ["is required"]);
        assert!(!mapper.describe("budget").unwrap().has_errors());
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(Some(&json!("on"))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!("false"))));
        assert!(!is_truthy(None));
    }
}
