//! Model metadata and instance data supplied by the ORM
//!
//! The form layer never writes to the ORM. It reads an ordered list of
//! attributes through [`ModelSource`] and optionally a blank [`Instance`]
//! built from attribute defaults.
//!
//! # Example
//!
//! ```rust
//! use formao::model::{AttributeDescriptor, DataType, ModelMetadata, ModelSource};
//!
//! let model = ModelMetadata::new("Project")
//!     .field("id", DataType::Integer)
//!     .field("name", DataType::String)
//!     .attribute(
//!         "stage",
//!         AttributeDescriptor::enumeration(["pending", "processed"]).default_value("pending"),
//!     );
//!
//! assert_eq!(model.name(), "Project");
//! assert_eq!(model.attributes().len(), 3);
//! assert_eq!(model.build().get("stage"), Some(&serde_json::json!("pending")));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Abstract column type reported by the ORM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Short string (VARCHAR)
    String,
    /// Long text
    Text,
    /// Boolean flag
    Boolean,
    /// Enumeration; choices live on the attribute
    Enum,
    /// Date or timestamp with time zone
    Date,
    /// Date without time
    DateOnly,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// Floating point
    Float,
    /// Double precision floating point
    Double,
    /// Fixed-point decimal
    Decimal,
    /// UUID
    Uuid,
    /// JSON document
    Json,
    /// Anything the ORM reports that has no variant here
    Other(String),
}

impl DataType {
    /// String form of the type, as the ORM would print it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "VARCHAR",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::Enum => "ENUM",
            Self::Date => "DATETIME",
            Self::DateOnly => "DATEONLY",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE PRECISION",
            Self::Decimal => "DECIMAL",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one model attribute
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Abstract type tag
    pub data_type: DataType,
    /// Type name hint, when the ORM exposes one separately from the tag
    pub type_name: Option<String>,
    /// Dialect-native type string (e.g. `"timestamp with time zone"`)
    pub original_type: Option<String>,
    /// Declared enum choices
    pub values: Vec<String>,
    /// Column accepts NULL
    pub allow_null: bool,
    /// Column is auto-incremented by the database
    pub auto_increment: bool,
    /// Column is (part of) the primary key
    pub primary_key: bool,
    /// Value used when building a blank instance
    pub default_value: Option<Value>,
}

impl AttributeDescriptor {
    /// Create a descriptor for the given type tag
    #[must_use]
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            type_name: None,
            original_type: None,
            values: Vec::new(),
            allow_null: true,
            auto_increment: false,
            primary_key: false,
            default_value: None,
        }
    }

    /// Create an enum descriptor with its choices
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ..Self::new(DataType::Enum)
        }
    }

    /// Set the type name hint
    #[must_use]
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Set the dialect-native type string
    #[must_use]
    pub fn original_type(mut self, name: impl Into<String>) -> Self {
        self.original_type = Some(name.into());
        self
    }

    /// Mark the column NOT NULL
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    /// Mark the column as an auto-incremented primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.auto_increment = true;
        self.allow_null = false;
        self
    }

    /// Set the default value used by [`ModelSource::build`]
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Current field values of one record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instance(Map<String, Value>);

impl Instance {
    /// Create an empty instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if present
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Whether the instance holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of values held
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for Instance {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Instance {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Value> for Instance {
    type Error = Value;

    /// Accepts JSON objects; anything else is handed back unchanged
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Read-only view of an ORM model
pub trait ModelSource: Send + Sync {
    /// Model name (used for the default form id)
    fn name(&self) -> &str;

    /// Attributes in declaration order
    fn attributes(&self) -> &[(String, AttributeDescriptor)];

    /// Look up one attribute by name
    fn descriptor(&self, field: &str) -> Option<&AttributeDescriptor> {
        self.attributes()
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, attr)| attr)
    }

    /// Build a blank instance populated with attribute defaults
    fn build(&self) -> Instance {
        self.attributes()
            .iter()
            .filter_map(|(name, attr)| {
                attr.default_value
                    .as_ref()
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }
}

/// In-memory model description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    name: String,
    attributes: Vec<(String, AttributeDescriptor)>,
}

impl ModelMetadata {
    /// Create a model with no attributes
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Declare an attribute; redeclaring a name replaces it in place
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, descriptor: AttributeDescriptor) -> Self {
        let name = name.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = descriptor;
        } else {
            self.attributes.push((name, descriptor));
        }
        self
    }

    /// Declare an attribute with only a type tag
    #[must_use]
    pub fn field(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.attribute(name, AttributeDescriptor::new(data_type))
    }
}

impl ModelSource for ModelMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[(String, AttributeDescriptor)] {
        &self.attributes
    }
}
