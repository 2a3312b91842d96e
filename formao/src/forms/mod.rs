//! Form scaffolding from model metadata
//!
//! This module turns a model description into a rendered HTML form:
//! - one field per model attribute, minus keys and timestamps
//! - input kinds picked from the column type
//! - labels, ids and current values filled in automatically
//! - form-level attributes, classes and extra fragments
//!
//! # Quick Start
//!
//! ```rust
//! use formao::forms::FormBuilder;
//! use formao::model::{DataType, Instance, ModelMetadata};
//! use formao::template::FormTemplates;
//!
//! # async fn example() -> formao::error::Result<()> {
//! let model = ModelMetadata::new("Task")
//!     .field("id", DataType::Integer)
//!     .field("title", DataType::String)
//!     .field("dueDate", DataType::Date)
//!     .field("done", DataType::Boolean);
//!
//! let html = FormBuilder::new(model)
//!     .action("/tasks")
//!     .fill(Instance::new().with("title", "Write docs"))
//!     .append_html(r#"<a href="/tasks">Cancel</a>"#)
//!     .render(&FormTemplates::new()?, None)
//!     .await?;
//!
//! assert!(html.contains(r#"value="Write docs""#));
//! # Ok(())
//! # }
//! ```
//!
//! # Validation Errors
//!
//! Messages produced by the host application's validation are shown next
//! to their fields:
//!
//! ```rust
//! use formao::forms::{FormBuilder, ValidationErrors};
//! use formao::model::{DataType, ModelMetadata};
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("title", "Title is required");
//!
//! let mut form = FormBuilder::new(ModelMetadata::new("Task").field("title", DataType::String))
//!     .errors(errors);
//! let fields = form.finalize_fields().unwrap();
//! assert_eq!(fields[0].errors, ["Title is required"]);
//! ```

mod builder;
mod config;
mod error;
mod field;
mod fragment;
mod mapper;
mod naming;

pub use builder::{FormBuilder, VIEW_TEMPLATE_DIR};
pub use config::{FormConfig, DEFAULT_METHOD};
pub use error::{validation_classes, ValidationClass, ValidationErrors, ERROR_CLASS};
pub use field::{FieldDescriptor, FieldExtra, InputKind, SelectOption};
pub use fragment::AppendedFragment;
pub use mapper::{input_kind, resolve_type, retained_fields, FieldMapper, ResolvedType};
pub use naming::{dom_id, humanize, is_auto_field, sanitize_id};

pub use crate::config::FormOptions;
