//! formao: HTML form scaffolding from ORM model metadata
//!
//! Describe a model once and get a complete, pre-filled HTML form:
//! - **Field mapping**: column types become input kinds (text, textarea,
//!   checkbox, select, date, number)
//! - **Form builder**: method, action, attributes, classes, labels and
//!   appended fragments through a fluent API
//! - **Templates**: bundled `minijinja` templates, overridable per project
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use formao::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     formao::observability::init()?;
//!     let config = FormaoConfig::load()?;
//!
//!     let model = ModelMetadata::new("Project")
//!         .field("id", DataType::Integer)
//!         .field("name", DataType::String)
//!         .field("description", DataType::Text)
//!         .field("startDate", DataType::Date)
//!         .field("completed", DataType::Boolean);
//!
//!     let templates = config.form_templates()?;
//!     let html = FormBuilder::with_options(model, config.form_options())
//!         .defaults(&config.forms)
//!         .action("/projects")
//!         .render(&templates, None)
//!         .await?;
//!
//!     println!("{html}");
//!     Ok(())
//! }
//! ```
//!
//! # Customizing templates
//!
//! Copy any of the bundled templates (see [`template::TEMPLATE_NAMES`]) into
//! the view root under the same name to override it, or point a builder at
//! a theme of your own with [`FormBuilder::template_dir`](forms::FormBuilder::template_dir).

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod observability;
pub mod request;
pub mod template;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use formao::prelude::*;
    //! ```

    // Form building
    pub use crate::forms::{
        AppendedFragment, FieldDescriptor, FieldMapper, FormBuilder, FormConfig, FormOptions,
        InputKind, SelectOption, ValidationErrors,
    };

    // Model metadata
    pub use crate::model::{AttributeDescriptor, DataType, Instance, ModelMetadata, ModelSource};

    // Templates
    pub use crate::template::{FormTemplates, TemplateRenderer};

    // Requests
    pub use crate::request::{FormRequest, RequestLike};

    // Configuration
    pub use crate::config::FormaoConfig;

    // Error types
    pub use crate::error::{FormaoError, TemplateError};

    // Convenience for instance literals
    pub use serde_json::json;
}
