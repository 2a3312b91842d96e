//! Templating collaborator
//!
//! The builder only needs one operation from a template engine: render a
//! named template with JSON data. [`TemplateRenderer`] captures that, plus
//! the view root used to look for a project-local form theme.
//!
//! [`FormTemplates`] is the bundled implementation on top of `minijinja`.
//!
//! # Example
//!
//! ```rust,no_run
//! use formao::template::{FormTemplates, TemplateRenderer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let templates = FormTemplates::from_dir("./views")?;
//! let html = templates
//!     .render("formao/text.html", serde_json::json!({ "name": "title", "id": "t" }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod framework;
pub mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TemplateError;

pub use framework::{FormTemplates, BUNDLED_TEMPLATE_DIR, TEMPLATE_NAMES};

/// Turns a template identifier plus data into HTML
///
/// Implementations must tolerate concurrent calls: the builder renders every
/// field and fragment of a form at the same time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Render `name` with `data`
    async fn render(&self, name: &str, data: Value) -> Result<String, TemplateError>;

    /// Directory templates are resolved against, if the engine has one
    fn view_root(&self) -> Option<PathBuf>;
}

#[async_trait]
impl<T: TemplateRenderer + ?Sized> TemplateRenderer for Arc<T> {
    async fn render(&self, name: &str, data: Value) -> Result<String, TemplateError> {
        (**self).render(name, data).await
    }

    fn view_root(&self) -> Option<PathBuf> {
        (**self).view_root()
    }
}
