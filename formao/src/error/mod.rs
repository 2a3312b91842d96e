//! Error types and error handling
//!
//! Every failure surfaces to the caller of
//! [`FormBuilder::render`](crate::forms::FormBuilder::render) or
//! [`FormBuilder::finalize_fields`](crate::forms::FormBuilder::finalize_fields).
//! Nothing is retried and no partial HTML is ever returned.

use std::path::PathBuf;

use thiserror::Error;

/// Framework error type
#[derive(Debug, Error)]
pub enum FormaoError {
    /// A referenced field does not exist in the model metadata
    #[error("model '{model}' has no attribute named '{field}'")]
    Lookup {
        /// Model the lookup ran against
        model: String,
        /// Field that was requested
        field: String,
    },

    /// A template render call failed
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Malformed builder or crate configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FormaoError {
    /// Build a lookup error for `field` on `model`
    #[must_use]
    pub fn lookup(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Lookup {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Build a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Errors raised by a [`TemplateRenderer`](crate::template::TemplateRenderer)
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to read template '{}': {source}", path.display())]
    Read {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Template was not found in the view root or the bundled set
    #[error("template not found: {0}")]
    NotFound(String),

    /// The template engine rejected the template or its data
    #[error("template render error: {0}")]
    Render(#[from] minijinja::Error),

    /// Template data could not be serialized
    #[error("template data error: {0}")]
    Data(#[from] serde_json::Error),

    /// A foreign templating collaborator refused the call
    #[error("template '{name}' rejected: {reason}")]
    Rejected {
        /// Template identifier
        name: String,
        /// Collaborator-provided reason
        reason: String,
    },
}

/// Convenience alias used throughout the crate
pub type Result<T, E = FormaoError> = std::result::Result<T, E>;
