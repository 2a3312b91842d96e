//! Bundled form templates with view-root overrides
//!
//! Templates are resolved in order:
//! 1. Project copies under the view root (e.g. `views/formao/text.html`)
//! 2. Embedded defaults compiled into the binary
//!
//! Any other template name (custom themes, appended partials) is loaded
//! from the view root on first use.

mod loader;

pub use loader::FormTemplates;

/// Namespace of the bundled template set
pub const BUNDLED_TEMPLATE_DIR: &str = "formao";

/// Names of all bundled templates
pub const TEMPLATE_NAMES: &[&str] = &[
    "formao/form.html",
    "formao/text.html",
    "formao/textarea.html",
    "formao/checkbox.html",
    "formao/select.html",
    "formao/date.html",
    "formao/number.html",
];
