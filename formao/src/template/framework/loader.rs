//! Template loader backed by a `minijinja` environment

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use minijinja::{Environment, ErrorKind};
use parking_lot::RwLock;
use serde_json::Value;

use super::TEMPLATE_NAMES;
use crate::error::TemplateError;
use crate::template::TemplateRenderer;

/// Thread-safe form template environment with reload support
///
/// Cloning is cheap; clones share the same environment.
#[derive(Debug, Clone)]
pub struct FormTemplates {
    env: Arc<RwLock<Environment<'static>>>,
    view_root: Option<PathBuf>,
}

impl FormTemplates {
    /// Create an environment holding only the bundled templates
    ///
    /// # Errors
    ///
    /// Returns error if a bundled template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let env = Self::create_environment(None)?;
        Ok(Self {
            env: Arc::new(RwLock::new(env)),
            view_root: None,
        })
    }

    /// Create an environment rooted at `view_root`
    ///
    /// Bundled templates with a copy under `view_root` use that copy.
    ///
    /// # Errors
    ///
    /// Returns error if a template cannot be read or fails to parse.
    pub fn from_dir(view_root: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let view_root = view_root.into();
        let env = Self::create_environment(Some(&view_root))?;
        tracing::debug!(view_root = %view_root.display(), "form templates loaded");
        Ok(Self {
            env: Arc::new(RwLock::new(env)),
            view_root: Some(view_root),
        })
    }

    /// Build a fresh environment with all bundled templates registered
    fn create_environment(view_root: Option<&Path>) -> Result<Environment<'static>, TemplateError> {
        let mut env = Environment::new();

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for name in TEMPLATE_NAMES {
            let content = Self::load_template_content(name, view_root)?;
            env.add_template_owned((*name).to_string(), content)?;
        }

        if let Some(root) = view_root {
            env.set_loader(minijinja::path_loader(root));
        }

        Ok(env)
    }

    /// Project copy first, embedded default second
    fn load_template_content(name: &str, view_root: Option<&Path>) -> Result<String, TemplateError> {
        if let Some(path) = view_root.map(|dir| dir.join(name)).filter(|p| p.is_file()) {
            return std::fs::read_to_string(&path)
                .map_err(|source| TemplateError::Read { path, source });
        }

        Self::embedded_template(name)
            .map(ToString::to_string)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    /// Embedded content of a bundled template
    #[must_use]
    pub fn embedded_template(name: &str) -> Option<&'static str> {
        EMBEDDED_TEMPLATES.get(name).copied()
    }

    /// Whether the view root holds a project copy of `name`
    #[must_use]
    pub fn is_customized(&self, name: &str) -> bool {
        self.view_root
            .as_ref()
            .is_some_and(|dir| dir.join(name).is_file())
    }

    /// Render a template synchronously
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] for unknown names and
    /// [`TemplateError::Render`] when rendering fails.
    pub fn render_sync(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        let env = self.env.read();
        let template = env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::Render(e),
        })?;
        Ok(template.render(data)?)
    }

    /// Reload all templates from disk
    ///
    /// Builds a new environment and swaps it in atomically.
    ///
    /// # Errors
    ///
    /// Returns error if templates cannot be reloaded; the old environment
    /// stays in place.
    pub fn reload(&self) -> Result<(), TemplateError> {
        let new_env = Self::create_environment(self.view_root.as_deref())?;

        *self.env.write() = new_env;

        tracing::debug!("form templates reloaded");
        Ok(())
    }
}

#[async_trait]
impl TemplateRenderer for FormTemplates {
    async fn render(&self, name: &str, data: Value) -> Result<String, TemplateError> {
        self.render_sync(name, &data)
    }

    fn view_root(&self) -> Option<PathBuf> {
        self.view_root.clone()
    }
}

static EMBEDDED_TEMPLATES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "formao/form.html" => include_str!("defaults/formao/form.html"),
    "formao/text.html" => include_str!("defaults/formao/text.html"),
    "formao/textarea.html" => include_str!("defaults/formao/textarea.html"),
    "formao/checkbox.html" => include_str!("defaults/formao/checkbox.html"),
    "formao/select.html" => include_str!("defaults/formao/select.html"),
    "formao/date.html" => include_str!("defaults/formao/date.html"),
    "formao/number.html" => include_str!("defaults/formao/number.html"),
};
