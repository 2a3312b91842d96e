//! Configuration management for formao
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FORMAO_` prefix, `__` for nesting)
//! 2. `./formao.toml`
//! 3. `~/.config/formao/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # formao.toml
//! [templates]
//! view_root = "./views"
//! template_dir = "themes/bootstrap"
//!
//! [forms]
//! method = "POST"
//! submit_label = "Save"
//! classes = ["form", "form-horizontal"]
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use formao::config::FormaoConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = FormaoConfig::load()?;
//! let templates = config.form_templates()?;
//! let options = config.form_options();
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::template::FormTemplates;

/// Options accepted by the form builder constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Directory (template namespace) holding `form.html` and the field
    /// templates; derived at render time when unset
    pub template_directory: Option<String>,
}

impl FormOptions {
    /// Options with an explicit template directory
    #[must_use]
    pub fn with_template_directory(dir: impl Into<String>) -> Self {
        Self {
            template_directory: Some(dir.into()),
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory project templates are loaded from
    pub view_root: Option<PathBuf>,
    /// Template directory used by every builder unless overridden
    pub template_dir: Option<String>,
}

/// Defaults applied to new forms
///
/// Unset fields leave the builder's own values alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// HTTP method; builders start with `POST` when this is unset
    pub method: Option<String>,
    /// Submit button text
    pub submit_label: Option<String>,
    /// CSS classes added to every form
    pub classes: Vec<String>,
}

/// Complete formao configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormaoConfig {
    /// Template engine settings
    pub templates: TemplateSettings,

    /// Form defaults
    pub forms: FormDefaults,
}

impl FormaoConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 4. Defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 3. User config: ~/.config/formao/config.toml
        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 2. Local config: ./formao.toml
        let local_config = PathBuf::from("./formao.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (double underscore for nesting)
        figment = figment.merge(Env::prefixed("FORMAO_").split("__").lowercase(true));

        let config = figment.extract()?;
        tracing::debug!(?config, "formao configuration loaded");
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file leaves the defaults in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not valid TOML or its values fail
    /// type conversion.
    pub fn load_from(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.into()))
            .merge(Env::prefixed("FORMAO_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the XDG config path
    ///
    /// ```rust
    /// use formao::config::FormaoConfig;
    ///
    /// let path = FormaoConfig::recommended_path();
    /// assert!(path.ends_with("config.toml"));
    /// ```
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join("formao").join("config.toml"),
        )
    }

    /// Builder options derived from the template settings
    #[must_use]
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            template_directory: self.templates.template_dir.clone(),
        }
    }

    /// Template engine rooted at the configured view root
    ///
    /// # Errors
    ///
    /// Returns error if a project template cannot be read or parsed.
    pub fn form_templates(&self) -> Result<FormTemplates, TemplateError> {
        match &self.templates.view_root {
            Some(root) => FormTemplates::from_dir(root),
            None => FormTemplates::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FormaoConfig::default();
        assert_eq!(config.forms.method, None);
        assert!(config.forms.classes.is_empty());
        assert_eq!(config.templates.view_root, None);
        assert_eq!(config.form_options(), FormOptions::default());
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let rendered = toml::to_string(&FormaoConfig::default()).unwrap();
        let parsed: FormaoConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, FormaoConfig::default());
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = FormaoConfig::load_from("/nonexistent/path/formao.toml").unwrap();
        assert_eq!(config.forms, FormDefaults::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[templates]
template_dir = "themes/dark"

[forms]
submit_label = "Save"
classes = ["form", "compact"]
"#,
        )
        .unwrap();

        let config = FormaoConfig::load_from(file.path()).unwrap();
        assert_eq!(config.templates.template_dir.as_deref(), Some("themes/dark"));
        assert_eq!(config.forms.submit_label.as_deref(), Some("Save"));
        assert_eq!(config.forms.classes, vec!["form", "compact"]);
        assert_eq!(config.forms.method, None);
        assert_eq!(
            config.form_options().template_directory.as_deref(),
            Some("themes/dark")
        );
    }

    #[test]
    fn test_method_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[forms]\nmethod = \"PATCH\"\n").unwrap();

        let config = FormaoConfig::load_from(file.path()).unwrap();
        assert_eq!(config.forms.method.as_deref(), Some("PATCH"));
    }

    #[test]
    fn test_partial_toml_without_defaults() {
        let config: FormaoConfig = toml::from_str(
            r#"
[templates]
view_root = "./views"
"#,
        )
        .unwrap();
        assert_eq!(config.templates.view_root, Some(PathBuf::from("./views")));
        assert_eq!(config.forms, FormDefaults::default());

        let empty: FormaoConfig = toml::from_str("").unwrap();
        assert_eq!(empty, FormaoConfig::default());
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[forms\nmethod = ").unwrap();
        assert!(FormaoConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_form_templates_without_view_root() {
        let templates = FormaoConfig::default().form_templates().unwrap();
        assert!(FormTemplates::embedded_template("formao/form.html").is_some());
        assert!(!templates.is_customized("formao/form.html"));
    }
}
