//! Extra content appended after the generated fields

use serde_json::{Map, Value};

use crate::error::TemplateError;
use crate::template::TemplateRenderer;

/// A fragment rendered after the fields, before the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendedFragment {
    /// Raw HTML, inserted verbatim
    Html(String),
    /// A named template rendered with optional data
    Template {
        /// Template identifier
        name: String,
        /// Data handed to the template; an empty object when absent
        data: Option<Value>,
    },
}

impl AppendedFragment {
    /// Raw HTML fragment
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html(html.into())
    }

    /// Template fragment
    #[must_use]
    pub fn template(name: impl Into<String>, data: Option<Value>) -> Self {
        Self::Template {
            name: name.into(),
            data,
        }
    }

    /// Produce this fragment's HTML
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error for template fragments.
    pub async fn render<R>(&self, templates: &R) -> Result<String, TemplateError>
    where
        R: TemplateRenderer + ?Sized,
    {
        match self {
            Self::Html(html) => Ok(html.clone()),
            Self::Template { name, data } => {
                let data = data
                    .clone()
                    .unwrap_or_else(|| Value::Object(Map::new()));
                templates.render(name, data).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MockTemplateRenderer;
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_html_fragment_is_verbatim() {
        let templates = MockTemplateRenderer::new();
        let html = AppendedFragment::html(r#"<div id="test"></div>"#)
            .render(&templates)
            .await
            .unwrap();
        assert_eq!(html, r#"<div id="test"></div>"#);
    }

    #[tokio::test]
    async fn test_template_fragment_defaults_to_empty_object() {
        let mut templates = MockTemplateRenderer::new();
        templates
            .expect_render()
            .with(eq("partials/help.html"), eq(json!({})))
            .times(1)
            .returning(|_, _| Ok("<p>help</p>".to_string()));

        let html = AppendedFragment::template("partials/help.html", None)
            .render(&templates)
            .await
            .unwrap();
        assert_eq!(html, "<p>help</p>");
    }

    #[tokio::test]
    async fn test_template_fragment_failure_propagates() {
        let mut templates = MockTemplateRenderer::new();
        templates.expect_render().returning(|name, _| {
            Err(TemplateError::NotFound(name.to_string()))
        });

        let err = AppendedFragment::template("missing.html", Some(json!({"a": 1})))
            .render(&templates)
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(ref n) if n == "missing.html"));
    }
}
