//! Form builder API with fluent interface
//!
//! Accumulates form-level configuration for one model and renders the whole
//! form through a [`TemplateRenderer`].

use std::sync::Arc;

use futures_util::future::{try_join, try_join_all};
use serde::Serialize;
use serde_json::Value;

use super::config::{FormConfig, FormView};
use super::error::ValidationErrors;
use super::field::{template_path, FieldDescriptor, InputKind};
use super::fragment::AppendedFragment;
use super::mapper::FieldMapper;
use super::naming::humanize;
use crate::config::{FormDefaults, FormOptions};
use crate::error::{FormaoError, Result, TemplateError};
use crate::model::{Instance, ModelSource};
use crate::request::RequestLike;
use crate::template::{TemplateRenderer, BUNDLED_TEMPLATE_DIR};

/// Template directory picked up from the view root when it holds a theme
pub const VIEW_TEMPLATE_DIR: &str = "forms";

/// Builder for an HTML form over one model
///
/// # Examples
///
/// ```rust
/// use formao::forms::FormBuilder;
/// use formao::model::{DataType, ModelMetadata};
/// use formao::template::FormTemplates;
///
/// # async fn example() -> formao::error::Result<()> {
/// let model = ModelMetadata::new("Project")
///     .field("id", DataType::Integer)
///     .field("name", DataType::String)
///     .field("startDate", DataType::Date);
///
/// let html = FormBuilder::new(model)
///     .method("PUT")
///     .action("/projects/1")
///     .add_class("form stacked")
///     .label("startDate", "Starts")
///     .submit("Save")
///     .render(&FormTemplates::new()?, None)
///     .await?;
/// assert!(html.contains(r#"<form id="Project_Form" method="PUT""#));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FormBuilder {
    model: Arc<dyn ModelSource>,
    config: FormConfig,
    options: FormOptions,
    instance: Option<Instance>,
    errors: Option<ValidationErrors>,
    fragments: Vec<AppendedFragment>,
    finalized: Option<Vec<FieldDescriptor>>,
}

/// Context handed to `<dir>/form.html`
#[derive(Serialize)]
struct FormContext<'a> {
    fields: Vec<RenderedField<'a>>,
    field_html: serde_json::Map<String, Value>,
    form: FormView,
    submit_label: Option<&'a str>,
    appended: String,
}

#[derive(Serialize)]
struct RenderedField<'a> {
    name: &'a str,
    kind: InputKind,
    html: &'a str,
}

impl FormBuilder {
    /// Create a builder for `model` with default options
    #[must_use]
    pub fn new<M: ModelSource + 'static>(model: M) -> Self {
        Self::shared(Arc::new(model), FormOptions::default())
    }

    /// Create a builder for `model` with explicit options
    #[must_use]
    pub fn with_options<M: ModelSource + 'static>(model: M, options: FormOptions) -> Self {
        Self::shared(Arc::new(model), options)
    }

    /// Create a builder over a model shared with other builders
    ///
    /// The form id defaults to `<Model>_Form` and every attribute gets a
    /// humanized default label.
    #[must_use]
    pub fn shared(model: Arc<dyn ModelSource>, options: FormOptions) -> Self {
        let mut config = FormConfig::new(format!("{}_Form", model.name()));
        config.labels = model
            .attributes()
            .iter()
            .map(|(name, _)| (name.clone(), humanize(name)))
            .collect();

        Self {
            model,
            config,
            options,
            instance: None,
            errors: None,
            fragments: Vec::new(),
            finalized: None,
        }
    }

    /// Apply configured form defaults
    #[must_use]
    pub fn defaults(self, defaults: &FormDefaults) -> Self {
        self.configure(|config| {
            if let Some(method) = &defaults.method {
                config.method.clone_from(method);
            }
            if defaults.submit_label.is_some() {
                config.submit_label.clone_from(&defaults.submit_label);
            }
            for class in &defaults.classes {
                config.add_classes(class);
            }
        })
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(self, method: impl Into<String>) -> Self {
        let method = method.into();
        self.configure(|config| config.method = method)
    }

    /// Set the form action URL
    #[must_use]
    pub fn action(self, action: impl Into<String>) -> Self {
        let action = action.into();
        self.configure(|config| config.action = Some(action))
    }

    /// Set one attribute; `id` and `class` go to the form id and class list
    #[must_use]
    pub fn attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configure(|config| config.set_attribute(key, value))
    }

    /// Merge several attributes, later keys overwriting earlier ones
    #[must_use]
    pub fn attrs<I, K, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.configure(|config| {
            for (key, value) in attributes {
                config.set_attribute(key, value);
            }
        })
    }

    /// Add whitespace-separated CSS classes, keeping the first occurrence
    #[must_use]
    pub fn add_class(self, classes: &str) -> Self {
        self.configure(|config| config.add_classes(classes))
    }

    /// Override the label of one field
    #[must_use]
    pub fn label(self, field: impl Into<String>, label: impl Into<String>) -> Self {
        let (field, label) = (field.into(), label.into());
        self.configure(|config| {
            config.labels.insert(field, label);
        })
    }

    /// Override several labels
    #[must_use]
    pub fn labels<I, K, V>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.configure(|config| {
            config
                .labels
                .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        })
    }

    /// Set the submit button text
    #[must_use]
    pub fn submit(self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.configure(|config| config.submit_label = Some(label))
    }

    /// Append a template rendered after the fields
    #[must_use]
    pub fn append_template(mut self, name: impl Into<String>, data: Option<Value>) -> Self {
        self.fragments.push(AppendedFragment::template(name, data));
        self
    }

    /// Append raw HTML after the fields
    #[must_use]
    pub fn append_html(mut self, html: impl Into<String>) -> Self {
        self.fragments.push(AppendedFragment::html(html));
        self
    }

    /// Use `instance` for field values
    #[must_use]
    pub fn fill(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self.finalized = None;
        self
    }

    /// Use any serializable record for field values
    ///
    /// # Errors
    ///
    /// Returns [`FormaoError::Configuration`] if `record` does not serialize
    /// to an object.
    pub fn try_fill<T: Serialize>(self, record: &T) -> Result<Self> {
        let value = serde_json::to_value(record)
            .map_err(|e| FormaoError::configuration(format!("unserializable record: {e}")))?;
        let instance = Instance::try_from(value).map_err(|other| {
            FormaoError::configuration(format!("record must be an object, got {other}"))
        })?;
        Ok(self.fill(instance))
    }

    /// Attach validation messages to the fields
    #[must_use]
    pub fn errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self.finalized = None;
        self
    }

    /// Override the template directory for this builder
    #[must_use]
    pub fn template_dir(mut self, dir: impl Into<String>) -> Self {
        self.options.template_directory = Some(dir.into());
        self
    }

    fn configure(mut self, apply: impl FnOnce(&mut FormConfig)) -> Self {
        apply(&mut self.config);
        self.finalized = None;
        self
    }

    /// Form-level configuration
    #[must_use]
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Constructor options, including any per-builder override
    #[must_use]
    pub const fn options(&self) -> &FormOptions {
        &self.options
    }

    /// The model this form is built over
    #[must_use]
    pub fn model(&self) -> &dyn ModelSource {
        self.model.as_ref()
    }

    /// Explicitly supplied instance, if any
    #[must_use]
    pub const fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }

    /// Appended fragments in push order
    #[must_use]
    pub fn fragments(&self) -> &[AppendedFragment] {
        &self.fragments
    }

    /// Compute every field descriptor without rendering
    ///
    /// The result is cached until the configuration changes.
    ///
    /// # Errors
    ///
    /// Returns [`FormaoError::Configuration`] for an invalid method, id or
    /// attribute name, and [`FormaoError::Lookup`] for a label naming a
    /// field the model does not have.
    pub fn finalize_fields(&mut self) -> Result<&[FieldDescriptor]> {
        let descriptors = match self.finalized.take() {
            Some(descriptors) => descriptors,
            None => {
                let blank;
                let instance = match &self.instance {
                    Some(instance) => instance,
                    None => {
                        blank = self.model.build();
                        &blank
                    }
                };
                self.describe_fields(instance)?
            }
        };
        Ok(self.finalized.insert(descriptors).as_slice())
    }

    fn describe_fields(&self, instance: &Instance) -> Result<Vec<FieldDescriptor>> {
        self.config.validate()?;

        if let Some(field) = self
            .config
            .labels
            .keys()
            .find(|field| self.model.descriptor(field).is_none())
        {
            return Err(FormaoError::lookup(self.model.name(), field.as_str()));
        }

        let mapper = FieldMapper::new(self.model.as_ref(), &self.config)
            .with_instance(Some(instance))
            .with_errors(self.errors.as_ref());

        mapper
            .fields()
            .into_iter()
            .map(|field| mapper.describe(field))
            .collect()
    }

    fn resolve_template_dir<R>(&self, templates: &R) -> &str
    where
        R: TemplateRenderer + ?Sized,
    {
        if let Some(dir) = &self.options.template_directory {
            return dir;
        }

        let themed = templates
            .view_root()
            .is_some_and(|root| root.join(VIEW_TEMPLATE_DIR).join("form.html").is_file());
        let dir = if themed {
            VIEW_TEMPLATE_DIR
        } else {
            BUNDLED_TEMPLATE_DIR
        };
        tracing::debug!(template_dir = dir, "template directory resolved");
        dir
    }

    /// Render the complete form
    ///
    /// Without an explicit action or instance, the request URL and body are
    /// used. Fields and appended fragments render concurrently; the output
    /// keeps field declaration order and fragment push order. Rendering does
    /// not change the builder, so repeated calls give identical output.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormaoError`] raised while describing fields or
    /// rendering any template. No partial HTML is returned.
    #[tracing::instrument(
        skip_all,
        fields(model = %self.model.name(), form = %self.config.id())
    )]
    pub async fn render<R>(&self, templates: &R, request: Option<&dyn RequestLike>) -> Result<String>
    where
        R: TemplateRenderer + ?Sized,
    {
        let action = self
            .config
            .action()
            .or_else(|| request.and_then(RequestLike::url));

        let fallback;
        let instance = match self
            .instance
            .as_ref()
            .or_else(|| request.and_then(RequestLike::body))
        {
            Some(instance) => instance,
            None => {
                fallback = self.model.build();
                &fallback
            }
        };

        let descriptors = self.describe_fields(instance)?;
        let dir = self.resolve_template_dir(templates);

        let fields = try_join_all(
            descriptors
                .iter()
                .map(|descriptor| render_field(templates, dir, descriptor)),
        );
        let fragments = try_join_all(
            self.fragments
                .iter()
                .map(|fragment| fragment.render(templates)),
        );
        let (field_html, fragment_html) = try_join(fields, fragments).await?;

        let context = FormContext {
            fields: descriptors
                .iter()
                .zip(&field_html)
                .map(|(descriptor, html)| RenderedField {
                    name: &descriptor.name,
                    kind: descriptor.kind,
                    html,
                })
                .collect(),
            field_html: descriptors
                .iter()
                .zip(&field_html)
                .map(|(descriptor, html)| (descriptor.name.clone(), Value::from(html.as_str())))
                .collect(),
            form: self.config.view(action),
            submit_label: self.config.submit_label(),
            appended: fragment_html.concat(),
        };
        let context = serde_json::to_value(context).map_err(TemplateError::Data)?;

        let html = templates
            .render(&template_path(dir, "form"), context)
            .await?;
        tracing::debug!(fields = descriptors.len(), "form rendered");
        Ok(html)
    }
}

async fn render_field<R>(
    templates: &R,
    dir: &str,
    descriptor: &FieldDescriptor,
) -> std::result::Result<String, TemplateError>
where
    R: TemplateRenderer + ?Sized,
{
    let template = descriptor.template(dir);
    tracing::trace!(field = %descriptor.name, %template, "rendering field");
    let data = serde_json::to_value(descriptor)?;
    templates.render(&template, data).await
}

impl std::fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBuilder")
            .field("model", &self.model.name())
            .field("config", &self.config)
            .field("options", &self.options)
            .field("instance", &self.instance)
            .field("fragments", &self.fragments)
            .finish_non_exhaustive()
    }
}
