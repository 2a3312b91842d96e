//! Render a project form to stdout
//!
//! Run with: `cargo run --example render_form`
//!
//! Set `FORMAO_TEMPLATES__VIEW_ROOT=./views` to render with project
//! templates instead of the bundled ones.

use formao::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    formao::observability::init()?;

    let config = FormaoConfig::load()?;
    let templates = config.form_templates()?;

    let model = ModelMetadata::new("Project")
        .attribute("id", AttributeDescriptor::new(DataType::Integer).primary_key())
        .field("name", DataType::String)
        .field("description", DataType::Text)
        .field("startDate", DataType::Date)
        .field("budget", DataType::Decimal)
        .attribute(
            "stage",
            AttributeDescriptor::enumeration(["draft", "active", "done"]).default_value("draft"),
        )
        .field("completed", DataType::Boolean)
        .field("createdAt", DataType::Date);

    let html = FormBuilder::with_options(model, config.form_options())
        .defaults(&config.forms)
        .action("/projects")
        .add_class("project-form")
        .label("startDate", "Kick-off")
        .append_html(r#"<a href="/projects">Cancel</a>"#)
        .render(&templates, None)
        .await?;

    tracing::info!(bytes = html.len(), "form rendered");
    println!("{html}");
    Ok(())
}
