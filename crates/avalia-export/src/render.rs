use tera::{Context, Tera};

use avalia_core::models::report::EvaluationReport;

use crate::error::ExportError;

/// The default report template (Markdown, Jinja2 syntax), mirroring the
/// layout of the clinic's printed evaluation report.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/evaluation_report.md");

/// Render a report through a Tera template.
///
/// The `template_content` is the raw template string; the report's fields
/// become the template context variables.
pub fn render_report(
    report: &EvaluationReport,
    template_content: &str,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template("evaluation_report", template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render("evaluation_report", &context)?;
    Ok(rendered)
}
