//! Reply template rendering.
//!
//! Templates use Jinja syntax (`{{ title }}`, `{% if have %}...{% endif %}`)
//! and may reference only the names in [`FIELD_NAMES`](crate::converters::FIELD_NAMES).
//! Output is collapsed to a single line.

use std::sync::OnceLock;

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};
use tracing::debug;

use crate::converters::{DerivedFields, FIELD_NAMES};
use crate::error::Result;

/// Shared template environment.
///
/// Strict undefined handling makes a reference to an unknown field an
/// error instead of silently rendering nothing.
fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    })
}

/// Render `template` against `fields` and normalize the whitespace.
///
/// # Errors
///
/// Returns `TemplateError` if the template does not parse or references
/// a name that is not a derived field.
pub fn render(template: &str, fields: &DerivedFields) -> Result<String> {
    let rendered = environment().render_str(template, fields)?;
    debug!(len = rendered.len(), "Rendered reply template");
    Ok(normalize_whitespace(&rendered))
}

/// Check that a template parses and only uses known fields.
///
/// Every name the template reads is checked, including names inside
/// branches that would not run for a given entry.
pub fn validate(template: &str) -> Result<()> {
    let compiled = environment().template_from_str(template)?;
    let mut unknown: Vec<String> = compiled
        .undeclared_variables(false)
        .into_iter()
        .filter(|name| !FIELD_NAMES.contains(&name.as_str()))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort();
    Err(Error::new(
        ErrorKind::UndefinedError,
        format!("unknown template variable: {}", unknown.join(", ")),
    )
    .into())
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
