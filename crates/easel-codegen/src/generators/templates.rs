//! Handlebars templates for project scaffolding.

use crate::{ExportError, Result};
use convert_case::{Case, Casing};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| ExportError::Template {
                reason: e.to_string(),
            })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(|e| ExportError::Template {
                reason: e.to_string(),
            })
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(|e| ExportError::Template {
                reason: e.to_string(),
            })
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &Helper,
                 _r: &Handlebars,
                 _ctx: &Context,
                 _rc: &mut RenderContext,
                 out: &mut dyn Output|
                 -> HelperResult {
                    out.write(&first_param(h).to_case(Case::Pascal))?;
                    Ok(())
                },
            ),
        );

        handlebars.register_helper(
            "kebab_case",
            Box::new(
                |h: &Helper,
                 _r: &Handlebars,
                 _ctx: &Context,
                 _rc: &mut RenderContext,
                 out: &mut dyn Output|
                 -> HelperResult {
                    out.write(&first_param(h).to_case(Case::Kebab))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn first_param(h: &Helper) -> String {
    h.param(0)
        .and_then(|v| v.value().as_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_registered_template() {
        let mut engine = TemplateEngine::new();
        engine
            .register_template("hello", "Hello, {{name}}!")
            .unwrap();

        let result = engine.render("hello", &json!({"name": "<World>"})).unwrap();
        assert_eq!(result, "Hello, <World>!");
    }

    #[test]
    fn test_case_helpers() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string(
                "{{pascal_case name}} {{kebab_case name}}",
                &json!({"name": "landing page"}),
            )
            .unwrap();
        assert_eq!(result, "LandingPage landing-page");
    }

    #[test]
    fn test_missing_variable_is_a_template_error() {
        let engine = TemplateEngine::new();
        let err = engine.render_string("{{nope}}", &json!({})).unwrap_err();
        assert!(matches!(err, ExportError::Template { .. }));
    }
}
