//! Catalog renderers: structured JSON, CSS custom properties, TypeScript.

use crate::catalog::{Token, TokenCatalog, TokenType, TokenValue};
use easel_core::ExportError;
use serde_json::Value;

/// Structured catalog, one object per token class, each token as
/// `{ value, type, description }`.
pub fn render_json(catalog: &TokenCatalog) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Flat `:root { --name: value; }` block.
///
/// Typography tokens become three declarations suffixed `-size`, `-family`
/// and `-weight`; absent parts are omitted.
pub fn render_css(catalog: &TokenCatalog) -> String {
    let mut lines = vec![":root {".to_string()];

    for (_, name, token) in catalog.iter() {
        match &token.value {
            TokenValue::Typography(t) => {
                lines.push(declaration(&format!("{}-size", name), &t.font_size));
                if let Some(family) = &t.font_family {
                    lines.push(declaration(&format!("{}-family", name), family));
                }
                if let Some(weight) = &t.font_weight {
                    lines.push(declaration(&format!("{}-weight", name), weight));
                }
            }
            TokenValue::Text(text) => lines.push(declaration(name, text)),
            TokenValue::Number(n) => lines.push(declaration(name, &n.to_string())),
        }
    }

    lines.push("}".to_string());
    let mut css = lines.join("\n");
    css.push('\n');
    css
}

fn declaration(name: &str, value: &str) -> String {
    format!("  --{}: {};", name, value)
}

/// A TypeScript module exporting the catalog as a `const` object.
pub fn render_typescript(catalog: &TokenCatalog) -> String {
    let mut lines = vec!["export const tokens = {".to_string()];

    for token_type in TokenType::ALL {
        let class = catalog.class(token_type);
        if class.is_empty() {
            lines.push(format!("  {}: {{}},", token_type.catalog_key()));
            continue;
        }
        lines.push(format!("  {}: {{", token_type.catalog_key()));
        for (name, token) in class {
            lines.push(format!("    {}: {},", quote(name), ts_value(token)));
        }
        lines.push("  },".to_string());
    }

    lines.push("} as const;".to_string());
    lines.push(String::new());
    lines.push("export type Tokens = typeof tokens;".to_string());
    let mut ts = lines.join("\n");
    ts.push('\n');
    ts
}

fn ts_value(token: &Token) -> String {
    match &token.value {
        TokenValue::Number(n) => n.to_string(),
        TokenValue::Text(text) => quote(text),
        TokenValue::Typography(t) => {
            let mut fields = vec![format!("fontSize: {}", quote(&t.font_size))];
            if let Some(family) = &t.font_family {
                fields.push(format!("fontFamily: {}", quote(family)));
            }
            if let Some(weight) = &t.font_weight {
                fields.push(format!("fontWeight: {}", quote(weight)));
            }
            format!("{{ {} }}", fields.join(", "))
        }
    }
}

/// JSON string literals are valid TypeScript string literals.
fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}
