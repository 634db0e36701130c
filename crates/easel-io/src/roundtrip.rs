//! Round-trip validation.
//!
//! Exports a tree without metadata, imports it again and compares the
//! sorted-key JSON of both. Every difference is reported, not just the first.

use crate::canonical::{export, import, sort_keys, ExportOptions};
use easel_core::DesignTree;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Outcome of [`validate_round_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoundTripReport {
    pub valid: bool,
    /// One diagnostic per differing key, array length or value type.
    pub errors: Vec<String>,
}

impl RoundTripReport {
    fn failed(error: String) -> Self {
        Self {
            valid: false,
            errors: vec![error],
        }
    }
}

/// Check that `import(export(tree))` reproduces `tree`.
pub fn validate_round_trip(tree: &DesignTree) -> RoundTripReport {
    let options = ExportOptions::default().without_metadata();

    let original = match serde_json::to_value(tree) {
        Ok(value) => sort_keys(value),
        Err(e) => return RoundTripReport::failed(format!("original tree does not serialize: {e}")),
    };
    let text = match export(tree, &options) {
        Ok(text) => text,
        Err(e) => return RoundTripReport::failed(format!("export failed: {e}")),
    };
    let restored = match import(&text) {
        Ok(tree) => tree,
        Err(e) => return RoundTripReport::failed(format!("import failed: {e}")),
    };
    let reimported = match serde_json::to_value(&restored) {
        Ok(value) => sort_keys(value),
        Err(e) => return RoundTripReport::failed(format!("reimported tree does not serialize: {e}")),
    };

    let errors = diff_values(&original, &reimported);
    debug!(differences = errors.len(), "round trip validated");

    RoundTripReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Walk two JSON values in parallel and describe every difference.
///
/// Paths are written from the document root, e.g. `root.children[0].fill`.
/// A difference at the document itself is reported under `<document>`.
pub fn diff_values(original: &Value, reimported: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    diff_at("", original, reimported, &mut errors);
    errors
}

fn member(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn label(path: &str) -> &str {
    if path.is_empty() {
        "<document>"
    } else {
        path
    }
}

fn diff_at(path: &str, left: &Value, right: &Value, errors: &mut Vec<String>) {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            for (key, lv) in l {
                let child = member(path, key);
                match r.get(key) {
                    Some(rv) => diff_at(&child, lv, rv, errors),
                    None => errors.push(format!("{child}: missing after round trip")),
                }
            }
            for key in r.keys().filter(|key| !l.contains_key(*key)) {
                errors.push(format!("{}: unexpected key after round trip", member(path, key)));
            }
        }
        (Value::Array(l), Value::Array(r)) => {
            if l.len() != r.len() {
                errors.push(format!(
                    "{}: array length {} became {}",
                    label(path),
                    l.len(),
                    r.len()
                ));
            }
            for (index, (lv, rv)) in l.iter().zip(r).enumerate() {
                diff_at(&format!("{path}[{index}]"), lv, rv, errors);
            }
        }
        (l, r) if type_name(l) != type_name(r) => {
            errors.push(format!(
                "{}: type {} became {}",
                label(path),
                type_name(l),
                type_name(r)
            ));
        }
        (l, r) => {
            if l != r {
                errors.push(format!("{}: value {l} became {r}", label(path)));
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
