//! Canonical JSON writer and reader.

use chrono::{DateTime, SecondsFormat, Utc};
use easel_core::{DesignTree, ExportError, FormatError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Version tag written into every envelope's metadata.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

/// Options for [`export`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Two-space indentation instead of a single line.
    pub pretty: bool,
    /// Wrap the tree in a `metadata` + `spec` envelope header.
    pub include_metadata: bool,
    /// Recursively sort object keys.
    pub sort_keys: bool,
    /// Recorded in metadata when set.
    pub author: Option<String>,
    /// Fixed export time; `None` uses the current time.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            include_metadata: true,
            sort_keys: true,
            author: None,
            timestamp: None,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Bare `{ spec }` envelope without metadata.
    pub fn without_metadata(mut self) -> Self {
        self.include_metadata = false;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// The `metadata` block of an exported envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_format_version: String,
    /// RFC 3339 / ISO-8601 UTC timestamp.
    pub exported_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ExportMetadata {
    fn for_tree(tree: &DesignTree, options: &ExportOptions) -> Self {
        let exported_at = options
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            export_format_version: EXPORT_FORMAT_VERSION.to_string(),
            exported_at,
            schema_version: tree.version.clone(),
            title: tree.name.clone(),
            author: options.author.clone(),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ExportMetadata>,
    spec: &'a DesignTree,
}

/// A successfully imported document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    pub tree: DesignTree,
    /// Present only for the enveloped form.
    pub metadata: Option<ExportMetadata>,
}

/// Export a tree to canonical JSON text.
pub fn export(tree: &DesignTree, options: &ExportOptions) -> Result<String, ExportError> {
    let metadata = options
        .include_metadata
        .then(|| ExportMetadata::for_tree(tree, options));

    let mut value = serde_json::to_value(Envelope { metadata, spec: tree })?;
    if options.sort_keys {
        value = sort_keys(value);
    }

    let text = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    debug!(
        nodes = tree.node_count(),
        bytes = text.len(),
        "exported canonical json"
    );
    Ok(text)
}

/// Import a tree from either the enveloped or the bare form.
pub fn import(text: &str) -> Result<DesignTree, FormatError> {
    import_document(text).map(|doc| doc.tree)
}

/// Import a tree together with its envelope metadata.
pub fn import_document(text: &str) -> Result<ImportedDocument, FormatError> {
    let mut value: Value = serde_json::from_str(text).map_err(FormatError::Parse)?;
    let object = value.as_object_mut().ok_or(FormatError::MissingTree)?;

    if let Some(spec) = object.remove("spec") {
        // Metadata is informational; a malformed block does not fail the import.
        let metadata = object
            .remove("metadata")
            .and_then(|raw| serde_json::from_value(raw).ok());
        let tree = serde_json::from_value(spec).map_err(FormatError::InvalidTree)?;
        return Ok(ImportedDocument { tree, metadata });
    }

    if object.contains_key("root") {
        let tree = serde_json::from_value(value).map_err(FormatError::InvalidTree)?;
        return Ok(ImportedDocument {
            tree,
            metadata: None,
        });
    }

    Err(FormatError::MissingTree)
}

/// Recursively sort every object's keys.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use easel_core::{ColorValue, Node, NodeKind, RectAttrs};
    use serde_json::json;

    fn sample_tree() -> DesignTree {
        let mut tree = DesignTree::with_frame(800.0, 600.0);
        tree.version = Some("2".to_string());
        tree.name = Some("Landing".to_string());
        tree.push(
            Node::new(
                "r1",
                NodeKind::Rect(RectAttrs {
                    fill: Some(ColorValue::from("#ff0000")),
                    radius: Some(4.0),
                    ..Default::default()
                }),
            )
            .at(10.0, 10.0)
            .sized(100.0, 100.0)
            .named("Card"),
        );
        tree
    }

    fn fixed_options() -> ExportOptions {
        ExportOptions::default().at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_export_envelope_has_metadata() {
        let text = export(&sample_tree(), &fixed_options().with_author("sam")).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["metadata"]["exportFormatVersion"], json!("1.0.0"));
        assert_eq!(value["metadata"]["exportedAt"], json!("2024-05-01T12:00:00.000Z"));
        assert_eq!(value["metadata"]["schemaVersion"], json!("2"));
        assert_eq!(value["metadata"]["title"], json!("Landing"));
        assert_eq!(value["metadata"]["author"], json!("sam"));
        assert_eq!(value["spec"]["root"]["id"], json!("root"));
    }

    #[test]
    fn test_export_without_metadata() {
        let text = export(&sample_tree(), &ExportOptions::new().without_metadata()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("metadata").is_none());
        assert!(value.get("spec").is_some());
    }

    #[test]
    fn test_keys_are_sorted_in_output() {
        let text = export(&sample_tree(), &fixed_options().compact()).unwrap();
        assert!(text.starts_with("{\"metadata\":{\"exportFormatVersion\""));
        let fill = text.find("\"fill\"").unwrap();
        let id = text.find("\"id\":\"r1\"").unwrap();
        let radius = text.find("\"radius\"").unwrap();
        assert!(fill < id && id < radius);
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let text = export(&sample_tree(), &fixed_options()).unwrap();
        assert!(text.contains("\n  \"metadata\": {"));
        let compact = export(&sample_tree(), &fixed_options().compact()).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_export_is_byte_stable() {
        let tree = sample_tree();
        let a = export(&tree, &fixed_options()).unwrap();
        let b = export(&tree.clone(), &fixed_options()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_import_envelope_and_bare_forms() {
        let tree = sample_tree();
        let enveloped = export(&tree, &fixed_options()).unwrap();
        let doc = import_document(&enveloped).unwrap();
        assert_eq!(doc.tree, tree);
        assert_eq!(doc.metadata.unwrap().title.as_deref(), Some("Landing"));

        let bare = serde_json::to_string(&tree).unwrap();
        let doc = import_document(&bare).unwrap();
        assert_eq!(doc.tree, tree);
        assert!(doc.metadata.is_none());
    }

    #[test]
    fn test_import_errors() {
        assert!(matches!(import("{not json"), Err(FormatError::Parse(_))));
        assert!(matches!(import("{\"other\": 1}"), Err(FormatError::MissingTree)));
        assert!(matches!(import("[1, 2]"), Err(FormatError::MissingTree)));
        assert!(matches!(
            import("{\"root\": {\"id\": \"x\"}}"),
            Err(FormatError::InvalidTree(_))
        ));
    }

    #[test]
    fn test_unmodelled_attributes_survive_import() {
        let text = r##"{"editor": {"grid": 8}, "root": {"id": "root", "type": "frame", "size": {"width": 100, "height": 100},
            "guides": [12, 48],
            "children": [{"id": "r", "type": "rect", "fill": "#ff0000", "rotation": 45, "locked": true,
                "position": {"x": 0, "y": 0}, "size": {"width": 10, "height": 10}}]}}"##;
        let tree = import(text).unwrap();

        let rect = tree.find("r").unwrap();
        match &rect.kind {
            NodeKind::Rect(attrs) => {
                assert_eq!(attrs.fill.as_ref().map(|c| c.0.as_str()), Some("#ff0000"));
                assert_eq!(attrs.extra.get("rotation"), Some(&json!(45)));
                assert_eq!(attrs.extra.get("locked"), Some(&json!(true)));
            }
            other => panic!("expected a rect, got {other:?}"),
        }

        let exported = export(&tree, &ExportOptions::default().without_metadata().compact()).unwrap();
        assert!(exported.contains(r#""locked":true"#));
        assert!(exported.contains(r#""rotation":45"#));
        assert!(exported.contains(r#""guides":[12,48]"#));
        assert!(exported.contains(r#""editor":{"grid":8}"#));
        assert_eq!(import(&exported).unwrap(), tree);
    }

    #[test]
    fn test_sort_keys_recurses_into_arrays() {
        let value = json!({"b": [{"z": 1, "a": 2}], "a": {"y": 1, "x": 2}});
        let sorted = serde_json::to_string(&sort_keys(value)).unwrap();
        assert_eq!(sorted, r#"{"a":{"x":2,"y":1},"b":[{"a":2,"z":1}]}"#);
    }
}
