//! The design tree IR shared by every exporter.
//!
//! A [`DesignTree`] is an immutable snapshot produced by the editing layer.
//! Every node already carries its resolved absolute position and size;
//! nothing in this workspace performs layout.

use crate::types::{
    Align, ColorValue, Direction, FontStyle, FontWeight, Justify, ObjectFit, Padding, Point, Size,
    TextAlign, TextVariant,
};
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A complete design: a root frame plus optional schema metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTree {
    /// Schema version of the IR, when the editor records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Human-readable design title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub root: Node,
    /// Document-level fields this build does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DesignTree {
    pub fn new(root: Node) -> Self {
        Self {
            version: None,
            name: None,
            root,
            extra: Map::new(),
        }
    }

    /// A tree whose root is an empty frame of the given pixel size.
    pub fn with_frame(width: f64, height: f64) -> Self {
        Self::new(Node::new("root", NodeKind::Frame(ContainerAttrs::default())).sized(width, height))
    }

    /// Append a node to the root's children.
    pub fn push(&mut self, child: Node) {
        if let Some(children) = self.root.children_mut() {
            children.push(child);
        }
    }

    /// The root frame's size, or zero when it was never set.
    pub fn root_size(&self) -> Size {
        self.root.size.unwrap_or_default()
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.walk().count()
    }

    /// Find a node anywhere in the tree by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.root.walk().find(|node| node.id.0 == id)
    }
}

/// Node identifier, unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node in the design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute position; absent only on the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Defaults to 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Variant tag (`type`) and the variant's attributes.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            position: None,
            size: None,
            opacity: None,
            kind,
        }
    }

    /// Set the absolute position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Set the size.
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Append a child. Leaf nodes ignore it.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
        self
    }

    /// The `type` tag as it appears in the serialized form.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Effective opacity (absent means fully opaque).
    pub fn effective_opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn position_or_origin(&self) -> Point {
        self.position.unwrap_or_default()
    }

    pub fn size_or_zero(&self) -> Size {
        self.size.unwrap_or_default()
    }

    /// The human-readable name when it is set and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Child nodes; empty for leaf variants.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Frame(c) | NodeKind::Box(c) | NodeKind::Group(c) => &c.children,
            NodeKind::Stack(s) => &s.children,
            NodeKind::Grid(g) => &g.children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Frame(c) | NodeKind::Box(c) | NodeKind::Group(c) => Some(&mut c.children),
            NodeKind::Stack(s) => Some(&mut s.children),
            NodeKind::Grid(g) => Some(&mut g.children),
            _ => None,
        }
    }

    /// Pre-order, depth-first iteration over this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// The variant-specific part of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Frame(ContainerAttrs),
    Box(ContainerAttrs),
    Group(ContainerAttrs),
    Stack(StackAttrs),
    Grid(GridAttrs),
    Rect(RectAttrs),
    Ellipse(EllipseAttrs),
    Text(TextAttrs),
    Image(ImageAttrs),
    Line(LineAttrs),
    Curve(PathAttrs),
    Polygon(PathAttrs),
    /// Freehand stroke.
    Draw(PathAttrs),
    /// A `type` this build does not know. All attributes are kept verbatim.
    Unknown {
        kind: String,
        attributes: Map<String, Value>,
    },
}

impl NodeKind {
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Frame(_) => "frame",
            NodeKind::Box(_) => "box",
            NodeKind::Group(_) => "group",
            NodeKind::Stack(_) => "stack",
            NodeKind::Grid(_) => "grid",
            NodeKind::Rect(_) => "rect",
            NodeKind::Ellipse(_) => "ellipse",
            NodeKind::Text(_) => "text",
            NodeKind::Image(_) => "image",
            NodeKind::Line(_) => "line",
            NodeKind::Curve(_) => "curve",
            NodeKind::Polygon(_) => "polygon",
            NodeKind::Draw(_) => "draw",
            NodeKind::Unknown { kind, .. } => kind,
        }
    }

    /// Vector variants that only exist as point lists.
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            NodeKind::Line(_) | NodeKind::Curve(_) | NodeKind::Polygon(_) | NodeKind::Draw(_)
        )
    }

    fn attributes(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match self {
            NodeKind::Frame(a) | NodeKind::Box(a) | NodeKind::Group(a) => serde_json::to_value(a)?,
            NodeKind::Stack(a) => serde_json::to_value(a)?,
            NodeKind::Grid(a) => serde_json::to_value(a)?,
            NodeKind::Rect(a) => serde_json::to_value(a)?,
            NodeKind::Ellipse(a) => serde_json::to_value(a)?,
            NodeKind::Text(a) => serde_json::to_value(a)?,
            NodeKind::Image(a) => serde_json::to_value(a)?,
            NodeKind::Line(a) => serde_json::to_value(a)?,
            NodeKind::Curve(a) | NodeKind::Polygon(a) | NodeKind::Draw(a) => {
                serde_json::to_value(a)?
            }
            NodeKind::Unknown { attributes, .. } => return Ok(attributes.clone()),
        };
        match value {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "node attributes must serialize as an object, got {other}"
            ))),
        }
    }

    fn from_parts(kind: String, attributes: Map<String, Value>) -> Result<Self, serde_json::Error> {
        Ok(match kind.as_str() {
            "frame" => NodeKind::Frame(attrs(attributes)?),
            "box" => NodeKind::Box(attrs(attributes)?),
            "group" => NodeKind::Group(attrs(attributes)?),
            "stack" => NodeKind::Stack(attrs(attributes)?),
            "grid" => NodeKind::Grid(attrs(attributes)?),
            "rect" => NodeKind::Rect(attrs(attributes)?),
            "ellipse" => NodeKind::Ellipse(attrs(attributes)?),
            "text" => NodeKind::Text(attrs(attributes)?),
            "image" => NodeKind::Image(attrs(attributes)?),
            "line" => NodeKind::Line(attrs(attributes)?),
            "curve" => NodeKind::Curve(attrs(attributes)?),
            "polygon" => NodeKind::Polygon(attrs(attributes)?),
            "draw" => NodeKind::Draw(attrs(attributes)?),
            _ => NodeKind::Unknown { kind, attributes },
        })
    }
}

fn attrs<T: DeserializeOwned>(attributes: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(attributes))
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = self.attributes().map_err(S::Error::custom)?;
        map.insert("type".to_string(), Value::String(self.type_name().to_string()));
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match map.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "node type must be a string, found {other}"
                )))
            }
            None => return Err(D::Error::missing_field("type")),
        };
        NodeKind::from_parts(kind, map).map_err(D::Error::custom)
    }
}

/// Attributes of frame, box and group containers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerAttrs {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Attributes this build does not model, kept verbatim so archives stay lossless.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A linear layout container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackAttrs {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify: Option<Justify>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fixed-column grid container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridAttrs {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Unmodelled attributes.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_columns() -> u32 {
    1
}

impl Default for GridAttrs {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            gap: None,
            background: None,
            padding: None,
            children: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<TextVariant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextAttrs {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Bold when the weight says so or the variant is a heading.
    pub fn is_bold(&self) -> bool {
        self.font_weight.as_ref().map(FontWeight::is_bold).unwrap_or(false)
            || self.variant.map(|v| v.is_heading()).unwrap_or(false)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self.font_style, Some(FontStyle::Italic) | Some(FontStyle::Oblique))
    }

    /// Explicit font size, else the variant's default, else body size.
    pub fn resolved_font_size(&self) -> f64 {
        self.font_size.unwrap_or_else(|| {
            self.variant
                .unwrap_or(TextVariant::Body)
                .default_font_size()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttrs {
    #[serde(default)]
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A straight segment `[x1, y1, x2, y2]`, relative to the node position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttrs {
    #[serde(default)]
    pub points: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Flattened `x, y` pairs shared by curve, polygon and draw nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAttrs {
    #[serde(default)]
    pub points: Vec<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PathAttrs {
    /// Point pairs; a trailing odd coordinate is ignored.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}
