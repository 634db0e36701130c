//! React component generator (TSX or JSX with Tailwind classes).
//!
//! Every node becomes one element with two independent parts: semantic
//! utility classes (`rounded`, `flex-row`, `font-bold`, ...) and an inline
//! style carrying exact pixel geometry plus anything without a class
//! equivalent. Children of stacks and grids are laid out by the parent and
//! get no `absolute` class or offsets.

use super::templates::TemplateEngine;
use super::{format_number, CodeGenerator, GeneratedFile, GeneratedProject};
use crate::Result;
use convert_case::{Case, Casing};
use easel_core::{
    Align, ColorValue, ContainerAttrs, DesignTree, Direction, EllipseAttrs, FontWeight, GridAttrs,
    ImageAttrs, Justify, LineAttrs, Node, NodeKind, Padding, PathAttrs, RectAttrs, StackAttrs,
    TextAlign, TextAttrs, TextVariant,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const DEFAULT_COMPONENT_NAME: &str = "DesignComponent";

const INDEX_TEMPLATE: &str = "export { {{name}} } from './{{name}}';
export { default } from './{{name}}';
";

const PACKAGE_TEMPLATE: &str = r#"{
  "name": "{{kebab_case name}}",
  "version": "0.1.0",
  "private": true,
  "main": "src/index.{{index_ext}}",
  "peerDependencies": {
    "react": ">=18"
  }{{#if typed}},
  "devDependencies": {
    "@types/react": "^18.0.0",
    "typescript": "^5.0.0"
  }{{/if}}
}
"#;

/// Options for [`ReactGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactOptions {
    /// Name of the exported component.
    pub component_name: String,
    /// TypeScript (`.tsx`) instead of JavaScript (`.jsx`).
    pub typed: bool,
    /// Function component instead of a class component.
    pub functional: bool,
    /// Emit `{/* name */}` markers before named frames, stacks and groups.
    pub comments: bool,
}

impl Default for ReactOptions {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            typed: true,
            functional: true,
            comments: true,
        }
    }
}

impl ReactOptions {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    /// JavaScript output.
    pub fn javascript(mut self) -> Self {
        self.typed = false;
        self
    }

    pub fn class_component(mut self) -> Self {
        self.functional = false;
        self
    }

    pub fn without_comments(mut self) -> Self {
        self.comments = false;
        self
    }
}

/// How a node is positioned relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Root,
    Absolute,
    /// Laid out by a stack or grid parent.
    Flow,
}

impl Placement {
    fn base_class(self) -> Option<&'static str> {
        match self {
            Placement::Root => Some("relative"),
            Placement::Absolute => Some("absolute"),
            Placement::Flow => None,
        }
    }
}

/// Inline style entries; values are already JavaScript expressions.
#[derive(Debug, Default)]
struct Style {
    entries: Vec<(&'static str, String)>,
}

impl Style {
    fn number(&mut self, key: &'static str, value: f64) {
        self.entries.push((key, format_number(value)));
    }

    fn string(&mut self, key: &'static str, value: &str) {
        self.entries.push((key, js_string(value)));
    }

    fn render(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let body: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        Some(format!("style={{{{ {} }}}}", body.join(", ")))
    }
}

/// Class list and inline style of one element.
#[derive(Debug, Default)]
struct Props {
    classes: Vec<String>,
    style: Style,
}

impl Props {
    fn new(placement: Placement) -> Self {
        let mut props = Props::default();
        if let Some(class) = placement.base_class() {
            props.class(class);
        }
        props
    }

    fn class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    /// ` className="..." style={{...}}`, each part omitted when empty.
    fn render(&self) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() {
            out.push_str(&format!(" className=\"{}\"", self.classes.join(" ")));
        }
        if let Some(style) = self.style.render() {
            out.push(' ');
            out.push_str(&style);
        }
        out
    }
}

/// React component generator.
#[derive(Debug, Clone, Default)]
pub struct ReactGenerator {
    options: ReactOptions,
}

impl ReactGenerator {
    pub fn new(options: ReactOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReactOptions {
        &self.options
    }

    /// PascalCase identifier for the component; falls back to the default
    /// name when the configured one has no usable characters.
    pub fn component_name(&self) -> String {
        let name: String = self
            .options
            .component_name
            .to_case(Case::Pascal)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        match name.chars().next() {
            Some(first) if !first.is_ascii_digit() => name,
            _ => DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    /// Component file, `index` barrel and `package.json`.
    pub fn generate_project(&self, tree: &DesignTree) -> Result<GeneratedProject> {
        let name = self.component_name();
        let index_ext = if self.options.typed { "ts" } else { "js" };

        let mut engine = TemplateEngine::new();
        engine.register_template("index", INDEX_TEMPLATE)?;
        engine.register_template("package", PACKAGE_TEMPLATE)?;
        let data = json!({
            "name": name,
            "index_ext": index_ext,
            "typed": self.options.typed,
        });

        let files = vec![
            GeneratedFile::new(
                format!("src/{}.{}", name, self.file_extension()),
                self.generate(tree),
            ),
            GeneratedFile::new(format!("src/index.{}", index_ext), engine.render("index", &data)?),
            GeneratedFile::new("package.json", engine.render("package", &data)?),
        ];
        Ok(GeneratedProject { files })
    }

    fn emit_node(&self, node: &Node, placement: Placement, depth: usize, out: &mut Vec<String>) {
        let pad = "  ".repeat(depth);

        // The root sits directly inside `return (`, where a JSX comment is not allowed.
        if placement != Placement::Root {
            if let Some(name) = self.marker_name(node) {
                out.push(format!("{}{{/* {} */}}", pad, comment_text(name)));
            }
        }

        match &node.kind {
            NodeKind::Frame(c) | NodeKind::Box(c) | NodeKind::Group(c) => {
                let props = self.container_props(node, c, placement);
                self.wrap(&props, &c.children, Placement::Absolute, depth, out);
            }
            NodeKind::Stack(s) => {
                let props = self.stack_props(node, s, placement);
                self.wrap(&props, &s.children, Placement::Flow, depth, out);
            }
            NodeKind::Grid(g) => {
                let props = self.grid_props(node, g, placement);
                self.wrap(&props, &g.children, Placement::Flow, depth, out);
            }
            NodeKind::Rect(r) => out.push(format!("{}{}", pad, self.rect(node, r, placement))),
            NodeKind::Ellipse(e) => out.push(format!("{}{}", pad, self.ellipse(node, e, placement))),
            NodeKind::Text(t) => out.push(format!("{}{}", pad, self.text(node, t, placement))),
            NodeKind::Image(i) => out.push(format!("{}{}", pad, self.image(node, i, placement))),
            NodeKind::Line(l) => {
                let shape = line_shape(l);
                self.svg(node, placement, shape, depth, out);
            }
            NodeKind::Curve(p) => self.svg(node, placement, path_shape(p, p.closed), depth, out),
            NodeKind::Polygon(p) => self.svg(node, placement, path_shape(p, true), depth, out),
            NodeKind::Draw(p) => self.svg(node, placement, path_shape(p, false), depth, out),
            NodeKind::Unknown { kind, .. } => {
                debug!(id = %node.id, kind = %kind, "unsupported node rendered as placeholder");
                out.push(format!(
                    "{}{{/* Unsupported node type: {} ({}) */}}",
                    pad,
                    comment_text(kind),
                    comment_text(&node.id.0)
                ));
            }
        }
    }

    /// Name to mark a named frame, stack or group with, when comments are on.
    fn marker_name<'n>(&self, node: &'n Node) -> Option<&'n str> {
        let commented = matches!(
            node.kind,
            NodeKind::Frame(_) | NodeKind::Stack(_) | NodeKind::Group(_)
        );
        if self.options.comments && commented {
            node.display_name()
        } else {
            None
        }
    }

    /// A `div` around its children, or a self-closing one when there are none.
    fn wrap(
        &self,
        props: &Props,
        children: &[Node],
        child_placement: Placement,
        depth: usize,
        out: &mut Vec<String>,
    ) {
        let pad = "  ".repeat(depth);
        if children.is_empty() {
            out.push(format!("{}<div{} />", pad, props.render()));
            return;
        }
        out.push(format!("{}<div{}>", pad, props.render()));
        for child in children {
            self.emit_node(child, child_placement, depth + 1, out);
        }
        out.push(format!("{}</div>", pad));
    }

    fn container_props(&self, node: &Node, attrs: &ContainerAttrs, placement: Placement) -> Props {
        let mut props = Props::new(placement);
        if matches!(node.kind, NodeKind::Frame(_)) {
            props.class("overflow-hidden");
        }
        rounded(&mut props, attrs.radius);
        geometry(&mut props.style, node, placement);
        background(&mut props.style, attrs.background.as_ref());
        padding(&mut props.style, attrs.padding.as_ref());
        corner_radius(&mut props.style, attrs.radius);
        opacity(&mut props.style, node);
        props
    }

    fn stack_props(&self, node: &Node, attrs: &StackAttrs, placement: Placement) -> Props {
        let mut props = Props::new(placement);
        props.class("flex");
        props.class(match attrs.direction {
            Direction::Row => "flex-row",
            Direction::Column => "flex-col",
        });
        if let Some(align) = attrs.align {
            props.class(align_class(align));
        }
        if let Some(justify) = attrs.justify {
            props.class(justify_class(justify));
        }
        geometry(&mut props.style, node, placement);
        if let Some(gap) = attrs.gap {
            props.style.number("gap", gap);
        }
        background(&mut props.style, attrs.background.as_ref());
        padding(&mut props.style, attrs.padding.as_ref());
        opacity(&mut props.style, node);
        props
    }

    fn grid_props(&self, node: &Node, attrs: &GridAttrs, placement: Placement) -> Props {
        let mut props = Props::new(placement);
        props.class("grid");
        props.class(format!("grid-cols-{}", attrs.columns.max(1)));
        geometry(&mut props.style, node, placement);
        if let Some(gap) = attrs.gap {
            props.style.number("gap", gap);
        }
        background(&mut props.style, attrs.background.as_ref());
        padding(&mut props.style, attrs.padding.as_ref());
        opacity(&mut props.style, node);
        props
    }

    fn rect(&self, node: &Node, attrs: &RectAttrs, placement: Placement) -> String {
        let mut props = Props::new(placement);
        rounded(&mut props, attrs.radius);
        geometry(&mut props.style, node, placement);
        background(&mut props.style, attrs.fill.as_ref());
        border(&mut props.style, attrs.stroke.as_ref(), attrs.stroke_width);
        corner_radius(&mut props.style, attrs.radius);
        opacity(&mut props.style, node);
        format!("<div{} />", props.render())
    }

    fn ellipse(&self, node: &Node, attrs: &EllipseAttrs, placement: Placement) -> String {
        let mut props = Props::new(placement);
        props.class("rounded-full");
        geometry(&mut props.style, node, placement);
        background(&mut props.style, attrs.fill.as_ref());
        border(&mut props.style, attrs.stroke.as_ref(), attrs.stroke_width);
        opacity(&mut props.style, node);
        format!("<div{} />", props.render())
    }

    fn text(&self, node: &Node, attrs: &TextAttrs, placement: Placement) -> String {
        let tag = match attrs.variant {
            Some(TextVariant::H1) => "h1",
            Some(TextVariant::H2) => "h2",
            Some(TextVariant::H3) => "h3",
            Some(TextVariant::Body) => "p",
            Some(TextVariant::Caption) | None => "span",
        };

        let mut props = Props::new(placement);
        if attrs.is_bold() {
            props.class("font-bold");
        }
        if attrs.is_italic() {
            props.class("italic");
        }
        if let Some(align) = attrs.align {
            props.class(match align {
                TextAlign::Left => "text-left",
                TextAlign::Center => "text-center",
                TextAlign::Right => "text-right",
                TextAlign::Justify => "text-justify",
            });
        }

        geometry(&mut props.style, node, placement);
        if let Some(color) = paint(attrs.color.as_ref()) {
            props.style.string("color", color);
        }
        if let Some(family) = attrs.font_family.as_deref().filter(|f| !f.trim().is_empty()) {
            props.style.string("fontFamily", family);
        }
        if attrs.font_size.is_some() || attrs.variant.is_some() {
            props.style.number("fontSize", attrs.resolved_font_size());
        }
        match &attrs.font_weight {
            Some(weight) if !weight.is_bold() => match weight {
                FontWeight::Numeric(n) => props.style.number("fontWeight", *n),
                FontWeight::Keyword(k) => props.style.string("fontWeight", k),
            },
            _ => {}
        }
        opacity(&mut props.style, node);

        format!(
            "<{tag}{}>{}</{tag}>",
            props.render(),
            escape_jsx(&attrs.text),
            tag = tag
        )
    }

    fn image(&self, node: &Node, attrs: &ImageAttrs, placement: Placement) -> String {
        let mut props = Props::new(placement);
        if let Some(fit) = attrs.object_fit {
            props.class(format!("object-{}", fit.as_str()));
        }
        rounded(&mut props, attrs.radius);
        geometry(&mut props.style, node, placement);
        corner_radius(&mut props.style, attrs.radius);
        opacity(&mut props.style, node);

        format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_jsx(&attrs.src),
            escape_jsx(attrs.alt.as_deref().unwrap_or("")),
            props.render()
        )
    }

    /// An `svg` box at the node's geometry holding one shape element.
    fn svg(&self, node: &Node, placement: Placement, shape: String, depth: usize, out: &mut Vec<String>) {
        let pad = "  ".repeat(depth);
        let mut props = Props::new(placement);
        props.class("overflow-visible");
        geometry(&mut props.style, node, placement);
        opacity(&mut props.style, node);

        out.push(format!("{}<svg{}>", pad, props.render()));
        out.push(format!("{}  {}", pad, shape));
        out.push(format!("{}</svg>", pad));
    }
}

impl CodeGenerator for ReactGenerator {
    fn framework_name(&self) -> &'static str {
        "react"
    }

    fn file_extension(&self) -> &'static str {
        if self.options.typed {
            "tsx"
        } else {
            "jsx"
        }
    }

    fn generate(&self, tree: &DesignTree) -> String {
        let name = self.component_name();
        let mut lines = vec!["import React from 'react';".to_string(), String::new()];

        let (header, footer, depth): (Vec<String>, Vec<&str>, usize) =
            match (self.options.functional, self.options.typed) {
                (true, true) => (vec![format!("export const {}: React.FC = () => {{", name)], vec!["};"], 1),
                (true, false) => (vec![format!("export function {}() {{", name)], vec!["}"], 1),
                (false, true) => (
                    vec![
                        format!("export class {} extends React.Component<Record<string, never>> {{", name),
                        "  render(): React.ReactNode {".to_string(),
                    ],
                    vec!["  }", "}"],
                    2,
                ),
                (false, false) => (
                    vec![
                        format!("export class {} extends React.Component {{", name),
                        "  render() {".to_string(),
                    ],
                    vec!["  }", "}"],
                    2,
                ),
            };

        let pad = "  ".repeat(depth);
        lines.extend(header);
        if let Some(name) = self.marker_name(&tree.root) {
            lines.push(format!("{}// {}", pad, comment_text(name)));
        }
        lines.push(format!("{}return (", pad));
        self.emit_node(&tree.root, Placement::Root, depth + 1, &mut lines);
        lines.push(format!("{});", pad));
        lines.extend(footer.into_iter().map(String::from));
        lines.push(String::new());
        lines.push(format!("export default {};", name));

        let mut source = lines.join("\n");
        source.push('\n');

        debug!(
            component = %name,
            nodes = tree.node_count(),
            bytes = source.len(),
            "generated react component"
        );
        source
    }
}

/// Left/top (absolute placement only) plus width/height.
fn geometry(style: &mut Style, node: &Node, placement: Placement) {
    if placement == Placement::Absolute {
        let position = node.position_or_origin();
        style.number("left", position.x);
        style.number("top", position.y);
    }
    if let Some(size) = node.size {
        style.number("width", size.width);
        style.number("height", size.height);
    }
}

/// The raw value of a paint that actually parses as a color.
fn paint(value: Option<&ColorValue>) -> Option<&str> {
    value.filter(|v| v.parse().is_some()).map(ColorValue::as_str)
}

fn background(style: &mut Style, fill: Option<&ColorValue>) {
    if let Some(color) = paint(fill) {
        style.string("backgroundColor", color);
    }
}

fn border(style: &mut Style, stroke: Option<&ColorValue>, width: Option<f64>) {
    if let Some(color) = paint(stroke) {
        style.number("borderWidth", width.unwrap_or(1.0));
        style.string("borderStyle", "solid");
        style.string("borderColor", color);
    }
}

fn padding(style: &mut Style, padding: Option<&Padding>) {
    match padding {
        Some(Padding::Uniform(value)) => style.number("padding", *value),
        Some(Padding::Sides {
            top,
            right,
            bottom,
            left,
        }) => {
            let sides = [top, right, bottom, left]
                .iter()
                .map(|v| format!("{}px", format_number(**v)))
                .collect::<Vec<_>>()
                .join(" ");
            style.string("padding", &sides);
        }
        None => {}
    }
}

fn rounded(props: &mut Props, radius: Option<f64>) {
    if radius.map_or(false, |r| r > 0.0) {
        props.class("rounded");
    }
}

fn corner_radius(style: &mut Style, radius: Option<f64>) {
    if let Some(radius) = radius.filter(|r| *r > 0.0) {
        style.number("borderRadius", radius);
    }
}

fn opacity(style: &mut Style, node: &Node) {
    if let Some(opacity) = node.opacity.filter(|o| *o != 1.0) {
        style.number("opacity", opacity);
    }
}

fn align_class(align: Align) -> &'static str {
    match align {
        Align::Start => "items-start",
        Align::Center => "items-center",
        Align::End => "items-end",
        Align::Stretch => "items-stretch",
    }
}

fn justify_class(justify: Justify) -> &'static str {
    match justify {
        Justify::Start => "justify-start",
        Justify::Center => "justify-center",
        Justify::End => "justify-end",
        Justify::Between => "justify-between",
        Justify::Around => "justify-around",
        Justify::Evenly => "justify-evenly",
    }
}

fn stroke_attrs(stroke: Option<&ColorValue>, width: Option<f64>) -> String {
    let mut out = String::new();
    if let Some(color) = paint(stroke) {
        out.push_str(&format!(" stroke=\"{}\"", escape_jsx(color)));
    }
    if let Some(width) = width {
        out.push_str(&format!(" strokeWidth={{{}}}", format_number(width)));
    }
    out
}

fn line_shape(attrs: &LineAttrs) -> String {
    let [x1, y1, x2, y2] = attrs.points;
    format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} />",
        format_number(x1),
        format_number(y1),
        format_number(x2),
        format_number(y2),
        stroke_attrs(attrs.stroke.as_ref(), attrs.stroke_width)
    )
}

/// `polygon` when closed, `polyline` otherwise. Unfilled shapes say so
/// explicitly because SVG fills with black by default.
fn path_shape(attrs: &PathAttrs, closed: bool) -> String {
    let points = attrs
        .pairs()
        .map(|(x, y)| format!("{},{}", format_number(x), format_number(y)))
        .collect::<Vec<_>>()
        .join(" ");
    let fill = paint(attrs.fill.as_ref()).map_or_else(|| "none".to_string(), escape_jsx);
    let element = if closed { "polygon" } else { "polyline" };
    format!(
        "<{} points=\"{}\" fill=\"{}\"{} />",
        element,
        points,
        fill,
        stroke_attrs(attrs.stroke.as_ref(), attrs.stroke_width)
    )
}

/// Escape text for JSX children and string attributes.
fn escape_jsx(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            c => out.push(c),
        }
    }
    out
}

/// Single-quoted JavaScript string literal.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Text safe to place inside a `/* */` comment on one line.
fn comment_text(s: &str) -> String {
    s.replace("*/", "* /").replace(['\n', '\r'], " ")
}
