//! Roblox Luau script generator.
//!
//! Output is a flat list of statements. Each design node becomes one GUI
//! instance held in a local named `<Class>_<n>`, with `n` taken from a counter
//! that starts at zero on every call. Hierarchy is expressed only through
//! `.Parent` assignments, which always come after the instance's properties.
//!
//! Luau allows at most 200 locals per function. Only containers stay in scope
//! at the top level, since later `.Parent` assignments name them; leaf
//! instances and decoration objects are wrapped in `do ... end` blocks. A
//! design with more than about 190 frames, stacks and grids still exceeds
//! the limit.

use super::{format_number, CodeGenerator};
use easel_core::{
    Align, ColorValue, ContainerAttrs, DesignTree, Direction, EllipseAttrs, GridAttrs, ImageAttrs,
    Justify, Node, NodeKind, ObjectFit, Padding, PixelUnits, RectAttrs, Rgba, StackAttrs,
    TextAlign, TextAttrs, UnitConversion,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for [`RobloxGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RobloxOptions {
    /// `Name` of the generated ScreenGui.
    pub gui_name: String,
    /// Value of `ScreenGui.ResetOnSpawn`.
    pub reset_on_spawn: bool,
}

impl Default for RobloxOptions {
    fn default() -> Self {
        Self {
            gui_name: "DesignComponent".to_string(),
            reset_on_spawn: false,
        }
    }
}

/// A node the script could not represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNode {
    pub id: String,
    /// The node's `type` tag.
    pub kind: String,
}

/// Script text plus the nodes left out of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptReport {
    pub script: String,
    pub skipped: Vec<SkippedNode>,
}

/// Luau generator, generic over the pixel-to-engine unit mapping.
#[derive(Debug, Clone)]
pub struct RobloxGenerator<U = PixelUnits> {
    options: RobloxOptions,
    units: U,
}

impl RobloxGenerator<PixelUnits> {
    pub fn new(options: RobloxOptions) -> Self {
        Self {
            options,
            units: PixelUnits,
        }
    }
}

impl Default for RobloxGenerator<PixelUnits> {
    fn default() -> Self {
        Self::new(RobloxOptions::default())
    }
}

impl<U: UnitConversion> RobloxGenerator<U> {
    /// Same options, different unit conversion.
    pub fn with_units<V: UnitConversion>(self, units: V) -> RobloxGenerator<V> {
        RobloxGenerator {
            options: self.options,
            units,
        }
    }

    pub fn options(&self) -> &RobloxOptions {
        &self.options
    }

    /// Generate the script and report every skipped node.
    pub fn generate_with_report(&self, tree: &DesignTree) -> ScriptReport {
        let mut script = Script::new(&self.units);
        script.preamble(&self.options);
        script.node(&tree.root, "screenGui", None);

        debug!(
            statements = script.lines.len(),
            instances = script.counter,
            skipped = script.skipped.len(),
            "generated roblox script"
        );

        let mut text = script.lines.join("\n");
        text.push('\n');
        ScriptReport {
            script: text,
            skipped: script.skipped,
        }
    }
}

impl<U: UnitConversion> CodeGenerator for RobloxGenerator<U> {
    fn framework_name(&self) -> &'static str {
        "roblox"
    }

    fn file_extension(&self) -> &'static str {
        "lua"
    }

    fn generate(&self, tree: &DesignTree) -> String {
        self.generate_with_report(tree).script
    }
}

/// Per-call emission state.
struct Script<'a> {
    units: &'a dyn UnitConversion,
    lines: Vec<String>,
    counter: usize,
    /// True inside a `do ... end` block.
    scoped: bool,
    skipped: Vec<SkippedNode>,
}

impl<'a> Script<'a> {
    fn new(units: &'a dyn UnitConversion) -> Self {
        Self {
            units,
            lines: Vec::new(),
            counter: 0,
            scoped: false,
            skipped: Vec::new(),
        }
    }

    fn preamble(&mut self, options: &RobloxOptions) {
        self.lines.extend([
            "local Players = game:GetService(\"Players\")".to_string(),
            "local player = Players.LocalPlayer".to_string(),
            "local playerGui = player:WaitForChild(\"PlayerGui\")".to_string(),
            String::new(),
            "local screenGui = Instance.new(\"ScreenGui\")".to_string(),
            format!("screenGui.Name = {}", lua_string(&options.gui_name)),
            format!("screenGui.ResetOnSpawn = {}", options.reset_on_spawn),
            "screenGui.ZIndexBehavior = Enum.ZIndexBehavior.Sibling".to_string(),
            "screenGui.Parent = playerGui".to_string(),
        ]);
    }

    /// Allocate the next variable name for a class.
    fn var(&mut self, class: &str) -> String {
        self.counter += 1;
        format!("{}_{}", class, self.counter)
    }

    fn push(&mut self, line: String) {
        if self.scoped {
            self.lines.push(format!("\t{}", line));
        } else {
            self.lines.push(line);
        }
    }

    fn set(&mut self, var: &str, property: &str, value: impl AsRef<str>) {
        self.push(format!("{}.{} = {}", var, property, value.as_ref()));
    }

    fn create(&mut self, class: &str) -> String {
        let var = self.var(class);
        if !self.scoped {
            self.lines.push(String::new());
        }
        self.push(format!("local {} = Instance.new(\"{}\")", var, class));
        var
    }

    /// Run `emit` inside a `do ... end` block so its locals go out of scope.
    /// Nested calls reuse the enclosing block.
    fn scope(&mut self, emit: impl FnOnce(&mut Self)) {
        if self.scoped {
            emit(self);
            return;
        }
        self.lines.push(String::new());
        self.lines.push("do".to_string());
        self.scoped = true;
        emit(self);
        self.scoped = false;
        self.lines.push("end".to_string());
    }

    fn udim2(&self, x: f64, y: f64) -> String {
        format!(
            "UDim2.new(0,{},0,{})",
            format_number(self.units.to_engine(x)),
            format_number(self.units.to_engine(y))
        )
    }

    fn udim(&self, px: f64) -> String {
        format!("UDim.new(0,{})", format_number(self.units.to_engine(px)))
    }

    /// Emit `node` and its subtree; `layout_order` is set for stack children.
    fn node(&mut self, node: &Node, parent: &str, layout_order: Option<usize>) {
        match &node.kind {
            NodeKind::Frame(c) | NodeKind::Box(c) | NodeKind::Group(c) => {
                let var = self.frame(node, c.background.as_ref(), parent, layout_order);
                self.container_extras(&var, c);
                self.children(&c.children, &var, false);
            }
            NodeKind::Stack(s) => {
                let var = self.frame(node, s.background.as_ref(), parent, layout_order);
                self.padding(&var, s.padding.as_ref());
                self.scope(|script| script.list_layout(&var, s));
                self.children(&s.children, &var, true);
            }
            NodeKind::Grid(g) => {
                let var = self.frame(node, g.background.as_ref(), parent, layout_order);
                self.padding(&var, g.padding.as_ref());
                self.scope(|script| script.grid_layout(&var, node, g));
                self.children(&g.children, &var, false);
            }
            NodeKind::Rect(r) => self.scope(|s| s.rect(node, r, parent, layout_order)),
            NodeKind::Ellipse(e) => self.scope(|s| s.ellipse(node, e, parent, layout_order)),
            NodeKind::Text(t) => self.scope(|s| s.text(node, t, parent, layout_order)),
            NodeKind::Image(i) => self.scope(|s| s.image(node, i, parent, layout_order)),
            NodeKind::Line(_)
            | NodeKind::Curve(_)
            | NodeKind::Polygon(_)
            | NodeKind::Draw(_)
            | NodeKind::Unknown { .. } => {
                debug!(id = %node.id, kind = node.type_name(), "node has no roblox equivalent, skipped");
                self.skipped.push(SkippedNode {
                    id: node.id.0.clone(),
                    kind: node.type_name().to_string(),
                });
            }
        }
    }

    fn children(&mut self, children: &[Node], parent: &str, ordered: bool) {
        for (index, child) in children.iter().enumerate() {
            self.node(child, parent, ordered.then_some(index + 1));
        }
    }

    /// Name, geometry and layout order shared by every instance.
    fn common(&mut self, var: &str, node: &Node, layout_order: Option<usize>) {
        let name = lua_string(node.display_name().unwrap_or(node.id.0.as_str()));
        self.set(var, "Name", name);
        let position = node.position_or_origin();
        let size = node.size_or_zero();
        let position = self.udim2(position.x, position.y);
        let size = self.udim2(size.width, size.height);
        self.set(var, "Position", position);
        self.set(var, "Size", size);
        if let Some(order) = layout_order {
            self.set(var, "LayoutOrder", order.to_string());
        }
    }

    /// Background paint, or full transparency when there is none.
    fn background(&mut self, var: &str, node: &Node, paint: Option<&ColorValue>) {
        match paint.and_then(ColorValue::parse) {
            Some(color) => {
                self.set(var, "BackgroundColor3", color3(&color));
                self.set(
                    var,
                    "BackgroundTransparency",
                    transparency(color.a, node.effective_opacity()),
                );
            }
            None => self.set(var, "BackgroundTransparency", "1"),
        }
        self.set(var, "BorderSizePixel", "0");
    }

    fn frame(
        &mut self,
        node: &Node,
        paint: Option<&ColorValue>,
        parent: &str,
        layout_order: Option<usize>,
    ) -> String {
        let var = self.create("Frame");
        self.common(&var, node, layout_order);
        self.background(&var, node, paint);
        if matches!(node.kind, NodeKind::Frame(_)) {
            self.set(&var, "ClipsDescendants", "true");
        }
        self.set(&var, "Parent", parent);
        var
    }

    fn container_extras(&mut self, var: &str, attrs: &ContainerAttrs) {
        self.corner(var, attrs.radius);
        self.padding(var, attrs.padding.as_ref());
    }

    fn rect(&mut self, node: &Node, attrs: &RectAttrs, parent: &str, layout_order: Option<usize>) {
        let var = self.frame(node, attrs.fill.as_ref(), parent, layout_order);
        self.corner(&var, attrs.radius);
        self.stroke(&var, attrs.stroke.as_ref(), attrs.stroke_width, node);
    }

    fn ellipse(&mut self, node: &Node, attrs: &EllipseAttrs, parent: &str, layout_order: Option<usize>) {
        let var = self.frame(node, attrs.fill.as_ref(), parent, layout_order);
        let corner = self.create("UICorner");
        self.set(&corner, "CornerRadius", "UDim.new(0.5,0)");
        self.set(&corner, "Parent", &var);
        self.stroke(&var, attrs.stroke.as_ref(), attrs.stroke_width, node);
    }

    fn text(&mut self, node: &Node, attrs: &TextAttrs, parent: &str, layout_order: Option<usize>) {
        let var = self.create("TextLabel");
        self.common(&var, node, layout_order);
        self.set(&var, "BackgroundTransparency", "1");
        self.set(&var, "BorderSizePixel", "0");
        self.set(&var, "Text", lua_string(&attrs.text));

        if let Some(color) = attrs.color.as_ref().and_then(ColorValue::parse) {
            self.set(&var, "TextColor3", color3(&color));
            let alpha = transparency(color.a, node.effective_opacity());
            if alpha != "0" {
                self.set(&var, "TextTransparency", alpha);
            }
        } else if node.effective_opacity() < 1.0 {
            self.set(&var, "TextTransparency", transparency(1.0, node.effective_opacity()));
        }

        let size = format_number(self.units.to_engine(attrs.resolved_font_size()));
        self.set(&var, "TextSize", size);
        self.set(&var, "FontFace", font_face(attrs));
        let x_alignment = match attrs.align {
            Some(TextAlign::Center) => "Center",
            Some(TextAlign::Right) => "Right",
            Some(TextAlign::Left) | Some(TextAlign::Justify) | None => "Left",
        };
        self.set(&var, "TextXAlignment", format!("Enum.TextXAlignment.{}", x_alignment));
        self.set(&var, "TextWrapped", "true");
        self.set(&var, "Parent", parent);
    }

    fn image(&mut self, node: &Node, attrs: &ImageAttrs, parent: &str, layout_order: Option<usize>) {
        let var = self.create("ImageLabel");
        self.common(&var, node, layout_order);
        self.set(&var, "BackgroundTransparency", "1");
        self.set(&var, "BorderSizePixel", "0");
        self.set(&var, "Image", lua_string(&attrs.src));
        let scale = match attrs.object_fit {
            Some(ObjectFit::Cover) => "Crop",
            Some(ObjectFit::Fill) => "Stretch",
            Some(ObjectFit::Contain) | Some(ObjectFit::None) | Some(ObjectFit::ScaleDown) => "Fit",
            None => "Stretch",
        };
        self.set(&var, "ScaleType", format!("Enum.ScaleType.{}", scale));
        if node.effective_opacity() < 1.0 {
            self.set(&var, "ImageTransparency", transparency(1.0, node.effective_opacity()));
        }
        self.set(&var, "Parent", parent);
        self.corner(&var, attrs.radius);
    }

    fn corner(&mut self, parent: &str, radius: Option<f64>) {
        if let Some(radius) = radius.filter(|r| *r > 0.0) {
            self.scope(|s| {
                let var = s.create("UICorner");
                let radius = s.udim(radius);
                s.set(&var, "CornerRadius", radius);
                s.set(&var, "Parent", parent);
            });
        }
    }

    /// Border outline; only emitted for a stroke that parses as a color.
    fn stroke(&mut self, parent: &str, stroke: Option<&ColorValue>, width: Option<f64>, node: &Node) {
        let Some(color) = stroke.and_then(ColorValue::parse) else {
            return;
        };
        let var = self.create("UIStroke");
        self.set(&var, "Color", color3(&color));
        let thickness = format_number(self.units.to_engine(width.unwrap_or(1.0)));
        self.set(&var, "Thickness", thickness);
        let alpha = transparency(color.a, node.effective_opacity());
        if alpha != "0" {
            self.set(&var, "Transparency", alpha);
        }
        self.set(&var, "ApplyStrokeMode", "Enum.ApplyStrokeMode.Border");
        self.set(&var, "Parent", parent);
    }

    fn padding(&mut self, parent: &str, padding: Option<&Padding>) {
        let (top, right, bottom, left) = match padding {
            Some(Padding::Uniform(v)) => (*v, *v, *v, *v),
            Some(Padding::Sides {
                top,
                right,
                bottom,
                left,
            }) => (*top, *right, *bottom, *left),
            None => return,
        };
        self.scope(|s| {
            let var = s.create("UIPadding");
            for (property, value) in [
                ("PaddingTop", top),
                ("PaddingRight", right),
                ("PaddingBottom", bottom),
                ("PaddingLeft", left),
            ] {
                let value = s.udim(value);
                s.set(&var, property, value);
            }
            s.set(&var, "Parent", parent);
        });
    }

    fn list_layout(&mut self, parent: &str, attrs: &StackAttrs) {
        let var = self.create("UIListLayout");
        let horizontal = attrs.direction == Direction::Row;
        self.set(
            &var,
            "FillDirection",
            if horizontal {
                "Enum.FillDirection.Horizontal"
            } else {
                "Enum.FillDirection.Vertical"
            },
        );
        let gap = self.udim(attrs.gap.unwrap_or(0.0));
        self.set(&var, "Padding", gap);
        self.set(&var, "SortOrder", "Enum.SortOrder.LayoutOrder");

        // Cross axis from `align`, main axis from `justify`.
        let (horizontal_alignment, vertical_alignment) = if horizontal {
            (
                attrs.justify.and_then(justify_horizontal),
                attrs.align.and_then(align_vertical),
            )
        } else {
            (
                attrs.align.and_then(align_horizontal),
                attrs.justify.and_then(justify_vertical),
            )
        };
        if let Some(value) = horizontal_alignment {
            self.set(&var, "HorizontalAlignment", format!("Enum.HorizontalAlignment.{}", value));
        }
        if let Some(value) = vertical_alignment {
            self.set(&var, "VerticalAlignment", format!("Enum.VerticalAlignment.{}", value));
        }
        self.set(&var, "Parent", parent);
    }

    /// Square cells sized so `columns` of them plus gaps fill the width.
    fn grid_layout(&mut self, parent: &str, node: &Node, attrs: &GridAttrs) {
        let columns = attrs.columns.max(1);
        let gap = attrs.gap.unwrap_or(0.0);
        let width = node.size_or_zero().width;
        let cell = (width - (columns as f64 - 1.0) * gap) / columns as f64;

        let var = self.create("UIGridLayout");
        let cell_size = self.udim2(cell, cell);
        let cell_padding = self.udim2(gap, gap);
        self.set(&var, "CellSize", cell_size);
        self.set(&var, "CellPadding", cell_padding);
        self.set(&var, "FillDirectionMaxCells", columns.to_string());
        self.set(&var, "SortOrder", "Enum.SortOrder.LayoutOrder");
        self.set(&var, "Parent", parent);
    }
}

fn color3(color: &Rgba) -> String {
    format!("Color3.fromRGB({},{},{})", color.r, color.g, color.b)
}

/// `1 - alpha * opacity`, clamped to `[0, 1]`.
fn transparency(alpha: f64, opacity: f64) -> String {
    format_number((1.0 - alpha * opacity).clamp(0.0, 1.0))
}

fn align_horizontal(align: Align) -> Option<&'static str> {
    match align {
        Align::Start => Some("Left"),
        Align::Center => Some("Center"),
        Align::End => Some("Right"),
        Align::Stretch => None,
    }
}

fn align_vertical(align: Align) -> Option<&'static str> {
    match align {
        Align::Start => Some("Top"),
        Align::Center => Some("Center"),
        Align::End => Some("Bottom"),
        Align::Stretch => None,
    }
}

fn justify_horizontal(justify: Justify) -> Option<&'static str> {
    match justify {
        Justify::Start => Some("Left"),
        Justify::Center => Some("Center"),
        Justify::End => Some("Right"),
        Justify::Between | Justify::Around | Justify::Evenly => None,
    }
}

fn justify_vertical(justify: Justify) -> Option<&'static str> {
    match justify {
        Justify::Start => Some("Top"),
        Justify::Center => Some("Center"),
        Justify::End => Some("Bottom"),
        Justify::Between | Justify::Around | Justify::Evenly => None,
    }
}

/// `Font.new(...)` for a text node.
fn font_face(attrs: &TextAttrs) -> String {
    let weight = if attrs.is_bold() { "Bold" } else { "Regular" };
    let style = if attrs.is_italic() { "Italic" } else { "Normal" };
    format!(
        "Font.new(\"{}\", Enum.FontWeight.{}, Enum.FontStyle.{})",
        font_asset(attrs.font_family.as_deref().unwrap_or("")),
        weight,
        style
    )
}

/// Closest built-in font family asset for a CSS font-family list.
fn font_asset(family: &str) -> &'static str {
    let family = family.to_ascii_lowercase();
    let has = |needle: &str| family.contains(needle);

    if has("mono") || has("courier") || has("consol") {
        "rbxasset://fonts/families/RobotoMono.json"
    } else if has("roboto") {
        "rbxasset://fonts/families/Roboto.json"
    } else if has("arial") || has("helvetica") {
        "rbxasset://fonts/families/Arial.json"
    } else if has("gotham") || has("montserrat") {
        "rbxasset://fonts/families/GothamSSm.json"
    } else if has("georgia") || (has("serif") && !has("sans")) {
        "rbxasset://fonts/families/Merriweather.json"
    } else {
        "rbxasset://fonts/families/SourceSansPro.json"
    }
}

/// Double-quoted Luau string literal.
fn lua_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
