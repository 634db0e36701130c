//! Tree walk, tallying and token assembly.

use crate::catalog::{Token, TokenCatalog, TokenOptions, TokenType, TokenValue, TypographyValue};
use crate::naming::{self, NameAllocator};
use easel_core::{ColorValue, DesignTree, Node, NodeKind, Padding};
use indexmap::IndexMap;
use serde_json::Value;
use std::hash::Hash;
use tracing::debug;

/// Hashable identity of a numeric value. `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NumberKey(u64);

impl NumberKey {
    fn new(value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        Self(value.to_bits())
    }

    fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Occurrence counts keyed in first-seen order, plus every individual sighting.
#[derive(Debug)]
struct Tally<K> {
    counts: IndexMap<K, usize>,
    sightings: Vec<K>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
            sightings: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Tally<K> {
    fn record(&mut self, key: K) {
        *self.counts.entry(key.clone()).or_insert(0) += 1;
        self.sightings.push(key);
    }

    /// Highest count wins; ties go to the value seen first.
    fn most_common(&self) -> Option<&K> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }
}

impl Tally<NumberKey> {
    fn record_number(&mut self, value: f64) {
        if value.is_finite() {
            self.record(NumberKey::new(value));
        }
    }
}

/// Family and weight tallies for text of one font size.
#[derive(Debug, Default)]
struct Face {
    families: Tally<String>,
    weights: Tally<String>,
}

#[derive(Debug, Default)]
struct Usage {
    colors: Tally<String>,
    font_sizes: Tally<NumberKey>,
    families: Tally<String>,
    weights: Tally<String>,
    spacing: Tally<NumberKey>,
    radii: Tally<NumberKey>,
    opacities: Tally<NumberKey>,
    faces: IndexMap<NumberKey, Face>,
}

impl Usage {
    fn collect(tree: &DesignTree) -> Self {
        let mut usage = Usage::default();
        // The root always contributes an opacity, explicit or not.
        usage.opacities.record_number(tree.root.effective_opacity());
        usage.record_kind(&tree.root.kind);

        for node in tree.root.walk().skip(1) {
            usage.record_node(node);
        }
        usage
    }

    fn record_node(&mut self, node: &Node) {
        if let Some(opacity) = node.opacity {
            self.opacities.record_number(opacity);
        }
        self.record_kind(&node.kind);
    }

    fn record_kind(&mut self, kind: &NodeKind) {
        match kind {
            NodeKind::Frame(c) | NodeKind::Box(c) | NodeKind::Group(c) => {
                self.color(c.background.as_ref());
                self.padding(c.padding.as_ref());
                self.radius(c.radius);
            }
            NodeKind::Stack(s) => {
                self.color(s.background.as_ref());
                self.gap(s.gap);
                self.padding(s.padding.as_ref());
            }
            NodeKind::Grid(g) => {
                self.color(g.background.as_ref());
                self.gap(g.gap);
                self.padding(g.padding.as_ref());
            }
            NodeKind::Rect(r) => {
                self.color(r.fill.as_ref());
                self.color(r.stroke.as_ref());
                self.radius(r.radius);
            }
            NodeKind::Ellipse(e) => {
                self.color(e.fill.as_ref());
                self.color(e.stroke.as_ref());
            }
            NodeKind::Text(t) => {
                self.color(t.color.as_ref());
                let family = t.font_family.clone().filter(|f| !f.trim().is_empty());
                let weight = t.font_weight.as_ref().map(ToString::to_string);

                if let Some(family) = &family {
                    self.families.record(family.clone());
                }
                if let Some(weight) = &weight {
                    self.weights.record(weight.clone());
                }
                if let Some(size) = t.font_size.filter(|s| s.is_finite()) {
                    let key = NumberKey::new(size);
                    self.font_sizes.record(key);
                    let face = self.faces.entry(key).or_default();
                    if let Some(family) = family {
                        face.families.record(family);
                    }
                    if let Some(weight) = weight {
                        face.weights.record(weight);
                    }
                }
            }
            NodeKind::Image(i) => self.radius(i.radius),
            NodeKind::Line(l) => self.color(l.stroke.as_ref()),
            NodeKind::Curve(p) | NodeKind::Polygon(p) | NodeKind::Draw(p) => {
                self.color(p.fill.as_ref());
                self.color(p.stroke.as_ref());
            }
            NodeKind::Unknown { attributes, .. } => {
                for key in ["fill", "stroke", "background", "color"] {
                    if let Some(Value::String(raw)) = attributes.get(key) {
                        self.raw_color(raw);
                    }
                }
            }
        }
    }

    fn color(&mut self, paint: Option<&ColorValue>) {
        if let Some(paint) = paint {
            self.raw_color(paint.as_str());
        }
    }

    fn raw_color(&mut self, raw: &str) {
        if !raw.trim().is_empty() {
            self.colors.record(raw.to_string());
        }
    }

    fn gap(&mut self, gap: Option<f64>) {
        if let Some(gap) = gap {
            self.spacing.record_number(gap);
        }
    }

    fn padding(&mut self, padding: Option<&Padding>) {
        if let Some(value) = padding.and_then(Padding::as_uniform) {
            self.spacing.record_number(value);
        }
    }

    fn radius(&mut self, radius: Option<f64>) {
        if let Some(radius) = radius {
            self.radii.record_number(radius);
        }
    }
}

/// Turns one design tree into a [`TokenCatalog`].
#[derive(Debug, Clone, Default)]
pub struct TokenExtractor {
    options: TokenOptions,
}

impl TokenExtractor {
    pub fn new(options: TokenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    pub fn extract(&self, tree: &DesignTree) -> TokenCatalog {
        let usage = Usage::collect(tree);
        let mut catalog = TokenCatalog::new();
        let mut names = NameAllocator::new();

        self.push_colors(&usage, &mut catalog, &mut names);
        self.push_typography(&usage, &mut catalog, &mut names);
        self.push_strings(&usage.families, TokenType::FontFamily, &mut catalog, &mut names);
        self.push_strings(&usage.weights, TokenType::FontWeight, &mut catalog, &mut names);
        self.push_numbers(&usage.spacing, TokenType::Spacing, &mut catalog, &mut names);
        self.push_numbers(&usage.radii, TokenType::BorderRadius, &mut catalog, &mut names);
        self.push_numbers(&usage.opacities, TokenType::Opacity, &mut catalog, &mut names);

        debug!(
            tokens = catalog.len(),
            colors = catalog.color.len(),
            semantic = self.options.semantic,
            deduplicate = self.options.deduplicate,
            "extracted design tokens"
        );
        catalog
    }

    /// Deduplicated counts, or one entry per sighting when deduplication is off.
    fn entries<K: Clone + Eq + Hash>(&self, tally: &Tally<K>) -> Vec<(K, usize)> {
        if self.options.deduplicate {
            tally.counts.iter().map(|(k, c)| (k.clone(), *c)).collect()
        } else {
            tally.sightings.iter().map(|k| (k.clone(), 1)).collect()
        }
    }

    /// Descending frequency when deduplicated; sighting order otherwise.
    fn by_frequency<K: Clone + Eq + Hash>(&self, tally: &Tally<K>) -> Vec<(K, usize)> {
        let mut entries = self.entries(tally);
        if self.options.deduplicate {
            entries.sort_by(|a, b| b.1.cmp(&a.1));
        }
        entries
    }

    /// Ascending value when deduplicated; sighting order otherwise.
    fn by_value(&self, tally: &Tally<NumberKey>) -> Vec<(NumberKey, usize)> {
        let mut entries = self.entries(tally);
        if self.options.deduplicate {
            entries.sort_by(|a, b| a.0.value().total_cmp(&b.0.value()));
        }
        entries
    }

    fn push_colors(&self, usage: &Usage, catalog: &mut TokenCatalog, names: &mut NameAllocator) {
        for (index, (value, count)) in self.by_frequency(&usage.colors).into_iter().enumerate() {
            let rank = index + 1;
            let base = if self.options.semantic {
                naming::color_name(&value, rank, count)
            } else {
                format!("color-{}", rank)
            };
            let name = names.allocate(base);
            catalog
                .color
                .insert(name, Token::new(TokenValue::Text(value), TokenType::Color, count));
        }
    }

    fn push_typography(&self, usage: &Usage, catalog: &mut TokenCatalog, names: &mut NameAllocator) {
        for (index, (key, count)) in self.by_value(&usage.font_sizes).into_iter().enumerate() {
            let rank = index + 1;
            let size = key.value();
            let base = if self.options.semantic {
                naming::font_size_name(size, rank)
            } else {
                format!("font-size-{}", rank)
            };

            let face = usage.faces.get(&key);
            let value = TypographyValue {
                font_size: px(size),
                font_family: face.and_then(|f| f.families.most_common()).cloned(),
                font_weight: face.and_then(|f| f.weights.most_common()).cloned(),
            };
            catalog.typography.insert(
                names.allocate(base),
                Token::new(TokenValue::Typography(value), TokenType::Typography, count),
            );
        }
    }

    fn push_strings(
        &self,
        tally: &Tally<String>,
        token_type: TokenType,
        catalog: &mut TokenCatalog,
        names: &mut NameAllocator,
    ) {
        for (index, (value, count)) in self.by_frequency(tally).into_iter().enumerate() {
            let rank = index + 1;
            let base = match (self.options.semantic, token_type) {
                (true, TokenType::FontFamily) => naming::font_family_name(&value, rank),
                (true, _) => naming::font_weight_name(&value, rank),
                (false, TokenType::FontFamily) => format!("font-family-{}", rank),
                (false, _) => format!("font-weight-{}", rank),
            };
            catalog
                .class_mut(token_type)
                .insert(names.allocate(base), Token::new(TokenValue::Text(value), token_type, count));
        }
    }

    fn push_numbers(
        &self,
        tally: &Tally<NumberKey>,
        token_type: TokenType,
        catalog: &mut TokenCatalog,
        names: &mut NameAllocator,
    ) {
        for (index, (key, count)) in self.by_value(tally).into_iter().enumerate() {
            let rank = index + 1;
            let number = key.value();
            let (base, value) = match token_type {
                TokenType::Spacing => (
                    semantic_or(self.options.semantic, || naming::spacing_name(number, rank), "spacing", rank),
                    TokenValue::Text(px(number)),
                ),
                TokenType::BorderRadius => (
                    semantic_or(self.options.semantic, || naming::radius_name(number, rank), "radius", rank),
                    TokenValue::Text(px(number)),
                ),
                _ => (
                    semantic_or(self.options.semantic, || naming::opacity_name(number), "opacity", rank),
                    TokenValue::Number(number),
                ),
            };
            catalog
                .class_mut(token_type)
                .insert(names.allocate(base), Token::new(value, token_type, count));
        }
    }
}

fn semantic_or(semantic: bool, name: impl FnOnce() -> String, prefix: &str, rank: usize) -> String {
    if semantic {
        name()
    } else {
        format!("{}-{}", prefix, rank)
    }
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Extract every token from `tree`.
pub fn extract_tokens(tree: &DesignTree, options: &TokenOptions) -> TokenCatalog {
    TokenExtractor::new(*options).extract(tree)
}
