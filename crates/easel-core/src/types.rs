//! Value types carried by design tree nodes.

use crate::color::{parse_color, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An absolute position in design pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A resolved size in design pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Container padding, either uniform or per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f64),
    Sides {
        #[serde(default)]
        top: f64,
        #[serde(default)]
        right: f64,
        #[serde(default)]
        bottom: f64,
        #[serde(default)]
        left: f64,
    },
}

impl Padding {
    /// The numeric value when the padding is the same on every side.
    pub fn as_uniform(&self) -> Option<f64> {
        match *self {
            Padding::Uniform(value) => Some(value),
            Padding::Sides { .. } => None,
        }
    }
}

/// A paint value exactly as the editor stored it (e.g. `#ff0000`, `rgba(0,0,0,0.5)`).
///
/// The raw string is kept verbatim so that serialization and token
/// identity are lossless. Whether it actually paints is decided by [`ColorValue::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(pub String);

impl ColorValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into RGBA; `None` means "no paint".
    pub fn parse(&self) -> Option<Rgba> {
        parse_color(&self.0)
    }
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self {
        ColorValue(s.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(s: String) -> Self {
        ColorValue(s)
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A font weight, either numeric (`700`) or a keyword (`"bold"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(f64),
    Keyword(String),
}

impl FontWeight {
    /// Whether this weight renders as bold.
    pub fn is_bold(&self) -> bool {
        match self {
            FontWeight::Numeric(n) => *n >= 600.0,
            FontWeight::Keyword(k) => {
                let k = k.trim().to_ascii_lowercase();
                match k.as_str() {
                    "bold" | "bolder" | "semibold" | "extrabold" | "black" => true,
                    other => other.parse::<f64>().map(|n| n >= 600.0).unwrap_or(false),
                }
            }
        }
    }
}

impl From<&str> for FontWeight {
    fn from(s: &str) -> Self {
        FontWeight::Keyword(s.to_string())
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(n) => write!(f, "{}", n),
            FontWeight::Keyword(k) => f.write_str(k),
        }
    }
}

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Cross-axis alignment of stack children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[serde(alias = "flex-start")]
    Start,
    Center,
    #[serde(alias = "flex-end")]
    End,
    Stretch,
}

/// Main-axis distribution of stack children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    #[serde(alias = "flex-start")]
    Start,
    Center,
    #[serde(alias = "flex-end")]
    End,
    #[serde(alias = "space-between")]
    Between,
    #[serde(alias = "space-around")]
    Around,
    #[serde(alias = "space-evenly")]
    Evenly,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Semantic text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextVariant {
    H1,
    H2,
    H3,
    Body,
    Caption,
}

impl TextVariant {
    pub fn is_heading(&self) -> bool {
        matches!(self, TextVariant::H1 | TextVariant::H2 | TextVariant::H3)
    }

    /// Pixel size used when a text node has no explicit `fontSize`.
    pub fn default_font_size(&self) -> f64 {
        match self {
            TextVariant::H1 => 36.0,
            TextVariant::H2 => 28.0,
            TextVariant::H3 => 22.0,
            TextVariant::Body => 16.0,
            TextVariant::Caption => 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    Cover,
    Contain,
    Fill,
    None,
    ScaleDown,
}

impl ObjectFit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
            ObjectFit::Fill => "fill",
            ObjectFit::None => "none",
            ObjectFit::ScaleDown => "scale-down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_weight_boldness() {
        assert!(FontWeight::from("bold").is_bold());
        assert!(FontWeight::from("700").is_bold());
        assert!(FontWeight::Numeric(600.0).is_bold());
        assert!(!FontWeight::from("normal").is_bold());
        assert!(!FontWeight::Numeric(400.0).is_bold());
    }

    #[test]
    fn test_padding_forms() {
        let uniform: Padding = serde_json::from_str("8").unwrap();
        assert_eq!(uniform.as_uniform(), Some(8.0));

        let sides: Padding = serde_json::from_str(r#"{"top":4,"left":2}"#).unwrap();
        assert_eq!(sides.as_uniform(), None);
    }

    #[test]
    fn test_variant_font_sizes() {
        assert_eq!(TextVariant::H1.default_font_size(), 36.0);
        assert_eq!(TextVariant::Caption.default_font_size(), 12.0);
        assert!(TextVariant::H3.is_heading());
        assert!(!TextVariant::Body.is_heading());
    }

    #[test]
    fn test_align_aliases() {
        let align: Align = serde_json::from_str("\"flex-start\"").unwrap();
        assert_eq!(align, Align::Start);
        let justify: Justify = serde_json::from_str("\"space-between\"").unwrap();
        assert_eq!(justify, Justify::Between);
    }
}
