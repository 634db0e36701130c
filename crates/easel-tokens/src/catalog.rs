//! Token catalog model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options for token extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenOptions {
    /// Heuristic names (`primary-red`, `text-base`) instead of `color-1`.
    pub semantic: bool,
    /// Collapse identical values into one token.
    pub deduplicate: bool,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            semantic: true,
            deduplicate: true,
        }
    }
}

/// Token class, serialized as the token's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Typography,
    FontFamily,
    FontWeight,
    Spacing,
    BorderRadius,
    Opacity,
}

impl TokenType {
    pub const ALL: [TokenType; 7] = [
        TokenType::Color,
        TokenType::Typography,
        TokenType::FontFamily,
        TokenType::FontWeight,
        TokenType::Spacing,
        TokenType::BorderRadius,
        TokenType::Opacity,
    ];

    /// Key of this class in the catalog's serialized form.
    pub fn catalog_key(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Typography => "typography",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Spacing => "spacing",
            TokenType::BorderRadius => "radius",
            TokenType::Opacity => "opacity",
        }
    }
}

/// Composite value of a typography token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyValue {
    pub font_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Typography(TypographyValue),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A named, deduplicated design value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Human-readable usage note, e.g. "Used 3 times".
    pub description: String,
    /// Number of occurrences folded into this token.
    #[serde(skip)]
    pub count: usize,
}

impl Token {
    pub fn new(value: TokenValue, token_type: TokenType, count: usize) -> Self {
        Self {
            value,
            token_type,
            description: usage_description(count),
            count,
        }
    }
}

fn usage_description(count: usize) -> String {
    if count == 1 {
        "Used 1 time".to_string()
    } else {
        format!("Used {} times", count)
    }
}

/// Every token extracted from one tree, grouped by class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCatalog {
    pub color: IndexMap<String, Token>,
    pub typography: IndexMap<String, Token>,
    pub font_family: IndexMap<String, Token>,
    pub font_weight: IndexMap<String, Token>,
    pub spacing: IndexMap<String, Token>,
    pub radius: IndexMap<String, Token>,
    pub opacity: IndexMap<String, Token>,
}

impl TokenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens of one class, in rank order.
    pub fn class(&self, token_type: TokenType) -> &IndexMap<String, Token> {
        match token_type {
            TokenType::Color => &self.color,
            TokenType::Typography => &self.typography,
            TokenType::FontFamily => &self.font_family,
            TokenType::FontWeight => &self.font_weight,
            TokenType::Spacing => &self.spacing,
            TokenType::BorderRadius => &self.radius,
            TokenType::Opacity => &self.opacity,
        }
    }

    pub(crate) fn class_mut(&mut self, token_type: TokenType) -> &mut IndexMap<String, Token> {
        match token_type {
            TokenType::Color => &mut self.color,
            TokenType::Typography => &mut self.typography,
            TokenType::FontFamily => &mut self.font_family,
            TokenType::FontWeight => &mut self.font_weight,
            TokenType::Spacing => &mut self.spacing,
            TokenType::BorderRadius => &mut self.radius,
            TokenType::Opacity => &mut self.opacity,
        }
    }

    /// All tokens, class by class.
    pub fn iter(&self) -> impl Iterator<Item = (TokenType, &String, &Token)> {
        TokenType::ALL
            .into_iter()
            .flat_map(move |t| self.class(t).iter().map(move |(name, token)| (t, name, token)))
    }

    /// Total number of tokens.
    pub fn len(&self) -> usize {
        TokenType::ALL.iter().map(|t| self.class(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the color token carrying exactly this raw value.
    pub fn color_for(&self, value: &str) -> Option<(&String, &Token)> {
        self.color
            .iter()
            .find(|(_, token)| token.value.as_text() == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_serializes_without_count() {
        let token = Token::new(TokenValue::Text("#fff".into()), TokenType::Color, 3);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["value"], "#fff");
        assert_eq!(json["type"], "color");
        assert_eq!(json["description"], "Used 3 times");
        assert!(json.get("count").is_none());
    }

    #[test]
    fn test_singular_description() {
        let token = Token::new(TokenValue::Number(0.5), TokenType::Opacity, 1);
        assert_eq!(token.description, "Used 1 time");
    }

    #[test]
    fn test_default_options() {
        let options = TokenOptions::default();
        assert!(options.semantic);
        assert!(options.deduplicate);

        let partial: TokenOptions = serde_json::from_str(r#"{"semantic": false}"#).unwrap();
        assert!(!partial.semantic);
        assert!(partial.deduplicate);
    }
}
