//! Aggregated exporter settings.

use easel_codegen::{ReactOptions, RobloxOptions};
use easel_io::ExportOptions;
use easel_tokens::TokenOptions;
use serde::{Deserialize, Serialize};

/// Options for every exporter, one field per option surface.
///
/// Deserializes from a camelCase config object in which every field, and
/// every field of every nested object, may be omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    pub json: ExportOptions,
    pub react: ReactOptions,
    pub tokens: TokenOptions,
    pub roblox: RobloxOptions,
}

impl ExportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, options: ExportOptions) -> Self {
        self.json = options;
        self
    }

    pub fn with_react(mut self, options: ReactOptions) -> Self {
        self.react = options;
        self
    }

    pub fn with_tokens(mut self, options: TokenOptions) -> Self {
        self.tokens = options;
        self
    }

    pub fn with_roblox(mut self, options: RobloxOptions) -> Self {
        self.roblox = options;
        self
    }

    /// Parse a JSON config object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
