//! Export format registry.

use easel_core::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every artifact the facade can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Canonical archival JSON.
    #[serde(rename = "json")]
    Json,
    /// React component source.
    #[serde(rename = "react")]
    React,
    /// Structured token catalog JSON.
    #[serde(rename = "tokens")]
    Tokens,
    /// Token catalog as CSS custom properties.
    #[serde(rename = "css")]
    TokensCss,
    /// Token catalog as a TypeScript module.
    #[serde(rename = "ts")]
    TokensTs,
    /// Roblox Luau script.
    #[serde(rename = "roblox", alias = "luau")]
    Roblox,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Json,
        ExportFormat::React,
        ExportFormat::Tokens,
        ExportFormat::TokensCss,
        ExportFormat::TokensTs,
        ExportFormat::Roblox,
    ];

    /// Canonical short name.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::React => "react",
            ExportFormat::Tokens => "tokens",
            ExportFormat::TokensCss => "css",
            ExportFormat::TokensTs => "ts",
            ExportFormat::Roblox => "roblox",
        }
    }

    /// Usual file extension for the artifact. React output depends on
    /// whether it is typed, so this reports the typed default.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::Tokens => "json",
            ExportFormat::React => "tsx",
            ExportFormat::TokensCss => "css",
            ExportFormat::TokensTs => "ts",
            ExportFormat::Roblox => "lua",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "react" | "tsx" | "jsx" => Ok(ExportFormat::React),
            "tokens" => Ok(ExportFormat::Tokens),
            "css" => Ok(ExportFormat::TokensCss),
            "ts" => Ok(ExportFormat::TokensTs),
            "roblox" | "luau" => Ok(ExportFormat::Roblox),
            _ => Err(ExportError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("React".parse::<ExportFormat>().unwrap(), ExportFormat::React);
        assert_eq!("luau".parse::<ExportFormat>().unwrap(), ExportFormat::Roblox);
        assert_eq!(" css ".parse::<ExportFormat>().unwrap(), ExportFormat::TokensCss);
    }

    #[test]
    fn test_unknown_name() {
        let err = "svg".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnknownFormat { ref format } if format == "svg"));
        assert_eq!(err.to_string(), "Unknown export format: svg");
    }

    #[test]
    fn test_names_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format));
        }
    }
}
