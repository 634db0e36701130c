//! Easel: deterministic exporters for 2D design trees.
//!
//! One design tree, several artifacts:
//!
//! - `json` - lossless archival JSON with sorted keys ([`easel_io`])
//! - `react` - a React component in TSX or JSX ([`easel_codegen`])
//! - `tokens`, `css`, `ts` - the design token catalog ([`easel_tokens`])
//! - `roblox` - a Luau script building a ScreenGui ([`easel_codegen`])
//!
//! Every exporter is a pure function of the tree and its options.
//!
//! # Example
//!
//! ```ignore
//! use easel::{export, ExportFormat, ExportSettings};
//!
//! let tree = easel::import(&saved_text)?;
//! let script = export(&tree, ExportFormat::Roblox, &ExportSettings::default())?;
//! ```

pub mod format;
pub mod settings;

pub use format::ExportFormat;
pub use settings::ExportSettings;

pub use easel_codegen::{
    CodeGenerator, GeneratedFile, GeneratedProject, ReactGenerator, ReactOptions,
    RobloxGenerator, RobloxOptions, ScriptReport, SkippedNode,
};
pub use easel_core::{DesignTree, EaselError, ExportError, FormatError, Node, NodeKind, Result};
pub use easel_io::{
    import, import_document, validate_round_trip, ExportOptions, ImportedDocument,
    RoundTripReport,
};
pub use easel_tokens::{extract_tokens, Token, TokenCatalog, TokenOptions, TokenType};

use easel_tokens::{render_css, render_json, render_typescript};
use tracing::debug;

/// Produce one artifact from `tree`.
pub fn export(tree: &DesignTree, format: ExportFormat, settings: &ExportSettings) -> Result<String> {
    let output = match format {
        ExportFormat::Json => easel_io::export(tree, &settings.json)?,
        ExportFormat::React => ReactGenerator::new(settings.react.clone()).generate(tree),
        ExportFormat::Tokens => render_json(&extract_tokens(tree, &settings.tokens))?,
        ExportFormat::TokensCss => render_css(&extract_tokens(tree, &settings.tokens)),
        ExportFormat::TokensTs => render_typescript(&extract_tokens(tree, &settings.tokens)),
        ExportFormat::Roblox => RobloxGenerator::new(settings.roblox.clone()).generate(tree),
    };

    debug!(format = %format, bytes = output.len(), "export finished");
    Ok(output)
}

/// [`export`] with the format given by name (`"json"`, `"react"`, `"luau"`, ...).
pub fn export_named(tree: &DesignTree, format: &str, settings: &ExportSettings) -> Result<String> {
    let format: ExportFormat = format.parse()?;
    export(tree, format, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_exports_an_empty_frame() {
        let tree = DesignTree::with_frame(320.0, 200.0);
        let settings = ExportSettings::default();
        for format in ExportFormat::ALL {
            let output = export(&tree, format, &settings).unwrap();
            assert!(!output.is_empty(), "{format} produced nothing");
        }
    }

    #[test]
    fn test_export_named_rejects_unknown_format() {
        let tree = DesignTree::with_frame(10.0, 10.0);
        let err = export_named(&tree, "pdf", &ExportSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            EaselError::Export(ExportError::UnknownFormat { .. })
        ));
    }
}
