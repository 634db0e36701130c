//! Code generators for the supported targets.

mod react;
mod roblox;
mod templates;

pub use react::{ReactGenerator, ReactOptions};
pub use roblox::{RobloxGenerator, RobloxOptions, ScriptReport, SkippedNode};
pub use templates::TemplateEngine;

use easel_core::DesignTree;

/// Common trait for tree-to-source generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Extension of the generated source file, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Generate source text for the whole tree.
    fn generate(&self, tree: &DesignTree) -> String;
}

/// Generated project output.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    /// Look up a file by its relative path.
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to project root.
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Format a number the way both targets print pixel values: at most three
/// decimals, no trailing zeros, and no negative zero.
pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.33333), "0.333");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }
}
