//! Source generation from Easel design trees.
//!
//! Two targets share the same tree walk shape but little else:
//!
//! - `react` - a TSX/JSX component with Tailwind classes and inline styles
//! - `roblox` - a flat Luau script that builds a ScreenGui object graph
//!
//! Both generators are pure: the same tree and options always produce the
//! same text, and unknown or unsupported nodes degrade instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use easel_codegen::{CodeGenerator, ReactGenerator, ReactOptions};
//!
//! let generator = ReactGenerator::new(ReactOptions::default());
//! let source = generator.generate(&tree);
//! ```

pub mod generators;

pub use easel_core::ExportError;
pub use generators::{
    CodeGenerator, GeneratedFile, GeneratedProject, ReactGenerator, ReactOptions,
    RobloxGenerator, RobloxOptions, ScriptReport, SkippedNode, TemplateEngine,
};

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, ExportError>;
