//! Design token extraction.
//!
//! Walks a design tree once, tallies every color, font, spacing, radius and
//! opacity value it meets, collapses duplicates and names the survivors.
//!
//! # Example
//!
//! ```ignore
//! use easel_tokens::{extract_tokens, render_css, TokenOptions};
//!
//! let catalog = extract_tokens(&tree, &TokenOptions::default());
//! println!("{}", render_css(&catalog));
//! ```

pub mod catalog;
mod collect;
pub mod naming;
pub mod render;

pub use catalog::{Token, TokenCatalog, TokenOptions, TokenType, TokenValue, TypographyValue};
pub use collect::{extract_tokens, TokenExtractor};
pub use render::{render_css, render_json, render_typescript};
