//! Core types shared by every Easel exporter.
//!
//! This crate provides the foundation the emitters are built on:
//! - The design tree IR (frames, stacks, shapes, text, images, vectors)
//! - Value types (points, sizes, padding, paints, font weights)
//! - Color parsing and pixel-to-engine unit conversion
//! - Error types

pub mod color;
pub mod errors;
pub mod tree;
pub mod types;
pub mod units;

pub use color::{parse_color, Rgba};
pub use errors::*;
pub use tree::*;
pub use types::*;
pub use units::{PixelUnits, ScaledUnits, UnitConversion};
