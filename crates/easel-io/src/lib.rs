//! easel-io: canonical archival format for design trees.
//!
//! Exported text is a versioned JSON envelope with recursively sorted keys,
//! so two structurally identical trees always produce byte-identical output:
//!
//! ```text
//! { "metadata": { "exportFormatVersion", "exportedAt", ... }, "spec": <tree> }
//! ```
//!
//! Import accepts both the envelope and the older bare-tree form
//! (`{ "root": ... }`).
//!
//! # Quick Start
//!
//! ```ignore
//! use easel_io::{export, import, ExportOptions};
//!
//! let text = export(&tree, &ExportOptions::default())?;
//! let restored = import(&text)?;
//! assert_eq!(restored, tree);
//! ```

pub mod canonical;
pub mod roundtrip;

pub use canonical::{
    export, import, import_document, sort_keys, ExportMetadata, ExportOptions, ImportedDocument,
    EXPORT_FORMAT_VERSION,
};
pub use roundtrip::{diff_values, validate_round_trip, RoundTripReport};
