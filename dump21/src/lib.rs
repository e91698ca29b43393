//!
//! # Dump21 Text Layout-Dump Parser
//!
//! Reads the line-oriented text dumps produced by GDSII-to-text converters,
//! into a short tree of [DumpLibrary] => [DumpCell] => [DumpElement].
//! Data is kept on the dump's own terms: raw integer coordinates, numeric layers,
//! and instances referring to their cell-definitions by name.
//! Resolving those names, and everything geometric, is left to `layout21raw`.
//!
//! A dump looks like:
//!
//! ```text
//! Cell Name: inv
//! Rectangle: 5 0 0 100 50
//! Polygon: 6 5
//!   0 0 10 0 10 10 0 10
//!   0 0
//! End Cell Definition
//! Cell Name: top
//! Cell Instance: inv
//!   200 0 90 1
//! End Cell Definition
//! ```
//!
//! ## Usage
//!
//! ```
//! let lib = dump21::parse_str("Cell Name: a\nRectangle: 1 0 0 10 10\nEnd Cell Definition\n").unwrap();
//! assert_eq!(lib.cells[0].name, "a");
//! ```
//!

pub mod data;
pub use data::*;

pub mod read;
pub use read::*;


// Re-exports
pub use layout21utils as utils;

/// # Dump Error Enumeration
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// A record whose fields do not match its kind's expected shape
    #[error("Malformed record on line {line}: {reason}\n  {content}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },
    /// File-system errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
/// Dump21 Result Type
pub type DumpResult<T> = Result<T, DumpError>;
