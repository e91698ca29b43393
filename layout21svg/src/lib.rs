//!
//! # Layout21 SVG
//!
//! Renders flattened [layout21raw] hierarchies as SVG documents,
//! one Inkscape layer-group per layout layer, styled from a [ColorTable].
//!
//! ```text
//! let lib = Library::from_dump(&dump21::parse_file("inv.txt")?)?;
//! let colors = ColorTable::open("colors.csv")?;
//! let rendered = render(&lib, lib.top(None)?, &colors, &SvgOptions::default())?;
//! rendered.save("inv.svg")?;
//! ```
//!

pub mod colors;
pub use colors::*;

pub mod emit;
pub use emit::*;


// Re-exports
pub use layout21raw as raw;
pub use svg;

/// # Svg Error Enumeration
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    /// Color-table rows with missing or invalid fields
    #[error("Invalid color table, line {line}: {reason}")]
    InvalidColorTable { line: usize, reason: String },
    /// Comma-separated-value format errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// File-system errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Errors expanding the layout hierarchy
    #[error(transparent)]
    Layout(#[from] layout21raw::LayoutError),
}
/// Svg Result Type
pub type SvgResult<T> = Result<T, SvgError>;
