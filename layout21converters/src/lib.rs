//!
//! # Layout21 Converters
//!
//! Library implementations of the `dump2svg` and `cds2hex` programs.
//! Each program's `main` parses its command-line into an options struct and calls in here.
//!

pub mod cds2hex;
pub mod config;
pub mod dump2svg;
pub mod tools;

pub use config::Config;

/// # Conversion Error Enumeration
#[derive(Debug, thiserror::Error)]
pub enum ConvError {
    /// An external program not found on the `PATH`
    #[error("External tool {tool:?} not found")]
    MissingExternalTool { tool: String },
    /// An external program which ran, but did not succeed
    #[error("External tool {tool:?} failed: {status}")]
    ToolFailed { tool: String, status: String },
    /// Configuration-file errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] layout21utils::ser::Error),
    /// File-system errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Dump(#[from] dump21::DumpError),
    #[error(transparent)]
    Layout(#[from] layout21raw::LayoutError),
    #[error(transparent)]
    Svg(#[from] layout21svg::SvgError),
}
/// Conversion Result Type
pub type ConvResult<T> = Result<T, ConvError>;
