//!
//! # Layout Result and Error Types
//!

/// # [LayoutError] Result Type
pub type LayoutResult<T> = Result<T, LayoutError>;

///
/// # Layout Error Enumeration
///
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// An instance, or the requested top-level cell, names a cell absent from the [crate::Library]
    #[error("Unresolved cell reference {cell:?}{}", instantiated_in(.parent))]
    UnresolvedCellReference {
        cell: String,
        parent: Option<String>,
    },
    /// Rotation other than 0, 90, 180, or 270 degrees
    #[error("Unsupported rotation angle {angle}. Must be one of 0, 90, 180, 270 degrees")]
    UnsupportedAngle { angle: f64 },
    /// Transformed coordinates beyond the range of [crate::Int]
    #[error("Coordinate overflow transforming point {point:?}")]
    CoordinateOverflow { point: crate::Point },
    /// A cell which, directly or transitively, instantiates itself
    #[error("Cyclic instance reference through cell {cell:?}")]
    CyclicReference { cell: String },
    /// No cells to choose a top-level from
    #[error("Library {0:?} defines no cells")]
    EmptyLibrary(String),
    /// Error Importing from Foreign Format
    #[error("Import error in cell {cell:?}: {message}")]
    Import { message: String, cell: String },
    /// Errors reading the dump format
    #[error(transparent)]
    Dump(#[from] dump21::DumpError),
    /// Uncategorized Error, with String Message
    #[error("{0}")]
    Str(String),
}
impl LayoutError {
    /// Create a [LayoutError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [LayoutError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
}
/// Describe the parent of an unresolved reference, if there is one
fn instantiated_in(parent: &Option<String>) -> String {
    match parent {
        Some(p) => format!(", instantiated in cell {:?}", p),
        None => String::new(),
    }
}
impl From<String> for LayoutError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for LayoutError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
