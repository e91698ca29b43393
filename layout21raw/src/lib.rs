//!
//! # Raw Layout
//!
//! Cells of geometric primitives and instances of other cells,
//! much akin to nearly any legacy layout system,
//! plus the machinery to expand a cell hierarchy into flat, absolutely-positioned shapes.
//!
//! * [Library] is the registry of [Cell] definitions, indexed by name.
//! * Each [Cell] holds an ordered list of [Node]s: either an [Element], a leaf polygon,
//!   or an [Instance] of another cell, at a [Placement].
//! * [Library::flatten] and [Library::flatten_into] walk the hierarchy from a top cell,
//!   composing placements on the way down, and produce [FlatShape]s.
//!
//! Import from the text-dump format is supported via [Library::from_dump].
//!

pub mod data;
pub use data::*;

pub mod dump;

pub mod error;
pub use error::*;

pub mod flatten;
pub use flatten::*;

pub mod geom;
pub use geom::*;

#[cfg(test)]
mod tests;

// Re-exports
pub use dump21;
pub use layout21utils as utils;

/// # Location Integer Type-Alias
///
/// Used for all layout spatial coordinates, in raw database units.
///
pub type Int = i64;

/// # Layer Number Type-Alias
pub type LayerNum = i32;
