//!
//! # Dump21 Data Model
//!

// Std-Lib
use std::ops::AddAssign;
use std::path::Path;

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::{read, DumpResult};

/// Layer Number
pub type DumpLayer = i32;

/// # Dump Point
/// In raw integer database units.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DumpPoint {
    pub x: i64,
    pub y: i64,
}
impl DumpPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// # Rectangle Record
/// Axis-aligned, specified by two opposite corners.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DumpRect {
    pub layer: DumpLayer,
    pub p0: DumpPoint,
    pub p1: DumpPoint,
}
impl DumpRect {
    /// Convert to a closed five-point [DumpPolygon].
    /// Corners run `p0`, `(x0, y1)`, `p1`, `(x1, y0)`, and back to `p0`.
    pub fn to_poly(&self) -> DumpPolygon {
        let (p0, p1) = (self.p0, self.p1);
        DumpPolygon {
            layer: self.layer,
            points: vec![
                p0,
                DumpPoint::new(p0.x, p1.y),
                p1,
                DumpPoint::new(p1.x, p0.y),
                p0,
            ],
        }
    }
}

/// # Polygon Record
/// Closure from the last point back to the first is implied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DumpPolygon {
    pub layer: DumpLayer,
    pub points: Vec<DumpPoint>,
}

/// # Cell Instance Record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DumpInstance {
    /// Name of the instantiated cell.
    /// Not resolved here; it may be defined later in the dump, or not at all.
    pub cell: String,
    /// Location of the instance origin, in the parent's frame
    pub loc: DumpPoint,
    /// Counter-clockwise rotation, in degrees, as written
    pub angle: f64,
    /// Reflection about the x-axis, applied after rotation
    pub mirror: bool,
}

/// # Dump Element Enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DumpElement {
    Rect(DumpRect),
    Polygon(DumpPolygon),
    Instance(DumpInstance),
}
impl From<DumpRect> for DumpElement {
    fn from(r: DumpRect) -> Self {
        Self::Rect(r)
    }
}
impl From<DumpPolygon> for DumpElement {
    fn from(p: DumpPolygon) -> Self {
        Self::Polygon(p)
    }
}
impl From<DumpInstance> for DumpElement {
    fn from(i: DumpInstance) -> Self {
        Self::Instance(i)
    }
}

/// # Cell Definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DumpCell {
    pub name: String,
    /// Elements, in dump order
    pub elems: Vec<DumpElement>,
}
impl DumpCell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Count our elements by type
    pub fn stats(&self) -> DumpStats {
        let mut stats = DumpStats {
            cells: 1,
            ..Default::default()
        };
        for elem in self.elems.iter() {
            match elem {
                DumpElement::Rect(_) => stats.rects += 1,
                DumpElement::Polygon(_) => stats.polygons += 1,
                DumpElement::Instance(_) => stats.instances += 1,
            }
        }
        stats
    }
}

/// # Dump Library
/// The cell definitions of a dump, in the order they appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DumpLibrary {
    pub cells: Vec<DumpCell>,
}
impl DumpLibrary {
    /// Read a [DumpLibrary] from file `fname`
    pub fn open(fname: impl AsRef<Path>) -> DumpResult<Self> {
        read::parse_file(fname)
    }
    /// Count our cells and elements by type
    pub fn stats(&self) -> DumpStats {
        let mut stats = DumpStats::default();
        for cell in self.cells.iter() {
            stats += cell.stats();
        }
        stats
    }
}

/// # Dump Statistics
/// Per-type element counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpStats {
    pub cells: usize,
    pub rects: usize,
    pub polygons: usize,
    pub instances: usize,
}
impl AddAssign for DumpStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cells += rhs.cells;
        self.rects += rhs.rects;
        self.polygons += rhs.polygons;
        self.instances += rhs.instances;
    }
}
