//!
//! # Dump Import
//!
//! Conversion from the [dump21] text-dump data model into a [Library].
//! Rectangles become five-point closed polygons.
//! Instance names are carried through unresolved.
//!

// Crates.io
use log::debug;

// Local Imports
use crate::{
    data::{Cell, Element, Instance, Library},
    error::{LayoutError, LayoutResult},
    geom::{Placement, Point},
    utils::ErrorHelper,
};
use dump21::{DumpCell, DumpElement, DumpLibrary, DumpPoint, DumpPolygon};

impl Library {
    /// Import a [DumpLibrary], preserving cell and element order
    pub fn from_dump(dump: &DumpLibrary) -> LayoutResult<Library> {
        DumpImporter::import(dump, "dump")
    }
}

/// # Dump Importer
/// Tracks the cell being converted, for error reporting.
#[derive(Debug, Default)]
pub struct DumpImporter {
    cell: String,
}
impl DumpImporter {
    /// Import `dump` into a new [Library] named `name`
    pub fn import(dump: &DumpLibrary, name: impl Into<String>) -> LayoutResult<Library> {
        let mut importer = Self::default();
        let mut lib = Library::new(name);
        for dcell in dump.cells.iter() {
            let cell = importer.import_cell(dcell)?;
            lib.add_cell(cell);
        }
        debug!("Imported {} cells into library {:?}", lib.cells.len(), lib.name);
        Ok(lib)
    }
    fn import_cell(&mut self, dcell: &DumpCell) -> LayoutResult<Cell> {
        self.cell = dcell.name.clone();
        let mut cell = Cell::new(&dcell.name);
        for elem in dcell.elems.iter() {
            match elem {
                DumpElement::Rect(r) => cell.push(self.import_polygon(&r.to_poly())?),
                DumpElement::Polygon(p) => cell.push(self.import_polygon(p)?),
                DumpElement::Instance(i) => cell.push(Instance {
                    cell: i.cell.clone(),
                    placement: Placement::new(self.import_point(&i.loc), i.angle, i.mirror),
                }),
            }
        }
        Ok(cell)
    }
    fn import_polygon(&self, poly: &DumpPolygon) -> LayoutResult<Element> {
        self.assert(!poly.points.is_empty(), "Polygon without points")?;
        Ok(Element {
            layer: poly.layer,
            points: poly.points.iter().map(|p| self.import_point(p)).collect(),
        })
    }
    fn import_point(&self, p: &DumpPoint) -> Point {
        Point::new(p.x, p.y)
    }
}
impl ErrorHelper for DumpImporter {
    type Error = LayoutError;
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Import {
            message: msg.into(),
            cell: self.cell.clone(),
        }
    }
}
