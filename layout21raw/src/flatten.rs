//!
//! # Hierarchy Expansion
//!
//! Walks a [Library]'s instance hierarchy from a top-level cell,
//! composing [Placement]s on the way down,
//! and hands each absolutely-positioned polygon to a [FlatSink].
//!

// Crates.io
use log::{debug, info};
use serde::{Deserialize, Serialize};

// Local Imports
use crate::{
    data::{Cell, CellKey, Library, Node},
    error::{LayoutError, LayoutResult},
    geom::{Placement, Point},
    utils::{DepOrder, DepOrderer},
    LayerNum,
};

/// # Flattened Shape
/// A polygon in top-level coordinates, on layer `layer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatShape {
    pub layer: LayerNum,
    pub points: Vec<Point>,
}

/// # Flattened Shape Consumer
pub trait FlatSink {
    /// Accept one flattened shape, in expansion order
    fn shape(&mut self, shape: FlatShape);
}
impl FlatSink for Vec<FlatShape> {
    fn shape(&mut self, shape: FlatShape) {
        self.push(shape)
    }
}

// Instance-dependency ordering, used to reject cyclic hierarchies before expanding them
impl DepOrder for Library {
    type Item = CellKey;
    type Error = LayoutError;

    fn process(&self, item: &CellKey, orderer: &mut DepOrderer<Self>) -> LayoutResult<()> {
        let cell = &self.cells[*item];
        for inst in cell.instances() {
            let key = self.resolve(inst, cell)?;
            orderer.push(&key)?;
        }
        Ok(())
    }
    fn fail(&self, item: &CellKey) -> LayoutError {
        LayoutError::CyclicReference {
            cell: self.cells[*item].name.clone(),
        }
    }
}

impl Library {
    /// Expand the hierarchy under `top` into a vector of [FlatShape]s
    pub fn flatten(&self, top: CellKey) -> LayoutResult<Vec<FlatShape>> {
        let mut shapes = Vec::new();
        self.flatten_into(top, &mut shapes)?;
        Ok(shapes)
    }
    /// Expand the hierarchy under `top`, handing each shape to `sink`.
    /// Returns the number of shapes produced.
    pub fn flatten_into(&self, top: CellKey, sink: &mut impl FlatSink) -> LayoutResult<usize> {
        if !self.cells.contains_key(top) {
            return LayoutError::fail("Top-level cell key not in library");
        }
        // Check for unresolved references and cycles before recursing
        let order = self.order(&[top])?;
        debug!("Expanding {} cells under {:?}", order.len(), self.cells[top].name);

        let mut flattener = Flattener {
            lib: self,
            sink,
            count: 0,
        };
        flattener.flatten_cell(&self.cells[top], &Placement::identity())?;
        info!("Flattened {} shapes from cell {:?}", flattener.count, self.cells[top].name);
        Ok(flattener.count)
    }
}

/// Recursive expansion helper.
/// Holds the shared output state across the walk.
struct Flattener<'l, S: FlatSink> {
    lib: &'l Library,
    sink: &'l mut S,
    count: usize,
}
impl<S: FlatSink> Flattener<'_, S> {
    /// Expand `cell`, itself positioned at `trans` in top-level coordinates.
    /// Children are visited in definition order.
    fn flatten_cell(&mut self, cell: &Cell, trans: &Placement) -> LayoutResult<()> {
        for child in cell.children.iter() {
            match child {
                Node::Shape(elem) => {
                    let points = elem
                        .points
                        .iter()
                        .map(|p| p.transform(trans))
                        .collect::<LayoutResult<Vec<_>>>()?;
                    self.sink.shape(FlatShape {
                        layer: elem.layer,
                        points,
                    });
                    self.count += 1;
                }
                Node::Instance(inst) => {
                    let key = self.lib.resolve(inst, cell)?;
                    let child_trans = Placement::cascade(trans, &inst.placement)?;
                    let lib = self.lib;
                    self.flatten_cell(&lib.cells[key], &child_trans)?;
                }
            }
        }
        Ok(())
    }
}
