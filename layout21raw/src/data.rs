//!
//! # Raw Layout Data Model
//!
//! Defines the primary structures for representation of "raw" geometry-based IC layout,
//! including [Library], [Cell], [Element], and [Instance].
//!

// Std-Lib
use std::collections::HashMap;

// Crates.io
use log::debug;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

// Local Imports
use crate::{
    error::{LayoutError, LayoutResult},
    geom::{Placement, Point},
    LayerNum,
};

// Create key-types for each internal type stored in [SlotMap]s
new_key_type! {
    /// Keys for [Cell] entries
    pub struct CellKey;
}

/// # Cell Library
///
/// The registry of [Cell] definitions, indexed by name.
/// Cells are stored once, in an arena, however many times they are instantiated.
///
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Library Name
    pub name: String,
    /// Cell Definitions
    pub cells: SlotMap<CellKey, Cell>,
    /// Name to [CellKey] index
    names: HashMap<String, CellKey>,
    /// Keys in order of (latest) definition
    defined: Vec<CellKey>,
}
impl Library {
    /// Create a new and empty Library
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Add a [Cell], returning its key.
    /// A cell of the same name as an existing one replaces it, keeping its key.
    pub fn add_cell(&mut self, cell: Cell) -> CellKey {
        if let Some(key) = self.names.get(&cell.name).copied() {
            debug!("Redefining cell {:?}", cell.name);
            self.cells[key] = cell;
            self.defined.retain(|k| *k != key);
            self.defined.push(key);
            return key;
        }
        let name = cell.name.clone();
        let key = self.cells.insert(cell);
        self.names.insert(name, key);
        self.defined.push(key);
        key
    }
    /// Get the key of the cell named `name`, if defined
    pub fn key(&self, name: &str) -> Option<CellKey> {
        self.names.get(name).copied()
    }
    /// Get a reference to the cell named `name`, if defined
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.key(name).and_then(|k| self.cells.get(k))
    }
    /// Get the key of the most recently defined cell
    pub fn last_cell(&self) -> Option<CellKey> {
        self.defined.last().copied()
    }
    /// Cell keys, in order of definition
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.defined.iter().copied()
    }
    /// Select the top-level cell: `name` if provided, or otherwise the last cell defined.
    pub fn top(&self, name: Option<&str>) -> LayoutResult<CellKey> {
        match name {
            Some(name) => self
                .key(name)
                .ok_or_else(|| LayoutError::UnresolvedCellReference {
                    cell: name.to_string(),
                    parent: None,
                }),
            None => self
                .last_cell()
                .ok_or_else(|| LayoutError::EmptyLibrary(self.name.clone())),
        }
    }
    /// Resolve an [Instance]'s cell name, reporting `parent` on failure
    pub fn resolve(&self, inst: &Instance, parent: &Cell) -> LayoutResult<CellKey> {
        self.key(&inst.cell)
            .ok_or_else(|| LayoutError::UnresolvedCellReference {
                cell: inst.cell.clone(),
                parent: Some(parent.name.clone()),
            })
    }
}

/// # Cell Definition
///
/// An ordered list of [Node]s.
/// Children are only ever appended.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    /// Cell Name
    pub name: String,
    /// Child Nodes, in definition order
    pub children: Vec<Node>,
}
impl Cell {
    /// Create a new and empty Cell named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Append a child [Node]
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into())
    }
    /// Iterate over our [Instance] children
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.children.iter().filter_map(|n| match n {
            Node::Instance(inst) => Some(inst),
            Node::Shape(_) => None,
        })
    }
    /// Iterate over our [Element] children
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Shape(elem) => Some(elem),
            Node::Instance(_) => None,
        })
    }
}

/// # Cell Child Node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Node {
    /// Leaf polygon, at the identity placement of its cell
    Shape(Element),
    /// Placed reference to another cell
    Instance(Instance),
}
impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Shape(e)
    }
}
impl From<Instance> for Node {
    fn from(i: Instance) -> Self {
        Self::Instance(i)
    }
}

/// # Primitive Geometric Element
///
/// A closed polygon on layer `layer`.
/// The first point is implicitly repeated to close it.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Element {
    /// Layer Number
    pub layer: LayerNum,
    /// Vertices, in local cell coordinates
    pub points: Vec<Point>,
}
impl Element {
    pub fn new(layer: LayerNum, points: Vec<Point>) -> Self {
        Self { layer, points }
    }
}

/// # Instance
///
/// A reference to the cell named `cell`, positioned at `placement`.
/// Names are resolved to cells during hierarchy expansion, so instances may precede their definitions.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Name of the instantiated cell
    pub cell: String,
    /// Location, rotation, and reflection
    pub placement: Placement,
}
impl Instance {
    pub fn new(cell: impl Into<String>, placement: Placement) -> Self {
        Self {
            cell: cell.into(),
            placement,
        }
    }
}
