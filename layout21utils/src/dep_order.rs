//!
//! # Dependency-Ordering Trait and Helpers
//!

// Std-lib
use std::collections::HashSet;
use std::hash::Hash;

///
/// # Dependency-Ordering Trait
///
/// Libraries in which cells instantiate other cells form a graph of dependencies.
/// Cells are commonly stored unordered, but must occasionally be dependency-ordered,
/// or at least checked for cycles, before they can be processed.
///
/// Implementers are typically a view over the whole graph, e.g. a cell library.
/// The required `process` method iterates over an item's *direct* dependencies,
/// passing each to `orderer.push`, which recurses depth-first.
/// `push` monitors for cycles and reports them through `fail`.
///
/// ```text
/// impl DepOrder for MyLibrary {
///     type Item = CellKey;
///     type Error = MyError;
///
///     fn process(&self, item: &CellKey, orderer: &mut DepOrderer<Self>) -> Result<(), MyError> {
///         for dep in self.cells[*item].dependencies() {
///             orderer.push(&dep)?;
///         }
///         Ok(())
///     }
///     fn fail(&self, item: &CellKey) -> MyError {
///         MyError::Cycle(*item)
///     }
/// }
/// ```
///
/// The default-implemented [DepOrder::order] returns the dependency-ordered items,
/// dependencies ahead of their dependents.
///
pub trait DepOrder: Sized {
    /// Item Type. Typically keys to the nodes in the dependency graph.
    type Item: Clone + Eq + Hash;
    /// Error Type
    type Error;

    /// Dependency-order all items reachable from `items`
    fn order(&self, items: &[Self::Item]) -> Result<Vec<Self::Item>, Self::Error> {
        DepOrderer::new(self).order(items)
    }
    /// Process a single `item`, pushing each of its direct dependencies
    fn process(&self, item: &Self::Item, orderer: &mut DepOrderer<Self>) -> Result<(), Self::Error>;
    /// Create the error reporting a cycle through `item`
    fn fail(&self, item: &Self::Item) -> Self::Error;
}

/// # Dependency Order Helper
/// Public solely for use in the call-signature of [DepOrder::process].
pub struct DepOrderer<'g, P: DepOrder> {
    /// The graph being ordered
    graph: &'g P,
    /// Ordered, completed items
    stack: Vec<P::Item>,
    /// Completed items, for quick membership tests
    seen: HashSet<P::Item>,
    /// Items with an open recursive frame, for cycle detection
    pending: HashSet<P::Item>,
}
impl<'g, P: DepOrder> DepOrderer<'g, P> {
    fn new(graph: &'g P) -> Self {
        Self {
            graph,
            stack: Vec::new(),
            seen: HashSet::new(),
            pending: HashSet::new(),
        }
    }
    fn order(mut self, items: &[P::Item]) -> Result<Vec<P::Item>, P::Error> {
        for item in items.iter() {
            self.push(item)?;
        }
        Ok(self.stack)
    }
    /// Push `item`'s dependencies, and then itself, onto the stack
    pub fn push(&mut self, item: &P::Item) -> Result<(), P::Error> {
        if self.seen.contains(item) {
            return Ok(());
        }
        if self.pending.contains(item) {
            return Err(self.graph.fail(item));
        }
        self.pending.insert(item.clone());
        let graph = self.graph;
        graph.process(item, self)?;
        self.pending.remove(item);
        self.seen.insert(item.clone());
        self.stack.push(item.clone());
        Ok(())
    }
}
