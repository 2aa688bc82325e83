//! Implicit sub-rectangle tree
//!
//! Node 0 is the stock plate. Cutting node j produces k children at
//! k·j + 1 ..= k·j + k (k = 4 guillotine, k = 5 non-guillotine).
//!
//! Implicit representation: no explicit tree stored!
//! Parents, positions, levels and stages are computed on demand.

mod index;
mod position;
mod traversal;

use std::marker::PhantomData;
use std::ops::Range;

pub use index::{
    ancestors, capacity, checked_capacity, child, children, level, parent, relative_position,
    stages,
};
pub use position::{Axis, GuillotinePosition, NonGuillotinePosition, RelativePosition};
pub use traversal::{build_paths, Path, PathStep, Paths};

use crate::CutError;

/// Index of a sub-rectangle in the flat tree array
pub type NodeIndex = usize;

/// Height-bounded cut tree (implicit)
///
/// Never materialized - only the height is stored; every query is
/// arithmetic over `0..capacity(height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutTree<P: RelativePosition> {
    /// Deepest level (root = 0)
    height: usize,

    /// Number of nodes M(height)
    capacity: usize,

    _arity: PhantomData<P>,
}

impl<P: RelativePosition> CutTree<P> {
    /// Tree with levels `0..=height`
    pub fn new(height: usize) -> Result<Self, CutError> {
        let capacity = checked_capacity::<P>(height).ok_or_else(|| {
            CutError::InvalidConfig(format!("tree height {height} overflows node capacity"))
        })?;

        Ok(Self {
            height,
            capacity,
            _arity: PhantomData,
        })
    }

    /// Deepest level
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All node indices
    pub fn nodes(&self) -> Range<NodeIndex> {
        0..self.capacity
    }

    /// Nodes on the deepest level (cannot be cut further)
    pub fn leaves(&self) -> Range<NodeIndex> {
        let first = if self.height == 0 {
            0
        } else {
            capacity::<P>(self.height - 1)
        };
        first..self.capacity
    }

    /// Whether `node` exists in this tree
    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        node < self.capacity
    }

    /// Children of `node` that exist in this tree
    pub fn children_of(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        children::<P>(node).filter(move |&c| self.contains(c))
    }

    /// `node` followed by all its descendants, level by level
    ///
    /// This is the index set a sub-rectangle "covers": an item placed in
    /// any of these nodes lies inside `node`.
    pub fn descendants(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if !self.contains(node) {
            return out;
        }

        out.push(node);
        let mut frontier = vec![node];
        while !frontier.is_empty() {
            let next: Vec<NodeIndex> = frontier
                .iter()
                .flat_map(|&n| self.children_of(n))
                .collect();
            out.extend_from_slice(&next);
            frontier = next;
        }

        out
    }
}

impl CutTree<GuillotinePosition> {
    /// Nodes reachable within `limit` cutting stages
    ///
    /// A model builder keeping only these nodes enforces a k-staged pattern.
    pub fn nodes_within_stages(&self, limit: usize) -> impl Iterator<Item = NodeIndex> {
        self.nodes().filter(move |&j| stages(j) <= limit)
    }
}
