//! Solver-resolved sub-rectangle geometry
//!
//! Contiguous table indexed 0..capacity(h): one (length, width) pair and
//! one cut flag per node. Filled once from a solved model, then read-only.

use std::fmt;
use std::marker::PhantomData;

use crate::tree::{checked_capacity, NodeIndex, RelativePosition};
use crate::CutError;

/// Length × width of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Dimensions {
    /// Extent along x
    pub length: u32,

    /// Extent along y
    pub width: u32,
}

impl Dimensions {
    /// Construct dimensions
    pub fn new(length: u32, width: u32) -> Self {
        Self { length, width }
    }

    /// Area in square units
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width)
    }

    /// Same rectangle turned by 90°
    #[inline]
    pub fn rotated(self) -> Self {
        Self {
            length: self.width,
            width: self.length,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// The stock plate being cut
pub type Plate = Dimensions;

/// What the solver did with a sub-rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Cut {
    /// Not cut: holds an item or is unused
    #[default]
    None,

    /// Guillotine cut into left and right
    Vertical,

    /// Guillotine cut into top and bottom
    Horizontal,

    /// First-order non-guillotine cut into four corners and a center
    Split,
}

impl Cut {
    /// Whether any cut was performed
    #[inline]
    pub fn is_cut(self) -> bool {
        !matches!(self, Cut::None)
    }
}

/// Resolved geometry for every node of a height-`h` tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedTree<P: RelativePosition> {
    /// Tree height (root = level 0)
    height: usize,

    /// Per-node dimensions; `None` if the solver reported nothing
    dimensions: Vec<Option<Dimensions>>,

    /// Per-node cut flag
    cuts: Vec<Cut>,

    _arity: PhantomData<P>,
}

impl<P: RelativePosition> SolvedTree<P> {
    /// Empty table for a tree of the given height
    ///
    /// # Panics
    /// Panics if the tree capacity overflows `usize`; see [`SolvedTree::try_new`].
    pub fn new(height: usize) -> Self {
        Self::try_new(height).expect("tree capacity overflows usize")
    }

    /// Empty table, failing on absurd heights
    pub fn try_new(height: usize) -> Result<Self, CutError> {
        let capacity = checked_capacity::<P>(height).ok_or_else(|| {
            CutError::InvalidConfig(format!("tree height {height} overflows node capacity"))
        })?;

        Ok(Self {
            height,
            dimensions: vec![None; capacity],
            cuts: vec![Cut::None; capacity],
            _arity: PhantomData,
        })
    }

    /// Record the solved geometry of `node`
    pub fn set(&mut self, node: NodeIndex, dimensions: Dimensions, cut: Cut) -> Result<(), CutError> {
        self.check(node)?;
        self.dimensions[node] = Some(dimensions);
        self.cuts[node] = cut;
        Ok(())
    }

    /// Resolved dimensions of `node`, if any
    pub fn dimensions(&self, node: NodeIndex) -> Option<Dimensions> {
        self.dimensions.get(node).copied().flatten()
    }

    /// Resolved dimensions of `node`, or the reason they are unavailable
    pub fn require(&self, node: NodeIndex) -> Result<Dimensions, CutError> {
        self.check(node)?;
        self.dimensions[node].ok_or(CutError::MissingGeometry { node })
    }

    /// Cut flag of `node` (`Cut::None` when out of range)
    pub fn cut(&self, node: NodeIndex) -> Cut {
        self.cuts.get(node).copied().unwrap_or_default()
    }

    /// Tree height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes (`capacity(height)`)
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Nodes that were cut, ascending
    pub fn cut_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.cuts
            .iter()
            .enumerate()
            .filter(|(_, cut)| cut.is_cut())
            .map(|(node, _)| node)
    }

    fn check(&self, node: NodeIndex) -> Result<(), CutError> {
        if node >= self.len() {
            return Err(CutError::NodeOutOfRange {
                node,
                capacity: self.len(),
            });
        }
        Ok(())
    }
}
