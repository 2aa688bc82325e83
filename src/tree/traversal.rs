//! Leaf-to-root path reconstruction
//!
//! For every occupied node: walk parent links up to the root, recording
//! (position, node, parent, length, width) at each step.
//! The root terminates the walk but is not recorded, so the path of a
//! node at level h has exactly h steps.

use tracing::{debug, debug_span, trace};

use super::index::{level, parent, relative_position};
use super::position::RelativePosition;
use super::NodeIndex;
use crate::geometry::{Occupancy, SolvedTree};
use crate::CutError;

/// One step of a reconstruction path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct PathStep<P: RelativePosition> {
    /// Role of `node` among its siblings
    pub position: P,

    /// Sub-rectangle at this step
    pub node: NodeIndex,

    /// Its parent
    pub parent: NodeIndex,

    /// Resolved length of `node`
    pub length: u32,

    /// Resolved width of `node`
    pub width: u32,
}

/// Leaf-first sequence of steps from an occupied node up to the root
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Path<P: RelativePosition> {
    steps: Vec<PathStep<P>>,
}

impl<P: RelativePosition> Path<P> {
    /// Path from `node` to the root using the solved geometry
    ///
    /// An occupied root gives an empty path.
    pub fn from_node(node: NodeIndex, solved: &SolvedTree<P>) -> Result<Self, CutError> {
        let mut steps = Vec::with_capacity(level::<P>(node));
        let mut current = node;

        while current != 0 {
            let dims = solved.require(current)?;
            let up = parent::<P>(current)?;
            steps.push(PathStep {
                position: relative_position(current)?,
                node: current,
                parent: up,
                length: dims.length,
                width: dims.width,
            });
            current = up;
        }

        Ok(Self { steps })
    }

    /// Steps, leaf first
    pub fn steps(&self) -> &[PathStep<P>] {
        &self.steps
    }

    /// Steps, root first (the order coordinates are replayed in)
    pub fn replay(&self) -> impl Iterator<Item = &PathStep<P>> + '_ {
        self.steps.iter().rev()
    }

    /// The occupied node this path starts from (`None` for the root)
    pub fn leaf(&self) -> Option<NodeIndex> {
        self.steps.first().map(|step| step.node)
    }

    /// Number of steps (= level of the occupied node)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for an item placed directly on the root
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Paths for every occupied (item, node) pair
///
/// `paths[i]`, `items[i]` and `nodes[i]` describe the same placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths<P: RelativePosition> {
    paths: Vec<Path<P>>,
    items: Vec<usize>,
    nodes: Vec<NodeIndex>,
}

impl<P: RelativePosition> Paths<P> {
    /// Reconstructed paths
    pub fn paths(&self) -> &[Path<P>] {
        &self.paths
    }

    /// Item type of each path
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Occupied node of each path
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// `(item, node, path)` triples
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeIndex, &Path<P>)> + '_ {
        self.items
            .iter()
            .zip(&self.nodes)
            .zip(&self.paths)
            .map(|((&item, &node), path)| (item, node, path))
    }

    /// Number of placements
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// No item was placed
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Build one path per occupied (item, node), in occupancy order
pub fn build_paths<P: RelativePosition>(
    occupancy: &Occupancy,
    solved: &SolvedTree<P>,
) -> Result<Paths<P>, CutError> {
    let span = debug_span!("build_paths", arity = P::ARITY, height = solved.height());
    let _enter = span.enter();

    let mut paths = Vec::with_capacity(occupancy.count());
    let mut items = Vec::with_capacity(occupancy.count());
    let mut nodes = Vec::with_capacity(occupancy.count());

    for (item, node) in occupancy.iter() {
        let path = Path::from_node(node, solved)?;
        trace!(item, node, steps = path.len(), "path reconstructed");
        items.push(item);
        nodes.push(node);
        paths.push(path);
    }

    debug!(placements = paths.len(), "paths built");
    Ok(Paths {
        paths,
        items,
        nodes,
    })
}
