//! # Floating-Cuts Sub-rectangle Tree Algebra
//!
//! This library implements the index arithmetic behind the Floating-Cuts
//! MILP formulation for 2D cutting and packing (SKP, SLOPP).
//!
//! ## Core Algorithm
//!
//! 1. **Implicit k-ary tree**: sub-rectangle `j` has children `k·j + 1 ..= k·j + k`
//! 2. **Arithmetic navigation**: parent, relative position, level and cutting
//!    stage are all computed from the index, never stored
//! 3. **Path reconstruction**: every occupied node is walked up to the root
//! 4. **Coordinate replay**: the path is replayed root-to-leaf, narrowing a
//!    bounding box until only the item's sub-rectangle remains
//!
//! Two variants share the machinery: the guillotine tree (k = 4, left /
//! right / top / bottom) and the first-order non-guillotine tree (k = 5,
//! four corners plus a center).
//!
//! ## Usage Example
//!
//! ```
//! use floating_cuts::{
//!     build_paths, resolve_guillotine, Cut, Dimensions, GuillotinePosition, Occupancy,
//!     Plate, SolvedTree,
//! };
//!
//! let plate = Plate::new(100, 50);
//! let mut solved = SolvedTree::<GuillotinePosition>::new(1);
//! solved.set(0, Dimensions::new(100, 50), Cut::Horizontal)?;
//! solved.set(3, Dimensions::new(100, 30), Cut::None)?;
//!
//! let occupancy = Occupancy::from_pairs(1, solved.len(), [(0, 3)])?;
//! let paths = build_paths(&occupancy, &solved)?;
//! let origin = resolve_guillotine(&paths.paths()[0], plate, false);
//! assert_eq!((origin.x, origin.y), (0, 20));
//! # Ok::<(), floating_cuts::CutError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod tree;       // Implicit k-ary sub-rectangle tree
pub mod geometry;   // Solved geometry, occupancy and coordinate replay
pub mod placement;  // Directions, repetitions and packing density
pub mod config;     // Layout configuration

// Re-exports for convenience
pub use tree::{
    build_paths, capacity, child, level, parent, relative_position, stages, Axis, CutTree,
    GuillotinePosition, NodeIndex, NonGuillotinePosition, Path, PathStep, Paths,
    RelativePosition,
};
pub use geometry::{
    resolve_all, resolve_guillotine, resolve_non_guillotine, Bounds, CoordinateResolver, Cut,
    Dimensions, Occupancy, Plate, Point, SolvedTree,
};
pub use placement::{area_bound, packing_density, ItemRect, Placement};
pub use config::{Arity, LayoutConfig};

use thiserror::Error;

/// Errors raised by the tree algebra and the coordinate reconstruction
///
/// None of these are transient: each one points at a bug in how the caller
/// assembled the occupancy or the solved geometry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutError {
    /// The root has no relative position and therefore no parent
    #[error("node 0 is the root and has no relative position or parent")]
    RootHasNoPosition,

    /// A CENTER node could not be placed because its siblings are unresolved
    #[error("center node {node} needs resolved geometry for sibling {sibling} under a cut parent")]
    InconsistentGeometry {
        /// The CENTER node being resolved
        node: NodeIndex,
        /// Sibling (or parent) whose geometry was missing or uncut
        sibling: NodeIndex,
    },

    /// A node on a reconstruction path has no resolved dimensions
    #[error("node {node} has no resolved dimensions")]
    MissingGeometry {
        /// Node lacking geometry
        node: NodeIndex,
    },

    /// Node index outside the solved tree
    #[error("node {node} out of range (capacity {capacity})")]
    NodeOutOfRange {
        /// Requested node
        node: NodeIndex,
        /// Number of nodes in the tree
        capacity: usize,
    },

    /// Item index outside the occupancy matrix
    #[error("item {item} out of range ({items} item types)")]
    ItemOutOfRange {
        /// Requested item
        item: usize,
        /// Number of item types
        items: usize,
    },

    /// Invalid layout configuration
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}
