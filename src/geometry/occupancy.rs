//! Item-to-sub-rectangle assignment ledger
//!
//! One bit per (item, node) pair, item-major.
//! Bit set ⇔ the solver placed that item type in that sub-rectangle.

use crate::tree::NodeIndex;
use crate::CutError;
use bitvec::prelude::*;

/// Decision values above this are read as "assigned"
pub const ASSIGNMENT_THRESHOLD: f64 = 0.5;

/// Occupancy matrix of a solved layout
///
/// Space: items × nodes bits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    /// Assignment bits, row `item`, column `node`
    assigned: BitVec,

    /// Number of item types (rows)
    items: usize,

    /// Number of sub-rectangles (columns)
    nodes: usize,
}

impl Occupancy {
    /// Empty matrix for `items` item types over `nodes` sub-rectangles
    ///
    /// # Panics
    /// Panics when `items * nodes` overflows; use [`Occupancy::try_new`]
    /// for untrusted sizes.
    pub fn new(items: usize, nodes: usize) -> Self {
        Self::try_new(items, nodes).expect("occupancy matrix size overflows usize")
    }

    /// Empty matrix, failing when `items * nodes` bits cannot be addressed
    pub fn try_new(items: usize, nodes: usize) -> Result<Self, CutError> {
        let bits = items.checked_mul(nodes).ok_or_else(|| {
            CutError::InvalidConfig(format!(
                "occupancy matrix of {} items x {} nodes overflows",
                items, nodes
            ))
        })?;
        Ok(Self {
            assigned: bitvec![0; bits],
            items,
            nodes,
        })
    }

    /// Build from explicit `(item, node)` pairs
    pub fn from_pairs<I>(items: usize, nodes: usize, pairs: I) -> Result<Self, CutError>
    where
        I: IntoIterator<Item = (usize, NodeIndex)>,
    {
        let mut occupancy = Self::try_new(items, nodes)?;
        for (item, node) in pairs {
            occupancy.assign(item, node)?;
        }
        Ok(occupancy)
    }

    /// Build by thresholding relaxed decision values, one row per item type
    ///
    /// A value counts as assigned when it is strictly above
    /// [`ASSIGNMENT_THRESHOLD`]. `NaN` (no value reported) never counts.
    /// Rows may differ in length; the widest row sets the node count.
    ///
    /// # Panics
    /// Panics when rows × widest row overflows, as [`Occupancy::new`] does.
    pub fn from_decisions<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let nodes = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
        let mut occupancy = Self::new(rows.len(), nodes);

        for (item, row) in rows.iter().enumerate() {
            for (node, &value) in row.as_ref().iter().enumerate() {
                if value > ASSIGNMENT_THRESHOLD {
                    occupancy.assigned.set(item * nodes + node, true);
                }
            }
        }

        occupancy
    }

    /// Mark `item` as placed in `node`
    pub fn assign(&mut self, item: usize, node: NodeIndex) -> Result<(), CutError> {
        let idx = self.bit_index(item, node)?;
        self.assigned.set(idx, true);
        Ok(())
    }

    /// Whether `item` is placed in `node` (false when out of range)
    pub fn is_assigned(&self, item: usize, node: NodeIndex) -> bool {
        self.bit_index(item, node)
            .map(|idx| self.assigned[idx])
            .unwrap_or(false)
    }

    /// Occupied pairs, item-major then node ascending
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeIndex)> + '_ {
        let nodes = self.nodes;
        self.assigned.iter_ones().map(move |bit| (bit / nodes, bit % nodes))
    }

    /// Number of occupied pairs
    pub fn count(&self) -> usize {
        self.assigned.count_ones()
    }

    /// Number of item types
    pub fn items(&self) -> usize {
        self.items
    }

    /// Number of sub-rectangles
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    fn bit_index(&self, item: usize, node: NodeIndex) -> Result<usize, CutError> {
        if item >= self.items {
            return Err(CutError::ItemOutOfRange {
                item,
                items: self.items,
            });
        }
        if node >= self.nodes {
            return Err(CutError::NodeOutOfRange {
                node,
                capacity: self.nodes,
            });
        }
        Ok(item * self.nodes + node)
    }
}
