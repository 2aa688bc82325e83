//! Sub-rectangle index arithmetic
//!
//! Node j (not a leaf) has k children: k·j + 1, ..., k·j + k
//! Parent: (j - offset(j)) / k
//! Capacity of a tree with levels 0..=h: M(h) = Σ k^i
//!
//! Everything here is integer arithmetic on the index alone. No tree is
//! ever materialized.

use super::position::{Axis, GuillotinePosition, RelativePosition};
use super::NodeIndex;
use crate::CutError;

/// Child offset of a non-root node: `(j - 1) mod k + 1`
#[inline]
fn offset_of(j: NodeIndex, arity: usize) -> usize {
    debug_assert!(j > 0, "root has no offset");
    (j - 1) % arity + 1
}

/// Parent of a non-root node
#[inline]
fn parent_of(j: NodeIndex, arity: usize) -> NodeIndex {
    (j - offset_of(j, arity)) / arity
}

/// Number of nodes in a tree with levels `0..=height`: `Σ_{i=0}^{h} k^i`
///
/// # Panics
/// Panics on overflow; use [`checked_capacity`] for untrusted heights.
pub fn capacity<P: RelativePosition>(height: usize) -> usize {
    checked_capacity::<P>(height).expect("tree capacity overflows usize")
}

/// Overflow-checked [`capacity`]
pub fn checked_capacity<P: RelativePosition>(height: usize) -> Option<usize> {
    let mut total: usize = 1;
    let mut power: usize = 1;
    for _ in 0..height {
        power = power.checked_mul(P::ARITY)?;
        total = total.checked_add(power)?;
    }
    Some(total)
}

/// Index of the child of `j` at `position`: `k·j + offset`
///
/// No bounds check: callers compare against [`capacity`] before use.
#[inline]
pub fn child<P: RelativePosition>(j: NodeIndex, position: P) -> NodeIndex {
    P::ARITY * j + position.offset()
}

/// All children of `j` in offset order
pub fn children<P: RelativePosition>(j: NodeIndex) -> impl Iterator<Item = NodeIndex> {
    P::ALL.iter().map(move |&position| child(j, position))
}

/// Relative position of `j` among its siblings
///
/// Fails with [`CutError::RootHasNoPosition`] for the root.
pub fn relative_position<P: RelativePosition>(j: NodeIndex) -> Result<P, CutError> {
    if j == 0 {
        return Err(CutError::RootHasNoPosition);
    }
    Ok(P::from_offset(offset_of(j, P::ARITY)))
}

/// Parent of `j`, the inverse of [`child`]
///
/// Fails with [`CutError::RootHasNoPosition`] for the root.
pub fn parent<P: RelativePosition>(j: NodeIndex) -> Result<NodeIndex, CutError> {
    let position: P = relative_position(j)?;
    Ok((j - position.offset()) / P::ARITY)
}

/// Ancestors of `j`, nearest first, ending with the root
///
/// Empty for the root itself.
pub fn ancestors<P: RelativePosition>(j: NodeIndex) -> impl Iterator<Item = NodeIndex> {
    let first = (j != 0).then(|| parent_of(j, P::ARITY));
    std::iter::successors(first, |&node| (node != 0).then(|| parent_of(node, P::ARITY)))
}

/// Depth of `j`: the smallest `h` with `j < capacity(h)`
pub fn level<P: RelativePosition>(j: NodeIndex) -> usize {
    let mut height = 0;
    let mut total: usize = 1;
    let mut power: usize = 1;

    while j >= total {
        power = power.saturating_mul(P::ARITY);
        total = total.saturating_add(power);
        height += 1;
        if total == usize::MAX {
            break;
        }
    }

    height
}

/// Number of cutting stages needed to reach `j` (guillotine trees only)
///
/// The root needs 0 stages. Any other node starts at 1, and walking up
/// from `j` every step where the cut orientation of a node differs from
/// that of its parent opens a new stage. The plate itself counts as a
/// horizontal piece, so the top/bottom children of the root are stage 1
/// and its left/right children stage 2.
///
/// The non-guillotine tree has no staged-cutting notion, so this is only
/// defined over [`GuillotinePosition`].
pub fn stages(j: NodeIndex) -> usize {
    const K: usize = GuillotinePosition::ARITY;

    if j == 0 {
        return 0;
    }

    let axis_of = |node: NodeIndex| match node {
        0 => Axis::Horizontal,
        _ => GuillotinePosition::from_offset(offset_of(node, K)).axis(),
    };

    let mut count = 1;
    let mut node = j;
    while node != 0 {
        let up = parent_of(node, K);
        if axis_of(up) != axis_of(node) {
            count += 1;
        }
        node = up;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::position::NonGuillotinePosition;
    use GuillotinePosition::*;

    #[test]
    fn test_capacity_small_heights() {
        assert_eq!(capacity::<GuillotinePosition>(0), 1);
        assert_eq!(capacity::<GuillotinePosition>(1), 5);
        assert_eq!(capacity::<GuillotinePosition>(2), 21);
        assert_eq!(capacity::<NonGuillotinePosition>(1), 6);
        assert_eq!(capacity::<NonGuillotinePosition>(2), 31);
    }

    #[test]
    fn test_checked_capacity_overflow() {
        assert!(checked_capacity::<GuillotinePosition>(200).is_none());
        assert!(checked_capacity::<NonGuillotinePosition>(10).is_some());
    }

    #[test]
    fn test_children_of_root() {
        let kids: Vec<_> = children::<GuillotinePosition>(0).collect();
        assert_eq!(kids, vec![1, 2, 3, 4]);
        let kids: Vec<_> = children::<NonGuillotinePosition>(1).collect();
        assert_eq!(kids, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_root_is_out_of_domain() {
        assert_eq!(
            relative_position::<GuillotinePosition>(0),
            Err(CutError::RootHasNoPosition)
        );
        assert_eq!(
            parent::<NonGuillotinePosition>(0),
            Err(CutError::RootHasNoPosition)
        );
    }

    #[test]
    fn test_bottom_is_multiple_of_four() {
        assert_eq!(relative_position::<GuillotinePosition>(4), Ok(Bottom));
        assert_eq!(relative_position::<GuillotinePosition>(8), Ok(Bottom));
        assert_eq!(parent::<GuillotinePosition>(8), Ok(1));
        assert_eq!(
            relative_position::<NonGuillotinePosition>(10),
            Ok(NonGuillotinePosition::Center)
        );
        assert_eq!(parent::<NonGuillotinePosition>(10), Ok(1));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level::<GuillotinePosition>(0), 0);
        assert_eq!(level::<GuillotinePosition>(1), 1);
        assert_eq!(level::<GuillotinePosition>(4), 1);
        assert_eq!(level::<GuillotinePosition>(5), 2);
        assert_eq!(level::<GuillotinePosition>(20), 2);
        assert_eq!(level::<GuillotinePosition>(21), 3);
        assert_eq!(level::<NonGuillotinePosition>(5), 1);
        assert_eq!(level::<NonGuillotinePosition>(6), 2);
        assert!(level::<GuillotinePosition>(usize::MAX) >= 16);
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let up: Vec<_> = ancestors::<GuillotinePosition>(57).collect();
        assert_eq!(up, vec![14, 3, 0]);
        assert_eq!(ancestors::<GuillotinePosition>(0).count(), 0);
    }

    #[test]
    fn test_stage_counting() {
        assert_eq!(stages(0), 0);
        assert_eq!(stages(child(0, Top)), 1);
        assert_eq!(stages(child(0, Bottom)), 1);
        assert_eq!(stages(child(0, Left)), 2);
        assert_eq!(stages(child(0, Right)), 2);
        assert_eq!(stages(child(child(0, Top), Left)), 2);
        // two vertical cuts then a horizontal one
        let j = child(child(child(0, Top), Left), Right);
        assert_eq!(stages(j), 2);
        // vertical pieces of the plate inherit its extra stage
        assert_eq!(stages(child(child(0, Left), Right)), 2);
        // alternating all the way down
        let j = child(child(child(0, Left), Top), Right);
        assert_eq!(stages(j), 4);
    }
}
