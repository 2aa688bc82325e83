//! Coordinate replay
//!
//! Start from the plate's bounding box and replay a path root-to-leaf.
//! Each step narrows the box to the sub-rectangle it names; after the last
//! step the box's bottom-left corner is the item's anchor.
//!
//! Guillotine steps move one bound. Non-guillotine steps move two, and the
//! CENTER step also reads the sibling corner pieces from the solved table.

use std::fmt;

use tracing::{debug_span, trace};

use super::table::{Plate, SolvedTree};
use crate::tree::{
    child, GuillotinePosition, NodeIndex, NonGuillotinePosition, Path, PathStep, Paths,
    RelativePosition,
};
use crate::CutError;

/// Absolute position on the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Point {
    /// Along the plate length
    pub x: i64,

    /// Along the plate width
    pub y: i64,
}

impl Point {
    /// Construct a point
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned box being narrowed during replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest x
    pub left: i64,
    /// Largest x
    pub right: i64,
    /// Smallest y
    pub bottom: i64,
    /// Largest y
    pub top: i64,
}

impl Bounds {
    /// Box covering the whole plate, turned by 90° when `rotated`
    pub fn for_plate(plate: Plate, rotated: bool) -> Self {
        let plate = if rotated { plate.rotated() } else { plate };
        Self {
            left: 0,
            right: i64::from(plate.length),
            bottom: 0,
            top: i64::from(plate.width),
        }
    }

    /// Bottom-left corner
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    fn keep_left(&mut self, length: u32) {
        self.right = self.left + i64::from(length);
    }

    fn keep_right(&mut self, length: u32) {
        self.left = self.right - i64::from(length);
    }

    fn keep_bottom(&mut self, width: u32) {
        self.top = self.bottom + i64::from(width);
    }

    fn keep_top(&mut self, width: u32) {
        self.bottom = self.top - i64::from(width);
    }
}

/// Per-position narrowing rule
///
/// Implemented by both position types so that [`resolve_all`] can replay
/// paths of either tree.
pub trait CoordinateResolver: RelativePosition {
    /// Box the replay starts from
    fn initial_bounds(plate: Plate, rotated: bool) -> Result<Bounds, CutError>;

    /// Narrow `bounds` to the sub-rectangle named by `step`
    fn narrow(
        bounds: &mut Bounds,
        step: &PathStep<Self>,
        solved: &SolvedTree<Self>,
    ) -> Result<(), CutError>;
}

impl CoordinateResolver for GuillotinePosition {
    fn initial_bounds(plate: Plate, rotated: bool) -> Result<Bounds, CutError> {
        Ok(Bounds::for_plate(plate, rotated))
    }

    fn narrow(
        bounds: &mut Bounds,
        step: &PathStep<Self>,
        _solved: &SolvedTree<Self>,
    ) -> Result<(), CutError> {
        narrow_guillotine(bounds, step);
        Ok(())
    }
}

impl CoordinateResolver for NonGuillotinePosition {
    /// Fails with [`CutError::InvalidConfig`] when `rotated` is set: the
    /// non-guillotine tree has no rotation variant.
    fn initial_bounds(plate: Plate, rotated: bool) -> Result<Bounds, CutError> {
        if rotated {
            return Err(CutError::InvalidConfig(
                "plate rotation is only defined for guillotine trees".to_string(),
            ));
        }
        Ok(Bounds::for_plate(plate, false))
    }

    fn narrow(
        bounds: &mut Bounds,
        step: &PathStep<Self>,
        solved: &SolvedTree<Self>,
    ) -> Result<(), CutError> {
        use NonGuillotinePosition::*;

        match step.position {
            TopLeft => {
                bounds.keep_left(step.length);
                bounds.keep_top(step.width);
            }
            TopRight => {
                bounds.keep_right(step.length);
                bounds.keep_top(step.width);
            }
            BottomRight => {
                bounds.keep_right(step.length);
                bounds.keep_bottom(step.width);
            }
            BottomLeft => {
                bounds.keep_left(step.length);
                bounds.keep_bottom(step.width);
            }
            Center => {
                let (offset_x, offset_y) = center_offset(step, solved)?;
                bounds.left += offset_x;
                bounds.bottom += offset_y;
                bounds.keep_left(step.length);
                bounds.keep_bottom(step.width);
            }
        }
        Ok(())
    }
}

fn narrow_guillotine(bounds: &mut Bounds, step: &PathStep<GuillotinePosition>) {
    match step.position {
        GuillotinePosition::Left => bounds.keep_left(step.length),
        GuillotinePosition::Right => bounds.keep_right(step.length),
        GuillotinePosition::Bottom => bounds.keep_bottom(step.width),
        GuillotinePosition::Top => bounds.keep_top(step.width),
    }
}

/// Shift of a CENTER piece: length of the top-left sibling along x,
/// width of the bottom-left sibling along y
///
/// Only meaningful under a cut parent; an uncut parent has no corner
/// pieces to offset against.
fn center_offset(
    step: &PathStep<NonGuillotinePosition>,
    solved: &SolvedTree<NonGuillotinePosition>,
) -> Result<(i64, i64), CutError> {
    let inconsistent = |sibling: NodeIndex| CutError::InconsistentGeometry {
        node: step.node,
        sibling,
    };

    if !solved.cut(step.parent).is_cut() {
        return Err(inconsistent(step.parent));
    }

    let top_left = child(step.parent, NonGuillotinePosition::TopLeft);
    let bottom_left = child(step.parent, NonGuillotinePosition::BottomLeft);
    let tl = solved.dimensions(top_left).ok_or_else(|| inconsistent(top_left))?;
    let bl = solved.dimensions(bottom_left).ok_or_else(|| inconsistent(bottom_left))?;

    Ok((i64::from(tl.length), i64::from(bl.width)))
}

/// Anchor of an item in a guillotine tree
///
/// `rotated` swaps the plate's length and width for the initial box only.
/// An empty path (item on the root) resolves to the origin.
pub fn resolve_guillotine(path: &Path<GuillotinePosition>, plate: Plate, rotated: bool) -> Point {
    let mut bounds = Bounds::for_plate(plate, rotated);
    for step in path.replay() {
        narrow_guillotine(&mut bounds, step);
    }
    bounds.origin()
}

/// Anchor of an item in a non-guillotine tree
///
/// Fails with [`CutError::InconsistentGeometry`] when a CENTER step's
/// parent was not cut or its corner siblings are unresolved.
pub fn resolve_non_guillotine(
    path: &Path<NonGuillotinePosition>,
    plate: Plate,
    solved: &SolvedTree<NonGuillotinePosition>,
) -> Result<Point, CutError> {
    replay(path, NonGuillotinePosition::initial_bounds(plate, false)?, solved)
}

fn replay<P: CoordinateResolver>(
    path: &Path<P>,
    mut bounds: Bounds,
    solved: &SolvedTree<P>,
) -> Result<Point, CutError> {
    for step in path.replay() {
        P::narrow(&mut bounds, step, solved)?;
        trace!(node = step.node, position = %step.position, ?bounds, "narrowed");
    }
    Ok(bounds.origin())
}

/// Anchors for every reconstructed path, in path order
///
/// `rotated` is only accepted for guillotine trees; see
/// [`CoordinateResolver::initial_bounds`].
pub fn resolve_all<P: CoordinateResolver>(
    paths: &Paths<P>,
    plate: Plate,
    rotated: bool,
    solved: &SolvedTree<P>,
) -> Result<Vec<Point>, CutError> {
    let span = debug_span!("resolve_all", arity = P::ARITY, placements = paths.len());
    let _enter = span.enter();

    let bounds = P::initial_bounds(plate, rotated)?;
    paths
        .paths()
        .iter()
        .map(|path| replay(path, bounds, solved))
        .collect()
}
