//! Placements of items on the plate
//!
//! A placement is the anchor of the first copy of an item type inside its
//! sub-rectangle, plus how many copies follow and in which direction.
//! SKP solutions place exactly one copy; SLOPP solutions may stack copies
//! horizontally (along x) or vertically (along y).

use crate::geometry::{Dimensions, Plate, Point};
use crate::tree::{Axis, NodeIndex, Paths, RelativePosition};
use crate::CutError;

/// One item type placed in one sub-rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Placement {
    /// Item type
    pub item: usize,

    /// Occupied sub-rectangle
    pub node: NodeIndex,

    /// Bottom-left corner of the first copy
    pub origin: Point,

    /// Direction in which copies are laid out
    pub direction: Axis,

    /// Number of copies
    pub repetitions: u32,
}

/// A single placed copy of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ItemRect {
    /// Item type
    pub item: usize,

    /// Bottom-left corner
    pub origin: Point,

    /// Size of the copy
    pub dimensions: Dimensions,
}

impl Placement {
    /// Single copy at `origin`
    pub fn new(item: usize, node: NodeIndex, origin: Point) -> Self {
        Self {
            item,
            node,
            origin,
            direction: Axis::Horizontal,
            repetitions: 1,
        }
    }

    /// Set direction and number of copies
    pub fn with_repetitions(mut self, direction: Axis, repetitions: u32) -> Self {
        self.direction = direction;
        self.repetitions = repetitions;
        self
    }

    /// Direction and copy count from the solver's repetition variables
    ///
    /// `repeats` holds the (vertical, horizontal) repetition values of this
    /// (item, node) pair; `None` for models without them (SKP), which always
    /// place one copy. Vertical wins when its value exceeds 0.5; counts are
    /// truncated.
    pub fn direction_and_repetitions(repeats: Option<(f64, f64)>) -> (Axis, u32) {
        match repeats {
            None => (Axis::Horizontal, 1),
            Some((vertical, _)) if vertical > 0.5 => (Axis::Vertical, vertical as u32),
            Some((_, horizontal)) => (Axis::Horizontal, horizontal as u32),
        }
    }

    /// Single-copy placements for reconstructed paths and their anchors
    ///
    /// `origins` must be parallel to `paths` (as returned by
    /// [`crate::resolve_all`]).
    pub fn from_paths<P: RelativePosition>(paths: &Paths<P>, origins: &[Point]) -> Vec<Self> {
        debug_assert_eq!(paths.len(), origins.len(), "origins must match paths");
        paths
            .items()
            .iter()
            .zip(paths.nodes())
            .zip(origins)
            .map(|((&item, &node), &origin)| Self::new(item, node, origin))
            .collect()
    }

    /// Every copy of the item, starting at the anchor
    pub fn copies(&self, item: Dimensions) -> impl Iterator<Item = ItemRect> + '_ {
        let (dx, dy) = match self.direction {
            Axis::Horizontal => (i64::from(item.length), 0),
            Axis::Vertical => (0, i64::from(item.width)),
        };

        (0..i64::from(self.repetitions)).map(move |k| ItemRect {
            item: self.item,
            origin: Point::new(self.origin.x + k * dx, self.origin.y + k * dy),
            dimensions: item,
        })
    }
}

/// Share of the plate area covered by all placed copies
///
/// `items[i]` is the size of item type `i`.
pub fn packing_density(
    placements: &[Placement],
    items: &[Dimensions],
    plate: Plate,
) -> Result<f64, CutError> {
    let mut covered: u64 = 0;
    for placement in placements {
        let item = items.get(placement.item).ok_or(CutError::ItemOutOfRange {
            item: placement.item,
            items: items.len(),
        })?;
        covered += item.area() * u64::from(placement.repetitions);
    }

    if plate.area() == 0 {
        return Ok(0.0);
    }
    Ok(covered as f64 / plate.area() as f64)
}

/// Upper bound on copies of `item` fitting the plate by area alone
pub fn area_bound(plate: Plate, item: Dimensions) -> u64 {
    match item.area() {
        0 => 0,
        area => plate.area() / area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rules() {
        assert_eq!(Placement::direction_and_repetitions(None), (Axis::Horizontal, 1));
        assert_eq!(
            Placement::direction_and_repetitions(Some((3.0, 0.0))),
            (Axis::Vertical, 3)
        );
        assert_eq!(
            Placement::direction_and_repetitions(Some((0.5, 2.9999))),
            (Axis::Horizontal, 2)
        );
    }

    #[test]
    fn test_copies_advance_along_direction() {
        let item = Dimensions::new(10, 4);
        let placement = Placement::new(0, 3, Point::new(5, 20)).with_repetitions(Axis::Vertical, 3);

        let origins: Vec<_> = placement.copies(item).map(|r| r.origin).collect();
        assert_eq!(origins, vec![Point::new(5, 20), Point::new(5, 24), Point::new(5, 28)]);

        let placement = placement.with_repetitions(Axis::Horizontal, 2);
        let origins: Vec<_> = placement.copies(item).map(|r| r.origin).collect();
        assert_eq!(origins, vec![Point::new(5, 20), Point::new(15, 20)]);
    }

    #[test]
    fn test_packing_density() {
        let items = [Dimensions::new(10, 10), Dimensions::new(20, 5)];
        let placements = [
            Placement::new(0, 1, Point::default()).with_repetitions(Axis::Horizontal, 2),
            Placement::new(1, 2, Point::new(20, 0)),
        ];
        let density = packing_density(&placements, &items, Plate::new(40, 10)).unwrap();
        assert!((density - 0.75).abs() < 1e-12);

        let stray = [Placement::new(5, 1, Point::default())];
        assert!(packing_density(&stray, &items, Plate::new(40, 10)).is_err());
    }

    #[test]
    fn test_area_bound() {
        assert_eq!(area_bound(Plate::new(100, 50), Dimensions::new(30, 20)), 8);
        assert_eq!(area_bound(Plate::new(100, 50), Dimensions::new(0, 20)), 0);
    }
}
