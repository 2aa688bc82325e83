//! Relative positions of a sub-rectangle among its siblings
//!
//! Position = (j - 1) mod k, in child-offset order.
//! Guillotine (k = 4): left, right, top, bottom
//! Non-guillotine (k = 5): top-left, top-right, bottom-right, bottom-left, center

use std::fmt;

/// Closed set of sibling roles for one tree arity
///
/// Implemented by [`GuillotinePosition`] and [`NonGuillotinePosition`]; the
/// tree arithmetic in [`super::index`] is generic over it.
pub trait RelativePosition: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Number of children a cut produces (k)
    const ARITY: usize;

    /// All positions in child-offset order
    const ALL: &'static [Self];

    /// Child offset in `1..=ARITY`
    fn offset(self) -> usize;

    /// Inverse of [`RelativePosition::offset`]
    ///
    /// `offset` must lie in `1..=ARITY`.
    fn from_offset(offset: usize) -> Self {
        debug_assert!((1..=Self::ARITY).contains(&offset), "offset out of range");
        Self::ALL[offset - 1]
    }
}

/// Orientation of a guillotine cut
///
/// A vertical cut yields left/right halves; a horizontal cut yields
/// top/bottom halves. Also used as the direction in which repeated items
/// are laid out inside a sub-rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Axis {
    /// Cut parallel to the y axis
    Vertical,

    /// Cut parallel to the x axis
    Horizontal,
}

/// Sub-rectangle produced by a guillotine cut (k = 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum GuillotinePosition {
    /// Left half of a vertical cut (offset 1)
    Left,

    /// Right half of a vertical cut (offset 2)
    Right,

    /// Top half of a horizontal cut (offset 3)
    Top,

    /// Bottom half of a horizontal cut (offset 4)
    Bottom,
}

impl GuillotinePosition {
    /// Cut orientation that produced this sub-rectangle
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Vertical,
            Self::Top | Self::Bottom => Axis::Horizontal,
        }
    }
}

impl RelativePosition for GuillotinePosition {
    const ARITY: usize = 4;
    const ALL: &'static [Self] = &[Self::Left, Self::Right, Self::Top, Self::Bottom];

    #[inline]
    fn offset(self) -> usize {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Top => 3,
            Self::Bottom => 4,
        }
    }
}

impl fmt::Display for GuillotinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
        };
        f.write_str(name)
    }
}

/// Sub-rectangle produced by a first-order non-guillotine cut (k = 5)
///
/// The four corner pieces are anchored to the corners of the parent; the
/// center piece sits between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum NonGuillotinePosition {
    /// Offset 1
    TopLeft,

    /// Offset 2
    TopRight,

    /// Offset 3
    BottomRight,

    /// Offset 4
    BottomLeft,

    /// Offset 5 (`j mod 5 == 0`)
    Center,
}

impl RelativePosition for NonGuillotinePosition {
    const ARITY: usize = 5;
    const ALL: &'static [Self] = &[
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::Center,
    ];

    #[inline]
    fn offset(self) -> usize {
        match self {
            Self::TopLeft => 1,
            Self::TopRight => 2,
            Self::BottomRight => 3,
            Self::BottomLeft => 4,
            Self::Center => 5,
        }
    }
}

impl fmt::Display for NonGuillotinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "TOPLEFT",
            Self::TopRight => "TOPRIGHT",
            Self::BottomRight => "BOTTOMRIGHT",
            Self::BottomLeft => "BOTTOMLEFT",
            Self::Center => "CENTER",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_match_all_order() {
        for (i, p) in GuillotinePosition::ALL.iter().enumerate() {
            assert_eq!(p.offset(), i + 1);
            assert_eq!(GuillotinePosition::from_offset(i + 1), *p);
        }
        for (i, p) in NonGuillotinePosition::ALL.iter().enumerate() {
            assert_eq!(p.offset(), i + 1);
            assert_eq!(NonGuillotinePosition::from_offset(i + 1), *p);
        }
    }

    #[test]
    fn test_axis_split() {
        assert_eq!(GuillotinePosition::Left.axis(), Axis::Vertical);
        assert_eq!(GuillotinePosition::Right.axis(), Axis::Vertical);
        assert_eq!(GuillotinePosition::Top.axis(), Axis::Horizontal);
        assert_eq!(GuillotinePosition::Bottom.axis(), Axis::Horizontal);
    }
}
