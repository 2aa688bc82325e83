//! Layout configuration
//!
//! Parameters consumed by the tree algebra: arity, tree height, whether
//! the plate is rotated, and an optional cap on cutting stages.

use std::fmt;
use std::str::FromStr;

use crate::geometry::Plate;
use crate::tree::{checked_capacity, GuillotinePosition, NonGuillotinePosition};
use crate::CutError;

/// Which Floating-Cuts tree is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Arity {
    /// Guillotine cuts, four children per node
    Guillotine,

    /// First-order non-guillotine cuts, five children per node
    NonGuillotine,
}

impl Arity {
    /// Children per cut node (k)
    pub fn children(self) -> usize {
        match self {
            Arity::Guillotine => 4,
            Arity::NonGuillotine => 5,
        }
    }

    /// Nodes in a tree of this arity with the given height
    pub fn capacity(self, height: usize) -> Option<usize> {
        match self {
            Arity::Guillotine => checked_capacity::<GuillotinePosition>(height),
            Arity::NonGuillotine => checked_capacity::<NonGuillotinePosition>(height),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.children())
    }
}

impl FromStr for Arity {
    type Err = CutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" | "arcs4" | "guillotine" => Ok(Arity::Guillotine),
            "5" | "arcs5" | "non-guillotine" => Ok(Arity::NonGuillotine),
            other => Err(CutError::InvalidConfig(format!(
                "unknown arity '{other}' (expected 4 or 5)"
            ))),
        }
    }
}

/// Configuration of a solved layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Tree variant
    pub arity: Arity,

    /// Tree height h (root = level 0)
    pub height: usize,

    /// Stock plate
    pub plate: Plate,

    /// Plate turned by 90° (guillotine only)
    pub rotated: bool,

    /// Maximum number of cutting stages (guillotine only)
    pub stage_limit: Option<usize>,
}

impl LayoutConfig {
    /// Configuration for a plate with no rotation and no stage limit
    pub fn new(arity: Arity, height: usize, plate: Plate) -> Self {
        Self {
            arity,
            height,
            plate,
            rotated: false,
            stage_limit: None,
        }
    }

    /// Set plate rotation
    pub fn with_rotation(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Cap the number of cutting stages
    pub fn with_stage_limit(mut self, limit: usize) -> Self {
        self.stage_limit = Some(limit);
        self
    }

    /// Number of nodes in the configured tree
    pub fn capacity(&self) -> Result<usize, CutError> {
        self.arity.capacity(self.height).ok_or_else(|| {
            CutError::InvalidConfig(format!(
                "tree height {} overflows node capacity",
                self.height
            ))
        })
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), CutError> {
        self.capacity()?;

        if self.plate.length == 0 || self.plate.width == 0 {
            return Err(CutError::InvalidConfig(format!(
                "plate {} has zero area",
                self.plate
            )));
        }
        if self.arity == Arity::NonGuillotine && self.rotated {
            return Err(CutError::InvalidConfig(
                "rotation is only supported for guillotine trees".to_string(),
            ));
        }
        if self.arity == Arity::NonGuillotine && self.stage_limit.is_some() {
            return Err(CutError::InvalidConfig(
                "stage limits are only defined for guillotine trees".to_string(),
            ));
        }

        Ok(())
    }
}
