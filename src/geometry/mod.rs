//! Solved geometry and absolute coordinates
//!
//! The solver hands back, per sub-rectangle, a length, a width, a cut
//! flag, and which item types it holds. This module stores that output and
//! turns reconstruction paths into plate coordinates.

mod occupancy;
mod resolve;
mod table;

pub use occupancy::{Occupancy, ASSIGNMENT_THRESHOLD};
pub use resolve::{
    resolve_all, resolve_guillotine, resolve_non_guillotine, Bounds, CoordinateResolver, Point,
};
pub use table::{Cut, Dimensions, Plate, SolvedTree};
