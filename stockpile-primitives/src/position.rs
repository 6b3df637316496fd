//! Position primitives.
#![allow(clippy::module_name_repetitions)]
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The position of some block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}
impl Display for BlockPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockPosition(x = {}, y = {}, z = {})", self.x, self.y, self.z)
    }
}
impl BlockPosition {
    /// Creates a new `BlockPosition` from a
    /// set of coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Represents what world and dimension an object resides in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Location {
    /// The multiworld world ID the object resides in.
    pub world: u32,
    /// The dimension the object resides in.
    pub dimension: i32,
}

impl Location {
    pub const fn new(world: u32, dimension: i32) -> Self {
        Self { world, dimension }
    }
}

/// A column/row pair. Used both for grid dimensions
/// and for the position of a slot within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl GridPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Number of cells in a grid of these dimensions.
    pub const fn area(&self) -> u32 {
        self.x * self.y
    }

    /// Converts a row-major index into a position
    /// within a grid `width` columns wide.
    pub const fn from_index(index: u32, width: u32) -> Self {
        Self {
            x: index % width,
            y: index / width,
        }
    }
}

impl Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::GridPos;

    #[test]
    fn grid_positions() {
        let size = GridPos::new(9, 3);
        assert_eq!(size.area(), 27);
        assert_eq!(GridPos::from_index(0, 9), GridPos::new(0, 0));
        assert_eq!(GridPos::from_index(10, 9), GridPos::new(1, 1));
        assert_eq!(GridPos::from_index(26, 9), GridPos::new(8, 2));
    }
}
