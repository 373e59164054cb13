//! Grid coordinate space and 4-directional adjacency.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::level::LevelError;

/// A cell on the puzzle grid.
///
/// Coordinates are signed so that a neighbor one step off the grid is still
/// representable before the bounds check rejects it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Coordinate {
    /// Column, growing rightwards.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coordinate {
    /// Returns the coordinate shifted by the given delta, or `None` if it
    /// leaves the `i32` range.
    pub fn offset(self, (dx, dy): (i32, i32)) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// True when `other` differs by exactly one step on exactly one axis.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y)) == 1
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Swipe direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Towards the top of the screen.
    Up,
    /// Towards the bottom of the screen.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

impl Direction {
    /// Unit delta for this direction under the given axis orientation.
    pub fn delta(self, axis: VerticalAxis) -> (i32, i32) {
        let down = match axis {
            VerticalAxis::YDown => 1,
            VerticalAxis::YUp => -1,
        };
        match self {
            Direction::Up => (0, -down),
            Direction::Down => (0, down),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Returns the reverse direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parses a direction from its name or a WASD key.
    #[instrument]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Which way the `y` axis grows relative to the screen.
///
/// Fixed when the grid is built; decides whether `Up` decrements or
/// increments `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAxis {
    /// Row 0 is the top row; `Up` is `(0, -1)`.
    #[default]
    YDown,
    /// Row 0 is the bottom row; `Up` is `(0, 1)`.
    YUp,
}

/// Spatial position of a cell center, in grid-origin world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellCenter {
    /// Horizontal position.
    pub x: f32,
    /// Depth position (the grid lies on the XZ plane).
    pub z: f32,
}

/// Bounds-checked rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: f32,
    axis: VerticalAxis,
}

impl Grid {
    /// Creates a grid. Both dimensions must be at least one cell.
    #[instrument]
    pub fn new(
        width: u32,
        height: u32,
        cell_size: f32,
        axis: VerticalAxis,
    ) -> Result<Self, LevelError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(LevelError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cell_size,
            axis,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Axis orientation fixed at construction.
    pub fn axis(&self) -> VerticalAxis {
        self.axis
    }

    /// True if the coordinate lies within `[0, width) x [0, height)`.
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    /// Resolves the neighbor of `coord` in `direction`.
    ///
    /// Returns `None` when the neighbor falls outside the grid.
    #[instrument(skip(self))]
    pub fn resolve_neighbor(&self, coord: Coordinate, direction: Direction) -> Option<Coordinate> {
        coord
            .offset(direction.delta(self.axis))
            .filter(|target| self.contains(*target))
    }

    /// World position of the cell center, for rendering collaborators.
    pub fn cell_center(&self, coord: Coordinate) -> CellCenter {
        CellCenter {
            x: coord.x as f32 * self.cell_size,
            z: coord.y as f32 * self.cell_size,
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Coordinate::new(x, y)))
    }
}
