//! Brush cursor that applies one swipe at a time.

use serde::Serialize;
use tracing::{debug, instrument};

use super::edge::Edge;
use super::grid::{Coordinate, Direction, Grid};
use super::ledger::{ConnectionLedger, ToggleResult};

/// A swipe that moved the brush and toggled an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_new::new)]
pub struct BrushStroke {
    /// Swipe direction.
    pub direction: Direction,
    /// Edge between the old and new brush cells, in stroke order.
    pub edge: Edge,
    /// Whether the edge was drawn or erased.
    pub toggle: ToggleResult,
    /// Brush cell after the swipe.
    pub position: Coordinate,
}

impl BrushStroke {
    /// Brush cell before the swipe.
    pub fn from(&self) -> Coordinate {
        self.edge.start()
    }
}

/// Result of applying a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwipeOutcome {
    /// The swipe would leave the grid. Nothing changed.
    Blocked {
        /// Swipe direction.
        direction: Direction,
        /// Unchanged brush cell.
        position: Coordinate,
    },
    /// The brush moved and an edge was toggled.
    Moved(BrushStroke),
}

impl SwipeOutcome {
    /// The stroke, if the brush moved.
    pub fn stroke(&self) -> Option<&BrushStroke> {
        match self {
            SwipeOutcome::Moved(stroke) => Some(stroke),
            SwipeOutcome::Blocked { .. } => None,
        }
    }

    /// True if the swipe hit the grid boundary.
    pub fn is_blocked(&self) -> bool {
        matches!(self, SwipeOutcome::Blocked { .. })
    }
}

/// The brush position for one puzzle.
///
/// The brush is a cursor rather than a pen: it always moves onto the target
/// cell, whether the edge it crosses is drawn or erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrushSession {
    position: Coordinate,
}

impl BrushSession {
    /// Places the brush on its starting cell.
    pub fn new(start: Coordinate) -> Self {
        Self { position: start }
    }

    /// Current brush cell.
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Applies one swipe against `grid`, toggling the crossed edge in `ledger`.
    ///
    /// A swipe off the grid is a normal `Blocked` outcome and mutates nothing.
    #[instrument(skip(self, grid, ledger), fields(from = %self.position))]
    pub fn apply_swipe(
        &mut self,
        direction: Direction,
        grid: &Grid,
        ledger: &mut ConnectionLedger,
    ) -> SwipeOutcome {
        let Some(target) = grid.resolve_neighbor(self.position, direction) else {
            debug!("Swipe blocked by grid boundary");
            return SwipeOutcome::Blocked {
                direction,
                position: self.position,
            };
        };

        let edge = Edge::between_neighbors(self.position, target);
        let toggle = ledger.toggle(edge);
        self.position = target;

        debug!(to = %target, ?toggle, "Brush moved");
        SwipeOutcome::Moved(BrushStroke::new(direction, edge, toggle, target))
    }
}
