//! Phase-specific typestate structs for a line-paint puzzle.
//!
//! Each phase is its own type. A `PuzzleSolved` has no swipe operation, so
//! a solved puzzle cannot be completed, and rewarded, a second time.

use super::brush::{BrushSession, BrushStroke, SwipeOutcome};
use super::contracts::assert_invariants;
use super::display::render;
use super::grid::{Direction, Grid, VerticalAxis};
use super::ledger::ConnectionLedger;
use super::level::{LevelDefinition, LevelError};
use super::rules::{is_complete, missing_edges};
use super::Edge;
use tracing::{info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle ready to start: grid built, nothing drawn.
#[derive(Debug, Clone)]
pub struct PuzzleSetup {
    level: LevelDefinition,
    grid: Grid,
}

impl PuzzleSetup {
    /// Builds the grid for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the level's dimensions cannot form a grid.
    #[instrument(skip(level), fields(width = level.width(), height = level.height()))]
    pub fn new(level: LevelDefinition, cell_size: f32, axis: VerticalAxis) -> Result<Self, LevelError> {
        let grid = Grid::new(*level.width(), *level.height(), cell_size, axis)?;
        Ok(Self { level, grid })
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The level being played.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// Places the brush on its start cell with an empty drawing.
    #[instrument(skip(self))]
    pub fn start(self) -> PuzzleInProgress {
        PuzzleInProgress {
            brush: BrushSession::new(*self.level.brush_start()),
            ledger: ConnectionLedger::new(),
            strokes: Vec::new(),
            level: self.level,
            grid: self.grid,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle being drawn. Never complete: the swipe that completes it
/// transitions to [`PuzzleSolved`].
#[derive(Debug, Clone)]
pub struct PuzzleInProgress {
    pub(super) level: LevelDefinition,
    pub(super) grid: Grid,
    pub(super) brush: BrushSession,
    pub(super) ledger: ConnectionLedger,
    pub(super) strokes: Vec<BrushStroke>,
}

impl PuzzleInProgress {
    /// Applies a swipe, consuming self and returning the next phase.
    ///
    /// Completion is only evaluated after a toggle. Since an in-progress
    /// puzzle is never complete, reaching `Solved` is always a transition
    /// from incomplete to complete.
    #[instrument(skip(self), fields(brush = %self.brush.position(), drawn = self.ledger.size()))]
    pub fn swipe(self, direction: Direction) -> SwipeTransition {
        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut puzzle = self;
        let outcome = puzzle
            .brush
            .apply_swipe(direction, &puzzle.grid, &mut puzzle.ledger);

        #[cfg(debug_assertions)]
        debug_assert!(
            super::contracts::SwipeContract::post(&before, &puzzle, &outcome).is_ok(),
            "Swipe postcondition violated"
        );

        let Some(stroke) = outcome.stroke() else {
            return SwipeTransition::InProgress { puzzle, outcome };
        };
        puzzle.strokes.push(*stroke);

        if is_complete(&puzzle.ledger, puzzle.level.target()) {
            info!(strokes = puzzle.strokes.len(), "Puzzle solved");
            return SwipeTransition::Solved {
                puzzle: PuzzleSolved {
                    level: puzzle.level,
                    grid: puzzle.grid,
                    brush: puzzle.brush,
                    ledger: puzzle.ledger,
                    strokes: puzzle.strokes,
                },
                outcome,
            };
        }

        assert_invariants(&puzzle);
        SwipeTransition::InProgress { puzzle, outcome }
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The level being played.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// The brush.
    pub fn brush(&self) -> &BrushSession {
        &self.brush
    }

    /// The current drawing.
    pub fn ledger(&self) -> &ConnectionLedger {
        &self.ledger
    }

    /// Strokes applied so far, oldest first. Blocked swipes are not recorded.
    pub fn strokes(&self) -> &[BrushStroke] {
        &self.strokes
    }

    /// Target edges not yet drawn.
    pub fn missing(&self) -> Vec<Edge> {
        missing_edges(&self.ledger, self.level.target())
    }

    /// ASCII view of the drawing with the brush marked `@`.
    pub fn display(&self) -> String {
        render(&self.grid, self.ledger.edges(), Some(self.brush.position()))
    }

    /// Replays swipes from the level's start.
    ///
    /// Stops at the swipe that solves the puzzle; later swipes are ignored.
    #[instrument(skip(setup))]
    pub fn replay(setup: PuzzleSetup, directions: &[Direction]) -> PuzzleResult {
        let mut puzzle = setup.start();

        for &direction in directions {
            match puzzle.swipe(direction) {
                SwipeTransition::InProgress { puzzle: next, .. } => puzzle = next,
                SwipeTransition::Solved { puzzle, .. } => return PuzzleResult::Solved(puzzle),
            }
        }

        PuzzleResult::InProgress(puzzle)
    }
}

// ─────────────────────────────────────────────────────────────
//  Solved Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle whose drawing matches the target exactly.
#[derive(Debug, Clone)]
pub struct PuzzleSolved {
    level: LevelDefinition,
    grid: Grid,
    brush: BrushSession,
    ledger: ConnectionLedger,
    strokes: Vec<BrushStroke>,
}

impl PuzzleSolved {
    /// The level that was solved.
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Final brush position.
    pub fn brush(&self) -> &BrushSession {
        &self.brush
    }

    /// The winning drawing.
    pub fn ledger(&self) -> &ConnectionLedger {
        &self.ledger
    }

    /// Strokes that solved the puzzle, oldest first.
    pub fn strokes(&self) -> &[BrushStroke] {
        &self.strokes
    }

    /// ASCII view of the finished drawing.
    pub fn display(&self) -> String {
        render(&self.grid, self.ledger.edges(), Some(self.brush.position()))
    }

    /// Returns the same level to its setup phase.
    #[instrument(skip(self))]
    pub fn restart(self) -> PuzzleSetup {
        PuzzleSetup {
            level: self.level,
            grid: self.grid,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Type
// ─────────────────────────────────────────────────────────────

/// Result of a swipe on an in-progress puzzle.
#[derive(Debug)]
pub enum SwipeTransition {
    /// Puzzle continues.
    InProgress {
        /// Next state.
        puzzle: PuzzleInProgress,
        /// What the swipe did.
        outcome: SwipeOutcome,
    },
    /// This swipe completed the puzzle.
    Solved {
        /// Final state.
        puzzle: PuzzleSolved,
        /// What the swipe did.
        outcome: SwipeOutcome,
    },
}

impl SwipeTransition {
    /// What the swipe did.
    pub fn outcome(&self) -> &SwipeOutcome {
        match self {
            SwipeTransition::InProgress { outcome, .. } | SwipeTransition::Solved { outcome, .. } => {
                outcome
            }
        }
    }

    /// True if this swipe completed the puzzle.
    pub fn is_solved(&self) -> bool {
        matches!(self, SwipeTransition::Solved { .. })
    }
}

/// Phase reached after a sequence of swipes.
#[derive(Debug)]
pub enum PuzzleResult {
    /// Puzzle continues.
    InProgress(PuzzleInProgress),
    /// Puzzle solved.
    Solved(PuzzleSolved),
}
