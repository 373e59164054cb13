//! Brush-on-grid invariant.

use super::super::PuzzleInProgress;
use super::Invariant;

/// Invariant: The brush always rests on a grid cell.
pub struct BrushOnGridInvariant;

impl Invariant<PuzzleInProgress> for BrushOnGridInvariant {
    fn holds(puzzle: &PuzzleInProgress) -> bool {
        puzzle.grid().contains(puzzle.brush().position())
    }

    fn description() -> &'static str {
        "Brush rests on a grid cell"
    }
}
