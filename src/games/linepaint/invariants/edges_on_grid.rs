//! Edges-on-grid invariant: every drawn edge joins two neighboring cells.

use super::super::PuzzleInProgress;
use super::Invariant;

/// Invariant: Every drawn edge has both endpoints on the grid, one step apart.
pub struct EdgesOnGridInvariant;

impl Invariant<PuzzleInProgress> for EdgesOnGridInvariant {
    fn holds(puzzle: &PuzzleInProgress) -> bool {
        let grid = puzzle.grid();
        puzzle.ledger().iter().all(|edge| {
            grid.contains(edge.start())
                && grid.contains(edge.end())
                && edge.start().is_adjacent(edge.end())
        })
    }

    fn description() -> &'static str {
        "Drawn edges join adjacent cells on the grid"
    }
}
