//! Unique edges invariant: the ledger never holds an edge twice.

use super::super::PuzzleInProgress;
use super::Invariant;

/// Invariant: No two drawn edges are equal, in either direction.
///
/// Toggle removes an existing edge instead of appending a copy, so the
/// ledger behaves as a set.
pub struct UniqueEdgesInvariant;

impl Invariant<PuzzleInProgress> for UniqueEdgesInvariant {
    fn holds(puzzle: &PuzzleInProgress) -> bool {
        let edges = puzzle.ledger().edges();
        edges
            .iter()
            .enumerate()
            .all(|(i, edge)| !edges[i + 1..].contains(edge))
    }

    fn description() -> &'static str {
        "Drawn edges are unique"
    }
}
