//! Contract-based validation for swipes.
//!
//! A swipe has no preconditions: any direction is acceptable and a swipe
//! off the grid is a normal outcome. Postconditions relate the puzzle
//! before and after the swipe to the reported outcome.

use super::brush::SwipeOutcome;
use super::invariants::{InvariantSet, InvariantViolation, LinePaintInvariants};
use super::ledger::ToggleResult;
use super::typestate::PuzzleInProgress;
use tracing::{instrument, warn};

/// Postcondition: a blocked swipe mutated nothing.
pub struct BlockedIsNoOp;

impl BlockedIsNoOp {
    /// Checks the postcondition.
    #[instrument(skip_all)]
    pub fn holds(before: &PuzzleInProgress, after: &PuzzleInProgress) -> bool {
        let valid = before.brush() == after.brush() && before.ledger().edges() == after.ledger().edges();
        if !valid {
            warn!("Blocked swipe mutated the puzzle");
        }
        valid
    }
}

/// Postcondition: a stroke changed the ledger by exactly one edge and left
/// the brush where the outcome says.
pub struct StrokeToggledOnce;

impl StrokeToggledOnce {
    /// Checks the postcondition.
    #[instrument(skip_all)]
    pub fn holds(before: &PuzzleInProgress, after: &PuzzleInProgress, outcome: &SwipeOutcome) -> bool {
        let Some(stroke) = outcome.stroke() else {
            return true;
        };

        let (size_before, size_after) = (before.ledger().size(), after.ledger().size());
        let size_ok = match stroke.toggle {
            ToggleResult::Added => size_after == size_before + 1,
            ToggleResult::Removed => size_after + 1 == size_before,
        };
        let presence_ok = match stroke.toggle {
            ToggleResult::Added => after.ledger().contains(&stroke.edge),
            ToggleResult::Removed => !after.ledger().contains(&stroke.edge),
        };
        let brush_ok = after.brush().position() == stroke.position
            && stroke.from() == before.brush().position();

        let valid = size_ok && presence_ok && brush_ok;
        if !valid {
            warn!(size_before, size_after, size_ok, presence_ok, brush_ok, "Stroke postcondition violated");
        }
        valid
    }
}

/// Contract for swipe actions.
pub struct SwipeContract;

impl SwipeContract {
    /// Verifies the outcome-specific postcondition and every puzzle invariant.
    pub fn post(
        before: &PuzzleInProgress,
        after: &PuzzleInProgress,
        outcome: &SwipeOutcome,
    ) -> Result<(), Vec<InvariantViolation>> {
        let transition_ok = match outcome {
            SwipeOutcome::Blocked { .. } => BlockedIsNoOp::holds(before, after),
            SwipeOutcome::Moved(_) => StrokeToggledOnce::holds(before, after, outcome),
        };

        let mut violations = LinePaintInvariants::check_all(after).err().unwrap_or_default();
        if !transition_ok {
            violations.push(InvariantViolation::new("Swipe outcome matches the state change"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Asserts that all puzzle invariants hold (panics on violation in debug builds).
#[instrument(skip(puzzle))]
pub fn assert_invariants(puzzle: &PuzzleInProgress) {
    debug_assert!(
        LinePaintInvariants::check_all(puzzle).is_ok(),
        "Puzzle invariants violated"
    );
}
