mod brush;
mod contracts;
mod display;
mod edge;
mod grid;
pub mod invariants;
mod ledger;
mod level;
pub mod rules;
mod typestate;

pub use brush::{BrushSession, BrushStroke, SwipeOutcome};
pub use contracts::{BlockedIsNoOp, StrokeToggledOnce, SwipeContract};
pub use display::render;
pub use edge::{Edge, EdgeError};
pub use grid::{CellCenter, Coordinate, Direction, Grid, VerticalAxis};
pub use invariants::{
    BrushOnGridInvariant, EdgesOnGridInvariant, Invariant, InvariantSet, InvariantViolation,
    LinePaintInvariants, UniqueEdgesInvariant,
};
pub use ledger::{ConnectionLedger, ToggleResult};
pub use level::{LevelCatalog, LevelDefinition, LevelError};
pub use rules::{extra_edges, is_complete, missing_edges};
pub use typestate::{PuzzleInProgress, PuzzleResult, PuzzleSetup, PuzzleSolved, SwipeTransition};
