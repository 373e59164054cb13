//! First-class invariants for line painting.
//!
//! Invariants are properties every in-progress puzzle must satisfy after
//! any sequence of swipes. They are checked after each swipe in debug
//! builds and can be tested independently.

#[cfg(kani)]
mod verification;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked as one group, reporting every failure at once.
pub trait InvariantSet<S> {
    /// Returns the descriptions of all violated invariants, if any.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
            (C::holds(state), C::description()),
        ];
        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(held, _)| !held)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

pub mod brush_on_grid;
pub mod edges_on_grid;
pub mod unique_edges;

pub use brush_on_grid::BrushOnGridInvariant;
pub use edges_on_grid::EdgesOnGridInvariant;
pub use unique_edges::UniqueEdgesInvariant;

/// All line-paint invariants as a composable set.
pub type LinePaintInvariants = (
    UniqueEdgesInvariant,
    EdgesOnGridInvariant,
    BrushOnGridInvariant,
);
