//! The player's current drawing: an ordered set of undirected edges.

use serde::Serialize;
use tracing::{debug, instrument};

use super::edge::Edge;

/// What a toggle did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToggleResult {
    /// The edge was absent and has been appended.
    Added,
    /// An equal edge was present and has been removed.
    Removed,
}

/// Edges currently drawn on the grid.
///
/// Insertion order is kept for replay and debugging; it plays no part in
/// comparing a drawing against a target. Swiping over a drawn edge again
/// removes it, so there is no separate undo operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionLedger {
    edges: Vec<Edge>,
}

impl ConnectionLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if an undirected-equal edge is present.
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|drawn| drawn == edge)
    }

    /// Removes the first equal edge if present, otherwise appends `edge`.
    #[instrument(skip(self, edge), fields(size = self.edges.len(), edge = %edge))]
    pub fn toggle(&mut self, edge: Edge) -> ToggleResult {
        match self.edges.iter().position(|drawn| *drawn == edge) {
            Some(index) => {
                self.edges.remove(index);
                debug!(index, "Connection removed");
                ToggleResult::Removed
            }
            None => {
                self.edges.push(edge);
                debug!("Connection added");
                ToggleResult::Added
            }
        }
    }

    /// Number of drawn edges.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// True if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drawn edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates over drawn edges in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }
}

impl PartialEq for ConnectionLedger {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().all(|edge| other.contains(edge))
    }
}

impl Eq for ConnectionLedger {}

impl<'a> IntoIterator for &'a ConnectionLedger {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::linepaint::Coordinate;

    fn edge(a: (i32, i32), b: (i32, i32)) -> Edge {
        Edge::new(a.into(), b.into()).expect("adjacent")
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut ledger = ConnectionLedger::new();
        assert_eq!(ledger.toggle(edge((0, 0), (1, 0))), ToggleResult::Added);
        assert_eq!(ledger.size(), 1);
        assert_eq!(ledger.toggle(edge((0, 0), (1, 0))), ToggleResult::Removed);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        ledger.toggle(edge((1, 0), (1, 1)));
        let before = ledger.clone();

        ledger.toggle(edge((1, 1), (2, 1)));
        ledger.toggle(edge((2, 1), (1, 1)));

        assert_eq!(ledger, before);
        assert_eq!(ledger.size(), 2);
    }

    #[test]
    fn test_reverse_direction_removes() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (0, 1)));
        assert!(ledger.contains(&edge((0, 1), (0, 0))));
        assert_eq!(ledger.toggle(edge((0, 1), (0, 0))), ToggleResult::Removed);
        assert!(!ledger.contains(&edge((0, 0), (0, 1))));
    }

    #[test]
    fn test_equality_ignores_order_and_direction() {
        let mut first = ConnectionLedger::new();
        first.toggle(edge((0, 0), (1, 0)));
        first.toggle(edge((1, 0), (1, 1)));

        let mut second = ConnectionLedger::new();
        second.toggle(edge((1, 1), (1, 0)));
        second.toggle(edge((1, 0), (0, 0)));

        assert_eq!(first, second);
    }

    #[test]
    fn test_removal_keeps_order_of_others() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        ledger.toggle(edge((1, 0), (2, 0)));
        ledger.toggle(edge((2, 0), (2, 1)));
        ledger.toggle(edge((1, 0), (2, 0)));

        let starts: Vec<Coordinate> = ledger.iter().map(Edge::start).collect();
        assert_eq!(starts, vec![Coordinate::new(0, 0), Coordinate::new(2, 0)]);
    }
}
