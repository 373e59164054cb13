//! Exact-match completion check.

use super::super::{ConnectionLedger, Edge};
use tracing::instrument;

/// Checks whether the drawing matches the target pattern exactly.
///
/// Cardinalities are compared first so that a superset of the target
/// (every target edge plus extras) is never reported as complete. With
/// equal sizes, containment of every target edge means set equality.
#[instrument(skip_all, fields(drawn = ledger.size(), target = target.len()))]
pub fn is_complete(ledger: &ConnectionLedger, target: &[Edge]) -> bool {
    if ledger.size() != target.len() {
        return false;
    }

    target.iter().all(|edge| ledger.contains(edge))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: (i32, i32), b: (i32, i32)) -> Edge {
        Edge::new(a.into(), b.into()).expect("adjacent")
    }

    fn target() -> Vec<Edge> {
        vec![edge((0, 0), (1, 0)), edge((1, 0), (1, 1))]
    }

    #[test]
    fn test_empty_ledger_incomplete() {
        assert!(!is_complete(&ConnectionLedger::new(), &target()));
    }

    #[test]
    fn test_exact_match_complete() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        ledger.toggle(edge((1, 0), (1, 1)));
        assert!(is_complete(&ledger, &target()));
    }

    #[test]
    fn test_reverse_direction_and_order_complete() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((1, 1), (1, 0)));
        ledger.toggle(edge((1, 0), (0, 0)));
        assert!(is_complete(&ledger, &target()));
    }

    #[test]
    fn test_superset_incomplete() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        ledger.toggle(edge((1, 0), (1, 1)));
        ledger.toggle(edge((1, 1), (2, 1)));
        assert!(!is_complete(&ledger, &target()));
    }

    #[test]
    fn test_same_size_wrong_edge_incomplete() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        ledger.toggle(edge((1, 0), (2, 0)));
        assert!(!is_complete(&ledger, &target()));
    }

    #[test]
    fn test_evaluation_does_not_mutate() {
        let mut ledger = ConnectionLedger::new();
        ledger.toggle(edge((0, 0), (1, 0)));
        let before = ledger.clone();
        for _ in 0..3 {
            assert!(!is_complete(&ledger, &target()));
        }
        assert_eq!(ledger.edges(), before.edges());
    }
}
