//! Formal verification of edge and ledger properties using Kani.
//!
//! These harnesses check the properties for all bounded inputs rather
//! than a handful of examples.

#[cfg(kani)]
mod proofs {
    use crate::{ConnectionLedger, Coordinate, Edge, ToggleResult};

    fn any_coordinate() -> Coordinate {
        let x: i32 = kani::any();
        let y: i32 = kani::any();
        kani::assume((-4..4).contains(&x) && (-4..4).contains(&y));
        Coordinate::new(x, y)
    }

    /// Proves: edge equality ignores endpoint order.
    #[kani::proof]
    fn verify_edge_equality_symmetric() {
        let a = any_coordinate();
        let b = any_coordinate();
        if let (Ok(forward), Ok(backward)) = (Edge::new(a, b), Edge::new(b, a)) {
            assert!(forward == backward);
        }
    }

    /// Proves: toggling an edge twice restores the ledger.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_toggle_involution() {
        let a = any_coordinate();
        let b = any_coordinate();
        let Ok(edge) = Edge::new(a, b) else {
            return;
        };

        let mut ledger = ConnectionLedger::new();
        assert!(ledger.toggle(edge) == ToggleResult::Added);
        assert!(ledger.toggle(edge) == ToggleResult::Removed);
        assert!(ledger.is_empty());
    }
}
