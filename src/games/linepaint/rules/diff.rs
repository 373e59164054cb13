//! Differences between a drawing and its target, for hints and debugging.

use super::super::{ConnectionLedger, Edge};
use tracing::instrument;

/// Target edges not yet drawn, in target order.
#[instrument(skip_all)]
pub fn missing_edges(ledger: &ConnectionLedger, target: &[Edge]) -> Vec<Edge> {
    target
        .iter()
        .filter(|edge| !ledger.contains(edge))
        .copied()
        .collect()
}

/// Drawn edges that are not part of the target, in drawing order.
#[instrument(skip_all)]
pub fn extra_edges(ledger: &ConnectionLedger, target: &[Edge]) -> Vec<Edge> {
    ledger
        .iter()
        .filter(|edge| !target.contains(edge))
        .copied()
        .collect()
}
