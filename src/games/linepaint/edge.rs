//! Undirected connection between two adjacent cells.

use serde::Serialize;
use std::hash::{Hash, Hasher};

use super::grid::Coordinate;

/// An undirected edge between two grid-adjacent cells.
///
/// `Edge(a, b) == Edge(b, a)`. The endpoints keep the order they were
/// drawn in so that replays and debug output show the stroke direction.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Edge {
    start: Coordinate,
    end: Coordinate,
}

/// Error constructing an edge.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EdgeError {
    /// Both endpoints are the same cell.
    #[display("Edge endpoints are identical: {}", _0)]
    Degenerate(Coordinate),

    /// The endpoints are not one step apart on a single axis.
    #[display("Edge endpoints {} and {} are not adjacent", start, end)]
    NotAdjacent {
        /// First endpoint.
        start: Coordinate,
        /// Second endpoint.
        end: Coordinate,
    },
}

impl std::error::Error for EdgeError {}

impl Edge {
    /// Creates an edge between two adjacent cells.
    pub fn new(start: Coordinate, end: Coordinate) -> Result<Self, EdgeError> {
        if start == end {
            return Err(EdgeError::Degenerate(start));
        }
        if !start.is_adjacent(end) {
            return Err(EdgeError::NotAdjacent { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an edge the caller already knows to be adjacent.
    pub(crate) fn between_neighbors(start: Coordinate, end: Coordinate) -> Self {
        debug_assert!(start.is_adjacent(end), "edge endpoints must be adjacent");
        Self { start, end }
    }

    /// Endpoint the stroke started from.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Endpoint the stroke ended on.
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Endpoints in ascending order, independent of stroke direction.
    pub fn canonical(&self) -> (Coordinate, Coordinate) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// True if `coord` is one of the endpoints.
    pub fn touches(&self, coord: Coordinate) -> bool {
        self.start == coord || self.end == coord
    }

    /// The endpoint opposite `coord`, if `coord` is an endpoint.
    pub fn other(&self, coord: Coordinate) -> Option<Coordinate> {
        if coord == self.start {
            Some(self.end)
        } else if coord == self.end {
            Some(self.start)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_equality_is_symmetric() {
        let forward = Edge::new(c(0, 0), c(1, 0)).unwrap();
        let backward = Edge::new(c(1, 0), c(0, 0)).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.canonical(), backward.canonical());
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Edge::new(c(2, 3), c(2, 4)).unwrap());
        assert!(set.contains(&Edge::new(c(2, 4), c(2, 3)).unwrap()));
    }

    #[test]
    fn test_direction_preserved() {
        let edge = Edge::new(c(1, 1), c(1, 0)).unwrap();
        assert_eq!(edge.start(), c(1, 1));
        assert_eq!(edge.end(), c(1, 0));
    }

    #[test]
    fn test_rejects_degenerate() {
        assert_eq!(Edge::new(c(1, 1), c(1, 1)), Err(EdgeError::Degenerate(c(1, 1))));
    }

    #[test]
    fn test_rejects_diagonal_and_distant() {
        assert!(matches!(
            Edge::new(c(0, 0), c(1, 1)),
            Err(EdgeError::NotAdjacent { .. })
        ));
        assert!(matches!(
            Edge::new(c(0, 0), c(2, 0)),
            Err(EdgeError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn test_other_endpoint() {
        let edge = Edge::new(c(0, 0), c(0, 1)).unwrap();
        assert_eq!(edge.other(c(0, 0)), Some(c(0, 1)));
        assert_eq!(edge.other(c(0, 1)), Some(c(0, 0)));
        assert_eq!(edge.other(c(5, 5)), None);
        assert!(edge.touches(c(0, 1)));
        assert!(!edge.touches(c(1, 1)));
    }
}
