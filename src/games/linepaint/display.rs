//! Plain-text rendering of a grid drawing.

use super::edge::Edge;
use super::grid::{Coordinate, Grid, VerticalAxis};

/// Renders `edges` on `grid` as ASCII art, top row first.
///
/// Cells print as `.` when untouched, `o` when an edge ends there and `@`
/// under the brush. Horizontal edges print as `-`, vertical edges as `|`.
pub fn render(grid: &Grid, edges: &[Edge], brush: Option<Coordinate>) -> String {
    let has_edge = |a: Coordinate, b: Coordinate| {
        edges.iter().any(|edge| edge.touches(a) && edge.touches(b))
    };

    let width = grid.width() as i32;
    let rows: Vec<i32> = match grid.axis() {
        VerticalAxis::YDown => (0..grid.height() as i32).collect(),
        VerticalAxis::YUp => (0..grid.height() as i32).rev().collect(),
    };

    let mut out = String::new();
    for (row_index, &y) in rows.iter().enumerate() {
        for x in 0..width {
            let cell = Coordinate::new(x, y);
            let symbol = if brush == Some(cell) {
                '@'
            } else if edges.iter().any(|edge| edge.touches(cell)) {
                'o'
            } else {
                '.'
            };
            out.push(symbol);
            if x + 1 < width {
                let right = Coordinate::new(x + 1, y);
                out.push(if has_edge(cell, right) { '-' } else { ' ' });
            }
        }

        if let Some(&next_y) = rows.get(row_index + 1) {
            out.push('\n');
            for x in 0..width {
                let link = has_edge(Coordinate::new(x, y), Coordinate::new(x, next_y));
                out.push(if link { '|' } else { ' ' });
                if x + 1 < width {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_l_shape() {
        let grid = Grid::new(3, 2, 1.0, VerticalAxis::YDown).unwrap();
        let edges = vec![
            Edge::new((0, 0).into(), (1, 0).into()).unwrap(),
            Edge::new((1, 1).into(), (1, 0).into()).unwrap(),
        ];
        let text = render(&grid, &edges, Some((1, 1).into()));
        assert_eq!(text, "o-o .\n  |  \n. @ .");
    }

    #[test]
    fn test_render_y_up_puts_row_zero_last() {
        let grid = Grid::new(1, 2, 1.0, VerticalAxis::YUp).unwrap();
        let text = render(&grid, &[], Some((0, 0).into()));
        assert_eq!(text, ".\n \n@");
    }
}
