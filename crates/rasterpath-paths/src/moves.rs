use std::f64::consts::SQRT_2;

use rasterpath_core::Point;

use crate::distance::euclidean;

/// One step of the 8-connected move set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub delta: Point,
    pub cost: f64,
}

const fn step(drow: i32, dcol: i32, cost: f64) -> Move {
    Move {
        delta: Point::new(drow, dcol),
        cost,
    }
}

/// The move set in expansion order: up, down, left, right, then the four
/// diagonals. Changing the order changes tie-breaking and therefore traces.
pub const MOVES: [Move; 8] = [
    step(-1, 0, 1.0),
    step(1, 0, 1.0),
    step(0, -1, 1.0),
    step(0, 1, 1.0),
    step(-1, -1, SQRT_2),
    step(-1, 1, SQRT_2),
    step(1, -1, SQRT_2),
    step(1, 1, SQRT_2),
];

/// Cost of stepping from `from` to `to`.
///
/// Adjacent cells cost `1` or `√2`; any other pair falls back to the
/// straight-line distance.
#[inline]
pub fn step_cost(from: Point, to: Point) -> f64 {
    match ((to.row - from.row).abs(), (to.col - from.col).abs()) {
        (0, 0) => 0.0,
        (0, 1) | (1, 0) => 1.0,
        (1, 1) => SQRT_2,
        _ => euclidean(from, to),
    }
}

/// Sum of the step costs along `cells`.
pub fn path_cost(cells: &[Point]) -> f64 {
    cells.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}
