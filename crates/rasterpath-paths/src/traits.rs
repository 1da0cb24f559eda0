use rasterpath_core::{Grid, Point, Range};

use crate::distance::euclidean;
use crate::moves::{MOVES, step_cost};

/// Minimal pathfinding interface: provides bounds, passability and neighbor
/// enumeration.
pub trait Pather {
    /// The rectangle searches are confined to.
    fn bounds(&self) -> Range;

    /// Whether `p` can be entered.
    fn passable(&self, p: Point) -> bool;

    /// Append passable neighbors of `p` into `buf`, in a fixed order. The
    /// caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> f64;
}

impl Pather for Grid<bool> {
    #[inline]
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.get(p).copied().unwrap_or(false)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        // Diagonals are not checked against their flanking orthogonal cells.
        for m in MOVES {
            let n = p + m.delta;
            if self.passable(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for Grid<bool> {
    #[inline]
    fn cost(&self, from: Point, to: Point) -> f64 {
        step_cost(from, to)
    }
}

impl AstarPather for Grid<bool> {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}
