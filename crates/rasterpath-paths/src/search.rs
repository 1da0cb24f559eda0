use std::cmp::Ordering;
use std::fmt;

use rasterpath_core::{Point, Range};

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A start-to-goal sequence of cells (both endpoints included) and its cost.
///
/// Never empty: deserializing a path without cells fails.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPath"))]
pub struct Path {
    cells: Vec<Point>,
    cost: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPath {
    cells: Vec<Point>,
    cost: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPath> for Path {
    type Error = &'static str;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        if raw.cells.is_empty() {
            return Err("a path holds at least its start cell");
        }
        Ok(Self {
            cells: raw.cells,
            cost: raw.cost,
        })
    }
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: f64) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells, cost }
    }

    /// Cells from start to goal.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Sum of step costs (orthogonal `1`, diagonal `√2`).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.cells[0]
    }

    /// Last cell.
    #[inline]
    pub fn goal(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }
}

/// Why a search produced no path. None of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoPath {
    /// Start or goal lies outside the grid.
    OutOfBounds,
    /// Start or goal is not walkable.
    UnwalkableEndpoint,
    /// The frontier emptied before the goal was closed.
    Unreachable,
    /// The expansion budget ran out before the goal was closed.
    BudgetExhausted,
}

impl fmt::Display for NoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoPath::OutOfBounds => write!(f, "start or goal is outside the grid"),
            NoPath::UnwalkableEndpoint => write!(f, "start or goal is not walkable"),
            NoPath::Unreachable => write!(f, "goal is not reachable from start"),
            NoPath::BudgetExhausted => write!(f, "expansion budget exhausted"),
        }
    }
}

impl std::error::Error for NoPath {}

/// Terminal state of a search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Found(Path),
    NoPath(NoPath),
}

/// Result of one search: the outcome and the cells in the order they were
/// expanded (closed).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Search {
    pub outcome: Outcome,
    pub trace: Vec<Point>,
}

impl Search {
    pub(crate) fn rejected(reason: NoPath) -> Self {
        Self {
            outcome: Outcome::NoPath(reason),
            trace: Vec::new(),
        }
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            Outcome::NoPath(_) => None,
        }
    }

    /// The reason no path was found, if any.
    pub fn no_path(&self) -> Option<NoPath> {
        match self.outcome {
            Outcome::Found(_) => None,
            Outcome::NoPath(reason) => Some(reason),
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, Outcome::Found(_))
    }

    /// Split into the optional path cells and the expansion trace.
    pub fn into_parts(self) -> (Option<Vec<Point>>, Vec<Point>) {
        let path = match self.outcome {
            Outcome::Found(path) => Some(path.into_cells()),
            Outcome::NoPath(_) => None,
        };
        (path, self.trace)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers shared by the priority-queue searches
// ---------------------------------------------------------------------------

/// Sentinel predecessor for cells with none (the start, unreached cells).
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Frontier entry, ordered for `BinaryHeap` (a max-heap) so that the
/// smallest `f` pops first and equal `f` pops in insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) f: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bijection between points of a range and `0..range.len()`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Indexer {
    rng: Range,
    width: usize,
}

impl Indexer {
    pub(crate) fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
        }
    }

    #[inline]
    pub(crate) fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.rng.len()
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let row = (p.row - self.rng.min.row) as usize;
        let col = (p.col - self.rng.min.col) as usize;
        Some(row * self.width + col)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let row = (idx / self.width) as i32 + self.rng.min.row;
        let col = (idx % self.width) as i32 + self.rng.min.col;
        Point::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn entries_pop_by_f_then_sequence() {
        let mut heap = BinaryHeap::new();
        heap.push(Entry { f: 2.0, seq: 0, idx: 0 });
        heap.push(Entry { f: 1.0, seq: 2, idx: 1 });
        heap.push(Entry { f: 1.0, seq: 1, idx: 2 });
        heap.push(Entry { f: 0.5, seq: 3, idx: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![3, 2, 1, 0]);
    }

    #[test]
    fn indexer_round_trips_with_offset() {
        let ix = Indexer::new(Range::new(2, 3, 5, 7));
        assert_eq!(ix.len(), 12);
        for i in 0..ix.len() {
            assert_eq!(ix.idx(ix.point(i)), Some(i));
        }
        assert_eq!(ix.idx(Point::new(2, 3)), Some(0));
        assert_eq!(ix.idx(Point::new(1, 3)), None);
    }

    #[test]
    fn search_accessors() {
        let found = Search {
            outcome: Outcome::Found(Path::new(vec![Point::new(0, 0), Point::new(0, 1)], 1.0)),
            trace: vec![Point::new(0, 0), Point::new(0, 1)],
        };
        assert!(found.is_found());
        assert_eq!(found.path().map(Path::goal), Some(Point::new(0, 1)));
        assert_eq!(found.no_path(), None);

        let none = Search::rejected(NoPath::OutOfBounds);
        assert_eq!(none.no_path(), Some(NoPath::OutOfBounds));
        assert_eq!(none.into_parts(), (None, vec![]));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn no_path_round_trip() {
        let json = serde_json::to_string(&NoPath::Unreachable).unwrap();
        let back: NoPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NoPath::Unreachable);
    }

    #[test]
    fn path_without_cells_is_rejected() {
        assert!(serde_json::from_str::<Path>(r#"{"cells":[],"cost":0.0}"#).is_err());
        let json = r#"{"outcome":{"Found":{"cells":[],"cost":0.0}},"trace":[]}"#;
        assert!(serde_json::from_str::<Search>(json).is_err());

        let path = Path::new(vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)], 2.0);
        let back: Path = serde_json::from_str(&serde_json::to_string(&path).unwrap()).unwrap();
        assert_eq!(back.start(), Point::new(0, 0));
        assert_eq!(back.goal(), Point::new(0, 2));
        assert_eq!(back, path);
    }
}
