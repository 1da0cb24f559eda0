use std::collections::BinaryHeap;

use rasterpath_core::{Grid, Point};

use crate::search::{Entry, Indexer, NO_PARENT, NoPath, Outcome, Path, Search};
use crate::traits::AstarPather;

/// Compute the shortest 8-connected path from `start` to `goal` on a
/// walkability mask.
///
/// Never fails: out-of-bounds or unwalkable endpoints yield
/// [`NoPath`] with an empty trace, and an unreachable goal yields
/// [`NoPath::Unreachable`] with the trace of every cell explored.
pub fn find_path(mask: &Grid<bool>, start: Point, goal: Point) -> Search {
    Astar::new().search(mask, start, goal)
}

/// A* search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Astar {
    max_expansions: Option<usize>,
}

impl Astar {
    /// Unbounded search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop with [`NoPath::BudgetExhausted`] once `n` cells have been
    /// expanded without closing the goal.
    pub fn max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    /// Run the search. All working state lives in this call.
    pub fn search<P: AstarPather>(&self, pather: &P, start: Point, goal: Point) -> Search {
        let rng = pather.bounds();
        if !rng.contains(start) || !rng.contains(goal) {
            log::debug!("astar {start} -> {goal}: endpoint outside {rng}");
            return Search::rejected(NoPath::OutOfBounds);
        }
        if !pather.passable(start) || !pather.passable(goal) {
            log::debug!("astar {start} -> {goal}: endpoint not walkable");
            return Search::rejected(NoPath::UnwalkableEndpoint);
        }

        let mut run = Run::new(pather, start, goal);
        let reason = loop {
            if self.max_expansions.is_some_and(|n| run.trace.len() >= n) {
                break NoPath::BudgetExhausted;
            }
            match run.step() {
                Step::Expanded => {}
                Step::GoalReached => {
                    let path = run.reconstruct();
                    log::debug!(
                        "astar {start} -> {goal}: {} cells, cost {:.3}, {} expanded",
                        path.len(),
                        path.cost(),
                        run.trace.len()
                    );
                    return Search {
                        outcome: Outcome::Found(path),
                        trace: run.trace,
                    };
                }
                Step::Exhausted => break NoPath::Unreachable,
            }
        };

        log::debug!(
            "astar {start} -> {goal}: {reason} after {} expansions",
            run.trace.len()
        );
        Search {
            outcome: Outcome::NoPath(reason),
            trace: run.trace,
        }
    }
}

// ---------------------------------------------------------------------------
// Run: per-call search state
// ---------------------------------------------------------------------------

/// Result of one expansion step.
enum Step {
    /// A cell was closed and its neighbours relaxed.
    Expanded,
    /// The goal was closed.
    GoalReached,
    /// The frontier is empty.
    Exhausted,
}

struct Run<'a, P> {
    pather: &'a P,
    ix: Indexer,
    goal: Point,
    goal_idx: usize,
    g: Vec<f64>,
    came: Vec<usize>,
    closed: Vec<bool>,
    open: BinaryHeap<Entry>,
    seq: u64,
    trace: Vec<Point>,
    nbuf: Vec<Point>,
}

impl<'a, P: AstarPather> Run<'a, P> {
    /// Both endpoints must be inside the pather's bounds.
    fn new(pather: &'a P, start: Point, goal: Point) -> Self {
        let ix = Indexer::new(pather.bounds());
        let len = ix.len();
        let start_idx = ix.idx(start).unwrap_or_default();
        let goal_idx = ix.idx(goal).unwrap_or_default();

        let mut g = vec![f64::INFINITY; len];
        g[start_idx] = 0.0;
        let mut open = BinaryHeap::new();
        open.push(Entry {
            f: pather.estimate(start, goal),
            seq: 0,
            idx: start_idx,
        });

        Self {
            pather,
            ix,
            goal,
            goal_idx,
            g,
            came: vec![NO_PARENT; len],
            closed: vec![false; len],
            open,
            seq: 0,
            trace: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    fn step(&mut self) -> Step {
        // Skip stale entries for cells that were closed through a cheaper
        // entry pushed later.
        let ci = loop {
            let Some(entry) = self.open.pop() else {
                return Step::Exhausted;
            };
            if !self.closed[entry.idx] {
                break entry.idx;
            }
        };

        self.closed[ci] = true;
        let cp = self.ix.point(ci);
        self.trace.push(cp);
        if ci == self.goal_idx {
            return Step::GoalReached;
        }

        let current_g = self.g[ci];
        self.nbuf.clear();
        self.pather.neighbors(cp, &mut self.nbuf);
        for &np in &self.nbuf {
            let Some(ni) = self.ix.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            let tentative = current_g + self.pather.cost(cp, np);
            if tentative < self.g[ni] {
                self.g[ni] = tentative;
                self.came[ni] = ci;
                self.seq += 1;
                self.open.push(Entry {
                    f: tentative + self.pather.estimate(np, self.goal),
                    seq: self.seq,
                    idx: ni,
                });
            }
        }
        Step::Expanded
    }

    fn reconstruct(&self) -> Path {
        let mut cells = Vec::new();
        let mut ci = self.goal_idx;
        while ci != NO_PARENT {
            cells.push(self.ix.point(ci));
            ci = self.came[ci];
        }
        cells.reverse();
        Path::new(cells, self.g[self.goal_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cc::component;
    use crate::dijkstra::cost_map;
    use crate::moves::{path_cost, step_cost};
    use crate::traits::{Pather, WeightedPather};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rasterpath_core::Range;
    use std::collections::HashSet;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-9;

    fn p(row: i32, col: i32) -> Point {
        Point::new(row, col)
    }

    /// Parse a map where `.` is walkable and `#` is blocked.
    fn mask(rows: &[&str]) -> Grid<bool> {
        Grid::from_rows(rows.iter().map(|r| r.chars().map(|c| c == '.'))).unwrap()
    }

    fn assert_valid_path(m: &Grid<bool>, path: &Path, start: Point, goal: Point) {
        let cells = path.cells();
        assert_eq!(cells.first(), Some(&start));
        assert_eq!(cells.last(), Some(&goal));
        for &c in cells {
            assert!(m.passable(c), "{c} on path is blocked");
        }
        for w in cells.windows(2) {
            let d = w[1] - w[0];
            assert!(
                d.row.abs() <= 1 && d.col.abs() <= 1 && d != Point::ZERO,
                "{} -> {} is not a single step",
                w[0],
                w[1]
            );
        }
        assert!((path.cost() - path_cost(cells)).abs() < EPS);
    }

    fn random_mask(rng: &mut StdRng, h: usize, w: usize, open: f64) -> Grid<bool> {
        let cells = (0..h * w).map(|_| rng.random_bool(open)).collect();
        Grid::from_vec(h, w, cells).unwrap()
    }

    #[test]
    fn open_grid_goes_diagonal() {
        let m = mask(&["...", "...", "..."]);
        let s = find_path(&m, p(0, 0), p(2, 2));
        let path = s.path().unwrap();
        assert_eq!(path.cells(), &[p(0, 0), p(1, 1), p(2, 2)]);
        assert!((path.cost() - 2.0 * SQRT_2).abs() < EPS);
        assert_eq!(s.trace, vec![p(0, 0), p(1, 1), p(2, 2)]);
    }

    #[test]
    fn blocked_center_goes_around() {
        let m = mask(&["...", ".#.", "..."]);
        let s = find_path(&m, p(0, 0), p(2, 2));
        let path = s.path().unwrap();
        assert_valid_path(&m, path, p(0, 0), p(2, 2));
        assert!(!path.cells().contains(&p(1, 1)));
        // Two orthogonal steps and one diagonal that skirts the blocked center.
        assert!((path.cost() - (2.0 + SQRT_2)).abs() < EPS);
        assert!((path.cost() - 2.0 * SQRT_2).abs() > 0.5);
        assert_eq!(path.cells(), &[p(0, 0), p(1, 0), p(2, 1), p(2, 2)]);
        // Equal-f candidates are expanded in insertion order.
        assert_eq!(
            s.trace,
            vec![p(0, 0), p(1, 0), p(0, 1), p(2, 1), p(1, 2), p(2, 2)]
        );
    }

    #[test]
    fn start_equals_goal() {
        let m = mask(&["..", ".."]);
        let s = find_path(&m, p(1, 0), p(1, 0));
        let path = s.path().unwrap();
        assert_eq!(path.cells(), &[p(1, 0)]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(s.trace, vec![p(1, 0)]);
    }

    #[test]
    fn disjoint_components_report_start_component() {
        let m = mask(&[".#..", ".#..", "..#.", "##.."]);
        // (2,1) -> (1,2) squeezes between two blocked cells.
        let s = find_path(&m, p(0, 0), p(0, 3));
        assert!(s.is_found());

        let walled = mask(&[".#..", ".#..", ".#..", ".#.."]);
        let s = find_path(&walled, p(0, 0), p(3, 3));
        assert_eq!(s.no_path(), Some(NoPath::Unreachable));
        let traced: HashSet<Point> = s.trace.iter().copied().collect();
        assert_eq!(traced.len(), s.trace.len(), "a cell was expanded twice");
        let expected: HashSet<Point> = [p(0, 0), p(1, 0), p(2, 0), p(3, 0)].into_iter().collect();
        assert_eq!(traced, expected);
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let m = mask(&["...", "..."]);
        for (start, goal) in [
            (p(-1, 0), p(1, 1)),
            (p(0, 0), p(2, 0)),
            (p(0, 3), p(0, 0)),
            (p(0, 0), p(0, -1)),
        ] {
            let s = find_path(&m, start, goal);
            assert_eq!(s.no_path(), Some(NoPath::OutOfBounds));
            assert!(s.trace.is_empty());
        }
    }

    #[test]
    fn unwalkable_endpoints() {
        let m = mask(&["#..", "..#"]);
        let s = find_path(&m, p(0, 0), p(0, 2));
        assert_eq!(s.no_path(), Some(NoPath::UnwalkableEndpoint));
        assert!(s.trace.is_empty());
        let s = find_path(&m, p(0, 1), p(1, 2));
        assert_eq!(s.no_path(), Some(NoPath::UnwalkableEndpoint));
        assert!(s.trace.is_empty());
    }

    #[test]
    fn diagonal_between_blocked_orthogonals_is_allowed() {
        let m = mask(&[".#", "#."]);
        let s = find_path(&m, p(0, 0), p(1, 1));
        assert_eq!(s.path().unwrap().cells(), &[p(0, 0), p(1, 1)]);
    }

    #[test]
    fn search_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let m = random_mask(&mut rng, 12, 15, 0.75);
            let start = p(rng.random_range(0..12), rng.random_range(0..15));
            let goal = p(rng.random_range(0..12), rng.random_range(0..15));
            let a = find_path(&m, start, goal);
            let b = find_path(&m, start, goal);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn matches_dijkstra_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut found = 0;
        for _ in 0..200 {
            let h = rng.random_range(1..8);
            let w = rng.random_range(1..8);
            let m = random_mask(&mut rng, h, w, 0.65);
            let start = p(rng.random_range(0..h as i32), rng.random_range(0..w as i32));
            let goal = p(rng.random_range(0..h as i32), rng.random_range(0..w as i32));
            if !m.passable(start) || !m.passable(goal) {
                continue;
            }
            let s = find_path(&m, start, goal);
            let best = cost_map(&m, &[start]).at(goal);
            match s.path() {
                Some(path) => {
                    found += 1;
                    assert_valid_path(&m, path, start, goal);
                    assert!(
                        (path.cost() - best).abs() < EPS,
                        "astar {} vs dijkstra {best}",
                        path.cost()
                    );
                }
                None => {
                    assert_eq!(best, f64::INFINITY);
                    assert_eq!(s.no_path(), Some(NoPath::Unreachable));
                    let reachable: HashSet<Point> = component(&m, start).into_iter().collect();
                    let traced: HashSet<Point> = s.trace.iter().copied().collect();
                    assert_eq!(traced.len(), s.trace.len());
                    assert_eq!(traced, reachable);
                }
            }
        }
        assert!(found > 20);
    }

    #[test]
    fn trace_starts_at_start_and_ends_at_goal() {
        let m = mask(&["....#....", "..#.#.#..", "..#...#.."]);
        let s = find_path(&m, p(2, 0), p(0, 8));
        assert_eq!(s.trace.first(), Some(&p(2, 0)));
        assert_eq!(s.trace.last(), Some(&p(0, 8)));
        assert_valid_path(&m, s.path().unwrap(), p(2, 0), p(0, 8));
    }

    #[test]
    fn budget_stops_early() {
        let m = mask(&[".........."; 10]);
        let full = find_path(&m, p(0, 0), p(9, 9));
        assert!(full.is_found());

        let s = Astar::new().max_expansions(3).search(&m, p(0, 0), p(9, 9));
        assert_eq!(s.no_path(), Some(NoPath::BudgetExhausted));
        assert_eq!(s.trace, full.trace[..3].to_vec());

        let enough = Astar::new()
            .max_expansions(full.trace.len())
            .search(&m, p(0, 0), p(9, 9));
        assert_eq!(enough, full);
    }

    /// 4-connected pather over a mask, to exercise the trait seam.
    struct Cardinal<'a>(&'a Grid<bool>);

    impl Pather for Cardinal<'_> {
        fn bounds(&self) -> Range {
            self.0.bounds()
        }

        fn passable(&self, p: Point) -> bool {
            self.0.passable(p)
        }

        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for d in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let n = p.shift(d.0, d.1);
                if self.passable(n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Cardinal<'_> {
        fn cost(&self, from: Point, to: Point) -> f64 {
            step_cost(from, to)
        }
    }

    impl AstarPather for Cardinal<'_> {
        fn estimate(&self, from: Point, to: Point) -> f64 {
            crate::distance::manhattan(from, to) as f64
        }
    }

    #[test]
    fn custom_pather() {
        let m = mask(&["...", "...", "..."]);
        let s = Astar::new().search(&Cardinal(&m), p(0, 0), p(2, 2));
        let path = s.path().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.cost(), 4.0);
    }
}
