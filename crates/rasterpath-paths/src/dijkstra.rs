use std::collections::BinaryHeap;

use rasterpath_core::{Point, Range};

use crate::search::{Entry, Indexer};
use crate::traits::WeightedPather;

/// Cheapest known cost from the nearest source to every cell of a range.
#[derive(Debug, Clone)]
pub struct CostMap {
    ix: Indexer,
    costs: Vec<f64>,
}

impl CostMap {
    /// The range the map covers.
    pub fn bounds(&self) -> Range {
        self.ix.range()
    }

    /// Cost at `p`, or `f64::INFINITY` if `p` is outside the range or was
    /// not reached.
    pub fn at(&self, p: Point) -> f64 {
        match self.ix.idx(p) {
            Some(i) => self.costs[i],
            None => f64::INFINITY,
        }
    }

    /// Reached cells with their cost, in row-major order.
    pub fn reached(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_finite())
            .map(|(i, &c)| (self.ix.point(i), c))
    }
}

/// Compute a multi-source Dijkstra cost map.
///
/// Every passable source starts at cost 0; sources outside the range or
/// blocked are ignored.
pub fn cost_map<P: WeightedPather>(pather: &P, sources: &[Point]) -> CostMap {
    let ix = Indexer::new(pather.bounds());
    let mut costs = vec![f64::INFINITY; ix.len()];
    let mut done = vec![false; ix.len()];
    let mut open = BinaryHeap::new();
    let mut seq = 0;

    for &src in sources {
        let Some(si) = ix.idx(src) else {
            continue;
        };
        if !pather.passable(src) || costs[si] == 0.0 {
            continue;
        }
        costs[si] = 0.0;
        open.push(Entry {
            f: 0.0,
            seq,
            idx: si,
        });
        seq += 1;
    }

    let mut nbuf = Vec::with_capacity(8);
    while let Some(current) = open.pop() {
        let ci = current.idx;
        if done[ci] {
            continue;
        }
        done[ci] = true;
        let cp = ix.point(ci);

        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in &nbuf {
            let Some(ni) = ix.idx(np) else {
                continue;
            };
            let tentative = costs[ci] + pather.cost(cp, np);
            if tentative < costs[ni] {
                costs[ni] = tentative;
                open.push(Entry {
                    f: tentative,
                    seq,
                    idx: ni,
                });
                seq += 1;
            }
        }
    }

    CostMap { ix, costs }
}
