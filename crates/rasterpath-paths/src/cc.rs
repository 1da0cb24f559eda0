//! Connected-component flood fill.

use rasterpath_core::Point;

use crate::search::Indexer;
use crate::traits::Pather;

/// Flood-fill from `p` and return every cell connected to it, `p` first,
/// then in discovery order.
///
/// Returns an empty vector if `p` is outside the range or not passable.
pub fn component<P: Pather>(pather: &P, p: Point) -> Vec<Point> {
    let ix = Indexer::new(pather.bounds());
    let mut result = Vec::new();
    let Some(si) = ix.idx(p) else {
        return result;
    };
    if !pather.passable(p) {
        return result;
    }

    let mut seen = vec![false; ix.len()];
    let mut stack = vec![si];
    let mut nbuf = Vec::with_capacity(8);
    seen[si] = true;
    result.push(p);

    // Iterative DFS.
    while let Some(ci) = stack.pop() {
        let cp = ix.point(ci);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in &nbuf {
            if let Some(ni) = ix.idx(np) {
                if !seen[ni] {
                    seen[ni] = true;
                    stack.push(ni);
                    result.push(np);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterpath_core::Grid;
    use std::collections::HashSet;

    fn mask(rows: &[&str]) -> Grid<bool> {
        Grid::from_rows(rows.iter().map(|r| r.chars().map(|c| c == '.'))).unwrap()
    }

    #[test]
    fn fills_8_connected_region() {
        let m = mask(&[".#.", "#.#", "..#"]);
        let cells: HashSet<Point> = component(&m, Point::new(0, 0)).into_iter().collect();
        let expected: HashSet<Point> = [(0, 0), (0, 2), (1, 1), (2, 0), (2, 1)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn start_first_and_no_duplicates() {
        let m = mask(&["....", "....", "...."]);
        let cells = component(&m, Point::new(1, 2));
        assert_eq!(cells[0], Point::new(1, 2));
        assert_eq!(cells.len(), 12);
        let unique: HashSet<Point> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn blocked_or_outside_start_is_empty() {
        let m = mask(&["#."]);
        assert!(component(&m, Point::new(0, 0)).is_empty());
        assert!(component(&m, Point::new(0, 5)).is_empty());
    }
}
