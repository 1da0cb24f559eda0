use rasterpath_core::Point;

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dr = f64::from(a.row - b.row);
    let dc = f64::from(a.col - b.col);
    (dr * dr + dc * dc).sqrt()
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn distances_agree_on_axis() {
        let a = Point::new(0, 0);
        let b = Point::new(0, 3);
        assert_eq!(euclidean(a, b), 3.0);
        assert_eq!(manhattan(a, b), 3);
    }

    #[test]
    fn euclidean_is_symmetric_and_below_manhattan() {
        let a = Point::new(2, -1);
        for row in -3..6 {
            for col in -3..6 {
                let b = Point::new(row, col);
                assert!(euclidean(a, b) <= f64::from(manhattan(a, b)) + 1e-12);
                assert_eq!(euclidean(a, b), euclidean(b, a));
            }
        }
        assert_eq!(euclidean(Point::new(1, 1), Point::new(2, 2)), SQRT_2);
    }
}
