use pathviz_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) distance between two planar positions.
#[inline]
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(manhattan(Point::cell(0, 0), Point::cell(2, 3)), 5);
        assert_eq!(manhattan(Point::cell(2, 3), Point::cell(0, 0)), 5);
        assert_eq!(euclidean((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(euclidean((1.0, 1.0), (1.0, 1.0)), 0.0);
    }
}
