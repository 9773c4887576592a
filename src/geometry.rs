//! Segment intersection on the integer pixel lattice.
//!
//! All coordinates are whole pixels, so the orientation test is exact:
//! cross products are widened to i128 and compared against zero without
//! any epsilon.

/// A point on the floor-plan pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

/// A straight segment between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Segment { a, b }
    }

    /// Both endpoints coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self.a, self.b, other.a, other.b)
    }
}

/// Orientation of an ordered point triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Classify the triplet `(p, q, r)` by the sign of
/// `(q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)`.
#[inline]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let (px, py) = (p.x as i128, p.y as i128);
    let (qx, qy) = (q.x as i128, q.y as i128);
    let (rx, ry) = (r.x as i128, r.y as i128);
    let (a, b) = (qy - py, rx - qx);
    let (c, d) = (qx - px, ry - qy);
    let sign = match (a.checked_mul(b), c.checked_mul(d)) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        // only reachable with coordinates near both ends of i64
        _ => (a as f64 * b as f64).total_cmp(&(c as f64 * d as f64)),
    };
    match sign {
        std::cmp::Ordering::Equal => Orientation::Collinear,
        std::cmp::Ordering::Greater => Orientation::Clockwise,
        std::cmp::Ordering::Less => Orientation::CounterClockwise,
    }
}

/// True when `q` lies inside the bounding box spanned by `p` and `r`.
///
/// Only meaningful once `p`, `q`, `r` are known to be collinear.
#[inline]
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Returns true if segment `p1q1` intersects segment `p2q2`.
///
/// The general case fires when both orientation pairs differ; the collinear
/// touching cases are checked afterwards in the order
/// `p1q1 x p2`, `p1q1 x q2`, `p2q2 x p1`, `p2q2 x q1`.
///
/// A zero-length segment on either side never intersects anything.
#[inline]
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    if p1 == q1 || p2 == q2 {
        return false;
    }

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    use Orientation::Collinear;
    (o1 == Collinear && on_segment(p1, p2, q1))
        || (o2 == Collinear && on_segment(p1, q2, q1))
        || (o3 == Collinear && on_segment(p2, p1, q2))
        || (o4 == Collinear && on_segment(p2, q1, q2))
}
