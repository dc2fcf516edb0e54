//! Homogeneous 3D point.

use crate::{
    macros::{impl_components, impl_scalar_ops},
    vec3::Vec3,
    Error, Mat4, VecN, TOLERANCE,
};
use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A position in space carried as homogeneous coordinates `(x, y, z, w)`.
///
/// A point supports three storage conventions: cartesian
/// `(x, y, z, 1)`, homogeneous `(w*x, w*y, w*z, w)`, and rational
/// `(x, y, z, w)`. The conversions between them
/// ([`cartesianize`](Point::cartesianize),
/// [`rationalize`](Point::rationalize),
/// [`homogenize`](Point::homogenize)) are only meaningful when the
/// point is already in the convention they assume; applied to anything
/// else the result is unspecified.
///
/// Point arithmetic is positional: `point - point` is the displacement
/// [`Vec3`] between the cartesianized positions, `point ± vec` moves
/// the point keeping its weight, and `point * mat4` is the full 4x4
/// row-vector product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub(crate) [f64; 4]);

impl_components!(Point, size: 4, shape: [4], cnames: { x: 0, y: 1, z: 2, w: 3 });
impl_scalar_ops!(Point);

impl Default for Point {
    fn default() -> Self { Self::ORIGIN }
}

impl Point {
    /// The cartesian origin.
    pub const ORIGIN: Self = Point([0.0, 0.0, 0.0, 1.0]);

    /// Creates a cartesian point (weight 1).
    pub const fn new(x: f64, y: f64, z: f64) -> Self { Point([x, y, z, 1.0]) }

    /// Creates a point with an explicit weight.
    pub const fn with_weight(x: f64, y: f64, z: f64, w: f64) -> Self { Point([x, y, z, w]) }

    /// Resets a point of the form `(w*x, w*y, w*z, w)`, `w != 0`, to
    /// `(x, y, z, 1)`. A zero weight leaves the point unchanged.
    pub fn cartesianize(&mut self) {
        let w = self.0[3];
        if w != 0.0 {
            self.0 = [self.0[0] / w, self.0[1] / w, self.0[2] / w, 1.0];
        }
    }

    /// The cartesianized copy; `self` is unchanged.
    pub fn cartesian(&self) -> Point {
        let mut p = *self;
        p.cartesianize();
        p
    }

    /// Resets a point of the form `(w*x, w*y, w*z, w)`, `w != 0`, to
    /// `(x, y, z, w)`. A zero weight leaves the point unchanged.
    pub fn rationalize(&mut self) {
        let w = self.0[3];
        if w != 0.0 {
            self.0 = [self.0[0] / w, self.0[1] / w, self.0[2] / w, w];
        }
    }

    /// The rationalized copy; `self` is unchanged.
    pub fn rational(&self) -> Point {
        let mut p = *self;
        p.rationalize();
        p
    }

    /// Resets a point of the form `(x, y, z, w)` to
    /// `(w*x, w*y, w*z, w)`.
    pub fn homogenize(&mut self) {
        let w = self.0[3];
        self.0 = [self.0[0] * w, self.0[1] * w, self.0[2] * w, w];
    }

    /// The homogenized copy; `self` is unchanged.
    pub fn homogen(&self) -> Point {
        let mut p = *self;
        p.homogenize();
        p
    }

    /// Distance between the cartesianized positions.
    pub fn dist_to(&self, other: &Point) -> f64 { (*other - *self).length() }

    /// Axis of rotation from `start` to `end` around `self`:
    /// `(start - self) ^ (end - self)`, optionally normalized.
    pub fn axis(&self, start: &Point, end: &Point, normalize: bool) -> Vec3 {
        (*start - *self).axis(&(*end - *self), normalize)
    }

    /// Unsigned angle of rotation from `start` to `end` around `self`.
    pub fn angle(&self, start: &Point, end: &Point) -> crate::units::Radians {
        (*start - *self).angle(&(*end - *self))
    }

    /// Cotangent of the angle `(start, self, end)`.
    pub fn cotan(&self, start: &Point, end: &Point) -> f64 {
        (*start - *self).cotan(&(*end - *self))
    }

    /// The center of mass of the given points. The empty slice yields
    /// the origin.
    pub fn center(points: &[Point]) -> Point {
        if points.is_empty() {
            return Point::ORIGIN;
        }
        let mut acc = Vec3::ZERO;
        for p in points {
            acc += Vec3::from(*p);
        }
        let c = acc / points.len() as f64;
        Point::new(c.x(), c.y(), c.z())
    }

    /// True when all given points are coplanar within `tol`. Fewer than
    /// four points are always planar.
    pub fn planar(points: &[Point], tol: f64) -> bool {
        if points.len() < 4 {
            return true;
        }
        let p = points[0];
        let n = (points[1] - p).cross(&(points[2] - p));
        points[3..]
            .iter()
            .all(|q| n.is_parallel(&(points[1] - p).cross(&(*q - p)), tol))
    }

    /// Normalized barycentric weights of `self` with respect to the
    /// polygon `poly`, so that `w[0]*poly[0] + ... + w[n-1]*poly[n-1]`
    /// reconstructs `self`.
    ///
    /// Works for convex and concave planar faces and is continuous
    /// across the edges: a point sitting on an edge splits the weight
    /// between that edge's endpoints and zeroes all others. The point
    /// must be inside the face; a configuration whose weights sum to
    /// zero is a degenerate-input error.
    pub fn barycentric_weights(&self, poly: &[Point]) -> Result<Vec<f64>, Error> {
        if poly.len() < 3 {
            return Err(Error::DegenerateInput(format!(
                "barycentric weights need at least 3 polygon vertices, got {}",
                poly.len()
            )));
        }
        let n = poly.len();
        let mut w = vec![0.0; n];
        let tol = TOLERANCE;

        // A point on an edge is a limit case with an easy answer: the
        // weight splits between that edge's endpoints.
        for i in 0..n {
            let next = (i + 1) % n;
            let edge = poly[next] - poly[i];
            let e = edge.cross(&(*self - poly[i])).sqlength();
            let l = edge.sqlength();
            if e <= tol * l {
                if l < tol {
                    // Zero-length edge with the point on top of it.
                    w[i] = 0.5;
                    w[next] = 0.5;
                } else {
                    let di = (*self - poly[i]).length();
                    w[next] = di / l.sqrt();
                    w[i] = 1.0 - w[next];
                }
                return Ok(w);
            }
        }

        // Interior point: the cotangent method.
        let mut sum = 0.0;
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let sqlen = (*self - poly[i]).sqlength();
            w[i] = (poly[i].cotan(self, &poly[prev]) + poly[i].cotan(self, &poly[next])) / sqlen;
            sum += w[i];
        }
        if sum.abs() == 0.0 {
            return Err(Error::DegenerateInput(format!(
                "barycentric weights of {self} are undefined for the given face; \
                 the point must lie inside the planar face delimited by the vertices"
            )));
        }
        for wi in w.iter_mut() {
            *wi /= sum;
        }
        Ok(w)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl From<Vec3> for Point {
    fn from(v: Vec3) -> Point { Point::new(v.x(), v.y(), v.z()) }
}

impl From<Point> for VecN {
    fn from(p: Point) -> VecN { VecN::from(p.0.as_slice()) }
}

impl TryFrom<&VecN> for Point {
    type Error = Error;

    fn try_from(v: &VecN) -> Result<Self, Error> { Point::try_from(v.as_slice()) }
}

/// Translation; the point's weight is kept.
impl Add<Vec3> for Point {
    type Output = Point;

    fn add(self, rhs: Vec3) -> Point {
        Point([
            self.0[0] + rhs.x(),
            self.0[1] + rhs.y(),
            self.0[2] + rhs.z(),
            self.0[3],
        ])
    }
}

/// Translation; the point's weight is kept.
impl Sub<Vec3> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec3) -> Point { self + -rhs }
}

impl AddAssign<Vec3> for Point {
    fn add_assign(&mut self, rhs: Vec3) { *self = *self + rhs; }
}

impl SubAssign<Vec3> for Point {
    fn sub_assign(&mut self, rhs: Vec3) { *self = *self - rhs; }
}

/// Sum of the cartesianized positions.
impl Add for Point {
    type Output = Vec3;

    fn add(self, rhs: Point) -> Vec3 { Vec3::from(self) + Vec3::from(rhs) }
}

/// Displacement between the cartesianized positions.
impl Sub for Point {
    type Output = Vec3;

    fn sub(self, rhs: Point) -> Vec3 { Vec3::from(self) - Vec3::from(rhs) }
}

/// Full 4x4 row-vector product.
impl Mul<Mat4> for Point {
    type Output = Point;

    fn mul(self, rhs: Mat4) -> Point {
        let mut out = [0.0; 4];
        for (j, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|i| self.0[i] * rhs.entry(i, j)).sum();
        }
        Point(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn coercion_with_vectors() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let q = p + v;
        assert_eq!(q, Point::new(2.0, 4.0, 6.0));
        assert_eq!(q.w(), 1.0);
        assert_eq!(v + p, q);
        assert_eq!(q - p, v);
        assert_eq!(q - v, p);
    }

    #[test]
    fn weight_kept_through_translation() {
        let p = Point::with_weight(2.0, 4.0, 6.0, 2.0);
        let q = p + Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(q.w(), 2.0);
    }

    #[test]
    fn point_difference_cartesianizes_both() {
        let p = Point::with_weight(2.0, 4.0, 6.0, 2.0); // cartesian (1, 2, 3)
        let q = Point::new(1.0, 1.0, 1.0);
        assert_eq!(p - q, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(p + q, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn homogeneous_round_trip() {
        let p = Point::with_weight(1.0, 2.0, 3.0, 4.0);
        let rt = p.rational().homogen();
        assert!(rt.is_equivalent(&p, 1.0e-12));
        assert_eq!(p.cartesian().w(), 1.0);
        // Zero weight is a direction; cartesianize leaves it alone.
        let d = Point::with_weight(1.0, 2.0, 3.0, 0.0);
        assert_eq!(d.cartesian(), d);
    }

    #[test]
    fn distances() {
        let p = Point::new(0.0, 0.0, 0.0);
        let q = Point::with_weight(6.0, 8.0, 0.0, 2.0); // cartesian (3, 4, 0)
        assert_abs_diff_eq!(p.dist_to(&q), 5.0);
    }

    #[test]
    fn center_and_planar() {
        let pts = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(2.0, 2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        assert_eq!(Point::center(&pts), Point::new(1.0, 1.0, 0.0));
        assert!(Point::planar(&pts, 1.0e-10));
        let mut bent = pts;
        bent[3] = Point::new(0.0, 2.0, 1.0);
        assert!(!Point::planar(&bent, 1.0e-10));
        assert!(Point::planar(&pts[..3], 1.0e-10));
    }

    #[test]
    fn barycentric_weights_centroid() {
        // Equilateral triangle: the centroid weighs each vertex 1/3.
        let tri = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.5, 3.0f64.sqrt() / 2.0, 0.0),
        ];
        let c = Point::center(&tri);
        let w = c.barycentric_weights(&tri).unwrap();
        for wi in &w {
            assert_abs_diff_eq!(*wi, 1.0 / 3.0, epsilon = 1.0e-12);
        }
        assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn barycentric_weights_on_edge() {
        let tri = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(0.0, 4.0, 0.0),
        ];
        // A quarter of the way along the first edge.
        let p = Point::new(1.0, 0.0, 0.0);
        let w = p.barycentric_weights(&tri).unwrap();
        assert_abs_diff_eq!(w[0], 0.75, epsilon = 1.0e-12);
        assert_abs_diff_eq!(w[1], 0.25, epsilon = 1.0e-12);
        assert_eq!(w[2], 0.0);
    }

    #[test]
    fn barycentric_weights_reconstruct() {
        let quad = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 0.0),
            Point::new(3.0, 2.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ];
        let p = Point::new(1.0, 0.5, 0.0);
        let w = p.barycentric_weights(&quad).unwrap();
        let mut rebuilt = Vec3::ZERO;
        for (wi, q) in w.iter().zip(quad.iter()) {
            rebuilt += Vec3::from(*q) * *wi;
        }
        assert!(rebuilt.is_equivalent(&Vec3::from(p), 1.0e-9));
    }

    #[test]
    fn degenerate_polygon_rejected() {
        let p = Point::ORIGIN;
        assert!(matches!(
            p.barycentric_weights(&[Point::new(1.0, 0.0, 0.0)]),
            Err(Error::DegenerateInput(_))
        ));
    }

    #[test]
    fn matrix_product_uses_all_four_rows() {
        let mut m = Mat4::IDENTITY;
        m.set_entry(3, 0, 5.0); // translation in x
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p * m, Point::new(6.0, 2.0, 3.0));
        // A direction (w = 0) must ignore the translation row.
        let d = Point::with_weight(1.0, 2.0, 3.0, 0.0);
        assert_eq!(d * m, d);
    }
}
