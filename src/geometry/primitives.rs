//! Point/segment/triangle queries used by the reference projectors.

use nalgebra::{Point3, Vector3};

/// Closest point to `p` on triangle `(a, b, c)`.
///
/// Voronoi-region walk after Ericson, *Real-Time Collision Detection* §5.1.5.
pub fn closest_point_on_triangle(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> Point3<f64> {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return a + ab * (d1 / (d1 - d3));
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = va + vb + vc;
    if denom.abs() < f64::EPSILON {
        // Degenerate triangle; fall back to its vertices.
        return *[a, b, c]
            .into_iter()
            .min_by(|x, y| (*x - p).norm_squared().total_cmp(&(*y - p).norm_squared()))
            .unwrap_or(a);
    }
    a + ab * (vb / denom) + ac * (vc / denom)
}

/// Möller–Trumbore ray/triangle test.
///
/// Returns the ray parameter `t > epsilon` of the hit, measured in units of
/// `direction`. Rays are treated as parallel when the sine of their angle
/// to the triangle plane is below `epsilon`, so the test does not depend on
/// model scale.
pub fn ray_triangle_intersect(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    tri: &[Point3<f64>; 3],
    epsilon: f64,
) -> Option<f64> {
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];

    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Parallel to the triangle plane
    let scale = edge1.norm() * edge2.norm() * direction.norm();
    if a.abs() <= epsilon * scale {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - tri[0];
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t > epsilon).then_some(t)
}

/// Closest point to `p` on segment `[a, b]`, with its local parameter in
/// `[0, 1]`.
pub fn closest_point_on_segment(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
) -> (f64, Point3<f64>) {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < f64::EPSILON {
        return (0.0, *a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (t, a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_closest_point_regions() {
        let [a, b, c] = unit_triangle();

        let inside = closest_point_on_triangle(&Point3::new(0.25, 0.25, 2.0), &a, &b, &c);
        assert_relative_eq!(inside, Point3::new(0.25, 0.25, 0.0), epsilon = 1e-12);

        let vertex = closest_point_on_triangle(&Point3::new(-1.0, -1.0, 0.0), &a, &b, &c);
        assert_relative_eq!(vertex, a, epsilon = 1e-12);

        let edge = closest_point_on_triangle(&Point3::new(1.0, 1.0, 0.0), &a, &b, &c);
        assert_relative_eq!(edge, Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);

        let below = closest_point_on_triangle(&Point3::new(0.5, -2.0, 1.0), &a, &b, &c);
        assert_relative_eq!(below, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_ray_hit_and_miss() {
        let tri = unit_triangle();
        let origin = Point3::new(0.2, 0.2, 1.0);

        let t = ray_triangle_intersect(&origin, &Vector3::new(0.0, 0.0, -2.0), &tri, 1e-12);
        assert_relative_eq!(t.unwrap(), 0.5, epsilon = 1e-12);

        // Pointing away
        assert!(ray_triangle_intersect(&origin, &Vector3::z(), &tri, 1e-12).is_none());
        // Outside the triangle
        let far = Point3::new(2.0, 2.0, 1.0);
        assert!(ray_triangle_intersect(&far, &-Vector3::z(), &tri, 1e-12).is_none());
        // In the triangle plane
        let grazing = Point3::new(-1.0, 0.2, 0.0);
        assert!(ray_triangle_intersect(&grazing, &Vector3::x(), &tri, 1e-12).is_none());
    }

    #[test]
    fn test_ray_hit_is_scale_invariant() {
        for scale in [1e-7, 1.0, 1e6] {
            let tri = unit_triangle().map(|p| p * scale);
            let origin = Point3::new(0.2, 0.2, 1.0) * scale;
            let t = ray_triangle_intersect(&origin, &(-Vector3::z() * scale), &tri, 1e-12);
            assert_relative_eq!(t.unwrap(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_segment_clamps() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let (t, q) = closest_point_on_segment(&Point3::new(1.0, 3.0, 0.0), &a, &b);
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(q, Point3::new(1.0, 0.0, 0.0));

        let (t, q) = closest_point_on_segment(&Point3::new(5.0, 0.0, 0.0), &a, &b);
        assert_relative_eq!(t, 1.0);
        assert_relative_eq!(q, b);
    }
}
