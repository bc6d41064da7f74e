//! Target geometry queries.
//!
//! The remesher only talks to its target surface and constraint curves
//! through two small traits. [`TriangleSurface`] and [`Polyline`] are
//! brute-force reference implementations suitable for moderate inputs.

mod curve;
pub mod primitives;
mod surface;

use nalgebra::{Point3, Vector3};

pub use curve::Polyline;
pub use surface::TriangleSurface;

/// Closest-point and ray queries against the surface being remeshed.
pub trait GeometryProjector: Send + Sync {
    /// Closest point on the surface to `p`, or `None` if the surface is empty.
    fn closest_point(&self, p: &Point3<f64>) -> Option<Point3<f64>>;

    /// Nearest intersection of the ray `origin + t * direction` with `t > 0`.
    ///
    /// Returns the parameter `t` (in units of `direction`) and the hit point.
    fn ray_intersect(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
    ) -> Option<(f64, Point3<f64>)>;
}

/// A curve that constrained vertices slide along.
pub trait FeatureCurve: Send + Sync {
    /// Closest point on the curve to `p`, with its curve parameter.
    fn closest_point(&self, p: &Point3<f64>) -> (f64, Point3<f64>);

    /// Distance from `p` to the curve.
    fn distance(&self, p: &Point3<f64>) -> f64 {
        (self.closest_point(p).1 - p).norm()
    }
}
