//! Target edge-length fields.
//!
//! A [`LengthField`] tells the remesher how long an edge should be. Any
//! `Fn(&HalfEdgeMesh, EdgeId) -> f64` closure is a length field, so ad-hoc
//! fields need no new type:
//!
//! ```
//! use bubblemesh::algo::length::LengthField;
//! use bubblemesh::mesh::{EdgeId, HalfEdgeMesh};
//!
//! // Finer towards the origin.
//! let field = |mesh: &HalfEdgeMesh, e: EdgeId| 0.1 + 0.2 * mesh.edge_midpoint(e).coords.norm();
//! # let _: &dyn LengthField = &field;
//! ```

use nalgebra::Point3;

use crate::mesh::{EdgeId, HalfEdgeMesh, MeshIndex};

/// Target edge length as a function of mesh location.
///
/// Must be deterministic for a given mesh state. Values that are not
/// positive and finite abort the remesh step.
pub trait LengthField<I: MeshIndex = u32>: Send + Sync {
    /// Desired length of edge `edge`.
    fn evaluate(&self, mesh: &HalfEdgeMesh<I>, edge: EdgeId<I>) -> f64;
}

impl<I, F> LengthField<I> for F
where
    I: MeshIndex,
    F: Fn(&HalfEdgeMesh<I>, EdgeId<I>) -> f64 + Send + Sync,
{
    fn evaluate(&self, mesh: &HalfEdgeMesh<I>, edge: EdgeId<I>) -> f64 {
        self(mesh, edge)
    }
}

/// The same length everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLength(pub f64);

impl<I: MeshIndex> LengthField<I> for ConstantLength {
    fn evaluate(&self, _mesh: &HalfEdgeMesh<I>, _edge: EdgeId<I>) -> f64 {
        self.0
    }
}

/// Inverse-distance blend of sizes attached to points, plus a background
/// size.
///
/// At location `x` each size point `p_j` gets weight `|x - p_j|^-falloff`,
/// the background gets `background_weight`, and the result is the weighted
/// mean of the sizes. Evaluated at the edge midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPointLength {
    points: Vec<(Point3<f64>, f64)>,
    falloff: f64,
    background: f64,
    background_weight: f64,
}

impl WeightedPointLength {
    /// Field that is `background` everywhere until size points are added.
    pub fn new(background: f64) -> Self {
        Self {
            points: Vec::new(),
            falloff: 2.0,
            background,
            background_weight: 1.0,
        }
    }

    /// Add a size point.
    pub fn with_point(mut self, point: Point3<f64>, size: f64) -> Self {
        self.points.push((point, size));
        self
    }

    /// Set the distance exponent (default 2).
    pub fn with_falloff(mut self, falloff: f64) -> Self {
        self.falloff = falloff;
        self
    }

    /// Set the weight of the background size (default 1).
    pub fn with_background_weight(mut self, weight: f64) -> Self {
        self.background_weight = weight;
        self
    }

    /// Size at an arbitrary location.
    pub fn size_at(&self, x: &Point3<f64>) -> f64 {
        let mut weighted = self.background_weight * self.background;
        let mut total = self.background_weight;

        for (p, size) in &self.points {
            let dist = (x - p).norm();
            if dist < f64::EPSILON {
                return *size;
            }
            let w = dist.powf(-self.falloff);
            weighted += w * size;
            total += w;
        }

        weighted / total
    }
}

impl<I: MeshIndex> LengthField<I> for WeightedPointLength {
    fn evaluate(&self, mesh: &HalfEdgeMesh<I>, edge: EdgeId<I>) -> f64 {
        self.size_at(&mesh.edge_midpoint(edge))
    }
}
