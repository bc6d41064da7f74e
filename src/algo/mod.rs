//! Remeshing algorithms.
//!
//! - **Length fields**: target edge length per location ([`length`])
//! - **Smoothing**: Laplacian displacement fields ([`smooth`])
//! - **Remeshing**: the incremental split/collapse/flip/relax engine ([`remesh`])

pub mod length;
pub mod remesh;
pub mod smooth;
