//! Reset-or-step driver for hosts that call the remesher once per tick.

use super::{RemeshInput, RemeshOptions, Remesher};
use crate::error::Result;
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Where a [`RemeshSession`] is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No mesh yet; the next call builds one.
    Uninitialized,
    /// A mesh exists; each call runs one step.
    Stepping,
}

/// Holds a [`Remesher`] between calls.
///
/// The first call, or any call with `reset`, builds a fresh remesher from
/// the input and returns the seeded mesh without relaxing it. Every other
/// call runs one [`Remesher::step`] with the options given.
///
/// ```
/// use bubblemesh::prelude::*;
/// use bubblemesh::algo::length::ConstantLength;
/// use bubblemesh::algo::remesh::{RemeshInput, RemeshOptions, RemeshSession, SessionState};
/// use bubblemesh::geometry::TriangleSurface;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// ];
/// let input = || {
///     let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
///     let surface = TriangleSurface::from_mesh(&mesh);
///     RemeshInput::new(mesh, surface, ConstantLength(0.5))
/// };
///
/// let mut session = RemeshSession::new();
/// let options = RemeshOptions::default();
/// assert_eq!(session.solve(false, &options, input).unwrap().face_count(), 1);
/// assert_eq!(session.state(), SessionState::Stepping);
/// assert!(session.solve(false, &options, input).unwrap().face_count() > 1);
/// ```
#[derive(Debug)]
pub struct RemeshSession<I: MeshIndex = u32> {
    remesher: Option<Remesher<I>>,
}

impl<I: MeshIndex> Default for RemeshSession<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> RemeshSession<I> {
    /// Create an uninitialized session.
    pub fn new() -> Self {
        Self { remesher: None }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        match self.remesher {
            Some(_) => SessionState::Stepping,
            None => SessionState::Uninitialized,
        }
    }

    /// The remesher, once built.
    pub fn remesher(&self) -> Option<&Remesher<I>> {
        self.remesher.as_ref()
    }

    /// Drop the current mesh; the next call rebuilds.
    pub fn reset(&mut self) {
        self.remesher = None;
    }

    /// Build or step, then return the current mesh.
    ///
    /// `input` is only called when a rebuild happens.
    ///
    /// # Errors
    /// Anything [`Remesher::new`] or [`Remesher::step`] reports. A failed
    /// rebuild leaves the session uninitialized.
    pub fn solve<F>(&mut self, reset: bool, options: &RemeshOptions, input: F) -> Result<&HalfEdgeMesh<I>>
    where
        F: FnOnce() -> RemeshInput<I>,
    {
        if reset {
            self.remesher = None;
        }

        let remesher = match self.remesher.take() {
            Some(remesher) => self.remesher.insert(remesher),
            None => {
                let built = Remesher::new(input(), options.clone())?;
                return Ok(self.remesher.insert(built).mesh());
            }
        };

        remesher.set_options(options.clone())?;
        remesher.step()?;
        Ok(remesher.mesh())
    }
}
