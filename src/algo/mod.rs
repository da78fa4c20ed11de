//! Mesh editing algorithms.
//!
//! This module contains the surface-mesh modifiers:
//!
//! - **Hole filling**: boundary-ring discovery and triangulation
//!   ([`fill_hole`]), with an advancing-front variant that inserts new
//!   vertices, and a quad-mesh analog ([`fill_quad_hole`])
//! - **Edge collapse**: short-edge removal with feature preservation
//!   ([`collapse_short_edges`])
//! - **Edge flip**: quality-driven local Delaunay-style flips
//!   ([`flip_edges`])
//! - **Decimation**: centroidal-Voronoi clustering of faces
//!   ([`cvd_decimate`])
//! - **Repair**: duplicate/non-manifold face removal, winding fixes,
//!   inversion and hole filling as selectable tasks ([`fix_mesh`])
//!
//! Every modifier takes its input mesh by shared reference and returns a
//! new mesh; a failed operation returns an error and leaves the input
//! untouched.

pub mod decimate;
pub mod edge_collapse;
pub mod edge_flip;
pub mod fill_hole;
pub mod fill_quad_hole;
pub mod repair;

pub use decimate::{cvd_decimate, CvdOptions};
pub use edge_collapse::{collapse_short_edges, CollapseOptions};
pub use edge_flip::{flip_edges, FlipOptions};
pub use fill_hole::{
    fill_all_holes, fill_all_holes_with_progress, fill_hole, find_edge_ring, EdgeRing,
    FillHoleOptions,
};
pub use fill_quad_hole::{fill_all_quad_holes, fill_quad_hole};
pub use repair::{
    fix_mesh, fix_winding, invert_faces, remove_duplicate_edges, remove_duplicate_faces,
    remove_non_manifold_faces, RepairTask,
};

/// A progress callback for long-running operations.
///
/// Purely advisory: algorithms report a percentage in `[0, 100]` and never
/// depend on the callback being present or doing anything.
pub struct Progress {
    callback: Box<dyn Fn(f64) + Send + Sync>,
}

impl Progress {
    /// Create a progress reporter from a callback receiving percent
    /// complete.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report a completion percentage in `[0, 100]`.
    #[inline]
    pub fn report(&self, percent: f64) {
        (self.callback)(percent);
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
