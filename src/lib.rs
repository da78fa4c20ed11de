//! # Sliver
//!
//! A surface-mesh editing and remeshing toolkit.
//!
//! Sliver provides an indexed triangle/quad surface mesh together with the
//! editing passes a mesh-repair pipeline needs: hole filling, short-edge
//! collapse, quality-driven edge flips, centroidal-Voronoi decimation and
//! a set of repair tasks, plus the finite-element shape-function kernels
//! and element quality metrics used to score the results.
//!
//! ## Quick Start
//!
//! ```
//! use sliver::prelude::*;
//! use nalgebra::Point3;
//!
//! // a tetrahedron with one face missing
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3]];
//! let mesh = SurfaceMesh::from_triangles(&points, &faces).unwrap();
//! assert!(!mesh.is_closed());
//!
//! // close it
//! let filled = fill_all_holes(&mesh).unwrap();
//! assert!(filled.is_closed());
//! ```
//!
//! ## Ownership contract
//!
//! Modifiers never mutate their input: each takes the mesh by shared
//! reference and returns a freshly built [`mesh::SurfaceMesh`] the caller
//! owns. A failed operation returns a [`error::MeshError`] and produces
//! nothing; no partially rewired mesh ever escapes.
//!
//! ## Element kernels
//!
//! The [`elem`] module carries closed-form shape functions, parametric
//! derivatives, nodal iso-parametric coordinates and quadrature rules for
//! tetrahedra, hexahedra, wedges, pyramids and shell elements up to the
//! 27-node hex, with volume/Jacobian evaluation and shape-quality metrics
//! built on top of them:
//!
//! ```
//! use sliver::elem::{element_volume, ElemType};
//! use nalgebra::Point3;
//!
//! let tet = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let v = element_volume(ElemType::Tet4, &tet);
//! assert!((v - 1.0 / 6.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod elem;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use sliver::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        collapse_short_edges, cvd_decimate, fill_all_holes, fill_hole, fix_mesh, flip_edges,
        CollapseOptions, CvdOptions, FillHoleOptions, FlipOptions, Progress, RepairTask,
    };
    pub use crate::elem::{ElemType, MAX_GAUSS, MAX_NODES};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{Edge, Face, FaceKind, Node, SurfaceMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
