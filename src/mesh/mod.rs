//! Core mesh data structures.
//!
//! This module provides the indexed surface-mesh representation the editing
//! algorithms operate on, together with the adjacency tables they query.
//!
//! # Overview
//!
//! The primary type is [`SurfaceMesh`]: flat vectors of [`Node`]s, [`Edge`]s
//! and [`Face`]s addressed by index. Faces store per-edge neighbor indices
//! and edge-table indices, so boundary detection and fan walks are array
//! lookups. After a batch of insertions or deletions,
//! [`SurfaceMesh::rebuild`] reconstructs every derived table in one pass.
//!
//! # Construction
//!
//! ```
//! use sliver::mesh::SurfaceMesh;
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh = SurfaceMesh::from_triangles(&points, &[[0, 1, 2]]).unwrap();
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.edge_count(), 3);
//! ```

mod surface;
pub mod topology;

pub use surface::{Edge, Face, FaceKind, Node, SurfaceMesh, MAX_FACE_NODES};
pub use topology::{
    build_edge_tables, EdgeFaceList, EdgeTables, NodeEdgeList, NodeFaceList, NodeNodeList,
};
