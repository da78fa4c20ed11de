//! Indexed surface mesh.
//!
//! [`SurfaceMesh`] stores nodes, edges and faces as flat, index-addressed
//! arrays. Faces carry their own per-edge neighbor and edge-table indices,
//! which makes boundary walks and local surgery (edge flips) cheap, while
//! [`SurfaceMesh::rebuild`] reconstructs all derived tables from scratch
//! after batch insertions or removals.
//!
//! Modifier algorithms never mutate a caller's mesh: they clone it, operate
//! on the clone, and return it. All scratch state (visited marks, cluster
//! tags) lives in algorithm-local vectors keyed by index, never on the mesh
//! entities themselves, so concurrent operations on distinct meshes cannot
//! interfere.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// The kind of polygon a face is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Three-node triangle.
    Tri3,
    /// Four-node quadrilateral.
    Quad4,
}

impl FaceKind {
    /// Number of nodes (and edges) of this face kind.
    #[inline]
    pub fn node_count(self) -> usize {
        match self {
            FaceKind::Tri3 => 3,
            FaceKind::Quad4 => 4,
        }
    }
}

/// A mesh node: a position plus a partition id.
#[derive(Debug, Clone)]
pub struct Node {
    /// 3D position.
    pub pos: Point3<f64>,
    /// Partition/group id (`-1` = unassigned).
    pub gid: i32,
}

impl Node {
    /// Create a node at the given position with no partition id.
    pub fn new(pos: Point3<f64>) -> Self {
        Self { pos, gid: -1 }
    }
}

/// A mesh edge: two node indices plus a partition id.
///
/// An edge with `gid >= 0` is a *feature edge*: it marks a geometric
/// partition boundary that smoothing and collapsing operations must not
/// move or remove.
#[derive(Debug, Clone)]
pub struct Edge {
    /// The two endpoint node indices.
    pub nodes: [usize; 2],
    /// Partition id; `>= 0` marks a feature edge.
    pub gid: i32,
}

impl Edge {
    /// Whether this edge is a feature edge.
    #[inline]
    pub fn is_feature(&self) -> bool {
        self.gid >= 0
    }

    /// The endpoint that is not `n`.
    #[inline]
    pub fn other(&self, n: usize) -> usize {
        if self.nodes[0] == n {
            self.nodes[1]
        } else {
            self.nodes[0]
        }
    }
}

/// Maximum nodes per face (quad).
pub const MAX_FACE_NODES: usize = 4;

/// A triangle or quad face.
///
/// Edge `j` of a face joins local nodes `j` and `(j + 1) % n`. The `nbr`
/// and `edge` tables are derived state maintained by
/// [`SurfaceMesh::rebuild`]; `nbr[j]` is `None` when edge `j` is a boundary
/// or non-manifold edge.
#[derive(Debug, Clone)]
pub struct Face {
    /// Triangle or quad.
    pub kind: FaceKind,
    /// Node indices, CCW; entries past `kind.node_count()` are unused.
    pub nodes: [usize; MAX_FACE_NODES],
    /// Neighbor face across each edge.
    pub nbr: [Option<usize>; MAX_FACE_NODES],
    /// Edge-table index of each edge.
    pub edge: [Option<usize>; MAX_FACE_NODES],
    /// Per-corner vertex normals.
    pub normals: [Vector3<f64>; MAX_FACE_NODES],
    /// Partition/group id.
    pub gid: i32,
}

impl Face {
    /// Create a triangle face.
    pub fn tri(n0: usize, n1: usize, n2: usize) -> Self {
        Self {
            kind: FaceKind::Tri3,
            nodes: [n0, n1, n2, 0],
            nbr: [None; MAX_FACE_NODES],
            edge: [None; MAX_FACE_NODES],
            normals: [Vector3::zeros(); MAX_FACE_NODES],
            gid: 0,
        }
    }

    /// Create a quad face.
    pub fn quad(n0: usize, n1: usize, n2: usize, n3: usize) -> Self {
        Self {
            kind: FaceKind::Quad4,
            nodes: [n0, n1, n2, n3],
            nbr: [None; MAX_FACE_NODES],
            edge: [None; MAX_FACE_NODES],
            normals: [Vector3::zeros(); MAX_FACE_NODES],
            gid: 0,
        }
    }

    /// Number of nodes (= edges) of this face.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.kind.node_count()
    }

    /// The used portion of the node array.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.nodes[..self.kind.node_count()]
    }

    /// The two node indices of local edge `j`, in face winding order.
    #[inline]
    pub fn edge_nodes(&self, j: usize) -> (usize, usize) {
        let n = self.node_count();
        (self.nodes[j], self.nodes[(j + 1) % n])
    }

    /// Reverse the winding of this face in place.
    ///
    /// Triangles swap nodes 1 and 2; quads reverse to `[0, 3, 2, 1]` so
    /// node 0 stays node 0 in both cases.
    pub fn invert(&mut self) {
        match self.kind {
            FaceKind::Tri3 => self.nodes.swap(1, 2),
            FaceKind::Quad4 => self.nodes.swap(1, 3),
        }
    }

    /// Whether `other` has the same vertex set, in any order.
    pub fn same_vertices(&self, other: &Face) -> bool {
        if self.kind != other.kind {
            return false;
        }
        self.vertices()
            .iter()
            .all(|n| other.vertices().contains(n))
    }
}

/// An indexed triangle/quad surface mesh.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    /// All nodes.
    pub nodes: Vec<Node>,
    /// All edges. Canonical (deduplicated) edge table derived from the faces.
    pub edges: Vec<Edge>,
    /// All faces.
    pub faces: Vec<Face>,
}

impl SurfaceMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from vertex positions and triangle connectivity.
    ///
    /// Validates indices, builds the edge table, neighbor tables and
    /// vertex normals.
    pub fn from_triangles(points: &[Point3<f64>], tris: &[[usize; 3]]) -> Result<Self> {
        let faces = tris
            .iter()
            .map(|t| Face::tri(t[0], t[1], t[2]))
            .collect::<Vec<_>>();
        Self::from_parts(points, faces)
    }

    /// Build a mesh from vertex positions and quad connectivity.
    pub fn from_quads(points: &[Point3<f64>], quads: &[[usize; 4]]) -> Result<Self> {
        let faces = quads
            .iter()
            .map(|q| Face::quad(q[0], q[1], q[2], q[3]))
            .collect::<Vec<_>>();
        Self::from_parts(points, faces)
    }

    fn from_parts(points: &[Point3<f64>], faces: Vec<Face>) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            let verts = face.vertices();
            for (j, &v) in verts.iter().enumerate() {
                if v >= points.len() {
                    return Err(MeshError::InvalidVertexIndex { face: i, vertex: v });
                }
                if verts[..j].contains(&v) {
                    return Err(MeshError::DegenerateFace { face: i });
                }
            }
        }
        let mut mesh = Self {
            nodes: points.iter().map(|&p| Node::new(p)).collect(),
            edges: Vec::new(),
            faces,
        };
        mesh.rebuild();
        Ok(mesh)
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of node `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Point3<f64> {
        self.nodes[i].pos
    }

    /// Whether every face is a triangle.
    pub fn is_tri_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.kind == FaceKind::Tri3)
    }

    /// Whether every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.kind == FaceKind::Quad4)
    }

    /// Whether the mesh is closed: every face edge has a neighbor.
    pub fn is_closed(&self) -> bool {
        self.faces
            .iter()
            .all(|f| f.nbr[..f.node_count()].iter().all(|n| n.is_some()))
    }

    /// Number of face edges without a neighbor.
    pub fn boundary_edge_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.nbr[..f.node_count()].iter().filter(|n| n.is_none()).count())
            .sum()
    }

    /// Unit normal of face `i` (Newell's method, robust for warped quads).
    pub fn face_normal(&self, i: usize) -> Vector3<f64> {
        let face = &self.faces[i];
        let n = face.node_count();
        let mut normal = Vector3::zeros();
        for j in 0..n {
            let a = self.nodes[face.nodes[j]].pos;
            let b = self.nodes[face.nodes[(j + 1) % n]].pos;
            normal += (a - Point3::origin()).cross(&(b - Point3::origin()));
        }
        let len = normal.norm();
        if len > 0.0 {
            normal / len
        } else {
            normal
        }
    }

    /// Area-insensitive averaged unit normal per node.
    pub fn vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut normals = vec![Vector3::zeros(); self.nodes.len()];
        for i in 0..self.faces.len() {
            let fnorm = self.face_normal(i);
            for &n in self.faces[i].vertices() {
                normals[n] += fnorm;
            }
        }
        for n in normals.iter_mut() {
            let len = n.norm();
            if len > 0.0 {
                *n /= len;
            }
        }
        normals
    }

    /// Rebuild all derived topology: the edge table, the per-face edge and
    /// neighbor tables, and the per-corner vertex normals.
    ///
    /// Feature-edge partition ids survive a rebuild as long as the edge's
    /// node pair still exists in the new mesh.
    ///
    /// Call this after any batch of face/node insertions or removals;
    /// intermediate states with dangling adjacency must never escape to a
    /// caller.
    pub fn rebuild(&mut self) {
        // remember feature ids by node pair
        let mut feature: HashMap<(usize, usize), i32> = HashMap::new();
        for e in &self.edges {
            if e.is_feature() {
                feature.insert(ordered(e.nodes[0], e.nodes[1]), e.gid);
            }
        }

        let tables = super::topology::build_edge_tables(&self.faces);
        self.edges = tables
            .edges
            .into_iter()
            .map(|nodes| {
                let gid = feature
                    .get(&ordered(nodes[0], nodes[1]))
                    .copied()
                    .unwrap_or(-1);
                Edge { nodes, gid }
            })
            .collect();
        for (i, face) in self.faces.iter_mut().enumerate() {
            face.edge = tables.face_edges[i];
            face.nbr = tables.face_nbrs[i];
        }

        self.update_normals();
    }

    /// Recompute per-corner vertex normals from the current face geometry.
    pub fn update_normals(&mut self) {
        let vnorms = self.vertex_normals();
        for face in self.faces.iter_mut() {
            for j in 0..face.node_count() {
                face.normals[j] = vnorms[face.nodes[j]];
            }
        }
    }

    /// Reverse the winding of every face.
    pub fn invert(&mut self) {
        for face in self.faces.iter_mut() {
            face.invert();
        }
        self.rebuild();
    }
}

/// A node pair in canonical (sorted) order, for keying unordered edges.
#[inline]
pub(crate) fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_strip() -> SurfaceMesh {
        // two triangles forming a unit square in the xy-plane
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let tris = vec![[0, 1, 2], [0, 2, 3]];
        SurfaceMesh::from_triangles(&points, &tris).unwrap()
    }

    #[test]
    fn test_build_and_adjacency() {
        let mesh = quad_strip();
        assert_eq!(mesh.node_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        // 5 unique edges: 4 boundary + 1 shared diagonal
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.boundary_edge_count(), 4);
        assert!(!mesh.is_closed());

        // the two faces must be neighbors across the diagonal 0-2
        let f0 = &mesh.faces[0];
        let shared: Vec<usize> = (0..3).filter(|&j| f0.nbr[j] == Some(1)).collect();
        assert_eq!(shared.len(), 1);
        let (a, b) = f0.edge_nodes(shared[0]);
        assert_eq!(ordered(a, b), (0, 2));
    }

    #[test]
    fn test_invalid_index_rejected() {
        let points = vec![Point3::origin(); 3];
        let err = SurfaceMesh::from_triangles(&points, &[[0, 1, 7]]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidVertexIndex { vertex: 7, .. }));
    }

    #[test]
    fn test_degenerate_face_rejected() {
        let points = vec![Point3::origin(); 3];
        let err = SurfaceMesh::from_triangles(&points, &[[0, 1, 1]]).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateFace { face: 0 }));
    }

    #[test]
    fn test_face_normal_and_vertex_normals() {
        let mesh = quad_strip();
        let n = mesh.face_normal(0);
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        for vn in mesh.vertex_normals() {
            assert!((vn - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_feature_gid_survives_rebuild() {
        let mut mesh = quad_strip();
        // mark the diagonal as a feature edge
        let diag = mesh
            .edges
            .iter()
            .position(|e| ordered(e.nodes[0], e.nodes[1]) == (0, 2))
            .unwrap();
        mesh.edges[diag].gid = 3;
        mesh.rebuild();
        let diag = mesh
            .edges
            .iter()
            .find(|e| ordered(e.nodes[0], e.nodes[1]) == (0, 2))
            .unwrap();
        assert_eq!(diag.gid, 3);
    }

    #[test]
    fn test_invert_reverses_normals() {
        let mut mesh = quad_strip();
        mesh.invert();
        let n = mesh.face_normal(0);
        assert!((n - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        // adjacency still intact
        assert_eq!(mesh.boundary_edge_count(), 4);
    }
}
