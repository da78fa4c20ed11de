//! Adjacency tables over a [`SurfaceMesh`].
//!
//! These are the query structures the editing algorithms lean on: node→face,
//! node→edge, node→node and edge→face lists, plus the pure
//! [`build_edge_tables`] function that derives the canonical edge table and
//! per-face neighbor indices from the face list alone.
//!
//! Every structure here is a value built from a mesh snapshot; nothing holds
//! a reference back into the mesh, so an algorithm can keep them on its own
//! stack while it rewrites the mesh and rebuild them when done.

use std::collections::HashMap;

use crate::error::{MeshError, Result};
use crate::mesh::surface::{ordered, Face, SurfaceMesh};

/// Result of [`build_edge_tables`]: the canonical edge list plus per-face
/// edge indices and neighbor faces.
pub struct EdgeTables {
    /// Unique edges in first-seen face order, as node pairs in face winding.
    pub edges: Vec<[usize; 2]>,
    /// For each face, the edge-table index of each local edge.
    pub face_edges: Vec<[Option<usize>; 4]>,
    /// For each face, the neighbor face across each local edge. `None` for
    /// boundary edges and for non-manifold edges (more than two faces).
    pub face_nbrs: Vec<[Option<usize>; 4]>,
}

/// Derive the edge table and neighbor tables from a face list.
///
/// This is a pure function of the faces: it allocates fresh output and
/// reads nothing else, so it can be tested (and reasoned about) in
/// isolation from the mesh it will be stored back into.
pub fn build_edge_tables(faces: &[Face]) -> EdgeTables {
    let mut index: HashMap<(usize, usize), usize> = HashMap::new();
    let mut edges: Vec<[usize; 2]> = Vec::new();
    let mut edge_faces: Vec<Vec<usize>> = Vec::new();
    let mut face_edges = vec![[None; 4]; faces.len()];

    for (i, face) in faces.iter().enumerate() {
        for j in 0..face.node_count() {
            let (a, b) = face.edge_nodes(j);
            let key = ordered(a, b);
            let e = *index.entry(key).or_insert_with(|| {
                edges.push([a, b]);
                edge_faces.push(Vec::new());
                edges.len() - 1
            });
            edge_faces[e].push(i);
            face_edges[i][j] = Some(e);
        }
    }

    let mut face_nbrs = vec![[None; 4]; faces.len()];
    for (i, face) in faces.iter().enumerate() {
        for j in 0..face.node_count() {
            let e = face_edges[i][j].unwrap();
            let owners = &edge_faces[e];
            if owners.len() == 2 {
                face_nbrs[i][j] = Some(if owners[0] == i { owners[1] } else { owners[0] });
            }
        }
    }

    EdgeTables {
        edges,
        face_edges,
        face_nbrs,
    }
}

/// Node → incident faces.
#[derive(Debug, Clone)]
pub struct NodeFaceList {
    lists: Vec<Vec<usize>>,
}

impl NodeFaceList {
    /// Build the list in face-scan order.
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let mut lists = vec![Vec::new(); mesh.node_count()];
        for (i, face) in mesh.faces.iter().enumerate() {
            for &n in face.vertices() {
                lists[n].push(i);
            }
        }
        Self { lists }
    }

    /// Build the list with each node's faces in rotational order around the
    /// node, walking the neighbor table.
    ///
    /// Fails when the fan around some node cannot be walked to a single
    /// closed cycle, i.e. the node sits on a boundary or a non-manifold
    /// junction.
    pub fn build_sorted(mesh: &SurfaceMesh) -> Result<Self> {
        let unsorted = Self::build(mesh);
        let mut lists = vec![Vec::new(); mesh.node_count()];

        for node in 0..mesh.node_count() {
            let fan = &unsorted.lists[node];
            if fan.is_empty() {
                continue;
            }
            let start = fan[0];
            let mut sorted = Vec::with_capacity(fan.len());
            let mut current = start;
            loop {
                sorted.push(current);
                let face = &mesh.faces[current];
                let k = face
                    .vertices()
                    .iter()
                    .position(|&v| v == node)
                    .expect("face listed at node must contain it");
                // cross the edge leaving `node` to the next face in the fan
                match face.nbr[k] {
                    Some(next) if next == start => break,
                    Some(next) => current = next,
                    None => {
                        return Err(MeshError::topology(format!(
                            "face fan around node {node} is open or non-manifold"
                        )))
                    }
                }
                if sorted.len() > fan.len() {
                    return Err(MeshError::topology(format!(
                        "face fan around node {node} does not close"
                    )));
                }
            }
            if sorted.len() != fan.len() {
                return Err(MeshError::topology(format!(
                    "node {node} has a disconnected face fan"
                )));
            }
            lists[node] = sorted;
        }

        Ok(Self { lists })
    }

    /// Faces incident on `node`.
    #[inline]
    pub fn faces(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }

    /// Number of faces incident on `node`.
    #[inline]
    pub fn valence(&self, node: usize) -> usize {
        self.lists[node].len()
    }
}

/// Node → incident edges.
#[derive(Debug, Clone)]
pub struct NodeEdgeList {
    lists: Vec<Vec<usize>>,
}

impl NodeEdgeList {
    /// Build from the mesh's edge table.
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let mut lists = vec![Vec::new(); mesh.node_count()];
        for (i, edge) in mesh.edges.iter().enumerate() {
            lists[edge.nodes[0]].push(i);
            lists[edge.nodes[1]].push(i);
        }
        Self { lists }
    }

    /// Edges incident on `node`.
    #[inline]
    pub fn edges(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }
}

/// Node → neighbor nodes (unique, unordered).
#[derive(Debug, Clone)]
pub struct NodeNodeList {
    lists: Vec<Vec<usize>>,
}

impl NodeNodeList {
    /// Build from face connectivity.
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); mesh.node_count()];
        for face in &mesh.faces {
            let n = face.node_count();
            for j in 0..n {
                let a = face.nodes[j];
                let b = face.nodes[(j + 1) % n];
                if !lists[a].contains(&b) {
                    lists[a].push(b);
                }
                if !lists[b].contains(&a) {
                    lists[b].push(a);
                }
            }
        }
        Self { lists }
    }

    /// Neighbor nodes of `node`.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.lists[node]
    }

    /// Number of neighbors of `node`.
    #[inline]
    pub fn valence(&self, node: usize) -> usize {
        self.lists[node].len()
    }
}

/// Edge → incident faces, aligned with the mesh edge table.
#[derive(Debug, Clone)]
pub struct EdgeFaceList {
    lists: Vec<Vec<usize>>,
}

impl EdgeFaceList {
    /// Build from the per-face edge indices.
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let mut lists = vec![Vec::new(); mesh.edge_count()];
        for (i, face) in mesh.faces.iter().enumerate() {
            for j in 0..face.node_count() {
                if let Some(e) = face.edge[j] {
                    lists[e].push(i);
                }
            }
        }
        Self { lists }
    }

    /// Faces incident on edge `e`.
    #[inline]
    pub fn faces(&self, e: usize) -> &[usize] {
        &self.lists[e]
    }

    /// Mutable face list of edge `e` (used by local edge-flip surgery).
    #[inline]
    pub(crate) fn faces_mut(&mut self, e: usize) -> &mut Vec<usize> {
        &mut self.lists[e]
    }

    /// Number of edges covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn tetrahedron() -> SurfaceMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        SurfaceMesh::from_triangles(&points, &faces).unwrap()
    }

    #[test]
    fn test_edge_tables_closed() {
        let mesh = tetrahedron();
        assert_eq!(mesh.edge_count(), 6);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_node_face_list() {
        let mesh = tetrahedron();
        let nfl = NodeFaceList::build(&mesh);
        for n in 0..4 {
            assert_eq!(nfl.valence(n), 3);
        }
    }

    #[test]
    fn test_sorted_fan_on_closed_mesh() {
        let mesh = tetrahedron();
        let nfl = NodeFaceList::build_sorted(&mesh).unwrap();
        for n in 0..4 {
            let fan = nfl.faces(n);
            assert_eq!(fan.len(), 3);
            // consecutive fan entries share an edge through the node
            for w in 0..fan.len() {
                let f = &mesh.faces[fan[w]];
                let g = fan[(w + 1) % fan.len()];
                assert!(f.nbr.iter().any(|&nb| nb == Some(g)));
            }
        }
    }

    #[test]
    fn test_sorted_fan_fails_on_boundary() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_triangles(&points, &[[0, 1, 2]]).unwrap();
        assert!(NodeFaceList::build_sorted(&mesh).is_err());
    }

    #[test]
    fn test_node_node_list() {
        let mesh = tetrahedron();
        let nnl = NodeNodeList::build(&mesh);
        for n in 0..4 {
            assert_eq!(nnl.valence(n), 3);
        }
    }

    #[test]
    fn test_edge_face_list() {
        let mesh = tetrahedron();
        let efl = EdgeFaceList::build(&mesh);
        assert_eq!(efl.len(), 6);
        for e in 0..6 {
            assert_eq!(efl.faces(e).len(), 2);
        }
    }
}
