//! Short-edge collapse for triangle meshes.
//!
//! Every face edge shorter than `tolerance x (longest edge)` is collapsed
//! by deleting one endpoint and redirecting it to the survivor. Which
//! endpoint dies follows a priority rule over the node classification:
//! free nodes are absorbed into feature-edge nodes, feature-edge nodes
//! into corner nodes, and corner nodes are never deleted. Two nodes of
//! equal rank merge at the edge midpoint.
//!
//! Chains of collapses are resolved by relaxing the redirection table to a
//! fixed point. Certain feature-edge configurations can still leave a
//! triangle with two identical corners after reindexing; those faces are
//! dropped rather than repaired.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::mesh::{Node, SurfaceMesh};

/// Options for [`collapse_short_edges`].
#[derive(Debug, Clone)]
pub struct CollapseOptions {
    /// Fraction of the longest mesh edge below which an edge collapses.
    pub tolerance: f64,
}

impl Default for CollapseOptions {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl CollapseOptions {
    /// Create options with the given length tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

/// Node rank for the collapse priority rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NodeRank {
    Free = 0,
    FeatureEdge = 1,
    Corner = 2,
}

/// Rank every node by its incident feature and boundary edges: no such
/// edges is free, exactly two make a feature-edge node, anything else
/// (a dangling end or a junction) is a corner and never moves.
fn classify_nodes(mesh: &SurfaceMesh) -> Vec<NodeRank> {
    let mut count = vec![0usize; mesh.node_count()];
    for edge in &mesh.edges {
        if edge.is_feature() {
            count[edge.nodes[0]] += 1;
            count[edge.nodes[1]] += 1;
        }
    }
    // boundary edges pin their nodes exactly like feature edges
    for face in &mesh.faces {
        for j in 0..face.node_count() {
            if face.nbr[j].is_none() {
                let (a, b) = face.edge_nodes(j);
                count[a] += 1;
                count[b] += 1;
            }
        }
    }
    count
        .into_iter()
        .map(|c| match c {
            0 => NodeRank::Free,
            2 => NodeRank::FeatureEdge,
            _ => NodeRank::Corner,
        })
        .collect()
}

/// Collapse all short edges of a triangle mesh, returning the compacted
/// result. Fails on non-triangle meshes.
pub fn collapse_short_edges(mesh: &SurfaceMesh, options: &CollapseOptions) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }
    if mesh.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let rank = classify_nodes(mesh);

    // collapse threshold: tolerance^2 x (longest face edge)^2
    let mut lmax2: f64 = 0.0;
    for face in &mesh.faces {
        for j in 0..3 {
            let (a, b) = face.edge_nodes(j);
            let l2 = (mesh.position(a) - mesh.position(b)).norm_squared();
            if l2 > lmax2 {
                lmax2 = l2;
            }
        }
    }
    let threshold = options.tolerance * options.tolerance * lmax2;

    let nn = mesh.node_count();
    let mut index: Vec<usize> = (0..nn).collect();
    let mut pos: Vec<_> = mesh.nodes.iter().map(|n| n.pos).collect();

    // one pass over all face edges, marking collapses; chains are left to
    // the relaxation step below
    for face in &mesh.faces {
        for j in 0..3 {
            let (a, b) = face.edge_nodes(j);
            if (pos[a] - pos[b]).norm_squared() >= threshold {
                continue;
            }
            // skip endpoints already collapsed away
            if index[a] != a || index[b] != b {
                continue;
            }
            match (rank[a], rank[b]) {
                (NodeRank::Corner, NodeRank::Corner) => {}
                (ra, rb) if ra == rb => {
                    // equal rank: symmetric merge at the midpoint
                    let mid = nalgebra::center(&pos[a], &pos[b]);
                    index[b] = a;
                    pos[a] = mid;
                }
                (ra, rb) if ra < rb => {
                    // the lower-ranked node is absorbed; the survivor stays
                    index[a] = b;
                }
                _ => {
                    index[b] = a;
                }
            }
        }
    }

    // chase redirection chains to a fixed point
    let mut pass = 0;
    loop {
        let mut changed = false;
        for i in 0..nn {
            let target = index[index[i]];
            if target != index[i] {
                index[i] = target;
                changed = true;
            }
        }
        pass += 1;
        if !changed {
            break;
        }
        if pass > nn {
            return Err(MeshError::topology("collapse chain does not resolve"));
        }
    }

    // compact surviving nodes
    let mut remap = vec![usize::MAX; nn];
    let mut nodes = Vec::new();
    for i in 0..nn {
        if index[i] == i {
            remap[i] = nodes.len();
            nodes.push(Node {
                pos: pos[i],
                gid: mesh.nodes[i].gid,
            });
        }
    }

    // rebuild faces through the redirection map; faces collapsed to a line
    // or point are dropped (the chain resolution cannot always avoid them)
    let mut faces = Vec::new();
    let mut dropped = 0;
    for face in &mesh.faces {
        let n0 = remap[index[face.nodes[0]]];
        let n1 = remap[index[face.nodes[1]]];
        let n2 = remap[index[face.nodes[2]]];
        if n0 == n1 || n1 == n2 || n2 == n0 {
            dropped += 1;
            continue;
        }
        let mut f = crate::mesh::Face::tri(n0, n1, n2);
        f.gid = face.gid;
        faces.push(f);
    }
    debug!(
        "collapsed {} nodes, dropped {} degenerate faces",
        nn - nodes.len(),
        dropped
    );

    let mut out = SurfaceMesh {
        nodes,
        edges: Vec::new(),
        faces,
    };
    out.rebuild();

    // carry surviving feature-edge ids over to the new edge table
    let mut feature: HashMap<(usize, usize), i32> = HashMap::new();
    for edge in &mesh.edges {
        if edge.is_feature() {
            let a = remap[index[edge.nodes[0]]];
            let b = remap[index[edge.nodes[1]]];
            if a != b && a != usize::MAX && b != usize::MAX {
                feature.insert(if a < b { (a, b) } else { (b, a) }, edge.gid);
            }
        }
    }
    for edge in out.edges.iter_mut() {
        let key = if edge.nodes[0] < edge.nodes[1] {
            (edge.nodes[0], edge.nodes[1])
        } else {
            (edge.nodes[1], edge.nodes[0])
        };
        if let Some(&gid) = feature.get(&key) {
            edge.gid = gid;
        }
    }

    Ok(out)
}

/// Count the feature edges of a mesh. Diagnostics helper.
pub fn feature_edge_count(mesh: &SurfaceMesh) -> usize {
    mesh.edges.iter().filter(|e| e.is_feature()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// A unit square split into 4 triangles around a center vertex, plus a
    /// fifth vertex a tiny distance from the center.
    fn square_with_short_edge(eps: f64) -> SurfaceMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(0.5 + eps, 0.5, 0.0),
        ];
        let tris = vec![
            [0, 1, 4],
            [1, 5, 4],
            [1, 2, 5],
            [2, 3, 5],
            [3, 4, 5],
            [3, 0, 4],
        ];
        SurfaceMesh::from_triangles(&points, &tris).unwrap()
    }

    #[test]
    fn test_collapse_short_edge() {
        let mesh = square_with_short_edge(1e-3);
        assert_eq!(mesh.face_count(), 6);

        let out = collapse_short_edges(&mesh, &CollapseOptions::new(0.05)).unwrap();
        // nodes 4 and 5 merge; the two triangles between them degenerate
        assert_eq!(out.node_count(), 5);
        assert_eq!(out.face_count(), 4);

        // merged node sits at the midpoint
        let merged = out
            .nodes
            .iter()
            .find(|n| (n.pos - Point3::new(0.5 + 5e-4, 0.5, 0.0)).norm() < 1e-9);
        assert!(merged.is_some());
    }

    #[test]
    fn test_no_collapse_when_all_edges_long() {
        let mesh = square_with_short_edge(0.4);
        let out = collapse_short_edges(&mesh, &CollapseOptions::new(0.05)).unwrap();
        assert_eq!(out.node_count(), mesh.node_count());
        assert_eq!(out.face_count(), mesh.face_count());
    }

    #[test]
    fn test_corner_nodes_survive() {
        let mut mesh = square_with_short_edge(1e-3);
        // pin node 4 as a corner by marking three of its edges (away from
        // node 5) as features
        let mut marked = 0;
        for edge in mesh.edges.iter_mut() {
            let touches4 = edge.nodes.contains(&4);
            let touches5 = edge.nodes.contains(&5);
            if touches4 && !touches5 && marked < 3 {
                edge.gid = 1;
                marked += 1;
            }
        }
        assert_eq!(marked, 3);

        let out = collapse_short_edges(&mesh, &CollapseOptions::new(0.05)).unwrap();
        // node 5 was absorbed into the pinned node 4, which kept its position
        assert_eq!(out.node_count(), 5);
        let kept = out
            .nodes
            .iter()
            .find(|n| (n.pos - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
        assert!(kept.is_some());
    }

    #[test]
    fn test_rejects_quad_mesh() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_quads(&points, &[[0, 1, 2, 3]]).unwrap();
        assert!(collapse_short_edges(&mesh, &CollapseOptions::default()).is_err());
    }

    #[test]
    fn test_result_topology_is_consistent() {
        let mesh = square_with_short_edge(1e-3);
        let out = collapse_short_edges(&mesh, &CollapseOptions::new(0.05)).unwrap();
        // adjacency was rebuilt: every face edge with a partner resolves
        for (i, face) in out.faces.iter().enumerate() {
            for j in 0..3 {
                if let Some(nb) = face.nbr[j] {
                    assert_ne!(nb, i);
                    assert!(out.faces[nb].nbr.iter().any(|&x| x == Some(i)));
                }
            }
        }
    }
}
