//! Surface-mesh repair passes.
//!
//! Each pass is idempotent: running it a second time on its own output
//! changes nothing. [`fix_mesh`] selects one pass, clones the input and
//! returns the repaired mesh; the in-place functions are shared with the
//! decimation pipeline, which chains several of them.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info};

use crate::algo::fill_hole::fill_all_holes_in_place;
use crate::algo::fill_quad_hole::fill_all_quad_holes_in_place;
use crate::error::{MeshError, Result};
use crate::mesh::{FaceKind, SurfaceMesh};

/// The repair task to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairTask {
    /// Remove faces with an identical vertex set.
    RemoveDuplicateFaces,
    /// Remove faces on edges shared by more than two faces.
    RemoveNonManifoldFaces,
    /// Propagate a consistent winding over each connected component.
    FixWinding,
    /// Deduplicate the edge table.
    RemoveDuplicateEdges,
    /// Reverse the winding of every face.
    Invert,
    /// Fill every hole (dispatches on the mesh's face kind).
    FillHoles,
}

/// Run one repair task on a copy of the mesh.
pub fn fix_mesh(mesh: &SurfaceMesh, task: RepairTask) -> Result<SurfaceMesh> {
    let mut out = mesh.clone();
    match task {
        RepairTask::RemoveDuplicateFaces => {
            remove_duplicate_faces(&mut out);
        }
        RepairTask::RemoveNonManifoldFaces => {
            remove_non_manifold_faces(&mut out);
        }
        RepairTask::FixWinding => {
            fix_winding(&mut out)?;
        }
        RepairTask::RemoveDuplicateEdges => {
            remove_duplicate_edges(&mut out);
        }
        RepairTask::Invert => invert_faces(&mut out),
        RepairTask::FillHoles => {
            if out.is_tri_mesh() {
                fill_all_holes_in_place(&mut out);
            } else if out.is_quad_mesh() {
                fill_all_quad_holes_in_place(&mut out);
            } else {
                return Err(MeshError::WrongFaceKind {
                    expected: "triangle or quad",
                });
            }
        }
    }
    Ok(out)
}

/// Remove faces whose vertex set (in any order) duplicates an earlier
/// face. Returns the number of faces removed.
pub fn remove_duplicate_faces(mesh: &mut SurfaceMesh) -> usize {
    let mut seen: HashMap<[usize; 4], usize> = HashMap::new();
    let mut keep = vec![true; mesh.face_count()];
    let mut removed = 0;

    for (i, face) in mesh.faces.iter().enumerate() {
        let mut key = [usize::MAX; 4];
        key[..face.node_count()].copy_from_slice(face.vertices());
        key[..face.node_count()].sort_unstable();
        if seen.insert(key, i).is_some() {
            keep[i] = false;
            removed += 1;
        }
    }

    if removed > 0 {
        let mut it = keep.iter();
        mesh.faces.retain(|_| *it.next().unwrap());
        mesh.rebuild();
        info!("removed {} duplicate faces", removed);
    }
    removed
}

/// Remove faces incident to an edge shared by more than two faces.
/// Returns the number of faces removed.
pub fn remove_non_manifold_faces(mesh: &mut SurfaceMesh) -> usize {
    // count faces per undirected edge
    let mut count: HashMap<(usize, usize), usize> = HashMap::new();
    for face in &mesh.faces {
        for j in 0..face.node_count() {
            let (a, b) = face.edge_nodes(j);
            let key = if a < b { (a, b) } else { (b, a) };
            *count.entry(key).or_insert(0) += 1;
        }
    }

    let before = mesh.face_count();
    mesh.faces.retain(|face| {
        (0..face.node_count()).all(|j| {
            let (a, b) = face.edge_nodes(j);
            let key = if a < b { (a, b) } else { (b, a) };
            count[&key] <= 2
        })
    });
    let removed = before - mesh.face_count();

    if removed > 0 {
        mesh.rebuild();
        info!("removed {} non-manifold faces", removed);
    }
    removed
}

/// Make face winding consistent over every connected component by BFS from
/// an arbitrary seed face. Returns the number of faces flipped.
///
/// Only triangle and quad faces are supported.
pub fn fix_winding(mesh: &mut SurfaceMesh) -> Result<usize> {
    for face in &mesh.faces {
        if !matches!(face.kind, FaceKind::Tri3 | FaceKind::Quad4) {
            return Err(MeshError::WrongFaceKind {
                expected: "triangle or quad",
            });
        }
    }

    let nf = mesh.face_count();
    let mut visited = vec![false; nf];
    let mut flipped = 0usize;
    let mut queue = VecDeque::new();

    for seed in 0..nf {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(fi) = queue.pop_front() {
            let n = mesh.faces[fi].node_count();
            for j in 0..n {
                let Some(gi) = mesh.faces[fi].nbr[j] else {
                    continue;
                };
                if visited[gi] {
                    continue;
                }
                visited[gi] = true;

                // a consistently wound neighbor traverses the shared edge
                // in the opposite direction
                let (v0, v1) = mesh.faces[fi].edge_nodes(j);
                if traverses_same_direction(mesh, gi, v0, v1) {
                    mesh.faces[gi].invert();
                    flipped += 1;
                }
                queue.push_back(gi);
            }
        }
    }

    if flipped > 0 {
        debug!("flipped {} faces to fix winding", flipped);
        mesh.rebuild();
    }
    Ok(flipped)
}

fn traverses_same_direction(mesh: &SurfaceMesh, face: usize, v0: usize, v1: usize) -> bool {
    let f = &mesh.faces[face];
    for j in 0..f.node_count() {
        let (a, b) = f.edge_nodes(j);
        if a == v0 && b == v1 {
            return true;
        }
        if a == v1 && b == v0 {
            return false;
        }
    }
    false
}

/// Deduplicate the edge table by node pair. Returns the number of edges
/// removed.
pub fn remove_duplicate_edges(mesh: &mut SurfaceMesh) -> usize {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for edge in &mesh.edges {
        let key = if edge.nodes[0] < edge.nodes[1] {
            (edge.nodes[0], edge.nodes[1])
        } else {
            (edge.nodes[1], edge.nodes[0])
        };
        seen.insert(key);
    }
    let removed = mesh.edge_count() - seen.len();
    // the rebuild regenerates a canonical (deduplicated) table and keeps
    // the surviving feature ids
    mesh.rebuild();
    if removed > 0 {
        info!("removed {} duplicate edges", removed);
    }
    removed
}

/// Reverse the winding of every face.
pub fn invert_faces(mesh: &mut SurfaceMesh) {
    mesh.invert();
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn tetra() -> SurfaceMesh {
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
    fn test_remove_duplicate_faces() {
        let mut mesh = tetra();
        // duplicate one face with rotated vertex order
        let mut dup = mesh.faces[0].clone();
        dup.nodes.rotate_left(1);
        let v = dup.vertices().to_vec();
        mesh.faces.push(crate::mesh::Face::tri(v[0], v[1], v[2]));
        mesh.rebuild();

        assert_eq!(remove_duplicate_faces(&mut mesh), 1);
        assert_eq!(mesh.face_count(), 4);
        assert!(mesh.is_closed());
        // idempotent
        assert_eq!(remove_duplicate_faces(&mut mesh), 0);
    }

    #[test]
    fn test_remove_non_manifold_faces() {
        let mut mesh = tetra();
        // a fin hanging off edge (0, 1) makes that edge 3-valent
        mesh.nodes.push(crate::mesh::Node::new(Point3::new(0.5, -1.0, 0.5)));
        mesh.faces.push(crate::mesh::Face::tri(0, 1, 4));
        mesh.rebuild();
        assert!(!mesh.is_closed());

        let removed = remove_non_manifold_faces(&mut mesh);
        // every face on the overloaded edge goes: the fin and two tet faces
        assert_eq!(removed, 3);
        // idempotent
        assert_eq!(remove_non_manifold_faces(&mut mesh), 0);
    }

    #[test]
    fn test_fix_winding() {
        let mut mesh = tetra();
        // flip two faces out of four
        mesh.faces[1].invert();
        mesh.faces[3].invert();
        mesh.rebuild();

        let flipped = fix_winding(&mut mesh).unwrap();
        assert!(flipped == 2 || flipped == 4, "flipped {}", flipped);

        // consistent: every shared edge is traversed once in each direction
        for (i, face) in mesh.faces.iter().enumerate() {
            for j in 0..3 {
                let g = face.nbr[j].unwrap();
                let (v0, v1) = face.edge_nodes(j);
                assert!(
                    !traverses_same_direction(&mesh, g, v0, v1),
                    "faces {} and {} traverse edge the same way",
                    i,
                    g
                );
            }
        }

        // idempotent
        assert_eq!(fix_winding(&mut mesh).unwrap(), 0);
    }

    #[test]
    fn test_fix_winding_outward_normals() {
        let mut mesh = tetra();
        mesh.faces[2].invert();
        mesh.rebuild();
        fix_winding(&mut mesh).unwrap();

        // all normals now point the same way relative to the centroid
        let centroid = Point3::from(
            mesh.nodes.iter().map(|n| n.pos.coords).sum::<Vector3<f64>>() / 4.0,
        );
        let signs: Vec<bool> = (0..4)
            .map(|i| {
                let f = &mesh.faces[i];
                let fc = Point3::from(
                    f.vertices()
                        .iter()
                        .map(|&v| mesh.position(v).coords)
                        .sum::<Vector3<f64>>()
                        / 3.0,
                );
                mesh.face_normal(i).dot(&(fc - centroid)) > 0.0
            })
            .collect();
        assert!(signs.iter().all(|&s| s) || signs.iter().all(|&s| !s));
    }

    #[test]
    fn test_invert() {
        let mut mesh = tetra();
        let normals: Vec<_> = (0..4).map(|i| mesh.face_normal(i)).collect();
        invert_faces(&mut mesh);
        for (i, n) in normals.iter().enumerate() {
            assert!((mesh.face_normal(i) + n).norm() < 1e-12);
        }
    }

    #[test]
    fn test_fix_mesh_dispatch_leaves_input_untouched() {
        let mesh = tetra();
        let out = fix_mesh(&mesh, RepairTask::Invert).unwrap();
        assert!((mesh.face_normal(0) + out.face_normal(0)).norm() < 1e-12);
        // the input kept its orientation
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_fill_holes_task() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let tris = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3]];
        let mesh = SurfaceMesh::from_triangles(&points, &tris).unwrap();
        let out = fix_mesh(&mesh, RepairTask::FillHoles).unwrap();
        assert!(out.is_closed());
    }
}
