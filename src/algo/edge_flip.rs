//! Quality-driven edge flips for triangle meshes.
//!
//! An interior edge shared by exactly two triangles can be flipped to the
//! opposite diagonal of the quad they form. A flip is accepted only when
//! the quad is (approximately) convex and the worst of the two triangles
//! strictly improves by more than `1e-12`; the strict margin prevents
//! flip/unflip oscillation on symmetric configurations.
//!
//! Flips rewire the edge, the two faces and the four surrounding
//! edge-to-face entries locally in O(1); the global neighbor tables are
//! rebuilt once after the sweep converges.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::elem::metrics::tri_quality;
use crate::error::{MeshError, Result};
use crate::mesh::{EdgeFaceList, SurfaceMesh};

/// Quality improvement below which a flip is rejected.
const FLIP_EPS: f64 = 1e-12;

/// Options for [`flip_edges`].
#[derive(Debug, Clone, Default)]
pub struct FlipOptions {
    /// Edge-table indices to restrict flipping to. Empty means the whole
    /// mesh. A non-empty selection is flipped unconditionally; a single
    /// selected edge is flipped exactly once.
    pub selection: Vec<usize>,
}

impl FlipOptions {
    /// Restrict flipping to the given edge-table indices.
    pub fn with_selection(mut self, selection: Vec<usize>) -> Self {
        self.selection = selection;
        self
    }
}

/// Flip edges of a triangle mesh until no flip improves quality.
///
/// Feature edges and boundary edges never flip. With a selection, only the
/// selected edges flip and they flip unconditionally.
pub fn flip_edges(mesh: &SurfaceMesh, options: &FlipOptions) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }

    let mut out = mesh.clone();
    let ne = out.edge_count();
    let mut efl = EdgeFaceList::build(&out);

    for &e in &options.selection {
        if e >= ne {
            return Err(MeshError::invalid_param(
                "selection",
                e,
                "edge index out of range",
            ));
        }
    }

    // single-edge shortcut: flip it and be done
    if options.selection.len() == 1 {
        flip_edge(&mut out, &mut efl, options.selection[0], true);
        out.rebuild();
        return Ok(out);
    }

    let force = !options.selection.is_empty();
    let mut eligible = mark_edges(&out, &efl, &options.selection);

    let mut flips = 0usize;
    let mut done = false;
    while !done {
        done = true;
        for e in 0..ne {
            if eligible[e] {
                if force {
                    eligible[e] = false;
                }
                if flip_edge(&mut out, &mut efl, e, force) {
                    flips += 1;
                    done = false;
                }
            }
        }
    }
    debug!("flipped {} edges", flips);

    out.rebuild();
    Ok(out)
}

/// Which edges may flip: interior, non-feature, and (when a selection is
/// given) selected.
fn mark_edges(mesh: &SurfaceMesh, efl: &EdgeFaceList, selection: &[usize]) -> Vec<bool> {
    let ne = mesh.edge_count();
    let mut eligible = vec![true; ne];
    for (i, edge) in mesh.edges.iter().enumerate() {
        if edge.is_feature() {
            eligible[i] = false;
        }
        if efl.faces(i).len() != 2 {
            eligible[i] = false;
        }
    }
    if !selection.is_empty() {
        let mut selected = vec![false; ne];
        for &e in selection {
            selected[e] = true;
        }
        for i in 0..ne {
            eligible[i] = eligible[i] && selected[i];
        }
    }
    eligible
}

/// Attempt to flip one edge. Returns whether the flip happened.
fn flip_edge(mesh: &mut SurfaceMesh, efl: &mut EdgeFaceList, iedge: usize, force: bool) -> bool {
    let owners = efl.faces(iedge);
    if owners.len() != 2 {
        return false;
    }
    let (fi0, fi1) = (owners[0], owners[1]);

    let en0 = mesh.edges[iedge].nodes[0];
    let en1 = mesh.edges[iedge].nodes[1];

    // local position of the shared edge within each face
    let find_k = |mesh: &SurfaceMesh, f: usize| -> Option<usize> {
        let face = &mesh.faces[f];
        (0..3).find(|&k| {
            let (m0, m1) = face.edge_nodes(k);
            (m0 == en0 && m1 == en1) || (m0 == en1 && m1 == en0)
        })
    };
    let Some(k0) = find_k(mesh, fi0) else { return false };
    let Some(k1) = find_k(mesh, fi1) else { return false };

    // nodes in shared-edge-first order: (a0, a1) is the edge, a2 and b2
    // the opposite corners
    let f0n = mesh.faces[fi0].nodes;
    let f1n = mesh.faces[fi1].nodes;
    let a = [f0n[k0], f0n[(k0 + 1) % 3], f0n[(k0 + 2) % 3]];
    let b = [f1n[k1], f1n[(k1 + 1) % 3], f1n[(k1 + 2) % 3]];
    debug_assert!(a[0] == b[1] && a[1] == b[0]);

    if !force && !should_flip(mesh, &a, &b) {
        return false;
    }

    do_flip_edge(mesh, efl, iedge, fi0, fi1, &a, &b, k0, k1);
    true
}

/// The local surgery: rewire the edge, the two face node lists, the two
/// face edge lists and the edge-to-face entries of the quad's border.
#[allow(clippy::too_many_arguments)]
fn do_flip_edge(
    mesh: &mut SurfaceMesh,
    efl: &mut EdgeFaceList,
    iedge: usize,
    fi0: usize,
    fi1: usize,
    a: &[usize; 3],
    b: &[usize; 3],
    k0: usize,
    k1: usize,
) {
    mesh.edges[iedge].nodes = [a[2], b[2]];

    mesh.faces[fi0].nodes[0] = b[2];
    mesh.faces[fi0].nodes[1] = a[2];
    mesh.faces[fi0].nodes[2] = a[0];

    mesh.faces[fi1].nodes[0] = a[2];
    mesh.faces[fi1].nodes[1] = b[2];
    mesh.faces[fi1].nodes[2] = a[1];

    let el0: Vec<usize> = mesh.faces[fi0].edge[..3].iter().map(|e| e.unwrap()).collect();
    let el1: Vec<usize> = mesh.faces[fi1].edge[..3].iter().map(|e| e.unwrap()).collect();
    debug_assert_eq!(el0[k0], el1[k1]);

    // the border edge after the shared edge in each face migrates to the
    // other face
    let moved0 = el0[(k0 + 1) % 3];
    for f in efl.faces_mut(moved0) {
        if *f == fi0 {
            *f = fi1;
            break;
        }
    }
    let moved1 = el1[(k1 + 1) % 3];
    for f in efl.faces_mut(moved1) {
        if *f == fi1 {
            *f = fi0;
            break;
        }
    }

    mesh.faces[fi0].edge[0] = Some(iedge);
    mesh.faces[fi0].edge[1] = Some(el0[(k0 + 2) % 3]);
    mesh.faces[fi0].edge[2] = Some(el1[(k1 + 1) % 3]);

    mesh.faces[fi1].edge[0] = Some(iedge);
    mesh.faces[fi1].edge[1] = Some(el1[(k1 + 2) % 3]);
    mesh.faces[fi1].edge[2] = Some(el0[(k0 + 1) % 3]);
}

/// Approximate convexity of the (possibly non-planar) quad `A B C D`.
fn is_convex(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>, d: Point3<f64>) -> bool {
    let norm = |v: Vector3<f64>| {
        let l = v.norm();
        if l > 0.0 {
            v / l
        } else {
            v
        }
    };
    let e1 = norm(b - a);
    let e2 = norm(c - b);
    let e3 = norm(d - c);
    let e4 = norm(a - d);

    let n = norm(e1.cross(&(-e4)));

    // every corner must turn the same way around the quad normal
    if e1.cross(&n).dot(&e2) >= 0.0 {
        return false;
    }
    if e2.cross(&n).dot(&e3) >= 0.0 {
        return false;
    }
    if e3.cross(&n).dot(&e4) >= 0.0 {
        return false;
    }
    if e4.cross(&n).dot(&e1) >= 0.0 {
        return false;
    }
    true
}

/// Whether flipping the shared edge of the triangle pair strictly improves
/// the worst triangle quality.
fn should_flip(mesh: &SurfaceMesh, a: &[usize; 3], b: &[usize; 3]) -> bool {
    let pa = mesh.position(a[0]);
    let pb = mesh.position(b[2]);
    let pc = mesh.position(a[1]);
    let pd = mesh.position(a[2]);

    if !is_convex(pa, pb, pc, pd) {
        return false;
    }

    let q_before = tri_quality(&[pa, pc, pd]).min(tri_quality(&[pc, pa, pb]));
    let q_after = tri_quality(&[pd, pb, pc]).min(tri_quality(&[pb, pd, pa]));

    q_after > q_before + FLIP_EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A thin rhombus split along its long diagonal: flipping to the short
    /// diagonal improves both triangles.
    fn sliver_rhombus() -> SurfaceMesh {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, -0.2, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.2, 0.0),
        ];
        SurfaceMesh::from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    fn has_edge(mesh: &SurfaceMesh, a: usize, b: usize) -> bool {
        mesh.edges
            .iter()
            .any(|e| (e.nodes[0] == a && e.nodes[1] == b) || (e.nodes[0] == b && e.nodes[1] == a))
    }

    #[test]
    fn test_flip_improves_slivers() {
        let mesh = sliver_rhombus();
        assert!(has_edge(&mesh, 0, 2));

        let out = flip_edges(&mesh, &FlipOptions::default()).unwrap();
        assert!(has_edge(&out, 1, 3));
        assert!(!has_edge(&out, 0, 2));
        assert_eq!(out.face_count(), 2);
    }

    #[test]
    fn test_flip_quality_strictly_improves() {
        let mesh = sliver_rhombus();
        let quality = |m: &SurfaceMesh| {
            m.faces
                .iter()
                .map(|f| {
                    tri_quality(&[
                        m.position(f.nodes[0]),
                        m.position(f.nodes[1]),
                        m.position(f.nodes[2]),
                    ])
                })
                .fold(f64::INFINITY, f64::min)
        };
        let before = quality(&mesh);
        let out = flip_edges(&mesh, &FlipOptions::default()).unwrap();
        assert!(quality(&out) > before + FLIP_EPS);
    }

    #[test]
    fn test_converged_mesh_is_stable() {
        let mesh = sliver_rhombus();
        let once = flip_edges(&mesh, &FlipOptions::default()).unwrap();
        let twice = flip_edges(&once, &FlipOptions::default()).unwrap();
        // a second pass flips nothing
        for (f1, f2) in once.faces.iter().zip(twice.faces.iter()) {
            assert_eq!(f1.vertices(), f2.vertices());
        }
    }

    #[test]
    fn test_square_symmetric_no_flip() {
        // both diagonals give congruent triangles; the strict-improvement
        // margin keeps the mesh unchanged
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap();
        let out = flip_edges(&mesh, &FlipOptions::default()).unwrap();
        assert!(has_edge(&out, 0, 2));
    }

    #[test]
    fn test_forced_single_edge_flip() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap();
        let diagonal = mesh
            .edges
            .iter()
            .position(|e| e.nodes.contains(&0) && e.nodes.contains(&2))
            .unwrap();

        let out = flip_edges(&mesh, &FlipOptions::default().with_selection(vec![diagonal])).unwrap();
        assert!(has_edge(&out, 1, 3));
        assert!(!has_edge(&out, 0, 2));
    }

    #[test]
    fn test_feature_edge_never_flips() {
        let mut mesh = sliver_rhombus();
        let diagonal = mesh
            .edges
            .iter()
            .position(|e| e.nodes.contains(&0) && e.nodes.contains(&2))
            .unwrap();
        mesh.edges[diagonal].gid = 7;

        let out = flip_edges(&mesh, &FlipOptions::default()).unwrap();
        assert!(has_edge(&out, 0, 2));
        assert!(!has_edge(&out, 1, 3));
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
        assert!(flip_edges(&mesh, &FlipOptions::default()).is_err());
    }
}
