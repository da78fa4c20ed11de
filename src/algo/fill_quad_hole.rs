//! Hole filling for quad meshes.
//!
//! Ring discovery works exactly as in the triangle case; the ring is then
//! partitioned by repeatedly cutting off the best convex four-node ear,
//! scored by the smallest cosine between consecutive edge directions.
//! Rings whose size is not reducible to quads this way fail as a whole:
//! no partial fill is ever applied.

use std::f64::consts::PI;

use nalgebra::Point3;
use tracing::{debug, info};

use crate::algo::fill_hole::{find_edge_ring, EdgeRing};
use crate::error::{MeshError, Result};
use crate::mesh::{Face, SurfaceMesh};

/// A quad produced by ring division, by node index and by position.
#[derive(Debug, Clone, Copy)]
pub struct RingQuad {
    /// The four node indices.
    pub n: [usize; 4],
    /// The four node positions.
    pub r: [Point3<f64>; 4],
}

fn edge_dirs(q: &RingQuad) -> [nalgebra::Vector3<f64>; 4] {
    let mut e = [nalgebra::Vector3::zeros(); 4];
    for i in 0..4 {
        let v = q.r[(i + 1) % 4] - q.r[i];
        let len = v.norm();
        e[i] = if len > 0.0 { v / len } else { v };
    }
    e
}

/// Approximate convexity: the four corner turn angles of a convex
/// (near-planar) quad sum to one full turn.
fn is_quad_convex(q: &RingQuad) -> bool {
    let e = edge_dirs(q);
    let mut ang = 0.0;
    for i in 0..4 {
        ang += e[(i + 1) % 4].dot(&e[i]).clamp(-1.0, 1.0).acos();
    }
    (ang / (2.0 * PI) - 1.0).abs() < 0.1
}

/// Quad quality: the smallest cosine between consecutive edge directions.
/// A square scores 0 (all right angles); sharper corners score lower.
fn quad_quality(q: &RingQuad) -> f64 {
    let e = edge_dirs(q);
    let mut cmin: f64 = 1.0;
    for i in 0..4 {
        let c = e[(i + 1) % 4].dot(&e[i]);
        if c < cmin {
            cmin = c;
        }
    }
    cmin
}

fn base_quad(ring: &EdgeRing) -> RingQuad {
    if ring.winding == 1 {
        RingQuad {
            n: [ring.nodes[0], ring.nodes[1], ring.nodes[2], ring.nodes[3]],
            r: [ring.pos[0], ring.pos[1], ring.pos[2], ring.pos[3]],
        }
    } else {
        RingQuad {
            n: [ring.nodes[3], ring.nodes[2], ring.nodes[1], ring.nodes[0]],
            r: [ring.pos[3], ring.pos[2], ring.pos[1], ring.pos[0]],
        }
    }
}

/// Partition a ring into quads by best-ear cutting. `None` when the ring
/// cannot be partitioned.
pub fn divide_quad_ring(ring: &EdgeRing) -> Option<Vec<RingQuad>> {
    let n = ring.len();
    if n < 4 {
        return None;
    }
    if n == 4 {
        return Some(vec![base_quad(ring)]);
    }

    // find the best convex ear to cut off
    let mut best: Option<(f64, usize)> = None;
    for i in 0..n {
        let idx = [i, (i + 1) % n, (i + 2) % n, (i + 3) % n];
        let quad = RingQuad {
            n: [
                ring.nodes[idx[0]],
                ring.nodes[idx[1]],
                ring.nodes[idx[2]],
                ring.nodes[idx[3]],
            ],
            r: [
                ring.pos[idx[0]],
                ring.pos[idx[1]],
                ring.pos[idx[2]],
                ring.pos[idx[3]],
            ],
        };
        if !is_quad_convex(&quad) {
            continue;
        }
        let q = quad_quality(&quad);
        if best.map_or(true, |(qmax, _)| q > qmax) {
            best = Some((q, i));
        }
    }

    let (_, i0) = best?;
    let i3 = (i0 + 3) % n;

    let left = ring.left_ear(i0, i3);
    let right = ring.right_ear(i0, i3);

    let mut quads = divide_quad_ring(&right)?;
    quads.extend(divide_quad_ring(&left)?);
    Some(quads)
}

fn append_quads(mesh: &mut SurfaceMesh, quads: &[RingQuad]) {
    for q in quads {
        let mut face = Face::quad(q.n[0], q.n[1], q.n[2], q.n[3]);
        face.gid = 0;
        mesh.faces.push(face);
    }
}

/// Fill the quad-mesh hole whose boundary passes through `seed`.
pub fn fill_quad_hole(mesh: &SurfaceMesh, seed: usize) -> Result<SurfaceMesh> {
    if !mesh.is_quad_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "quad" });
    }

    let ring = find_edge_ring(mesh, seed)?;
    let quads = divide_quad_ring(&ring)
        .ok_or_else(|| MeshError::topology("boundary ring could not be partitioned into quads"))?;

    let mut out = mesh.clone();
    append_quads(&mut out, &quads);
    out.rebuild();
    Ok(out)
}

/// Fill every hole of a quad mesh in one pass.
pub fn fill_all_quad_holes(mesh: &SurfaceMesh) -> Result<SurfaceMesh> {
    if !mesh.is_quad_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "quad" });
    }
    let mut out = mesh.clone();
    fill_all_quad_holes_in_place(&mut out);
    Ok(out)
}

/// In-place variant of [`fill_all_quad_holes`]; returns the number of
/// holes filled.
pub(crate) fn fill_all_quad_holes_in_place(mesh: &mut SurfaceMesh) -> usize {
    // count boundary contacts per node, then peel off rings one at a time
    let mut node_count = vec![0i32; mesh.node_count()];
    for face in &mesh.faces {
        for j in 0..face.node_count() {
            if face.nbr[j].is_none() {
                let (a, b) = face.edge_nodes(j);
                node_count[a] += 1;
                node_count[b] += 1;
            }
        }
    }

    let mut rings = Vec::new();
    for i in 0..mesh.node_count() {
        if node_count[i] > 0 {
            if let Ok(ring) = find_edge_ring(mesh, i) {
                if ring.nodes.iter().all(|&n| node_count[n] > 0) {
                    for &n in &ring.nodes {
                        node_count[n] -= 2;
                    }
                    rings.push(ring);
                }
            }
        }
    }
    info!("found {} holes", rings.len());

    let mut filled = 0;
    let mut quads = Vec::new();
    for ring in &rings {
        if let Some(q) = divide_quad_ring(ring) {
            filled += 1;
            quads.extend(q);
        }
    }
    debug!("filled {} holes with {} new faces", filled, quads.len());

    append_quads(mesh, &quads);
    mesh.rebuild();
    filled
}
