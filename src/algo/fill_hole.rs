//! Hole filling for triangle meshes.
//!
//! A hole is a closed walk of boundary edges (face edges with no neighbor).
//! [`find_edge_ring`] discovers the ring starting from one of its nodes;
//! the `divide_ring*` strategies triangulate the ring by recursive
//! splitting, and [`fill_hole`] / [`fill_all_holes`] wire the result back
//! into a new mesh.
//!
//! Three triangulation strategies are provided:
//!
//! - [`divide_ring`]: recursive split at every valid chord, keeping the
//!   triangulation that maximizes the worst triangle quality. Exhaustive
//!   up to [`OPTIMAL_RING_LIMIT`] nodes; above that a farthest-point
//!   heuristic takes the first valid split instead.
//! - [`divide_ring_fast`]: the same recursion but scanning only
//!   second-half chords and stopping at the first complete triangulation.
//! - [`divide_ring_delaunay`]: ear cutting gated by an empty-circumsphere
//!   test, falling back to [`divide_ring_fast`] when no ear qualifies.
//!
//! The advancing-front path (`insert_nodes`) is the only strategy that
//! creates new vertices instead of reconnecting boundary nodes.

use nalgebra::{Matrix3, Point3, Vector3};
use tracing::{debug, info};

use crate::algo::Progress;
use crate::elem::metrics::tri_quality;
use crate::error::{MeshError, Result};
use crate::mesh::{Face, Node, NodeEdgeList, NodeNodeList, SurfaceMesh};

/// Ring size above which [`divide_ring`] switches from the exhaustive
/// chord search to the farthest-point heuristic.
pub const OPTIMAL_RING_LIMIT: usize = 10;

/// Options for [`fill_hole`].
#[derive(Debug, Clone, Default)]
pub struct FillHoleOptions {
    /// Use the exhaustive optimal triangulation instead of the fast one.
    pub optimize: bool,
    /// Use the advancing-front method, which may insert new vertices.
    pub insert_nodes: bool,
}

impl FillHoleOptions {
    /// Request the optimal triangulation.
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Request the advancing-front method.
    pub fn with_insert_nodes(mut self, insert_nodes: bool) -> Self {
        self.insert_nodes = insert_nodes;
        self
    }
}

/// An ordered, closed loop of boundary nodes around a hole.
///
/// `winding` records whether traversal order matches (`-1`) or opposes
/// (`+1`) the winding of the faces bordering the hole, so new triangles
/// can be emitted with consistent orientation.
#[derive(Debug, Clone)]
pub struct EdgeRing {
    /// Ring node indices, in walk order.
    pub nodes: Vec<usize>,
    /// Ring node positions, parallel to `nodes`.
    pub pos: Vec<Point3<f64>>,
    /// Ring node vertex normals, parallel to `nodes`.
    pub normals: Vec<Vector3<f64>>,
    /// +1 or -1; see type docs.
    pub winding: i32,
}

impl EdgeRing {
    /// Create an empty ring with positive winding.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            pos: Vec::new(),
            normals: Vec::new(),
            winding: 1,
        }
    }

    /// Number of nodes in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node.
    pub fn add(&mut self, node: usize, pos: Point3<f64>, normal: Vector3<f64>) {
        self.nodes.push(node);
        self.pos.push(pos);
        self.normals.push(normal);
    }

    /// Whether `node` is already part of the ring.
    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }

    /// The sub-ring walking forward from position `n0` to `n1`, inclusive.
    pub fn right_ear(&self, n0: usize, n1: usize) -> EdgeRing {
        let mut ear = EdgeRing::new();
        ear.winding = self.winding;
        let mut n = n0;
        loop {
            ear.add(self.nodes[n], self.pos[n], self.normals[n]);
            if n == n1 {
                break;
            }
            n = (n + 1) % self.len();
        }
        ear
    }

    /// The complementary sub-ring: forward from `n1` back to `n0`.
    pub fn left_ear(&self, n0: usize, n1: usize) -> EdgeRing {
        self.right_ear(n1, n0)
    }
}

impl Default for EdgeRing {
    fn default() -> Self {
        Self::new()
    }
}

/// A triangle produced by ring division, by node index and by position.
#[derive(Debug, Clone, Copy)]
pub struct RingTri {
    /// The three node indices.
    pub n: [usize; 3],
    /// The three node positions (used for quality scoring).
    pub r: [Point3<f64>; 3],
}

/// Boundary classification: which edges of the edge table border a hole,
/// and how many boundary edges touch each node.
fn tag_boundary(mesh: &SurfaceMesh) -> (Vec<bool>, Vec<i32>) {
    let mut edge_boundary = vec![false; mesh.edge_count()];
    let mut node_count = vec![0i32; mesh.node_count()];
    for face in &mesh.faces {
        for j in 0..face.node_count() {
            if face.nbr[j].is_none() {
                if let Some(e) = face.edge[j] {
                    if !edge_boundary[e] {
                        edge_boundary[e] = true;
                        let (a, b) = face.edge_nodes(j);
                        node_count[a] += 1;
                        node_count[b] += 1;
                    }
                }
            }
        }
    }
    (edge_boundary, node_count)
}

fn edge_vector(mesh: &SurfaceMesh, e: usize) -> Vector3<f64> {
    let edge = &mesh.edges[e];
    let v = mesh.position(edge.nodes[1]) - mesh.position(edge.nodes[0]);
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        v
    }
}

/// Walk the boundary ring containing `seed`, following at each node the
/// boundary edge with the sharpest turn relative to the incoming edge.
fn walk_ring(
    mesh: &SurfaceMesh,
    seed: usize,
    normals: &[Vector3<f64>],
    nel: &NodeEdgeList,
    edge_boundary: &[bool],
    node_count: &[i32],
) -> Result<EdgeRing> {
    let mut ring = EdgeRing::new();

    // a boundary edge touching the seed
    let mut iedge = None;
    for (i, edge) in mesh.edges.iter().enumerate() {
        if edge_boundary[i] && (edge.nodes[0] == seed || edge.nodes[1] == seed) {
            iedge = Some(i);
            break;
        }
    }
    let mut iedge = iedge.ok_or_else(|| {
        MeshError::topology(format!("node {seed} does not lie on a boundary edge"))
    })?;

    // the winding of the ring follows from how a face that owns the first
    // edge traverses it
    let first = &mesh.edges[iedge];
    ring.winding = 0;
    'faces: for face in &mesh.faces {
        let n = face.node_count();
        for j in 0..n {
            let (a, b) = face.edge_nodes(j);
            if a == first.nodes[0] && b == first.nodes[1] {
                ring.winding = -1;
                break 'faces;
            } else if a == first.nodes[1] && b == first.nodes[0] {
                ring.winding = 1;
                break 'faces;
            }
        }
    }

    let mut jnode = seed;
    ring.add(jnode, mesh.position(jnode), normals[jnode]);

    // depending on which endpoint we start at, the walk direction flips
    if jnode == first.nodes[1] {
        ring.winding = -ring.winding;
    }

    loop {
        let edge = &mesh.edges[iedge];
        let mut re = edge_vector(mesh, iedge);
        if edge.nodes[0] == jnode {
            jnode = edge.nodes[1];
        } else {
            jnode = edge.nodes[0];
            re = -re;
        }

        // among the boundary edges leaving this node, take the one turning
        // sharpest against the incoming direction; first found wins ties
        let mut min_angle = 0.0;
        let mut next_edge = None;
        for &ek in nel.edges(jnode) {
            if ek == iedge || !edge_boundary[ek] {
                continue;
            }
            let e = &mesh.edges[ek];
            if node_count[e.nodes[0]] <= 0 || node_count[e.nodes[1]] <= 0 {
                continue;
            }
            let mut rk = edge_vector(mesh, ek);
            if e.nodes[1] == jnode {
                rk = -rk;
            }
            let ca = re.dot(&rk);
            if next_edge.is_none() || ca < min_angle {
                next_edge = Some(ek);
                min_angle = ca;
            }
        }

        iedge = next_edge.ok_or_else(|| {
            MeshError::topology(format!("boundary walk dead-ends at node {jnode}"))
        })?;

        if jnode == seed {
            break;
        }
        // a ring that closes on an interior node is topology we cannot fill
        if ring.contains(jnode) {
            return Err(MeshError::topology(format!(
                "boundary ring revisits node {jnode} before closing"
            )));
        }
        ring.add(jnode, mesh.position(jnode), normals[jnode]);
    }

    Ok(ring)
}

/// Discover the boundary ring that `seed` lies on.
pub fn find_edge_ring(mesh: &SurfaceMesh, seed: usize) -> Result<EdgeRing> {
    let normals = mesh.vertex_normals();
    let nel = NodeEdgeList::build(mesh);
    let (edge_boundary, node_count) = tag_boundary(mesh);
    walk_ring(mesh, seed, &normals, &nel, &edge_boundary, &node_count)
}

/// Approximate normal of the plane through the ring.
fn ring_normal(ring: &EdgeRing) -> Vector3<f64> {
    let n = ring.len();
    let mut p = Vector3::zeros();
    for r in &ring.pos {
        p += r.coords;
    }
    p /= n as f64;

    let mut t = Vector3::zeros();
    for i in 0..n - 1 {
        t += (p - ring.pos[i].coords).cross(&(p - ring.pos[i + 1].coords));
    }
    let len = t.norm();
    if len > 0.0 {
        t / len
    } else {
        t
    }
}

/// Which side of the plane `(p, t)` the ring's interior nodes lie on:
/// +1, -1, or 0 when they straddle it.
fn plane_side(ring: &EdgeRing, p: Point3<f64>, t: Vector3<f64>) -> i32 {
    let n = ring.len();
    let mut nsign = 0;
    for i in 1..n - 1 {
        let d = t.dot(&(ring.pos[i] - p));
        let si = if d > 0.0 { 1 } else { -1 };
        if i == 1 {
            nsign = si;
        } else if si != nsign {
            return 0;
        }
    }
    nsign
}

/// A chord split is valid when the two ears lie strictly on opposite sides
/// of the splitting plane.
fn is_valid_split(left: &EdgeRing, right: &EdgeRing, p: Point3<f64>, t: Vector3<f64>) -> bool {
    plane_side(left, p, t) * plane_side(right, p, t) < 0
}

/// Quality of the worst triangle in a candidate triangulation.
fn min_tri_quality(tris: &[RingTri]) -> f64 {
    tris.iter()
        .map(|t| tri_quality(&t.r))
        .fold(f64::INFINITY, f64::min)
}

/// The single triangle closing a 3-ring, wound to match the ambient faces.
fn base_triangle(ring: &EdgeRing) -> RingTri {
    if ring.winding == 1 {
        RingTri {
            n: [ring.nodes[0], ring.nodes[1], ring.nodes[2]],
            r: [ring.pos[0], ring.pos[1], ring.pos[2]],
        }
    } else {
        RingTri {
            n: [ring.nodes[2], ring.nodes[1], ring.nodes[0]],
            r: [ring.pos[2], ring.pos[1], ring.pos[0]],
        }
    }
}

/// Optimal ring triangulation.
///
/// Up to [`OPTIMAL_RING_LIMIT`] nodes, every chord is tried and the
/// triangulation maximizing the minimum triangle quality wins. Above the
/// limit, a farthest-point heuristic takes the first chord that splits the
/// ring validly; this keeps large rings O(n^2) instead of exponential.
pub fn divide_ring(ring: &EdgeRing) -> Option<Vec<RingTri>> {
    let n = ring.len();
    if n < 3 {
        return None;
    }
    if n == 3 {
        return Some(vec![base_triangle(ring)]);
    }

    let t = ring_normal(ring);

    if n > OPTIMAL_RING_LIMIT {
        // farthest-point split, first valid chord wins
        for i in 0..n {
            let ni = (i + n / 2) % n;
            let ri = ring.pos[ni];
            let mut dmax = 0.0;
            let mut jmax = 0;
            for (j, rj) in ring.pos.iter().enumerate() {
                let d = (ri - rj).norm_squared();
                if d > dmax {
                    dmax = d;
                    jmax = j;
                }
            }

            let rj = ring.pos[jmax];
            let pn = (ri - rj).cross(&t);

            let left = ring.left_ear(ni, jmax);
            let right = ring.right_ear(ni, jmax);
            debug_assert!(left.len() > 2 && right.len() > 2);

            if is_valid_split(&left, &right, ri, pn) {
                let tri_left = divide_ring(&left);
                let tri_right = divide_ring(&right);
                if let (Some(mut l), Some(r)) = (tri_left, tri_right) {
                    l.extend(r);
                    return Some(l);
                }
                return None;
            }
        }
        return None;
    }

    // exhaustive search, best worst-triangle wins
    let mut best: Option<(f64, Vec<RingTri>)> = None;
    let n1 = if n % 2 == 0 { n / 2 } else { n / 2 + 1 };
    for i in 0..n1 {
        for j in 2..n - 1 {
            let k = (i + j) % n;
            let ri = ring.pos[i];
            let rj = ring.pos[k];
            let pn = (ri - rj).cross(&t);

            let left = ring.left_ear(i, k);
            let right = ring.right_ear(i, k);
            debug_assert!(left.len() > 2 && right.len() > 2);

            if !is_valid_split(&left, &right, ri, pn) {
                continue;
            }
            if let (Some(mut l), Some(r)) = (divide_ring(&left), divide_ring(&right)) {
                l.extend(r);
                let amin = min_tri_quality(&l);
                if best.as_ref().map_or(true, |(q, _)| amin > *q) {
                    best = Some((amin, l));
                }
            }
        }
    }

    best.map(|(_, tris)| tris)
}

/// Fast ring triangulation: restricts the chord scan to the second half of
/// the ring and returns the first complete triangulation found.
pub fn divide_ring_fast(ring: &EdgeRing) -> Option<Vec<RingTri>> {
    let n = ring.len();
    if n < 3 {
        return None;
    }
    if n == 3 {
        return Some(vec![base_triangle(ring)]);
    }

    let t = ring_normal(ring);

    let mut best: Option<(f64, Vec<RingTri>)> = None;
    let n1 = if n % 2 == 0 { n / 2 } else { n / 2 + 1 };
    'outer: for i in 0..n1 {
        for j in n / 2..n - 1 {
            if best.as_ref().map_or(false, |(_, tris)| tris.len() == n - 2) {
                break 'outer;
            }
            let k = (i + j) % n;
            let ri = ring.pos[i];
            let rj = ring.pos[k];
            let pn = (ri - rj).cross(&t);

            let left = ring.left_ear(i, k);
            let right = ring.right_ear(i, k);

            if !is_valid_split(&left, &right, ri, pn) {
                continue;
            }
            if let (Some(mut l), Some(r)) = (divide_ring_fast(&left), divide_ring_fast(&right)) {
                l.extend(r);
                let amin = min_tri_quality(&l);
                if best.as_ref().map_or(true, |(q, _)| amin > *q) {
                    best = Some((amin, l));
                }
            }
        }
    }

    best.map(|(_, tris)| tris)
}

/// Circumsphere of a triangle; `None` for degenerate triangles.
fn circumsphere(r: &[Point3<f64>; 3]) -> Option<(Point3<f64>, f64)> {
    let p0 = r[1] - r[0];
    let p1 = r[2] - r[0];
    let n = p0.cross(&p1);

    let a = Matrix3::from_rows(&[
        (2.0 * p0).transpose(),
        (2.0 * p1).transpose(),
        n.transpose(),
    ]);
    let inv = a.try_inverse()?;
    let y = Vector3::new(p0.norm_squared(), p1.norm_squared(), 0.0);
    let x = inv * y;

    let radius = x.norm();
    Some((r[0] + x, radius))
}

#[inline]
fn inside_sphere(r: Point3<f64>, center: Point3<f64>, radius: f64) -> bool {
    (r - center).norm_squared() < radius * radius
}

/// Delaunay-style ring triangulation: cut the first ear whose circumsphere
/// contains no other ring point, recurse, and fall back to
/// [`divide_ring_fast`] whenever the ear cut fails.
pub fn divide_ring_delaunay(ring: &EdgeRing) -> Option<Vec<RingTri>> {
    let n = ring.len();
    if n < 3 {
        return None;
    }
    if n == 3 {
        return Some(vec![base_triangle(ring)]);
    }

    let mut tris: Vec<RingTri> = Vec::new();
    for i in 0..n {
        let i0 = i;
        let i1 = (i + 1) % n;
        let i2 = (i + 2) % n;
        let r = [ring.pos[i0], ring.pos[i1], ring.pos[i2]];

        // the candidate apex must lie on the positive side of the tangent
        // plane at i0
        let nrm = ring.normals[i0];
        let mut t = (r[1] - r[0]).cross(&nrm);
        let len = t.norm();
        if len > 0.0 {
            t /= len;
        }
        if ring.winding == 1 {
            t = -t;
        }
        if (r[2] - r[1]).dot(&t) <= 0.0 {
            continue;
        }

        let Some((center, radius)) = circumsphere(&r) else {
            continue;
        };
        let empty = (0..n)
            .filter(|&j| j != i0 && j != i1 && j != i2)
            .all(|j| !inside_sphere(ring.pos[j], center, radius));
        if !empty {
            continue;
        }

        let left = ring.left_ear(i0, i2);
        let right = ring.right_ear(i0, i2);

        let tri_left = divide_ring_delaunay(&left).or_else(|| divide_ring_fast(&left));
        let tri_right = divide_ring_delaunay(&right).or_else(|| divide_ring_fast(&right));

        if let Some(l) = tri_left {
            tris.extend(l);
        }
        if let Some(r) = tri_right {
            tris.extend(r);
        }
        break;
    }

    if tris.is_empty() {
        return divide_ring_fast(ring);
    }
    Some(tris)
}

/// One advancing-front step: close the sharpest corner of the ring,
/// inserting zero, one or two new vertices depending on its interior
/// angle. Returns the new triangles and new vertex positions, or `None`
/// when no corner qualifies.
fn afm_step(
    mesh: &SurfaceMesh,
    nnl: &NodeNodeList,
    normals: &[Vector3<f64>],
    ring: &EdgeRing,
) -> Option<(Vec<RingTri>, Vec<Point3<f64>>)> {
    let n = ring.len();
    if n < 3 {
        return None;
    }
    if n == 3 {
        return Some((vec![base_triangle(ring)], Vec::new()));
    }

    // interior angle at every ring node, corrected to the reflex angle when
    // the corner bends away from the surface
    let mut min_angle = f64::INFINITY;
    let mut index = 0;
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let next = (i + 1) % n;

        let a = (ring.pos[next] - ring.pos[i]).normalize();
        let b = (ring.pos[prev] - ring.pos[i]).normalize();
        let mut angle = a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees();

        if angle < 180.0 {
            // the corner is reflex when it sits on the wrong side of the
            // plane spanned by the prev-to-next chord and the surface
            // normal; the sign convention holds for either walk direction
            let prev_nn = normals[ring.nodes[prev]];
            let np = if ring.winding == 1 {
                ring.pos[next] - ring.pos[prev]
            } else {
                ring.pos[prev] - ring.pos[next]
            };
            let plane_nn = prev_nn.cross(&np);
            let side = plane_nn.dot(&(ring.pos[i] - ring.pos[prev]));
            if side >= 0.0 {
                angle = 360.0 - angle;
            }
        }

        if angle < min_angle {
            min_angle = angle;
            index = i;
        }
        if min_angle <= 85.0 {
            break;
        }
    }

    let prev = (index + n - 1) % n;
    let next = (index + 1) % n;
    let current = ring.nodes[index];

    let emit = |a: usize, b: usize, c: usize, ra, rb, rc| {
        if ring.winding == 1 {
            RingTri { n: [a, b, c], r: [ra, rb, rc] }
        } else {
            RingTri { n: [c, b, a], r: [rc, rb, ra] }
        }
    };

    if min_angle <= 85.0 {
        // close the corner with a single triangle
        let tri = emit(
            ring.nodes[prev],
            current,
            ring.nodes[next],
            ring.pos[prev],
            ring.pos[index],
            ring.pos[next],
        );
        return Some((vec![tri], Vec::new()));
    }

    if min_angle > 180.0 {
        return None;
    }

    // concavity of the corner from the umbrella Laplacian against the normal
    let valence = nnl.valence(current).max(1);
    let mut laplacian = Vector3::zeros();
    for &k in nnl.neighbors(current) {
        laplacian += mesh.position(k) - ring.pos[index];
    }
    laplacian /= valence as f64;
    let concave = normals[current].dot(&laplacian) > 0.0;

    let new_id0 = mesh.node_count();
    if min_angle <= 135.0 {
        // split the corner once: one new vertex, two triangles
        let v_new = new_front_node(
            ring.pos[index],
            ring.pos[next],
            ring.pos[prev],
            normals[current],
            0.5,
            concave,
        );
        let t1 = emit(
            ring.nodes[prev],
            current,
            new_id0,
            ring.pos[prev],
            ring.pos[index],
            v_new,
        );
        let t2 = emit(
            new_id0,
            current,
            ring.nodes[next],
            v_new,
            ring.pos[index],
            ring.pos[next],
        );
        Some((vec![t1, t2], vec![v_new]))
    } else {
        // split the corner twice: two new vertices, three triangles
        let v1 = new_front_node(
            ring.pos[index],
            ring.pos[next],
            ring.pos[prev],
            normals[current],
            0.33,
            concave,
        );
        let v2 = new_front_node(
            ring.pos[index],
            ring.pos[next],
            ring.pos[prev],
            normals[current],
            0.66,
            concave,
        );
        let new_id1 = new_id0 + 1;
        let t1 = emit(
            ring.nodes[prev],
            current,
            new_id1,
            ring.pos[prev],
            ring.pos[index],
            v2,
        );
        let t2 = emit(new_id0, current, ring.nodes[next], v1, ring.pos[index], ring.pos[next]);
        let t3 = emit(new_id1, current, new_id0, v2, ring.pos[index], v1);
        Some((vec![t1, t2, t3], vec![v1, v2]))
    }
}

/// Position a new advancing-front vertex.
///
/// The direction blends the two boundary edge directions at the corner
/// (`frac` in (0, 1) picks where between them), projects into the tangent
/// plane of the corner normal, and bends toward or away from the surface
/// depending on concavity. Step length is the mean of the two boundary
/// edge lengths.
fn new_front_node(
    current: Point3<f64>,
    next: Point3<f64>,
    prev: Point3<f64>,
    normal: Vector3<f64>,
    frac: f64,
    concave: bool,
) -> Point3<f64> {
    let a = next - current;
    let b = prev - current;
    let la = a.norm();
    let lb = b.norm();
    let ah = a / la;
    let bh = b / lb;

    let mut dir = bh * (1.0 - frac) + ah * frac;
    if dir.norm() < 1e-12 {
        dir = normal.cross(&ah);
    }
    dir.normalize_mut();

    let along = normal.dot(&dir);
    let mut tangent = dir - normal * along;
    if tangent.norm() < 1e-12 {
        tangent = normal.cross(&ah);
    }
    tangent.normalize_mut();

    // bend the corrected normal toward the front direction and derive the
    // curvature correction factor
    let n1 = (normal + dir * (0.45 * along)).normalize();
    let t = n1.dot(&tangent);
    let k = if t == 0.0 {
        (normal.dot(&n1) - 1.0) / 0.001
    } else {
        (normal.dot(&n1) - 1.0) / t
    };

    let vdir = if concave { tangent - n1 * k } else { tangent + n1 * k };
    let vdir = vdir.normalize();

    current + vdir * (0.5 * (la + lb))
}

fn append_tris(mesh: &mut SurfaceMesh, tris: &[RingTri]) {
    for tri in tris {
        let mut face = Face::tri(tri.n[0], tri.n[1], tri.n[2]);
        face.gid = 0;
        mesh.faces.push(face);
    }
}

/// Fill the hole whose boundary passes through `seed`.
///
/// Returns a new mesh; the input is untouched. With
/// [`FillHoleOptions::insert_nodes`] the advancing front runs step by step
/// until the ring closes, inserting vertices as it goes; otherwise the
/// ring is triangulated in one pass with the fast or optimal divider.
pub fn fill_hole(mesh: &SurfaceMesh, seed: usize, options: &FillHoleOptions) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }

    if options.insert_nodes {
        return fill_hole_afm(mesh, seed);
    }

    let ring = find_edge_ring(mesh, seed)?;
    let tris = if options.optimize {
        divide_ring(&ring)
    } else {
        divide_ring_fast(&ring)
    }
    .ok_or_else(|| MeshError::topology("boundary ring could not be triangulated"))?;

    let mut out = mesh.clone();
    append_tris(&mut out, &tris);
    out.rebuild();
    Ok(out)
}

fn fill_hole_afm(mesh: &SurfaceMesh, seed: usize) -> Result<SurfaceMesh> {
    let mut out = mesh.clone();
    let mut seed = seed;

    let first_ring = find_edge_ring(&out, seed)?;
    let budget = 4 * first_ring.len() + 16;

    for _ in 0..budget {
        let ring = find_edge_ring(&out, seed)?;
        let nnl = NodeNodeList::build(&out);
        let normals = out.vertex_normals();

        let (tris, new_points) = afm_step(&out, &nnl, &normals, &ring)
            .ok_or_else(|| MeshError::topology("advancing front found no workable corner"))?;

        for p in &new_points {
            out.nodes.push(Node::new(*p));
        }
        append_tris(&mut out, &tris);
        out.rebuild();

        if ring.len() == 3 {
            return Ok(out);
        }

        // continue from any ring or freshly inserted node still on the hole
        let (_, node_count) = tag_boundary(&out);
        let candidates = ring
            .nodes
            .iter()
            .copied()
            .chain(out.node_count() - new_points.len()..out.node_count());
        match candidates.into_iter().find(|&c| node_count[c] > 0) {
            Some(c) => seed = c,
            None => return Ok(out),
        }
    }

    Err(MeshError::BudgetExhausted {
        what: "advancing front",
        limit: budget,
    })
}

/// Fill every hole in the mesh in one pass.
///
/// All rings are discovered first, each is triangulated with the Delaunay
/// ear cutter (falling back internally to the fast divider), and all new
/// faces are appended in one batch before a single topology rebuild.
pub fn fill_all_holes(mesh: &SurfaceMesh) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }
    let mut out = mesh.clone();
    fill_all_holes_impl(&mut out, None);
    Ok(out)
}

/// [`fill_all_holes`] with progress reporting during the ring scan.
pub fn fill_all_holes_with_progress(
    mesh: &SurfaceMesh,
    progress: &Progress,
) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }
    let mut out = mesh.clone();
    fill_all_holes_impl(&mut out, Some(progress));
    Ok(out)
}

/// In-place variant used by the decimation pipeline; returns the number of
/// holes filled.
pub(crate) fn fill_all_holes_in_place(mesh: &mut SurfaceMesh) -> usize {
    fill_all_holes_impl(mesh, None)
}

/// Rings that cannot be walked or triangulated are skipped, never filled
/// partially.
fn fill_all_holes_impl(mesh: &mut SurfaceMesh, progress: Option<&Progress>) -> usize {
    let normals = mesh.vertex_normals();
    let nel = NodeEdgeList::build(mesh);
    let (edge_boundary, mut node_count) = tag_boundary(mesh);

    if let Some(p) = progress {
        p.report(0.0);
    }
    let nn = mesh.node_count();
    let mut rings = Vec::new();
    for i in 0..nn {
        if node_count[i] > 0 {
            if let Ok(ring) = walk_ring(mesh, i, &normals, &nel, &edge_boundary, &node_count) {
                for &n in &ring.nodes {
                    node_count[n] -= 2;
                }
                rings.push(ring);
            }
        }
        if let Some(p) = progress {
            p.report(100.0 * (i + 1) as f64 / nn as f64);
        }
    }
    info!("found {} holes", rings.len());

    let mut filled = 0;
    let mut tris = Vec::new();
    for ring in &rings {
        if let Some(t) = divide_ring_delaunay(ring) {
            filled += 1;
            tris.extend(t);
        }
    }
    debug!("filled {} holes with {} new faces", filled, tris.len());

    append_tris(mesh, &tris);
    mesh.rebuild();
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 4x4 grid of quads split into 32 triangles with the central vertex
    /// and its 6 incident triangles removed: a hexagonal hole.
    pub(crate) fn grid_with_hex_hole() -> (SurfaceMesh, usize) {
        let n = 4;
        let mut points = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                points.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let center = 2 * (n + 1) + 2;
        let mut tris = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;
                for tri in [[v00, v10, v11], [v00, v11, v01]] {
                    if !tri.contains(&center) {
                        tris.push(tri);
                    }
                }
            }
        }
        assert_eq!(tris.len(), 32 - 6);
        let mesh = SurfaceMesh::from_triangles(&points, &tris).unwrap();
        (mesh, center)
    }

    /// A node on the hexagonal hole's ring (right neighbor of the removed
    /// center vertex).
    fn hex_seed(center: usize) -> usize {
        center + 1
    }

    /// The ring's node cycle in canonical (`winding == 1`) orientation.
    fn canonical_cycle(ring: &EdgeRing) -> Vec<usize> {
        let mut nodes = ring.nodes.clone();
        if ring.winding == -1 {
            nodes[1..].reverse();
        }
        nodes
    }

    #[test]
    fn test_find_edge_ring_hexagon() {
        let (mesh, center) = grid_with_hex_hole();
        let ring = find_edge_ring(&mesh, hex_seed(center)).unwrap();
        assert_eq!(ring.len(), 6);
        assert!(!ring.contains(center));
    }

    #[test]
    fn test_ring_winding_idempotent() {
        let (mesh, center) = grid_with_hex_hole();
        let reference = canonical_cycle(&find_edge_ring(&mesh, hex_seed(center)).unwrap());

        for &start in &reference {
            let ring = find_edge_ring(&mesh, start).unwrap();
            assert_eq!(ring.len(), reference.len());
            // after canonicalizing the winding, every seed yields the same
            // cyclic node sequence up to rotation
            let cycle = canonical_cycle(&ring);
            let offset = reference.iter().position(|&n| n == cycle[0]).unwrap();
            for k in 0..cycle.len() {
                assert_eq!(cycle[k], reference[(offset + k) % reference.len()]);
            }
        }
    }

    #[test]
    fn test_fill_hexagonal_hole() {
        let (mesh, center) = grid_with_hex_hole();
        let seed = hex_seed(center);
        assert_eq!(mesh.face_count(), 26);

        for optimize in [false, true] {
            let options = FillHoleOptions::default().with_optimize(optimize);
            let filled = fill_hole(&mesh, seed, &options).unwrap();
            // a hexagon triangulates into 4 triangles: 26 + 4 = 30
            assert_eq!(filled.face_count(), 30);
            // the grid's outer boundary remains; only the hole closed
            assert_eq!(filled.boundary_edge_count(), 16);
        }
    }

    #[test]
    fn test_fill_closes_ring_watertight() {
        // closed box minus one face: a triangular hole in a closed surface
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let tris = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3]];
        let mesh = SurfaceMesh::from_triangles(&points, &tris).unwrap();
        assert_eq!(mesh.boundary_edge_count(), 3);

        let filled = fill_hole(&mesh, 0, &FillHoleOptions::default()).unwrap();
        assert_eq!(filled.face_count(), 4);
        assert_eq!(filled.boundary_edge_count(), 0);
        assert!(filled.is_closed());
    }

    #[test]
    fn test_fill_all_holes_closes_open_tet() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let tris = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3]];
        let mesh = SurfaceMesh::from_triangles(&points, &tris).unwrap();

        let filled = fill_all_holes(&mesh).unwrap();
        assert_eq!(filled.face_count(), 4);
        assert!(filled.is_closed());
    }

    #[test]
    fn test_fill_all_holes_grid() {
        // every boundary loop counts as a hole, the outer perimeter of an
        // open grid included: 4 triangles close the hexagon, 14 close the
        // 16-node perimeter
        let (mesh, _) = grid_with_hex_hole();
        let filled = fill_all_holes(&mesh).unwrap();
        assert_eq!(filled.face_count(), 26 + 4 + 14);
        assert_eq!(filled.boundary_edge_count(), 0);
    }

    #[test]
    fn test_divide_ring_face_count() {
        // every strategy closes an N-ring with N-2 triangles
        let (mesh, center) = grid_with_hex_hole();
        let ring = find_edge_ring(&mesh, hex_seed(center)).unwrap();
        for strategy in [divide_ring, divide_ring_fast, divide_ring_delaunay] {
            let tris = strategy(&ring).unwrap();
            assert_eq!(tris.len(), ring.len() - 2);
        }
    }

    #[test]
    fn test_fill_hole_rejects_quad_mesh() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_quads(&points, &[[0, 1, 2, 3]]).unwrap();
        assert!(fill_hole(&mesh, 0, &FillHoleOptions::default()).is_err());
    }

    #[test]
    fn test_fill_hole_interior_seed_fails() {
        // a node not on any boundary edge cannot seed a ring
        let (mesh, _) = grid_with_hex_hole();
        // the grid corner node 0 is on the outer boundary; find a strictly
        // interior node instead
        let (_, counts) = tag_boundary(&mesh);
        let interior = (0..mesh.node_count())
            .find(|&i| counts[i] == 0 && mesh.faces.iter().any(|f| f.vertices().contains(&i)))
            .unwrap();
        assert!(find_edge_ring(&mesh, interior).is_err());
    }

    #[test]
    fn test_fill_all_reports_progress() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let progress = Progress::new(move |pct| {
            assert!((0.0..=100.0).contains(&pct));
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let (mesh, _) = grid_with_hex_hole();
        fill_all_holes_with_progress(&mesh, &progress).unwrap();
        assert!(calls.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_afm_fills_hole() {
        let (mesh, center) = grid_with_hex_hole();
        let seed = hex_seed(center);
        let options = FillHoleOptions::default().with_insert_nodes(true);
        let filled = fill_hole(&mesh, seed, &options).unwrap();
        // the front must close the hexagon; faces strictly increase and the
        // outer boundary is untouched
        assert!(filled.face_count() > mesh.face_count());
        assert_eq!(filled.boundary_edge_count(), 16);
    }
}
