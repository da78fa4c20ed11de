//! Mesh decimation by centroidal Voronoi clustering.
//!
//! Faces of a closed triangle mesh are grouped into `scale x N` clusters by
//! a Lloyd-style greedy minimization: the queue of inter-cluster edges is
//! scanned repeatedly, and for each edge the three hypotheses "keep",
//! "move one face left", "move one face right" are scored in closed form
//! by the cluster-concentration energy `|sum(gamma)|^2 / sum(rho)`. The
//! unassigned cluster 0 is always drained first. After convergence each
//! cluster must be edge-connected; disconnected fragments are evicted back
//! to cluster 0 and minimization resumes.
//!
//! The clustering then becomes a mesh: one vertex per cluster at its
//! area-weighted centroid (projected back onto the original surface), one
//! triangle or fan per original vertex touching 3+ clusters, followed by a
//! repair pipeline, because the local triangulation is not
//! topology-preserving by construction.
//!
//! Seeding uses a fixed linear-congruential generator so results are
//! reproducible run to run.

use std::collections::VecDeque;

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use crate::algo::fill_hole::{divide_ring, fill_all_holes_in_place, EdgeRing, RingTri};
use crate::algo::repair::{fix_winding, remove_duplicate_faces, remove_non_manifold_faces};
use crate::elem::curvature::simple_principal_curvatures;
use crate::elem::metrics::triangle_area;
use crate::error::{MeshError, Result};
use crate::mesh::{Face, Node, NodeFaceList, NodeNodeList, SurfaceMesh};

/// Hard cap on minimization passes; exceeding it is a failure, not a
/// partial result.
const MAX_PASSES: usize = 50_000;

/// Options for [`cvd_decimate`].
#[derive(Debug, Clone)]
pub struct CvdOptions {
    /// Target vertex fraction: the output aims for `scale x` the input
    /// vertex count (at least 4 clusters).
    pub scale: f64,
    /// Exponent biasing cluster density toward curved regions; 0 disables
    /// the curvature weighting.
    pub gradient_weight: f64,
    /// Return the cluster partition as face groups on a copy of the input
    /// instead of building the decimated mesh.
    pub clusters_only: bool,
}

impl Default for CvdOptions {
    fn default() -> Self {
        Self {
            scale: 0.1,
            gradient_weight: 0.0,
            clusters_only: false,
        }
    }
}

impl CvdOptions {
    /// Create options with the given target vertex fraction.
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Set the curvature-gradient weighting exponent.
    pub fn with_gradient_weight(mut self, w: f64) -> Self {
        self.gradient_weight = w;
        self
    }

    /// Request the cluster partition instead of the decimated mesh.
    pub fn with_clusters_only(mut self, clusters_only: bool) -> Self {
        self.clusters_only = clusters_only;
        self
    }
}

/// Deterministic linear-congruential generator for cluster seeding.
struct Lcg {
    state: u32,
}

impl Lcg {
    fn new() -> Self {
        Self { state: 47_856_987 }
    }

    fn next(&mut self, nmax: usize) -> usize {
        self.state = self
            .state
            .wrapping_mul(789_789_812)
            .wrapping_add(38_569_741);
        self.state as usize % nmax
    }
}

/// Cluster accumulators: area-weighted centroid sum, area sum, face count
/// and the face list (filled in after convergence).
#[derive(Debug, Clone, Default)]
struct Cluster {
    sgamma: Vector3<f64>,
    srho: f64,
    val: i64,
    fid: Vec<usize>,
}

/// An edge of the inter-cluster boundary: the two incident faces.
#[derive(Debug, Clone, Copy)]
struct ClusterEdge {
    faces: [usize; 2],
}

struct CvdState {
    tag: Vec<usize>,
    clusters: Vec<Cluster>,
    rho: Vec<f64>,
    gamma: Vec<Vector3<f64>>,
    queue: VecDeque<ClusterEdge>,
}

/// Decimate a closed triangle mesh to roughly `scale x` its vertex count.
pub fn cvd_decimate(mesh: &SurfaceMesh, options: &CvdOptions) -> Result<SurfaceMesh> {
    if !mesh.is_tri_mesh() {
        return Err(MeshError::WrongFaceKind { expected: "triangle" });
    }
    if mesh.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    if !mesh.is_closed() {
        return Err(MeshError::topology("decimation requires a closed mesh"));
    }
    if !(options.scale > 0.0 && options.scale <= 1.0) {
        return Err(MeshError::invalid_param(
            "scale",
            options.scale,
            "must be in (0, 1]",
        ));
    }

    let mut state = initialize(mesh, options)?;
    minimize(mesh, &mut state)?;

    if options.clusters_only {
        // re-partition a copy of the input by cluster id
        let mut out = mesh.clone();
        for (i, face) in out.faces.iter_mut().enumerate() {
            face.gid = state.tag[i] as i32;
        }
        out.rebuild();
        return Ok(out);
    }

    let mut out = triangulate_clusters(mesh, &state)?;

    // the local triangulation can produce duplicates, non-manifold fans,
    // inconsistent winding and small holes; clean all of that up
    remove_duplicate_faces(&mut out);
    remove_non_manifold_faces(&mut out);
    fix_winding(&mut out)?;
    fill_all_holes_in_place(&mut out);

    Ok(out)
}

/// Seed clusters, compute per-face area and centroid, and build the
/// initial inter-cluster edge queue.
fn initialize(mesh: &SurfaceMesh, options: &CvdOptions) -> Result<CvdState> {
    let n0 = mesh.node_count();
    let t0 = mesh.face_count();

    let mut nc = (options.scale * n0 as f64).round() as usize;
    if nc < 4 {
        nc = 4;
    }
    if nc > t0 {
        return Err(MeshError::invalid_param(
            "scale",
            options.scale,
            "requests more clusters than faces",
        ));
    }

    // cluster 0 is the reserved "unassigned" sentinel
    let mut clusters = vec![Cluster::default(); nc + 1];
    let mut tag = vec![0usize; t0];

    // random seed faces, bounded retries
    let mut rng = Lcg::new();
    let max_tries = 2 * t0;
    let mut tries = 0;
    let mut seeded = 0;
    while seeded < nc {
        let f = rng.next(t0);
        if tag[f] == 0 {
            seeded += 1;
            tag[f] = seeded;
        }
        tries += 1;
        if tries > max_tries {
            return Err(MeshError::BudgetExhausted {
                what: "cluster seeding",
                limit: max_tries,
            });
        }
    }

    // per-face area (rho) and centroid (gamma)
    let nnl = if options.gradient_weight > 0.0 {
        Some(NodeNodeList::build(mesh))
    } else {
        None
    };
    let mut rho = Vec::with_capacity(t0);
    let mut gamma = Vec::with_capacity(t0);
    for (i, face) in mesh.faces.iter().enumerate() {
        let r = [
            mesh.position(face.nodes[0]),
            mesh.position(face.nodes[1]),
            mesh.position(face.nodes[2]),
        ];
        gamma.push((r[0].coords + r[1].coords + r[2].coords) / 3.0);
        let mut area = triangle_area(&r);

        if let Some(nnl) = &nnl {
            // bias the density toward curved regions: average the principal
            // curvatures of the face's corners and raise their magnitude to
            // the configured exponent
            let mut k1 = 0.0;
            let mut k2 = 0.0;
            for j in 0..3 {
                let node = face.nodes[j];
                let r0 = mesh.position(node);
                let rel: Vec<Vector3<f64>> = nnl
                    .neighbors(node)
                    .iter()
                    .map(|&k| mesh.position(k) - r0)
                    .collect();
                let (ka, kb) = simple_principal_curvatures(&rel, face.normals[j]);
                k1 += ka;
                k2 += kb;
            }
            k1 /= 3.0;
            k2 /= 3.0;
            area *= (k1 * k1 + k2 * k2).sqrt().powf(options.gradient_weight);
        }

        if area <= 0.0 {
            return Err(MeshError::topology(format!(
                "face {i} has zero area"
            )));
        }
        rho.push(area);
    }

    for i in 0..t0 {
        let c = tag[i];
        clusters[c].val += 1;
        if c > 0 {
            clusters[c].srho += rho[i];
            clusters[c].sgamma += gamma[i] * rho[i];
        }
    }

    // all face pairs whose clusters differ (cluster 0 included)
    let mut queue = VecDeque::new();
    for (i, face) in mesh.faces.iter().enumerate() {
        for j in 0..3 {
            let nj = face.nbr[j].ok_or_else(|| {
                MeshError::topology("decimation requires a closed mesh")
            })?;
            if tag[i] < tag[nj] {
                queue.push_back(ClusterEdge { faces: [i, nj] });
            }
        }
    }

    debug!("seeded {} clusters over {} faces", nc, t0);

    Ok(CvdState {
        tag,
        clusters,
        rho,
        gamma,
        queue,
    })
}

/// Move `face` into `cluster`, pushing the fresh boundary edges it opens
/// toward its old cluster.
fn swap(mesh: &SurfaceMesh, state: &mut CvdState, face: usize, cluster: usize) -> Result<()> {
    let old = state.tag[face];
    if old == cluster {
        return Ok(());
    }
    state.tag[face] = cluster;

    state.clusters[old].val -= 1;
    state.clusters[cluster].val += 1;
    if state.clusters[old].val < 0 {
        return Err(MeshError::topology("cluster bookkeeping underflow"));
    }

    for j in 0..3 {
        let nj = mesh.faces[face].nbr[j].expect("closed mesh");
        if state.tag[nj] == old {
            if nj == face {
                return Err(MeshError::topology("face is its own neighbor"));
            }
            state.queue.push_front(ClusterEdge { faces: [face, nj] });
        }
    }
    Ok(())
}

/// Lloyd-style greedy minimization of the cluster energy.
fn minimize(mesh: &SurfaceMesh, state: &mut CvdState) -> Result<()> {
    let mut passes = 0usize;
    loop {
        let mut changed = false;

        // one sweep over the current queue; "no change" edges go back in
        for _ in 0..state.queue.len() {
            let Some(edge) = state.queue.pop_front() else {
                break;
            };
            let [m, n] = edge.faces;
            let k = state.tag[m];
            let l = state.tag[n];

            if k == l {
                // boundary dissolved; drop the edge
                changed = true;
                continue;
            }

            let ck = &state.clusters[k];
            let cl = &state.clusters[l];

            // energy of the three hypotheses, in closed form
            let l1 = ck.sgamma.norm_squared() / ck.srho + cl.sgamma.norm_squared() / cl.srho;

            let g0k = ck.sgamma - state.gamma[m] * state.rho[m];
            let r0k = ck.srho - state.rho[m];
            let g0l = cl.sgamma + state.gamma[m] * state.rho[m];
            let r0l = cl.srho + state.rho[m];
            let l2 = g0k.norm_squared() / r0k + g0l.norm_squared() / r0l;

            let g1k = ck.sgamma + state.gamma[n] * state.rho[n];
            let r1k = ck.srho + state.rho[n];
            let g1l = cl.sgamma - state.gamma[n] * state.rho[n];
            let r1l = cl.srho - state.rho[n];
            let l3 = g1k.norm_squared() / r1k + g1l.norm_squared() / r1l;

            if k == 0 || (l != 0 && l2 > l1 && l2 > l3) {
                // face m moves to cluster l
                state.clusters[k].srho = r0k;
                state.clusters[k].sgamma = g0k;
                state.clusters[l].srho = r0l;
                state.clusters[l].sgamma = g0l;
                swap(mesh, state, m, l)?;
                changed = true;
            } else if l == 0 || (l3 > l1 && l3 > l2) {
                // face n moves to cluster k
                state.clusters[k].srho = r1k;
                state.clusters[k].sgamma = g1k;
                state.clusters[l].srho = r1l;
                state.clusters[l].sgamma = g1l;
                swap(mesh, state, n, k)?;
                changed = true;
            } else {
                state.queue.push_back(edge);
            }
        }

        if !changed {
            // no face may remain unassigned once the boundary queue settles
            if state.tag.iter().any(|&t| t == 0) {
                return Err(MeshError::topology(
                    "unassigned faces remain after minimization",
                ));
            }

            if evict_disconnected(mesh, state) {
                changed = true;
            }
        }

        passes += 1;
        if !changed {
            break;
        }
        if passes >= MAX_PASSES {
            return Err(MeshError::BudgetExhausted {
                what: "CVD minimization",
                limit: MAX_PASSES,
            });
        }
    }

    // final face lists per cluster
    for c in state.clusters.iter_mut() {
        c.fid.clear();
    }
    for (i, &t) in state.tag.iter().enumerate() {
        state.clusters[t].fid.push(i);
    }

    debug!("minimization converged after {} passes", passes);
    Ok(())
}

/// Flood-fill each cluster; fragments other than the max-area component
/// are evicted back to cluster 0. Returns whether anything was evicted.
///
/// The pairwise energy step alone cannot guarantee connected clusters, and
/// a disconnected cluster has no usable centroid.
fn evict_disconnected(mesh: &SurfaceMesh, state: &mut CvdState) -> bool {
    let nf = mesh.face_count();
    let ncl = state.clusters.len();

    let mut fids: Vec<Vec<usize>> = vec![Vec::new(); ncl];
    for (i, &t) in state.tag.iter().enumerate() {
        fids[t].push(i);
    }

    let mut comp = vec![-1i64; nf];
    let mut evicted = false;

    for c in 1..ncl {
        let faces = &fids[c];
        if faces.is_empty() {
            continue;
        }

        // label components and track the one with the largest area
        let mut ncomp = 0i64;
        let mut best_comp = -1i64;
        let mut best_area = 0.0;
        for &f in faces {
            if comp[f] != -1 {
                continue;
            }
            let mut area = 0.0;
            let mut stack = vec![f];
            comp[f] = ncomp;
            while let Some(g) = stack.pop() {
                area += state.rho[g];
                for j in 0..3 {
                    let nj = mesh.faces[g].nbr[j].expect("closed mesh");
                    if comp[nj] == -1 && state.tag[nj] == c {
                        comp[nj] = ncomp;
                        stack.push(nj);
                    }
                }
            }
            if best_comp == -1 || area > best_area {
                best_comp = ncomp;
                best_area = area;
            }
            ncomp += 1;
        }

        if ncomp > 1 {
            for &f in faces {
                if comp[f] != best_comp {
                    state.tag[f] = 0;
                    state.clusters[0].val += 1;
                    state.clusters[c].val -= 1;
                    state.clusters[c].srho -= state.rho[f];
                    state.clusters[c].sgamma -= state.gamma[f] * state.rho[f];
                    // reopen the boundary around the evicted face
                    for j in 0..3 {
                        let nj = mesh.faces[f].nbr[j].expect("closed mesh");
                        if state.tag[nj] != 0 {
                            state.queue.push_front(ClusterEdge { faces: [f, nj] });
                        }
                    }
                }
            }
            evicted = true;
        }
    }

    if evicted {
        debug!("evicted disconnected cluster fragments");
    }
    evicted
}

// best-diagonal split of a 4-cluster corner
const LUT4: [[[usize; 3]; 2]; 2] = [
    [[0, 1, 2], [2, 3, 0]],
    [[3, 0, 1], [1, 2, 3]],
];

// candidate fans of a 5-cluster corner
const LUT5: [[[usize; 3]; 3]; 5] = [
    [[0, 1, 2], [2, 3, 4], [0, 2, 4]],
    [[0, 1, 4], [1, 2, 4], [2, 3, 4]],
    [[0, 1, 2], [0, 2, 3], [0, 3, 4]],
    [[3, 4, 0], [0, 1, 3], [1, 2, 3]],
    [[0, 1, 4], [1, 3, 4], [1, 2, 3]],
];

// candidate fans of a 6-cluster corner
const LUT6: [[[usize; 3]; 4]; 8] = [
    [[0, 1, 5], [1, 2, 3], [3, 4, 5], [1, 3, 5]],
    [[0, 1, 2], [2, 3, 4], [4, 5, 0], [0, 2, 4]],
    [[0, 1, 2], [0, 2, 3], [0, 3, 5], [3, 4, 5]],
    [[0, 1, 2], [0, 2, 5], [2, 3, 5], [3, 4, 5]],
    [[0, 1, 5], [1, 2, 5], [2, 4, 5], [2, 3, 4]],
    [[0, 1, 5], [1, 4, 5], [1, 2, 4], [2, 3, 4]],
    [[0, 4, 5], [0, 3, 4], [0, 1, 3], [1, 2, 3]],
    [[0, 4, 5], [0, 1, 4], [1, 3, 4], [1, 2, 3]],
];

/// Pick the candidate tessellation whose smallest triangle area is largest.
fn best_fan<const T: usize>(
    corners: &[usize],
    pos: &[Point3<f64>],
    luts: &[[[usize; 3]; T]],
) -> Vec<[usize; 3]> {
    let mut best = 0;
    let mut amax = -1.0;
    for (i, lut) in luts.iter().enumerate() {
        let amin = lut
            .iter()
            .map(|tri| triangle_area(&[pos[tri[0]], pos[tri[1]], pos[tri[2]]]))
            .fold(f64::INFINITY, f64::min);
        if amin > amax {
            amax = amin;
            best = i;
        }
    }
    luts[best]
        .iter()
        .map(|tri| [corners[tri[0]], corners[tri[1]], corners[tri[2]]])
        .collect()
}

/// Build the decimated mesh: one vertex per non-empty cluster, one corner
/// tessellation per original vertex touching three or more clusters.
fn triangulate_clusters(mesh: &SurfaceMesh, state: &CvdState) -> Result<SurfaceMesh> {
    let nfl = NodeFaceList::build_sorted(mesh)?;
    let ncl = state.clusters.len();

    // cluster id -> output vertex id, skipping empty clusters
    let mut vertex_of = vec![usize::MAX; ncl];
    let mut points: Vec<Point3<f64>> = Vec::new();
    for c in 1..ncl {
        let cluster = &state.clusters[c];
        if cluster.fid.is_empty() {
            continue;
        }
        let po = Point3::from(cluster.sgamma / cluster.srho);

        // project the centroid back onto a containing cluster triangle;
        // fall back to the raw centroid when none contains it
        let mut projected = po;
        for &f in &cluster.fid {
            let face = &mesh.faces[f];
            let p0 = mesh.position(face.nodes[0]);
            let p1 = mesh.position(face.nodes[1]);
            let p2 = mesh.position(face.nodes[2]);

            let u = p1 - p0;
            let v = p2 - p0;
            let n = u.cross(&v);
            let n2 = n.norm_squared();
            if n2 == 0.0 {
                continue;
            }
            let w = po - p0;
            let gamma = u.cross(&w).dot(&n) / n2;
            let beta = w.cross(&v).dot(&n) / n2;
            let alpha = 1.0 - gamma - beta;
            if (0.0..=1.0).contains(&alpha)
                && (0.0..=1.0).contains(&beta)
                && (0.0..=1.0).contains(&gamma)
            {
                projected = Point3::from(p0.coords * alpha + p1.coords * beta + p2.coords * gamma);
                break;
            }
        }

        vertex_of[c] = points.len();
        points.push(projected);
    }

    // the ordered set of clusters around each original vertex
    let mut tris: Vec<[usize; 3]> = Vec::new();
    for node in 0..mesh.node_count() {
        let mut ring: Vec<usize> = Vec::new();
        for &f in nfl.faces(node) {
            let c = state.tag[f];
            if !ring.contains(&c) {
                ring.push(c);
            }
        }
        if ring.len() < 3 {
            continue;
        }

        let corners: Vec<usize> = ring.iter().map(|&c| vertex_of[c]).collect();
        if corners.iter().any(|&v| v == usize::MAX) {
            return Err(MeshError::topology("vertex touches an empty cluster"));
        }
        let pos: Vec<Point3<f64>> = corners.iter().map(|&v| points[v]).collect();

        match corners.len() {
            3 => tris.push([corners[0], corners[1], corners[2]]),
            4 => tris.extend(best_fan(&corners, &pos, &LUT4)),
            5 => tris.extend(best_fan(&corners, &pos, &LUT5)),
            6 => tris.extend(best_fan(&corners, &pos, &LUT6)),
            _ => {
                // high-valence corners go through the general ring divider
                let mut er = EdgeRing::new();
                for (i, &v) in corners.iter().enumerate() {
                    er.add(v, pos[i], Vector3::zeros());
                }
                if let Some(t) = divide_ring(&er) {
                    tris.extend(t.iter().map(|RingTri { n, .. }| *n));
                }
            }
        }
    }

    // duplicate corner tessellations can emit the same triangle twice and
    // the repair pipeline removes them afterwards; degenerate entries are
    // dropped here
    tris.retain(|t| t[0] != t[1] && t[1] != t[2] && t[2] != t[0]);
    if tris.is_empty() {
        return Err(MeshError::topology("clustering produced no triangles"));
    }

    let mut out = SurfaceMesh {
        nodes: points.into_iter().map(Node::new).collect(),
        edges: Vec::new(),
        faces: tris
            .into_iter()
            .map(|t| Face::tri(t[0], t[1], t[2]))
            .collect(),
    };
    out.rebuild();

    info!(
        "decimated {} vertices to {}",
        mesh.node_count(),
        out.node_count()
    );
    Ok(out)
}
