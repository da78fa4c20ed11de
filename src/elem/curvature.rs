//! Discrete curvature estimation by local quadric fitting.
//!
//! At a vertex, the 1-2 ring neighborhood is projected into a tangent frame
//! derived from the vertex normal and a quadric surface is fit by least
//! squares. With fewer than 5 neighbors (or when extended fitting is off)
//! the fit is the 3-coefficient quadric `z = ax^2 + bxy + cy^2`; otherwise
//! an extended quadric with first-order terms is fit and the normal is
//! re-estimated from the fit, iterating up to a caller-set limit. Curvature
//! measures come from the Monge-patch closed forms. A vertex with fewer
//! than 3 neighbors reports zero curvature.

use nalgebra::{DMatrix, DVector, Matrix3, Point3, Vector3};
use rayon::prelude::*;

use crate::mesh::{NodeFaceList, SurfaceMesh};

/// Which curvature measure to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurvatureMeasure {
    /// Gaussian curvature K = k1 k2.
    Gaussian,
    /// Mean curvature H = (k1 + k2) / 2 (up to the fit's scaling).
    Mean,
    /// Largest principal curvature k1.
    MaxPrincipal,
    /// Smallest principal curvature k2.
    MinPrincipal,
    /// Root-mean-square of the principal curvatures.
    Rms,
    /// Principal curvature difference k1 - k2.
    Diff,
}

/// Options for the quadric curvature fit.
#[derive(Debug, Clone)]
pub struct CurvatureOptions {
    /// Neighborhood ring count (clamped to 1..=11).
    pub levels: usize,
    /// Iteration limit for the extended fit's normal re-estimation
    /// (clamped to 1..=100).
    pub max_iters: usize,
    /// Whether to use the extended quadric with first-order terms.
    pub extended: bool,
}

impl Default for CurvatureOptions {
    fn default() -> Self {
        Self {
            levels: 1,
            max_iters: 10,
            extended: false,
        }
    }
}

impl CurvatureOptions {
    /// Set the neighborhood ring count.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Set the extended-fit iteration limit.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Enable or disable the extended quadric fit.
    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}

/// Collect the nodes within `levels` face-rings of `node`, excluding the
/// node itself.
fn ring_neighborhood(
    mesh: &SurfaceMesh,
    nfl: &NodeFaceList,
    node: usize,
    levels: usize,
) -> Vec<usize> {
    let expansions = levels.clamp(1, 11);
    let mut in_set = vec![false; mesh.node_count()];
    let mut set = vec![node];
    in_set[node] = true;

    for _ in 0..expansions {
        let mut next = Vec::new();
        for &n in &set {
            for &f in nfl.faces(n) {
                for &m in mesh.faces[f].vertices() {
                    if !in_set[m] {
                        in_set[m] = true;
                        next.push(m);
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        set.extend(next);
    }

    set.retain(|&m| m != node);
    set
}

/// Local tangent frame with `e3 = normal`; rows of the returned matrix map
/// world vectors into (e1, e2, e3) coordinates.
fn tangent_frame(normal: Vector3<f64>) -> Matrix3<f64> {
    let sn = normal;
    let mut qx = Vector3::new(1.0 - sn.x * sn.x, -sn.y * sn.x, -sn.z * sn.x);
    if qx.norm() < 1e-5 {
        qx = Vector3::new(-sn.x * sn.y, 1.0 - sn.y * sn.y, -sn.z * sn.y);
    }
    let e1 = qx.normalize();
    let e3 = sn;
    let e2 = e3.cross(&e1);
    Matrix3::from_rows(&[e1.transpose(), e2.transpose(), e3.transpose()])
}

fn lsq_solve(m: DMatrix<f64>, rhs: DVector<f64>) -> DVector<f64> {
    let cols = m.ncols();
    m.svd(true, true)
        .solve(&rhs, 1e-12)
        .unwrap_or_else(|_| DVector::zeros(cols))
}

/// Principal curvatures from the 3-coefficient quadric fit of the given
/// neighborhood offsets (`x_i - r0`). Used directly by the CVD decimator's
/// curvature-gradient weighting.
pub(crate) fn simple_principal_curvatures(rel: &[Vector3<f64>], normal: Vector3<f64>) -> (f64, f64) {
    if rel.len() < 3 {
        return (0.0, 0.0);
    }
    let q = tangent_frame(normal);
    let nn = rel.len();
    let mut m = DMatrix::zeros(nn, 3);
    let mut rhs = DVector::zeros(nn);
    for (i, x) in rel.iter().enumerate() {
        let y = q * x;
        m[(i, 0)] = y.x * y.x;
        m[(i, 1)] = y.x * y.y;
        m[(i, 2)] = y.y * y.y;
        rhs[i] = y.z;
    }
    let c = lsq_solve(m, rhs);
    let (a, b, c) = (c[0], c[1], c[2]);
    let root = ((a - c) * (a - c) + b * b).sqrt();
    (a + c + root, a + c - root)
}

fn measure_from_simple(a: f64, b: f64, c: f64, measure: CurvatureMeasure) -> f64 {
    let root = ((a - c) * (a - c) + b * b).sqrt();
    let k1 = a + c + root;
    let k2 = a + c - root;
    match measure {
        CurvatureMeasure::Gaussian => 4.0 * a * c - b * b,
        CurvatureMeasure::Mean => a + c,
        CurvatureMeasure::MaxPrincipal => k1,
        CurvatureMeasure::MinPrincipal => k2,
        CurvatureMeasure::Rms => (0.5 * (k1 * k1 + k2 * k2)).sqrt(),
        CurvatureMeasure::Diff => k1 - k2,
    }
}

fn measure_from_extended(coef: &DVector<f64>, measure: CurvatureMeasure) -> f64 {
    let (a, b, c, d, e) = (coef[0], coef[1], coef[2], coef[3], coef[4]);
    let den = 1.0 + d * d + e * e;
    let g = (4.0 * a * c - b * b) / (den * den);
    let h = (a + c + a * e * e + c * d * d - b * d * e) / den.powf(1.5);
    let disc = (h * h - g).max(0.0).sqrt();
    let k1 = h + disc;
    let k2 = h - disc;
    match measure {
        CurvatureMeasure::Gaussian => g,
        CurvatureMeasure::Mean => h,
        CurvatureMeasure::MaxPrincipal => k1,
        CurvatureMeasure::MinPrincipal => k2,
        CurvatureMeasure::Rms => (0.5 * (k1 * k1 + k2 * k2)).sqrt(),
        CurvatureMeasure::Diff => k1 - k2,
    }
}

fn curvature_at(
    rel: &[Vector3<f64>],
    normal: Vector3<f64>,
    measure: CurvatureMeasure,
    options: &CurvatureOptions,
) -> f64 {
    let nn = rel.len();
    if nn < 3 {
        return 0.0;
    }

    if nn < 5 || !options.extended {
        let q = tangent_frame(normal);
        let mut m = DMatrix::zeros(nn, 3);
        let mut rhs = DVector::zeros(nn);
        for (i, x) in rel.iter().enumerate() {
            let y = q * x;
            m[(i, 0)] = y.x * y.x;
            m[(i, 1)] = y.x * y.y;
            m[(i, 2)] = y.y * y.y;
            rhs[i] = y.z;
        }
        let c = lsq_solve(m, rhs);
        return measure_from_simple(c[0], c[1], c[2], measure);
    }

    // extended fit: refit and re-estimate the normal until the iteration
    // limit; the last fit's measure is reported
    let iters = options.max_iters.clamp(1, 100);
    let mut sn = normal;
    let mut k = 0.0;
    for _ in 0..iters {
        let q = tangent_frame(sn);
        let mut m = DMatrix::zeros(nn, 5);
        let mut rhs = DVector::zeros(nn);
        for (i, x) in rel.iter().enumerate() {
            let y = q * x;
            m[(i, 0)] = y.x * y.x;
            m[(i, 1)] = y.x * y.y;
            m[(i, 2)] = y.y * y.y;
            m[(i, 3)] = y.x;
            m[(i, 4)] = y.y;
            rhs[i] = y.z;
        }
        let coef = lsq_solve(m, rhs);
        k = measure_from_extended(&coef, measure);

        let local = Vector3::new(-coef[3], -coef[4], 1.0).normalize();
        sn = (q.transpose() * local).normalize();
    }
    k
}

/// Curvature at one vertex of a mesh.
///
/// Builds the neighborhood tables locally; use [`mesh_curvature`] to sweep
/// a whole mesh.
pub fn vertex_curvature(
    mesh: &SurfaceMesh,
    node: usize,
    measure: CurvatureMeasure,
    options: &CurvatureOptions,
) -> f64 {
    let nfl = NodeFaceList::build(mesh);
    let normals = mesh.vertex_normals();
    vertex_curvature_with(mesh, &nfl, &normals, node, measure, options)
}

fn vertex_curvature_with(
    mesh: &SurfaceMesh,
    nfl: &NodeFaceList,
    normals: &[Vector3<f64>],
    node: usize,
    measure: CurvatureMeasure,
    options: &CurvatureOptions,
) -> f64 {
    let r0: Point3<f64> = mesh.position(node);
    let rel: Vec<Vector3<f64>> = ring_neighborhood(mesh, nfl, node, options.levels)
        .into_iter()
        .map(|m| mesh.position(m) - r0)
        .collect();
    curvature_at(&rel, normals[node], measure, options)
}

/// Curvature of every vertex, computed in parallel.
pub fn mesh_curvature(
    mesh: &SurfaceMesh,
    measure: CurvatureMeasure,
    options: &CurvatureOptions,
) -> Vec<f64> {
    let nfl = NodeFaceList::build(mesh);
    let normals = mesh.vertex_normals();
    (0..mesh.node_count())
        .into_par_iter()
        .map(|n| vertex_curvature_with(mesh, &nfl, &normals, n, measure, options))
        .collect()
}

/// Curvature of every vertex, single-threaded.
pub fn mesh_curvature_sequential(
    mesh: &SurfaceMesh,
    measure: CurvatureMeasure,
    options: &CurvatureOptions,
) -> Vec<f64> {
    let nfl = NodeFaceList::build(mesh);
    let normals = mesh.vertex_normals();
    (0..mesh.node_count())
        .map(|n| vertex_curvature_with(mesh, &nfl, &normals, n, measure, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Octahedron-style fan: center vertex surrounded by a flat hexagon.
    fn flat_fan() -> SurfaceMesh {
        let mut points = vec![Point3::new(0.0, 0.0, 0.0)];
        for i in 0..6 {
            let a = std::f64::consts::FRAC_PI_3 * i as f64;
            points.push(Point3::new(a.cos(), a.sin(), 0.0));
        }
        let mut tris = Vec::new();
        for i in 0..6 {
            tris.push([0, 1 + i, 1 + (i + 1) % 6]);
        }
        SurfaceMesh::from_triangles(&points, &tris).unwrap()
    }

    /// Same fan lifted onto the unit sphere cap around the north pole.
    fn spherical_fan(radius: f64) -> SurfaceMesh {
        let mut points = vec![Point3::new(0.0, 0.0, radius)];
        let polar: f64 = 0.5;
        for i in 0..6 {
            let a = std::f64::consts::FRAC_PI_3 * i as f64;
            points.push(Point3::new(
                radius * polar.sin() * a.cos(),
                radius * polar.sin() * a.sin(),
                radius * polar.cos(),
            ));
        }
        let mut tris = Vec::new();
        for i in 0..6 {
            tris.push([0, 1 + i, 1 + (i + 1) % 6]);
        }
        SurfaceMesh::from_triangles(&points, &tris).unwrap()
    }

    #[test]
    fn test_flat_patch_is_zero() {
        let mesh = flat_fan();
        let options = CurvatureOptions::default();
        for measure in [
            CurvatureMeasure::Gaussian,
            CurvatureMeasure::Mean,
            CurvatureMeasure::MaxPrincipal,
            CurvatureMeasure::MinPrincipal,
        ] {
            let k = vertex_curvature(&mesh, 0, measure, &options);
            assert!(k.abs() < 1e-10, "{:?} = {}", measure, k);
        }
    }

    #[test]
    fn test_sphere_cap_mean_curvature_scales_inversely() {
        let options = CurvatureOptions::default();
        let h1 = vertex_curvature(&spherical_fan(1.0), 0, CurvatureMeasure::Mean, &options);
        let h2 = vertex_curvature(&spherical_fan(2.0), 0, CurvatureMeasure::Mean, &options);
        assert!(h1.abs() > 1e-3);
        // doubling the radius should halve the curvature
        assert!((h1 / h2 - 2.0).abs() < 0.2, "h1 = {}, h2 = {}", h1, h2);
    }

    #[test]
    fn test_principal_relations() {
        let mesh = spherical_fan(1.0);
        let options = CurvatureOptions::default();
        let k1 = vertex_curvature(&mesh, 0, CurvatureMeasure::MaxPrincipal, &options);
        let k2 = vertex_curvature(&mesh, 0, CurvatureMeasure::MinPrincipal, &options);
        let diff = vertex_curvature(&mesh, 0, CurvatureMeasure::Diff, &options);
        assert!(k1 >= k2);
        assert!((diff - (k1 - k2)).abs() < 1e-12);
        let rms = vertex_curvature(&mesh, 0, CurvatureMeasure::Rms, &options);
        assert!((rms - (0.5 * (k1 * k1 + k2 * k2)).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_neighbors_is_zero() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::from_triangles(&points, &[[0, 1, 2]]).unwrap();
        let k = vertex_curvature(
            &mesh,
            0,
            CurvatureMeasure::Gaussian,
            &CurvatureOptions::default(),
        );
        assert_eq!(k, 0.0);
    }

    #[test]
    fn test_extended_fit_runs() {
        let mesh = spherical_fan(1.0);
        let options = CurvatureOptions::default().with_extended(true).with_max_iters(5);
        let h = vertex_curvature(&mesh, 0, CurvatureMeasure::Mean, &options);
        assert!(h.is_finite());
        assert!(h.abs() > 1e-3);
    }

    #[test]
    fn test_mesh_sweep_matches_sequential() {
        let mesh = spherical_fan(1.0);
        let options = CurvatureOptions::default();
        let par = mesh_curvature(&mesh, CurvatureMeasure::Gaussian, &options);
        let seq = mesh_curvature_sequential(&mesh, CurvatureMeasure::Gaussian, &options);
        assert_eq!(par.len(), seq.len());
        for (a, b) in par.iter().zip(seq.iter()) {
            assert!((a - b).abs() < 1e-14);
        }
    }
}
