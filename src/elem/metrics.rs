//! Element geometry and quality metrics.
//!
//! Volume and Jacobian evaluation share a single quadrature loop: the same
//! implementation either accumulates the weighted determinant (volume) or
//! tracks its minimum over the rule (inverted-element detection), selected
//! by a flag. A negative minimum Jacobian flags an inverted or degenerate
//! element.

use nalgebra::{Matrix3, Point3, Vector3};

use super::{ElemType, MAX_GAUSS, MAX_NODES};

const ET_TET: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];
const ET_HEX: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];
const ET_PENTA: [[usize; 2]; 9] = [
    [0, 1],
    [1, 2],
    [2, 0],
    [3, 4],
    [4, 5],
    [5, 3],
    [0, 3],
    [1, 4],
    [2, 5],
];
const ET_PYRA: [[usize; 2]; 8] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
];
const ET_TRI: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
const ET_QUAD: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

// outward faces of the linear tet, for dihedral angles
const FT_TET: [[usize; 3]; 4] = [[0, 1, 3], [1, 2, 3], [0, 3, 2], [0, 2, 1]];

#[inline]
fn det3(j: &[[f64; 3]; 3]) -> f64 {
    j[0][0] * (j[1][1] * j[2][2] - j[1][2] * j[2][1])
        + j[0][1] * (j[1][2] * j[2][0] - j[2][2] * j[1][0])
        + j[0][2] * (j[1][0] * j[2][1] - j[1][1] * j[2][0])
}

/// Shared quadrature loop over a solid element: integrates `det J` when
/// `min_jac` is false, returns the minimum `det J` over the rule otherwise.
fn solid_integral(etype: ElemType, r: &[Point3<f64>], min_jac: bool) -> f64 {
    debug_assert!(etype.is_solid());
    if !etype.is_solid() {
        return 0.0;
    }
    let ne = etype.node_count();
    let ni = etype.gauss_count();
    debug_assert!(r.len() >= ne);

    let mut gr = [0.0; MAX_GAUSS];
    let mut gs = [0.0; MAX_GAUSS];
    let mut gt = [0.0; MAX_GAUSS];
    let mut gw = [0.0; MAX_GAUSS];
    etype.gauss(&mut gr, &mut gs, &mut gt, &mut gw);

    let mut hr = [0.0; MAX_NODES];
    let mut hs = [0.0; MAX_NODES];
    let mut ht = [0.0; MAX_NODES];

    let mut vol = 0.0;
    for n in 0..ni {
        etype.shape_deriv(&mut hr, &mut hs, &mut ht, gr[n], gs[n], gt[n]);

        let mut j = [[0.0; 3]; 3];
        for i in 0..ne {
            let p = r[i];
            j[0][0] += hr[i] * p.x;
            j[0][1] += hs[i] * p.x;
            j[0][2] += ht[i] * p.x;
            j[1][0] += hr[i] * p.y;
            j[1][1] += hs[i] * p.y;
            j[1][2] += ht[i] * p.y;
            j[2][0] += hr[i] * p.z;
            j[2][1] += hs[i] * p.z;
            j[2][2] += ht[i] * p.z;
        }
        let detj = det3(&j);

        if min_jac {
            if n == 0 || detj < vol {
                vol = detj;
            }
        } else {
            vol += detj * gw[n];
        }
    }
    vol
}

/// Shared quadrature loop over a shell element extruded along its director
/// field. `d[i]` is node `i`'s director: the shell normal scaled by the
/// nodal thickness.
fn shell_integral(etype: ElemType, r: &[Point3<f64>], d: &[Vector3<f64>], min_jac: bool) -> f64 {
    debug_assert!(etype.is_shell());
    if !etype.is_shell() {
        return 0.0;
    }
    let ne = etype.node_count();
    let ni = etype.gauss_count();
    debug_assert!(r.len() >= ne && d.len() >= ne);

    let mut gr = [0.0; MAX_GAUSS];
    let mut gs = [0.0; MAX_GAUSS];
    let mut gt = [0.0; MAX_GAUSS];
    let mut gw = [0.0; MAX_GAUSS];
    etype.gauss(&mut gr, &mut gs, &mut gt, &mut gw);

    let mut h = [0.0; MAX_NODES];
    let mut hr = [0.0; MAX_NODES];
    let mut hs = [0.0; MAX_NODES];
    let mut ht = [0.0; MAX_NODES];

    let mut vol = 0.0;
    for n in 0..ni {
        // the third quadrature coordinate runs through the thickness
        let eta = gt[n];
        etype.shape(&mut h, gr[n], gs[n], 0.0);
        etype.shape_deriv(&mut hr, &mut hs, &mut ht, gr[n], gs[n], 0.0);

        // covariant basis vectors of the extruded mid-surface
        let mut g = [Vector3::zeros(); 3];
        for i in 0..ne {
            let x = r[i].coords + d[i] * (eta / 2.0);
            g[0] += x * hr[i];
            g[1] += x * hs[i];
            g[2] += d[i] * (h[i] / 2.0);
        }

        let j = [
            [g[0].x, g[1].x, g[2].x],
            [g[0].y, g[1].y, g[2].y],
            [g[0].z, g[1].z, g[2].z],
        ];
        let detj = det3(&j);

        if min_jac {
            if n == 0 || detj < vol {
                vol = detj;
            }
        } else {
            vol += detj * gw[n];
        }
    }
    vol
}

/// Volume of a solid element from its nodal positions.
///
/// Returns 0 for shell types; use [`shell_volume`] with a director field
/// for those.
pub fn element_volume(etype: ElemType, r: &[Point3<f64>]) -> f64 {
    if etype.is_solid() {
        solid_integral(etype, r, false)
    } else {
        debug_assert!(false, "shell element passed to element_volume");
        0.0
    }
}

/// Minimum Jacobian determinant of a solid element over its quadrature
/// rule. Negative means the element is inverted or degenerate.
pub fn min_jacobian(etype: ElemType, r: &[Point3<f64>]) -> f64 {
    if etype.is_solid() {
        solid_integral(etype, r, true)
    } else {
        debug_assert!(false, "shell element passed to min_jacobian");
        0.0
    }
}

/// Pseudo-volume of a shell element extruded along its director field.
pub fn shell_volume(etype: ElemType, r: &[Point3<f64>], d: &[Vector3<f64>]) -> f64 {
    shell_integral(etype, r, d, false)
}

/// Minimum Jacobian determinant of an extruded shell element.
pub fn shell_min_jacobian(etype: ElemType, r: &[Point3<f64>], d: &[Vector3<f64>]) -> f64 {
    shell_integral(etype, r, d, true)
}

/// Shape-function derivatives in physical coordinates at local node `at`
/// (`-1` = centroid): the inverse-transpose Jacobian applied to the
/// parametric derivatives.
fn physical_shape_grads(
    etype: ElemType,
    r: &[Point3<f64>],
    at: i32,
) -> Option<([f64; MAX_NODES], [f64; MAX_NODES], [f64; MAX_NODES])> {
    debug_assert!(etype.is_solid());
    if !etype.is_solid() {
        return None;
    }
    let ne = etype.node_count();

    let [qr, qs, qt] = etype.iso_coord(at);
    let mut hr = [0.0; MAX_NODES];
    let mut hs = [0.0; MAX_NODES];
    let mut ht = [0.0; MAX_NODES];
    etype.shape_deriv(&mut hr, &mut hs, &mut ht, qr, qs, qt);

    let mut j = Matrix3::zeros();
    for i in 0..ne {
        let p = r[i];
        j[(0, 0)] += hr[i] * p.x;
        j[(0, 1)] += hs[i] * p.x;
        j[(0, 2)] += ht[i] * p.x;
        j[(1, 0)] += hr[i] * p.y;
        j[(1, 1)] += hs[i] * p.y;
        j[(1, 2)] += ht[i] * p.y;
        j[(2, 0)] += hr[i] * p.z;
        j[(2, 1)] += hs[i] * p.z;
        j[(2, 2)] += ht[i] * p.z;
    }
    let jinv_t = j.try_inverse()?.transpose();

    let mut gx = [0.0; MAX_NODES];
    let mut gy = [0.0; MAX_NODES];
    let mut gz = [0.0; MAX_NODES];
    for i in 0..ne {
        let g = jinv_t * Vector3::new(hr[i], hs[i], ht[i]);
        gx[i] = g.x;
        gy[i] = g.y;
        gz[i] = g.z;
    }
    Some((gx, gy, gz))
}

/// Gradient of a nodal scalar field over a solid element, evaluated at
/// local node `node` (`-1` = centroid). Returns zero for degenerate
/// elements.
pub fn scalar_gradient(etype: ElemType, r: &[Point3<f64>], node: i32, v: &[f64]) -> Vector3<f64> {
    let Some((gx, gy, gz)) = physical_shape_grads(etype, r, node) else {
        return Vector3::zeros();
    };
    let ne = etype.node_count();
    let mut g = Vector3::zeros();
    for i in 0..ne {
        g.x += gx[i] * v[i];
        g.y += gy[i] * v[i];
        g.z += gz[i] * v[i];
    }
    g
}

/// Gradient of shape function `na` evaluated at local node `nb`
/// (`Grad N_a(x_b)`). Returns zero for degenerate elements.
pub fn shape_gradient(etype: ElemType, r: &[Point3<f64>], na: usize, nb: i32) -> Vector3<f64> {
    let Some((gx, gy, gz)) = physical_shape_grads(etype, r, nb) else {
        return Vector3::zeros();
    };
    Vector3::new(gx[na], gy[na], gz[na])
}

fn edge_table(etype: ElemType) -> &'static [[usize; 2]] {
    match etype {
        ElemType::Tet4 | ElemType::Tet5 | ElemType::Tet10 | ElemType::Tet15 | ElemType::Tet20 => {
            &ET_TET
        }
        ElemType::Hex8 | ElemType::Hex20 | ElemType::Hex27 => &ET_HEX,
        ElemType::Penta6 | ElemType::Penta15 => &ET_PENTA,
        ElemType::Pyra5 | ElemType::Pyra13 => &ET_PYRA,
        ElemType::Tri3 => &ET_TRI,
        ElemType::Quad4 => &ET_QUAD,
    }
}

/// Length of the shortest edge of an element (corner-to-corner edge table).
pub fn min_edge_length(etype: ElemType, r: &[Point3<f64>]) -> f64 {
    edge_table(etype)
        .iter()
        .map(|e| (r[e[1]] - r[e[0]]).norm())
        .fold(f64::INFINITY, f64::min)
}

/// Length of the longest edge of an element (corner-to-corner edge table).
pub fn max_edge_length(etype: ElemType, r: &[Point3<f64>]) -> f64 {
    edge_table(etype)
        .iter()
        .map(|e| (r[e[1]] - r[e[0]]).norm())
        .fold(0.0, f64::max)
}

/// Shortest distance between any two nodes of an element (edges and
/// diagonals both count).
pub fn shortest_edge(r: &[Point3<f64>]) -> f64 {
    let mut lmin = f64::INFINITY;
    for i in 0..r.len() {
        for j in (i + 1)..r.len() {
            let l = (r[i] - r[j]).norm_squared();
            if l < lmin {
                lmin = l;
            }
        }
    }
    lmin.sqrt()
}

/// Longest distance between any two nodes of an element.
pub fn longest_edge(r: &[Point3<f64>]) -> f64 {
    let mut lmax: f64 = 0.0;
    for i in 0..r.len() {
        for j in (i + 1)..r.len() {
            let l = (r[i] - r[j]).norm_squared();
            if l > lmax {
                lmax = l;
            }
        }
    }
    lmax.sqrt()
}

/// Triangle area from three corner points.
pub fn triangle_area(r: &[Point3<f64>; 3]) -> f64 {
    let e1 = r[1] - r[0];
    let e2 = r[2] - r[0];
    e1.cross(&e2).norm() * 0.5
}

/// Triangle shape quality: sqrt of the ratio of the shortest altitude
/// (squared) to the longest edge (squared). 0 for a degenerate sliver,
/// larger is better.
pub fn tri_quality(r: &[Point3<f64>; 3]) -> f64 {
    let l01 = (r[0] - r[1]).norm_squared();
    let l12 = (r[1] - r[2]).norm_squared();
    let l20 = (r[2] - r[0]).norm_squared();
    let lmax = l01.max(l12).max(l20);
    if lmax == 0.0 {
        return 0.0;
    }

    // squared distance of each corner to its opposite edge's carrier line
    let mut dmin = f64::INFINITY;
    for i in 0..3 {
        let a = i;
        let b = (i + 1) % 3;
        let c = (i + 2) % 3;
        let ab = r[b] - r[a];
        let ac = r[c] - r[a];
        let denom = ab.norm_squared();
        if denom == 0.0 {
            return 0.0;
        }
        let l = ac.dot(&ab) / denom;
        let p = r[a] + ab * l;
        let d = (r[c] - p).norm_squared();
        if d < dmin {
            dmin = d;
        }
    }

    (dmin / lmax).sqrt()
}

/// Tetrahedron quality: circumradius over shortest edge. The regular tet
/// scores ~0.61; larger is worse. Degenerate tets score infinity.
pub fn tet_quality(p: &[Point3<f64>; 4]) -> f64 {
    let a = Matrix3::new(
        p[1].x - p[0].x,
        p[1].y - p[0].y,
        p[1].z - p[0].z,
        p[2].x - p[0].x,
        p[2].y - p[0].y,
        p[2].z - p[0].z,
        p[3].x - p[0].x,
        p[3].y - p[0].y,
        p[3].z - p[0].z,
    );
    let inv = match a.try_inverse() {
        Some(inv) => inv,
        None => return f64::INFINITY,
    };

    let b = Vector3::new(
        0.5 * (p[1].coords.norm_squared() - p[0].coords.norm_squared()),
        0.5 * (p[2].coords.norm_squared() - p[0].coords.norm_squared()),
        0.5 * (p[3].coords.norm_squared() - p[0].coords.norm_squared()),
    );

    // center and radius of the circumsphere
    let c = inv * b;
    let radius = (p[0].coords - c).norm();

    let mut l2min = f64::INFINITY;
    for e in ET_TET.iter() {
        let l2 = (p[e[0]] - p[e[1]]).norm_squared();
        if l2 < l2min {
            l2min = l2;
        }
    }
    if l2min == 0.0 {
        return f64::INFINITY;
    }

    radius / l2min.sqrt()
}

fn tet_face_normals(r: &[Point3<f64>; 4]) -> [Vector3<f64>; 4] {
    let mut fnorm = [Vector3::zeros(); 4];
    for (i, face) in FT_TET.iter().enumerate() {
        let n = (r[face[1]] - r[face[0]]).cross(&(r[face[2]] - r[face[0]]));
        let len = n.norm();
        fnorm[i] = if len > 0.0 { n / len } else { n };
    }
    fnorm
}

// face pairs sharing an edge
const TET_FACE_PAIRS: [[usize; 2]; 6] = [[0, 1], [1, 2], [0, 2], [0, 3], [1, 3], [2, 3]];

/// Smallest dihedral angle of a tet, in degrees.
pub fn tet_min_dihedral_angle(r: &[Point3<f64>; 4]) -> f64 {
    let fnorm = tet_face_normals(r);
    let mut cwmin: f64 = -1.0;
    for pair in TET_FACE_PAIRS.iter() {
        let cw = -fnorm[pair[0]].dot(&fnorm[pair[1]]);
        if cw > cwmin {
            cwmin = cw;
        }
    }
    cwmin.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Largest dihedral angle of a tet, in degrees.
pub fn tet_max_dihedral_angle(r: &[Point3<f64>; 4]) -> f64 {
    let fnorm = tet_face_normals(r);
    let mut cwmin: f64 = 1.0;
    for pair in TET_FACE_PAIRS.iter() {
        let cw = -fnorm[pair[0]].dot(&fnorm[pair[1]]);
        if cw < cwmin {
            cwmin = cw;
        }
    }
    cwmin.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ]
    }

    fn right_tet() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    /// Interpolate higher-order nodes from the parametric coordinates so
    /// any element type can be laid over a linear reference geometry.
    fn reference_element(etype: ElemType, corners: &[Point3<f64>], linear: ElemType) -> Vec<Point3<f64>> {
        let n = etype.node_count();
        let mut h = [0.0; MAX_NODES];
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let [r, s, t] = etype.iso_coord(i as i32);
            linear.shape(&mut h, r, s, t);
            let mut p = Vector3::zeros();
            for (j, c) in corners.iter().enumerate() {
                p += c.coords * h[j];
            }
            out.push(Point3::from(p));
        }
        out
    }

    #[test]
    fn test_unit_cube_volume() {
        let r = unit_cube();
        assert!((element_volume(ElemType::Hex8, &r) - 1.0).abs() < 1e-12);

        let r20 = reference_element(ElemType::Hex20, &r, ElemType::Hex8);
        assert!((element_volume(ElemType::Hex20, &r20) - 1.0).abs() < 1e-10);

        let r27 = reference_element(ElemType::Hex27, &r, ElemType::Hex8);
        assert!((element_volume(ElemType::Hex27, &r27) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_right_tet_volume() {
        let r = right_tet();
        assert!((element_volume(ElemType::Tet4, &r) - 1.0 / 6.0).abs() < 1e-12);

        for etype in [ElemType::Tet5, ElemType::Tet10, ElemType::Tet15, ElemType::Tet20] {
            let rh = reference_element(etype, &r, ElemType::Tet4);
            let v = element_volume(etype, &rh);
            assert!(
                (v - 1.0 / 6.0).abs() < 1e-9,
                "{:?} volume = {}",
                etype,
                v
            );
        }
    }

    #[test]
    fn test_wedge_and_pyramid_volume() {
        // unit-triangle wedge of height 2 (t in [-1,1]): volume 1
        let wedge = vec![
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        assert!((element_volume(ElemType::Penta6, &wedge) - 1.0).abs() < 1e-12);

        let wedge15 = reference_element(ElemType::Penta15, &wedge, ElemType::Penta6);
        assert!((element_volume(ElemType::Penta15, &wedge15) - 1.0).abs() < 1e-9);

        // 2x2 base, height 2 pyramid: volume 8/3
        let pyra = vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        assert!((element_volume(ElemType::Pyra5, &pyra) - 8.0 / 3.0).abs() < 1e-10);

        let pyra13 = reference_element(ElemType::Pyra13, &pyra, ElemType::Pyra5);
        assert!((element_volume(ElemType::Pyra13, &pyra13) - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_jacobian_detects_inversion() {
        let r = right_tet();
        assert!(min_jacobian(ElemType::Tet4, &r) > 0.0);

        // swap two nodes to invert the element
        let mut inv = r.clone();
        inv.swap(1, 2);
        assert!(min_jacobian(ElemType::Tet4, &inv) < 0.0);
    }

    #[test]
    fn test_min_jacobian_consistent_with_volume() {
        // for an affine-mapped tet, det J is constant: min == integral / (1/6) x det scale
        let r = right_tet();
        let minj = min_jacobian(ElemType::Tet4, &r);
        let vol = element_volume(ElemType::Tet4, &r);
        assert!((minj - 1.0).abs() < 1e-12);
        assert!((vol - minj / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_shell_volume_flat_plate() {
        // unit square with thickness 0.2: pseudo-volume = area x thickness
        let r = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let d = [Vector3::new(0.0, 0.0, 0.2); 4];
        assert!((shell_volume(ElemType::Quad4, &r, &d) - 0.2).abs() < 1e-12);

        let tri = [r[0], r[1], r[3]];
        let dt = [Vector3::new(0.0, 0.0, 0.2); 3];
        assert!((shell_volume(ElemType::Tri3, &tri, &dt) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_tri_quality_range() {
        // equilateral: altitude^2 / edge^2 = 3/4
        let eq = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 3f64.sqrt() / 2.0, 0.0),
        ];
        assert!((tri_quality(&eq) - (0.75f64).sqrt()).abs() < 1e-12);

        // a sliver scores much lower
        let sliver = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1e-3, 0.0),
        ];
        assert!(tri_quality(&sliver) < 0.01);
    }

    #[test]
    fn test_tet_quality_regular_is_best() {
        // regular tet inscribed in a cube
        let reg = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let q_reg = tet_quality(&reg);
        // circumradius/edge of the regular tet = sqrt(3/8)
        assert!((q_reg - (0.375f64).sqrt()).abs() < 1e-10);

        let mut flat = reg;
        flat[3] = Point3::new(0.4, 0.6, 0.01);
        assert!(tet_quality(&flat) > q_reg);
    }

    #[test]
    fn test_tet_dihedral_angles() {
        // right tet: min dihedral 54.7356 deg, max 90 deg
        let r = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let lo = tet_min_dihedral_angle(&r);
        let hi = tet_max_dihedral_angle(&r);
        assert!((hi - 90.0).abs() < 1e-9, "max dihedral = {}", hi);
        assert!((lo - 54.735610317245346).abs() < 1e-6, "min dihedral = {}", lo);
        assert!(lo <= hi);
    }

    #[test]
    fn test_scalar_gradient_linear_field() {
        // a linear field v = 2x + 3y - z has a constant gradient
        let r = right_tet();
        let v: Vec<f64> = r.iter().map(|p| 2.0 * p.x + 3.0 * p.y - p.z).collect();
        for node in [-1, 0, 1, 2, 3] {
            let g = scalar_gradient(ElemType::Tet4, &r, node, &v);
            assert!((g - Vector3::new(2.0, 3.0, -1.0)).norm() < 1e-12);
        }

        let cube = unit_cube();
        let vc: Vec<f64> = cube.iter().map(|p| 2.0 * p.x + 3.0 * p.y - p.z).collect();
        let g = scalar_gradient(ElemType::Hex8, &cube, -1, &vc);
        assert!((g - Vector3::new(2.0, 3.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_shape_gradients_sum_to_zero() {
        // partition of unity: the shape gradients cancel at any node
        let cube = unit_cube();
        for nb in [-1, 0, 5] {
            let mut sum = Vector3::zeros();
            for na in 0..8 {
                sum += shape_gradient(ElemType::Hex8, &cube, na, nb);
            }
            assert!(sum.norm() < 1e-12);
        }
    }

    #[test]
    fn test_edge_lengths() {
        let r = unit_cube();
        assert!((min_edge_length(ElemType::Hex8, &r) - 1.0).abs() < 1e-12);
        assert!((max_edge_length(ElemType::Hex8, &r) - 1.0).abs() < 1e-12);
        // shortest pairwise distance is an edge, longest is the body diagonal
        assert!((shortest_edge(&r) - 1.0).abs() < 1e-12);
        assert!((longest_edge(&r) - 3f64.sqrt()).abs() < 1e-12);
    }
}
