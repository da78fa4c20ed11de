//! Finite-element kernels and per-element quality metrics.
//!
//! Each supported element topology gets a kernel module with four entry
//! points — `shape`, `shape_deriv`, `iso_coord` and `gauss` — that write
//! interpolation weights, parametric derivatives, nodal parametric
//! coordinates and a fixed quadrature rule into caller-supplied arrays.
//! [`ElemType`] is the single closed dispatch point over those kernels:
//! classify an element once, then every volume, Jacobian and gradient
//! evaluation goes through the same four functions.
//!
//! The kernels are purely functional: no caches, no I/O, no first-call
//! initialization. Quadrature tables are literal constants.

pub mod curvature;
pub mod hex;
pub mod metrics;
pub mod penta;
pub mod pyra;
pub mod quad;
pub mod tet;
pub mod tri;

pub use curvature::{
    mesh_curvature, mesh_curvature_sequential, vertex_curvature, CurvatureMeasure,
    CurvatureOptions,
};
pub use metrics::{
    element_volume, longest_edge, max_edge_length, min_edge_length, min_jacobian, scalar_gradient,
    shape_gradient, shell_min_jacobian, shell_volume, shortest_edge, tet_max_dihedral_angle,
    tet_min_dihedral_angle, tet_quality, tri_quality, triangle_area,
};

/// 1 / sqrt(3), the 2-point Gauss-Legendre abscissa.
pub(crate) const INV_SQRT_3: f64 = 0.577_350_269_189_625_8;

/// Maximum node count over all supported element types (27-node hex).
pub const MAX_NODES: usize = 27;

/// Maximum quadrature-point count over all supported element types.
pub const MAX_GAUSS: usize = 27;

/// The closed set of supported element topologies.
///
/// Solid elements integrate over a 3D parametric domain; `Tri3` and `Quad4`
/// are shell elements whose third quadrature coordinate runs through the
/// thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemType {
    /// Linear tetrahedron.
    Tet4,
    /// Tetrahedron with centroid bubble.
    Tet5,
    /// Quadratic tetrahedron.
    Tet10,
    /// Quadratic tetrahedron with face/centroid bubbles.
    Tet15,
    /// Cubic tetrahedron.
    Tet20,
    /// Trilinear hexahedron.
    Hex8,
    /// Serendipity hexahedron.
    Hex20,
    /// Triquadratic hexahedron.
    Hex27,
    /// Linear wedge.
    Penta6,
    /// Quadratic wedge.
    Penta15,
    /// Linear pyramid.
    Pyra5,
    /// Quadratic pyramid.
    Pyra13,
    /// Triangular shell.
    Tri3,
    /// Quadrilateral shell.
    Quad4,
}

impl ElemType {
    /// Number of nodes of this element type.
    pub fn node_count(self) -> usize {
        match self {
            ElemType::Tet4 => tet::tet4::NODES,
            ElemType::Tet5 => tet::tet5::NODES,
            ElemType::Tet10 => tet::tet10::NODES,
            ElemType::Tet15 => tet::tet15::NODES,
            ElemType::Tet20 => tet::tet20::NODES,
            ElemType::Hex8 => hex::hex8::NODES,
            ElemType::Hex20 => hex::hex20::NODES,
            ElemType::Hex27 => hex::hex27::NODES,
            ElemType::Penta6 => penta::penta6::NODES,
            ElemType::Penta15 => penta::penta15::NODES,
            ElemType::Pyra5 => pyra::pyra5::NODES,
            ElemType::Pyra13 => pyra::pyra13::NODES,
            ElemType::Tri3 => tri::tri3::NODES,
            ElemType::Quad4 => quad::quad4::NODES,
        }
    }

    /// Number of quadrature points of this element's rule.
    pub fn gauss_count(self) -> usize {
        match self {
            ElemType::Tet4 => tet::tet4::GAUSS,
            ElemType::Tet5 => tet::tet5::GAUSS,
            ElemType::Tet10 => tet::tet10::GAUSS,
            ElemType::Tet15 => tet::tet15::GAUSS,
            ElemType::Tet20 => tet::tet20::GAUSS,
            ElemType::Hex8 => hex::hex8::GAUSS,
            ElemType::Hex20 => hex::hex20::GAUSS,
            ElemType::Hex27 => hex::hex27::GAUSS,
            ElemType::Penta6 => penta::penta6::GAUSS,
            ElemType::Penta15 => penta::penta15::GAUSS,
            ElemType::Pyra5 => pyra::pyra5::GAUSS,
            ElemType::Pyra13 => pyra::pyra13::GAUSS,
            ElemType::Tri3 => tri::tri3::GAUSS,
            ElemType::Quad4 => quad::quad4::GAUSS,
        }
    }

    /// Whether this is a volumetric element.
    pub fn is_solid(self) -> bool {
        !self.is_shell()
    }

    /// Whether this is a shell element.
    pub fn is_shell(self) -> bool {
        matches!(self, ElemType::Tri3 | ElemType::Quad4)
    }

    /// Evaluate the shape functions at parametric point `(r, s, t)`.
    ///
    /// Shell elements ignore `t`.
    pub fn shape(self, h: &mut [f64], r: f64, s: f64, t: f64) {
        match self {
            ElemType::Tet4 => tet::tet4::shape(h, r, s, t),
            ElemType::Tet5 => tet::tet5::shape(h, r, s, t),
            ElemType::Tet10 => tet::tet10::shape(h, r, s, t),
            ElemType::Tet15 => tet::tet15::shape(h, r, s, t),
            ElemType::Tet20 => tet::tet20::shape(h, r, s, t),
            ElemType::Hex8 => hex::hex8::shape(h, r, s, t),
            ElemType::Hex20 => hex::hex20::shape(h, r, s, t),
            ElemType::Hex27 => hex::hex27::shape(h, r, s, t),
            ElemType::Penta6 => penta::penta6::shape(h, r, s, t),
            ElemType::Penta15 => penta::penta15::shape(h, r, s, t),
            ElemType::Pyra5 => pyra::pyra5::shape(h, r, s, t),
            ElemType::Pyra13 => pyra::pyra13::shape(h, r, s, t),
            ElemType::Tri3 => tri::tri3::shape(h, r, s),
            ElemType::Quad4 => quad::quad4::shape(h, r, s),
        }
    }

    /// Evaluate the parametric shape-function derivatives at `(r, s, t)`.
    ///
    /// Shell elements have no `t`-derivative; their `ht` slice is zeroed.
    pub fn shape_deriv(self, hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        match self {
            ElemType::Tet4 => tet::tet4::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Tet5 => tet::tet5::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Tet10 => tet::tet10::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Tet15 => tet::tet15::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Tet20 => tet::tet20::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Hex8 => hex::hex8::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Hex20 => hex::hex20::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Hex27 => hex::hex27::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Penta6 => penta::penta6::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Penta15 => penta::penta15::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Pyra5 => pyra::pyra5::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Pyra13 => pyra::pyra13::shape_deriv(hr, hs, ht, r, s, t),
            ElemType::Tri3 => {
                tri::tri3::shape_deriv(hr, hs, r, s);
                ht[..self.node_count()].fill(0.0);
            }
            ElemType::Quad4 => {
                quad::quad4::shape_deriv(hr, hs, r, s);
                ht[..self.node_count()].fill(0.0);
            }
        }
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(self, n: i32) -> [f64; 3] {
        match self {
            ElemType::Tet4 => tet::tet4::iso_coord(n),
            ElemType::Tet5 => tet::tet5::iso_coord(n),
            ElemType::Tet10 => tet::tet10::iso_coord(n),
            ElemType::Tet15 => tet::tet15::iso_coord(n),
            ElemType::Tet20 => tet::tet20::iso_coord(n),
            ElemType::Hex8 => hex::hex8::iso_coord(n),
            ElemType::Hex20 => hex::hex20::iso_coord(n),
            ElemType::Hex27 => hex::hex27::iso_coord(n),
            ElemType::Penta6 => penta::penta6::iso_coord(n),
            ElemType::Penta15 => penta::penta15::iso_coord(n),
            ElemType::Pyra5 => pyra::pyra5::iso_coord(n),
            ElemType::Pyra13 => pyra::pyra13::iso_coord(n),
            ElemType::Tri3 => tri::tri3::iso_coord(n),
            ElemType::Quad4 => quad::quad4::iso_coord(n),
        }
    }

    /// Fill the quadrature rule: point coordinates and weights.
    pub fn gauss(self, gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        match self {
            ElemType::Tet4 => tet::tet4::gauss(gr, gs, gt, gw),
            ElemType::Tet5 => tet::tet5::gauss(gr, gs, gt, gw),
            ElemType::Tet10 => tet::tet10::gauss(gr, gs, gt, gw),
            ElemType::Tet15 => tet::tet15::gauss(gr, gs, gt, gw),
            ElemType::Tet20 => tet::tet20::gauss(gr, gs, gt, gw),
            ElemType::Hex8 => hex::hex8::gauss(gr, gs, gt, gw),
            ElemType::Hex20 => hex::hex20::gauss(gr, gs, gt, gw),
            ElemType::Hex27 => hex::hex27::gauss(gr, gs, gt, gw),
            ElemType::Penta6 => penta::penta6::gauss(gr, gs, gt, gw),
            ElemType::Penta15 => penta::penta15::gauss(gr, gs, gt, gw),
            ElemType::Pyra5 => pyra::pyra5::gauss(gr, gs, gt, gw),
            ElemType::Pyra13 => pyra::pyra13::gauss(gr, gs, gt, gw),
            ElemType::Tri3 => tri::tri3::gauss(gr, gs, gt, gw),
            ElemType::Quad4 => quad::quad4::gauss(gr, gs, gt, gw),
        }
    }

    /// All supported element types, for exhaustive property tests.
    pub fn all() -> &'static [ElemType] {
        &[
            ElemType::Tet4,
            ElemType::Tet5,
            ElemType::Tet10,
            ElemType::Tet15,
            ElemType::Tet20,
            ElemType::Hex8,
            ElemType::Hex20,
            ElemType::Hex27,
            ElemType::Penta6,
            ElemType::Penta15,
            ElemType::Pyra5,
            ElemType::Pyra13,
            ElemType::Tri3,
            ElemType::Quad4,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A parametric point strictly inside the canonical domain of `etype`.
    fn interior_point(etype: ElemType) -> [f64; 3] {
        match etype {
            ElemType::Tet4 | ElemType::Tet5 | ElemType::Tet10 | ElemType::Tet15
            | ElemType::Tet20 => [0.21, 0.13, 0.34],
            ElemType::Penta6 | ElemType::Penta15 => [0.21, 0.13, 0.42],
            ElemType::Tri3 => [0.21, 0.13, 0.0],
            _ => [0.31, -0.22, 0.47],
        }
    }

    #[test]
    fn test_partition_of_unity() {
        for &etype in ElemType::all() {
            let [r, s, t] = interior_point(etype);
            let mut h = [0.0; MAX_NODES];
            etype.shape(&mut h, r, s, t);
            let sum: f64 = h[..etype.node_count()].iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "{:?}: shape functions sum to {}",
                etype,
                sum
            );
        }
    }

    #[test]
    fn test_derivative_sums_to_zero() {
        for &etype in ElemType::all() {
            let [r, s, t] = interior_point(etype);
            let mut hr = [0.0; MAX_NODES];
            let mut hs = [0.0; MAX_NODES];
            let mut ht = [0.0; MAX_NODES];
            etype.shape_deriv(&mut hr, &mut hs, &mut ht, r, s, t);
            let n = etype.node_count();
            for (name, d) in [("d/dr", &hr), ("d/ds", &hs), ("d/dt", &ht)] {
                let sum: f64 = d[..n].iter().sum();
                assert!(
                    sum.abs() < 1e-11,
                    "{:?}: {} sums to {}",
                    etype,
                    name,
                    sum
                );
            }
        }
    }

    #[test]
    fn test_iso_coord_round_trip() {
        for &etype in ElemType::all() {
            let n = etype.node_count();
            for i in 0..n {
                let [r, s, t] = etype.iso_coord(i as i32);
                let mut h = [0.0; MAX_NODES];
                etype.shape(&mut h, r, s, t);
                for j in 0..n {
                    let expect = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (h[j] - expect).abs() < 1e-10,
                        "{:?}: H[{}] at node {} is {}",
                        etype,
                        j,
                        i,
                        h[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_shape_deriv_matches_finite_difference() {
        let eps = 1e-6;
        for &etype in ElemType::all() {
            let [r, s, t] = interior_point(etype);
            let n = etype.node_count();
            let mut hr = [0.0; MAX_NODES];
            let mut hs = [0.0; MAX_NODES];
            let mut ht = [0.0; MAX_NODES];
            etype.shape_deriv(&mut hr, &mut hs, &mut ht, r, s, t);

            let mut hp = [0.0; MAX_NODES];
            let mut hm = [0.0; MAX_NODES];
            etype.shape(&mut hp, r + eps, s, t);
            etype.shape(&mut hm, r - eps, s, t);
            for j in 0..n {
                let fd = (hp[j] - hm[j]) / (2.0 * eps);
                assert!(
                    (fd - hr[j]).abs() < 1e-5,
                    "{:?}: dH[{}]/dr = {} but finite difference = {}",
                    etype,
                    j,
                    hr[j],
                    fd
                );
            }

            etype.shape(&mut hp, r, s + eps, t);
            etype.shape(&mut hm, r, s - eps, t);
            for j in 0..n {
                let fd = (hp[j] - hm[j]) / (2.0 * eps);
                assert!((fd - hs[j]).abs() < 1e-5, "{:?}: dH[{}]/ds mismatch", etype, j);
            }

            if etype.is_solid() {
                etype.shape(&mut hp, r, s, t + eps);
                etype.shape(&mut hm, r, s, t - eps);
                for j in 0..n {
                    let fd = (hp[j] - hm[j]) / (2.0 * eps);
                    assert!((fd - ht[j]).abs() < 1e-5, "{:?}: dH[{}]/dt mismatch", etype, j);
                }
            }
        }
    }

    #[test]
    fn test_gauss_weights_are_positive_volume_measures() {
        // total weight must equal the parametric volume of the canonical
        // domain: 1/6 for tets, 8 for hexes/pyramids/quads, 1 for wedges
        // and 1/2 x 2 for the tri shell
        for &etype in ElemType::all() {
            let mut gr = [0.0; MAX_GAUSS];
            let mut gs = [0.0; MAX_GAUSS];
            let mut gt = [0.0; MAX_GAUSS];
            let mut gw = [0.0; MAX_GAUSS];
            etype.gauss(&mut gr, &mut gs, &mut gt, &mut gw);
            let total: f64 = gw[..etype.gauss_count()].iter().sum();
            let expect = match etype {
                ElemType::Tet4 | ElemType::Tet5 | ElemType::Tet10 | ElemType::Tet15
                | ElemType::Tet20 => 1.0 / 6.0,
                ElemType::Hex8 | ElemType::Hex20 | ElemType::Hex27 | ElemType::Pyra5
                | ElemType::Pyra13 | ElemType::Quad4 => 8.0,
                ElemType::Penta6 | ElemType::Penta15 | ElemType::Tri3 => 1.0,
            };
            assert!(
                (total - expect).abs() < 1e-7,
                "{:?}: weights sum to {}, expected {}",
                etype,
                total,
                expect
            );
        }
    }
}
