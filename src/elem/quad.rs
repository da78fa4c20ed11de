//! Shape functions for the 4-node quadrilateral shell element.
//!
//! In-plane coordinates `(r, s)` in `[-1, 1]^2`; the third quadrature
//! coordinate runs through the shell thickness in `[-1, 1]` and is carried
//! in the `gt` slot of the rule.

/// Bilinear 4-node quad.
pub mod quad4 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 4;
    /// Number of integration points (2x2 in-plane x 2 through thickness).
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64) {
        h[0] = 0.25 * (1.0 - r) * (1.0 - s);
        h[1] = 0.25 * (1.0 + r) * (1.0 - s);
        h[2] = 0.25 * (1.0 + r) * (1.0 + s);
        h[3] = 0.25 * (1.0 - r) * (1.0 + s);
    }

    /// In-plane shape-function derivatives at `(r, s)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], r: f64, s: f64) {
        hr[0] = -0.25 * (1.0 - s);
        hr[1] = 0.25 * (1.0 - s);
        hr[2] = 0.25 * (1.0 + s);
        hr[3] = -0.25 * (1.0 + s);

        hs[0] = -0.25 * (1.0 - r);
        hs[1] = -0.25 * (1.0 + r);
        hs[2] = 0.25 * (1.0 + r);
        hs[3] = 0.25 * (1.0 - r);
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0 => [-1.0, -1.0, 0.0],
            1 => [1.0, -1.0, 0.0],
            2 => [1.0, 1.0, 0.0],
            3 => [-1.0, 1.0, 0.0],
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// 2x2 in-plane Gauss rule crossed with a 2-point rule through thickness.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        let a = INV_SQRT_3;
        let pts = [
            [-a, -a, -a],
            [a, -a, -a],
            [a, a, -a],
            [-a, a, -a],
            [-a, -a, a],
            [a, -a, a],
            [a, a, a],
            [-a, a, a],
        ];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = 1.0;
        }
    }
}
