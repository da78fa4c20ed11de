//! Shape functions for the 3-node triangular shell element.
//!
//! In-plane coordinates `(r, s)` are area coordinates over the unit
//! triangle; the third quadrature coordinate runs through the shell
//! thickness in `[-1, 1]` and is carried in the `gt` slot of the rule.

/// Linear 3-node triangle.
pub mod tri3 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 3;
    /// Number of integration points (3 in-plane x 2 through thickness).
    pub const GAUSS: usize = 6;

    /// Shape functions at `(r, s)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64) {
        h[0] = 1.0 - r - s;
        h[1] = r;
        h[2] = s;
    }

    /// In-plane shape-function derivatives (constant).
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], _r: f64, _s: f64) {
        hr[0] = -1.0;
        hs[0] = -1.0;
        hr[1] = 1.0;
        hs[1] = 0.0;
        hr[2] = 0.0;
        hs[2] = 1.0;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const T: f64 = 1.0 / 3.0;
        match n {
            0 => [0.0, 0.0, 0.0],
            1 => [1.0, 0.0, 0.0],
            2 => [0.0, 1.0, 0.0],
            _ => [T, T, 0.0],
        }
    }

    /// 3-point triangle rule crossed with a 2-point rule through thickness.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        const A: f64 = 1.0 / 6.0;
        const B: f64 = 2.0 / 3.0;
        const W: f64 = 1.0 / 6.0;
        let c = INV_SQRT_3;
        let pts = [
            [A, A, -c],
            [B, A, -c],
            [A, B, -c],
            [A, A, c],
            [B, A, c],
            [A, B, c],
        ];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = W;
        }
    }
}
