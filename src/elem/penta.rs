//! Shape functions for pentahedral (wedge) elements (6 and 15 nodes).
//!
//! Parametric domain: `(r, s)` area coordinates over the unit triangle and
//! `t` in `[-1, 1]` through the prism axis. Nodes 0-2 are the bottom
//! triangle, 3-5 the top.

/// Linear 6-node wedge.
pub mod penta6 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 6;
    /// Number of integration points.
    pub const GAUSS: usize = 6;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[0] = 0.5 * (1.0 - t) * (1.0 - r - s);
        h[1] = 0.5 * (1.0 - t) * r;
        h[2] = 0.5 * (1.0 - t) * s;
        h[3] = 0.5 * (1.0 + t) * (1.0 - r - s);
        h[4] = 0.5 * (1.0 + t) * r;
        h[5] = 0.5 * (1.0 + t) * s;
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[0] = -0.5 * (1.0 - t);
        hr[1] = 0.5 * (1.0 - t);
        hr[2] = 0.0;
        hr[3] = -0.5 * (1.0 + t);
        hr[4] = 0.5 * (1.0 + t);
        hr[5] = 0.0;

        hs[0] = -0.5 * (1.0 - t);
        hs[1] = 0.0;
        hs[2] = 0.5 * (1.0 - t);
        hs[3] = -0.5 * (1.0 + t);
        hs[4] = 0.0;
        hs[5] = 0.5 * (1.0 + t);

        ht[0] = -0.5 * (1.0 - r - s);
        ht[1] = -0.5 * r;
        ht[2] = -0.5 * s;
        ht[3] = 0.5 * (1.0 - r - s);
        ht[4] = 0.5 * r;
        ht[5] = 0.5 * s;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const T: f64 = 1.0 / 3.0;
        match n {
            0 => [0.0, 0.0, -1.0],
            1 => [1.0, 0.0, -1.0],
            2 => [0.0, 1.0, -1.0],
            3 => [0.0, 0.0, 1.0],
            4 => [1.0, 0.0, 1.0],
            5 => [0.0, 1.0, 1.0],
            _ => [T, T, 0.0],
        }
    }

    /// 3-point triangle rule crossed with a 2-point Gauss rule along `t`.
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

/// Quadratic 15-node wedge.
///
/// Midside ordering: 6-8 bottom edges (0-1, 1-2, 2-0), 9-11 top edges
/// (3-4, 4-5, 5-3), 12-14 vertical edges (0-3, 1-4, 2-5).
pub mod penta15 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 15;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        let l = [1.0 - r - s, r, s];
        let t2 = 1.0 - t * t;

        for i in 0..3 {
            h[i] = 0.5 * l[i] * ((2.0 * l[i] - 1.0) * (1.0 - t) - t2);
            h[i + 3] = 0.5 * l[i] * ((2.0 * l[i] - 1.0) * (1.0 + t) - t2);
            h[i + 12] = l[i] * t2;
        }
        for i in 0..3 {
            let a = l[i];
            let b = l[(i + 1) % 3];
            h[i + 6] = 2.0 * a * b * (1.0 - t);
            h[i + 9] = 2.0 * a * b * (1.0 + t);
        }
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        let l = [1.0 - r - s, r, s];
        // dL_i/dr, dL_i/ds
        let dr = [-1.0, 1.0, 0.0];
        let ds = [-1.0, 0.0, 1.0];
        let t2 = 1.0 - t * t;

        for i in 0..3 {
            let gb = 0.5 * ((4.0 * l[i] - 1.0) * (1.0 - t) - t2);
            let gt_ = 0.5 * ((4.0 * l[i] - 1.0) * (1.0 + t) - t2);
            hr[i] = dr[i] * gb;
            hs[i] = ds[i] * gb;
            ht[i] = -0.5 * l[i] * (2.0 * l[i] - 1.0) + l[i] * t;
            hr[i + 3] = dr[i] * gt_;
            hs[i + 3] = ds[i] * gt_;
            ht[i + 3] = 0.5 * l[i] * (2.0 * l[i] - 1.0) + l[i] * t;
            hr[i + 12] = dr[i] * t2;
            hs[i + 12] = ds[i] * t2;
            ht[i + 12] = -2.0 * t * l[i];
        }
        for i in 0..3 {
            let j = (i + 1) % 3;
            hr[i + 6] = 2.0 * (1.0 - t) * (dr[i] * l[j] + l[i] * dr[j]);
            hs[i + 6] = 2.0 * (1.0 - t) * (ds[i] * l[j] + l[i] * ds[j]);
            ht[i + 6] = -2.0 * l[i] * l[j];
            hr[i + 9] = 2.0 * (1.0 + t) * (dr[i] * l[j] + l[i] * dr[j]);
            hs[i + 9] = 2.0 * (1.0 + t) * (ds[i] * l[j] + l[i] * ds[j]);
            ht[i + 9] = 2.0 * l[i] * l[j];
        }
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const T: f64 = 1.0 / 3.0;
        match n {
            0..=5 => super::penta6::iso_coord(n),
            6 => [0.5, 0.0, -1.0],
            7 => [0.5, 0.5, -1.0],
            8 => [0.0, 0.5, -1.0],
            9 => [0.5, 0.0, 1.0],
            10 => [0.5, 0.5, 1.0],
            11 => [0.0, 0.5, 1.0],
            12 => [0.0, 0.0, 0.0],
            13 => [1.0, 0.0, 0.0],
            14 => [0.0, 1.0, 0.0],
            _ => [T, T, 0.0],
        }
    }

    /// 4-point (degree 3) triangle rule crossed with a 2-point Gauss rule.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        const WC: f64 = -27.0 / 96.0;
        const WO: f64 = 25.0 / 96.0;
        const A: f64 = 1.0 / 3.0;
        const B: f64 = 0.6;
        const C: f64 = 0.2;
        let d = INV_SQRT_3;
        let pts = [
            [A, A, -d, WC],
            [B, C, -d, WO],
            [C, B, -d, WO],
            [C, C, -d, WO],
            [A, A, d, WC],
            [B, C, d, WO],
            [C, B, d, WO],
            [C, C, d, WO],
        ];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = p[3];
        }
    }
}
