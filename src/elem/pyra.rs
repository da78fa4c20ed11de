//! Shape functions for pyramid elements (5 and 13 nodes).
//!
//! Parametric domain: `(r, s)` in `[-1, 1]^2` over the base quad and `t` in
//! `[-1, 1]` toward the apex (node 4).

/// 5-node pyramid.
pub mod pyra5 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 5;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[0] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t);
        h[1] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t);
        h[2] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t);
        h[3] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t);
        h[4] = 0.5 * (1.0 + t);
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[0] = -0.125 * (1.0 - s) * (1.0 - t);
        hr[1] = 0.125 * (1.0 - s) * (1.0 - t);
        hr[2] = 0.125 * (1.0 + s) * (1.0 - t);
        hr[3] = -0.125 * (1.0 + s) * (1.0 - t);
        hr[4] = 0.0;

        hs[0] = -0.125 * (1.0 - r) * (1.0 - t);
        hs[1] = -0.125 * (1.0 + r) * (1.0 - t);
        hs[2] = 0.125 * (1.0 + r) * (1.0 - t);
        hs[3] = 0.125 * (1.0 - r) * (1.0 - t);
        hs[4] = 0.0;

        ht[0] = -0.125 * (1.0 - r) * (1.0 - s);
        ht[1] = -0.125 * (1.0 + r) * (1.0 - s);
        ht[2] = -0.125 * (1.0 + r) * (1.0 + s);
        ht[3] = -0.125 * (1.0 - r) * (1.0 + s);
        ht[4] = 0.5;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0 => [-1.0, -1.0, -1.0],
            1 => [1.0, -1.0, -1.0],
            2 => [1.0, 1.0, -1.0],
            3 => [-1.0, 1.0, -1.0],
            4 => [0.0, 0.0, 1.0],
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// 2x2x2 Gauss rule.
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

/// 13-node pyramid (quadratic base ring plus apex).
pub mod pyra13 {
    /// Number of nodes.
    pub const NODES: usize = 13;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[5] = 0.25 * (1.0 - r * r) * (1.0 - s) * (1.0 - t);
        h[6] = 0.25 * (1.0 - s * s) * (1.0 + r) * (1.0 - t);
        h[7] = 0.25 * (1.0 - r * r) * (1.0 + s) * (1.0 - t);
        h[8] = 0.25 * (1.0 - s * s) * (1.0 - r) * (1.0 - t);
        h[9] = 0.25 * (1.0 - t * t) * (1.0 - r) * (1.0 - s);
        h[10] = 0.25 * (1.0 - t * t) * (1.0 + r) * (1.0 - s);
        h[11] = 0.25 * (1.0 - t * t) * (1.0 + r) * (1.0 + s);
        h[12] = 0.25 * (1.0 - t * t) * (1.0 - r) * (1.0 + s);

        h[0] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t) - 0.5 * (h[5] + h[8] + h[9]);
        h[1] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t) - 0.5 * (h[5] + h[6] + h[10]);
        h[2] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t) - 0.5 * (h[6] + h[7] + h[11]);
        h[3] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t) - 0.5 * (h[7] + h[8] + h[12]);
        h[4] = 0.5 * t * (1.0 + t);
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[0] = 0.125 + r * (0.25 + s * (-0.25 + 0.25 * t) - 0.25 * t)
            + s * s * (-0.125 + 0.125 * t)
            + s * (-0.125 + 0.125 * t) * t
            - 0.125 * t * t;
        hr[1] = -0.125 + r * (0.25 + s * (-0.25 + 0.25 * t) - 0.25 * t)
            + s * s * (0.125 - 0.125 * t)
            + s * (0.125 - 0.125 * t) * t
            + 0.125 * t * t;
        hr[2] = -0.125 + r * (0.25 + s * (0.25 - 0.25 * t) - 0.25 * t)
            + s * s * (0.125 - 0.125 * t)
            + s * (-0.125 + 0.125 * t) * t
            + 0.125 * t * t;
        hr[3] = 0.125 + r * (0.25 + s * (0.25 - 0.25 * t) - 0.25 * t)
            + s * s * (-0.125 + 0.125 * t)
            + s * (0.125 - 0.125 * t) * t
            - 0.125 * t * t;
        hr[4] = 0.0;
        hr[5] = -0.5 * r * (-1.0 + s) * (-1.0 + t);
        hr[6] = 0.25 * (-1.0 + s * s) * (-1.0 + t);
        hr[7] = 0.5 * r * (1.0 + s) * (-1.0 + t);
        hr[8] = -0.25 * (-1.0 + s * s) * (-1.0 + t);
        hr[9] = -0.25 * (-1.0 + s) * (-1.0 + t * t);
        hr[10] = 0.25 * (-1.0 + s) * (-1.0 + t * t);
        hr[11] = -0.25 * (1.0 + s) * (-1.0 + t * t);
        hr[12] = 0.25 * (1.0 + s) * (-1.0 + t * t);

        hs[0] = 0.125 + s * (0.25 - 0.25 * t) + r * r * (-0.125 + 0.125 * t) - 0.125 * t * t
            + r * (s * (-0.25 + 0.25 * t) + (-0.125 + 0.125 * t) * t);
        hs[1] = 0.125 + s * (0.25 - 0.25 * t) + r * r * (-0.125 + 0.125 * t) - 0.125 * t * t
            + r * (s * (0.25 - 0.25 * t) + (0.125 - 0.125 * t) * t);
        hs[2] = -0.125 + s * (0.25 - 0.25 * t) + r * r * (0.125 - 0.125 * t) + 0.125 * t * t
            + r * (s * (0.25 - 0.25 * t) + (-0.125 + 0.125 * t) * t);
        hs[3] = -0.125 + s * (0.25 - 0.25 * t) + r * r * (0.125 - 0.125 * t) + 0.125 * t * t
            + r * (s * (-0.25 + 0.25 * t) + (0.125 - 0.125 * t) * t);
        hs[4] = 0.0;
        hs[5] = -0.25 * (-1.0 + r * r) * (-1.0 + t);
        hs[6] = 0.5 * (1.0 + r) * s * (-1.0 + t);
        hs[7] = 0.25 * (-1.0 + r * r) * (-1.0 + t);
        hs[8] = -0.5 * (-1.0 + r) * s * (-1.0 + t);
        hs[9] = -0.25 * (-1.0 + r) * (-1.0 + t * t);
        hs[10] = 0.25 * (1.0 + r) * (-1.0 + t * t);
        hs[11] = -0.25 * (1.0 + r) * (-1.0 + t * t);
        hs[12] = 0.25 * (-1.0 + r) * (-1.0 + t * t);

        ht[0] = -0.125 * (-1.0 + r) * (-1.0 + s)
            + 0.125 * (-1.0 + r * r) * (-1.0 + s)
            + 0.125 * (-1.0 + r) * (-1.0 + s * s)
            + 0.25 * (-1.0 + r) * (-1.0 + s) * t;
        ht[1] = 0.125 * (1.0 + r) * (-1.0 + s) + 0.125 * (-1.0 + r * r) * (-1.0 + s)
            - 0.125 * (1.0 + r) * (-1.0 + s * s)
            - 0.25 * (1.0 + r) * (-1.0 + s) * t;
        ht[2] = -0.125 * (1.0 + r) * (1.0 + s)
            - 0.125 * (-1.0 + r * r) * (1.0 + s)
            - 0.125 * (1.0 + r) * (-1.0 + s * s)
            + 0.25 * (1.0 + r) * (1.0 + s) * t;
        ht[3] = 0.125 * (-1.0 + r) * (1.0 + s) - 0.125 * (-1.0 + r * r) * (1.0 + s)
            + 0.125 * (-1.0 + r) * (-1.0 + s * s)
            - 0.25 * (-1.0 + r) * (1.0 + s) * t;
        ht[4] = 0.5 + t;
        ht[5] = -0.25 * (-1.0 + r * r) * (-1.0 + s);
        ht[6] = 0.25 * (1.0 + r) * (-1.0 + s * s);
        ht[7] = 0.25 * (-1.0 + r * r) * (1.0 + s);
        ht[8] = -0.25 * (-1.0 + r) * (-1.0 + s * s);
        ht[9] = -0.5 * (-1.0 + r) * (-1.0 + s) * t;
        ht[10] = 0.5 * (1.0 + r) * (-1.0 + s) * t;
        ht[11] = -0.5 * (1.0 + r) * (1.0 + s) * t;
        ht[12] = 0.5 * (-1.0 + r) * (1.0 + s) * t;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0..=4 => super::pyra5::iso_coord(n),
            5 => [0.0, -1.0, -1.0],
            6 => [1.0, 0.0, -1.0],
            7 => [0.0, 1.0, -1.0],
            8 => [-1.0, 0.0, -1.0],
            9 => [-1.0, -1.0, 0.0],
            10 => [1.0, -1.0, 0.0],
            11 => [1.0, 1.0, 0.0],
            12 => [-1.0, 1.0, 0.0],
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// 2x2x2 Gauss rule (shared with the 5-node pyramid).
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        super::pyra5::gauss(gr, gs, gt, gw);
    }
}
