//! Shape functions for hexahedral elements (8, 20 and 27 nodes).
//!
//! Parametric domain: `(r, s, t)` in `[-1, 1]^3`, corner nodes 0-7 in the
//! usual counter-clockwise bottom/top order.

/// Trilinear 8-node hexahedron.
pub mod hex8 {
    use crate::elem::INV_SQRT_3;

    /// Number of nodes.
    pub const NODES: usize = 8;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[0] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t);
        h[1] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t);
        h[2] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t);
        h[3] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t);
        h[4] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 + t);
        h[5] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 + t);
        h[6] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 + t);
        h[7] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 + t);
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[0] = -0.125 * (1.0 - s) * (1.0 - t);
        hr[1] = 0.125 * (1.0 - s) * (1.0 - t);
        hr[2] = 0.125 * (1.0 + s) * (1.0 - t);
        hr[3] = -0.125 * (1.0 + s) * (1.0 - t);
        hr[4] = -0.125 * (1.0 - s) * (1.0 + t);
        hr[5] = 0.125 * (1.0 - s) * (1.0 + t);
        hr[6] = 0.125 * (1.0 + s) * (1.0 + t);
        hr[7] = -0.125 * (1.0 + s) * (1.0 + t);

        hs[0] = -0.125 * (1.0 - r) * (1.0 - t);
        hs[1] = -0.125 * (1.0 + r) * (1.0 - t);
        hs[2] = 0.125 * (1.0 + r) * (1.0 - t);
        hs[3] = 0.125 * (1.0 - r) * (1.0 - t);
        hs[4] = -0.125 * (1.0 - r) * (1.0 + t);
        hs[5] = -0.125 * (1.0 + r) * (1.0 + t);
        hs[6] = 0.125 * (1.0 + r) * (1.0 + t);
        hs[7] = 0.125 * (1.0 - r) * (1.0 + t);

        ht[0] = -0.125 * (1.0 - r) * (1.0 - s);
        ht[1] = -0.125 * (1.0 + r) * (1.0 - s);
        ht[2] = -0.125 * (1.0 + r) * (1.0 + s);
        ht[3] = -0.125 * (1.0 - r) * (1.0 + s);
        ht[4] = 0.125 * (1.0 - r) * (1.0 - s);
        ht[5] = 0.125 * (1.0 + r) * (1.0 - s);
        ht[6] = 0.125 * (1.0 + r) * (1.0 + s);
        ht[7] = 0.125 * (1.0 - r) * (1.0 + s);
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0 => [-1.0, -1.0, -1.0],
            1 => [1.0, -1.0, -1.0],
            2 => [1.0, 1.0, -1.0],
            3 => [-1.0, 1.0, -1.0],
            4 => [-1.0, -1.0, 1.0],
            5 => [1.0, -1.0, 1.0],
            6 => [1.0, 1.0, 1.0],
            7 => [-1.0, 1.0, 1.0],
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

/// Quadratic serendipity 20-node hexahedron.
pub mod hex20 {
    /// Number of nodes.
    pub const NODES: usize = 20;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[8] = 0.25 * (1.0 - r * r) * (1.0 - s) * (1.0 - t);
        h[9] = 0.25 * (1.0 - s * s) * (1.0 + r) * (1.0 - t);
        h[10] = 0.25 * (1.0 - r * r) * (1.0 + s) * (1.0 - t);
        h[11] = 0.25 * (1.0 - s * s) * (1.0 - r) * (1.0 - t);
        h[12] = 0.25 * (1.0 - r * r) * (1.0 - s) * (1.0 + t);
        h[13] = 0.25 * (1.0 - s * s) * (1.0 + r) * (1.0 + t);
        h[14] = 0.25 * (1.0 - r * r) * (1.0 + s) * (1.0 + t);
        h[15] = 0.25 * (1.0 - s * s) * (1.0 - r) * (1.0 + t);
        h[16] = 0.25 * (1.0 - t * t) * (1.0 - r) * (1.0 - s);
        h[17] = 0.25 * (1.0 - t * t) * (1.0 + r) * (1.0 - s);
        h[18] = 0.25 * (1.0 - t * t) * (1.0 + r) * (1.0 + s);
        h[19] = 0.25 * (1.0 - t * t) * (1.0 - r) * (1.0 + s);

        h[0] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t) - 0.5 * (h[8] + h[11] + h[16]);
        h[1] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t) - 0.5 * (h[8] + h[9] + h[17]);
        h[2] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t) - 0.5 * (h[9] + h[10] + h[18]);
        h[3] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t) - 0.5 * (h[10] + h[11] + h[19]);
        h[4] = 0.125 * (1.0 - r) * (1.0 - s) * (1.0 + t) - 0.5 * (h[12] + h[15] + h[16]);
        h[5] = 0.125 * (1.0 + r) * (1.0 - s) * (1.0 + t) - 0.5 * (h[12] + h[13] + h[17]);
        h[6] = 0.125 * (1.0 + r) * (1.0 + s) * (1.0 + t) - 0.5 * (h[13] + h[14] + h[18]);
        h[7] = 0.125 * (1.0 - r) * (1.0 + s) * (1.0 + t) - 0.5 * (h[14] + h[15] + h[19]);
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[8] = -0.5 * r * (1.0 - s) * (1.0 - t);
        hr[9] = 0.25 * (1.0 - s * s) * (1.0 - t);
        hr[10] = -0.5 * r * (1.0 + s) * (1.0 - t);
        hr[11] = -0.25 * (1.0 - s * s) * (1.0 - t);
        hr[12] = -0.5 * r * (1.0 - s) * (1.0 + t);
        hr[13] = 0.25 * (1.0 - s * s) * (1.0 + t);
        hr[14] = -0.5 * r * (1.0 + s) * (1.0 + t);
        hr[15] = -0.25 * (1.0 - s * s) * (1.0 + t);
        hr[16] = -0.25 * (1.0 - t * t) * (1.0 - s);
        hr[17] = 0.25 * (1.0 - t * t) * (1.0 - s);
        hr[18] = 0.25 * (1.0 - t * t) * (1.0 + s);
        hr[19] = -0.25 * (1.0 - t * t) * (1.0 + s);

        hr[0] = -0.125 * (1.0 - s) * (1.0 - t) - 0.5 * (hr[8] + hr[11] + hr[16]);
        hr[1] = 0.125 * (1.0 - s) * (1.0 - t) - 0.5 * (hr[8] + hr[9] + hr[17]);
        hr[2] = 0.125 * (1.0 + s) * (1.0 - t) - 0.5 * (hr[9] + hr[10] + hr[18]);
        hr[3] = -0.125 * (1.0 + s) * (1.0 - t) - 0.5 * (hr[10] + hr[11] + hr[19]);
        hr[4] = -0.125 * (1.0 - s) * (1.0 + t) - 0.5 * (hr[12] + hr[15] + hr[16]);
        hr[5] = 0.125 * (1.0 - s) * (1.0 + t) - 0.5 * (hr[12] + hr[13] + hr[17]);
        hr[6] = 0.125 * (1.0 + s) * (1.0 + t) - 0.5 * (hr[13] + hr[14] + hr[18]);
        hr[7] = -0.125 * (1.0 + s) * (1.0 + t) - 0.5 * (hr[14] + hr[15] + hr[19]);

        hs[8] = -0.25 * (1.0 - r * r) * (1.0 - t);
        hs[9] = -0.5 * s * (1.0 + r) * (1.0 - t);
        hs[10] = 0.25 * (1.0 - r * r) * (1.0 - t);
        hs[11] = -0.5 * s * (1.0 - r) * (1.0 - t);
        hs[12] = -0.25 * (1.0 - r * r) * (1.0 + t);
        hs[13] = -0.5 * s * (1.0 + r) * (1.0 + t);
        hs[14] = 0.25 * (1.0 - r * r) * (1.0 + t);
        hs[15] = -0.5 * s * (1.0 - r) * (1.0 + t);
        hs[16] = -0.25 * (1.0 - t * t) * (1.0 - r);
        hs[17] = -0.25 * (1.0 - t * t) * (1.0 + r);
        hs[18] = 0.25 * (1.0 - t * t) * (1.0 + r);
        hs[19] = 0.25 * (1.0 - t * t) * (1.0 - r);

        hs[0] = -0.125 * (1.0 - r) * (1.0 - t) - 0.5 * (hs[8] + hs[11] + hs[16]);
        hs[1] = -0.125 * (1.0 + r) * (1.0 - t) - 0.5 * (hs[8] + hs[9] + hs[17]);
        hs[2] = 0.125 * (1.0 + r) * (1.0 - t) - 0.5 * (hs[9] + hs[10] + hs[18]);
        hs[3] = 0.125 * (1.0 - r) * (1.0 - t) - 0.5 * (hs[10] + hs[11] + hs[19]);
        hs[4] = -0.125 * (1.0 - r) * (1.0 + t) - 0.5 * (hs[12] + hs[15] + hs[16]);
        hs[5] = -0.125 * (1.0 + r) * (1.0 + t) - 0.5 * (hs[12] + hs[13] + hs[17]);
        hs[6] = 0.125 * (1.0 + r) * (1.0 + t) - 0.5 * (hs[13] + hs[14] + hs[18]);
        hs[7] = 0.125 * (1.0 - r) * (1.0 + t) - 0.5 * (hs[14] + hs[15] + hs[19]);

        ht[8] = -0.25 * (1.0 - r * r) * (1.0 - s);
        ht[9] = -0.25 * (1.0 - s * s) * (1.0 + r);
        ht[10] = -0.25 * (1.0 - r * r) * (1.0 + s);
        ht[11] = -0.25 * (1.0 - s * s) * (1.0 - r);
        ht[12] = 0.25 * (1.0 - r * r) * (1.0 - s);
        ht[13] = 0.25 * (1.0 - s * s) * (1.0 + r);
        ht[14] = 0.25 * (1.0 - r * r) * (1.0 + s);
        ht[15] = 0.25 * (1.0 - s * s) * (1.0 - r);
        ht[16] = -0.5 * t * (1.0 - r) * (1.0 - s);
        ht[17] = -0.5 * t * (1.0 + r) * (1.0 - s);
        ht[18] = -0.5 * t * (1.0 + r) * (1.0 + s);
        ht[19] = -0.5 * t * (1.0 - r) * (1.0 + s);

        ht[0] = -0.125 * (1.0 - r) * (1.0 - s) - 0.5 * (ht[8] + ht[11] + ht[16]);
        ht[1] = -0.125 * (1.0 + r) * (1.0 - s) - 0.5 * (ht[8] + ht[9] + ht[17]);
        ht[2] = -0.125 * (1.0 + r) * (1.0 + s) - 0.5 * (ht[9] + ht[10] + ht[18]);
        ht[3] = -0.125 * (1.0 - r) * (1.0 + s) - 0.5 * (ht[10] + ht[11] + ht[19]);
        ht[4] = 0.125 * (1.0 - r) * (1.0 - s) - 0.5 * (ht[12] + ht[15] + ht[16]);
        ht[5] = 0.125 * (1.0 + r) * (1.0 - s) - 0.5 * (ht[12] + ht[13] + ht[17]);
        ht[6] = 0.125 * (1.0 + r) * (1.0 + s) - 0.5 * (ht[13] + ht[14] + ht[18]);
        ht[7] = 0.125 * (1.0 - r) * (1.0 + s) - 0.5 * (ht[14] + ht[15] + ht[19]);
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0..=7 => super::hex8::iso_coord(n),
            8 => [0.0, -1.0, -1.0],
            9 => [1.0, 0.0, -1.0],
            10 => [0.0, 1.0, -1.0],
            11 => [-1.0, 0.0, -1.0],
            12 => [0.0, -1.0, 1.0],
            13 => [1.0, 0.0, 1.0],
            14 => [0.0, 1.0, 1.0],
            15 => [-1.0, 0.0, 1.0],
            16 => [-1.0, -1.0, 0.0],
            17 => [1.0, -1.0, 0.0],
            18 => [1.0, 1.0, 0.0],
            19 => [-1.0, 1.0, 0.0],
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// 2x2x2 Gauss rule (shared with the 8-node hex).
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        super::hex8::gauss(gr, gs, gt, gw);
    }
}

/// Triquadratic 27-node hexahedron.
pub mod hex27 {
    /// Number of nodes.
    pub const NODES: usize = 27;
    /// Number of integration points.
    pub const GAUSS: usize = 27;

    // tensor-product ordering of the 27 nodes over the 1D factors
    // { 0.5 x (x - 1), 0.5 x (x + 1), 1 - x^2 }
    const LUT: [[usize; 3]; 27] = [
        [0, 0, 0],
        [1, 0, 0],
        [1, 1, 0],
        [0, 1, 0],
        [0, 0, 1],
        [1, 0, 1],
        [1, 1, 1],
        [0, 1, 1],
        [2, 0, 0],
        [1, 2, 0],
        [2, 1, 0],
        [0, 2, 0],
        [2, 0, 1],
        [1, 2, 1],
        [2, 1, 1],
        [0, 2, 1],
        [0, 0, 2],
        [1, 0, 2],
        [1, 1, 2],
        [0, 1, 2],
        [2, 0, 2],
        [1, 2, 2],
        [2, 1, 2],
        [0, 2, 2],
        [2, 2, 0],
        [2, 2, 1],
        [2, 2, 2],
    ];

    fn factors(x: f64) -> ([f64; 3], [f64; 3]) {
        (
            [0.5 * x * (x - 1.0), 0.5 * x * (x + 1.0), 1.0 - x * x],
            [x - 0.5, x + 0.5, -2.0 * x],
        )
    }

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        let (rf, _) = factors(r);
        let (sf, _) = factors(s);
        let (tf, _) = factors(t);
        for (i, idx) in LUT.iter().enumerate() {
            h[i] = rf[idx[0]] * sf[idx[1]] * tf[idx[2]];
        }
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        let (rf, drf) = factors(r);
        let (sf, dsf) = factors(s);
        let (tf, dtf) = factors(t);
        for (i, idx) in LUT.iter().enumerate() {
            hr[i] = drf[idx[0]] * sf[idx[1]] * tf[idx[2]];
            hs[i] = rf[idx[0]] * dsf[idx[1]] * tf[idx[2]];
            ht[i] = rf[idx[0]] * sf[idx[1]] * dtf[idx[2]];
        }
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const C: [f64; 3] = [-1.0, 1.0, 0.0];
        match n {
            0..=26 => {
                let idx = LUT[n as usize];
                [C[idx[0]], C[idx[1]], C[idx[2]]]
            }
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// 3x3x3 Gauss-Legendre rule.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        // sqrt(3/5) and the 1D weights 5/9, 8/9
        const A: f64 = 0.774596669241483;
        const P: [f64; 3] = [-A, 0.0, A];
        const W: [f64; 3] = [5.0 / 9.0, 8.0 / 9.0, 5.0 / 9.0];
        let mut n = 0;
        for k in 0..3 {
            for j in 0..3 {
                for i in 0..3 {
                    gr[n] = P[i];
                    gs[n] = P[j];
                    gt[n] = P[k];
                    gw[n] = W[i] * W[j] * W[k];
                    n += 1;
                }
            }
        }
    }
}
