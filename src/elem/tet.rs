//! Shape functions for tetrahedral elements (4, 5, 10, 15 and 20 nodes).
//!
//! Parametric domain: `r, s, t >= 0`, `r + s + t <= 1` (the unit right
//! tetrahedron), with the first barycentric coordinate `1 - r - s - t`
//! attached to node 0.

/// Linear 4-node tetrahedron.
pub mod tet4 {
    /// Number of nodes.
    pub const NODES: usize = 4;
    /// Number of integration points.
    pub const GAUSS: usize = 4;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[0] = 1.0 - r - s - t;
        h[1] = r;
        h[2] = s;
        h[3] = t;
    }

    /// Parametric shape-function derivatives (constant for the linear tet).
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], _r: f64, _s: f64, _t: f64) {
        hr[0] = -1.0;
        hs[0] = -1.0;
        ht[0] = -1.0;
        hr[1] = 1.0;
        hs[1] = 0.0;
        ht[1] = 0.0;
        hr[2] = 0.0;
        hs[2] = 1.0;
        ht[2] = 0.0;
        hr[3] = 0.0;
        hs[3] = 0.0;
        ht[3] = 1.0;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0 => [0.0, 0.0, 0.0],
            1 => [1.0, 0.0, 0.0],
            2 => [0.0, 1.0, 0.0],
            3 => [0.0, 0.0, 1.0],
            _ => [0.25, 0.25, 0.25],
        }
    }

    /// 4-point symmetric rule.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        const A: f64 = 0.58541020;
        const B: f64 = 0.13819660;
        const W: f64 = 1.0 / 24.0;
        let pts = [[B, B, B], [A, B, B], [B, A, B], [B, B, A]];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = W;
        }
    }
}

/// 4-node tetrahedron with a centroid bubble node.
pub mod tet5 {
    /// Number of nodes.
    pub const NODES: usize = 5;
    /// Number of integration points.
    pub const GAUSS: usize = 4;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        h[0] = 1.0 - r - s - t;
        h[1] = r;
        h[2] = s;
        h[3] = t;
        h[4] = 256.0 * h[0] * h[1] * h[2] * h[3];

        h[0] -= 0.25 * h[4];
        h[1] -= 0.25 * h[4];
        h[2] -= 0.25 * h[4];
        h[3] -= 0.25 * h[4];
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        super::tet4::shape_deriv(hr, hs, ht, r, s, t);

        let l1 = 1.0 - r - s - t;
        hr[4] = 256.0 * (s * t * l1 - r * s * t);
        hs[4] = 256.0 * (r * t * l1 - r * s * t);
        ht[4] = 256.0 * (r * s * l1 - r * s * t);

        for i in 0..4 {
            hr[i] -= 0.25 * hr[4];
            hs[i] -= 0.25 * hs[4];
            ht[i] -= 0.25 * ht[4];
        }
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0..=3 => super::tet4::iso_coord(n),
            _ => [0.25, 0.25, 0.25],
        }
    }

    /// 4-point symmetric rule (shared with the linear tet).
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        super::tet4::gauss(gr, gs, gt, gw);
    }
}

/// Quadratic 10-node tetrahedron.
pub mod tet10 {
    /// Number of nodes.
    pub const NODES: usize = 10;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        let r1 = 1.0 - r - s - t;
        let r2 = r;
        let r3 = s;
        let r4 = t;

        h[0] = r1 * (2.0 * r1 - 1.0);
        h[1] = r2 * (2.0 * r2 - 1.0);
        h[2] = r3 * (2.0 * r3 - 1.0);
        h[3] = r4 * (2.0 * r4 - 1.0);
        h[4] = 4.0 * r1 * r2;
        h[5] = 4.0 * r2 * r3;
        h[6] = 4.0 * r3 * r1;
        h[7] = 4.0 * r1 * r4;
        h[8] = 4.0 * r2 * r4;
        h[9] = 4.0 * r3 * r4;
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[0] = -3.0 + 4.0 * r + 4.0 * (s + t);
        hr[1] = 4.0 * r - 1.0;
        hr[2] = 0.0;
        hr[3] = 0.0;
        hr[4] = 4.0 - 8.0 * r - 4.0 * (s + t);
        hr[5] = 4.0 * s;
        hr[6] = -4.0 * s;
        hr[7] = -4.0 * t;
        hr[8] = 4.0 * t;
        hr[9] = 0.0;

        hs[0] = -3.0 + 4.0 * s + 4.0 * (r + t);
        hs[1] = 0.0;
        hs[2] = 4.0 * s - 1.0;
        hs[3] = 0.0;
        hs[4] = -4.0 * r;
        hs[5] = 4.0 * r;
        hs[6] = 4.0 - 8.0 * s - 4.0 * (r + t);
        hs[7] = -4.0 * t;
        hs[8] = 0.0;
        hs[9] = 4.0 * t;

        ht[0] = -3.0 + 4.0 * t + 4.0 * (r + s);
        ht[1] = 0.0;
        ht[2] = 0.0;
        ht[3] = 4.0 * t - 1.0;
        ht[4] = -4.0 * r;
        ht[5] = 0.0;
        ht[6] = -4.0 * s;
        ht[7] = 4.0 - 8.0 * t - 4.0 * (r + s);
        ht[8] = 4.0 * r;
        ht[9] = 4.0 * s;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        match n {
            0 => [0.0, 0.0, 0.0],
            1 => [1.0, 0.0, 0.0],
            2 => [0.0, 1.0, 0.0],
            3 => [0.0, 0.0, 1.0],
            4 => [0.5, 0.0, 0.0],
            5 => [0.5, 0.5, 0.0],
            6 => [0.0, 0.5, 0.0],
            7 => [0.0, 0.0, 0.5],
            8 => [0.5, 0.0, 0.5],
            9 => [0.0, 0.5, 0.5],
            _ => [0.25, 0.25, 0.25],
        }
    }

    /// 8-point symmetric rule.
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        const W: f64 = 1.0 / 6.0;
        const A: f64 = 0.3280546970;
        const B: f64 = 0.0158359099;
        const C: f64 = 0.6791431780;
        const D: f64 = 0.1069522740;
        const WA: f64 = 0.138527967;
        const WB: f64 = 0.111472033;
        let pts = [
            [B, A, A, WA],
            [A, B, A, WA],
            [A, A, B, WA],
            [A, A, A, WA],
            [C, D, D, WB],
            [D, C, D, WB],
            [D, D, C, WB],
            [D, D, D, WB],
        ];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = p[3] * W;
        }
    }
}

/// 15-node tetrahedron (quadratic with face and centroid bubbles).
pub mod tet15 {
    /// Number of nodes.
    pub const NODES: usize = 15;
    /// Number of integration points.
    pub const GAUSS: usize = 8;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        let r1 = 1.0 - r - s - t;
        let r2 = r;
        let r3 = s;
        let r4 = t;

        h[14] = 256.0 * r1 * r2 * r3 * r4;

        h[10] = 27.0 * r1 * r2 * r3;
        h[11] = 27.0 * r1 * r2 * r4;
        h[12] = 27.0 * r2 * r3 * r4;
        h[13] = 27.0 * r3 * r1 * r4;

        h[0] = r1 * (2.0 * r1 - 1.0) + (h[10] + h[11] + h[13]) / 9.0 - h[14] / 64.0;
        h[1] = r2 * (2.0 * r2 - 1.0) + (h[10] + h[11] + h[12]) / 9.0 - h[14] / 64.0;
        h[2] = r3 * (2.0 * r3 - 1.0) + (h[10] + h[12] + h[13]) / 9.0 - h[14] / 64.0;
        h[3] = r4 * (2.0 * r4 - 1.0) + (h[11] + h[12] + h[13]) / 9.0 - h[14] / 64.0;

        h[4] = 4.0 * r1 * r2 - 4.0 * (h[10] + h[11]) / 9.0 + h[14] / 8.0;
        h[5] = 4.0 * r2 * r3 - 4.0 * (h[10] + h[12]) / 9.0 + h[14] / 8.0;
        h[6] = 4.0 * r3 * r1 - 4.0 * (h[10] + h[13]) / 9.0 + h[14] / 8.0;
        h[7] = 4.0 * r1 * r4 - 4.0 * (h[11] + h[13]) / 9.0 + h[14] / 8.0;
        h[8] = 4.0 * r2 * r4 - 4.0 * (h[11] + h[12]) / 9.0 + h[14] / 8.0;
        h[9] = 4.0 * r3 * r4 - 4.0 * (h[12] + h[13]) / 9.0 + h[14] / 8.0;

        h[10] -= 27.0 * h[14] / 64.0;
        h[11] -= 27.0 * h[14] / 64.0;
        h[12] -= 27.0 * h[14] / 64.0;
        h[13] -= 27.0 * h[14] / 64.0;
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        hr[14] = 256.0 * s * t * (1.0 - 2.0 * r - s - t);
        hs[14] = 256.0 * r * t * (1.0 - r - 2.0 * s - t);
        ht[14] = 256.0 * r * s * (1.0 - r - s - 2.0 * t);

        hr[10] = 27.0 * s * (1.0 - 2.0 * r - s - t);
        hr[11] = 27.0 * t * (1.0 - 2.0 * r - s - t);
        hr[12] = 27.0 * s * t;
        hr[13] = -27.0 * s * t;

        hs[10] = 27.0 * r * (1.0 - r - 2.0 * s - t);
        hs[11] = -27.0 * r * t;
        hs[12] = 27.0 * r * t;
        hs[13] = 27.0 * t * (1.0 - r - 2.0 * s - t);

        ht[10] = -27.0 * r * s;
        ht[11] = 27.0 * r * (1.0 - r - s - 2.0 * t);
        ht[12] = 27.0 * r * s;
        ht[13] = 27.0 * s * (1.0 - r - s - 2.0 * t);

        hr[0] = -3.0 + 4.0 * r + 4.0 * (s + t) + (hr[10] + hr[11] + hr[13]) / 9.0 - hr[14] / 64.0;
        hr[1] = 4.0 * r - 1.0 + (hr[10] + hr[11] + hr[12]) / 9.0 - hr[14] / 64.0;
        hr[2] = (hr[10] + hr[12] + hr[13]) / 9.0 - hr[14] / 64.0;
        hr[3] = (hr[11] + hr[12] + hr[13]) / 9.0 - hr[14] / 64.0;
        hr[4] = 4.0 - 8.0 * r - 4.0 * (s + t) - 4.0 * (hr[10] + hr[11]) / 9.0 + hr[14] / 8.0;
        hr[5] = 4.0 * s - 4.0 * (hr[10] + hr[12]) / 9.0 + hr[14] / 8.0;
        hr[6] = -4.0 * s - 4.0 * (hr[10] + hr[13]) / 9.0 + hr[14] / 8.0;
        hr[7] = -4.0 * t - 4.0 * (hr[11] + hr[13]) / 9.0 + hr[14] / 8.0;
        hr[8] = 4.0 * t - 4.0 * (hr[11] + hr[12]) / 9.0 + hr[14] / 8.0;
        hr[9] = -4.0 * (hr[12] + hr[13]) / 9.0 + hr[14] / 8.0;

        hs[0] = -3.0 + 4.0 * s + 4.0 * (r + t) + (hs[10] + hs[11] + hs[13]) / 9.0 - hs[14] / 64.0;
        hs[1] = (hs[10] + hs[11] + hs[12]) / 9.0 - hs[14] / 64.0;
        hs[2] = 4.0 * s - 1.0 + (hs[10] + hs[12] + hs[13]) / 9.0 - hs[14] / 64.0;
        hs[3] = (hs[11] + hs[12] + hs[13]) / 9.0 - hs[14] / 64.0;
        hs[4] = -4.0 * r - 4.0 * (hs[10] + hs[11]) / 9.0 + hs[14] / 8.0;
        hs[5] = 4.0 * r - 4.0 * (hs[10] + hs[12]) / 9.0 + hs[14] / 8.0;
        hs[6] = 4.0 - 8.0 * s - 4.0 * (r + t) - 4.0 * (hs[10] + hs[13]) / 9.0 + hs[14] / 8.0;
        hs[7] = -4.0 * t - 4.0 * (hs[11] + hs[13]) / 9.0 + hs[14] / 8.0;
        hs[8] = -4.0 * (hs[11] + hs[12]) / 9.0 + hs[14] / 8.0;
        hs[9] = 4.0 * t - 4.0 * (hs[12] + hs[13]) / 9.0 + hs[14] / 8.0;

        ht[0] = -3.0 + 4.0 * t + 4.0 * (r + s) + (ht[10] + ht[11] + ht[13]) / 9.0 - ht[14] / 64.0;
        ht[1] = (ht[10] + ht[11] + ht[12]) / 9.0 - ht[14] / 64.0;
        ht[2] = (ht[10] + ht[12] + ht[13]) / 9.0 - ht[14] / 64.0;
        ht[3] = 4.0 * t - 1.0 + (ht[11] + ht[12] + ht[13]) / 9.0 - ht[14] / 64.0;
        ht[4] = -4.0 * r - 4.0 * (ht[10] + ht[11]) / 9.0 + ht[14] / 8.0;
        ht[5] = -4.0 * (ht[10] + ht[12]) / 9.0 + ht[14] / 8.0;
        ht[6] = -4.0 * s - 4.0 * (ht[10] + ht[13]) / 9.0 + ht[14] / 8.0;
        ht[7] = 4.0 - 8.0 * t - 4.0 * (r + s) - 4.0 * (ht[11] + ht[13]) / 9.0 + ht[14] / 8.0;
        ht[8] = 4.0 * r - 4.0 * (ht[11] + ht[12]) / 9.0 + ht[14] / 8.0;
        ht[9] = 4.0 * s - 4.0 * (ht[12] + ht[13]) / 9.0 + ht[14] / 8.0;

        for i in 10..14 {
            hr[i] -= 27.0 * hr[14] / 64.0;
            hs[i] -= 27.0 * hs[14] / 64.0;
            ht[i] -= 27.0 * ht[14] / 64.0;
        }
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const T: f64 = 1.0 / 3.0;
        match n {
            0..=9 => super::tet10::iso_coord(n),
            10 => [T, T, 0.0],
            11 => [T, 0.0, T],
            12 => [T, T, T],
            13 => [0.0, T, T],
            _ => [0.25, 0.25, 0.25],
        }
    }

    /// 8-point symmetric rule (shared with the 10-node tet).
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        super::tet10::gauss(gr, gs, gt, gw);
    }
}

/// Cubic 20-node tetrahedron.
pub mod tet20 {
    /// Number of nodes.
    pub const NODES: usize = 20;
    /// Number of integration points.
    pub const GAUSS: usize = 15;

    /// Shape functions at `(r, s, t)`.
    pub fn shape(h: &mut [f64], r: f64, s: f64, t: f64) {
        let l1 = 1.0 - r - s - t;
        let l2 = r;
        let l3 = s;
        let l4 = t;

        h[0] = 0.5 * (3.0 * l1 - 1.0) * (3.0 * l1 - 2.0) * l1;
        h[1] = 0.5 * (3.0 * l2 - 1.0) * (3.0 * l2 - 2.0) * l2;
        h[2] = 0.5 * (3.0 * l3 - 1.0) * (3.0 * l3 - 2.0) * l3;
        h[3] = 0.5 * (3.0 * l4 - 1.0) * (3.0 * l4 - 2.0) * l4;
        h[4] = 4.5 * (3.0 * l1 - 1.0) * l1 * l2;
        h[5] = 4.5 * (3.0 * l2 - 1.0) * l1 * l2;
        h[6] = 4.5 * (3.0 * l2 - 1.0) * l2 * l3;
        h[7] = 4.5 * (3.0 * l3 - 1.0) * l2 * l3;
        h[8] = 4.5 * (3.0 * l1 - 1.0) * l1 * l3;
        h[9] = 4.5 * (3.0 * l3 - 1.0) * l1 * l3;
        h[10] = 4.5 * (3.0 * l1 - 1.0) * l1 * l4;
        h[11] = 4.5 * (3.0 * l4 - 1.0) * l1 * l4;
        h[12] = 4.5 * (3.0 * l2 - 1.0) * l2 * l4;
        h[13] = 4.5 * (3.0 * l4 - 1.0) * l2 * l4;
        h[14] = 4.5 * (3.0 * l3 - 1.0) * l3 * l4;
        h[15] = 4.5 * (3.0 * l4 - 1.0) * l3 * l4;
        h[16] = 27.0 * l1 * l2 * l4;
        h[17] = 27.0 * l2 * l3 * l4;
        h[18] = 27.0 * l1 * l3 * l4;
        h[19] = 27.0 * l1 * l2 * l3;
    }

    /// Parametric shape-function derivatives at `(r, s, t)`.
    pub fn shape_deriv(hr: &mut [f64], hs: &mut [f64], ht: &mut [f64], r: f64, s: f64, t: f64) {
        let l1 = 1.0 - r - s - t;
        let l2 = r;
        let l3 = s;
        let l4 = t;

        // d/dL of the corner polynomial 0.5 (3L-1)(3L-2) L
        let corner = |l: f64| {
            1.5 * (3.0 * l - 2.0) * l + 1.5 * (3.0 * l - 1.0) * l
                + 0.5 * (3.0 * l - 1.0) * (3.0 * l - 2.0)
        };

        hr[0] = -corner(l1);
        hr[1] = corner(l2);
        hr[2] = 0.0;
        hr[3] = 0.0;
        hr[4] = -13.5 * l1 * l2 - 4.5 * (3.0 * l1 - 1.0) * l2 + 4.5 * (3.0 * l1 - 1.0) * l1;
        hr[5] = 13.5 * l1 * l2 - 4.5 * (3.0 * l2 - 1.0) * l2 + 4.5 * (3.0 * l2 - 1.0) * l1;
        hr[6] = 13.5 * l2 * l3 + 4.5 * (3.0 * l2 - 1.0) * l3;
        hr[7] = 4.5 * (3.0 * l3 - 1.0) * l3;
        hr[8] = -13.5 * l1 * l3 - 4.5 * (3.0 * l1 - 1.0) * l3;
        hr[9] = -4.5 * (3.0 * l3 - 1.0) * l3;
        hr[10] = -13.5 * l1 * l4 - 4.5 * (3.0 * l1 - 1.0) * l4;
        hr[11] = -4.5 * (3.0 * l4 - 1.0) * l4;
        hr[12] = 13.5 * l2 * l4 + 4.5 * (3.0 * l2 - 1.0) * l4;
        hr[13] = 4.5 * (3.0 * l4 - 1.0) * l4;
        hr[14] = 0.0;
        hr[15] = 0.0;
        hr[16] = -27.0 * l2 * l4 + 27.0 * l1 * l4;
        hr[17] = 27.0 * l3 * l4;
        hr[18] = -27.0 * l3 * l4;
        hr[19] = -27.0 * l2 * l3 + 27.0 * l1 * l3;

        hs[0] = -corner(l1);
        hs[1] = 0.0;
        hs[2] = corner(l3);
        hs[3] = 0.0;
        hs[4] = -13.5 * l1 * l2 - 4.5 * (3.0 * l1 - 1.0) * l2;
        hs[5] = -4.5 * (3.0 * l2 - 1.0) * l2;
        hs[6] = 4.5 * (3.0 * l2 - 1.0) * l2;
        hs[7] = 13.5 * l2 * l3 + 4.5 * (3.0 * l3 - 1.0) * l2;
        hs[8] = -13.5 * l1 * l3 - 4.5 * (3.0 * l1 - 1.0) * l3 + 4.5 * (3.0 * l1 - 1.0) * l1;
        hs[9] = 13.5 * l1 * l3 - 4.5 * (3.0 * l3 - 1.0) * l3 + 4.5 * (3.0 * l3 - 1.0) * l1;
        hs[10] = -13.5 * l1 * l4 - 4.5 * (3.0 * l1 - 1.0) * l4;
        hs[11] = -4.5 * (3.0 * l4 - 1.0) * l4;
        hs[12] = 0.0;
        hs[13] = 0.0;
        hs[14] = 13.5 * l3 * l4 + 4.5 * (3.0 * l3 - 1.0) * l4;
        hs[15] = 4.5 * (3.0 * l4 - 1.0) * l4;
        hs[16] = -27.0 * l2 * l4;
        hs[17] = 27.0 * l2 * l4;
        hs[18] = -27.0 * l3 * l4 + 27.0 * l1 * l4;
        hs[19] = -27.0 * l2 * l3 + 27.0 * l1 * l2;

        ht[0] = -corner(l1);
        ht[1] = 0.0;
        ht[2] = 0.0;
        ht[3] = corner(l4);
        ht[4] = -13.5 * l1 * l2 - 4.5 * (3.0 * l1 - 1.0) * l2;
        ht[5] = -4.5 * (3.0 * l2 - 1.0) * l2;
        ht[6] = 0.0;
        ht[7] = 0.0;
        ht[8] = -13.5 * l1 * l3 - 4.5 * (3.0 * l1 - 1.0) * l3;
        ht[9] = -4.5 * (3.0 * l3 - 1.0) * l3;
        ht[10] = -13.5 * l1 * l4 - 4.5 * (3.0 * l1 - 1.0) * l4 + 4.5 * (3.0 * l1 - 1.0) * l1;
        ht[11] = 13.5 * l1 * l4 - 4.5 * (3.0 * l4 - 1.0) * l4 + 4.5 * (3.0 * l4 - 1.0) * l1;
        ht[12] = 4.5 * (3.0 * l2 - 1.0) * l2;
        ht[13] = 13.5 * l2 * l4 + 4.5 * (3.0 * l4 - 1.0) * l2;
        ht[14] = 4.5 * (3.0 * l3 - 1.0) * l3;
        ht[15] = 13.5 * l3 * l4 + 4.5 * (3.0 * l4 - 1.0) * l3;
        ht[16] = -27.0 * l2 * l4 + 27.0 * l1 * l2;
        ht[17] = 27.0 * l2 * l3;
        ht[18] = -27.0 * l3 * l4 + 27.0 * l1 * l3;
        ht[19] = -27.0 * l2 * l3;
    }

    /// Parametric coordinates of local node `n`; `n = -1` gives the centroid.
    pub fn iso_coord(n: i32) -> [f64; 3] {
        const A: f64 = 1.0 / 3.0;
        const B: f64 = 2.0 / 3.0;
        match n {
            0 => [0.0, 0.0, 0.0],
            1 => [1.0, 0.0, 0.0],
            2 => [0.0, 1.0, 0.0],
            3 => [0.0, 0.0, 1.0],
            4 => [A, 0.0, 0.0],
            5 => [B, 0.0, 0.0],
            6 => [B, A, 0.0],
            7 => [A, B, 0.0],
            8 => [0.0, A, 0.0],
            9 => [0.0, B, 0.0],
            10 => [0.0, 0.0, A],
            11 => [0.0, 0.0, B],
            12 => [B, 0.0, A],
            13 => [A, 0.0, B],
            14 => [0.0, B, A],
            15 => [0.0, A, B],
            16 => [A, 0.0, A],
            17 => [A, A, A],
            18 => [0.0, A, A],
            19 => [A, A, 0.0],
            _ => [0.25, 0.25, 0.25],
        }
    }

    /// 15-point symmetric rule (weights include the 1/6 reference volume).
    pub fn gauss(gr: &mut [f64], gs: &mut [f64], gt: &mut [f64], gw: &mut [f64]) {
        const T: f64 = 0.333333333333333;
        const U: f64 = 0.090909090909091;
        const V: f64 = 0.727272727272727;
        const P: f64 = 0.433449846426336;
        const Q: f64 = 0.066550153573664;
        const W0: f64 = 0.030283678097089;
        const W1: f64 = 0.006026785714286;
        const W2: f64 = 0.011645249086029;
        const W3: f64 = 0.010949141561386;
        let pts = [
            [0.25, 0.25, 0.25, W0],
            [T, T, T, W1],
            [0.0, T, T, W1],
            [T, 0.0, T, W1],
            [T, T, 0.0, W1],
            [U, U, U, W2],
            [V, U, U, W2],
            [U, V, U, W2],
            [U, U, V, W2],
            [P, Q, Q, W3],
            [Q, P, Q, W3],
            [Q, Q, P, W3],
            [Q, P, P, W3],
            [P, Q, P, W3],
            [P, P, Q, W3],
        ];
        for (i, p) in pts.iter().enumerate() {
            gr[i] = p[0];
            gs[i] = p[1];
            gt[i] = p[2];
            gw[i] = p[3];
        }
    }
}
