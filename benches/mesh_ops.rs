//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use sliver::algo::fill_hole::find_edge_ring;
use sliver::prelude::*;

/// n x n grid of quads split into triangles, with the center vertex and
/// its incident triangles removed.
fn grid_with_hole(n: usize) -> (SurfaceMesh, usize) {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            points.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    let center = (n / 2) * (n + 1) + n / 2;
    let mut tris = Vec::with_capacity(n * n * 2);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            for tri in [[v00, v10, v11], [v00, v11, v01]] {
                if !tri.contains(&center) {
                    tris.push(tri);
                }
            }
        }
    }
    let mesh = SurfaceMesh::from_triangles(&points, &tris).unwrap();
    (mesh, center + 1)
}

fn icosphere(subdivisions: usize) -> SurfaceMesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let scale = 1.0 / (1.0 + phi * phi).sqrt();
    let mut vertices = vec![
        Point3::new(-1.0, phi, 0.0) * scale,
        Point3::new(1.0, phi, 0.0) * scale,
        Point3::new(-1.0, -phi, 0.0) * scale,
        Point3::new(1.0, -phi, 0.0) * scale,
        Point3::new(0.0, -1.0, phi) * scale,
        Point3::new(0.0, 1.0, phi) * scale,
        Point3::new(0.0, -1.0, -phi) * scale,
        Point3::new(0.0, 1.0, -phi) * scale,
        Point3::new(phi, 0.0, -1.0) * scale,
        Point3::new(phi, 0.0, 1.0) * scale,
        Point3::new(-phi, 0.0, -1.0) * scale,
        Point3::new(-phi, 0.0, 1.0) * scale,
    ];
    let mut faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    for _ in 0..subdivisions {
        let mut new_faces = Vec::new();
        let mut midpoints: std::collections::HashMap<(usize, usize), usize> = Default::default();
        for face in &faces {
            let mut mids = [0usize; 3];
            for i in 0..3 {
                let v0 = face[i];
                let v1 = face[(i + 1) % 3];
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                mids[i] = *midpoints.entry(key).or_insert_with(|| {
                    let mid = (vertices[v0].coords + vertices[v1].coords) / 2.0;
                    vertices.push(Point3::from(mid.normalize()));
                    vertices.len() - 1
                });
            }
            new_faces.push([face[0], mids[0], mids[2]]);
            new_faces.push([face[1], mids[1], mids[0]]);
            new_faces.push([face[2], mids[2], mids[1]]);
            new_faces.push([mids[0], mids[1], mids[2]]);
        }
        faces = new_faces;
    }
    SurfaceMesh::from_triangles(&vertices, &faces).unwrap()
}

fn bench_rebuild(c: &mut Criterion) {
    let (mesh, _) = grid_with_hole(20);
    c.bench_function("rebuild_20x20", |b| {
        b.iter(|| {
            let mut m = mesh.clone();
            m.rebuild();
            m
        })
    });
}

fn bench_find_ring(c: &mut Criterion) {
    let (mesh, seed) = grid_with_hole(20);
    c.bench_function("find_edge_ring_20x20", |b| {
        b.iter(|| find_edge_ring(&mesh, seed).unwrap())
    });
}

fn bench_fill_hole(c: &mut Criterion) {
    let (mesh, seed) = grid_with_hole(20);
    c.bench_function("fill_hole_20x20", |b| {
        b.iter(|| fill_hole(&mesh, seed, &FillHoleOptions::default()).unwrap())
    });
}

fn bench_flip_edges(c: &mut Criterion) {
    let mesh = icosphere(3);
    c.bench_function("flip_edges_icosphere3", |b| {
        b.iter(|| flip_edges(&mesh, &FlipOptions::default()).unwrap())
    });
}

fn bench_cvd_decimate(c: &mut Criterion) {
    let mesh = icosphere(3);
    c.bench_function("cvd_decimate_icosphere3", |b| {
        b.iter(|| cvd_decimate(&mesh, &CvdOptions::new(0.1)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_find_ring,
    bench_fill_hole,
    bench_flip_edges,
    bench_cvd_decimate
);
criterion_main!(benches);
