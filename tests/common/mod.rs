// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared mesh fixtures

#![allow(dead_code)]

use hullmesh::{Face, Mesh, MeshResult};
use nalgebra::Point3;
use std::f64::consts::PI;

pub fn cube_vertices() -> Vec<Point3<f64>> {
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

/// Outward quadrangles of the unit cube
pub fn cube_faces() -> Vec<Face> {
    vec![
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ]
}

/// Unit cube `[0, 1]³` made of six quadrangles
pub fn unit_cube() -> MeshResult<Mesh> {
    Mesh::new("cube", cube_vertices(), cube_faces())
}

/// Unit cube made of twelve triangles
pub fn triangle_cube() -> MeshResult<Mesh> {
    let faces = cube_faces()
        .into_iter()
        .flat_map(|[a, b, c, d]| [[a, b, c, a], [a, c, d, a]])
        .collect();
    Mesh::new("triangle_cube", cube_vertices(), faces)
}

/// Unit cube whose faces do not share vertices
pub fn exploded_cube() -> MeshResult<Mesh> {
    let vertices = cube_vertices();
    let mut points = Vec::new();
    let mut faces = Vec::new();
    for face in cube_faces() {
        let start = points.len();
        points.extend(face.iter().map(|&id| vertices[id]));
        faces.push([start, start + 1, start + 2, start + 3]);
    }
    Mesh::new("exploded_cube", points, faces)
}

/// Latitude-longitude sphere: quadrangles with triangles at the poles
pub fn quad_sphere(radius: f64, nb_theta: usize, nb_phi: usize) -> MeshResult<Mesh> {
    let mut vertices = vec![Point3::new(0.0, 0.0, radius)];
    for i in 1..nb_theta {
        let theta = PI * i as f64 / nb_theta as f64;
        for j in 0..nb_phi {
            let phi = 2.0 * PI * j as f64 / nb_phi as f64;
            vertices.push(Point3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }
    let south = vertices.len();
    vertices.push(Point3::new(0.0, 0.0, -radius));

    let ring = |i: usize, j: usize| 1 + (i - 1) * nb_phi + j % nb_phi;
    let mut faces = Vec::new();
    for j in 0..nb_phi {
        faces.push([0, ring(1, j), ring(1, j + 1), 0]);
    }
    for i in 1..nb_theta - 1 {
        for j in 0..nb_phi {
            faces.push([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    for j in 0..nb_phi {
        faces.push([south, ring(nb_theta - 1, j + 1), ring(nb_theta - 1, j), south]);
    }

    Mesh::new("sphere", vertices, faces)
}
