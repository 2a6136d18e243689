// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-face geometric properties
//!
//! Each polygon is split into a fan of triangles around the average of its
//! vertices. Areas, centroids and vector areas of the fan triangles are
//! summed, which gives a well-defined result for warped quadrangles too.

use super::{polygon, Face};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Geometry of a single face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub area: f64,
    /// Area-weighted centroid
    pub center: Point3<f64>,
    /// Unit normal, or the zero vector for a face without area
    pub normal: Vector3<f64>,
    /// Largest distance from the center to a vertex of the face
    pub radius: f64,
}

/// Properties of all faces of a mesh, indexed by face id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceProperties {
    pub areas: Vec<f64>,
    pub centers: Vec<Point3<f64>>,
    pub normals: Vec<Vector3<f64>>,
    pub radiuses: Vec<f64>,
}

/// Vertices of a face polygon, without heap allocation
#[derive(Debug, Clone, Copy)]
pub(crate) struct FacePoints {
    points: [Point3<f64>; 4],
    len: usize,
}

impl FacePoints {
    pub(crate) fn gather(vertices: &[Point3<f64>], face: &Face) -> Self {
        let ids = polygon(face);
        let mut points = [Point3::origin(); 4];
        for (slot, &id) in points.iter_mut().zip(ids) {
            *slot = vertices[id];
        }
        Self {
            points,
            len: ids.len(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[Point3<f64>] {
        &self.points[..self.len]
    }
}

/// Average of the polygon vertices
fn vertex_average(points: &[Point3<f64>]) -> Point3<f64> {
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, point| acc + point.coords);
    Point3::from(sum / points.len() as f64)
}

/// Triangles of the fan decomposition of a polygon
pub(crate) fn fan(points: &[Point3<f64>]) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
    let reference = vertex_average(points);
    let len = points.len();
    (0..len).map(move |k| [reference, points[k], points[(k + 1) % len]])
}

/// Compute area, center, normal and radius of a polygon
///
/// Faces without area do not fail: their center is the vertex average and
/// their normal is the zero vector.
pub fn face_geometry(points: &[Point3<f64>]) -> FaceGeometry {
    if points.is_empty() {
        return FaceGeometry {
            area: 0.0,
            center: Point3::origin(),
            normal: Vector3::zeros(),
            radius: 0.0,
        };
    }

    let mut area = 0.0;
    let mut weighted_centroids = Vector3::zeros();
    let mut vector_area = Vector3::zeros();

    for [reference, a, b] in fan(points) {
        let cross = (a - reference).cross(&(b - reference));
        let triangle_area = 0.5 * cross.norm();
        area += triangle_area;
        weighted_centroids += (reference.coords + a.coords + b.coords) * (triangle_area / 3.0);
        vector_area += cross * 0.5;
    }

    let center = if area > 0.0 {
        Point3::from(weighted_centroids / area)
    } else {
        vertex_average(points)
    };

    let norm = vector_area.norm();
    let normal = if norm > 0.0 {
        vector_area / norm
    } else {
        Vector3::zeros()
    };

    let radius = points
        .iter()
        .map(|point| (point - center).norm())
        .fold(0.0, f64::max);

    FaceGeometry {
        area,
        center,
        normal,
        radius,
    }
}

/// Compute the properties of every face
///
/// Faces are independent, so the batch runs in parallel.
pub fn compute_faces_properties(vertices: &[Point3<f64>], faces: &[Face]) -> FaceProperties {
    let geometries: Vec<FaceGeometry> = faces
        .par_iter()
        .map(|face| face_geometry(FacePoints::gather(vertices, face).as_slice()))
        .collect();

    let mut properties = FaceProperties {
        areas: Vec::with_capacity(geometries.len()),
        centers: Vec::with_capacity(geometries.len()),
        normals: Vec::with_capacity(geometries.len()),
        radiuses: Vec::with_capacity(geometries.len()),
    };

    for geometry in geometries {
        properties.areas.push(geometry.area);
        properties.centers.push(geometry.center);
        properties.normals.push(geometry.normal);
        properties.radiuses.push(geometry.radius);
    }

    properties
}
