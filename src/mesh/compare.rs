// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh equality as sets of coordinate faces
//!
//! Two meshes are equal when they hold the same faces described by vertex
//! coordinates, whatever the vertex numbering and face order. Coordinates are
//! compared bit for bit, so rounding differences break equality. Building
//! the sets is linear in the number of faces; keep it out of hot loops.

use super::{polygon, Face, Mesh};
use ahash::{AHashMap, AHashSet, RandomState};
use nalgebra::Point3;
use std::hash::{Hash, Hasher};

/// A face described by the exact coordinates of its vertices
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceKey {
    points: Vec<[u64; 3]>,
}

fn point_bits(point: &Point3<f64>) -> [u64; 3] {
    // Adding zero turns -0.0 into 0.0
    [point.x, point.y, point.z].map(|value| (value + 0.0).to_bits())
}

impl FaceKey {
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        Self {
            points: points.iter().map(point_bits).collect(),
        }
    }

    pub fn points(&self) -> Vec<Point3<f64>> {
        self.points
            .iter()
            .map(|bits| Point3::new(f64::from_bits(bits[0]), f64::from_bits(bits[1]), f64::from_bits(bits[2])))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Mesh {
    pub fn as_set_of_faces(&self) -> AHashSet<FaceKey> {
        self.faces
            .iter()
            .map(|face| FaceKey {
                points: polygon(face).iter().map(|&id| point_bits(&self.vertices[id])).collect(),
            })
            .collect()
    }

    /// Rebuild a mesh from coordinate faces, sharing identical coordinates
    pub fn from_set_of_faces(name: impl Into<String>, faces: impl IntoIterator<Item = FaceKey>) -> Self {
        let mut ids: AHashMap<[u64; 3], usize> = AHashMap::new();
        let mut vertices = Vec::new();
        let mut mesh_faces: Vec<Face> = Vec::new();

        for key in faces {
            let mut face = [0; 4];
            for (slot, bits) in face.iter_mut().zip(&key.points) {
                *slot = *ids.entry(*bits).or_insert_with(|| {
                    vertices.push(Point3::new(
                        f64::from_bits(bits[0]),
                        f64::from_bits(bits[1]),
                        f64::from_bits(bits[2]),
                    ));
                    vertices.len() - 1
                });
            }
            match key.points.len() {
                3 => face[3] = face[0],
                4 => {}
                _ => continue,
            }
            mesh_faces.push(face);
        }

        Self::from_parts_unchecked(name, vertices, mesh_faces)
    }
}

impl PartialEq for Mesh {
    fn eq(&self, other: &Self) -> bool {
        self.as_set_of_faces() == other.as_set_of_faces()
    }
}

impl Eq for Mesh {}

impl Hash for Mesh {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent combination of per-face hashes
        let hasher = RandomState::with_seeds(0x5bd1e995, 0x27d4eb2f, 0x165667b1, 0x9e3779b9);
        let combined = self
            .as_set_of_faces()
            .iter()
            .fold(0u64, |acc, key| acc.wrapping_add(hasher.hash_one(key)));
        combined.hash(state);
    }
}
