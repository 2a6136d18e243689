// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh module - mesh entity, derived properties, healing and clipping
//!
//! Faces are stored as four vertex indices in counterclockwise order. A
//! triangle repeats its first index in the last slot: `[a, b, c, a]`.

mod cache;
mod clipper;
mod compare;
mod connectivity;
mod factory;
mod integrals;
#[allow(clippy::module_inception)]
mod mesh;
mod properties;
mod quality;

pub use cache::{CacheKind, FaceKinds};
pub use clipper::{FacePartition, MeshClipper, VertexPosition};
pub use compare::FaceKey;
pub use connectivity::Connectivity;
pub use factory::MeshFactory;
pub use integrals::{Moment, SurfaceIntegrals, NB_MOMENTS};
pub use mesh::Mesh;
pub use properties::{compute_faces_properties, face_geometry, FaceGeometry, FaceProperties};
pub use quality::HealingReport;

/// Face as four vertex indices
pub type Face = [usize; 4];

/// Whether the face uses the triangle encoding (first index repeated last)
pub fn is_triangle(face: &Face) -> bool {
    face[0] == face[3]
}

/// The polygon of a face: three indices for a triangle, four otherwise
pub fn polygon(face: &Face) -> &[usize] {
    if is_triangle(face) {
        &face[..3]
    } else {
        &face[..]
    }
}

/// The same face with the opposite winding, keeping the triangle encoding
pub fn reversed(face: &Face) -> Face {
    let [a, b, c, d] = *face;
    if a == d {
        [a, c, b, a]
    } else {
        [a, d, c, b]
    }
}

/// Number of distinct vertex indices in a face
pub(crate) fn distinct_vertices(face: &Face) -> usize {
    (0..4)
        .filter(|&k| !face[..k].contains(&face[k]))
        .count()
}

/// Edge key with the smaller index first
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
