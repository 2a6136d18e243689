// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh construction and topology queries

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by mesh construction and connectivity queries.
///
/// Numerical degeneracies (zero-area faces, coincident vertices) are not
/// errors: they are repaired by the healing pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A vertex row does not hold exactly three coordinates.
    #[error("vertex row {row} has {len} coordinates, expected 3")]
    VertexShape { row: usize, len: usize },

    /// A face row does not hold exactly four indices.
    #[error("face row {row} has {len} indices, expected 4")]
    FaceShape { row: usize, len: usize },

    /// A face index is not an integer.
    #[error("face {face} holds the non-integral vertex index {value}")]
    NonIntegralIndex { face: usize, value: f64 },

    /// A face index is negative.
    #[error("face {face} holds the negative vertex index {value}")]
    NegativeIndex { face: usize, value: f64 },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {nb_vertices} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        nb_vertices: usize,
    },

    /// A face id given to an accessor does not exist.
    #[error("face id {face} is out of range (mesh has {nb_faces} faces)")]
    FaceOutOfRange { face: usize, nb_faces: usize },

    /// An edge is shared by more than two faces.
    #[error("edge ({}, {}) is shared by {faces} faces", edge.0, edge.1)]
    NonManifoldEdge { edge: (usize, usize), faces: usize },

    /// Two boundary edges leave the same vertex.
    #[error("boundary vertex {vertex} starts more than one boundary edge")]
    BoundaryBranch { vertex: usize },

    /// A chain of boundary edges does not come back to its start.
    #[error("boundary chain starting at vertex {start} is not closed")]
    OpenBoundary { start: usize },

    /// A per-face field does not match the number of faces.
    #[error("field has {len} values but the mesh has {nb_faces} faces")]
    FieldLength { len: usize, nb_faces: usize },
}
