// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh connectivity: adjacency maps and boundary loops
//!
//! All maps are built in a single pass over the face edges. An edge used by
//! exactly one face is a boundary edge; boundary edges are chained into
//! closed loops oriented opposite to the winding of their face.

use super::{edge_key, polygon, Face};
use crate::error::{MeshError, MeshResult};
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Adjacency information of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Connectivity {
    vertex_vertices: Vec<BTreeSet<usize>>,
    vertex_faces: Vec<BTreeSet<usize>>,
    face_faces: Vec<BTreeSet<usize>>,
    boundary_faces: BTreeSet<usize>,
    nb_boundary_edges: usize,
    /// Loop extraction can fail on its own without spoiling the adjacency maps
    boundaries: MeshResult<Vec<Vec<usize>>>,
}

/// Consecutive vertex pairs of a polygon, wrapping around, without
/// the zero-length edges of collapsed faces
fn polygon_edges(face: &Face) -> impl Iterator<Item = (usize, usize)> + '_ {
    let ids = polygon(face);
    let len = ids.len();
    (0..len)
        .map(move |k| (ids[k], ids[(k + 1) % len]))
        .filter(|(a, b)| a != b)
}

impl Connectivity {
    /// Build the connectivity of `faces` over `nb_vertices` vertices
    ///
    /// Fails with [`MeshError::NonManifoldEdge`] when an edge is shared by
    /// more than two faces.
    pub fn build(nb_vertices: usize, faces: &[Face]) -> MeshResult<Self> {
        let mut vertex_vertices = vec![BTreeSet::new(); nb_vertices];
        let mut vertex_faces = vec![BTreeSet::new(); nb_vertices];
        let mut edge_faces: AHashMap<(usize, usize), Vec<(usize, (usize, usize))>> = AHashMap::new();

        for (face_id, face) in faces.iter().enumerate() {
            for &vertex in polygon(face) {
                vertex_faces[vertex].insert(face_id);
            }
            for (a, b) in polygon_edges(face) {
                vertex_vertices[a].insert(b);
                vertex_vertices[b].insert(a);

                let users = edge_faces.entry(edge_key(a, b)).or_default();
                if !users.iter().any(|&(id, _)| id == face_id) {
                    users.push((face_id, (a, b)));
                }
            }
        }

        let mut edges: Vec<_> = edge_faces.into_iter().collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);

        if let Some((edge, users)) = edges.iter().find(|(_, users)| users.len() > 2) {
            return Err(MeshError::NonManifoldEdge {
                edge: *edge,
                faces: users.len(),
            });
        }

        let mut face_faces = vec![BTreeSet::new(); faces.len()];
        let mut boundary_faces = BTreeSet::new();
        let mut boundary_edges = Vec::new();

        for (_, users) in &edges {
            match users.as_slice() {
                [(f, _), (g, _)] => {
                    face_faces[*f].insert(*g);
                    face_faces[*g].insert(*f);
                }
                [(f, (a, b))] => {
                    boundary_faces.insert(*f);
                    boundary_edges.push((*b, *a));
                }
                _ => {}
            }
        }

        let nb_boundary_edges = boundary_edges.len();
        let boundaries = chain_boundary_edges(boundary_edges);

        Ok(Self {
            vertex_vertices,
            vertex_faces,
            face_faces,
            boundary_faces,
            nb_boundary_edges,
            boundaries,
        })
    }

    /// Neighbours of each vertex along the face edges
    pub fn vertex_vertices(&self) -> &[BTreeSet<usize>] {
        &self.vertex_vertices
    }

    /// Faces incident to each vertex
    pub fn vertex_faces(&self) -> &[BTreeSet<usize>] {
        &self.vertex_faces
    }

    /// Faces sharing an edge with each face
    pub fn face_faces(&self) -> &[BTreeSet<usize>] {
        &self.face_faces
    }

    /// Faces owning at least one boundary edge
    pub fn boundary_faces(&self) -> &BTreeSet<usize> {
        &self.boundary_faces
    }

    pub fn nb_boundary_edges(&self) -> usize {
        self.nb_boundary_edges
    }

    /// Whether every edge is shared by two faces
    pub fn is_closed(&self) -> bool {
        self.nb_boundary_edges == 0
    }

    /// Closed boundary loops, first vertex repeated at the end
    pub fn boundaries(&self) -> MeshResult<&[Vec<usize>]> {
        self.boundaries.as_deref().map_err(Clone::clone)
    }

    pub fn nb_boundaries(&self) -> MeshResult<usize> {
        self.boundaries().map(<[_]>::len)
    }

    /// Connected groups of faces through shared edges, in ascending order of
    /// their smallest face id
    pub fn face_components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.face_faces.len()];
        let mut components = Vec::new();

        for seed in 0..self.face_faces.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut component = Vec::new();
            let mut queue = VecDeque::from([seed]);
            while let Some(face) = queue.pop_front() {
                component.push(face);
                for &neighbour in &self.face_faces[face] {
                    if !visited[neighbour] {
                        visited[neighbour] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }
}

/// Chain directed boundary edges into closed loops
fn chain_boundary_edges(edges: Vec<(usize, usize)>) -> MeshResult<Vec<Vec<usize>>> {
    let mut next: BTreeMap<usize, usize> = BTreeMap::new();
    for (from, to) in edges {
        if next.insert(from, to).is_some() {
            return Err(MeshError::BoundaryBranch { vertex: from });
        }
    }

    let mut loops = Vec::new();
    while let Some((start, mut current)) = next.pop_first() {
        let mut boundary = vec![start];
        while current != start {
            boundary.push(current);
            current = next
                .remove(&current)
                .ok_or(MeshError::OpenBoundary { start })?;
        }
        boundary.push(start);
        loops.push(boundary);
    }
    Ok(loops)
}
