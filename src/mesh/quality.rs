// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh healing
//!
//! Each step returns how many elements it changed and leaves the caches
//! untouched when it changed nothing, so healing a healthy mesh is free.

use super::mesh::compact_vertices;
use super::{distinct_vertices, polygon, reversed, Face, Mesh};
use crate::config::HealingConfig;
use crate::error::MeshResult;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{info, warn};

/// Counts of the changes made by [`Mesh::heal_mesh`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealingReport {
    pub unused_vertices: usize,
    pub degenerate_faces: usize,
    pub merged_vertices: usize,
    pub healed_triangles: usize,
    pub flipped_normals: usize,
}

impl HealingReport {
    /// Whether the mesh came out of the pipeline unchanged
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Groups of vertices closer than `atol` on every coordinate
///
/// Vertices are sorted along x, y then z, splitting a group wherever two
/// consecutive coordinates differ by more than `atol`.
fn duplicate_groups(vertices: &[Point3<f64>], atol: f64) -> Vec<Vec<usize>> {
    let mut groups = vec![(0..vertices.len()).collect::<Vec<_>>()];
    for dim in 0..3 {
        let mut split = Vec::with_capacity(groups.len());
        for mut group in groups {
            group.sort_by(|&a, &b| vertices[a][dim].total_cmp(&vertices[b][dim]));
            let mut current: Vec<usize> = Vec::new();
            for id in group {
                if let Some(&last) = current.last() {
                    if vertices[id][dim] - vertices[last][dim] > atol {
                        split.push(std::mem::take(&mut current));
                    }
                }
                current.push(id);
            }
            if !current.is_empty() {
                split.push(current);
            }
        }
        groups = split;
    }
    groups
}

/// Rewrite a face with three distinct vertices into the triangle encoding
///
/// Returns `None` for faces that cannot be a triangle: fewer than three
/// distinct vertices, or a repeated vertex on opposite corners.
fn canonical_triangle(face: &Face) -> Option<Face> {
    if distinct_vertices(face) < 3 {
        return None;
    }
    (0..4)
        .find(|&k| face[k] == face[(k + 1) % 4])
        .map(|k| [0, 1, 2, 3].map(|j| face[(k + 1 + j) % 4]))
}

/// Whether two faces run along their shared edge in the same direction
fn same_direction(f: &Face, g: &Face) -> Option<bool> {
    let edges = |face: &Face| {
        let ids = polygon(face).to_vec();
        let len = ids.len();
        (0..len)
            .map(|k| (ids[k], ids[(k + 1) % len]))
            .filter(|(a, b)| a != b)
            .collect::<Vec<_>>()
    };
    let g_edges = edges(g);
    edges(f).into_iter().find_map(|(a, b)| {
        if g_edges.contains(&(a, b)) {
            Some(true)
        } else if g_edges.contains(&(b, a)) {
            Some(false)
        } else {
            None
        }
    })
}

impl Mesh {
    /// Drop vertices that no face references
    pub fn remove_unused_vertices(&mut self) -> usize {
        let (vertices, faces, _) = compact_vertices(&self.vertices, &self.faces);
        let removed = self.vertices.len() - vertices.len();
        if removed > 0 {
            self.vertices = vertices;
            self.faces = faces;
            self.cache.clear();
            info!(mesh = %self.name, removed, "removed unused vertices");
        }
        removed
    }

    pub fn remove_degenerate_faces(&mut self) -> usize {
        self.remove_degenerate_faces_with(&HealingConfig::default())
    }

    /// Drop faces with fewer than three distinct vertices or an area at most
    /// `degenerate_rtol` times the mean area of the faces that are kept
    ///
    /// Dropping tiny faces raises the mean, so the filter runs until no more
    /// face falls under the threshold.
    pub fn remove_degenerate_faces_with(&mut self, config: &HealingConfig) -> usize {
        let areas = self.faces_areas();
        let mut keep: Vec<bool> = self.faces.iter().map(|face| distinct_vertices(face) >= 3).collect();

        loop {
            let (total, count) = areas
                .iter()
                .zip(&keep)
                .filter(|(_, &kept)| kept)
                .fold((0.0, 0usize), |(total, count), (area, _)| (total + area, count + 1));
            if count == 0 {
                break;
            }

            let threshold = config.degenerate_rtol * total / count as f64;
            let mut changed = false;
            for (kept, &area) in keep.iter_mut().zip(areas) {
                if *kept && area <= threshold {
                    *kept = false;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let kept: Vec<Face> = self
            .faces
            .iter()
            .zip(&keep)
            .filter(|(_, &kept)| kept)
            .map(|(face, _)| *face)
            .collect();

        let removed = self.faces.len() - kept.len();
        if removed > 0 {
            self.faces = kept;
            self.cache.clear();
            info!(mesh = %self.name, removed, "removed degenerate faces");
            self.remove_unused_vertices();
        }
        removed
    }

    pub fn merge_duplicates(&mut self) -> usize {
        self.merge_duplicates_with(&HealingConfig::default())
    }

    /// Merge vertices closer than `merge_atol` on every coordinate
    ///
    /// Each group keeps the vertex with the smallest index, and the
    /// remaining vertices keep their relative order.
    pub fn merge_duplicates_with(&mut self, config: &HealingConfig) -> usize {
        let mut groups = duplicate_groups(&self.vertices, config.merge_atol);
        let merged = self.vertices.len() - groups.len();
        if merged == 0 {
            return 0;
        }

        for group in &mut groups {
            group.sort_unstable();
        }
        groups.sort_unstable_by_key(|group| group[0]);

        let mut new_ids = vec![0; self.vertices.len()];
        for (new_id, group) in groups.iter().enumerate() {
            for &old_id in group {
                new_ids[old_id] = new_id;
            }
        }

        self.vertices = groups.iter().map(|group| self.vertices[group[0]]).collect();
        for face in &mut self.faces {
            *face = face.map(|index| new_ids[index]);
        }
        self.cache.clear();
        info!(mesh = %self.name, merged, "merged duplicate vertices");
        merged
    }

    /// Put every three-vertex face in the `[a, b, c, a]` encoding
    ///
    /// Faces that collapse to fewer than three vertices or to a bow-tie are
    /// dropped along with the vertices they leave unused.
    pub fn heal_triangles(&mut self) -> usize {
        let mut changed = 0;
        let mut dropped = 0;
        let mut faces = Vec::with_capacity(self.faces.len());

        for face in &self.faces {
            if distinct_vertices(face) == 4 || (face[0] == face[3] && distinct_vertices(face) == 3) {
                faces.push(*face);
            } else if let Some(triangle) = canonical_triangle(face) {
                faces.push(triangle);
                changed += 1;
            } else {
                dropped += 1;
            }
        }

        if changed + dropped > 0 {
            self.faces = faces;
            self.cache.clear();
            info!(mesh = %self.name, changed, dropped, "healed triangles");
            if dropped > 0 {
                self.remove_unused_vertices();
            }
        }
        changed + dropped
    }

    /// Orient the faces of every connected shell consistently
    ///
    /// A breadth-first walk over shared edges propagates the orientation of a
    /// seed face; the orientation of the majority of each shell is kept.
    /// Closed shells pointing inward are then turned outward.
    pub fn heal_normals(&mut self) -> MeshResult<usize> {
        let flips = self.normal_flips()?;
        let flipped = flips.iter().filter(|&&flip| flip).count();
        if flipped > 0 {
            for (face, _) in self.faces.iter_mut().zip(&flips).filter(|(_, &flip)| flip) {
                *face = reversed(face);
            }
            self.cache.clear();
            info!(mesh = %self.name, flipped, "healed normals");
        }
        Ok(flipped)
    }

    fn normal_flips(&self) -> MeshResult<Vec<bool>> {
        let connectivity = self.connectivity()?;
        let face_faces = connectivity.face_faces();
        let mut flips = vec![false; self.faces.len()];
        let mut visited = vec![false; self.faces.len()];

        for seed in 0..self.faces.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut component = Vec::new();
            let mut queue = VecDeque::from([seed]);
            while let Some(face) = queue.pop_front() {
                component.push(face);
                for &neighbour in &face_faces[face] {
                    if visited[neighbour] {
                        continue;
                    }
                    visited[neighbour] = true;
                    let same = same_direction(&self.faces[face], &self.faces[neighbour]).unwrap_or(false);
                    flips[neighbour] = flips[face] ^ same;
                    queue.push_back(neighbour);
                }
            }

            let nb_flipped = component.iter().filter(|&&id| flips[id]).count();
            if 2 * nb_flipped > component.len() {
                for &id in &component {
                    flips[id] = !flips[id];
                }
            }

            let closed = component
                .iter()
                .all(|id| !connectivity.boundary_faces().contains(id));
            if closed && self.points_inward(&component, &flips) {
                warn!(mesh = %self.name, nb_faces = component.len(), "closed shell points inward, flipping it");
                for &id in &component {
                    flips[id] = !flips[id];
                }
            }
        }
        Ok(flips)
    }

    /// Sign test `Σ (z_c - z_max) A n_z < 0` on a shell, with the pending flips applied
    fn points_inward(&self, component: &[usize], flips: &[bool]) -> bool {
        let properties = self.faces_properties();
        let z_max = component
            .iter()
            .flat_map(|&id| polygon(&self.faces[id]))
            .map(|&vertex| self.vertices[vertex].z)
            .fold(f64::NEG_INFINITY, f64::max);

        let sum: f64 = component
            .iter()
            .map(|&id| {
                let sign = if flips[id] { -1.0 } else { 1.0 };
                (properties.centers[id].z - z_max) * properties.areas[id] * properties.normals[id].z * sign
            })
            .sum();
        sum < 0.0
    }

    pub fn heal_mesh(&mut self) -> MeshResult<HealingReport> {
        self.heal_mesh_with(&HealingConfig::default())
    }

    /// Run the healing steps in their fixed order
    ///
    /// The steps work on a copy that replaces the mesh only when every step
    /// succeeded: on error (a non-manifold edge found by the normal healing)
    /// the mesh is left as it was.
    pub fn heal_mesh_with(&mut self, config: &HealingConfig) -> MeshResult<HealingReport> {
        let mut healed = self.clone();
        let report = HealingReport {
            unused_vertices: healed.remove_unused_vertices(),
            degenerate_faces: healed.remove_degenerate_faces_with(config),
            merged_vertices: healed.merge_duplicates_with(config),
            healed_triangles: healed.heal_triangles(),
            flipped_normals: healed.heal_normals()?,
        };
        *self = healed;

        if report.is_noop() {
            info!(mesh = %self.name, "mesh is already healthy");
        }
        Ok(report)
    }
}
