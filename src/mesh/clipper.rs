// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Clipping of a mesh by a plane
//!
//! The half-space on the side opposite to the plane normal is kept. Faces
//! crossing the plane are cut along it; the new vertices are projected
//! exactly onto the plane and shared between neighbouring faces.

use super::{edge_key, polygon, Face, Mesh};
use crate::config::ClippingConfig;
use crate::geometry::Plane;
use ahash::AHashMap;
use nalgebra::Point3;
use tracing::info;

/// Side of the clipping plane a vertex lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexPosition {
    /// Kept side
    Below,
    /// Within the vicinity tolerance of the plane
    On,
    /// Discarded side
    Above,
}

/// Classification of the faces of a mesh against a plane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacePartition {
    /// Faces entirely on the kept side, possibly touching the plane
    pub kept: Vec<usize>,
    /// Faces without any vertex strictly on the kept side
    pub discarded: Vec<usize>,
    /// Faces crossing the plane
    pub crown: Vec<usize>,
}

/// Clipper of one mesh by one plane
#[derive(Debug, Clone)]
pub struct MeshClipper<'a> {
    mesh: &'a Mesh,
    plane: Plane,
    vicinity_tol: f64,
}

impl<'a> MeshClipper<'a> {
    pub fn new(mesh: &'a Mesh, plane: Plane) -> Self {
        Self {
            mesh,
            plane,
            vicinity_tol: ClippingConfig::default().vicinity_tol,
        }
    }

    pub fn with_vicinity_tolerance(mut self, tolerance: f64) -> Self {
        self.vicinity_tol = tolerance;
        self
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn vertices_positions(&self) -> Vec<VertexPosition> {
        self.mesh
            .vertices()
            .iter()
            .map(|vertex| {
                let distance = self.plane.distance(vertex);
                if distance.abs() <= self.vicinity_tol {
                    VertexPosition::On
                } else if distance < 0.0 {
                    VertexPosition::Below
                } else {
                    VertexPosition::Above
                }
            })
            .collect()
    }

    fn classify(face: &Face, positions: &[VertexPosition]) -> FaceKind {
        let ids = polygon(face);
        let has = |position: VertexPosition| ids.iter().any(|&id| positions[id] == position);
        match (has(VertexPosition::Below), has(VertexPosition::Above)) {
            (false, _) => FaceKind::Discarded,
            (true, false) => FaceKind::Kept,
            (true, true) => FaceKind::Crown,
        }
    }

    pub fn partition(&self) -> FacePartition {
        let positions = self.vertices_positions();
        let mut partition = FacePartition::default();
        for (face_id, face) in self.mesh.faces().iter().enumerate() {
            match Self::classify(face, &positions) {
                FaceKind::Kept => partition.kept.push(face_id),
                FaceKind::Discarded => partition.discarded.push(face_id),
                FaceKind::Crown => partition.crown.push(face_id),
            }
        }
        partition
    }

    /// Clipped mesh, named `<name>_clipped`
    ///
    /// The vertex array keeps every original vertex, used or not, followed by
    /// the intersection vertices.
    pub fn clipped_mesh(&self) -> Mesh {
        let positions = self.vertices_positions();
        let mut vertices = self.mesh.vertices().to_vec();
        let mut intersections: AHashMap<(usize, usize), usize> = AHashMap::new();
        let mut faces = Vec::with_capacity(self.mesh.nb_faces());
        let mut nb_crown = 0;

        for face in self.mesh.faces() {
            match Self::classify(face, &positions) {
                FaceKind::Kept => faces.push(*face),
                FaceKind::Discarded => {}
                FaceKind::Crown => {
                    nb_crown += 1;
                    let clipped = self.clip_polygon(polygon(face), &positions, &mut vertices, &mut intersections);
                    emit_polygon(&clipped, &mut faces);
                }
            }
        }

        info!(
            mesh = %self.mesh.name(),
            nb_faces = faces.len(),
            nb_crown,
            nb_new_vertices = intersections.len(),
            "clipped mesh"
        );
        Mesh::from_parts_unchecked(format!("{}_clipped", self.mesh.name()), vertices, faces)
    }

    /// Cut one polygon, walking its edges once
    fn clip_polygon(
        &self,
        ids: &[usize],
        positions: &[VertexPosition],
        vertices: &mut Vec<Point3<f64>>,
        intersections: &mut AHashMap<(usize, usize), usize>,
    ) -> Vec<usize> {
        let mut clipped = Vec::with_capacity(ids.len() + 1);
        for k in 0..ids.len() {
            let (p, q) = (ids[k], ids[(k + 1) % ids.len()]);
            if positions[p] != VertexPosition::Above {
                clipped.push(p);
            }

            let crossing = matches!(
                (positions[p], positions[q]),
                (VertexPosition::Below, VertexPosition::Above) | (VertexPosition::Above, VertexPosition::Below)
            );
            if crossing {
                let id = *intersections.entry(edge_key(p, q)).or_insert_with(|| {
                    let (a, b) = (vertices[p], vertices[q]);
                    let (da, db) = (self.plane.distance(&a), self.plane.distance(&b));
                    let point = a + (b - a) * (da / (da - db));
                    vertices.push(self.plane.project(&point));
                    vertices.len() - 1
                });
                clipped.push(id);
            }
        }
        clipped.dedup();
        if clipped.len() > 1 && clipped.first() == clipped.last() {
            clipped.pop();
        }
        clipped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceKind {
    Kept,
    Discarded,
    Crown,
}

/// Store a clipped polygon as mesh faces
///
/// Polygons of more than four vertices, from faces crossing the plane several
/// times or cut at a corner, are split into a fan of quadrangles around their
/// first vertex, closed by a triangle when the count is odd.
fn emit_polygon(ids: &[usize], faces: &mut Vec<Face>) {
    let Some(&first) = ids.first() else {
        return;
    };

    let mut k = 1;
    while k + 2 < ids.len() {
        faces.push([first, ids[k], ids[k + 1], ids[k + 2]]);
        k += 2;
    }
    if k + 1 < ids.len() {
        faces.push([first, ids[k], ids[k + 1], first]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RigidTransform;
    use approx::assert_relative_eq;
    use nalgebra::{Unit, Vector3};

    fn vertical_square() -> Mesh {
        Mesh::new(
            "wall",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_horizontal_cut() {
        let mesh = vertical_square();
        let clipped = MeshClipper::new(&mesh, Plane::horizontal(0.25)).clipped_mesh();

        assert_eq!(clipped.name(), "wall_clipped");
        assert_eq!(clipped.nb_faces(), 1);
        assert_eq!(clipped.nb_vertices(), 6);
        assert_eq!(clipped.faces()[0], [0, 1, 4, 5]);
        assert_relative_eq!(clipped.vertices()[4], Point3::new(1.0, 0.0, 0.25), epsilon = 1e-12);
        assert_relative_eq!(clipped.surface_area(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_cut_gives_pentagon() {
        let mesh = vertical_square();
        let normal = Unit::new_normalize(Vector3::new(1.0, 0.0, 1.0));
        let plane = Plane::new(normal, 1.5 / 2.0_f64.sqrt());
        let clipped = MeshClipper::new(&mesh, plane).clipped_mesh();

        assert_eq!(clipped.faces(), &[[0, 1, 4, 5], [0, 5, 3, 0]]);
        assert_relative_eq!(clipped.vertices()[4], Point3::new(1.0, 0.0, 0.5), epsilon = 1e-12);
        assert_relative_eq!(clipped.vertices()[5], Point3::new(0.5, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(clipped.surface_area(), 0.875, epsilon = 1e-12);
    }

    #[test]
    fn test_emit_polygon_fans() {
        let mut faces = Vec::new();
        emit_polygon(&[0, 1], &mut faces);
        assert!(faces.is_empty());

        emit_polygon(&[0, 1, 2], &mut faces);
        emit_polygon(&[0, 1, 2, 3, 4, 5], &mut faces);
        emit_polygon(&[0, 1, 2, 3, 4, 5, 6], &mut faces);
        assert_eq!(
            faces,
            vec![
                [0, 1, 2, 0],
                [0, 1, 2, 3],
                [0, 3, 4, 5],
                [0, 1, 2, 3],
                [0, 3, 4, 5],
                [0, 5, 6, 0],
            ]
        );
    }

    #[test]
    fn test_saddle_quadrangle_keeps_its_wet_part() {
        let saddle = Mesh::new(
            "saddle",
            vec![
                Point3::new(0.0, 0.0, -1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 1.0, -1.0),
                Point3::new(0.0, 1.0, 1.0),
            ],
            vec![[0, 1, 2, 3]],
        )
        .unwrap();

        let partition = MeshClipper::new(&saddle, Plane::xoy()).partition();
        assert_eq!(partition.crown, vec![0]);

        let clipped = MeshClipper::new(&saddle, Plane::xoy()).clipped_mesh();
        assert_eq!(clipped.nb_vertices(), 8);
        assert_eq!(clipped.faces(), &[[0, 4, 5, 2], [0, 2, 6, 7]]);
        assert_relative_eq!(clipped.vertices()[4], Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(clipped.vertices()[7], Point3::new(0.0, 0.5, 0.0), epsilon = 1e-12);
        assert!(clipped.surface_area() > 0.0);

        let immersed = saddle.get_immersed_part(0.0, None).expect("half of the saddle is wet");
        assert_eq!(immersed.nb_faces(), 2);
        assert!(immersed.vertices().iter().all(|vertex| vertex.z <= 1e-12));
    }

    #[test]
    fn test_collapsed_face_does_not_close_on_itself() {
        // Edges (0, 1) and (1, 0) share their intersection vertex
        let mesh = Mesh::new(
            "collapsed",
            vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, -1.0),
                Point3::new(1.0, 1.0, -1.0),
            ],
            vec![[0, 1, 2, 1]],
        )
        .unwrap();

        let clipped = MeshClipper::new(&mesh, Plane::xoy()).clipped_mesh();
        assert_eq!(clipped.nb_vertices(), 4);
        assert_eq!(clipped.faces(), &[[3, 1, 2, 1]]);
    }

    #[test]
    fn test_partition() {
        let mut mesh = vertical_square();
        mesh.set_vertices(vec![
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ])
        .unwrap();
        let both = Mesh::join_meshes(&[&mesh, &mesh.translate_z(-5.0), &mesh.translate_z(5.0)], None);

        let partition = MeshClipper::new(&both, Plane::xoy()).partition();
        assert_eq!(partition.crown, vec![0]);
        assert_eq!(partition.kept, vec![1]);
        assert_eq!(partition.discarded, vec![2]);
    }

    #[test]
    fn test_face_on_plane_is_discarded() {
        let mesh = vertical_square().rotate_x(-std::f64::consts::FRAC_PI_2);
        let partition = MeshClipper::new(&mesh, Plane::xoy())
            .with_vicinity_tolerance(1e-9)
            .partition();

        assert_eq!(partition.discarded, vec![0]);
        assert!(partition.kept.is_empty());
    }
}
