// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Surface mesh of triangles and quadrangles

use super::cache::{CacheKind, FaceKinds, MeshCache};
use super::{
    compute_faces_properties, edge_key, is_triangle, polygon, reversed, Connectivity, Face,
    FaceProperties, MeshClipper, SurfaceIntegrals,
};
use crate::config::ClippingConfig;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Axis, BoundingBox, Plane, RigidTransform};
use ahash::AHashSet;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Add;
use tracing::{debug, info, warn};

/// Surface mesh with lazily computed face properties
///
/// Derived data lives in a private cache that every mutation either updates
/// or invalidates, so accessors never return stale values.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(super) name: String,
    pub(super) vertices: Vec<Point3<f64>>,
    pub(super) faces: Vec<Face>,
    pub(super) cache: MeshCache,
}

/// Check that every face index refers to an existing vertex
fn check_faces(nb_vertices: usize, faces: &[Face]) -> MeshResult<()> {
    for (face_id, face) in faces.iter().enumerate() {
        if let Some(&index) = face.iter().find(|&&index| index >= nb_vertices) {
            return Err(MeshError::IndexOutOfRange {
                face: face_id,
                index,
                nb_vertices,
            });
        }
    }
    Ok(())
}

fn parse_vertex(row: usize, coordinates: &[f64]) -> MeshResult<Point3<f64>> {
    match coordinates {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(MeshError::VertexShape {
            row,
            len: coordinates.len(),
        }),
    }
}

fn parse_face(row: usize, indices: &[f64]) -> MeshResult<Face> {
    if indices.len() != 4 {
        return Err(MeshError::FaceShape {
            row,
            len: indices.len(),
        });
    }

    let mut face = [0; 4];
    for (slot, &value) in face.iter_mut().zip(indices) {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(MeshError::NonIntegralIndex { face: row, value });
        }
        if value < 0.0 {
            return Err(MeshError::NegativeIndex { face: row, value });
        }
        *slot = value as usize;
    }
    Ok(face)
}

/// Keep only the vertices referenced by `faces`, in ascending order of their
/// old index
///
/// Returns the new vertices, the remapped faces and the old index of every
/// new vertex.
pub(super) fn compact_vertices(
    vertices: &[Point3<f64>],
    faces: &[Face],
) -> (Vec<Point3<f64>>, Vec<Face>, Vec<usize>) {
    let mut used = vec![false; vertices.len()];
    for face in faces {
        for &index in face {
            used[index] = true;
        }
    }

    let old_ids: Vec<usize> = (0..vertices.len()).filter(|&id| used[id]).collect();
    let mut new_ids = vec![usize::MAX; vertices.len()];
    for (new_id, &old_id) in old_ids.iter().enumerate() {
        new_ids[old_id] = new_id;
    }

    let new_vertices = old_ids.iter().map(|&id| vertices[id]).collect();
    let new_faces = faces.iter().map(|face| face.map(|index| new_ids[index])).collect();
    (new_vertices, new_faces, old_ids)
}

impl Mesh {
    /// Create a mesh, checking that face indices refer to existing vertices
    pub fn new(name: impl Into<String>, vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> MeshResult<Self> {
        check_faces(vertices.len(), &faces)?;
        Ok(Self::from_parts_unchecked(name, vertices, faces))
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_parts_unchecked(name, Vec::new(), Vec::new())
    }

    /// Create a mesh from raw numeric rows
    ///
    /// Vertex rows must hold three coordinates and face rows four
    /// non-negative integral indices below the number of vertices.
    pub fn from_arrays(name: impl Into<String>, vertices: &[Vec<f64>], faces: &[Vec<f64>]) -> MeshResult<Self> {
        let vertices = vertices
            .iter()
            .enumerate()
            .map(|(row, coordinates)| parse_vertex(row, coordinates))
            .collect::<MeshResult<Vec<_>>>()?;
        let faces = faces
            .iter()
            .enumerate()
            .map(|(row, indices)| parse_face(row, indices))
            .collect::<MeshResult<Vec<_>>>()?;
        Self::new(name, vertices, faces)
    }

    pub(crate) fn from_parts_unchecked(name: impl Into<String>, vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            cache: MeshCache::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Deep copy, cached data included, optionally under another name
    pub fn copy(&self, name: Option<&str>) -> Self {
        let mut copy = self.clone();
        if let Some(name) = name {
            copy.name = name.to_string();
        }
        copy
    }

    pub fn nb_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn nb_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Replace the vertex array, keeping the faces
    pub fn set_vertices(&mut self, vertices: Vec<Point3<f64>>) -> MeshResult<()> {
        check_faces(vertices.len(), &self.faces)?;
        self.vertices = vertices;
        self.cache.clear();
        Ok(())
    }

    /// Replace the face array, keeping the vertices
    pub fn set_faces(&mut self, faces: Vec<Face>) -> MeshResult<()> {
        check_faces(self.vertices.len(), &faces)?;
        self.faces = faces;
        self.cache.clear();
        Ok(())
    }

    /// Vertex indices of a face: three for a triangle, four for a quadrangle
    pub fn get_face(&self, face_id: usize) -> MeshResult<&[usize]> {
        self.faces
            .get(face_id)
            .map(polygon)
            .ok_or(MeshError::FaceOutOfRange {
                face: face_id,
                nb_faces: self.faces.len(),
            })
    }

    pub fn is_triangle(&self, face_id: usize) -> MeshResult<bool> {
        self.faces
            .get(face_id)
            .map(is_triangle)
            .ok_or(MeshError::FaceOutOfRange {
                face: face_id,
                nb_faces: self.faces.len(),
            })
    }

    /// Whether the cached data of `kind` is currently valid
    pub fn is_cached(&self, kind: CacheKind) -> bool {
        self.cache.is_valid(kind)
    }

    // Face properties

    pub fn faces_properties(&self) -> &FaceProperties {
        self.cache.face_properties.get_or_init(|| {
            debug!(mesh = %self.name, nb_faces = self.faces.len(), "computing face properties");
            compute_faces_properties(&self.vertices, &self.faces)
        })
    }

    pub fn faces_areas(&self) -> &[f64] {
        &self.faces_properties().areas
    }

    pub fn faces_centers(&self) -> &[Point3<f64>] {
        &self.faces_properties().centers
    }

    pub fn faces_normals(&self) -> &[Vector3<f64>] {
        &self.faces_properties().normals
    }

    pub fn faces_radiuses(&self) -> &[f64] {
        &self.faces_properties().radiuses
    }

    fn face_kinds(&self) -> &FaceKinds {
        self.cache.face_kinds.get_or_init(|| {
            debug!(mesh = %self.name, "classifying faces");
            FaceKinds::compute(&self.faces)
        })
    }

    pub fn triangles_ids(&self) -> &[usize] {
        &self.face_kinds().triangles
    }

    pub fn quadrangles_ids(&self) -> &[usize] {
        &self.face_kinds().quadrangles
    }

    pub fn nb_triangles(&self) -> usize {
        self.triangles_ids().len()
    }

    pub fn nb_quadrangles(&self) -> usize {
        self.quadrangles_ids().len()
    }

    pub fn axis_aligned_bbox(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    pub fn squared_axis_aligned_bbox(&self) -> BoundingBox {
        self.axis_aligned_bbox().squared()
    }

    // Integrals

    pub fn surface_integrals(&self) -> &SurfaceIntegrals {
        self.cache.surface_integrals.get_or_init(|| {
            debug!(mesh = %self.name, nb_faces = self.faces.len(), "computing surface integrals");
            SurfaceIntegrals::compute(&self.vertices, &self.faces)
        })
    }

    /// Enclosed volume, meaningful for a closed surface with outward normals
    pub fn volume(&self) -> f64 {
        self.surface_integrals().volume(self.faces_normals())
    }

    /// Centroid of the enclosed volume, `None` when the volume vanishes
    pub fn center_of_volume(&self) -> Option<Point3<f64>> {
        let center = self.surface_integrals().center_of_volume(self.faces_normals());
        if center.is_none() {
            warn!(mesh = %self.name, "center of volume requested for a mesh without volume");
        }
        center
    }

    pub fn surface_area(&self) -> f64 {
        self.faces_areas().iter().sum()
    }

    /// Lengths of the distinct polygon edges
    fn edge_lengths(&self) -> Vec<f64> {
        let mut edges = AHashSet::new();
        for face in &self.faces {
            let ids = polygon(face);
            for k in 0..ids.len() {
                let (a, b) = (ids[k], ids[(k + 1) % ids.len()]);
                if a != b {
                    edges.insert(edge_key(a, b));
                }
            }
        }
        edges
            .into_iter()
            .map(|(a, b)| (self.vertices[a] - self.vertices[b]).norm())
            .collect()
    }

    pub fn min_edge_length(&self) -> Option<f64> {
        self.edge_lengths().into_iter().reduce(f64::min)
    }

    pub fn max_edge_length(&self) -> Option<f64> {
        self.edge_lengths().into_iter().reduce(f64::max)
    }

    pub fn mean_edge_length(&self) -> Option<f64> {
        let lengths = self.edge_lengths();
        if lengths.is_empty() {
            return None;
        }
        Some(lengths.iter().sum::<f64>() / lengths.len() as f64)
    }

    fn check_field_length(&self, len: usize) -> MeshResult<()> {
        if len != self.faces.len() {
            return Err(MeshError::FieldLength {
                len,
                nb_faces: self.faces.len(),
            });
        }
        Ok(())
    }

    /// Force of a per-face pressure field, `Σ p A n`
    pub fn integrate_pressure(&self, pressure: &[f64]) -> MeshResult<Vector3<f64>> {
        self.check_field_length(pressure.len())?;
        let properties = self.faces_properties();
        Ok(pressure
            .iter()
            .zip(&properties.areas)
            .zip(&properties.normals)
            .fold(Vector3::zeros(), |force, ((p, area), normal)| {
                force + normal * (p * area)
            }))
    }

    /// Flux of a per-face vector field through the surface, `Σ (v · n) A`
    pub fn integrate_flux(&self, field: &[Vector3<f64>]) -> MeshResult<f64> {
        self.check_field_length(field.len())?;
        let properties = self.faces_properties();
        Ok(field
            .iter()
            .zip(&properties.areas)
            .zip(&properties.normals)
            .map(|((value, area), normal)| value.dot(normal) * area)
            .sum())
    }

    // Connectivity

    pub fn connectivity(&self) -> MeshResult<&Connectivity> {
        self.cache
            .connectivity
            .get_or_init(|| {
                debug!(mesh = %self.name, nb_faces = self.faces.len(), "building connectivity");
                Connectivity::build(self.vertices.len(), &self.faces)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn vertex_vertices(&self) -> MeshResult<&[BTreeSet<usize>]> {
        Ok(self.connectivity()?.vertex_vertices())
    }

    pub fn vertex_faces(&self) -> MeshResult<&[BTreeSet<usize>]> {
        Ok(self.connectivity()?.vertex_faces())
    }

    pub fn face_faces(&self) -> MeshResult<&[BTreeSet<usize>]> {
        Ok(self.connectivity()?.face_faces())
    }

    /// Closed boundary loops, first vertex repeated at the end
    pub fn boundaries(&self) -> MeshResult<&[Vec<usize>]> {
        self.connectivity()?.boundaries()
    }

    pub fn nb_boundaries(&self) -> MeshResult<usize> {
        self.connectivity()?.nb_boundaries()
    }

    // Topological edits

    /// Reverse the winding of every face
    pub fn flip_normals_in_place(&mut self) -> &mut Self {
        for face in &mut self.faces {
            *face = reversed(face);
        }
        if let Some(properties) = self.cache.face_properties.get_mut() {
            for normal in &mut properties.normals {
                *normal = -*normal;
            }
        }
        self.cache.invalidate(CacheKind::SurfaceIntegrals);
        self.cache.invalidate(CacheKind::Connectivity);
        self
    }

    pub fn flip_normals(&self) -> Self {
        let mut flipped = self.clone();
        flipped.flip_normals_in_place();
        flipped
    }

    /// Split every quadrangle `(v0 v1 v2 v3)` into `(v0 v1 v2)`, written in
    /// place, and `(v0 v2 v3)`, appended after the existing faces
    ///
    /// Returns the number of split quadrangles.
    pub fn triangulate_quadrangles_in_place(&mut self) -> usize {
        let quadrangles = self.quadrangles_ids().to_vec();
        if quadrangles.is_empty() {
            return 0;
        }

        self.faces.reserve(quadrangles.len());
        for &id in &quadrangles {
            let [v0, v1, v2, v3] = self.faces[id];
            self.faces[id] = [v0, v1, v2, v0];
            self.faces.push([v0, v2, v3, v0]);
        }
        self.cache.clear();

        info!(
            mesh = %self.name,
            nb_quadrangles = quadrangles.len(),
            nb_faces = self.faces.len(),
            "triangulated quadrangles"
        );
        quadrangles.len()
    }

    pub fn triangulate_quadrangles(&self) -> Self {
        let mut triangulated = self.clone();
        triangulated.triangulate_quadrangles_in_place();
        triangulated
    }

    /// New mesh made of the given faces and the vertices they use
    pub fn extract_faces(&self, face_ids: &[usize]) -> MeshResult<Self> {
        self.extract_faces_with_index(face_ids).map(|(mesh, _)| mesh)
    }

    /// Like [`Mesh::extract_faces`], also returning the old index of every
    /// vertex of the extracted mesh
    pub fn extract_faces_with_index(&self, face_ids: &[usize]) -> MeshResult<(Self, Vec<usize>)> {
        let faces = face_ids
            .iter()
            .map(|&id| {
                self.faces.get(id).copied().ok_or(MeshError::FaceOutOfRange {
                    face: id,
                    nb_faces: self.faces.len(),
                })
            })
            .collect::<MeshResult<Vec<_>>>()?;

        let (vertices, faces, old_ids) = compact_vertices(&self.vertices, &faces);
        let name = format!("mesh_extracted_from_{}", self.name);
        Ok((Self::from_parts_unchecked(name, vertices, faces), old_ids))
    }

    /// Concatenate meshes, named `a+b+…` unless a name is given
    pub fn join_meshes(meshes: &[&Mesh], name: Option<&str>) -> Self {
        let name = name.map(str::to_string).unwrap_or_else(|| {
            meshes
                .iter()
                .map(|mesh| mesh.name.as_str())
                .collect::<Vec<_>>()
                .join("+")
        });

        let mut vertices = Vec::with_capacity(meshes.iter().map(|m| m.nb_vertices()).sum());
        let mut faces = Vec::with_capacity(meshes.iter().map(|m| m.nb_faces()).sum());
        for mesh in meshes {
            let offset = vertices.len();
            vertices.extend_from_slice(&mesh.vertices);
            faces.extend(mesh.faces.iter().map(|face| face.map(|index| index + offset)));
        }

        Self::from_parts_unchecked(name, vertices, faces)
    }

    // Immersion

    /// Part of the mesh below the free surface and above the sea bottom
    ///
    /// Returns `None` when no face lies in the fluid.
    pub fn get_immersed_part(&self, free_surface: f64, sea_bottom: Option<f64>) -> Option<Self> {
        self.get_immersed_part_with(free_surface, sea_bottom, &ClippingConfig::default())
    }

    pub fn get_immersed_part_with(
        &self,
        free_surface: f64,
        sea_bottom: Option<f64>,
        config: &ClippingConfig,
    ) -> Option<Self> {
        let sea_bottom = sea_bottom.filter(|z| z.is_finite());
        let name = format!("{}_clipped", self.name);
        if self.faces.is_empty() {
            return None;
        }

        let bbox = self.axis_aligned_bbox();
        if bbox.min.z > free_surface || sea_bottom.is_some_and(|z| bbox.max.z < z) {
            info!(mesh = %self.name, "mesh is out of the fluid");
            return None;
        }
        if bbox.max.z < free_surface && sea_bottom.map_or(true, |z| bbox.min.z > z) {
            debug!(mesh = %self.name, "mesh is fully immersed");
            return Some(self.copy(Some(&name)));
        }

        let mut clipped = MeshClipper::new(self, Plane::horizontal(free_surface))
            .with_vicinity_tolerance(config.vicinity_tol)
            .clipped_mesh();
        if let Some(z) = sea_bottom {
            clipped = MeshClipper::new(&clipped, Plane::new(-Vector3::z_axis(), -z))
                .with_vicinity_tolerance(config.vicinity_tol)
                .clipped_mesh();
        }

        clipped.remove_unused_vertices();
        if clipped.faces.is_empty() {
            info!(mesh = %self.name, "no face left after clipping");
            return None;
        }
        clipped.set_name(name);
        Some(clipped)
    }
}

impl RigidTransform for Mesh {
    fn translate_in_place(&mut self, vector: &Vector3<f64>) -> &mut Self {
        for vertex in &mut self.vertices {
            *vertex += vector;
        }
        if let Some(properties) = self.cache.face_properties.get_mut() {
            for center in &mut properties.centers {
                *center += vector;
            }
        }
        self.cache.invalidate(CacheKind::SurfaceIntegrals);
        self
    }

    fn rotate_in_place(&mut self, axis: &Axis, angle: f64) -> &mut Self {
        let rotation = axis.rotation(angle);
        let origin = axis.point();
        for vertex in &mut self.vertices {
            *vertex = origin + rotation * (*vertex - origin);
        }
        if let Some(properties) = self.cache.face_properties.get_mut() {
            for center in &mut properties.centers {
                *center = origin + rotation * (*center - origin);
            }
            for normal in &mut properties.normals {
                *normal = rotation * *normal;
            }
        }
        self.cache.invalidate(CacheKind::SurfaceIntegrals);
        self
    }

    fn mirror_in_place(&mut self, plane: &Plane) -> &mut Self {
        for vertex in &mut self.vertices {
            *vertex = plane.reflect_point(vertex);
        }
        for face in &mut self.faces {
            *face = reversed(face);
        }
        self.cache.clear();
        self
    }
}

impl Add for &Mesh {
    type Output = Mesh;

    fn add(self, other: &Mesh) -> Mesh {
        Mesh::join_meshes(&[self, other], None)
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh(nb_vertices={}, nb_faces={}, name={})",
            self.nb_vertices(),
            self.nb_faces(),
            self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn square() -> Mesh {
        Mesh::new(
            "square",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range_index() {
        let err = Mesh::new("bad", vec![Point3::origin()], vec![[0, 1, 0, 0]]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                face: 0,
                index: 1,
                nb_vertices: 1
            }
        );
    }

    #[test]
    fn test_from_arrays_validation() {
        let vertices = vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];

        let err = Mesh::from_arrays("m", &[vec![0.0, 0.0]], &[]).unwrap_err();
        assert_eq!(err, MeshError::VertexShape { row: 0, len: 2 });

        let err = Mesh::from_arrays("m", &vertices, &[vec![0.0, 1.0, 2.0]]).unwrap_err();
        assert_eq!(err, MeshError::FaceShape { row: 0, len: 3 });

        let err = Mesh::from_arrays("m", &vertices, &[vec![0.0, 1.5, 2.0, 0.0]]).unwrap_err();
        assert_eq!(err, MeshError::NonIntegralIndex { face: 0, value: 1.5 });

        let err = Mesh::from_arrays("m", &vertices, &[vec![0.0, -1.0, 2.0, 0.0]]).unwrap_err();
        assert_eq!(err, MeshError::NegativeIndex { face: 0, value: -1.0 });

        let mesh = Mesh::from_arrays("m", &vertices, &[vec![0.0, 1.0, 2.0, 0.0]]).unwrap();
        assert_eq!(mesh.get_face(0).unwrap(), &[0, 1, 2]);
    }

    #[test]
    fn test_properties_are_cached() {
        let mesh = square();
        assert!(!mesh.is_cached(CacheKind::FaceProperties));

        assert_relative_eq!(mesh.faces_areas()[0], 1.0, epsilon = 1e-12);
        assert!(mesh.is_cached(CacheKind::FaceProperties));
        assert_relative_eq!(mesh.faces_normals()[0], Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_translate_updates_cached_centers() {
        let mut mesh = square();
        mesh.faces_centers();
        mesh.surface_integrals();

        mesh.translate_in_place(&Vector3::new(1.0, 2.0, 3.0));

        assert!(mesh.is_cached(CacheKind::FaceProperties));
        assert!(!mesh.is_cached(CacheKind::SurfaceIntegrals));
        assert_relative_eq!(mesh.faces_centers()[0], Point3::new(1.5, 2.5, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_updates_cached_normals() {
        let mut mesh = square();
        mesh.faces_normals();

        mesh.rotate_x_in_place(FRAC_PI_2);

        let fresh = compute_faces_properties(mesh.vertices(), mesh.faces());
        assert_relative_eq!(mesh.faces_normals()[0], -Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(mesh.faces_normals()[0], fresh.normals[0], epsilon = 1e-12);
        assert_relative_eq!(mesh.faces_centers()[0], fresh.centers[0], epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_clears_caches() {
        let mut mesh = square();
        mesh.faces_normals();

        mesh.mirror_in_place(&Plane::xoy());

        assert!(!mesh.is_cached(CacheKind::FaceProperties));
        assert_eq!(mesh.faces()[0], [0, 3, 2, 1]);
        assert_relative_eq!(mesh.faces_normals()[0], -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_flip_normals() {
        let mesh = square();
        mesh.faces_normals();

        let flipped = mesh.flip_normals();
        assert_relative_eq!(flipped.faces_normals()[0], -Vector3::z(), epsilon = 1e-12);
        assert_eq!(flipped.flip_normals().faces(), mesh.faces());
    }

    #[test]
    fn test_triangulate_quadrangles() {
        let mut mesh = square();
        assert_eq!(mesh.triangulate_quadrangles_in_place(), 1);

        assert_eq!(mesh.faces(), &[[0, 1, 2, 0], [0, 2, 3, 0]]);
        assert_eq!(mesh.nb_triangles(), 2);
        assert_eq!(mesh.nb_quadrangles(), 0);
        assert_relative_eq!(mesh.surface_area(), 1.0, epsilon = 1e-12);
        assert_eq!(mesh.triangulate_quadrangles_in_place(), 0);
    }

    #[test]
    fn test_extract_faces_with_index() {
        let mut mesh = square();
        mesh.triangulate_quadrangles_in_place();

        let (extracted, old_ids) = mesh.extract_faces_with_index(&[1]).unwrap();
        assert_eq!(extracted.name(), "mesh_extracted_from_square");
        assert_eq!(old_ids, vec![0, 2, 3]);
        assert_eq!(extracted.faces(), &[[0, 1, 2, 0]]);

        assert_eq!(
            mesh.extract_faces(&[5]).unwrap_err(),
            MeshError::FaceOutOfRange { face: 5, nb_faces: 2 }
        );
    }

    #[test]
    fn test_join_meshes() {
        let a = square();
        let mut b = square().translate_z(1.0);
        b.set_name("top");

        let joined = &a + &b;
        assert_eq!(joined.name(), "square+top");
        assert_eq!(joined.nb_vertices(), 8);
        assert_eq!(joined.faces()[1], [4, 5, 6, 7]);
    }

    #[test]
    fn test_edge_lengths() {
        let mesh = square();
        assert_relative_eq!(mesh.min_edge_length().unwrap(), 1.0);
        assert_relative_eq!(mesh.max_edge_length().unwrap(), 1.0);
        assert!(Mesh::empty("empty").mean_edge_length().is_none());
    }

    #[test]
    fn test_integrate_fields() {
        let mesh = square();
        let force = mesh.integrate_pressure(&[2.0]).unwrap();
        assert_relative_eq!(force, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);

        let flux = mesh.integrate_flux(&[Vector3::new(1.0, 1.0, 3.0)]).unwrap();
        assert_relative_eq!(flux, 3.0, epsilon = 1e-12);

        assert_eq!(
            mesh.integrate_pressure(&[1.0, 2.0]).unwrap_err(),
            MeshError::FieldLength { len: 2, nb_faces: 1 }
        );
    }

    #[test]
    fn test_display_and_bbox() {
        let mesh = square();
        assert_eq!(mesh.to_string(), "Mesh(nb_vertices=4, nb_faces=1, name=square)");
        assert_eq!(mesh.axis_aligned_bbox().to_array(), [0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(Mesh::empty("e").axis_aligned_bbox(), BoundingBox::zero());
    }
}
