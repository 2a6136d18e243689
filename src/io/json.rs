// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON mesh interchange
//!
//! `{ "name": "hull", "vertices": [[x, y, z], ...], "faces": [[i, j, k, l], ...] }`
//!
//! Face indices are read as numbers so that non-integral or negative values
//! reach the mesh validation and get a precise error.

use crate::mesh::{Mesh, MeshFactory};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mesh as found in a JSON document, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertices: Vec<Vec<f64>>,
    pub faces: Vec<Vec<f64>>,
}

impl RawMesh {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            name: Some(mesh.name().to_string()),
            vertices: mesh
                .vertices()
                .iter()
                .map(|v| vec![v.x, v.y, v.z])
                .collect(),
            faces: mesh
                .faces()
                .iter()
                .map(|face| face.iter().map(|&index| index as f64).collect())
                .collect(),
        }
    }

    /// Validate into a mesh, named by the factory when the document has no name
    pub fn into_mesh(self, factory: &mut MeshFactory) -> Result<Mesh> {
        let mesh = factory.from_arrays(self.name.as_deref(), &self.vertices, &self.faces)?;
        Ok(mesh)
    }
}

/// Written form, with integer indices
#[derive(Serialize)]
struct MeshDocument<'a> {
    name: &'a str,
    vertices: Vec<[f64; 3]>,
    faces: &'a [[usize; 4]],
}

pub fn parse_json(content: &str, factory: &mut MeshFactory) -> Result<Mesh> {
    let raw: RawMesh = serde_json::from_str(content).context("Invalid mesh document")?;
    raw.into_mesh(factory)
}

pub fn read_json(path: impl AsRef<Path>, factory: &mut MeshFactory) -> Result<Mesh> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;
    parse_json(&content, factory).with_context(|| format!("Failed to load mesh file: {}", path.display()))
}

pub fn to_json(mesh: &Mesh) -> Result<String> {
    let document = MeshDocument {
        name: mesh.name(),
        vertices: mesh.vertices().iter().map(|v| [v.x, v.y, v.z]).collect(),
        faces: mesh.faces(),
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize mesh")
}

pub fn write_json(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(mesh)?)
        .with_context(|| format!("Failed to write mesh file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use tempfile::tempdir;

    const TRIANGLE: &str = r#"{
        "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
        "faces": [[0, 1, 2, 0]]
    }"#;

    #[test]
    fn test_parse_unnamed_mesh() -> Result<()> {
        let mut factory = MeshFactory::new("imported");
        let mesh = parse_json(TRIANGLE, &mut factory)?;

        assert_eq!(mesh.name(), "imported_0");
        assert_eq!(mesh.nb_vertices(), 3);
        assert_eq!(mesh.nb_triangles(), 1);
        Ok(())
    }

    #[test]
    fn test_validation_error_is_kept() {
        let content = r#"{ "vertices": [[0, 0, 0]], "faces": [[0, 0.5, 0, 0]] }"#;
        let err = parse_json(content, &mut MeshFactory::default()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<MeshError>(),
            Some(&MeshError::NonIntegralIndex { face: 0, value: 0.5 })
        );
    }

    #[test]
    fn test_file_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("triangle.json");
        let mut factory = MeshFactory::default();
        let mesh = parse_json(TRIANGLE, &mut factory)?;

        write_json(&mesh, &path)?;
        let loaded = read_json(&path, &mut factory)?;

        assert_eq!(loaded.name(), mesh.name());
        assert_eq!(loaded.faces(), mesh.faces());
        assert_eq!(loaded, mesh);
        Ok(())
    }

    #[test]
    fn test_raw_mesh_from_mesh() -> Result<()> {
        let mesh = parse_json(TRIANGLE, &mut MeshFactory::default())?;
        let raw = RawMesh::from_mesh(&mesh);

        assert_eq!(raw.faces, vec![vec![0.0, 1.0, 2.0, 0.0]]);
        assert_eq!(raw.vertices[1], vec![1.0, 0.0, 0.0]);
        Ok(())
    }
}
