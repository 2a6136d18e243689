// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hullmesh
//!
//! Surface meshes of floating and submerged bodies for boundary-element
//! hydrodynamics: lazily cached face properties, surface integrals,
//! connectivity, healing, rigid transformations and clipping of the
//! immersed part.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;

pub use config::{ClippingConfig, HealingConfig, MeshConfig};
pub use error::{MeshError, MeshResult};
pub use geometry::{Axis, BoundingBox, Plane, RigidTransform};
pub use mesh::{CacheKind, Connectivity, Face, HealingReport, Mesh, MeshClipper, MeshFactory};

use anyhow::Result;

/// Load a JSON mesh, naming it `mesh_0` when the document has no name
pub fn load_mesh(path: &str) -> Result<Mesh> {
    io::read_json(path, &mut MeshFactory::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_mesh() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"{{"vertices": [[0,0,0],[1,0,0],[1,1,0],[0,1,0]], "faces": [[0,1,2,3]]}}"#
        )?;

        let mesh = load_mesh(file.path().to_str().unwrap())?;
        assert_eq!(mesh.name(), "mesh_0");
        assert_eq!(mesh.nb_quadrangles(), 1);
        Ok(())
    }
}
