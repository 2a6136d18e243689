// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh factory handing out unique default names

use super::{Face, Mesh};
use crate::error::MeshResult;
use nalgebra::Point3;

/// Creates meshes named `<prefix>_<n>` with a counter owned by the factory
#[derive(Debug, Clone)]
pub struct MeshFactory {
    prefix: String,
    next_id: usize,
}

impl Default for MeshFactory {
    fn default() -> Self {
        Self::new("mesh")
    }
}

impl MeshFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_id: 0,
        }
    }

    /// Next unused default name
    pub fn next_name(&mut self) -> String {
        let name = format!("{}_{}", self.prefix, self.next_id);
        self.next_id += 1;
        name
    }

    /// Create a mesh under the next default name
    pub fn create(&mut self, vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> MeshResult<Mesh> {
        let name = self.next_name();
        Mesh::new(name, vertices, faces)
    }

    /// Create a mesh, falling back to the next default name
    pub fn create_named(
        &mut self,
        name: Option<&str>,
        vertices: Vec<Point3<f64>>,
        faces: Vec<Face>,
    ) -> MeshResult<Mesh> {
        match name {
            Some(name) => Mesh::new(name, vertices, faces),
            None => self.create(vertices, faces),
        }
    }

    pub fn from_arrays(&mut self, name: Option<&str>, vertices: &[Vec<f64>], faces: &[Vec<f64>]) -> MeshResult<Mesh> {
        match name {
            Some(name) => Mesh::from_arrays(name, vertices, faces),
            None => {
                let name = self.next_name();
                Mesh::from_arrays(name, vertices, faces)
            }
        }
    }

    pub fn empty(&mut self) -> Mesh {
        Mesh::empty(self.next_name())
    }
}
