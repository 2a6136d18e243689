// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh analytics and statistics

use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Mesh statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    pub name: String,
    pub nb_vertices: usize,
    pub nb_faces: usize,
    pub nb_triangles: usize,
    pub nb_quadrangles: usize,
    /// Enclosed volume, signed by the normal orientation
    pub volume: f64,
    pub surface_area: f64,
    /// Center of the enclosed volume (center of buoyancy of a wetted hull)
    pub center_of_volume: Option<[f64; 3]>,
    /// Bounding box [xmin, xmax, ymin, ymax, zmin, zmax]
    pub bbox: [f64; 6],
    pub min_edge_length: Option<f64>,
    pub max_edge_length: Option<f64>,
    pub mean_edge_length: Option<f64>,
    /// Number of boundary loops, `None` when they cannot be extracted
    pub nb_boundaries: Option<usize>,
    /// Connected groups of faces, `None` when the connectivity is broken
    pub nb_shells: Option<usize>,
    pub is_closed: bool,
}

impl MeshStats {
    /// Pretty print statistics
    pub fn print(&self) {
        let optional = |value: Option<f64>| match value {
            Some(value) => format!("{value:>10.4}"),
            None => format!("{:>10}", "-"),
        };
        let count = |value: Option<usize>| match value {
            Some(value) => format!("{value:>10}"),
            None => format!("{:>10}", "-"),
        };

        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║ MESH {:<52}║", self.name);
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Volume:          {:>10.4}                              ║", self.volume);
        println!("║ Surface Area:    {:>10.4}                              ║", self.surface_area);
        match self.center_of_volume {
            Some([x, y, z]) => println!("║ Center of Volume: ({x:>8.3}, {y:>8.3}, {z:>8.3})            ║"),
            None => println!("║ Center of Volume:         -                              ║"),
        }
        println!("║                                                          ║");
        println!("║ Bounding Box:                                            ║");
        println!(
            "║   Min: ({:>8.3}, {:>8.3}, {:>8.3})                     ║",
            self.bbox[0], self.bbox[2], self.bbox[4]
        );
        println!(
            "║   Max: ({:>8.3}, {:>8.3}, {:>8.3})                     ║",
            self.bbox[1], self.bbox[3], self.bbox[5]
        );
        println!("║                                                          ║");
        println!("║ Vertices:        {:>10}                              ║", self.nb_vertices);
        println!("║ Faces:           {:>10}                              ║", self.nb_faces);
        println!("║   Triangles:     {:>10}                              ║", self.nb_triangles);
        println!("║   Quadrangles:   {:>10}                              ║", self.nb_quadrangles);
        println!("║ Edge Length:                                             ║");
        println!("║   Min:           {}                              ║", optional(self.min_edge_length));
        println!("║   Max:           {}                              ║", optional(self.max_edge_length));
        println!("║   Mean:          {}                              ║", optional(self.mean_edge_length));
        println!("║ Boundaries:      {}                              ║", count(self.nb_boundaries));
        println!("║ Shells:          {}                              ║", count(self.nb_shells));
        println!(
            "║ Closed:          {:>10}                              ║",
            if self.is_closed { "Yes" } else { "No" }
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze a mesh
///
/// Topology figures are left empty when the connectivity cannot be built.
pub fn analyze(mesh: &Mesh) -> MeshStats {
    let connectivity = mesh.connectivity().ok();

    MeshStats {
        name: mesh.name().to_string(),
        nb_vertices: mesh.nb_vertices(),
        nb_faces: mesh.nb_faces(),
        nb_triangles: mesh.nb_triangles(),
        nb_quadrangles: mesh.nb_quadrangles(),
        volume: mesh.volume(),
        surface_area: mesh.surface_area(),
        center_of_volume: mesh.center_of_volume().map(|c| [c.x, c.y, c.z]),
        bbox: mesh.axis_aligned_bbox().to_array(),
        min_edge_length: mesh.min_edge_length(),
        max_edge_length: mesh.max_edge_length(),
        mean_edge_length: mesh.mean_edge_length(),
        nb_boundaries: connectivity.and_then(|c| c.nb_boundaries().ok()),
        nb_shells: connectivity.map(|c| c.face_components().len()),
        is_closed: connectivity.is_some_and(|c| c.is_closed()) && mesh.nb_faces() > 0,
    }
}
