// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Healing pipeline tests

mod common;

use anyhow::Result;
use approx::assert_relative_eq;
use common::{exploded_cube, quad_sphere, triangle_cube, unit_cube};
use hullmesh::{HealingConfig, HealingReport, Mesh, RigidTransform};
use nalgebra::{Point3, Vector3};

#[test]
fn test_healthy_mesh_is_untouched() -> Result<()> {
    for mut mesh in [unit_cube()?, triangle_cube()?, quad_sphere(1.0, 12, 24)?] {
        let before = mesh.clone();
        let report = mesh.heal_mesh()?;

        assert!(report.is_noop(), "{report:?}");
        assert_eq!(mesh.vertices(), before.vertices());
        assert_eq!(mesh.faces(), before.faces());
    }
    Ok(())
}

#[test]
fn test_exploded_cube_is_welded() -> Result<()> {
    let mut mesh = exploded_cube()?;
    assert_eq!(mesh.nb_vertices(), 24);
    assert!(mesh.connectivity()?.nb_boundary_edges() > 0);

    let report = mesh.heal_mesh()?;

    assert_eq!(report.merged_vertices, 16);
    assert_eq!(mesh.nb_vertices(), 8);
    assert!(mesh.connectivity()?.is_closed());
    assert_eq!(mesh, unit_cube()?);
    Ok(())
}

#[test]
fn test_healing_is_idempotent() -> Result<()> {
    let mut mesh = exploded_cube()?.flip_normals();
    let mut vertices = mesh.vertices().to_vec();
    vertices.push(Point3::new(9.0, 9.0, 9.0));
    mesh.set_vertices(vertices)?;

    let first = mesh.heal_mesh()?;
    assert!(!first.is_noop());
    assert_eq!(first.unused_vertices, 1);

    let healed = mesh.clone();
    let second = mesh.heal_mesh()?;
    assert_eq!(second, HealingReport::default());
    assert_eq!(mesh.vertices(), healed.vertices());
    assert_eq!(mesh.faces(), healed.faces());
    Ok(())
}

#[test]
fn test_inward_cube_is_turned_outward() -> Result<()> {
    let mut mesh = triangle_cube()?.flip_normals();
    assert_relative_eq!(mesh.volume(), -1.0, epsilon = 1e-12);

    let flipped = mesh.heal_normals()?;

    assert_eq!(flipped, 12);
    assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_single_inconsistent_face() -> Result<()> {
    let mut faces = common::cube_faces();
    faces[3].reverse();
    let mut mesh = Mesh::new("cube", common::cube_vertices(), faces)?;

    assert_eq!(mesh.heal_normals()?, 1);
    assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.faces_normals()[3], Vector3::y(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_two_shells_are_healed_separately() -> Result<()> {
    let left = unit_cube()?;
    let right = unit_cube()?.translate_x(3.0).flip_normals();
    let mut mesh = &left + &right;

    assert_eq!(mesh.connectivity()?.face_components().len(), 2);
    assert_eq!(mesh.heal_normals()?, 6);
    assert_relative_eq!(mesh.volume(), 2.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_degenerate_faces_and_triangles() -> Result<()> {
    let mut vertices = common::cube_vertices();
    vertices.push(Point3::new(0.5, 0.0, 0.0));
    let mut faces = common::cube_faces();
    // Sliver along the bottom front edge
    faces.push([0, 8, 1, 0]);
    let mut mesh = Mesh::new("cube", vertices, faces)?;

    let report = mesh.heal_mesh()?;
    assert_eq!(report.degenerate_faces, 1);
    assert_eq!(mesh.nb_vertices(), 8);
    assert_eq!(mesh, unit_cube()?);
    Ok(())
}

#[test]
fn test_collapsed_quadrangles_become_triangles() -> Result<()> {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(1.0, 1e-12, 0.0),
    ];
    let mut mesh = Mesh::new("tri", vertices, vec![[0, 1, 3, 2]])?;

    let report = mesh.heal_mesh_with(&HealingConfig {
        merge_atol: 1e-9,
        ..HealingConfig::default()
    })?;

    assert_eq!(report.merged_vertices, 1);
    assert_eq!(report.healed_triangles, 1);
    assert_eq!(mesh.faces(), &[[1, 2, 0, 1]]);
    assert_eq!(mesh.nb_triangles(), 1);
    Ok(())
}
