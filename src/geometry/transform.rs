// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rigid transformations shared by meshes, planes and axes
//!
//! Implementors provide the three in-place operations. The copying
//! variants clone the object and run the in-place code on the clone, so
//! both entry points share a single implementation.

use super::{Axis, Plane};
use nalgebra::Vector3;

pub trait RigidTransform: Clone {
    fn translate_in_place(&mut self, vector: &Vector3<f64>) -> &mut Self;

    /// Rotate by `angle` radians around the axis line
    fn rotate_in_place(&mut self, axis: &Axis, angle: f64) -> &mut Self;

    fn mirror_in_place(&mut self, plane: &Plane) -> &mut Self;

    fn translate(&self, vector: &Vector3<f64>) -> Self {
        let mut moved = self.clone();
        moved.translate_in_place(vector);
        moved
    }

    fn rotate(&self, axis: &Axis, angle: f64) -> Self {
        let mut moved = self.clone();
        moved.rotate_in_place(axis, angle);
        moved
    }

    fn mirror(&self, plane: &Plane) -> Self {
        let mut moved = self.clone();
        moved.mirror_in_place(plane);
        moved
    }

    fn translate_x_in_place(&mut self, dx: f64) -> &mut Self {
        self.translate_in_place(&Vector3::new(dx, 0.0, 0.0))
    }

    fn translate_y_in_place(&mut self, dy: f64) -> &mut Self {
        self.translate_in_place(&Vector3::new(0.0, dy, 0.0))
    }

    fn translate_z_in_place(&mut self, dz: f64) -> &mut Self {
        self.translate_in_place(&Vector3::new(0.0, 0.0, dz))
    }

    fn translate_x(&self, dx: f64) -> Self {
        self.translate(&Vector3::new(dx, 0.0, 0.0))
    }

    fn translate_y(&self, dy: f64) -> Self {
        self.translate(&Vector3::new(0.0, dy, 0.0))
    }

    fn translate_z(&self, dz: f64) -> Self {
        self.translate(&Vector3::new(0.0, 0.0, dz))
    }

    fn rotate_x_in_place(&mut self, angle: f64) -> &mut Self {
        self.rotate_in_place(&Axis::ox(), angle)
    }

    fn rotate_y_in_place(&mut self, angle: f64) -> &mut Self {
        self.rotate_in_place(&Axis::oy(), angle)
    }

    fn rotate_z_in_place(&mut self, angle: f64) -> &mut Self {
        self.rotate_in_place(&Axis::oz(), angle)
    }

    fn rotate_x(&self, angle: f64) -> Self {
        self.rotate(&Axis::ox(), angle)
    }

    fn rotate_y(&self, angle: f64) -> Self {
        self.rotate(&Axis::oy(), angle)
    }

    fn rotate_z(&self, angle: f64) -> Self {
        self.rotate(&Axis::oz(), angle)
    }
}
