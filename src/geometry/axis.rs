// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented lines used as rotation axes

use super::{Plane, RigidTransform};
use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Oriented line through `point` along `vector`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    vector: Unit<Vector3<f64>>,
    point: Point3<f64>,
}

impl Axis {
    pub fn new(vector: Unit<Vector3<f64>>, point: Point3<f64>) -> Self {
        Self { vector, point }
    }

    pub fn ox() -> Self {
        Self::new(Vector3::x_axis(), Point3::origin())
    }

    pub fn oy() -> Self {
        Self::new(Vector3::y_axis(), Point3::origin())
    }

    pub fn oz() -> Self {
        Self::new(Vector3::z_axis(), Point3::origin())
    }

    pub fn vector(&self) -> Vector3<f64> {
        self.vector.into_inner()
    }

    pub fn point(&self) -> Point3<f64> {
        self.point
    }

    /// Right-handed rotation of `angle` radians around the axis direction
    pub fn rotation(&self, angle: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&self.vector, angle)
    }

    pub fn rotation_matrix(&self, angle: f64) -> Matrix3<f64> {
        self.rotation(angle).into_inner()
    }

    /// Rotate a point around the axis line
    pub fn rotate_point(&self, point: &Point3<f64>, angle: f64) -> Point3<f64> {
        self.point + self.rotation(angle) * (point - self.point)
    }

    /// Rotate a free vector (the axis position does not matter)
    pub fn rotate_vector(&self, vector: &Vector3<f64>, angle: f64) -> Vector3<f64> {
        self.rotation(angle) * vector
    }

    /// Whether `point` lies on the axis line within `tolerance`
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        (point - self.point).cross(&self.vector()).norm() <= tolerance
    }
}

impl RigidTransform for Axis {
    fn translate_in_place(&mut self, vector: &Vector3<f64>) -> &mut Self {
        self.point += *vector;
        self
    }

    fn rotate_in_place(&mut self, axis: &Axis, angle: f64) -> &mut Self {
        self.point = axis.rotate_point(&self.point, angle);
        self.vector = Unit::new_normalize(axis.rotate_vector(&self.vector, angle));
        self
    }

    fn mirror_in_place(&mut self, plane: &Plane) -> &mut Self {
        self.point = plane.reflect_point(&self.point);
        self.vector = Unit::new_normalize(plane.reflect_vector(&self.vector));
        self
    }
}
