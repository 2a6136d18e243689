// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planes in point-normal-offset form

use super::{Axis, RigidTransform};
use nalgebra::{Point3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Plane of equation `normal · x = c`
///
/// The normal is always unit length, so `c` is the signed distance from the
/// origin to the plane along the normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Unit<Vector3<f64>>,
    c: f64,
}

impl Plane {
    pub fn new(normal: Unit<Vector3<f64>>, c: f64) -> Self {
        Self { normal, c }
    }

    /// Plane with the given normal passing through `point`
    pub fn from_point(normal: Unit<Vector3<f64>>, point: &Point3<f64>) -> Self {
        let c = normal.dot(&point.coords);
        Self { normal, c }
    }

    /// Horizontal plane `z = elevation` with an upward normal
    pub fn horizontal(elevation: f64) -> Self {
        Self::new(Vector3::z_axis(), elevation)
    }

    /// The `z = 0` plane
    pub fn xoy() -> Self {
        Self::new(Vector3::z_axis(), 0.0)
    }

    /// The `x = 0` plane
    pub fn yoz() -> Self {
        Self::new(Vector3::x_axis(), 0.0)
    }

    /// The `y = 0` plane
    pub fn xoz() -> Self {
        Self::new(Vector3::y_axis(), 0.0)
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal.into_inner()
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Signed distance of a point, positive on the side the normal points to
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.c
    }

    pub fn distances(&self, points: &[Point3<f64>]) -> Vec<f64> {
        points.iter().map(|p| self.distance(p)).collect()
    }

    /// Orthogonal projection of a point onto the plane
    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal.into_inner() * self.distance(point)
    }

    /// Mirror image of a point
    pub fn reflect_point(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal.into_inner() * (2.0 * self.distance(point))
    }

    /// Mirror image of a free vector
    pub fn reflect_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        vector - self.normal.into_inner() * (2.0 * self.normal.dot(vector))
    }

    /// Same plane with the opposite orientation
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, -self.c)
    }

    /// A point of the plane (the one closest to the origin)
    pub fn point(&self) -> Point3<f64> {
        Point3::from(self.normal.into_inner() * self.c)
    }
}

impl RigidTransform for Plane {
    fn translate_in_place(&mut self, vector: &Vector3<f64>) -> &mut Self {
        self.c += self.normal.dot(vector);
        self
    }

    fn rotate_in_place(&mut self, axis: &Axis, angle: f64) -> &mut Self {
        let point = axis.rotate_point(&self.point(), angle);
        self.normal = Unit::new_unchecked(axis.rotate_vector(&self.normal, angle));
        self.c = self.normal.dot(&point.coords);
        self
    }

    fn mirror_in_place(&mut self, plane: &Plane) -> &mut Self {
        let point = plane.reflect_point(&self.point());
        self.normal = Unit::new_unchecked(plane.reflect_vector(&self.normal));
        self.c = self.normal.dot(&point.coords);
        self
    }
}
