// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box collapsed at the origin, used for point sets without any point
    pub fn zero() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Tightest box around the points, or [`BoundingBox::zero`] when there are none
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let Some(first) = points.first() else {
            return Self::zero();
        };

        let mut bbox = Self::new(*first, *first);
        for point in &points[1..] {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Cube sharing the center of this box, with the largest extent on all axes
    pub fn squared(&self) -> Self {
        let center = self.center();
        let half = self.size().max() * 0.5;
        let half = Vector3::repeat(half);
        Self::new(center - half, center + half)
    }

    /// Bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (self.min - other.min).amax() < tolerance && (self.max - other.max).amax() < tolerance
    }
}
