// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planes, axes, bounding boxes and rigid transformations

mod axis;
mod bbox;
mod plane;
mod transform;

pub use axis::Axis;
pub use bbox::BoundingBox;
pub use plane::Plane;
pub use transform::RigidTransform;
