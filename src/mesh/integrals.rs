// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polynomial surface integrals
//!
//! For every face the integrals of fifteen monomials of degree one to three
//! are evaluated over the fan triangles with a quadrature rule that is exact
//! up to degree three. Through the divergence theorem they give the enclosed
//! volume and its centroid without a volume mesh.

use super::properties::{fan, FacePoints};
use super::Face;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

/// Number of monomials integrated over each face
pub const NB_MOMENTS: usize = 15;

/// Monomials integrated over the surface, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    X,
    Y,
    Z,
    YZ,
    XZ,
    XY,
    XX,
    YY,
    ZZ,
    XXX,
    YYY,
    ZZZ,
    XXY,
    YYZ,
    ZZX,
}

impl Moment {
    pub const ALL: [Moment; NB_MOMENTS] = [
        Moment::X,
        Moment::Y,
        Moment::Z,
        Moment::YZ,
        Moment::XZ,
        Moment::XY,
        Moment::XX,
        Moment::YY,
        Moment::ZZ,
        Moment::XXX,
        Moment::YYY,
        Moment::ZZZ,
        Moment::XXY,
        Moment::YYZ,
        Moment::ZZX,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn evaluate(self, point: &Point3<f64>) -> f64 {
        let (x, y, z) = (point.x, point.y, point.z);
        match self {
            Moment::X => x,
            Moment::Y => y,
            Moment::Z => z,
            Moment::YZ => y * z,
            Moment::XZ => x * z,
            Moment::XY => x * y,
            Moment::XX => x * x,
            Moment::YY => y * y,
            Moment::ZZ => z * z,
            Moment::XXX => x * x * x,
            Moment::YYY => y * y * y,
            Moment::ZZZ => z * z * z,
            Moment::XXY => x * x * y,
            Moment::YYZ => y * y * z,
            Moment::ZZX => z * z * x,
        }
    }
}

/// Surface moments of every face, indexed by face id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceIntegrals {
    faces: Vec<[f64; NB_MOMENTS]>,
}

/// Moments of a single triangle
///
/// Four-point rule: weight -27/48 at the centroid and 25/48 at the three
/// points with barycentric coordinates (3/5, 1/5, 1/5).
fn triangle_moments(triangle: &[Point3<f64>; 3]) -> [f64; NB_MOMENTS] {
    let [a, b, c] = triangle;
    let area = 0.5 * (b - a).cross(&(c - a)).norm();
    let mut moments = [0.0; NB_MOMENTS];
    if area == 0.0 {
        return moments;
    }

    let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
    let inner = |p: &Point3<f64>, q: &Point3<f64>, r: &Point3<f64>| {
        Point3::from(p.coords * 0.6 + q.coords * 0.2 + r.coords * 0.2)
    };
    let samples = [
        (centroid, -27.0 / 48.0),
        (inner(a, b, c), 25.0 / 48.0),
        (inner(b, c, a), 25.0 / 48.0),
        (inner(c, a, b), 25.0 / 48.0),
    ];

    for moment in Moment::ALL {
        moments[moment.index()] = area
            * samples
                .iter()
                .map(|(point, weight)| weight * moment.evaluate(point))
                .sum::<f64>();
    }
    moments
}

fn face_moments(points: &[Point3<f64>]) -> [f64; NB_MOMENTS] {
    let mut moments = [0.0; NB_MOMENTS];
    for triangle in fan(points) {
        for (total, value) in moments.iter_mut().zip(triangle_moments(&triangle)) {
            *total += value;
        }
    }
    moments
}

impl SurfaceIntegrals {
    pub fn compute(vertices: &[Point3<f64>], faces: &[Face]) -> Self {
        let faces = faces
            .par_iter()
            .map(|face| face_moments(FacePoints::gather(vertices, face).as_slice()))
            .collect();
        Self { faces }
    }

    pub fn nb_faces(&self) -> usize {
        self.faces.len()
    }

    /// All moments of one face
    pub fn face(&self, face_id: usize) -> Option<&[f64; NB_MOMENTS]> {
        self.faces.get(face_id)
    }

    /// One moment of one face
    pub fn get(&self, face_id: usize, moment: Moment) -> Option<f64> {
        self.face(face_id).map(|moments| moments[moment.index()])
    }

    /// Integral of a monomial over the whole surface
    pub fn total(&self, moment: Moment) -> f64 {
        self.faces.iter().map(|moments| moments[moment.index()]).sum()
    }

    /// Enclosed volume, `Σ n · (∫x, ∫y, ∫z) / 3`
    pub fn volume(&self, normals: &[Vector3<f64>]) -> f64 {
        self.faces
            .iter()
            .zip(normals)
            .map(|(moments, normal)| {
                normal.x * moments[Moment::X.index()]
                    + normal.y * moments[Moment::Y.index()]
                    + normal.z * moments[Moment::Z.index()]
            })
            .sum::<f64>()
            / 3.0
    }

    /// Centroid of the enclosed volume, `None` when the volume vanishes
    pub fn center_of_volume(&self, normals: &[Vector3<f64>]) -> Option<Point3<f64>> {
        let volume = self.volume(normals);
        if volume.abs() <= f64::EPSILON {
            return None;
        }

        let sum = self
            .faces
            .iter()
            .zip(normals)
            .fold(Vector3::zeros(), |acc, (moments, normal)| {
                acc + Vector3::new(
                    normal.x * moments[Moment::XX.index()],
                    normal.y * moments[Moment::YY.index()],
                    normal.z * moments[Moment::ZZ.index()],
                )
            });
        Some(Point3::from(sum / (2.0 * volume)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(1.0, 1.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        ]
    }

    #[test]
    fn test_square_moments() {
        let moments = face_moments(&unit_square());

        assert_relative_eq!(moments[Moment::X.index()], 0.5, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::Z.index()], 2.0, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::XX.index()], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::XY.index()], 0.25, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::XXX.index()], 0.25, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::XXY.index()], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(moments[Moment::ZZX.index()], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moment_order() {
        assert_eq!(Moment::ALL.len(), NB_MOMENTS);
        for (index, moment) in Moment::ALL.iter().enumerate() {
            assert_eq!(moment.index(), index);
        }
    }

    #[test]
    fn test_degenerate_triangle_has_no_moments() {
        let moments = triangle_moments(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ]);
        assert!(moments.iter().all(|&m| m == 0.0));
    }
}
