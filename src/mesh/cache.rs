// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lazily computed mesh data
//!
//! Every entry is filled on first read and emptied by an explicit
//! [`MeshCache::invalidate`] call at each mutation site of [`super::Mesh`].

use super::{is_triangle, Connectivity, Face, FaceProperties, SurfaceIntegrals};
use crate::error::MeshResult;
use std::sync::OnceLock;

/// Kinds of derived data held by a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Areas, centers, normals and radiuses of the faces
    FaceProperties,
    /// Polynomial surface moments
    SurfaceIntegrals,
    /// Triangle and quadrangle id lists
    FaceKinds,
    /// Adjacency maps and boundary loops
    Connectivity,
}

impl CacheKind {
    pub const ALL: [CacheKind; 4] = [
        CacheKind::FaceProperties,
        CacheKind::SurfaceIntegrals,
        CacheKind::FaceKinds,
        CacheKind::Connectivity,
    ];
}

/// Ids of triangle and quadrangle faces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceKinds {
    pub triangles: Vec<usize>,
    pub quadrangles: Vec<usize>,
}

impl FaceKinds {
    pub fn compute(faces: &[Face]) -> Self {
        let (triangles, quadrangles): (Vec<usize>, Vec<usize>) =
            (0..faces.len()).partition(|&id| is_triangle(&faces[id]));
        Self {
            triangles,
            quadrangles,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MeshCache {
    pub(crate) face_properties: OnceLock<FaceProperties>,
    pub(crate) surface_integrals: OnceLock<SurfaceIntegrals>,
    pub(crate) face_kinds: OnceLock<FaceKinds>,
    pub(crate) connectivity: OnceLock<MeshResult<Connectivity>>,
}

impl MeshCache {
    pub(crate) fn invalidate(&mut self, kind: CacheKind) {
        match kind {
            CacheKind::FaceProperties => {
                self.face_properties.take();
            }
            CacheKind::SurfaceIntegrals => {
                self.surface_integrals.take();
            }
            CacheKind::FaceKinds => {
                self.face_kinds.take();
            }
            CacheKind::Connectivity => {
                self.connectivity.take();
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        for kind in CacheKind::ALL {
            self.invalidate(kind);
        }
    }

    pub(crate) fn is_valid(&self, kind: CacheKind) -> bool {
        match kind {
            CacheKind::FaceProperties => self.face_properties.get().is_some(),
            CacheKind::SurfaceIntegrals => self.surface_integrals.get().is_some(),
            CacheKind::FaceKinds => self.face_kinds.get().is_some(),
            CacheKind::Connectivity => self.connectivity.get().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_kinds() {
        let kinds = FaceKinds::compute(&[[0, 1, 2, 0], [0, 1, 2, 3], [3, 4, 5, 3]]);
        assert_eq!(kinds.triangles, vec![0, 2]);
        assert_eq!(kinds.quadrangles, vec![1]);
    }

    #[test]
    fn test_invalidate_single_kind() {
        let mut cache = MeshCache::default();
        cache.face_kinds.get_or_init(FaceKinds::default);
        cache.surface_integrals.get_or_init(SurfaceIntegrals::default);

        cache.invalidate(CacheKind::FaceKinds);
        assert!(!cache.is_valid(CacheKind::FaceKinds));
        assert!(cache.is_valid(CacheKind::SurfaceIntegrals));

        cache.clear();
        assert!(CacheKind::ALL.iter().all(|&kind| !cache.is_valid(kind)));
    }
}
