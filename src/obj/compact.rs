//! Attribute compaction (the per-mesh dedup pass)
//!
//! Rewrites a face list against minimal local attribute arrays: every pool
//! entry the faces reference is appended once, in first-use order, and the
//! face corners are renumbered to the local indices. Absent uv/normal
//! components stay absent.

use super::types::{CompactedMesh, Face, GeometryPools, VertexRef};
use hashbrown::HashMap;
use std::path::PathBuf;

/// Compact `faces` against their parent pools into a self-contained mesh.
///
/// Deterministic (first-use order, no sorting) and idempotent: compacting an
/// already-compacted mesh reproduces it exactly. O(total corner references).
pub fn compact_faces(
    name: String,
    texture: Option<PathBuf>,
    faces: &[Face],
    pools: &GeometryPools,
) -> CompactedMesh {
    let mut position_map: HashMap<usize, usize> = HashMap::new();
    let mut uv_map: HashMap<usize, usize> = HashMap::new();
    let mut normal_map: HashMap<usize, usize> = HashMap::new();

    let mut positions = Vec::new();
    let mut texcoords = Vec::new();
    let mut normals = Vec::new();
    let mut local_faces = Vec::with_capacity(faces.len());

    for face in faces {
        let refs = face
            .refs
            .iter()
            .map(|vref| VertexRef {
                position: *position_map.entry(vref.position).or_insert_with(|| {
                    positions.push(pools.positions[vref.position].clone());
                    positions.len() - 1
                }),
                uv: vref.uv.map(|uv| {
                    *uv_map.entry(uv).or_insert_with(|| {
                        texcoords.push(pools.texcoords[uv].clone());
                        texcoords.len() - 1
                    })
                }),
                normal: vref.normal.map(|normal| {
                    *normal_map.entry(normal).or_insert_with(|| {
                        normals.push(pools.normals[normal]);
                        normals.len() - 1
                    })
                }),
            })
            .collect();

        local_faces.push(Face {
            refs,
            smoothing: face.smoothing.clone(),
        });
    }

    CompactedMesh {
        material: name.clone(),
        name,
        texture,
        positions,
        texcoords,
        normals,
        faces: local_faces,
    }
}
