//! Vertex-budget partitioning
//!
//! The Shinten runtime indexes vertices with u16, so one output mesh may
//! reference at most `VERTEX_BUDGET` distinct attribute tuples. An oversized
//! material group is split into the fewest contiguous, face-atomic chunks
//! that each stay within the budget, preserving face order; each chunk is
//! compacted independently.

use super::compact::compact_faces;
use super::types::{CompactedMesh, GeometryPools, MaterialGroup, VertexRef, VERTEX_BUDGET};
use crate::error::ExportError;
use hashbrown::HashSet;

/// Split one material group into budget-bounded compacted meshes.
///
/// The first part keeps the material name; later parts are suffixed
/// `_part2`, `_part3`, ... Concatenating the parts' faces in order
/// reproduces the group's face list exactly.
pub fn partition_group(
    group: &MaterialGroup,
    pools: &GeometryPools,
) -> Result<Vec<CompactedMesh>, ExportError> {
    partition_with_budget(group, pools, VERTEX_BUDGET)
}

fn partition_with_budget(
    group: &MaterialGroup,
    pools: &GeometryPools,
    budget: usize,
) -> Result<Vec<CompactedMesh>, ExportError> {
    let mut parts = Vec::new();
    let mut next = 0;
    let mut part_no = 1;

    while next < group.faces.len() {
        let mut seen: HashSet<VertexRef> = HashSet::new();
        let start = next;

        // Greedy batch: take whole faces while the distinct-tuple count
        // stays within budget; the face that would overflow starts the next
        // part instead.
        while next < group.faces.len() {
            let face = &group.faces[next];
            let novel = face
                .refs
                .iter()
                .filter(|vref| !seen.contains(*vref))
                .collect::<HashSet<_>>()
                .len();
            if seen.len() + novel > budget {
                break;
            }
            seen.extend(face.refs.iter().copied());
            next += 1;
        }

        if next == start {
            // The front face alone exceeds the budget; it can never be
            // placed, so fail instead of spinning on it.
            let tuples = group.faces[start]
                .refs
                .iter()
                .collect::<HashSet<_>>()
                .len();
            return Err(ExportError::Capacity {
                material: group.name.clone(),
                tuples,
                budget,
            });
        }

        let name = if part_no == 1 {
            group.name.clone()
        } else {
            format!("{}_part{}", group.name, part_no)
        };
        let mut mesh = compact_faces(name, group.texture.clone(), &group.faces[start..next], pools);
        // Parts share the group's material; only the mesh name carries the
        // `_part{N}` suffix.
        mesh.material = group.name.clone();
        parts.push(mesh);
        part_no += 1;
    }

    if parts.len() > 1 {
        tracing::info!(
            "Material '{}' split into {} parts ({} faces)",
            group.name,
            parts.len(),
            group.faces.len()
        );
    }
    Ok(parts)
}
