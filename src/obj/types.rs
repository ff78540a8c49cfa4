//! Types and constants for OBJ splitting

use std::path::PathBuf;

/// Maximum number of distinct attribute tuples per output mesh (65535).
/// The Shinten runtime indexes vertices with u16, so a material whose faces
/// reference more combinations must be split into parts.
pub const VERTEX_BUDGET: usize = u16::MAX as usize;

/// One corner of a face: a reference into the position/texcoord/normal pools.
///
/// `uv` and `normal` are independently optional. Identity is the whole tuple
/// including absence - `1//2` and `1/1/2` are different vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

/// A polygon (3 or more corners, kept as-is, never triangulated) tagged with
/// the smoothing group active when it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub refs: Vec<VertexRef>,
    /// Smoothing tag from the most recent `s` record, `"off"` by default.
    pub smoothing: String,
}

/// Global attribute pools, populated once by the reader and immutable after.
///
/// Positions keep every component the source provided (at least 3),
/// texcoords at least 1, normals exactly 3.
#[derive(Debug, Default)]
pub struct GeometryPools {
    pub positions: Vec<Vec<f32>>,
    pub texcoords: Vec<Vec<f32>>,
    pub normals: Vec<[f32; 3]>,
}

/// Faces sharing one named material, in declaration order.
#[derive(Debug)]
pub struct MaterialGroup {
    pub name: String,
    /// Resolved texture path (texture dir + basename from the material
    /// library), if the library maps one.
    pub texture: Option<PathBuf>,
    pub faces: Vec<Face>,
}

/// Per-axis coordinate bounds across every parsed position.
///
/// Each axis is `None` until the first value is seen, so a first coordinate
/// of exactly 0.0 still initializes both min and max.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordBounds {
    axes: [Option<[f32; 2]>; 3],
}

impl CoordBounds {
    /// Widen the bounds with a position (extra components beyond xyz ignored).
    pub fn update(&mut self, position: &[f32]) {
        for (axis, &value) in self.axes.iter_mut().zip(position) {
            match axis {
                Some([min, max]) => {
                    if value < *min {
                        *min = value;
                    }
                    if value > *max {
                        *max = value;
                    }
                }
                None => *axis = Some([value, value]),
            }
        }
    }

    /// (min, max) for an axis (0 = x, 1 = y, 2 = z), if any value was seen.
    pub fn axis(&self, axis: usize) -> Option<(f32, f32)> {
        self.axes[axis].map(|[min, max]| (min, max))
    }

    pub fn min(&self) -> Option<[f32; 3]> {
        match self.axes {
            [Some(x), Some(y), Some(z)] => Some([x[0], y[0], z[0]]),
            _ => None,
        }
    }

    pub fn max(&self) -> Option<[f32; 3]> {
        match self.axes {
            [Some(x), Some(y), Some(z)] => Some([x[1], y[1], z[1]]),
            _ => None,
        }
    }
}

/// Result of reading one OBJ file: the shared pools, the global bounds, and
/// the material groups in first-encounter order.
#[derive(Debug)]
pub struct ObjScene {
    pub pools: GeometryPools,
    pub bounds: CoordBounds,
    pub materials: Vec<MaterialGroup>,
}

/// One output mesh: a material (or `_part{N}` slice of one) with its faces
/// rewritten to local indices and its attribute arrays compacted to exactly
/// the referenced entries, in first-use order.
#[derive(Debug)]
pub struct CompactedMesh {
    pub name: String,
    /// Base material name shared by every part of a split group (equals
    /// `name` for an unsplit material).
    pub material: String,
    pub texture: Option<PathBuf>,
    pub positions: Vec<Vec<f32>>,
    pub texcoords: Vec<Vec<f32>>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl CompactedMesh {
    /// Number of distinct attribute tuples referenced by the faces.
    pub fn distinct_tuple_count(&self) -> usize {
        let mut seen = hashbrown::HashSet::new();
        for face in &self.faces {
            for vref in &face.refs {
                seen.insert(*vref);
            }
        }
        seen.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_zero_first_value() {
        let mut bounds = CoordBounds::default();
        bounds.update(&[0.0, 0.0, 0.0]);

        // A first value of exactly 0.0 must still set both min and max.
        assert_eq!(bounds.axis(0), Some((0.0, 0.0)));
        assert_eq!(bounds.axis(1), Some((0.0, 0.0)));
        assert_eq!(bounds.axis(2), Some((0.0, 0.0)));
    }

    #[test]
    fn test_bounds_single_vertex() {
        let mut bounds = CoordBounds::default();
        bounds.update(&[1.5, -2.0, 3.0]);

        assert_eq!(bounds.min(), Some([1.5, -2.0, 3.0]));
        assert_eq!(bounds.max(), Some([1.5, -2.0, 3.0]));
    }

    #[test]
    fn test_bounds_negative_coordinates() {
        let mut bounds = CoordBounds::default();
        bounds.update(&[-1.0, -5.0, -0.5]);
        bounds.update(&[-3.0, -2.0, -0.25]);

        assert_eq!(bounds.min(), Some([-3.0, -5.0, -0.5]));
        assert_eq!(bounds.max(), Some([-1.0, -2.0, -0.25]));
    }

    #[test]
    fn test_bounds_empty() {
        let bounds = CoordBounds::default();
        assert_eq!(bounds.axis(0), None);
        assert_eq!(bounds.min(), None);
        assert_eq!(bounds.max(), None);
    }

    #[test]
    fn test_bounds_ignores_extra_components() {
        let mut bounds = CoordBounds::default();
        bounds.update(&[1.0, 2.0, 3.0, 0.5]); // w component

        assert_eq!(bounds.min(), Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_vertex_ref_identity_includes_absence() {
        let with_uv = VertexRef {
            position: 0,
            uv: Some(0),
            normal: Some(1),
        };
        let without_uv = VertexRef {
            position: 0,
            uv: None,
            normal: Some(1),
        };
        assert_ne!(with_uv, without_uv);
    }
}
