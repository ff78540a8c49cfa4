//! shinten-export library
//!
//! Splits a Wavefront OBJ scene into per-material course models for the
//! Shinten engine, partitioning any material whose faces reference more
//! than 65,535 distinct attribute tuples (the engine indexes vertices with
//! u16), and generates the course manifest and material script around them.

pub mod course;
pub mod error;
pub mod obj;
pub mod texture;

// Re-export key types for the conversion pipeline
pub use course::{check_course, convert_course, write_material_script, CourseManifest};
pub use error::ExportError;
pub use obj::{
    compact_faces, partition_group, read_obj, write_obj, CompactedMesh, CoordBounds, Face,
    GeometryPools, MaterialGroup, ObjScene, VertexRef, VERTEX_BUDGET,
};
pub use texture::texture_has_alpha;
